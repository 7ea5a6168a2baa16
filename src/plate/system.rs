//! Plate generation pipeline: validate → grid → scale → displace → shade → name.

use crate::error::{PlateError, PlateResult};
use crate::field;
use crate::noise::CoherentNoise;
use crate::params::{ExportConfig, FieldParameters, GridParameters};

use super::mesh::PlateMesh;

/// High-level plate generator holding one invocation's parameters
pub struct PlateSystem {
    pub grid: GridParameters,
    pub field: FieldParameters,
}

impl PlateSystem {
    /// Create a generator, rejecting parameters that would give degenerate geometry
    pub fn new(grid: GridParameters, field: FieldParameters) -> PlateResult<Self> {
        grid.validate()?;
        field.validate()?;
        for message in grid.unusual_values().iter().chain(&field.unusual_values()) {
            log::warn!("{}", message);
        }
        Ok(Self { grid, field })
    }

    /// Build and displace a fresh plate.
    ///
    /// The mesh is only handed back once every vertex has been displaced,
    /// and never with non-finite heights.
    pub fn generate(&self, noise: Option<&dyn CoherentNoise>) -> PlateResult<PlateMesh> {
        log::debug!("Grid parameters: {:?}", self.grid);
        log::debug!("Field parameters: {:?}", self.field);

        let mut mesh = PlateMesh::new(&self.grid);
        mesh.scale_axis(self.grid.length_axis, self.grid.length as f32);
        if self.grid.apply {
            mesh.apply_transform();
        } else {
            log::debug!(
                "Keeping length scale {} as a pending transform",
                self.grid.length
            );
        }

        let offsets = mesh
            .planar_positions()
            .map(|(x, y)| self.height_at(x as f64, y as f64, noise))
            .collect::<PlateResult<Vec<f32>>>()?;
        mesh.displace(&offsets);

        mesh.set_smooth_shading();
        mesh.name = self.field.plate_name();

        log::info!(
            "Generated {} ({} vertices, {} faces)",
            mesh.name,
            mesh.vertices.len(),
            mesh.quads.len()
        );
        Ok(mesh)
    }

    /// Sample the field on a `resolution` × `resolution` raster covering the
    /// coordinates the evaluator sees, row-major with the top row at +Y
    pub fn sample_heightmap(
        &self,
        resolution: u32,
        noise: Option<&dyn CoherentNoise>,
    ) -> PlateResult<Vec<f32>> {
        if !(1..=ExportConfig::MAX_HEIGHTMAP_SIZE).contains(&resolution) {
            return Err(PlateError::invalid(
                "heightmap_size",
                resolution as f64,
                "must be between 1 and 8192 pixels",
            ));
        }

        let mut half = [self.grid.size / 2.0; 2];
        if self.grid.apply {
            half[self.grid.length_axis.index()] *= self.grid.length;
        }
        let [half_x, half_y] = half;
        let last = resolution.saturating_sub(1).max(1) as f64;
        let pixels = resolution as usize * resolution as usize;

        let mut heights = Vec::with_capacity(pixels);
        for row in 0..resolution {
            let y = half_y - 2.0 * half_y * row as f64 / last;
            for col in 0..resolution {
                let x = -half_x + 2.0 * half_x * col as f64 / last;
                heights.push(self.height_at(x, y, noise)?);
            }
        }
        Ok(heights)
    }

    /// Evaluate one height, rejecting overflow to infinity or NaN
    fn height_at(&self, x: f64, y: f64, noise: Option<&dyn CoherentNoise>) -> PlateResult<f32> {
        let height = field::evaluate(x, y, &self.field, noise) as f32;
        if height.is_finite() {
            Ok(height)
        } else {
            Err(PlateError::invalid(
                "field_parameters",
                height as f64,
                "field evaluates to a non-finite height on this plate",
            ))
        }
    }
}

/// Validate parameters and generate one plate
pub fn generate_plate(
    grid: GridParameters,
    field: FieldParameters,
    noise: Option<&dyn CoherentNoise>,
) -> PlateResult<PlateMesh> {
    PlateSystem::new(grid, field)?.generate(noise)
}
