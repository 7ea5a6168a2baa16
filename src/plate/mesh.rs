//! Plate grid mesh with pending object scale and smooth-shading normals.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::params::{Axis, GridParameters};

/// Vertex data for plate mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Rectangular plate grid lying in the XY plane, Z up
#[derive(Clone, Debug)]
pub struct PlateMesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    /// Triangle list (counter-clockwise seen from +Z)
    pub indices: Vec<u32>,
    /// Quad faces, kept for exporters that prefer polygons
    pub quads: Vec<[u32; 4]>,
    /// Object scale not yet baked into vertex positions
    pub pending_scale: Vec3,
    smooth: bool,
}

impl PlateMesh {
    /// Create a flat grid of `subdivisions_x` × `subdivisions_y` cells spanning
    /// `size` on both axes, centred on the origin
    pub fn new(grid: &GridParameters) -> Self {
        let columns = grid.subdivisions_x as usize;
        let rows = grid.subdivisions_y as usize;
        let size = grid.size as f32;
        let half_size = size / 2.0;
        let step_x = size / columns as f32;
        let step_y = size / rows as f32;

        let mut vertices = Vec::with_capacity((columns + 1) * (rows + 1));
        let mut indices = Vec::with_capacity(columns * rows * 6);
        let mut quads = Vec::with_capacity(columns * rows);

        for y in 0..=rows {
            for x in 0..=columns {
                vertices.push(Vertex {
                    position: [
                        x as f32 * step_x - half_size,
                        y as f32 * step_y - half_size,
                        0.0,
                    ],
                    normal: [0.0, 0.0, 1.0],
                    uv: [x as f32 / columns as f32, y as f32 / rows as f32],
                });
            }
        }

        for y in 0..rows {
            for x in 0..columns {
                let bottom_left = (y * (columns + 1) + x) as u32;
                let bottom_right = bottom_left + 1;
                let top_left = ((y + 1) * (columns + 1) + x) as u32;
                let top_right = top_left + 1;

                indices.extend_from_slice(&[
                    bottom_left,
                    bottom_right,
                    top_right,
                    bottom_left,
                    top_right,
                    top_left,
                ]);
                quads.push([bottom_left, bottom_right, top_right, top_left]);
            }
        }

        Self {
            name: String::from("Grid"),
            vertices,
            indices,
            quads,
            pending_scale: Vec3::ONE,
            smooth: false,
        }
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// Multiply the pending object scale along `axis`
    pub fn scale_axis(&mut self, axis: Axis, factor: f32) {
        self.pending_scale[axis.index()] *= factor;
    }

    /// Bake the pending scale into vertex positions and reset it to one
    pub fn apply_transform(&mut self) {
        if self.pending_scale == Vec3::ONE {
            return;
        }
        log::debug!("Baking pending scale {:?} into {}", self.pending_scale, self.name);

        let scale = self.pending_scale;
        for vertex in &mut self.vertices {
            vertex.position = (Vec3::from_array(vertex.position) * scale).to_array();
        }
        self.pending_scale = Vec3::ONE;

        if self.smooth {
            self.recompute_normals();
        }
    }

    /// Copy of this mesh with the pending scale baked in
    pub fn baked(&self) -> Self {
        let mut mesh = self.clone();
        mesh.apply_transform();
        mesh
    }

    /// Planar (x, y) coordinates of every vertex as currently stored
    pub fn planar_positions(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.vertices.iter().map(|v| (v.position[0], v.position[1]))
    }

    /// Offset each vertex height by the matching entry of `offsets`
    pub fn displace(&mut self, offsets: &[f32]) {
        debug_assert_eq!(offsets.len(), self.vertices.len());
        for (vertex, offset) in self.vertices.iter_mut().zip(offsets) {
            vertex.position[2] += offset;
        }
    }

    /// Vertex heights in vertex order
    pub fn heights(&self) -> Vec<f32> {
        self.vertices.iter().map(|v| v.position[2]).collect()
    }

    /// Mark the mesh smooth and compute per-vertex normals
    pub fn set_smooth_shading(&mut self) {
        self.smooth = true;
        self.recompute_normals();
    }

    /// Area-weighted vertex normals from the triangle list
    fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let v0 = Vec3::from_array(self.vertices[i0].position);
            let v1 = Vec3::from_array(self.vertices[i1].position);
            let v2 = Vec3::from_array(self.vertices[i2].position);

            // Cross product length is twice the triangle area
            let face = (v1 - v0).cross(v2 - v0);
            accum[i0] += face;
            accum[i1] += face;
            accum[i2] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accum) {
            // Zero-area plates (size or length 0) fall back to +Z
            vertex.normal = normal.try_normalize().unwrap_or(Vec3::Z).to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(sx: u32, sy: u32) -> GridParameters {
        GridParameters {
            subdivisions_x: sx,
            subdivisions_y: sy,
            ..GridParameters::default()
        }
    }

    #[test]
    fn test_plate_grid_creation() {
        let params = grid(10, 14);
        let mesh = PlateMesh::new(&params);

        // Check vertex count: (sx + 1) * (sy + 1)
        assert_eq!(mesh.vertices.len(), params.vertex_count());

        // Check triangle count: sx * sy * 2 triangles * 3 indices
        assert_eq!(mesh.indices.len(), 10 * 14 * 6);
        assert_eq!(mesh.quads.len(), 10 * 14);
    }

    #[test]
    fn test_plate_bounds_centered() {
        let params = GridParameters {
            size: 2.0,
            ..grid(10, 10)
        };
        let mesh = PlateMesh::new(&params);

        let first = mesh.vertices.first().unwrap().position;
        let last = mesh.vertices.last().unwrap().position;
        assert_eq!(first, [-1.0, -1.0, 0.0]);
        assert!((last[0] - 1.0).abs() < 1e-6);
        assert!((last[1] - 1.0).abs() < 1e-6);
        assert!(mesh.vertices.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn test_pending_scale_is_baked_on_apply() {
        let mut mesh = PlateMesh::new(&grid(10, 10));
        mesh.scale_axis(Axis::Y, 3.0);

        // Not baked yet
        let corner = mesh.vertices.last().unwrap().position;
        assert!((corner[1] - 0.5).abs() < 1e-6);
        assert!((mesh.baked().vertices.last().unwrap().position[1] - 1.5).abs() < 1e-6);

        mesh.apply_transform();
        let corner = mesh.vertices.last().unwrap().position;
        assert!((corner[0] - 0.5).abs() < 1e-6);
        assert!((corner[1] - 1.5).abs() < 1e-6);
        assert_eq!(mesh.pending_scale, Vec3::ONE);
    }

    #[test]
    fn test_flat_plate_normals_point_up() {
        let mut mesh = PlateMesh::new(&grid(10, 10));
        mesh.set_smooth_shading();
        assert!(mesh.is_smooth());
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.normal) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_displace_writes_only_height() {
        let mut mesh = PlateMesh::new(&grid(10, 10));
        let before: Vec<(f32, f32)> = mesh.planar_positions().collect();
        let offsets: Vec<f32> = (0..mesh.vertices.len()).map(|i| i as f32 * 0.01).collect();

        mesh.displace(&offsets);

        let after: Vec<(f32, f32)> = mesh.planar_positions().collect();
        assert_eq!(before, after);
        assert_eq!(mesh.heights(), offsets);
    }

    #[test]
    fn test_degenerate_plate_normals_fall_back() {
        let params = GridParameters {
            size: 0.0,
            ..grid(10, 10)
        };
        let mut mesh = PlateMesh::new(&params);
        mesh.set_smooth_shading();
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}
