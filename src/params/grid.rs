//! Plate grid parameters.

use super::{outside_range, require_non_negative};
use crate::error::{PlateError, PlateResult};

/// Planar axis of the plate (Z is the displacement axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    X,
    #[default]
    Y,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Plate grid construction parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GridParameters {
    /// Cells along X (interactive minimum 10, soft maximum 40)
    pub subdivisions_x: u32,

    /// Cells along Y (interactive minimum 10, soft maximum 40)
    pub subdivisions_y: u32,

    /// Full edge length of the square plate
    pub size: f64,

    /// Scale factor along `length_axis`
    pub length: f64,

    /// Axis stretched by `length`
    pub length_axis: Axis,

    /// Bake the length scale into vertices before displacement.
    /// When false the scale stays a pending transform, baked after displacement.
    pub apply: bool,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            subdivisions_x: 20,
            subdivisions_y: 20,
            size: 1.0,
            length: 1.0,
            length_axis: Axis::Y,
            apply: true,
        }
    }
}

impl GridParameters {
    /// Fewest cells per axis that still form a well-defined grid
    pub const MIN_SUBDIVISIONS: u32 = 2;

    /// Reject grids that would degenerate
    pub fn validate(&self) -> PlateResult<()> {
        for (name, value) in [
            ("subdivisions_x", self.subdivisions_x),
            ("subdivisions_y", self.subdivisions_y),
        ] {
            if value < Self::MIN_SUBDIVISIONS {
                return Err(PlateError::invalid(
                    name,
                    value as f64,
                    "grid needs at least 2 subdivisions per axis",
                ));
            }
        }
        require_non_negative("size", self.size)?;
        require_non_negative("length", self.length)?;
        Ok(())
    }

    /// Values outside the ranges the interactive panel offers
    pub fn unusual_values(&self) -> Vec<String> {
        [
            ("subdivisions_x", self.subdivisions_x),
            ("subdivisions_y", self.subdivisions_y),
        ]
        .into_iter()
        .filter_map(|(name, value)| outside_range(name, value as f64, 10.0, 40.0))
        .collect()
    }

    /// Vertex count of the grid: (sx + 1) * (sy + 1)
    pub fn vertex_count(&self) -> usize {
        (self.subdivisions_x as usize + 1) * (self.subdivisions_y as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = GridParameters::default();
        assert_eq!(grid.subdivisions_x, 20);
        assert_eq!(grid.subdivisions_y, 20);
        assert_eq!(grid.length_axis, Axis::Y);
        assert!(grid.apply);
        assert_eq!(grid.vertex_count(), 441);
        assert!(grid.validate().is_ok());
        assert!(grid.unusual_values().is_empty());
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let grid = GridParameters {
            subdivisions_y: 1,
            ..GridParameters::default()
        };
        assert!(grid.validate().is_err());

        let grid = GridParameters {
            length: -1.0,
            ..GridParameters::default()
        };
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_zero_size_is_allowed() {
        let grid = GridParameters {
            size: 0.0,
            length: 0.0,
            ..GridParameters::default()
        };
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_dense_grid_reported_as_unusual() {
        let grid = GridParameters {
            subdivisions_y: 64,
            ..GridParameters::default()
        };
        let unusual = grid.unusual_values();
        assert_eq!(unusual.len(), 1);
        assert!(unusual[0].starts_with("subdivisions_y = 64"));
    }
}
