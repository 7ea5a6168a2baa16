//! Parameter definitions with documented ranges and semantics.
//!
//! All magic numbers of the generator are extracted here with:
//! - Recommended (UI) ranges, which only produce warnings
//! - Hard validity bounds, which are rejected before any geometry is built
//! - Defaults matching the interactive tool

mod export;
mod field;
mod grid;

// Re-export all types
pub use export::ExportConfig;
pub use field::{FieldModel, FieldParameters, DEFAULT_FREQUENCY_RANGE};
pub use grid::{Axis, GridParameters};

use crate::error::{PlateError, PlateResult};

/// Reject NaN and infinities
pub(crate) fn require_finite(name: &'static str, value: f64) -> PlateResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlateError::invalid(name, value, "must be finite"))
    }
}

/// Reject negative (and non-finite) values
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> PlateResult<()> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(PlateError::invalid(name, value, "must not be negative"));
    }
    Ok(())
}

/// Reject zero, negative and non-finite values
pub(crate) fn require_positive(name: &'static str, value: f64) -> PlateResult<()> {
    require_finite(name, value)?;
    if value <= 0.0 {
        return Err(PlateError::invalid(name, value, "must be strictly positive"));
    }
    Ok(())
}

/// Describe a value that left its recommended UI range
pub(crate) fn outside_range(name: &str, value: f64, min: f64, max: f64) -> Option<String> {
    (value < min || value > max).then(|| {
        format!(
            "{} = {} is outside the recommended range [{}, {}]",
            name, value, min, max
        )
    })
}
