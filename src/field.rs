//! Standing-wave displacement field.
//!
//! Maps a vertex's planar position to a height offset. The classic field is
//! the two-term Chladni approximation
//!
//! ```text
//! z = Aa·sin(fa·x·π)·sin(fb·y·π) + Ab·sin(fb·x·π)·sin(fa·y·π)
//! ```
//!
//! The extended field swirls the plane first, lets coherent noise nudge the
//! two frequencies, and stretches each axis independently before applying
//! the same two-term form.

use std::f64::consts::PI;

use glam::{DVec2, DVec3};

use crate::noise::CoherentNoise;
use crate::params::{FieldModel, FieldParameters};

/// Scale applied to warped coordinates before sampling noise
const NOISE_SCALE: f64 = 0.5;

/// Shift into an unrelated region of the noise field for the second frequency
const NOISE_DECORRELATION_OFFSET: f64 = 10.0;

/// Displacement at `(x, y)` for the model selected in `params`.
///
/// Pure and stateless; safe to call for vertices in any order. `noise` is
/// only consulted by the extended model and only when
/// `frequency_variation` is non-zero.
pub fn evaluate(
    x: f64,
    y: f64,
    params: &FieldParameters,
    noise: Option<&dyn CoherentNoise>,
) -> f64 {
    match params.model {
        FieldModel::Classic => baseline(x, y, params),
        FieldModel::Extended => extended(x, y, params, noise),
    }
}

/// Classic two-term sine product
pub fn baseline(x: f64, y: f64, params: &FieldParameters) -> f64 {
    let fa = params.frequency_a;
    let fb = params.frequency_b;
    params.amplitude_a * (fa * x * PI).sin() * (fb * y * PI).sin()
        + params.amplitude_b * (fb * x * PI).sin() * (fa * y * PI).sin()
}

/// Swirl, frequency variation and anisotropy layered over the two-term form
pub fn extended(
    x: f64,
    y: f64,
    params: &FieldParameters,
    noise: Option<&dyn CoherentNoise>,
) -> f64 {
    let warped = swirl_warp(DVec2::new(x, y), params.swirl_strength);
    let (fx, fy) = effective_frequencies(warped, params, noise);

    let (xw, yw) = (warped.x, warped.y);
    let (ax, ay) = (params.anisotropy_x, params.anisotropy_y);

    params.amplitude_a * (fx * xw * ax * PI).sin() * (fy * yw * ay * PI).sin()
        + params.amplitude_b * (fy * xw * ax * PI).sin() * (fx * yw * ay * PI).sin()
}

/// Rotate `point` about the origin by `strength · r²` radians.
///
/// Zero strength is the exact identity.
pub fn swirl_warp(point: DVec2, strength: f64) -> DVec2 {
    if strength == 0.0 {
        return point;
    }

    let r = point.length();
    let theta = point.y.atan2(point.x);
    let angle = theta + strength * r * r;
    DVec2::new(r * angle.cos(), r * angle.sin())
}

/// Base frequencies perturbed by noise sampled around the warped position.
///
/// Returns `(fx, fy)`; both equal the base frequencies when there is no
/// noise source or the variation weight is zero.
pub fn effective_frequencies(
    warped: DVec2,
    params: &FieldParameters,
    noise: Option<&dyn CoherentNoise>,
) -> (f64, f64) {
    let Some(noise) = noise.filter(|_| params.frequency_variation != 0.0) else {
        return (params.frequency_a, params.frequency_b);
    };

    let base = (warped * NOISE_SCALE).extend(0.0);
    let shifted =
        base + DVec3::new(NOISE_DECORRELATION_OFFSET, NOISE_DECORRELATION_OFFSET, 0.0);

    let fx = params.frequency_a + params.frequency_variation * noise.sample(base);
    let fy = params.frequency_b + params.frequency_variation * noise.sample(shifted);
    (fx, fy)
}
