//! Chladni plate library - procedural standing-wave plate meshes

pub mod cli;
pub mod error;
pub mod export;
pub mod field;
pub mod noise;
pub mod params;
pub mod plate;
