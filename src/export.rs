//! Writing generated plates to disk.
//!
//! All requested files are written to temporary siblings first and only
//! renamed into place once every one of them was written, so a failed
//! export leaves neither half-written files nor a partial set of outputs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};

use crate::error::{PlateError, PlateResult};
use crate::params::ExportConfig;
use crate::plate::PlateMesh;

/// Check that every export target can be written before any work is done
pub fn check_targets(config: &ExportConfig) -> PlateResult<()> {
    let mut seen: Vec<PathBuf> = Vec::new();

    for path in config.targets() {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(PlateError::Precondition(format!(
                "output directory {} does not exist",
                parent.display()
            )));
        }
        if path.is_dir() {
            return Err(PlateError::Precondition(format!(
                "{} is a directory",
                path.display()
            )));
        }
        if path.exists() && !config.overwrite {
            return Err(PlateError::Precondition(format!(
                "{} already exists (use --force to replace it)",
                path.display()
            )));
        }

        let tmp = temp_path(path);
        if tmp.exists() {
            return Err(PlateError::Precondition(format!(
                "temporary file {} is in the way",
                tmp.display()
            )));
        }

        // Compare by canonical directory so `./a.obj` and `a.obj` collide
        let resolved = parent
            .canonicalize()
            .map_err(|e| PlateError::io(parent, e))?
            .join(path.file_name().unwrap_or_default());
        if seen.contains(&resolved) {
            return Err(PlateError::Precondition(format!(
                "{} is requested for more than one output",
                path.display()
            )));
        }
        seen.push(resolved);
    }
    Ok(())
}

/// Write every output requested by `config`, all or nothing.
///
/// `heightmap` is a row-major square grid of heights, required when a
/// heightmap path is configured.
pub fn export_plate(
    mesh: &PlateMesh,
    heightmap: Option<&[f32]>,
    config: &ExportConfig,
) -> PlateResult<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::new();
    let result =
        stage_outputs(mesh, heightmap, config, &mut staged).and_then(|_| commit(&staged));

    if result.is_err() {
        for (tmp, _) in &staged {
            let _ = fs::remove_file(tmp);
        }
    }
    result
}

fn stage_outputs<'a>(
    mesh: &PlateMesh,
    heightmap: Option<&[f32]>,
    config: &'a ExportConfig,
    staged: &mut Vec<(PathBuf, &'a Path)>,
) -> PlateResult<()> {
    let tmp = temp_path(&config.obj_path);
    staged.push((tmp.clone(), config.obj_path.as_path()));
    write_obj(mesh, &tmp)?;

    if let Some(path) = &config.heightmap_path {
        let heights = heightmap.ok_or_else(|| {
            PlateError::Precondition(format!(
                "heightmap {} requested without sampled heights",
                path.display()
            ))
        })?;
        let tmp = temp_path(path);
        staged.push((tmp.clone(), path.as_path()));
        write_heightmap(heights, config.heightmap_size, &tmp)?;
    }

    if let Some(path) = &config.raw_path {
        let tmp = temp_path(path);
        staged.push((tmp.clone(), path.as_path()));
        write_raw(mesh, &tmp)?;
    }

    Ok(())
}

/// Move staged files into place; on failure drop the ones already moved
fn commit(staged: &[(PathBuf, &Path)]) -> PlateResult<()> {
    for (i, (tmp, target)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, target) {
            for (_, done) in &staged[..i] {
                let _ = fs::remove_file(done);
            }
            return Err(PlateError::io(*target, e));
        }
        log::info!("Wrote {}", target.display());
    }
    Ok(())
}

/// Wavefront OBJ with the pending transform baked in
pub fn write_obj(mesh: &PlateMesh, path: &Path) -> PlateResult<()> {
    let mesh = mesh.baked();
    let write = || -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "# Chladni plate")?;
        writeln!(out, "o {}", mesh.name)?;

        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            writeln!(out, "v {} {} {}", x, y, z)?;
        }
        for v in &mesh.vertices {
            writeln!(out, "vt {} {}", v.uv[0], v.uv[1])?;
        }

        if mesh.is_smooth() {
            for v in &mesh.vertices {
                let [x, y, z] = v.normal;
                writeln!(out, "vn {} {} {}", x, y, z)?;
            }
            writeln!(out, "s 1")?;
        } else {
            writeln!(out, "s off")?;
        }

        for quad in &mesh.quads {
            write!(out, "f")?;
            for &index in quad {
                // OBJ indices are 1-based
                let i = index + 1;
                if mesh.is_smooth() {
                    write!(out, " {i}/{i}/{i}")?;
                } else {
                    write!(out, " {i}/{i}")?;
                }
            }
            writeln!(out)?;
        }

        out.flush()
    };
    write().map_err(|e| PlateError::io(path, e))
}

/// Grayscale PNG of a square height grid, normalised to its own min/max
pub fn write_heightmap(heights: &[f32], resolution: u32, path: &Path) -> PlateResult<()> {
    heightmap_image(heights, resolution).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Map heights to gray levels; a flat field renders mid gray
pub fn heightmap_image(heights: &[f32], resolution: u32) -> GrayImage {
    let (min, max) = heights
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        });
    let range = max - min;
    let pixels = resolution as usize * resolution as usize;

    let mut img = GrayImage::new(resolution, resolution);
    for (i, &h) in heights.iter().enumerate().take(pixels) {
        let gray = if range > f32::EPSILON {
            ((h - min) / range * 255.0).round().clamp(0.0, 255.0) as u8
        } else {
            128
        };
        let x = (i % resolution as usize) as u32;
        let y = (i / resolution as usize) as u32;
        img.put_pixel(x, y, Luma([gray]));
    }
    img
}

/// Vertex heights as native-endian f32, in vertex order
pub fn write_raw(mesh: &PlateMesh, path: &Path) -> PlateResult<()> {
    let heights = mesh.baked().heights();
    fs::write(path, bytemuck::cast_slice::<f32, u8>(&heights))
        .map_err(|e| PlateError::io(path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
