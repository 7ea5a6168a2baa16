//! Chladni plate generator
//!
//! Builds a flat grid, displaces it with a standing-wave field and writes
//! the result as a Wavefront OBJ (plus optional heightmap previews).

use clap::Parser;

use chladni::cli::Args;
use chladni::export;
use chladni::noise::NoiseGenerator;
use chladni::plate::PlateSystem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = args.grid_parameters();
    let field = args.field_parameters();
    let config = args.export_config(&field.plate_name());

    // Fail before generating anything if the outputs cannot be written
    export::check_targets(&config)?;
    let system = PlateSystem::new(grid, field)?;

    let noise = NoiseGenerator::new(args.noise_kind(), args.noise_seed);
    let mesh = system.generate(Some(&noise))?;
    let heightmap = match config.heightmap_path {
        Some(_) => Some(system.sample_heightmap(config.heightmap_size, Some(&noise))?),
        None => None,
    };

    export::export_plate(&mesh, heightmap.as_deref(), &config)?;

    println!("{} -> {}", mesh.name, config.obj_path.display());
    Ok(())
}
