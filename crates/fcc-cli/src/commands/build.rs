use crate::cli::BuildArgs;
use crate::config::{self, AppConfig, OutputSettings};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use fccnano::core::io::xyz::XyzFile;
use fccnano::core::lattice::fcc::COORDINATION_NUMBER;
use fccnano::engine::canvas::Canvas;
use fccnano::engine::progress::ProgressReporter;
use fccnano::workflows;
use tracing::info;

pub fn run(args: BuildArgs, quiet: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = config::build_config(&args)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Building {} nanoparticle on an FCC {{{}}} lattice (IAD {})...",
        config.build.shape.kind(),
        config.build.lattice.orientation,
        config.build.lattice.iad
    );
    let canvas = execute(&config, &reporter)?;

    let surface = surface_site_count(&canvas);
    println!(
        "✓ {} sites ({} on the surface, {} bonds) written to: {}",
        canvas.len(),
        surface,
        canvas.num_bonds(),
        config.output.path.display()
    );
    Ok(())
}

/// Runs the build workflow and writes the resulting sites as XYZ.
pub fn execute(config: &AppConfig, reporter: &ProgressReporter) -> Result<Canvas> {
    let canvas = workflows::build::run(&config.build, reporter)?;
    info!(
        "Workflow finished with {} sites. Writing {:?}",
        canvas.len(),
        &config.output.path
    );
    write_canvas(&canvas, config, &config.output)?;
    Ok(canvas)
}

fn write_canvas(canvas: &Canvas, config: &AppConfig, output: &OutputSettings) -> Result<()> {
    let comment = match &output.comment {
        Some(comment) => comment.clone(),
        None => format!(
            "fccnano {} iad={} orientation={} sites={}",
            config.build.shape.kind(),
            config.build.lattice.iad,
            config.build.lattice.orientation,
            canvas.len()
        ),
    };
    XyzFile::write_to_path(canvas.positions(), &output.element, &comment, &output.path).map_err(
        |source| CliError::FileWriting {
            path: output.path.clone(),
            source,
        },
    )
}

fn surface_site_count(canvas: &Canvas) -> usize {
    canvas
        .coordination_numbers()
        .into_iter()
        .filter(|&n| n < COORDINATION_NUMBER)
        .count()
}
