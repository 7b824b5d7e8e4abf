use crate::engine::canvas::Canvas;
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Builds the canvas of lattice sites described by `config`.
///
/// # Errors
///
/// Returns an error if the lattice or shape cannot be constructed from the configuration
/// (including the unsupported {110} alignment), if the shape is too large to scan, or if
/// no lattice site falls inside the shape.
#[instrument(skip_all, name = "build_workflow")]
pub fn run(config: &BuildConfig, reporter: &ProgressReporter) -> Result<Canvas, EngineError> {
    info!(
        iad = config.lattice.iad,
        orientation = %config.lattice.orientation,
        shape = config.shape.kind(),
        "Starting nanoparticle build."
    );

    let lattice = config.lattice.build()?;
    let shape = config.shape.build()?;
    reporter.report(Progress::Message(format!(
        "Lattice ready: IAD {:.4}, {{{}}} layer spacing {:.4}",
        lattice.iad(),
        config.lattice.orientation,
        lattice.layer_spacing(config.lattice.orientation)
    )));

    let canvas = Canvas::from_shape(&lattice, shape.as_ref(), reporter)?;
    if canvas.is_empty() {
        return Err(EngineError::EmptyCanvas {
            shape: config.shape.kind(),
        });
    }

    info!(sites = canvas.len(), bonds = canvas.num_bonds(), "Build complete.");
    Ok(canvas)
}
