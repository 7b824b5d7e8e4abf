use clap::{Args, Parser, Subcommand, ValueEnum};
use fccnano::core::lattice::orientation::Orientation;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "fccnano contributors",
    version,
    about = "fccnano CLI - Cut face-centered cubic nanoparticles out of an oriented lattice and export them as XYZ.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to enumerate lattice sites.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a nanoparticle by cutting a shape out of an FCC lattice.
    Build(BuildArgs),
    /// Print the geometric properties of an FCC lattice.
    Info(InfoArgs),
}

/// The outline a nanoparticle is cut with.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Cube,
    Cuboctahedron,
    Sphere,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path for the output XYZ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the interatomic distance (nearest-neighbor distance).
    #[arg(long, value_name = "FLOAT")]
    pub iad: Option<f64>,

    /// Override the lattice orientation: 100, 110, 111 or 111-y.
    #[arg(long, value_name = "ORIENTATION")]
    pub orientation: Option<Orientation>,

    /// Override the shape the nanoparticle is cut with.
    #[arg(long, value_enum)]
    pub shape: Option<ShapeKind>,

    /// Override the shape size: edge length for cubes and cuboctahedra, radius for spheres.
    #[arg(long, value_name = "FLOAT")]
    pub size: Option<f64>,

    /// Override the shape center, given as 'x,y,z'.
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub center: Option<String>,

    /// Override the element symbol written for every site.
    #[arg(short, long, value_name = "SYMBOL")]
    pub element: Option<String>,

    /// Set individual config file values (e.g., -S lattice.tolerance=1e-6).
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// The interatomic distance (nearest-neighbor distance).
    #[arg(long, required = true, value_name = "FLOAT")]
    pub iad: f64,

    /// The lattice orientation whose layer spacing is highlighted.
    #[arg(long, value_name = "ORIENTATION", default_value = "100")]
    pub orientation: Orientation,
}
