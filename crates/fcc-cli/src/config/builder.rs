use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, OutputSettings};
use crate::cli::{BuildArgs, ShapeKind};
use crate::error::{CliError, Result};
use crate::utils::parser;
use clap::ValueEnum;
use fccnano::core::geometry::Point;
use fccnano::core::lattice::orientation::Orientation;
use fccnano::engine::config::{BuildConfigBuilder, ShapeConfig};
use fccnano::engine::error::EngineError;
use tracing::debug;

pub fn build_config(args: &BuildArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let lattice_file = file_config.lattice.take().unwrap_or_default();
    let iad = args.iad.or(lattice_file.iad).ok_or_else(|| {
        CliError::Config(
            "A value for 'iad' is required either in the config file or via --iad.".to_string(),
        )
    })?;
    let orientation = args
        .orientation
        .or(lattice_file.orientation)
        .unwrap_or(defaults.orientation);
    let tolerance = lattice_file.tolerance.unwrap_or(defaults.tolerance);

    let shape_file = file_config.shape.take().unwrap_or_default();
    let kind = args.shape.or(shape_file.kind).unwrap_or(defaults.shape);
    let size = args.size.or(shape_file.size).ok_or_else(|| {
        CliError::Config(
            "A value for 'size' is required either in the config file or via --size.".to_string(),
        )
    })?;
    let center = match &args.center {
        Some(text) => parser::parse_point(text)?,
        None => shape_file.center.unwrap_or(defaults.center),
    };
    let shape = shape_config(kind, size, Point::from(center));

    let build = BuildConfigBuilder::new()
        .iad(iad)
        .orientation(orientation)
        .tolerance(tolerance)
        .shape(shape)
        .build()
        .map_err(EngineError::from)?;

    let output_file = file_config.output.take().unwrap_or_default();
    let element = args
        .element
        .clone()
        .or(output_file.element)
        .unwrap_or(defaults.element);
    if element.trim().is_empty() || element.contains(char::is_whitespace) {
        return Err(CliError::Argument(format!(
            "Element symbol '{}' must be a single non-empty token.",
            element
        )));
    }

    debug!(?build, %element, "Resolved build configuration.");
    Ok(AppConfig {
        build,
        output: OutputSettings {
            path: args.output.clone(),
            element,
            comment: output_file.comment,
        },
    })
}

fn shape_config(kind: ShapeKind, size: f64, center: Point) -> ShapeConfig {
    match kind {
        ShapeKind::Cube => ShapeConfig::Cube {
            edge_length: size,
            center,
        },
        ShapeKind::Cuboctahedron => ShapeConfig::Cuboctahedron {
            edge_length: size,
            center,
        },
        ShapeKind::Sphere => ShapeConfig::Sphere {
            radius: size,
            center,
        },
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for pair in set_values {
        let (key, value) = parser::parse_key_value(pair)?;
        match key {
            "lattice.iad" => {
                config.lattice.get_or_insert_with(Default::default).iad =
                    Some(parser::parse_float(key, value)?);
            }
            "lattice.orientation" => {
                let orientation = value.parse::<Orientation>().map_err(CliError::Config)?;
                config.lattice.get_or_insert_with(Default::default).orientation =
                    Some(orientation);
            }
            "lattice.tolerance" => {
                config.lattice.get_or_insert_with(Default::default).tolerance =
                    Some(parser::parse_float(key, value)?);
            }
            "shape.type" => {
                let kind = ShapeKind::from_str(value, true).map_err(|_| {
                    parser::ParseError::InvalidValue {
                        key: key.to_string(),
                        kind: "shape",
                        value: value.to_string(),
                    }
                })?;
                config.shape.get_or_insert_with(Default::default).kind = Some(kind);
            }
            "shape.size" => {
                config.shape.get_or_insert_with(Default::default).size =
                    Some(parser::parse_float(key, value)?);
            }
            "shape.center" => {
                config.shape.get_or_insert_with(Default::default).center =
                    Some(parser::parse_point(value)?);
            }
            "output.element" => {
                config.output.get_or_insert_with(Default::default).element =
                    Some(value.to_string());
            }
            "output.comment" => {
                config.output.get_or_insert_with(Default::default).comment =
                    Some(value.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unknown configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use fccnano::core::lattice::error::LatticeError;
    use fccnano::core::lattice::unit_cell_lattice::DEFAULT_TOLERANCE;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn parse_build_args(extra: &[&str]) -> BuildArgs {
        let mut argv = vec!["fccnano", "build", "-o", "out.xyz"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Build(args) => args,
            Commands::Info(_) => unreachable!(),
        }
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn cli_only_configuration_uses_defaults() {
        let config = build_config(&parse_build_args(&["--iad", "2.5", "--size", "5"])).unwrap();
        assert_eq!(config.build.lattice.iad, 2.5);
        assert_eq!(config.build.lattice.orientation, Orientation::Fcc100);
        assert_eq!(config.build.lattice.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(
            config.build.shape,
            ShapeConfig::Cuboctahedron {
                edge_length: 5.0,
                center: Point::origin()
            }
        );
        assert_eq!(config.output.element, "Au");
        assert_eq!(config.output.path, PathBuf::from("out.xyz"));
        assert_eq!(config.output.comment, None);
    }

    #[test]
    fn file_values_are_used_when_cli_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            [lattice]
            iad = 2.77
            orientation = "111-y"
            tolerance = 1e-7

            [shape]
            type = "sphere"
            size = 6.0
            center = [1.0, 2.0, 3.0]

            [output]
            element = "Pt"
            comment = "test particle"
            "#,
        );
        let config = build_config(&parse_build_args(&["-c", path_arg(&path)])).unwrap();
        assert_eq!(config.build.lattice.iad, 2.77);
        assert_eq!(
            config.build.lattice.orientation,
            Orientation::Fcc111 {
                triangles_aligned_with_x: false
            }
        );
        assert_eq!(config.build.lattice.tolerance, 1e-7);
        assert_eq!(
            config.build.shape,
            ShapeConfig::Sphere {
                radius: 6.0,
                center: Point::new(1.0, 2.0, 3.0)
            }
        );
        assert_eq!(config.output.element, "Pt");
        assert_eq!(config.output.comment.as_deref(), Some("test particle"));
    }

    #[test]
    fn cli_arguments_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[lattice]\niad = 2.77\norientation = \"111\"\n[shape]\ntype = \"sphere\"\nsize = 6.0\n",
        );
        let config = build_config(&parse_build_args(&[
            "-c",
            path_arg(&path),
            "--iad",
            "3.0",
            "--orientation",
            "100",
            "--shape",
            "cube",
            "--center",
            "0,0,-1",
            "-e",
            "Cu",
        ]))
        .unwrap();
        assert_eq!(config.build.lattice.iad, 3.0);
        assert_eq!(config.build.lattice.orientation, Orientation::Fcc100);
        assert_eq!(
            config.build.shape,
            ShapeConfig::Cube {
                edge_length: 6.0,
                center: Point::new(0.0, 0.0, -1.0)
            }
        );
        assert_eq!(config.output.element, "Cu");
    }

    #[test]
    fn set_values_override_file_but_not_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[lattice]\niad = 2.0\n[shape]\nsize = 4.0\n");
        let config = build_config(&parse_build_args(&[
            "-c",
            path_arg(&path),
            "--size",
            "8",
            "-S",
            "lattice.iad=2.5",
            "shape.size=1.0",
            "shape.type=Sphere",
            "output.comment=from --set",
        ]))
        .unwrap();
        assert_eq!(config.build.lattice.iad, 2.5);
        assert_eq!(
            config.build.shape,
            ShapeConfig::Sphere {
                radius: 8.0,
                center: Point::origin()
            }
        );
        assert_eq!(config.output.comment.as_deref(), Some("from --set"));
    }

    #[test]
    fn missing_iad_or_size_is_a_config_error() {
        assert!(matches!(
            build_config(&parse_build_args(&["--size", "1"])),
            Err(CliError::Config(msg)) if msg.contains("iad")
        ));
        assert!(matches!(
            build_config(&parse_build_args(&["--iad", "1"])),
            Err(CliError::Config(msg)) if msg.contains("size")
        ));
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let base = ["--iad", "1", "--size", "1"];
        let with = |extra: &[&str]| {
            let mut argv = base.to_vec();
            argv.extend_from_slice(extra);
            build_config(&parse_build_args(&argv))
        };
        assert!(matches!(with(&["-S", "lattice.iad"]), Err(CliError::Parse(_))));
        assert!(matches!(with(&["-S", "solver.steps=3"]), Err(CliError::Config(_))));
        assert!(matches!(with(&["-S", "shape.size=huge"]), Err(CliError::Parse(_))));
        assert!(matches!(with(&["--center", "1,2"]), Err(CliError::Parse(_))));
        assert!(matches!(with(&["-e", "Au Cu"]), Err(CliError::Argument(_))));
    }

    #[test]
    fn unknown_orientation_is_rejected_from_file_and_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[lattice]\niad = 1.0\norientation = \"311\"\n");
        assert!(matches!(
            build_config(&parse_build_args(&["-c", path_arg(&path), "--size", "1"])),
            Err(CliError::FileParsing { .. })
        ));
        assert!(matches!(
            build_config(&parse_build_args(&[
                "--iad",
                "1",
                "--size",
                "1",
                "-S",
                "lattice.orientation=311"
            ])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn lattice_parameters_are_validated_when_the_lattice_is_built() {
        let config = build_config(&parse_build_args(&["--iad=-1", "--size", "1"])).unwrap();
        assert!(matches!(
            config.build.lattice.build(),
            Err(LatticeError::InvalidParameter { .. })
        ));
    }
}
