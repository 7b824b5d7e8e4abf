//! Layered configuration for the `build` command.
//!
//! Values are resolved field by field: an explicit CLI argument wins over a `--set`
//! override, which wins over the TOML file, which wins over [`defaults::DefaultsConfig`].

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::{AppConfig, OutputSettings};
