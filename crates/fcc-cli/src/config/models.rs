use fccnano::engine::config::BuildConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub path: PathBuf,
    pub element: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub build: BuildConfig,
    pub output: OutputSettings,
}
