//! Error type for CLI commands.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use phyllo::PhylloError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Phyllo(#[from] PhylloError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
