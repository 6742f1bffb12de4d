//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use phyllo::{ColorScheme, Params, GOLDEN_ANGLE_DEGREES};

use super::config::load_config;
use super::error::CliError;

/// Pattern parameters accepted by every command.
///
/// Precedence: built-in defaults, then the `--config` file, then flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// YAML file with pattern parameters
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of objects
    #[arg(short = 'n', long, global = true)]
    pub count: Option<usize>,

    /// Divergence angle in degrees (try 137.3, 137.6, 30, 45)
    #[arg(short = 'a', long = "angle", global = true, allow_negative_numbers = true)]
    pub divergence: Option<f64>,

    /// Use the exact golden angle (137.5078°) as divergence
    #[arg(long, global = true, conflicts_with = "divergence")]
    pub golden: bool,

    /// Scaling factor C in radius = C * sqrt(n)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Radius of each object
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub size: Option<f64>,

    /// Canvas width
    #[arg(long, global = true)]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(long, global = true)]
    pub height: Option<f64>,

    /// Seconds between reveals (default: 1/240)
    #[arg(long, global = true, value_name = "SECONDS", allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// Color scheme: hue, green
    #[arg(long, global = true, value_parser = parse_scheme)]
    pub colors: Option<ColorScheme>,
}

fn parse_scheme(name: &str) -> Result<ColorScheme, String> {
    ColorScheme::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = ColorScheme::all().iter().map(|s| s.name()).collect();
        format!("unknown color scheme '{}', use one of: {}", name, known.join(", "))
    })
}

impl ParamArgs {
    /// Merge defaults, config file, and flags into validated params.
    pub fn resolve(&self) -> Result<Params, CliError> {
        let mut params = match &self.config {
            Some(path) => load_config(path)?,
            None => Params::default(),
        };

        if let Some(count) = self.count {
            params.count = count;
        }
        if let Some(divergence) = self.divergence {
            params.divergence = divergence;
        }
        if self.golden {
            params.divergence = GOLDEN_ANGLE_DEGREES;
        }
        if let Some(scale) = self.scale {
            params.scale = scale;
        }
        if let Some(size) = self.size {
            params.size = size;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(interval) = self.interval {
            params.interval = interval;
        }
        if let Some(colors) = self.colors {
            params.colors = colors;
        }

        params.validate()?;
        debug!(?params, "resolved parameters");
        Ok(params)
    }
}

/// Write command output to a file, or stdout for `-`.
pub fn write_output(output: &Path, content: &str) -> Result<(), CliError> {
    if output == Path::new("-") {
        return write_stream(io::stdout().lock(), output, content);
    }

    fs::write(output, content).map_err(|source| CliError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!("Wrote: {}", output.display());
    Ok(())
}

/// Write to an open stream, reporting failures against `path`.
fn write_stream(mut out: impl Write, path: &Path, content: &str) -> Result<(), CliError> {
    out.write_all(content.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })
}
