//! YAML configuration files.
//!
//! A config file holds any subset of the pattern parameters; missing keys
//! keep their defaults and unknown keys are an error.

use std::fs;
use std::path::Path;

use tracing::info;

use phyllo::Params;

use super::error::CliError;

/// Load params from a YAML file. The result is not validated yet; flags may
/// still override it.
pub fn load_config(path: &Path) -> Result<Params, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let params = parse_config(&content).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded config: {}", path.display());
    Ok(params)
}

/// Parse params from YAML text. An empty document gives the defaults.
pub fn parse_config(content: &str) -> Result<Params, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Params::default());
    }
    serde_yaml::from_str(content)
}

/// Execute the config command.
pub fn cmd_config(params: &Params) -> Result<(), CliError> {
    print!("{}", serde_yaml::to_string(params)?);
    Ok(())
}

/// Print a commented example config.
pub fn print_example() {
    print!("{}", EXAMPLE_CONFIG);
}

pub const EXAMPLE_CONFIG: &str = r##"# Example phyllotaxis config
#
# Every key is optional; omitted keys keep their defaults.
# Try divergence 137.3, 137.5, or 137.6 for sunflower heads,
# and 30 or 45 for straight spiral arms.

count: 10000        # number of objects
divergence: 137.5   # degrees between consecutive objects
scale: 15           # C in radius = C * sqrt(n)
size: 6             # radius of each object
width: 800          # canvas width
height: 800         # canvas height
interval: 0.0041667 # seconds between reveals (1/240)
colors: hue         # hue | green
"##;
