//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `play` - Animate the reveal in the terminal (default)
//! - `render` - Write the finished pattern as SVG, optionally PNG
//! - `frames` - Write a PNG frame sequence of the reveal
//! - `points` - Dump the reveal schedule as JSON
//! - `config` - Print the effective or an example YAML config

pub mod common;
pub mod config;
pub mod error;
pub mod frames;
pub mod logging;
pub mod play;
pub mod points;
pub mod raster;
pub mod render;

pub use common::ParamArgs;
pub use config::{cmd_config, print_example};
pub use error::CliError;
pub use frames::{cmd_frames, FramesArgs};
pub use play::{cmd_play, PlayArgs};
pub use points::{cmd_points, PointsArgs};
pub use render::{cmd_render, RenderArgs};
