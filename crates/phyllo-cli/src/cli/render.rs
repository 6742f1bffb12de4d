//! Render command implementation.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use phyllo::{points, render_svg, Params};

use super::common::write_output;
use super::error::CliError;
use super::raster::svg_to_png;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Output SVG file (- for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Also rasterize to a PNG file
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// PNG scale factor
    #[arg(long, default_value_t = 1.0)]
    pub png_scale: f32,
}

/// Execute the render command.
pub fn cmd_render(params: &Params, args: &RenderArgs) -> Result<(), CliError> {
    let start = Instant::now();
    let svg = render_svg(points(params), params)?;
    info!("Generated {} objects in {:?}", params.count, start.elapsed());

    write_output(&args.output, &svg)?;

    if let Some(png_path) = &args.png {
        if !(args.png_scale.is_finite() && args.png_scale > 0.0) {
            return Err(CliError::Render(format!("PNG scale must be > 0, got {}", args.png_scale)));
        }
        let (width, height) = svg_to_png(&svg, png_path, params, args.png_scale)?;
        info!("Wrote: {} ({}x{})", png_path.display(), width, height);
    }

    Ok(())
}
