//! Points command: dump the reveal schedule as JSON.
//!
//! This is the hand-off format for other front ends: every object with its
//! reveal time, position, and fill color, in reveal order.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use phyllo::{Params, Reveal, RevealSchedule};

use super::common::write_output;
use super::error::CliError;

#[derive(Args, Debug, Clone)]
pub struct PointsArgs {
    /// Output JSON file (- for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Indent the JSON
    #[arg(long)]
    pub pretty: bool,
}

/// One reveal in JSON output format.
#[derive(Serialize)]
struct JsonReveal {
    index: usize,
    at_ms: f64,
    angle: f64,
    radius: f64,
    x: f64,
    y: f64,
    size: f64,
    hue: f64,
    color: String,
}

/// Complete JSON document.
#[derive(Serialize)]
struct JsonSchedule<'a> {
    title: String,
    params: &'a Params,
    duration_ms: f64,
    points: Vec<JsonReveal>,
}

fn to_json(reveal: &Reveal, params: &Params) -> JsonReveal {
    let p = &reveal.point;
    JsonReveal {
        index: p.index,
        at_ms: reveal.at.as_secs_f64() * 1000.0,
        angle: p.angle,
        radius: p.radius,
        x: p.x,
        y: p.y,
        size: p.size,
        hue: p.hue,
        color: params.colors.color(p).to_hex(),
    }
}

/// Execute the points command.
pub fn cmd_points(params: &Params, args: &PointsArgs) -> Result<(), CliError> {
    let schedule = RevealSchedule::from_params(params)?;

    let document = JsonSchedule {
        title: params.title(),
        params,
        duration_ms: schedule.total_duration().as_secs_f64() * 1000.0,
        points: schedule.iter().map(|r| to_json(r, params)).collect(),
    };

    let mut json = if args.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    json.push('\n');

    info!("Scheduled {} objects over {:?}", schedule.len(), schedule.total_duration());
    write_output(&args.output, &json)
}
