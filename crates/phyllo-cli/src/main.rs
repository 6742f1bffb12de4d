//! phyllotaxis - generate and animate sunflower-style spiral patterns
//!
//! Usage:
//!   phyllotaxis                      Play the reveal in the terminal
//!   phyllotaxis render -o out.svg    Write the finished pattern
//!   phyllotaxis frames -o frames/    Write a PNG frame sequence
//!   phyllotaxis points               Dump the reveal schedule as JSON
//!   phyllotaxis config --example     Print an example config

mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cli::{
    cmd_config, cmd_frames, cmd_play, cmd_points, cmd_render, print_example,
    CliError, FramesArgs, ParamArgs, PlayArgs, PointsArgs, RenderArgs,
};

/// Phyllotaxis: objects on a golden-angle spiral, revealed one at a time
#[derive(Parser)]
#[command(name = "phyllotaxis", version, about)]
struct Cli {
    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Animate the reveal in the terminal (default)
    Play(PlayArgs),
    /// Write the finished pattern as SVG (and optionally PNG)
    Render(RenderArgs),
    /// Write the reveal as a PNG frame sequence
    Frames(FramesArgs),
    /// Dump the reveal schedule as JSON
    Points(PointsArgs),
    /// Print the effective parameters as YAML
    Config {
        /// Print a commented example config instead
        #[arg(long)]
        example: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play(PlayArgs::default()));

    // Log lines would tear the playback screen, so it stays quiet unless asked.
    let default_level = if matches!(command, Command::Play(_)) { "off" } else { "info" };
    cli::logging::init(default_level);

    match run(command, &cli.params) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, param_args: &ParamArgs) -> Result<(), CliError> {
    if let Command::Config { example: true } = command {
        print_example();
        return Ok(());
    }

    let params = param_args.resolve()?;

    match command {
        Command::Play(args) => cmd_play(&params, &args),
        Command::Render(args) => cmd_render(&params, &args),
        Command::Frames(args) => cmd_frames(&params, &args).map(|_| ()),
        Command::Points(args) => cmd_points(&params, &args),
        Command::Config { .. } => cmd_config(&params),
    }
}
