//! Frame sequence export.
//!
//! Writes one PNG per frame so the reveal can be assembled into a video,
//! e.g. `ffmpeg -framerate 30 -i frames/frame_%05d.png out.mp4`.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use tracing::{debug, info, warn};

use phyllo::{Params, RevealSchedule};

use super::error::CliError;
use super::raster::Canvas;

#[derive(Args, Debug, Clone)]
pub struct FramesArgs {
    /// Directory to write frame_NNNNN.png files into
    #[arg(short, long, default_value = "frames")]
    pub output: PathBuf,

    /// Frames per second of playback time
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,

    /// Pixels per canvas unit
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f32,
}

/// Zero padding wide enough for every frame of a `frames`-long sequence,
/// never less than 5 digits.
pub fn frame_digits(frames: usize) -> usize {
    frames.saturating_sub(1).to_string().len().max(5)
}

/// File name of frame `frame`, padded to `digits`.
pub fn frame_name(frame: usize, digits: usize) -> String {
    format!("frame_{:0digits$}.png", frame, digits = digits)
}

/// Execute the frames command.
pub fn cmd_frames(params: &Params, args: &FramesArgs) -> Result<usize, CliError> {
    if !(args.zoom.is_finite() && args.zoom > 0.0) {
        return Err(CliError::Render(format!("zoom must be > 0, got {}", args.zoom)));
    }

    let schedule = RevealSchedule::from_params(params)?;
    let frames = schedule.frame_count(args.fps);
    if frames == 0 {
        warn!("Nothing to reveal (count is 0), no frames written");
        return Ok(0);
    }

    fs::create_dir_all(&args.output).map_err(|source| CliError::Write {
        path: args.output.clone(),
        source,
    })?;

    info!(
        "Writing {} frames at {} fps ({:.2}s of playback) to {}",
        frames,
        args.fps,
        schedule.total_duration().as_secs_f64(),
        args.output.display()
    );

    let start = Instant::now();
    let mut canvas = Canvas::new(params, args.zoom)?;
    let mut shown_until: Option<Duration> = None;
    let progress_step = (frames / 10).max(1);
    let digits = frame_digits(frames);

    for frame in 0..frames {
        let t = RevealSchedule::frame_time(frame, args.fps);
        let fresh = match shown_until {
            None => schedule.visible_at(t),
            Some(prev) => schedule.revealed_between(prev, t),
        };
        canvas.draw_reveals(fresh);
        shown_until = Some(t);

        let path = args.output.join(frame_name(frame, digits));
        canvas.save_png(&path)?;
        debug!(frame, drawn = fresh.len(), "wrote {}", path.display());

        if (frame + 1) % progress_step == 0 {
            info!("  {:>3}% ({}/{})", (frame + 1) * 100 / frames, frame + 1, frames);
        }
    }

    info!("Wrote {} frames in {:?}", frames, start.elapsed());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_names_sort_lexically() {
        assert_eq!(frame_name(0, 5), "frame_00000.png");
        assert_eq!(frame_name(1234, 5), "frame_01234.png");
        assert!(frame_name(9, 5) < frame_name(10, 5));
    }

    #[test]
    fn padding_grows_past_five_digits() {
        assert_eq!(frame_digits(0), 5);
        assert_eq!(frame_digits(100_000), 5);
        assert_eq!(frame_digits(100_001), 6);

        // 10 000 points at 1s each, 30 fps
        let frames = RevealSchedule::from_params(&Params { interval: 1.0, ..Params::default() })
            .unwrap()
            .frame_count(30);
        let digits = frame_digits(frames);
        assert_eq!(digits, 6);
        assert!(frame_name(99_999, digits) < frame_name(100_000, digits));
        assert_eq!(frame_name(frames - 1, digits).len(), frame_name(0, digits).len());
    }

    #[test]
    fn writes_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let params = Params {
            count: 10,
            interval: 0.1,
            width: 64.0,
            height: 64.0,
            scale: 2.0,
            size: 2.0,
            ..Params::default()
        };
        let args = FramesArgs { output: dir.path().join("out"), fps: 10, zoom: 1.0 };

        // last reveal at 0.9s -> frames at 0.0..=0.9
        let frames = cmd_frames(&params, &args).unwrap();
        assert_eq!(frames, 10);
        for frame in 0..frames {
            assert!(args.output.join(frame_name(frame, 5)).exists());
        }
        assert!(!args.output.join(frame_name(frames, 5)).exists());
    }

    #[test]
    fn empty_pattern_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let params = Params { count: 0, ..Params::default() };
        let args = FramesArgs { output: dir.path().join("none"), fps: 30, zoom: 1.0 };
        assert_eq!(cmd_frames(&params, &args).unwrap(), 0);
        assert!(!args.output.exists());
    }
}
