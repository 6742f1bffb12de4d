//! Terminal playback.
//!
//! Points are drawn onto a tiny-skia canvas as the schedule reveals them,
//! and the canvas is shown in the terminal with ratatui-image. Only the
//! newly revealed points are drawn each tick.

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use clap::Args;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use ratatui_image::{picker::{Picker, ProtocolType}, protocol::StatefulProtocol, StatefulImage};
use tracing::{debug, info};

use phyllo::{Params, RevealSchedule};

use super::error::CliError;
use super::raster::Canvas;

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 64.0;

/// Input poll timeout, which also paces the animation loop.
const TICK: Duration = Duration::from_millis(33);

/// Minimum gap between terminal image uploads while points are still appearing.
const IMAGE_REFRESH: Duration = Duration::from_millis(100);

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Start paused
    #[arg(long)]
    pub paused: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self { speed: 1.0, paused: false }
    }
}

/// Playback clock with pause and speed control.
///
/// Elapsed playback time only advances while running, scaled by `speed`.
#[derive(Debug, Clone)]
pub struct Clock {
    base: Duration,
    resumed_at: Option<Instant>,
    speed: f64,
}

impl Clock {
    pub fn new(speed: f64, now: Instant) -> Self {
        Self {
            base: Duration::ZERO,
            resumed_at: Some(now),
            speed: clamp_speed(speed),
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.resumed_at {
            Some(t) => self.base + now.saturating_duration_since(t).mul_f64(self.speed),
            None => self.base,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.resumed_at.is_none()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pause(&mut self, now: Instant) {
        if self.resumed_at.is_some() {
            self.base = self.elapsed(now);
            self.resumed_at = None;
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(now);
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_paused() {
            self.resume(now);
        } else {
            self.pause(now);
        }
    }

    /// Change speed without jumping: time played so far is kept.
    pub fn set_speed(&mut self, speed: f64, now: Instant) {
        self.base = self.elapsed(now);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(now);
        }
        self.speed = clamp_speed(speed);
    }

    /// Back to zero, keeping the paused/running state.
    pub fn restart(&mut self, now: Instant) {
        self.base = Duration::ZERO;
        if self.resumed_at.is_some() {
            self.resumed_at = Some(now);
        }
    }
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        1.0
    }
}

/// Application state for playback.
struct App {
    params: Params,
    schedule: RevealSchedule,
    canvas: Canvas,
    /// Number of schedule entries already on the canvas
    drawn: usize,
    clock: Clock,
    /// Image picker for terminal protocol detection
    picker: Picker,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    needs_image_update: bool,
    last_image_update: Option<Instant>,
    should_quit: bool,
}

impl App {
    fn new(params: &Params, args: &PlayArgs) -> Result<Self, CliError> {
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;
        Self::with_picker(params, args, picker, Instant::now())
    }

    fn with_picker(
        params: &Params,
        args: &PlayArgs,
        picker: Picker,
        now: Instant,
    ) -> Result<Self, CliError> {
        let schedule = RevealSchedule::from_params(params)?;
        let canvas = Canvas::new(params, 1.0)?;

        let mut clock = Clock::new(args.speed, now);
        if args.paused {
            clock.pause(now);
        }

        info!("Playing {} objects over {:?}", schedule.len(), schedule.total_duration());

        Ok(App {
            params: params.clone(),
            schedule,
            canvas,
            drawn: 0,
            clock,
            picker,
            image_state: None,
            needs_image_update: true,
            last_image_update: None,
            should_quit: false,
        })
    }

    fn is_finished(&self) -> bool {
        self.drawn == self.schedule.len()
    }

    /// Draw everything revealed since the last tick.
    fn advance(&mut self, now: Instant) {
        let target = self.schedule.visible_count(self.clock.elapsed(now));
        if target > self.drawn {
            self.canvas.draw_reveals(&self.schedule.as_slice()[self.drawn..target]);
            self.drawn = target;
            self.needs_image_update = true;
        }
    }

    fn update_image(&mut self, now: Instant) -> Result<(), CliError> {
        if !self.needs_image_update {
            return Ok(());
        }
        let due = self
            .last_image_update
            .is_none_or(|t| now.duration_since(t) >= IMAGE_REFRESH);
        if !due && !self.is_finished() {
            return Ok(());
        }

        let img = self.canvas.to_image()?;
        self.image_state = Some(self.picker.new_resize_protocol(img));
        self.needs_image_update = false;
        self.last_image_update = Some(now);
        Ok(())
    }

    fn restart(&mut self, now: Instant) {
        self.clock.restart(now);
        self.canvas.clear();
        self.drawn = 0;
        self.needs_image_update = true;
    }

    fn cycle_colors(&mut self) {
        let scheme = self.canvas.scheme().next();
        debug!("color scheme -> {}", scheme.name());
        self.canvas.set_scheme(scheme);
        self.canvas.clear();
        self.canvas.draw_reveals(&self.schedule.as_slice()[..self.drawn]);
        self.needs_image_update = true;
    }

    fn change_speed(&mut self, factor: f64, now: Instant) {
        let speed = self.clock.speed() * factor;
        self.clock.set_speed(speed, now);
    }
}

/// Execute the play command.
pub fn cmd_play(params: &Params, args: &PlayArgs) -> Result<(), CliError> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(CliError::from)
        .and_then(|mut terminal| {
            let mut app = App::new(params, args)?;
            run_app(&mut terminal, &mut app)
        });

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), CliError> {
    loop {
        let now = Instant::now();
        app.advance(now);
        app.update_image(now)?;

        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let now = Instant::now();
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char(' ') => app.clock.toggle(now),
                        KeyCode::Char('r') => app.restart(now),
                        KeyCode::Char('c') => app.cycle_colors(),
                        KeyCode::Char('+') | KeyCode::Char('=') => app.change_speed(2.0, now),
                        KeyCode::Char('-') | KeyCode::Char('_') => app.change_speed(0.5, now),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(frame.area());

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(layout[0]);

    let now = Instant::now();
    let elapsed = app.clock.elapsed(now).min(app.schedule.total_duration());
    let stats_text = format!(
        "Objects: {}\nShown: {}\nTime: {:.1}s / {:.1}s\nSpeed: {}x\nColors: {}\nAngle: {}°\nScale: {}\nSize: {}",
        app.schedule.len(),
        app.drawn,
        elapsed.as_secs_f64(),
        app.schedule.total_duration().as_secs_f64(),
        app.clock.speed(),
        app.canvas.scheme().name(),
        app.params.divergence,
        app.params.scale,
        app.params.size,
    );
    let stats = Paragraph::new(stats_text)
        .block(Block::default()
            .title(" Stats ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White));
    frame.render_widget(stats, sidebar[0]);

    let help = Paragraph::new("space pause\nr     restart\n+/-   speed\nc     colors\nq     quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title(" Keys ").borders(Borders::ALL));
    frame.render_widget(help, sidebar[1]);

    let (status, border_color) = if app.clock.is_paused() {
        (" [paused]", Color::DarkGray)
    } else if app.is_finished() {
        ("", Color::Green)
    } else {
        ("", Color::Yellow)
    };

    let image_block = Block::default()
        .title(format!(" {}{} ", app.params.title(), status))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = image_block.inner(layout[1]);
    frame.render_widget(image_block, layout[1]);

    if let Some(ref mut image_state) = app.image_state {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }
}
