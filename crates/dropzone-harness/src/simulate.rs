//! Scripted drag replay.
//!
//! A scenario grabs the element in one zone, moves it by `drag` over
//! `drag_steps` pan events, releases it with `velocity`, then ticks fixed
//! frames until both axes rest or `max_frames` runs out.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use clap::Args;
use dropzone_core::{
    ControllerState, DragController, DropZone, HandlerEvent, HandlerState, MotionConfig,
    MotionMode,
};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::layout::{self, DEFAULT_SCREEN_WIDTH};

/// An `x,y` pair on the command line, e.g. `-90,240`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl FromStr for Vector2 {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("{part:?} is not a number: {e}"))
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// JSON zone file; the built-in four-zone grid when omitted.
    #[arg(long)]
    pub zones: Option<PathBuf>,

    /// Motion config file (.toml or .json).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Screen width for the built-in grid.
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    pub width: f64,

    /// Index of the zone the element starts in.
    #[arg(long, default_value_t = 0)]
    pub from_zone: usize,

    /// Total pan translation before release.
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    pub drag: Vector2,

    /// Pan velocity at release, in units per second.
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    pub velocity: Vector2,

    /// Number of pan events spent reaching `--drag`.
    #[arg(long, default_value_t = 8)]
    pub drag_steps: u32,

    /// Coast on momentum instead of springing into a zone.
    #[arg(long)]
    pub decay: bool,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Give up after this many frames.
    #[arg(long, default_value_t = 600)]
    pub max_frames: usize,

    /// Emit JSON lines instead of text.
    #[arg(long)]
    pub json: bool,
}

/// A fully resolved run: no files or flags left to interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub from_zone: usize,
    pub drag: Vector2,
    pub velocity: Vector2,
    pub drag_steps: u32,
    pub frame: Duration,
    pub max_frames: usize,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            from_zone: 0,
            drag: Vector2::default(),
            velocity: Vector2::default(),
            drag_steps: 8,
            frame: Duration::from_millis(16),
            max_frames: 600,
        }
    }
}

/// Position after one settling frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub t_ms: f64,
    pub x: f64,
    pub y: f64,
    pub state: &'static str,
}

/// Where the element ended up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub frames: usize,
    pub elapsed_ms: f64,
    pub x: f64,
    pub y: f64,
    pub zone: Option<u32>,
    pub settled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub frames: Vec<FrameRecord>,
    pub summary: Summary,
}

fn state_name(state: ControllerState) -> &'static str {
    match state {
        ControllerState::Dragging => "dragging",
        ControllerState::Settling => "settling",
        ControllerState::Resting => "resting",
    }
}

/// Replay `scenario` over `zones` and record every settling frame.
pub fn simulate(
    zones: Vec<DropZone>,
    config: MotionConfig,
    scenario: &Scenario,
) -> Result<Trace> {
    if scenario.frame.is_zero() {
        return Err(HarnessError::invalid("frame interval must be positive"));
    }
    let mut drag = DragController::new(zones, scenario.from_zone, config)?;
    let Vector2 { x: vx, y: vy } = scenario.velocity;

    drag.handle(&HandlerEvent::new(HandlerState::Began, (0.0, 0.0), (0.0, 0.0)));
    let steps = scenario.drag_steps.max(1);
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let translation = (scenario.drag.x * t, scenario.drag.y * t);
        drag.handle(&HandlerEvent::new(HandlerState::Active, translation, (vx, vy)));
    }
    let released = drag.handle(&HandlerEvent::new(
        HandlerState::End,
        (scenario.drag.x, scenario.drag.y),
        (vx, vy),
    ));
    tracing::debug!(x = released.x, y = released.y, "released");

    let frame_ms = scenario.frame.as_secs_f64() * 1000.0;
    let mut frames = Vec::new();
    while drag.is_animating() && frames.len() < scenario.max_frames {
        let here = drag.on_frame(scenario.frame);
        let frame = frames.len() + 1;
        frames.push(FrameRecord {
            frame,
            t_ms: frame as f64 * frame_ms,
            x: here.x,
            y: here.y,
            state: state_name(drag.state()),
        });
    }

    let rest = drag.position();
    let summary = Summary {
        frames: frames.len(),
        elapsed_ms: frames.len() as f64 * frame_ms,
        x: rest.x,
        y: rest.y,
        zone: drag.zone_at_rest().map(|z| z.id),
        settled: !drag.is_animating(),
    };
    Ok(Trace { frames, summary })
}

/// Print `trace` as aligned text or JSON lines.
pub fn write_trace(trace: &Trace, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        for record in &trace.frames {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        }
        writeln!(out, "{}", serde_json::json!({ "summary": trace.summary }))?;
        return Ok(());
    }

    for r in &trace.frames {
        writeln!(
            out,
            "{:>5} {:>9.1}ms  x={:>10.3}  y={:>10.3}  {}",
            r.frame, r.t_ms, r.x, r.y, r.state
        )?;
    }
    let s = &trace.summary;
    match (s.settled, s.zone) {
        (true, Some(zone)) => writeln!(
            out,
            "landed in zone {zone} at ({:.3}, {:.3}) after {} frames ({:.1}ms)",
            s.x, s.y, s.frames, s.elapsed_ms
        )?,
        (true, None) => writeln!(
            out,
            "came to rest at ({:.3}, {:.3}) outside any zone after {} frames ({:.1}ms)",
            s.x, s.y, s.frames, s.elapsed_ms
        )?,
        (false, _) => writeln!(
            out,
            "still moving at ({:.3}, {:.3}) after {} frames",
            s.x, s.y, s.frames
        )?,
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MotionConfig> {
    let Some(path) = path else {
        return Ok(MotionConfig::default());
    };
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        MotionConfig::from_json_file(path)?
    } else {
        MotionConfig::from_toml_file(path)?
    };
    Ok(config)
}

pub fn run_simulate(args: SimulateArgs) -> Result<()> {
    let zones = layout::resolve(args.zones.as_deref(), args.width)?;
    let mut config = load_config(args.config.as_deref())?;
    if args.decay {
        config.mode = MotionMode::Decay;
    }
    let scenario = Scenario {
        from_zone: args.from_zone,
        drag: args.drag,
        velocity: args.velocity,
        drag_steps: args.drag_steps,
        frame: Duration::from_millis(args.frame_ms),
        max_frames: args.max_frames,
    };

    let trace = simulate(zones, config, &scenario)?;
    let stdout = std::io::stdout();
    write_trace(&trace, args.json, &mut stdout.lock())?;

    if trace.summary.settled {
        Ok(())
    } else {
        Err(HarnessError::Unsettled {
            frames: trace.summary.frames,
        })
    }
}
