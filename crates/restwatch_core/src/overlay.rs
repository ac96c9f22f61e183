use crate::error::AppError;
use crate::scheduler::format_remaining;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Wall-clock source for the overlay loop. Production uses `SystemClock`;
/// tests substitute a fabricated timeline that advances on `sleep`.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame<'a> {
    pub countdown: String,
    /// Fraction of the break already behind us, in [0, 1], non-decreasing.
    pub progress: f64,
    pub exercise: &'a str,
}

pub trait OverlaySurface {
    fn draw(&mut self, frame: &OverlayFrame<'_>) -> Result<(), AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// The full duration elapsed. Reported exactly once per break.
    Completed,
    /// The abort flag was raised (stop command, Ctrl-C) mid-break.
    Aborted,
}

/// Blocks until `duration` has elapsed on `clock`, drawing one frame per
/// `frame_interval`. Progress and countdown are recomputed from the
/// absolute start instant every frame, so dropped or slow frames shift
/// nothing: the break ends at `start + duration` no matter how many frames
/// were actually drawn. A failing surface degrades the presentation only;
/// the break is a time obligation and still runs to schedule.
pub fn run_overlay(
    surface: &mut dyn OverlaySurface,
    clock: &dyn Clock,
    duration: Duration,
    exercise: &str,
    frame_interval: Duration,
    abort: &AtomicBool,
) -> OverlayOutcome {
    let start = clock.now();

    loop {
        if abort.load(Ordering::SeqCst) {
            return OverlayOutcome::Aborted;
        }

        let elapsed = clock.now().duration_since(start);
        if elapsed >= duration {
            return OverlayOutcome::Completed;
        }

        let remaining = duration - elapsed;
        let frame = OverlayFrame {
            countdown: format_remaining(remaining.as_secs()),
            progress: elapsed.as_secs_f64() / duration.as_secs_f64(),
            exercise,
        };
        let _ = surface.draw(&frame);

        clock.sleep(frame_interval);
    }
}
