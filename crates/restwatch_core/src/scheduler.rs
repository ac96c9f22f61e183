use crate::error::AppError;
use crate::settings::Settings;
use std::time::Instant;

/// Exactly one mode is active at a time; `stop` is legal from all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Running,
    Paused,
    OnBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Heads-up raised once per interval, ten seconds before the break.
    PreBreakNotice,
    /// The interval elapsed; the scheduler is now in `OnBreak` and the
    /// overlay owns the timeline until `finish_break`.
    BreakStarted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub display: String,
    pub event: Option<TickEvent>,
}

/// Work/pause/break state machine. All elapsed-time accounting runs off the
/// caller-supplied `now`, so the host drives it from any cadence and tests
/// drive it from a fabricated timeline. Paused spans are folded into
/// `interval_start` on resume and never count toward elapsed work time.
#[derive(Debug)]
pub struct BreakScheduler {
    settings: Settings,
    mode: Mode,
    interval_start: Option<Instant>,
    pause_started_at: Option<Instant>,
    notified: bool,
}

impl BreakScheduler {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mode: Mode::Idle,
            interval_start: None,
            pause_started_at: None,
            notified: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings without touching timing fields. Whether the
    /// change is persisted (preferences edit) or session-scoped (edit
    /// break) is the caller's decision.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn start(&mut self, now: Instant) -> Result<(), AppError> {
        if !self.settings.is_configured() {
            return Err(AppError::invalid_input(
                "break settings are not configured",
            ));
        }
        if self.mode != Mode::Idle {
            return Err(AppError::invalid_input("timer is already running"));
        }

        self.mode = Mode::Running;
        self.interval_start = Some(now);
        self.pause_started_at = None;
        self.notified = false;
        Ok(())
    }

    pub fn pause(&mut self, now: Instant) -> Result<(), AppError> {
        if self.mode != Mode::Running {
            return Err(AppError::invalid_input("timer is not running"));
        }

        self.mode = Mode::Paused;
        self.pause_started_at = Some(now);
        Ok(())
    }

    pub fn resume(&mut self, now: Instant) -> Result<(), AppError> {
        if self.mode != Mode::Paused {
            return Err(AppError::invalid_input("timer is not paused"));
        }

        let pause_started_at = self
            .pause_started_at
            .take()
            .ok_or_else(|| AppError::invalid_data("paused without a pause timestamp"))?;
        let paused_for = now.duration_since(pause_started_at);
        if let Some(interval_start) = self.interval_start {
            self.interval_start = Some(interval_start + paused_for);
        }
        self.mode = Mode::Running;
        Ok(())
    }

    /// Effective from any state, an active break included; timing fields
    /// are cleared and the next `start` begins a fresh interval.
    pub fn stop(&mut self) {
        self.mode = Mode::Idle;
        self.interval_start = None;
        self.pause_started_at = None;
        self.notified = false;
    }

    /// Overlay completion signal: the break is over, a new interval starts
    /// counting immediately.
    pub fn finish_break(&mut self, now: Instant) -> Result<(), AppError> {
        if self.mode != Mode::OnBreak {
            return Err(AppError::invalid_input("no break in progress"));
        }

        self.mode = Mode::Running;
        self.interval_start = Some(now);
        self.pause_started_at = None;
        self.notified = false;
        Ok(())
    }

    /// One evaluation step, nominally once per second. A no-op outside
    /// `Running`. The notice window is reconciled against a polling cadence
    /// coarser than 1s: it fires once while `10 <= remaining <= 11` and the
    /// guard only re-arms above 10.5, so a poll landing slightly off the
    /// 10s mark cannot fire twice in one interval.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.mode != Mode::Running {
            return TickOutcome {
                display: self.status(now),
                event: None,
            };
        }

        let remaining = self.remaining_seconds(now);
        if remaining <= 0.0 {
            self.mode = Mode::OnBreak;
            self.notified = false;
            return TickOutcome {
                display: self.status(now),
                event: Some(TickEvent::BreakStarted),
            };
        }

        let mut event = None;
        if (10.0..=11.0).contains(&remaining) && !self.notified {
            self.notified = true;
            event = Some(TickEvent::PreBreakNotice);
        } else if remaining > 10.5 {
            self.notified = false;
        }

        TickOutcome {
            display: self.status(now),
            event,
        }
    }

    /// The one status string a host must render, recomputed on every tick.
    pub fn status(&self, now: Instant) -> String {
        match self.mode {
            Mode::Idle => "Inactive".to_string(),
            Mode::OnBreak => "Break!".to_string(),
            Mode::Running => {
                let remaining = self.remaining_seconds(now).max(0.0) as u64;
                format!("Time until break: {}", format_remaining(remaining))
            }
            Mode::Paused => {
                // Remaining time is frozen at the instant the pause began.
                let frozen_at = self.pause_started_at.unwrap_or(now);
                let remaining = self.remaining_seconds(frozen_at).max(0.0) as u64;
                format!(
                    "Paused: {}m {}s left - {}",
                    remaining / 60,
                    remaining % 60,
                    self.settings.pause_message()
                )
            }
        }
    }

    fn remaining_seconds(&self, now: Instant) -> f64 {
        let elapsed = match self.interval_start {
            Some(interval_start) => now.duration_since(interval_start).as_secs_f64(),
            None => 0.0,
        };
        self.settings.break_interval as f64 - elapsed
    }
}

/// Human-readable countdown with correct singular/plural units; the zero
/// unit is omitted.
pub fn format_remaining(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    if minutes == 0 {
        unit(seconds, "second")
    } else if seconds == 0 {
        unit(minutes, "minute")
    } else {
        format!("{} {}", unit(minutes, "minute"), unit(seconds, "second"))
    }
}

fn unit(value: u64, name: &str) -> String {
    if value == 1 {
        format!("1 {name}")
    } else {
        format!("{value} {name}s")
    }
}

#[cfg(test)]
mod tests {
    use super::{BreakScheduler, Mode, TickEvent, format_remaining};
    use crate::settings::Settings;
    use std::time::{Duration, Instant};

    fn configured() -> Settings {
        Settings {
            break_interval: 60,
            break_duration: 20,
            custom_pause_message: "Rest!".to_string(),
        }
    }

    fn started(base: Instant) -> BreakScheduler {
        let mut scheduler = BreakScheduler::new(configured());
        scheduler.start(base).unwrap();
        scheduler
    }

    #[test]
    fn format_remaining_handles_singular_and_plural() {
        assert_eq!(format_remaining(61), "1 minute 1 second");
        assert_eq!(format_remaining(125), "2 minutes 5 seconds");
        assert_eq!(format_remaining(45), "45 seconds");
        assert_eq!(format_remaining(60), "1 minute");
        assert_eq!(format_remaining(121), "2 minutes 1 second");
        assert_eq!(format_remaining(1), "1 second");
        assert_eq!(format_remaining(0), "0 seconds");
    }

    #[test]
    fn start_requires_configured_settings() {
        let mut scheduler = BreakScheduler::new(Settings::default());
        let err = scheduler.start(Instant::now()).unwrap_err();

        assert_eq!(err.code(), "invalid_input");
        assert_eq!(scheduler.mode(), Mode::Idle);
    }

    #[test]
    fn start_rejects_double_start() {
        let base = Instant::now();
        let mut scheduler = started(base);

        let err = scheduler.start(base + Duration::from_secs(5)).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(scheduler.mode(), Mode::Running);
    }

    #[test]
    fn tick_counts_down_while_running() {
        let base = Instant::now();
        let mut scheduler = started(base);

        let outcome = scheduler.tick(base + Duration::from_secs(30));
        assert_eq!(outcome.display, "Time until break: 30 seconds");
        assert_eq!(outcome.event, None);
        assert_eq!(scheduler.mode(), Mode::Running);
    }

    #[test]
    fn tick_is_a_noop_outside_running() {
        let base = Instant::now();
        let mut scheduler = BreakScheduler::new(configured());

        let outcome = scheduler.tick(base);
        assert_eq!(outcome.display, "Inactive");
        assert_eq!(outcome.event, None);
        assert_eq!(scheduler.mode(), Mode::Idle);
    }

    #[test]
    fn paused_time_never_counts_toward_elapsed() {
        let base = Instant::now();
        let mut scheduler = started(base);

        scheduler.pause(base + Duration::from_secs(10)).unwrap();
        scheduler.resume(base + Duration::from_secs(110)).unwrap();

        // 10s of work before the pause, 5s after: 45s remain of 60.
        let outcome = scheduler.tick(base + Duration::from_secs(115));
        assert_eq!(outcome.display, "Time until break: 45 seconds");
        assert_eq!(outcome.event, None);
    }

    #[test]
    fn repeated_pause_resume_cycles_accumulate_correctly() {
        let base = Instant::now();
        let mut scheduler = started(base);

        scheduler.pause(base + Duration::from_secs(5)).unwrap();
        scheduler.resume(base + Duration::from_secs(35)).unwrap();
        scheduler.pause(base + Duration::from_secs(40)).unwrap();
        scheduler.resume(base + Duration::from_secs(100)).unwrap();

        // Work spans: 0-5 and 35-40, plus 10s after the second resume.
        let outcome = scheduler.tick(base + Duration::from_secs(110));
        assert_eq!(outcome.display, "Time until break: 40 seconds");
    }

    #[test]
    fn paused_status_freezes_remaining_and_shows_message() {
        let base = Instant::now();
        let mut scheduler = started(base);
        scheduler.pause(base + Duration::from_secs(15)).unwrap();

        let status = scheduler.status(base + Duration::from_secs(500));
        assert_eq!(status, "Paused: 0m 45s left - Rest!");
    }

    #[test]
    fn pause_rejected_unless_running() {
        let base = Instant::now();
        let mut scheduler = BreakScheduler::new(configured());
        assert!(scheduler.pause(base).is_err());

        scheduler.start(base).unwrap();
        scheduler.pause(base + Duration::from_secs(1)).unwrap();
        assert!(scheduler.pause(base + Duration::from_secs(2)).is_err());
    }

    #[test]
    fn resume_rejected_unless_paused() {
        let base = Instant::now();
        let mut scheduler = started(base);
        assert!(scheduler.resume(base + Duration::from_secs(1)).is_err());
    }

    #[test]
    fn notice_fires_once_within_window() {
        let base = Instant::now();
        let mut scheduler = started(base);

        // remaining 10.5, inside [10, 11].
        let first = scheduler.tick(base + Duration::from_millis(49_500));
        assert_eq!(first.event, Some(TickEvent::PreBreakNotice));

        // Still inside the window; must not re-fire.
        let second = scheduler.tick(base + Duration::from_millis(49_900));
        assert_eq!(second.event, None);

        // Below the window, before the break: still nothing.
        let third = scheduler.tick(base + Duration::from_secs(55));
        assert_eq!(third.event, None);
    }

    #[test]
    fn notice_guard_rearms_on_the_next_interval() {
        let base = Instant::now();
        let mut scheduler = started(base);

        let outcome = scheduler.tick(base + Duration::from_millis(49_500));
        assert_eq!(outcome.event, Some(TickEvent::PreBreakNotice));

        let outcome = scheduler.tick(base + Duration::from_secs(60));
        assert_eq!(outcome.event, Some(TickEvent::BreakStarted));
        scheduler.finish_break(base + Duration::from_secs(80)).unwrap();

        // Second interval: t = 80 + 49.5.
        let outcome = scheduler.tick(base + Duration::from_millis(129_500));
        assert_eq!(outcome.event, Some(TickEvent::PreBreakNotice));
    }

    #[test]
    fn interval_expiry_transitions_to_on_break_never_idle() {
        let base = Instant::now();
        let mut scheduler = started(base);

        let outcome = scheduler.tick(base + Duration::from_secs(61));
        assert_eq!(outcome.event, Some(TickEvent::BreakStarted));
        assert_eq!(outcome.display, "Break!");
        assert_eq!(scheduler.mode(), Mode::OnBreak);
    }

    #[test]
    fn finish_break_starts_a_fresh_interval() {
        let base = Instant::now();
        let mut scheduler = started(base);
        scheduler.tick(base + Duration::from_secs(60));
        assert_eq!(scheduler.mode(), Mode::OnBreak);

        scheduler.finish_break(base + Duration::from_secs(80)).unwrap();
        assert_eq!(scheduler.mode(), Mode::Running);

        let outcome = scheduler.tick(base + Duration::from_secs(90));
        assert_eq!(outcome.display, "Time until break: 50 seconds");
    }

    #[test]
    fn finish_break_rejected_outside_a_break() {
        let base = Instant::now();
        let mut scheduler = started(base);
        assert!(scheduler.finish_break(base + Duration::from_secs(1)).is_err());
    }

    #[test]
    fn stop_is_effective_from_any_state() {
        let base = Instant::now();

        let mut scheduler = started(base);
        scheduler.stop();
        assert_eq!(scheduler.mode(), Mode::Idle);

        let mut scheduler = started(base);
        scheduler.pause(base + Duration::from_secs(5)).unwrap();
        scheduler.stop();
        assert_eq!(scheduler.mode(), Mode::Idle);

        let mut scheduler = started(base);
        scheduler.tick(base + Duration::from_secs(60));
        assert_eq!(scheduler.mode(), Mode::OnBreak);
        scheduler.stop();
        assert_eq!(scheduler.mode(), Mode::Idle);
        assert_eq!(scheduler.status(base + Duration::from_secs(61)), "Inactive");
    }

    #[test]
    fn apply_settings_does_not_touch_timing() {
        let base = Instant::now();
        let mut scheduler = started(base);

        let mut edited = configured();
        edited.break_interval = 120;
        scheduler.apply_settings(edited);

        // Elapsed work time is unchanged; only the target moved.
        let outcome = scheduler.tick(base + Duration::from_secs(30));
        assert_eq!(outcome.display, "Time until break: 1 minute 30 seconds");
    }

    #[test]
    fn restart_after_stop_begins_a_fresh_interval() {
        let base = Instant::now();
        let mut scheduler = started(base);
        scheduler.tick(base + Duration::from_secs(30));
        scheduler.stop();

        scheduler.start(base + Duration::from_secs(100)).unwrap();
        let outcome = scheduler.tick(base + Duration::from_secs(100));
        assert_eq!(outcome.display, "Time until break: 1 minute");
    }

    // The end-to-end timing scenario: interval 60s, duration 20s.
    #[test]
    fn full_interval_scenario() {
        let base = Instant::now();
        let mut scheduler = started(base);

        let at_49 = scheduler.tick(base + Duration::from_secs(49));
        assert_eq!(at_49.event, Some(TickEvent::PreBreakNotice));

        let at_50 = scheduler.tick(base + Duration::from_secs(50));
        assert_eq!(at_50.event, None);

        let at_60 = scheduler.tick(base + Duration::from_secs(60));
        assert_eq!(at_60.event, Some(TickEvent::BreakStarted));
        assert_eq!(scheduler.mode(), Mode::OnBreak);

        // Overlay runs for 20s; control returns at t=80.
        scheduler.finish_break(base + Duration::from_secs(80)).unwrap();
        assert_eq!(scheduler.mode(), Mode::Running);

        let at_81 = scheduler.tick(base + Duration::from_secs(81));
        assert_eq!(at_81.display, "Time until break: 59 seconds");
        assert_eq!(at_81.event, None);
    }
}
