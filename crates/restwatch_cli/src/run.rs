use crate::prompt::{ChannelLines, LinePrompter, StdinLines};
use crate::screen::{TerminalSurface, bell};
use restwatch_core::error::AppError;
use restwatch_core::exercises::ExercisePool;
use restwatch_core::notify::notifier_from_env;
use restwatch_core::overlay::{
    DEFAULT_FRAME_INTERVAL, OverlayOutcome, SystemClock, run_overlay,
};
use restwatch_core::scheduler::{BreakScheduler, TickEvent};
use restwatch_core::settings::{self, Settings};
use restwatch_core::storage::json_store;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

enum LoopCommand {
    Pause,
    Resume,
    Edit,
    Stop,
    Help,
    Unknown(String),
    Empty,
}

fn parse_loop_command(line: &str) -> LoopCommand {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => LoopCommand::Empty,
        "pause" => LoopCommand::Pause,
        "resume" => LoopCommand::Resume,
        "edit" => LoopCommand::Edit,
        "stop" | "quit" | "exit" => LoopCommand::Stop,
        "help" | "?" => LoopCommand::Help,
        other => LoopCommand::Unknown(other.to_string()),
    }
}

/// Reader thread: forwards stdin lines to the loop. A stop command raises
/// the abort flag directly so it takes effect mid-break, while the overlay
/// owns the main thread; the flag is left alone while a prompt is
/// collecting answers.
fn spawn_stdin_reader(
    sender: mpsc::Sender<String>,
    abort: Arc<AtomicBool>,
    prompting: Arc<AtomicBool>,
) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut lock = stdin.lock();
        loop {
            let mut line = String::new();
            match lock.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if !prompting.load(Ordering::SeqCst)
                        && matches!(parse_loop_command(&line), LoopCommand::Stop)
                    {
                        abort.store(true, Ordering::SeqCst);
                    }
                    if sender.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

fn ensure_configured(path: &std::path::Path) -> Result<Settings, AppError> {
    let load = json_store::load_settings_with_fallback(path);
    if let Some(err) = load.error {
        eprintln!("ERROR: {err}");
        println!("Saved settings could not be read; starting fresh.");
    }

    if load.settings.is_configured() {
        return Ok(load.settings);
    }

    let mut prompter = LinePrompter::new(StdinLines);
    let configured = settings::configure(&mut prompter)?;
    json_store::save_settings(path, &configured)?;
    Ok(configured)
}

fn print_status(display: &str) {
    print!("\r\x1b[2K{display}");
    io::stdout().flush().ok();
}

fn run_break(
    scheduler: &mut BreakScheduler,
    pool: &ExercisePool,
    abort: &AtomicBool,
) -> Result<bool, AppError> {
    let exercise = pool.pick_random().to_string();
    let duration = Duration::from_secs(scheduler.settings().break_duration);

    let mut surface = TerminalSurface::new(io::stdout());
    let outcome = run_overlay(
        &mut surface,
        &SystemClock,
        duration,
        &exercise,
        DEFAULT_FRAME_INTERVAL,
        abort,
    );
    surface.finish().ok();

    match outcome {
        OverlayOutcome::Completed => {
            scheduler.finish_break(Instant::now())?;
            println!("Break over, back to work!");
            Ok(true)
        }
        OverlayOutcome::Aborted => {
            scheduler.stop();
            Ok(false)
        }
    }
}

fn handle_command(
    line: &str,
    scheduler: &mut BreakScheduler,
    receiver: &Receiver<String>,
    prompting: &AtomicBool,
) -> Result<bool, AppError> {
    match parse_loop_command(line) {
        LoopCommand::Empty => {}
        LoopCommand::Pause => {
            if let Err(err) = scheduler.pause(Instant::now()) {
                println!("\n{}", err.message());
            }
        }
        LoopCommand::Resume => {
            if let Err(err) = scheduler.resume(Instant::now()) {
                println!("\n{}", err.message());
            }
        }
        LoopCommand::Edit => {
            println!("\nTemporarily editing the break settings for this session only.");
            prompting.store(true, Ordering::SeqCst);
            let mut prompter = LinePrompter::new(ChannelLines::new(receiver));
            let result = settings::edit_session(&mut prompter, scheduler.settings());
            prompting.store(false, Ordering::SeqCst);
            match result {
                Ok(edited) => {
                    scheduler.apply_settings(edited);
                    println!("Break settings updated for this session only.");
                }
                Err(err) => eprintln!("ERROR: {err}"),
            }
        }
        LoopCommand::Stop => {
            scheduler.stop();
            return Ok(false);
        }
        LoopCommand::Help => {
            println!("\nCommands: pause, resume, edit, stop, quit.");
        }
        LoopCommand::Unknown(command) => {
            println!("\nUnknown command '{command}'. Commands: pause, resume, edit, stop, quit.");
        }
    }
    Ok(true)
}

pub fn run() -> Result<(), AppError> {
    let path = json_store::settings_path()?;
    let configured = ensure_configured(&path)?;

    let abort = Arc::new(AtomicBool::new(false));
    let prompting = Arc::new(AtomicBool::new(false));

    {
        let abort = abort.clone();
        ctrlc::set_handler(move || {
            abort.store(true, Ordering::SeqCst);
        })
        .map_err(|err| AppError::io(err.to_string()))?;
    }

    let notifier = notifier_from_env()?;
    let pool = ExercisePool::builtin();

    let (sender, receiver) = mpsc::channel();
    spawn_stdin_reader(sender, abort.clone(), prompting.clone());

    let mut scheduler = BreakScheduler::new(configured);
    scheduler.start(Instant::now())?;
    println!("Timer started. Commands: pause, resume, edit, stop, quit.");

    loop {
        if abort.load(Ordering::SeqCst) {
            scheduler.stop();
            break;
        }

        let mut keep_running = true;
        while let Ok(line) = receiver.try_recv() {
            keep_running = handle_command(&line, &mut scheduler, &receiver, &prompting)?;
            if !keep_running {
                break;
            }
        }
        if !keep_running {
            break;
        }

        let outcome = scheduler.tick(Instant::now());
        print_status(&outcome.display);

        match outcome.event {
            Some(TickEvent::PreBreakNotice) => {
                let sent = notifier.notify(
                    "Break Reminder",
                    "Heads-up!",
                    "Your break starts in 10 seconds.",
                );
                if sent.is_err() {
                    bell();
                }
            }
            Some(TickEvent::BreakStarted) => {
                println!();
                if !run_break(&mut scheduler, &pool, &abort)? {
                    break;
                }
            }
            None => {}
        }

        thread::sleep(TICK_INTERVAL);
    }

    println!("\nTimer stopped.");
    Ok(())
}
