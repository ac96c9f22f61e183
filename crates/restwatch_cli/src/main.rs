mod cli;
mod prompt;
mod run;
mod screen;

use clap::Parser;
use cli::{Cli, Command, ConfigCommand};
use prompt::{LinePrompter, StdinLines};
use restwatch_core::error::AppError;
use restwatch_core::interact::Interaction;
use restwatch_core::settings::{self, Settings};
use restwatch_core::storage::json_store;

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn config_show(json: bool) -> Result<(), AppError> {
    let path = json_store::settings_path()?;
    let load = json_store::load_settings_with_fallback(&path);
    if let Some(err) = load.error {
        eprintln!("ERROR: {err}");
    }
    let settings = load.settings;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "break_interval": settings.break_interval,
                "break_duration": settings.break_duration,
                "custom_pause_message": settings.custom_pause_message,
                "configured": settings.is_configured(),
            })
        );
        return Ok(());
    }

    if !settings.is_configured() {
        println!("No break settings configured yet. Run 'restwatch start' or 'restwatch config edit'.");
        return Ok(());
    }

    println!("Interval: {} minutes", settings.break_interval / 60);
    println!("Duration: {} seconds", settings.break_duration);
    println!("Pause message: {}", settings.pause_message());
    Ok(())
}

fn config_edit() -> Result<(), AppError> {
    let path = json_store::settings_path()?;
    let mut prompter = LinePrompter::new(StdinLines);
    let configured = settings::configure(&mut prompter)?;
    json_store::save_settings(&path, &configured)?;
    println!("Preferences saved.");
    Ok(())
}

fn config_reset() -> Result<(), AppError> {
    let path = json_store::settings_path()?;
    let mut prompter = LinePrompter::new(StdinLines);

    let confirmed = prompter.confirm(
        "Are you sure you want to reset your preferences? This will delete all saved settings.",
    )?;
    if !confirmed {
        println!("Reset cancelled.");
        return Ok(());
    }

    json_store::save_settings(&path, &Settings::default())?;
    let configured = settings::configure(&mut prompter)?;
    json_store::save_settings(&path, &configured)?;
    println!("Preferences saved.");
    Ok(())
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Start => run::run(),
        Command::Config { config } => match config {
            ConfigCommand::Show => config_show(cli.json),
            ConfigCommand::Edit => config_edit(),
            ConfigCommand::Reset => config_reset(),
        },
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                print!("{err}");
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
