use restwatch_core::error::AppError;
use restwatch_core::interact::{Interaction, parse_integer_in_range};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

/// Where prompt answers come from: stdin directly for the standalone
/// config commands, or the run loop's reader-thread channel while the
/// timer is active (the reader thread owns stdin then).
pub trait LineSource {
    fn next_line(&mut self) -> Result<String, AppError>;
}

pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> Result<String, AppError> {
        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Err(AppError::invalid_input("input closed"));
        }
        Ok(line)
    }
}

pub struct ChannelLines<'a> {
    receiver: &'a Receiver<String>,
}

impl<'a> ChannelLines<'a> {
    pub fn new(receiver: &'a Receiver<String>) -> Self {
        Self { receiver }
    }
}

impl LineSource for ChannelLines<'_> {
    fn next_line(&mut self) -> Result<String, AppError> {
        self.receiver
            .recv()
            .map_err(|_| AppError::invalid_input("input closed"))
    }
}

/// Terminal prompter: re-prompts until the answer is valid, never silently
/// defaults an out-of-range number.
pub struct LinePrompter<S: LineSource> {
    source: S,
}

impl<S: LineSource> LinePrompter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: LineSource> Interaction for LinePrompter<S> {
    fn prompt_integer(&mut self, message: &str, min: u64, max: u64) -> Result<u64, AppError> {
        println!("{message}");
        loop {
            print!("> ");
            io::stdout().flush()?;
            let line = self.source.next_line()?;
            match parse_integer_in_range(&line, min, max) {
                Ok(value) => return Ok(value),
                Err(err) => println!("{}", err.message()),
            }
        }
    }

    fn prompt_text(&mut self, message: &str) -> Result<String, AppError> {
        println!("{message}");
        print!("> ");
        io::stdout().flush()?;
        let line = self.source.next_line()?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn confirm(&mut self, message: &str) -> Result<bool, AppError> {
        println!("{message} [y/N]");
        print!("> ");
        io::stdout().flush()?;
        let line = self.source.next_line()?;
        let answer = line.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
