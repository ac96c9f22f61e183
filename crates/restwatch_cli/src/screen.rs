use restwatch_core::error::AppError;
use restwatch_core::overlay::{OverlayFrame, OverlaySurface};
use std::io::{self, Write};

const BAR_WIDTH: usize = 40;

/// Terminal rendition of the break screen: the screen is cleared once on
/// the first frame, then countdown, exercise prompt and a filling progress
/// bar are redrawn in place every frame.
pub struct TerminalSurface<W: Write> {
    out: W,
    cleared: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cleared: false,
        }
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        write!(self.out, "\x1b[2J\x1b[H")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> OverlaySurface for TerminalSurface<W> {
    fn draw(&mut self, frame: &OverlayFrame<'_>) -> Result<(), AppError> {
        if !self.cleared {
            write!(self.out, "\x1b[2J")?;
            self.cleared = true;
        }

        let filled = ((frame.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        write!(
            self.out,
            "\x1b[H\x1b[2KBreak time! {}\r\n\x1b[2K{}\r\n\x1b[2K[{}{}]",
            frame.countdown,
            frame.exercise,
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
        )?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn bell() {
    print!("\x07");
    io::stdout().flush().ok();
}
