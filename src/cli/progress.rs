use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use homeclean_core::ConfirmationProgress;
use tracing::debug;

const BAR_WIDTH: usize = 20;
const SEARCHING: &str = "Finding the best maid for you...";
const FOUND: &str = "Maid found! Returning to home";

/// Draws confirmation progress on one terminal line.
pub struct ProgressLine<W: Write> {
    out: W,
    redraw: bool,
}

impl ProgressLine<io::Stdout> {
    /// `redraw` rewrites the line in place; otherwise only start and end are printed.
    pub fn stdout(redraw: bool) -> Self {
        Self::new(io::stdout(), redraw)
    }
}

impl<W: Write> ProgressLine<W> {
    pub fn new(out: W, redraw: bool) -> Self {
        Self { out, redraw }
    }

    pub fn observe(&mut self, event: ConfirmationProgress) {
        if let Err(err) = self.draw(event) {
            debug!(error = %err, "progress line not drawn");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, event: ConfirmationProgress) -> io::Result<()> {
        if !self.redraw {
            return match event {
                ConfirmationProgress::Searching => writeln!(self.out, "{SEARCHING}"),
                ConfirmationProgress::Progress(_) => Ok(()),
                ConfirmationProgress::Found => writeln!(self.out, "{FOUND}"),
            };
        }

        let text = match event {
            ConfirmationProgress::Searching => SEARCHING.to_string(),
            ConfirmationProgress::Progress(pct) => {
                format!("{SEARCHING} {} {pct:>3}%", progress_bar(pct, BAR_WIDTH))
            }
            ConfirmationProgress::Found => FOUND.to_string(),
        };
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        if event == ConfirmationProgress::Found {
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }
}

/// `[#####     ]` style bar for a percentage.
pub fn progress_bar(pct: u8, width: usize) -> String {
    let filled = usize::from(pct.min(100)) * width / 100;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}
