//! Terminal output collaborator.
//!
//! Raw-mode and cursor visibility are managed by an RAII guard entered once
//! per CLI invocation, so the cursor is restored on every exit path. The
//! drawing helpers overwrite the current line in place (carriage return,
//! erase to end of line, then the styled columns) to keep redraws
//! flicker-free.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use tracing::debug;

use crate::timer::display::{Column, ColumnKind, OVERFLOW_INDICATOR};

// ============================================================================
// TerminalGuard
// ============================================================================

/// Enters raw mode and hides the cursor; restores both on drop.
///
/// Dropping runs on every exit path, including panics and quits, so the
/// terminal is never left in raw mode with an invisible cursor.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Enables raw mode and hides the cursor.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        queue!(out, cursor::Hide)?;
        out.flush()?;
        debug!("raw mode on, cursor hidden");
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = queue!(out, cursor::Show, ResetColor);
        let _ = out.flush();
        let _ = terminal::disable_raw_mode();
        debug!("raw mode off, cursor restored");
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Current terminal width in columns, with a fallback when unavailable.
pub fn width() -> usize {
    terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
}

// ============================================================================
// Output
// ============================================================================

/// Writes the BEL control character.
pub fn bell() {
    let mut out = io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

/// Redraws the timer line in place.
///
/// The bar column renders `bar_str` (already sized by the layout); other
/// columns render their values with their color and boldness, one space
/// between columns. When `overflow` is set only the fixed indicator is
/// drawn.
pub fn draw_line(columns: &[Column], bar_str: &str, overflow: bool) -> Result<()> {
    let mut out = io::stdout();
    queue!(out, Print("\r"), Clear(ClearType::UntilNewLine))?;

    if overflow {
        queue!(
            out,
            SetAttribute(Attribute::SlowBlink),
            Print(OVERFLOW_INDICATOR),
            SetAttribute(Attribute::Reset)
        )?;
        out.flush()?;
        return Ok(());
    }

    for col in columns.iter().filter(|c| c.shown) {
        let value = if col.kind == ColumnKind::Bar {
            bar_str
        } else {
            col.value.as_str()
        };
        queue!(out, SetForegroundColor(col.color))?;
        if col.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(value), SetAttribute(Attribute::Reset), ResetColor)?;
        queue!(out, Print(" "))?;
    }

    out.flush()?;
    Ok(())
}

/// Clears the whole screen and homes the cursor.
pub fn clear_screen() -> Result<()> {
    let mut out = io::stdout();
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

/// Prints one line while raw mode is active (`\r\n` line ending).
pub fn print_line(s: &str) -> Result<()> {
    let mut out = io::stdout();
    queue!(out, Print("\r"), Clear(ClearType::UntilNewLine))?;
    queue!(out, Print(s), Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

/// Prints a styled phase banner line.
pub fn print_title_line(title: &str, color: Color) -> Result<()> {
    let mut out = io::stdout();
    queue!(out, Print("\r"), Clear(ClearType::UntilNewLine))?;
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(color),
        Print(title),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\r\n")
    )?;
    out.flush()?;
    Ok(())
}
