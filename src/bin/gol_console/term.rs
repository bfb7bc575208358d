use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType},
};
use gol_console::Board;
use num_format::{CustomFormat, Grouping, ToFormattedString};
use std::io::{self, Write};
use std::time::Duration;

/// A keyboard command recognized by the simulation loop.
pub(super) enum Command {
    Save,
    Load,
    Quit,
}

/// Enables raw mode for the lifetime of the loop and restores the terminal
/// on drop, error paths included.
pub(super) struct RawModeGuard;

impl RawModeGuard {
    pub(super) fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

pub(super) fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    Ok(())
}

/// Prints the board grid in the `*`/space convention.
pub(super) fn draw_board(board: &Board) -> Result<()> {
    let mut out = io::stdout().lock();
    // raw mode needs explicit carriage returns
    for line in board.to_plaintext().lines() {
        write!(out, "{line}\r\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Prints the generation counter and the three statistics lines.
pub(super) fn draw_stats(
    generation: u64,
    live_cells: usize,
    matched_patterns: usize,
    symmetric_pairs: usize,
) -> Result<()> {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()?;
    let mut out = io::stdout().lock();
    write!(out, "Generation: {}\r\n", generation.to_formatted_string(&fmt))?;
    write!(out, "Live cells: {}\r\n", live_cells.to_formatted_string(&fmt))?;
    write!(out, "Matched patterns: {}\r\n", matched_patterns.to_formatted_string(&fmt))?;
    write!(out, "Symmetric pairs: {}\r\n", symmetric_pairs.to_formatted_string(&fmt))?;
    out.flush()?;
    Ok(())
}

/// Waits up to `timeout` for a key press and maps it to a [`Command`].
/// Unrecognized keys and non-key events are ignored.
pub(super) fn poll_command(timeout: Duration) -> Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Ok(match code {
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Save),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::Load),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }),
        _ => Ok(None),
    }
}

/// Reads a line from the user. Raw mode is suspended for the prompt so the
/// input echoes and line editing works, then re-enabled.
pub(super) fn prompt_line(prompt: &str) -> Result<String> {
    terminal::disable_raw_mode()?;
    let mut out = io::stdout().lock();
    write!(out, "{prompt}")?;
    out.flush()?;
    drop(out);

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    terminal::enable_raw_mode()?;
    Ok(line.trim().to_string())
}

/// Prints a one-line status message under the stats block.
pub(super) fn notice(message: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    write!(out, "{message}\r\n")?;
    out.flush()?;
    Ok(())
}
