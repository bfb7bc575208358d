use crate::term::{self, Command};
use anyhow::Result;
use gol_console::{count_symmetric, Board, PatternLibrary, Settings};
use std::time::Duration;

/// How long a save/load acknowledgment stays on screen before the next tick.
const NOTICE_DELAY: Duration = Duration::from_secs(2);

/// Runs the simulation loop until Escape is pressed.
///
/// Each tick: clear, render, advance, report statistics, sleep the
/// configured delay, then poll the keyboard without blocking. Save and load
/// failures are shown on screen and the loop keeps running.
pub(super) fn run(settings: &Settings, seed: Option<u64>) -> Result<()> {
    let mut board = Board::random(
        settings.width,
        settings.height,
        settings.cell_size,
        settings.live_density,
        seed,
    )?;
    let patterns = PatternLibrary::standard();
    let mut generation: u64 = 0;

    let _guard = term::RawModeGuard::enable()?;
    loop {
        term::clear_screen()?;
        term::draw_board(&board)?;
        board.advance();
        generation += 1;

        let live_cells = board.count_live_cells();
        let matched = patterns.match_patterns(&board);
        let symmetric = count_symmetric(&board);
        term::draw_stats(generation, live_cells, matched.len(), symmetric)?;

        std::thread::sleep(Duration::from_millis(settings.simulation_speed));
        match term::poll_command(Duration::ZERO)? {
            Some(Command::Save) => {
                let name = term::prompt_line("Save board to: ")?;
                if !name.is_empty() {
                    match board.save_to_file(&name) {
                        Ok(()) => term::notice("Board saved.")?,
                        Err(err) => term::notice(&format!("Save failed: {err:#}"))?,
                    }
                    std::thread::sleep(NOTICE_DELAY);
                }
            }
            Some(Command::Load) => {
                let name = term::prompt_line("Load board from: ")?;
                if !name.is_empty() {
                    match board.load_from_file(&name) {
                        Ok(()) => term::notice("Board loaded.")?,
                        Err(err) => term::notice(&format!("Load failed: {err:#}"))?,
                    }
                    std::thread::sleep(NOTICE_DELAY);
                }
            }
            Some(Command::Quit) => break,
            None => {}
        }
    }
    Ok(())
}
