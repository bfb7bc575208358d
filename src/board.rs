use anyhow::{anyhow, Context, Result};
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Character used for a live cell in the plaintext board format.
pub const ALIVE_CHAR: char = '*';
/// Character used for a dead cell in the plaintext board format.
pub const DEAD_CHAR: char = ' ';

/// A single cell of the board.
///
/// Carries the current state, the pending next state and the indices of its
/// 8 toroidal neighbors in the board's cell vector. The pending state is only
/// meaningful between the two phases of [`Board::advance`].
#[derive(Clone, Debug, Default)]
pub struct Cell {
    alive: bool,
    alive_next: bool,
    neighbors: [usize; 8],
}

impl Cell {
    /// Returns whether the cell is currently alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns the wired neighbor indices. Always 8 entries; on grids that
    /// are 1 cell wide or tall, entries may alias each other or the cell
    /// itself because the wrap is literal.
    pub fn neighbors(&self) -> &[usize; 8] {
        &self.neighbors
    }

    /// Decides the next state from the current live-neighbor count, per
    /// B3/S23: an alive cell survives with exactly 2 or 3 live neighbors,
    /// a dead cell is born with exactly 3. Reads and writes no other cell.
    pub fn determine_next_state(&mut self, live_neighbors: usize) {
        self.alive_next = if self.alive {
            live_neighbors == 2 || live_neighbors == 3
        } else {
            live_neighbors == 3
        };
    }

    /// Commits the pending state. Must only run after every cell on the
    /// board had its next state determined for this generation.
    pub fn commit(&mut self) {
        self.alive = self.alive_next;
    }
}

/// A toroidal Game of Life board.
///
/// Owns a row-major grid of [`Cell`]s with `columns = width / cell_size` and
/// `rows = height / cell_size` (floor division). The neighbor graph wraps at
/// every edge and is wired once at construction, never rebuilt.
///
/// # Example
///
/// ```rust
/// use gol_console::Board;
///
/// let mut board = Board::random(50, 20, 1, 0.5, Some(42)).unwrap();
/// board.advance();
/// println!("{} live cells", board.count_live_cells());
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    columns: usize,
    rows: usize,
    cell_size: usize,
}

impl Board {
    /// Creates a blank board.
    ///
    /// # Errors
    ///
    /// Rejects a zero `cell_size` and dimensions that floor-divide to zero
    /// columns or rows; a degenerate grid is a configuration error, not a
    /// valid simulation.
    pub fn new(width: usize, height: usize, cell_size: usize) -> Result<Self> {
        if cell_size == 0 {
            return Err(anyhow!("cell size must be positive"));
        }
        let columns = width / cell_size;
        let rows = height / cell_size;
        if columns == 0 || rows == 0 {
            return Err(anyhow!(
                "{}x{} with cell size {} yields an empty grid",
                width,
                height,
                cell_size
            ));
        }

        let mut cells = vec![Cell::default(); columns * rows];
        connect_neighbors(&mut cells, columns, rows);
        Ok(Self {
            cells,
            columns,
            rows,
            cell_size,
        })
    }

    /// Creates a board and randomizes it with the given live density.
    ///
    /// # Arguments
    ///
    /// * `live_density` - Per-cell probability of starting alive.
    /// * `seed` - Optional seed for the random number generator.
    ///   If None, seeds from the OS.
    pub fn random(
        width: usize,
        height: usize,
        cell_size: usize,
        live_density: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut board = Self::new(width, height, cell_size)?;
        board.randomize(live_density, seed);
        Ok(board)
    }

    /// Refills the board: every cell independently starts alive with
    /// probability `live_density` (a uniform draw in `[0, 1)` compared
    /// against the density). A density of 0 kills every cell, 1 fills the
    /// whole grid.
    pub fn randomize(&mut self, live_density: f64, seed: Option<u64>) {
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        for cell in self.cells.iter_mut() {
            cell.alive = rng.random::<f64>() < live_density;
        }
    }

    /// Advances the board by one generation.
    ///
    /// Two full passes: the first determines every cell's next state from
    /// current states only, the second commits them. Keeping the passes
    /// separate makes the update synchronous and order-independent;
    /// collapsing them would introduce sequential-update artifacts.
    pub fn advance(&mut self) {
        for i in 0..self.cells.len() {
            let neighbors = self.cells[i].neighbors;
            let live = neighbors
                .iter()
                .filter(|&&n| self.cells[n].alive)
                .count();
            self.cells[i].determine_next_state(live);
        }
        for cell in self.cells.iter_mut() {
            cell.commit();
        }
    }

    /// Number of columns in the grid.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The cell size the board was constructed with.
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Returns the cell at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Returns whether the cell at `(x, y)` is alive.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)].alive
    }

    /// Sets the state of the cell at `(x, y)`.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.index(x, y);
        self.cells[i].alive = alive;
    }

    /// Counts the cells that are currently alive.
    pub fn count_live_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Serializes the grid to the plaintext format: one line per row,
    /// `*` for alive and space for dead.
    pub fn to_plaintext(&self) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        for y in 0..self.rows {
            for x in 0..self.columns {
                out.push(if self.is_alive(x, y) {
                    ALIVE_CHAR
                } else {
                    DEAD_CHAR
                });
            }
            out.push('\n');
        }
        out
    }

    /// Applies a plaintext grid onto the board.
    ///
    /// Only the rectangle where the text and the board overlap is written:
    /// extra rows and columns in the text are ignored, and cells the text
    /// does not cover keep their current state. Any character other than
    /// `*` clears the cell it covers.
    pub fn overlay_plaintext(&mut self, text: &str) {
        for (y, line) in text.lines().take(self.rows).enumerate() {
            for (x, ch) in line.chars().take(self.columns).enumerate() {
                let i = self.index(x, y);
                self.cells[i].alive = ch == ALIVE_CHAR;
            }
        }
    }

    /// Saves the board to `path` in the plaintext format.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_plaintext())
            .with_context(|| format!("failed to save board to {}", path.display()))
    }

    /// Loads a plaintext grid from `path` into the board, overlay semantics
    /// as in [`Board::overlay_plaintext`]. A missing file is a no-op and
    /// leaves the board untouched; any other I/O failure is an error.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to load board from {}", path.display()))?;
        self.overlay_plaintext(&text);
        Ok(())
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }
}

/// Wires the toroidal neighbor graph: for every cell the 8 surrounding
/// positions with both axes wrapping. On a grid that is 1 cell wide or tall
/// the wrapped position coincides with the cell's own column or row, so the
/// entries alias; that is the intended wrap behavior and is not deduplicated.
fn connect_neighbors(cells: &mut [Cell], columns: usize, rows: usize) {
    for y in 0..rows {
        for x in 0..columns {
            let x_l = if x > 0 { x - 1 } else { columns - 1 };
            let x_r = if x + 1 < columns { x + 1 } else { 0 };
            let y_t = if y > 0 { y - 1 } else { rows - 1 };
            let y_b = if y + 1 < rows { y + 1 } else { 0 };

            cells[y * columns + x].neighbors = [
                y_t * columns + x_l,
                y_t * columns + x,
                y_t * columns + x_r,
                y * columns + x_l,
                y * columns + x_r,
                y_b * columns + x_l,
                y_b * columns + x,
                y_b * columns + x_r,
            ];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const SEED: u64 = 42;

    #[test]
    fn test_dimensions() {
        let board = Board::new(50, 20, 1).unwrap();
        assert_eq!(board.columns(), 50);
        assert_eq!(board.rows(), 20);

        // floor division on both axes
        let board = Board::new(50, 20, 3).unwrap();
        assert_eq!(board.columns(), 16);
        assert_eq!(board.rows(), 6);
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        assert!(Board::new(50, 20, 0).is_err());
        assert!(Board::new(0, 20, 1).is_err());
        assert!(Board::new(50, 0, 1).is_err());
        assert!(Board::new(3, 20, 4).is_err());
    }

    #[test]
    fn test_new_board_is_dead() {
        let board = Board::new(50, 20, 1).unwrap();
        assert_eq!(board.count_live_cells(), 0);
        assert!(!board.cell(0, 0).is_alive());
    }

    #[test]
    fn test_neighbor_count_and_distinctness() {
        let board = Board::new(5, 4, 1).unwrap();
        for y in 0..board.rows() {
            for x in 0..board.columns() {
                let neighbors = board.cell(x, y).neighbors();
                assert_eq!(neighbors.len(), 8);
                let mut sorted = neighbors.to_vec();
                sorted.sort_unstable();
                sorted.dedup();
                // 3x3 and larger in both axes: all 8 positions distinct
                assert_eq!(sorted.len(), 8, "aliasing at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_neighbors_alias_on_single_column() {
        let board = Board::new(1, 4, 1).unwrap();
        let neighbors = board.cell(0, 0).neighbors();
        assert_eq!(neighbors.len(), 8);
        // left and right wrap onto the cell's own column: the row above and
        // below each appear three times, the cell itself twice
        assert_eq!(neighbors.iter().filter(|&&n| n == 3).count(), 3);
        assert_eq!(neighbors.iter().filter(|&&n| n == 1).count(), 3);
        assert_eq!(neighbors.iter().filter(|&&n| n == 0).count(), 2);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut board = Board::new(50, 20, 1).unwrap();
        board.randomize(0.0, Some(SEED));
        assert_eq!(board.count_live_cells(), 0);
        board.randomize(1.0, Some(SEED));
        assert_eq!(board.count_live_cells(), 50 * 20);
    }

    #[test]
    fn test_full_density_board_starts_alive() {
        let board = Board::random(4, 4, 1, 1.0, None).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert!(board.is_alive(x, y), "cell at ({}, {}) is not alive", x, y);
            }
        }
        assert_eq!(board.count_live_cells(), 16);
    }

    #[test]
    fn test_randomize_is_reproducible_with_seed() {
        let a = Board::random(50, 20, 1, 0.5, Some(SEED)).unwrap();
        let b = Board::random(50, 20, 1, 0.5, Some(SEED)).unwrap();
        assert_eq!(a.to_plaintext(), b.to_plaintext());
    }

    #[test]
    fn test_dead_board_stays_dead() {
        let mut board = Board::new(10, 10, 1).unwrap();
        board.advance();
        assert_eq!(board.count_live_cells(), 0);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut board = Board::new(10, 10, 1).unwrap();
        board.set_alive(4, 4, true);
        board.advance();
        assert_eq!(board.count_live_cells(), 0);
    }

    #[test]
    fn test_block_is_stable() {
        let mut board = Board::new(6, 6, 1).unwrap();
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            board.set_alive(x, y, true);
        }
        let before = board.to_plaintext();
        for _ in 0..5 {
            board.advance();
            assert_eq!(board.to_plaintext(), before);
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut board = Board::new(5, 5, 1).unwrap();
        // vertical blinker in the middle
        for y in 1..4 {
            board.set_alive(2, y, true);
        }
        let vertical = board.to_plaintext();

        board.advance();
        assert_eq!(board.count_live_cells(), 3);
        for x in 1..4 {
            assert!(board.is_alive(x, 2), "({}, 2) should be alive", x);
        }

        board.advance();
        assert_eq!(board.to_plaintext(), vertical);
    }

    #[test]
    fn test_glider_wraps_around_the_torus() {
        let mut board = Board::new(8, 8, 1).unwrap();
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            board.set_alive(x, y, true);
        }
        // a glider translates by (1, 1) every 4 generations; 32 generations
        // move it 8 cells along both axes, wrapping back to the start
        let start = board.to_plaintext();
        for _ in 0..32 {
            board.advance();
        }
        assert_eq!(board.to_plaintext(), start);
    }

    #[test]
    fn test_plaintext_roundtrip() {
        let original = Board::random(20, 10, 1, 0.5, Some(SEED)).unwrap();
        let mut restored = Board::new(20, 10, 1).unwrap();
        restored.overlay_plaintext(&original.to_plaintext());
        assert_eq!(restored.to_plaintext(), original.to_plaintext());
    }

    #[test]
    fn test_overlay_smaller_text_keeps_rest() {
        let mut board = Board::random(10, 10, 1, 1.0, Some(SEED)).unwrap();
        board.overlay_plaintext("  \n  \n");
        // the 2x2 corner is cleared, everything else untouched
        assert_eq!(board.count_live_cells(), 100 - 4);
        assert!(!board.is_alive(0, 0));
        assert!(!board.is_alive(1, 1));
        assert!(board.is_alive(2, 0));
        assert!(board.is_alive(0, 2));
    }

    #[test]
    fn test_overlay_larger_text_is_clipped() {
        let mut board = Board::new(2, 2, 1).unwrap();
        board.overlay_plaintext("***\n***\n***\n");
        assert_eq!(board.count_live_cells(), 4);
    }
}
