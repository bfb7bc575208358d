use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime settings, the JSON model of the `settings.json` file.
///
/// Field names follow the file's camelCase convention (`cellSize`,
/// `liveDensity`, `simulationSpeed`). Fields missing from the file fall back
/// to the documented defaults, so a partial config stays usable; malformed
/// JSON is a fatal parse error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Grid width in pixels; divided by `cell_size` to get columns.
    pub width: usize,
    /// Grid height in pixels; divided by `cell_size` to get rows.
    pub height: usize,
    /// Divisor for both dimensions.
    pub cell_size: usize,
    /// Per-cell probability of starting alive, in `[0, 1]`.
    pub live_density: f64,
    /// Delay between generations, in milliseconds.
    pub simulation_speed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 50,
            height: 20,
            cell_size: 1,
            live_density: 0.5,
            simulation_speed: 1000,
        }
    }
}

impl Settings {
    /// Validates the settings.
    ///
    /// A zero cell size or dimensions that floor-divide to an empty grid are
    /// configuration errors; rejecting them here keeps the board constructor
    /// from ever seeing a degenerate grid.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(
            self.width / self.cell_size > 0,
            "width {} with cell size {} yields zero columns",
            self.width,
            self.cell_size
        );
        ensure!(
            self.height / self.cell_size > 0,
            "height {} with cell size {} yields zero rows",
            self.height,
            self.cell_size
        );
        ensure!(
            (0.0..=1.0).contains(&self.live_density),
            "live density must be in [0, 1], got {}",
            self.live_density
        );
        Ok(())
    }

    /// Number of board columns these settings produce.
    pub fn columns(&self) -> usize {
        self.width / self.cell_size
    }

    /// Number of board rows these settings produce.
    pub fn rows(&self) -> usize {
        self.height / self.cell_size
    }

    /// Parses and validates settings from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(content).context("malformed settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path`; if the file does not exist, writes the
    /// defaults there (pretty-printed) and returns them.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings from {}", path.display()))?;
            Self::from_json(&content)
                .with_context(|| format!("invalid settings in {}", path.display()))
        } else {
            let settings = Self::default();
            let json = serde_json::to_string_pretty(&settings)
                .context("failed to serialize default settings")?;
            std::fs::write(path, json).with_context(|| {
                format!("failed to write default settings to {}", path.display())
            })?;
            Ok(settings)
        }
    }
}
