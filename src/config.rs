use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// What to do when a freshly placed fruit lands on the snake.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitPlacement {
    /// Re-roll once and accept whatever comes out.
    SingleRetry,
    /// Pick among the cells the snake does not cover.
    UntilFree,
}

/// Characters used to draw the board. `unicode` glyphs are East Asian
/// ambiguous width and take two columns in CJK-width terminals; `ascii`
/// is always one column per character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphSet {
    Unicode,
    Ascii,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub grass_light: Rgb,
    pub grass_dark: Rgb,
    pub text: Rgb,
    pub snake: Rgb,
    pub fruit: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            grass_light: Rgb(167, 209, 61),
            grass_dark: Rgb(175, 215, 70),
            text: Rgb(56, 74, 12),
            snake: Rgb(73, 104, 212),
            fruit: Rgb(200, 40, 40),
        }
    }
}

/// Settings fixed for the whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square board.
    pub grid_size: i32,
    /// Terminal columns used to draw one cell.
    pub cell_width: u16,
    pub tick_interval_ms: u64,
    pub frame_rate: u32,
    pub sound: bool,
    pub fruit_placement: FruitPlacement,
    pub glyphs: GlyphSet,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 20,
            cell_width: 2,
            tick_interval_ms: 150,
            frame_rate: 60,
            sound: true,
            fruit_placement: FruitPlacement::SingleRetry,
            glyphs: GlyphSet::Unicode,
            palette: Palette::default(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if !(5..=60).contains(&self.grid_size) {
            return Err("Grid size must be between 5 and 60".to_string());
        }
        if !(1..=4).contains(&self.cell_width) {
            return Err("Cell width must be between 1 and 4".to_string());
        }
        if !(20..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 20ms and 5000ms".to_string());
        }
        if !(1..=240).contains(&self.frame_rate) {
            return Err("Frame rate must be between 1 and 240".to_string());
        }
        Ok(())
    }
}

impl GameConfig {
    /// Reads a YAML config. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(GameConfig::default()),
            Err(err) => return Err(err).with_context(|| format!("failed reading config {}", path.display())),
        };

        Self::from_yaml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: GameConfig = serde_yaml_ng::from_str(content).context("failed to deserialize config")?;
        config.validate().map_err(|e| anyhow!("config validation error: {}", e))?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("failed to serialize config")
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }
}
