use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Segment count of a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Narrowest grid that still fits the start snake left of the centre column.
pub const MIN_GRID_WIDTH: u16 = INITIAL_SNAKE_LENGTH as u16 + 1;

/// Score granted per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Number of runs kept in the score history.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Random draws tried before food placement falls back to scanning free cells.
pub const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// How long the host waits for input before redrawing.
pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

pub const EASY_PERIOD_MS: u64 = 300;
pub const MEDIUM_PERIOD_MS: u64 = 200;
pub const HARD_PERIOD_MS: u64 = 120;

/// Logical grid dimensions, validated on construction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Validates the dimensions against the start layout.
    pub fn new(width: u16, height: u16) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidGrid {
                width,
                height,
                reason: "dimensions must be greater than zero",
            });
        }

        if width < MIN_GRID_WIDTH {
            return Err(EngineError::InvalidGrid {
                width,
                height,
                reason: "grid is too narrow for the starting snake",
            });
        }

        Ok(Self { width, height })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Construction parameters for one game instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub food_points: u32,
}

impl EngineConfig {
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            food_points: FOOD_POINTS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

/// Strictly positive interval between two ticks.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickPeriod(Duration);

impl TickPeriod {
    pub fn new(period: Duration) -> Result<Self, EngineError> {
        if period.is_zero() {
            return Err(EngineError::InvalidPeriod);
        }
        Ok(Self(period))
    }

    pub fn from_millis(millis: u64) -> Result<Self, EngineError> {
        Self::new(Duration::from_millis(millis))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

/// Difficulty presets selectable by the player.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Stable label used in run history.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tick period per difficulty, owned by the host.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedTable {
    pub easy: TickPeriod,
    pub medium: TickPeriod,
    pub hard: TickPeriod,
}

impl SpeedTable {
    pub fn from_millis(easy: u64, medium: u64, hard: u64) -> Result<Self, EngineError> {
        Ok(Self {
            easy: TickPeriod::from_millis(easy)?,
            medium: TickPeriod::from_millis(medium)?,
            hard: TickPeriod::from_millis(hard)?,
        })
    }

    #[must_use]
    pub fn period_for(&self, difficulty: Difficulty) -> TickPeriod {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            easy: TickPeriod(Duration::from_millis(EASY_PERIOD_MS)),
            medium: TickPeriod(Duration::from_millis(MEDIUM_PERIOD_MS)),
            hard: TickPeriod(Duration::from_millis(HARD_PERIOD_MS)),
        }
    }
}

/// Cell drawing style.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum PixelStyle {
    #[value(name = "8bit")]
    Bit8,
    #[default]
    #[value(name = "16bit")]
    Bit16,
}

impl PixelStyle {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Bit8 => Self::Bit16,
            Self::Bit16 => Self::Bit8,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Difficulty, GridSize, SpeedTable, TickPeriod};
    use crate::error::EngineError;

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(matches!(
            GridSize::new(0, 10),
            Err(EngineError::InvalidGrid { .. })
        ));
        assert!(matches!(
            GridSize::new(10, 0),
            Err(EngineError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn grid_must_fit_start_snake() {
        assert!(GridSize::new(3, 5).is_err());
        assert_eq!(
            GridSize::new(4, 1).expect("4x1 fits the start snake"),
            GridSize {
                width: 4,
                height: 1
            }
        );
    }

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(
            TickPeriod::new(Duration::ZERO),
            Err(EngineError::InvalidPeriod)
        );
        assert!(SpeedTable::from_millis(300, 0, 120).is_err());
    }

    #[test]
    fn default_speed_table_matches_presets() {
        let table = SpeedTable::default();

        assert_eq!(
            table.period_for(Difficulty::Easy).as_duration(),
            Duration::from_millis(300)
        );
        assert_eq!(
            table.period_for(Difficulty::Medium).as_duration(),
            Duration::from_millis(200)
        );
        assert_eq!(
            table.period_for(Difficulty::Hard).as_duration(),
            Duration::from_millis(120)
        );
    }
}
