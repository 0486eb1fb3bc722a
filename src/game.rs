use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{EngineConfig, GridSize, INITIAL_SNAKE_LENGTH};
use crate::error::EngineError;
use crate::food::spawn_position;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Ended,
}

/// What ended the run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// What a single call to [`Game::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed.
    Skipped,
    Moved,
    AteFood,
    Collided(DeathReason),
    /// Food was eaten and the snake now covers every cell.
    BoardFilled,
}

/// Result of one tick, handed to the presentation layer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    pub score: u32,
    pub snake: Vec<Position>,
    pub food: Option<Position>,
}

impl TickResult {
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(
            self.outcome,
            TickOutcome::Moved | TickOutcome::AteFood | TickOutcome::BoardFilled
        )
    }

    #[must_use]
    pub fn ate_food(&self) -> bool {
        matches!(self.outcome, TickOutcome::AteFood | TickOutcome::BoardFilled)
    }

    #[must_use]
    pub fn collided(&self) -> bool {
        matches!(self.outcome, TickOutcome::Collided(_))
    }

    /// Returns true when this tick moved the game into `Ended`.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(
            self.outcome,
            TickOutcome::Collided(_) | TickOutcome::BoardFilled
        )
    }
}

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: GridSize,
    pub status: GameStatus,
    pub score: u32,
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Option<Position>,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
}

/// One independent snake simulation.
#[derive(Debug, Clone)]
pub struct Game {
    config: EngineConfig,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    status: GameStatus,
    tick_count: u64,
    death_reason: Option<DeathReason>,
    rng: StdRng,
}

impl Game {
    /// Creates an idle game seeded from OS entropy.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    pub fn new_with_seed(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self, EngineError> {
        let grid = GridSize::new(config.grid.width, config.grid.height)?;
        let config = EngineConfig { grid, ..config };

        let mut game = Self {
            config,
            snake: Snake::straight(start_head(grid), Direction::Right, INITIAL_SNAKE_LENGTH),
            food: None,
            score: 0,
            status: GameStatus::Idle,
            tick_count: 0,
            death_reason: None,
            rng,
        };
        game.reset_state();
        Ok(game)
    }

    /// Reinitialises snake, food and score and returns to `Idle`.
    ///
    /// Ignored while running; returns whether the reset happened.
    pub fn reset(&mut self) -> bool {
        if self.status == GameStatus::Running {
            return false;
        }
        self.reset_state();
        self.status = GameStatus::Idle;
        true
    }

    /// Starts a fresh run from `Idle` or `Ended`.
    pub fn start(&mut self) -> bool {
        if !matches!(self.status, GameStatus::Idle | GameStatus::Ended) {
            return false;
        }
        self.reset_state();
        self.status = GameStatus::Running;
        log::info!("game started on {}x{} grid", self.grid().width, self.grid().height);
        true
    }

    /// Forces a reset from any state and starts running.
    pub fn restart(&mut self) {
        self.reset_state();
        self.status = GameStatus::Running;
        log::info!("game restarted");
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    /// Flips between running and paused; returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::Ended => false,
        }
    }

    /// Requests a heading for the next tick. Reversals are dropped silently.
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.buffer_direction(direction);
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> TickResult {
        if self.status != GameStatus::Running {
            return self.result(TickOutcome::Skipped);
        }

        self.tick_count += 1;
        let next_head = self.snake.turn_and_peek();

        if !next_head.is_within_bounds(self.config.grid) {
            return self.end(DeathReason::Wall);
        }

        // Checked before the tail moves, so the current tail cell is fatal too.
        if self.snake.occupies(next_head) {
            return self.end(DeathReason::SelfCollision);
        }

        let ate = self.food == Some(next_head);
        self.snake.advance_to(next_head, ate);
        if !ate {
            return self.result(TickOutcome::Moved);
        }

        self.score += self.config.food_points;
        self.food = spawn_position(&mut self.rng, self.config.grid, &self.snake);
        match self.food {
            Some(food) => {
                log::debug!("food eaten, score {}, next food at {food}", self.score);
                self.result(TickOutcome::AteFood)
            }
            None => {
                self.status = GameStatus::Ended;
                log::info!("board filled, final score {}", self.score);
                self.result(TickOutcome::BoardFilled)
            }
        }
    }

    /// Replaces the snake, validating bounds and self-overlap.
    ///
    /// Food lying under the new body is moved to a free cell.
    pub fn place_snake(
        &mut self,
        segments: Vec<Position>,
        direction: Direction,
    ) -> Result<(), EngineError> {
        if segments.is_empty() {
            return Err(EngineError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(segments.len());
        for segment in &segments {
            if !segment.is_within_bounds(self.config.grid) {
                return Err(EngineError::OutOfBounds(*segment));
            }
            if !seen.insert(*segment) {
                return Err(EngineError::OverlappingSegments(*segment));
            }
        }

        self.snake = Snake::from_segments(segments, direction);
        if self.food.is_none_or(|food| self.snake.occupies(food)) {
            self.food = spawn_position(&mut self.rng, self.config.grid, &self.snake);
        }
        Ok(())
    }

    /// Moves the food to `position`, which must be a free in-bounds cell.
    pub fn place_food(&mut self, position: Position) -> Result<(), EngineError> {
        if !position.is_within_bounds(self.config.grid) {
            return Err(EngineError::OutOfBounds(position));
        }
        if self.snake.occupies(position) {
            return Err(EngineError::FoodOnSnake(position));
        }
        self.food = Some(position);
        Ok(())
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.config.grid,
            status: self.status,
            score: self.score,
            snake: self.snake.to_vec(),
            direction: self.snake.direction(),
            food: self.food,
            tick_count: self.tick_count,
            death_reason: self.death_reason,
        }
    }

    fn reset_state(&mut self) {
        let grid = self.config.grid;
        self.snake = Snake::straight(start_head(grid), Direction::Right, INITIAL_SNAKE_LENGTH);
        self.food = spawn_position(&mut self.rng, grid, &self.snake);
        self.score = 0;
        self.tick_count = 0;
        self.death_reason = None;
    }

    fn end(&mut self, reason: DeathReason) -> TickResult {
        self.status = GameStatus::Ended;
        self.death_reason = Some(reason);
        log::info!("game over ({reason:?}), final score {}", self.score);
        self.result(TickOutcome::Collided(reason))
    }

    fn result(&self, outcome: TickOutcome) -> TickResult {
        TickResult {
            outcome,
            score: self.score,
            snake: self.snake.to_vec(),
            food: self.food,
        }
    }
}

fn start_head(grid: GridSize) -> Position {
    Position {
        x: i32::from(grid.width / 2),
        y: i32::from(grid.height / 2),
    }
}
