use std::time::Instant;

use crate::clock::TickClock;
use crate::config::{Difficulty, SpeedTable, TickPeriod};
use crate::game::{Game, GameStatus, TickResult};
use crate::input::GameInput;
use crate::score::{RunRecord, ScoreStore, unix_timestamp};

/// Summary of the most recent finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RunSummary {
    pub score: u32,
    /// High score before this run was recorded.
    pub previous_high_score: u32,
}

impl RunSummary {
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.score > self.previous_high_score
    }
}

/// Host-side coordinator: one game, its clock, its difficulty and its score store.
///
/// The clock is always stopped before the game leaves `Running`, so a tick
/// can never land on a paused, ended or freshly reset game.
pub struct Session {
    game: Game,
    clock: TickClock,
    speeds: SpeedTable,
    difficulty: Difficulty,
    store: Box<dyn ScoreStore>,
    high_score: u32,
    last_run: Option<RunSummary>,
}

impl Session {
    /// Builds a session; an unreadable store starts from a zero high score.
    #[must_use]
    pub fn new(
        game: Game,
        speeds: SpeedTable,
        difficulty: Difficulty,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let high_score = match store.load_high_score() {
            Ok(score) => score,
            Err(error) => {
                log::warn!("failed to load high score: {error}");
                0
            }
        };

        Self {
            game,
            clock: TickClock::new(speeds.period_for(difficulty)),
            speeds,
            difficulty,
            store,
            high_score,
            last_run: None,
        }
    }

    /// Routes one host signal. Presentation-only signals are ignored here.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Direction(direction) => self.game.set_direction(direction),
            GameInput::TogglePause => self.toggle_pause(now),
            GameInput::Start => self.start(now),
            GameInput::Restart => self.restart(now),
            GameInput::Difficulty(difficulty) => self.set_difficulty(difficulty, now),
            GameInput::ToggleHistory | GameInput::TogglePixelStyle | GameInput::Quit => {}
        }
    }

    /// Starts a run from `Idle` or `Ended`.
    pub fn start(&mut self, now: Instant) {
        if self.game.start() {
            self.last_run = None;
            self.clock.start(self.current_period(), now);
        }
    }

    /// Abandons the current run (unrecorded) and starts a new one.
    pub fn restart(&mut self, now: Instant) {
        self.clock.stop();
        self.game.restart();
        self.last_run = None;
        self.clock.start(self.current_period(), now);
    }

    /// Stops the clock, then pauses a running game. Ignored in other states.
    pub fn pause(&mut self) {
        if self.game.status() != GameStatus::Running {
            return;
        }
        self.clock.stop();
        self.game.pause();
    }

    /// Resumes a paused game and restarts the clock from `now`.
    pub fn resume(&mut self, now: Instant) {
        if self.game.resume() {
            self.clock.start(self.current_period(), now);
        }
    }

    /// Pauses a running game or resumes a paused one; ignored otherwise.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.game.status() {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(now),
            GameStatus::Idle | GameStatus::Ended => {}
        }
    }

    /// Switches difficulty; a running clock restarts at the new period.
    pub fn set_difficulty(&mut self, difficulty: Difficulty, now: Instant) {
        self.difficulty = difficulty;
        log::info!("difficulty set to {difficulty}");

        if self.game.status() == GameStatus::Running {
            self.clock.stop();
            self.clock.start(self.current_period(), now);
        }
    }

    /// Ticks the game when the clock is due; returns the tick result if one ran.
    pub fn advance(&mut self, now: Instant) -> Option<TickResult> {
        if !self.clock.poll(now) {
            return None;
        }

        let result = self.game.tick();
        if result.is_game_over() {
            self.clock.stop();
            self.finish_run(result.score);
        }
        Some(result)
    }

    fn finish_run(&mut self, score: u32) {
        let previous_high_score = self.high_score;
        self.high_score = self.high_score.max(score);
        self.last_run = Some(RunSummary {
            score,
            previous_high_score,
        });

        let run = RunRecord {
            score,
            difficulty: self.difficulty.label().to_owned(),
            timestamp: unix_timestamp(),
        };
        if let Err(error) = self.store.record_run(run) {
            log::warn!("failed to record run: {error}");
        }
    }

    /// Best runs from the store, best first; empty when the store is unreadable.
    #[must_use]
    pub fn top_runs(&self, limit: usize) -> Vec<RunRecord> {
        self.store.list_top_runs(limit).unwrap_or_else(|error| {
            log::warn!("failed to list runs: {error}");
            Vec::new()
        })
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for scripted setups (see [`Game::place_snake`]).
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    #[must_use]
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    fn current_period(&self) -> TickPeriod {
        self.speeds.period_for(self.difficulty)
    }
}
