use std::collections::HashSet;

use proptest::prelude::*;
use retro_snake::config::{EngineConfig, FOOD_POINTS, GridSize};
use retro_snake::game::{Game, GameStatus};
use retro_snake::input::Direction;

#[derive(Debug, Clone, Copy)]
enum Step {
    Turn(Direction),
    Tick,
    TogglePause,
    Start,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..4usize).prop_map(|index| Step::Turn(Direction::ALL[index])),
        6 => Just(Step::Tick),
        1 => Just(Step::TogglePause),
        1 => Just(Step::Start),
    ]
}

fn assert_invariants(game: &Game) {
    let grid = game.grid();
    let body = game.snake().to_vec();

    let mut seen = HashSet::new();
    for segment in &body {
        assert!(segment.is_within_bounds(grid), "{segment} out of bounds");
        assert!(seen.insert(*segment), "{segment} occupied twice");
    }

    if let Some(food) = game.food() {
        assert!(food.is_within_bounds(grid));
        assert!(!game.snake().occupies(food), "food {food} inside snake");
    }
}

proptest! {
    #[test]
    fn reachable_states_keep_invariants(
        seed in any::<u64>(),
        width in 4u16..12,
        height in 1u16..12,
        steps in prop::collection::vec(step_strategy(), 1..200),
    ) {
        let grid = GridSize::new(width, height).expect("generated grid is valid");
        let mut game = Game::new_with_seed(EngineConfig::new(grid), seed)
            .expect("game should build");
        assert_invariants(&game);

        for step in steps {
            match step {
                Step::Turn(direction) => {
                    let pending = game.pending_direction();
                    game.set_direction(direction);
                    if direction == game.direction().opposite() {
                        prop_assert_eq!(game.pending_direction(), pending);
                    } else {
                        prop_assert_eq!(game.pending_direction(), direction);
                    }
                }
                Step::Tick => {
                    let was_running = game.status() == GameStatus::Running;
                    let len_before = game.snake().len();
                    let score_before = game.score();

                    let result = game.tick();

                    if !was_running {
                        prop_assert!(!result.moved());
                    } else if result.collided() {
                        prop_assert_eq!(game.status(), GameStatus::Ended);
                        prop_assert_eq!(game.score(), score_before);
                    } else if result.ate_food() {
                        prop_assert_eq!(game.snake().len(), len_before + 1);
                        prop_assert_eq!(game.score(), score_before + FOOD_POINTS);
                    } else {
                        prop_assert_eq!(game.snake().len(), len_before);
                        prop_assert_eq!(game.score(), score_before);
                    }
                }
                Step::TogglePause => {
                    game.toggle_pause();
                }
                Step::Start => {
                    game.start();
                }
            }
            assert_invariants(&game);
        }
    }
}
