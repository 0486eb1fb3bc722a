use std::collections::VecDeque;
use std::fmt;

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Snake body plus its current and pending heading.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Lays out `length` segments trailing straight behind `head`.
    #[must_use]
    pub fn straight(head: Position, direction: Direction, length: usize) -> Self {
        let mut segments = Vec::with_capacity(length);
        let mut cursor = head;
        for _ in 0..length {
            segments.push(cursor);
            cursor = cursor.step(direction.opposite());
        }
        Self::from_segments(segments, direction)
    }

    /// Records `direction` for the next tick unless it reverses the current heading.
    ///
    /// Several requests between two ticks overwrite each other; the last valid
    /// one is applied.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Adopts the pending direction and returns the cell the head moves into.
    pub fn turn_and_peek(&mut self) -> Position {
        self.direction = self.pending_direction;
        self.head().step(self.direction)
    }

    /// Prepends a new head. Without `grow` the tail segment is dropped.
    pub fn advance_to(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next tick will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Copies the body into a vector, head first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    #[test]
    fn bounds_check_covers_all_edges() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        assert!(Position::new(0, 0).is_within_bounds(bounds));
        assert!(Position::new(9, 7).is_within_bounds(bounds));
        assert!(!Position::new(-1, 3).is_within_bounds(bounds));
        assert!(!Position::new(10, 3).is_within_bounds(bounds));
        assert!(!Position::new(4, 8).is_within_bounds(bounds));
    }

    #[test]
    fn straight_snake_trails_behind_head() {
        let snake = Snake::straight(Position::new(10, 10), Direction::Right, 3);

        assert_eq!(
            snake.to_vec(),
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
    }

    #[test]
    fn advancing_without_growth_keeps_length() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);

        let next = snake.turn_and_peek();
        snake.advance_to(next, false);

        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advancing_with_growth_keeps_previous_tail() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);

        let next = snake.turn_and_peek();
        snake.advance_to(next, true);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.to_vec().last(), Some(&Position::new(3, 5)));
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Up, 3);

        snake.buffer_direction(Direction::Down);

        assert_eq!(snake.pending_direction(), Direction::Up);
        assert_eq!(snake.turn_and_peek(), Position::new(5, 4));
    }

    #[test]
    fn direction_buffer_keeps_last_valid_input() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);

        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);
        snake.buffer_direction(Direction::Left);

        assert_eq!(snake.pending_direction(), Direction::Down);
        assert_eq!(snake.turn_and_peek(), Position::new(5, 6));
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn reversal_is_judged_against_applied_direction() {
        let mut snake = Snake::straight(Position::new(5, 5), Direction::Right, 3);

        // Pending Up does not make Down a reversal: the snake still heads right.
        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);

        assert_eq!(snake.pending_direction(), Direction::Down);
    }
}
