use crate::geometry::{Direction, Position};
use crate::shape::{self, SegmentShape};
use MoveResult::*;

pub enum MoveResult {
    Moved,
    Idle,
}

/// Ordered body, head first. Always at least three segments long.
pub struct Snake {
    body: Vec<Position>,
    direction: Option<Direction>,
    growth_reserve: Option<Position>,
}

impl Snake {
    pub fn new(grid_size: i32) -> Self {
        Snake { body: Self::initial_body(grid_size), direction: None, growth_reserve: None }
    }

    /// Three cells facing left, head at 70% of the width on the middle row.
    /// On the default 20x20 grid that is (14,10), (15,10), (16,10).
    pub fn initial_body(grid_size: i32) -> Vec<Position> {
        let head = Position::new((grid_size * 7 / 10).min(grid_size - 3), grid_size / 2);
        (0..3).map(|i| Position::new(head.x + i, head.y)).collect()
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Position>, direction: Option<Direction>) -> Self {
        Snake { body, direction, growth_reserve: None }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[cfg(test)]
    pub fn growth_reserve(&self) -> Option<Position> {
        self.growth_reserve
    }

    /// Whether `pos` is covered by any segment other than the head.
    pub fn covers_behind_head(&self, pos: Position) -> bool {
        self.body[1..].contains(&pos)
    }

    /// Shifts the body one cell along the current direction, keeping the
    /// length. The vacated tail cell is held back so `grow` can re-attach it.
    /// A snake that has not been steered yet stays where it is.
    pub fn move_step(&mut self) -> MoveResult {
        let direction = match self.direction {
            Some(dir) => dir,
            None => return Idle,
        };

        let new_head = self.head() + direction.offset();
        self.body.insert(0, new_head);

        self.growth_reserve = self.body.pop();

        Moved
    }

    /// Re-attaches the cell vacated by the last move. Returns false when
    /// there is nothing to re-attach.
    pub fn grow(&mut self) -> bool {
        match self.growth_reserve.take() {
            Some(block) => {
                self.body.push(block);
                true
            }
            None => false,
        }
    }

    /// Steers the snake. Reversing straight into the neck is ignored.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        match self.direction {
            Some(current) if current.is_opposite(&new_direction) => false,
            _ => {
                self.direction = Some(new_direction);
                true
            }
        }
    }

    pub fn reset(&mut self, grid_size: i32) {
        self.body = Self::initial_body(grid_size);
        self.direction = None;
        self.growth_reserve = None;
    }

    pub fn shapes(&self) -> Vec<Option<SegmentShape>> {
        shape::body_shapes(&self.body)
    }
}
