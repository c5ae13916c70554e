use crate::geometry::Position;
use crate::rng::GameRng;

pub struct Fruit {
    pos: Position,
}

impl Fruit {
    pub fn new(grid_size: i32, rng: &mut GameRng) -> Self {
        let mut fruit = Fruit { pos: Position::new(0, 0) };
        fruit.randomize(grid_size, rng);
        fruit
    }

    #[cfg(test)]
    pub fn at(pos: Position) -> Self {
        Fruit { pos }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Moves the fruit to a uniformly random cell. Does not look at the
    /// snake: avoiding the body is up to the caller.
    pub fn randomize(&mut self, grid_size: i32, rng: &mut GameRng) {
        self.pos = Position::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
    }

    /// Moves the fruit to a uniformly random cell not contained in `occupied`.
    /// Returns false, leaving the fruit untouched, when the grid is full.
    pub fn place_outside(&mut self, grid_size: i32, occupied: &[Position], rng: &mut GameRng) -> bool {
        let free: Vec<Position> = (0..grid_size)
            .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
            .filter(|pos| !occupied.contains(pos))
            .collect();

        if free.is_empty() {
            return false;
        }

        self.pos = free[rng.random_range(0..free.len())];
        true
    }
}
