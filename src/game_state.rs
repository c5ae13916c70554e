use crate::config::{FruitPlacement, GameConfig};
use crate::fruit::Fruit;
use crate::geometry::{Direction, Position};
use crate::log;
use crate::rng::GameRng;
use crate::snake::{MoveResult, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FailReason {
    OutOfBounds,
    SelfCollision,
}

/// Things that happened during a tick, for the audio and logging side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FruitEaten { at: Position, score: u32 },
    /// The game started over; `score` is what was lost.
    Reset { reason: FailReason, score: u32 },
}

/// One game session: the snake, the fruit and the score.
pub struct GameState {
    config: GameConfig,
    snake: Snake,
    fruit: Fruit,
    score: u32,
    rng: GameRng,
}

impl GameState {
    pub fn new(config: &GameConfig, mut rng: GameRng) -> Self {
        let snake = Snake::new(config.grid_size);
        let fruit = Fruit::new(config.grid_size, &mut rng);
        let mut state = GameState { config: config.clone(), snake, fruit, score: 0, rng };

        if state.snake.body().contains(&state.fruit.pos()) {
            state.relocate_fruit();
        }

        state
    }

    #[cfg(test)]
    fn with_parts(config: &GameConfig, snake: Snake, fruit: Fruit, rng: GameRng) -> Self {
        GameState { config: config.clone(), snake, fruit, score: 0, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Steering input. Takes effect on the next tick.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    pub fn fruit(&self) -> &Fruit {
        &self.fruit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// One simulation tick: move, then eat, then check for failure.
    ///
    /// A snake that has not been steered yet does not move and cannot die.
    /// A fruit left under its resting head is moved away without scoring.
    pub fn update(&mut self) -> Vec<GameEvent> {
        if let MoveResult::Idle = self.snake.move_step() {
            if self.fruit.pos() == self.snake.head() {
                self.relocate_fruit();
                log!("fruit under resting head moved to ({}, {})", self.fruit.pos().x, self.fruit.pos().y);
            }
            return vec![];
        }

        let mut events = vec![];
        events.extend(self.collision());
        events.extend(self.check_fail());
        events
    }

    /// Eats the fruit if the head is on it.
    pub fn collision(&mut self) -> Option<GameEvent> {
        let head = self.snake.head();
        if self.fruit.pos() != head {
            return None;
        }

        self.score += 1;
        self.snake.grow();
        self.relocate_fruit();

        log!(
            "ate fruit at ({}, {}). Score: {}, next fruit at ({}, {})",
            head.x,
            head.y,
            self.score,
            self.fruit.pos().x,
            self.fruit.pos().y
        );

        Some(GameEvent::FruitEaten { at: head, score: self.score })
    }

    /// Starts over if the head left the board or ran into the body.
    pub fn check_fail(&mut self) -> Option<GameEvent> {
        let head = self.snake.head();

        let reason = if !head.is_within(self.config.grid_size) {
            FailReason::OutOfBounds
        } else if self.snake.covers_behind_head(head) {
            FailReason::SelfCollision
        } else {
            return None;
        };

        let score = self.score;
        log!("{:?} at ({}, {}), score {} lost", reason, head.x, head.y, score);
        self.reset();

        Some(GameEvent::Reset { reason, score })
    }

    /// Back to the starting snake and a zero score. The fruit stays put.
    pub fn reset(&mut self) {
        self.snake.reset(self.config.grid_size);
        self.score = 0;
    }

    fn relocate_fruit(&mut self) {
        let grid_size = self.config.grid_size;
        self.fruit.randomize(grid_size, &mut self.rng);

        match self.config.fruit_placement {
            FruitPlacement::SingleRetry => {
                // Best effort: a second hit on the body is accepted.
                if self.snake.covers_behind_head(self.fruit.pos()) {
                    self.fruit.randomize(grid_size, &mut self.rng);
                }
            }
            FruitPlacement::UntilFree => {
                if self.snake.body().contains(&self.fruit.pos()) {
                    self.fruit.place_outside(grid_size, self.snake.body(), &mut self.rng);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn state_with(body: Vec<Position>, direction: Option<Direction>, fruit: Position, seed: u64) -> GameState {
        GameState::with_parts(
            &GameConfig::default(),
            Snake::from_body(body, direction),
            Fruit::at(fruit),
            GameRng::new(seed),
        )
    }

    fn initial_body() -> Vec<Position> {
        vec![pos(14, 10), pos(15, 10), pos(16, 10)]
    }

    #[test]
    fn test_new_starts_with_initial_snake() {
        let state = GameState::new(&GameConfig::default(), GameRng::new(1));
        assert_eq!(state.snake().body(), initial_body().as_slice());
        assert_eq!(state.snake().direction(), None);
        assert_eq!(state.score(), 0);
        assert!(state.fruit().pos().is_within(20));
        assert_eq!(state.seed(), 1);
        assert_eq!(state.config(), &GameConfig::default());
    }

    #[test]
    fn test_new_keeps_its_own_config() {
        let mut config = GameConfig { grid_size: 8, fruit_placement: FruitPlacement::UntilFree, ..GameConfig::default() };
        let state = GameState::new(&config, GameRng::new(2));
        config.grid_size = 30;

        assert_eq!(state.config().grid_size, 8);
        assert_eq!(state.config().fruit_placement, FruitPlacement::UntilFree);
        assert!(state.snake().body().iter().all(|p| p.is_within(8)));
    }

    #[test]
    fn test_new_moves_first_fruit_off_snake() {
        let config = GameConfig { grid_size: 5, fruit_placement: FruitPlacement::UntilFree, ..GameConfig::default() };
        let body = Snake::initial_body(5);
        let mut landed_on_snake = 0;

        for seed in 0..200 {
            let first_draw = Fruit::new(5, &mut GameRng::new(seed)).pos();
            let state = GameState::new(&config, GameRng::new(seed));

            assert!(!body.contains(&state.fruit().pos()), "seed {}", seed);
            if body.contains(&first_draw) {
                landed_on_snake += 1;
            } else {
                assert_eq!(state.fruit().pos(), first_draw, "seed {}", seed);
            }
        }

        assert!(landed_on_snake > 0);
    }

    #[test]
    fn test_update_moves_snake() {
        let mut state = state_with(vec![pos(5, 5), pos(6, 5), pos(7, 5)], Some(Left), pos(0, 0), 1);
        let events = state.update();

        assert!(events.is_empty());
        assert_eq!(state.snake().body(), &[pos(4, 5), pos(5, 5), pos(6, 5)]);
        assert_eq!(state.snake().growth_reserve(), Some(pos(7, 5)));
    }

    #[test]
    fn test_set_direction_ignores_reversal() {
        let mut state = state_with(vec![pos(5, 5), pos(6, 5), pos(7, 5)], Some(Left), pos(0, 0), 1);
        assert!(!state.set_direction(Right));
        assert!(state.set_direction(Up));
        assert_eq!(state.snake().direction(), Some(Up));
    }

    #[test]
    fn test_update_without_direction_is_noop() {
        let mut state = state_with(initial_body(), None, pos(0, 0), 1);
        assert!(state.update().is_empty());
        assert_eq!(state.snake().body(), initial_body().as_slice());
        assert_eq!(state.fruit().pos(), pos(0, 0));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_fruit_under_resting_head_is_moved_without_scoring() {
        let config = GameConfig { fruit_placement: FruitPlacement::UntilFree, ..GameConfig::default() };
        for seed in 0..20 {
            let snake = Snake::from_body(initial_body(), None);
            let mut state = GameState::with_parts(&config, snake, Fruit::at(pos(14, 10)), GameRng::new(seed));

            assert!(state.update().is_empty());
            assert_eq!(state.score(), 0);
            assert_eq!(state.snake().body(), initial_body().as_slice());
            assert!(!state.snake().body().contains(&state.fruit().pos()), "seed {}", seed);
        }
    }

    #[test]
    fn test_eating_fruit_grows_and_scores() {
        let mut state = state_with(vec![pos(5, 5), pos(6, 5), pos(7, 5)], Some(Left), pos(4, 5), 5);
        let events = state.update();

        assert_eq!(events, vec![GameEvent::FruitEaten { at: pos(4, 5), score: 1 }]);
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().body(), &[pos(4, 5), pos(5, 5), pos(6, 5), pos(7, 5)]);
        assert!(state.fruit().pos().is_within(20));
    }

    #[test]
    fn test_collision_relocation_is_seeded() {
        let mut a = state_with(vec![pos(4, 5), pos(5, 5), pos(6, 5)], Some(Left), pos(3, 5), 1234);
        let mut b = state_with(vec![pos(4, 5), pos(5, 5), pos(6, 5)], Some(Left), pos(3, 5), 1234);
        a.snake.move_step();
        b.snake.move_step();
        assert!(a.collision().is_some());
        assert!(b.collision().is_some());
        assert_eq!(a.fruit().pos(), b.fruit().pos());
    }

    #[test]
    fn test_single_retry_accepts_second_hit() {
        // On a 2x2 board every cell is covered behind the head, so both draws
        // land on the body and the second one stands.
        let config = GameConfig { grid_size: 2, ..GameConfig::default() };
        let body = vec![pos(0, 0), pos(1, 0), pos(1, 1), pos(0, 1), pos(0, 0)];

        for seed in 0..20 {
            let snake = Snake::from_body(body.clone(), None);
            let mut state = GameState::with_parts(&config, snake, Fruit::at(pos(0, 0)), GameRng::new(seed));

            assert!(state.collision().is_some());
            assert!(state.snake().covers_behind_head(state.fruit().pos()), "seed {}", seed);
        }
    }

    #[test]
    fn test_single_retry_can_land_on_body_where_until_free_does_not() {
        // 3x3 board with only (2, 2) left free.
        let body = vec![pos(0, 0), pos(1, 0), pos(2, 0), pos(2, 1), pos(1, 1), pos(0, 1), pos(0, 2), pos(1, 2)];
        let single = GameConfig { grid_size: 3, ..GameConfig::default() };
        let until_free = GameConfig { grid_size: 3, fruit_placement: FruitPlacement::UntilFree, ..GameConfig::default() };
        let mut on_body = 0;

        for seed in 0..50 {
            let snake = Snake::from_body(body.clone(), None);
            let mut state = GameState::with_parts(&single, snake, Fruit::at(pos(0, 0)), GameRng::new(seed));
            state.collision();
            if state.snake().covers_behind_head(state.fruit().pos()) {
                on_body += 1;

                let snake = Snake::from_body(body.clone(), None);
                let mut state = GameState::with_parts(&until_free, snake, Fruit::at(pos(0, 0)), GameRng::new(seed));
                state.collision();
                assert_eq!(state.fruit().pos(), pos(2, 2), "seed {}", seed);
            }
        }

        assert!(on_body > 0);
    }

    #[test]
    fn test_until_free_never_lands_on_body() {
        let config = GameConfig { grid_size: 5, fruit_placement: FruitPlacement::UntilFree, ..GameConfig::default() };
        for seed in 0..50 {
            // Snake fills most of a tiny board.
            let body: Vec<Position> = (0..5).map(|x| pos(x, 1)).chain((0..5).rev().map(|x| pos(x, 2))).collect();
            let mut state = GameState::with_parts(&config, Snake::from_body(body, Some(Up)), Fruit::at(pos(0, 0)), GameRng::new(seed));
            state.update();

            assert_eq!(state.score(), 1);
            assert!(!state.snake().body().contains(&state.fruit().pos()), "seed {}", seed);
        }
    }

    #[test]
    fn test_leaving_board_resets() {
        let mut state = state_with(vec![pos(0, 5), pos(1, 5), pos(2, 5)], Some(Left), pos(10, 10), 1);
        state.score = 7;

        let events = state.update();

        assert_eq!(events, vec![GameEvent::Reset { reason: FailReason::OutOfBounds, score: 7 }]);
        assert_eq!(state.snake().body(), initial_body().as_slice());
        assert_eq!(state.snake().direction(), None);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_leaving_board_on_every_side() {
        let cases = [
            (vec![pos(5, 0), pos(5, 1), pos(5, 2)], Up),
            (vec![pos(5, 19), pos(5, 18), pos(5, 17)], Down),
            (vec![pos(0, 5), pos(1, 5), pos(2, 5)], Left),
            (vec![pos(19, 5), pos(18, 5), pos(17, 5)], Right),
        ];

        for (body, dir) in cases {
            let mut state = state_with(body, Some(dir), pos(10, 10), 1);
            let events = state.update();
            assert!(matches!(events.as_slice(), [GameEvent::Reset { reason: FailReason::OutOfBounds, .. }]), "{:?}", dir);
        }
    }

    #[test]
    fn test_self_collision_resets() {
        let mut state = state_with(vec![pos(5, 5), pos(6, 5), pos(5, 5)], None, pos(10, 10), 1);
        state.score = 3;

        let event = state.check_fail();

        assert_eq!(event, Some(GameEvent::Reset { reason: FailReason::SelfCollision, score: 3 }));
        assert_eq!(state.snake().body(), initial_body().as_slice());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_running_into_own_body() {
        // Head turns down into the segment below it.
        let body = vec![pos(5, 5), pos(6, 5), pos(6, 6), pos(5, 6), pos(4, 6)];
        let mut state = state_with(body, Some(Down), pos(10, 10), 1);
        let events = state.update();
        assert_eq!(events, vec![GameEvent::Reset { reason: FailReason::SelfCollision, score: 0 }]);
    }

    #[test]
    fn test_reset_keeps_fruit() {
        let mut state = state_with(vec![pos(0, 5), pos(1, 5), pos(2, 5)], Some(Left), pos(3, 3), 1);
        state.update();
        assert_eq!(state.fruit().pos(), pos(3, 3));
    }

    #[test]
    fn test_check_fail_passes_healthy_snake() {
        let mut state = state_with(vec![pos(5, 5), pos(6, 5), pos(7, 5)], Some(Left), pos(3, 3), 1);
        assert_eq!(state.check_fail(), None);
        assert_eq!(state.snake().body().len(), 3);
    }
}
