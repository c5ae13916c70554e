use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded source of randomness owned by the game, so that a run can be
/// replayed from its seed.
pub struct GameRng {
    rng: StdRng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        GameRng { rng: StdRng::seed_from_u64(seed), seed }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        let xs: Vec<i32> = (0..16).map(|_| a.random_range(0..20)).collect();
        let ys: Vec<i32> = (0..16).map(|_| b.random_range(0..20)).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_range_is_respected() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let v: i32 = rng.random_range(0..20);
            assert!((0..20).contains(&v));
        }
    }
}
