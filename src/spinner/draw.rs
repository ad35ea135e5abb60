use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of spin outcomes. Implementations must return an index in `0..len`
/// for any `len >= 1`.
pub trait Draw: Send {
    fn draw_index(&mut self, len: usize) -> usize;
}

/// Uniform draw over a random number generator
pub struct RngDraw<R> {
    rng: R,
}

impl<R: Rng + Send> RngDraw<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraw<StdRng> {
    /// Reproducible draws for tests and `spinner.seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl<R: Rng + Send> Draw for RngDraw<R> {
    fn draw_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len.max(1))
    }
}

/// Replays a fixed list of indices (wrapped into range), cycling when exhausted
pub struct ScriptedDraw {
    indices: Vec<usize>,
    position: usize,
}

impl ScriptedDraw {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            position: 0,
        }
    }
}

impl Draw for ScriptedDraw {
    fn draw_index(&mut self, len: usize) -> usize {
        let len = len.max(1);
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.position % self.indices.len()];
        self.position += 1;
        index % len
    }
}
