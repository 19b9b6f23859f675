use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of every random decision the core makes (hit rolls, opponent picks).
pub trait Dice {
    /// Uniform integer in `1..=100`.
    fn percent(&mut self) -> u32;
    /// Uniform index in `0..len`. Returns 0 when `len <= 1`.
    fn index(&mut self, len: usize) -> usize;
}

#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn percent(&mut self) -> u32 {
        self.rng.random_range(1..=100)
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Dice backed by `Math.random()`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDice;

#[cfg(target_arch = "wasm32")]
impl Dice for BrowserDice {
    fn percent(&mut self) -> u32 {
        (js_sys::Math::random() * 100.0).floor() as u32 + 1
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        ((js_sys::Math::random() * len as f64).floor() as usize).min(len - 1)
    }
}
