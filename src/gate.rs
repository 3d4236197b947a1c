use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether the pursuer takes its step this tick.
pub trait MoveGate {
    fn allow(&mut self) -> bool;
}

/// Bernoulli draw from a `rand` generator, independent on every call.
pub struct CoinFlip<R: Rng> {
    rng: R,
    probability: f64,
}

impl<R: Rng> CoinFlip<R> {
    /// `probability` is clamped to `[0, 1]`; NaN counts as 0.
    pub fn new(rng: R, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { rng, probability }
    }

    pub fn fair(rng: R) -> Self {
        Self::new(rng, 0.5)
    }
}

impl CoinFlip<StdRng> {
    pub fn seeded(seed: u64, probability: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), probability)
    }
}

impl<R: Rng> MoveGate for CoinFlip<R> {
    fn allow(&mut self) -> bool {
        self.rng.gen_bool(self.probability)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedGate(pub bool);

impl MoveGate for FixedGate {
    fn allow(&mut self) -> bool {
        self.0
    }
}

impl<F: FnMut() -> bool> MoveGate for F {
    fn allow(&mut self) -> bool {
        self()
    }
}
