//! RNG module - uniform shape selection
//!
//! Every spawn picks one of the seven kinds uniformly at random (no bag).
//! Gifts pick uniformly between the two easy kinds (O and I).
//!
//! The generator is a small LCG so that a seed fully determines a session,
//! which the tests and the headless agent run rely on.

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform shape picker used by a session.
#[derive(Debug, Clone)]
pub struct ShapeRandomizer {
    rng: SimpleRng,
}

impl ShapeRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick one of the seven kinds.
    pub fn next_kind(&mut self) -> ShapeKind {
        let i = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[i]
    }

    /// Pick a gift kind (O or I).
    pub fn gift_kind(&mut self) -> ShapeKind {
        let i = self.rng.next_range(ShapeKind::GIFTS.len() as u32) as usize;
        ShapeKind::GIFTS[i]
    }

    /// Current generator state; reseeding a session with it continues the
    /// sequence instead of replaying it.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for ShapeRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
