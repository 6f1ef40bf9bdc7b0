//! Piece selection
//!
//! Selection is uniform and independent per spawn: every kind has the same
//! 1-in-7 chance each time, droughts and repeats included. The source sits
//! behind a one-method trait so tests can feed scripted sequences.

use crate::tetromino::TetrominoKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplier of the next piece kind
pub trait PieceSource {
    fn next_kind(&mut self) -> TetrominoKind;
}

/// Uniform random piece selection backed by a seedable PRNG
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Create a source with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a source with a fixed seed (reproducible games)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSource for RandomSource {
    fn next_kind(&mut self) -> TetrominoKind {
        let kinds = TetrominoKind::all();
        kinds[self.rng.gen_range(0..kinds.len())]
    }
}
