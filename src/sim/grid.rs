//! Grid initialization rules
//!
//! A grid is a row-major `width * height` array of f32 cells. The fill rules
//! here run on the CPU exactly once per grid, at startup, before the first
//! compute dispatch. Keeping them as pure functions makes the initialization
//! policy testable without a GPU.

use rand::rngs::StdRng;
use rand::Rng;

/// Per-cell initialization rule for a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitRule {
    /// Every cell set to 1.0.
    Ones,
    /// Every cell set to 0.0.
    Zeros,
    /// Each cell alive (1.0) with the given probability, else dead (0.0).
    Sparse(f64),
}

/// Evaluates `rule` for every cell of a `width * height` grid.
///
/// The RNG is only consulted for [`InitRule::Sparse`]; constant fills leave
/// the stream untouched so channel initialization order does not perturb the
/// stochastic channel.
pub fn fill_cells(rule: InitRule, width: u32, height: u32, rng: &mut StdRng) -> Vec<f32> {
    let len = (width * height) as usize;
    match rule {
        InitRule::Ones => vec![1.0; len],
        InitRule::Zeros => vec![0.0; len],
        InitRule::Sparse(p) => (0..len)
            .map(|_| if rng.random_bool(p) { 1.0 } else { 0.0 })
            .collect(),
    }
}
