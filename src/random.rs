//! Randomness primitives. Every randomised routine in this crate draws from an
//! injected [`Rand`] source, keeping simulations replayable from a seed.

use tinyrand::Rand;

use crate::probs::SliceExt;

#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64
}

/// Single Bernoulli trial: `true` with probability `prob`.
#[inline]
pub fn chance(prob: f64, rand: &mut impl Rand) -> bool {
    random_f64(rand) < prob
}

/// Draws one index from a weighted categorical distribution. The probability of
/// selecting index `i` is `weights[i] / sum(weights)`; the weights need not sum
/// to 1. If every weight is zero, the last index is returned. The slice must be
/// nonempty and is never mutated.
pub fn pick_weighted(weights: &[f64], rand: &mut impl Rand) -> usize {
    debug_assert!(!weights.is_empty());
    debug_assert!(validate_weights(weights));

    let mut remaining = random_f64(rand) * weights.sum();
    for (index, &weight) in weights.iter().enumerate() {
        if remaining < weight {
            return index;
        }
        remaining -= weight;
    }
    weights.len() - 1
}

/// Uniform draw from `0..count`.
#[inline]
pub fn pick_uniform(count: usize, rand: &mut impl Rand) -> usize {
    debug_assert!(count > 0);
    rand.next_lim_usize(count)
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rand: &mut impl Rand) {
    for index in (1..items.len()).rev() {
        let other = rand.next_lim_usize(index + 1);
        items.swap(index, other);
    }
}

fn validate_weights(weights: &[f64]) -> bool {
    for &weight in weights {
        debug_assert!(weight >= 0.0, "invalid weights {weights:?}");
        debug_assert!(weight.is_finite(), "invalid weights {weights:?}");
    }
    true
}
