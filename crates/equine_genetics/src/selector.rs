//! Weighted random choice over a discrete, insertion-ordered distribution.

use indexmap::IndexMap;
use rand::Rng;

fn usable(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// Picks one key with probability proportional to its weight.
///
/// Negative and non-finite weights are ignored for weighting. If nothing
/// carries weight, the first declared key is returned. `None` only for an
/// empty map, which callers treat as "omit this attribute".
///
/// Weights whose sum overflows `f64` are rescaled by the largest weight
/// first, so huge tables keep their proportions.
pub fn select_weighted<'a, K, R>(weights: &'a IndexMap<K, f64>, rng: &mut R) -> Option<&'a K>
where
    R: Rng + ?Sized,
{
    let (first, _) = weights.first()?;

    let usable_weights = || weights.values().copied().filter(|w| usable(*w));
    let mut scale = 1.0;
    let mut total: f64 = usable_weights().sum();
    if total.is_infinite() {
        scale = usable_weights().fold(0.0, f64::max);
        total = usable_weights().map(|w| w / scale).sum();
    }
    if total <= 0.0 || !total.is_finite() {
        return Some(first);
    }

    let mut remainder = rng.gen_range(0.0..total);
    let mut last_valid = None;
    for (key, &weight) in weights {
        if !usable(weight) {
            continue;
        }
        remainder -= weight / scale;
        if remainder < 0.0 {
            return Some(key);
        }
        if weight > 0.0 {
            last_valid = Some(key);
        }
    }

    // Only reachable through floating point drift.
    last_valid.or(Some(first))
}

/// Draws `true` with probability `p`. Never panics on out-of-range input:
/// anything outside [0, 1] (or NaN) is treated as 0.
pub(crate) fn chance<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    (0.0..=1.0).contains(&p) && rng.gen::<f64>() < p
}
