//! Weighted choice over labelled outcomes.
//!
//! Every weighted draw in the engine (runs off the bat, dismissal type)
//! goes through `WeightedChoice`: an ordered list of `(label, weight)` pairs
//! sampled by cumulative weight.
//!
//! ```
//! use cricket_sim::core::{MatchRng, WeightedChoice};
//!
//! let mut rng = MatchRng::new(1);
//! let choice = WeightedChoice::new([("dot", 3.0), ("single", 1.0)]);
//!
//! let label = choice.sample(&mut rng).unwrap();
//! assert!(label == "dot" || label == "single");
//! ```

use smallvec::SmallVec;

use super::rng::MatchRng;

/// Ordered `(label, weight)` pairs.
///
/// Negative and non-finite weights are stored as zero. Order matters: it
/// decides which label wins at cumulative-sum boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedChoice<L> {
    entries: SmallVec<[(L, f64); 8]>,
}

impl<L: Copy> WeightedChoice<L> {
    /// Build from ordered pairs.
    pub fn new(entries: impl IntoIterator<Item = (L, f64)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(label, weight)| (label, sanitize(weight)))
            .collect();
        Self { entries }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Number of entries (including zero-weight ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(label, weight)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (L, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Weight of the first entry with this label, or 0.
    #[must_use]
    pub fn weight_of(&self, label: L) -> f64
    where
        L: PartialEq,
    {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0.0, |(_, w)| *w)
    }

    /// Rescale so the weights sum to 1.
    ///
    /// Returns `None` if the total is not positive and finite.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let total = self.total();
        if !(total > 0.0 && total.is_finite()) {
            return None;
        }
        Some(Self {
            entries: self.entries.iter().map(|&(l, w)| (l, w / total)).collect(),
        })
    }

    /// Draw a label.
    ///
    /// Draws uniformly in `[0, total)` and walks the cumulative sums; the
    /// first label whose cumulative weight reaches the draw wins. Always
    /// consumes exactly one draw, even when the result is `None` (all
    /// weights zero or no entries).
    pub fn sample(&self, rng: &mut MatchRng) -> Option<L> {
        let total = self.total();
        let threshold = rng.next_f64() * total;

        if !(total > 0.0 && total.is_finite()) {
            return None;
        }

        let mut cumulative = 0.0;
        for &(label, weight) in &self.entries {
            cumulative += weight;
            if weight > 0.0 && cumulative >= threshold {
                return Some(label);
            }
        }

        // Floating point edge case - return last non-zero weight
        self.entries
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(l, _)| *l)
    }
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heavily_weighted() {
        let mut rng = MatchRng::new(42);
        let choice = WeightedChoice::new([(0u8, 100.0), (1, 0.0), (2, 0.0)]);

        for _ in 0..20 {
            assert_eq!(choice.sample(&mut rng), Some(0));
        }
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let mut rng = MatchRng::new(3);
        let choice = WeightedChoice::new([('a', 0.0), ('b', 1.0), ('c', 0.0)]);

        for _ in 0..200 {
            assert_eq!(choice.sample(&mut rng), Some('b'));
        }
    }

    #[test]
    fn test_empty_and_zero() {
        let mut rng = MatchRng::new(42);

        let empty: WeightedChoice<u8> = WeightedChoice::new([]);
        assert_eq!(empty.sample(&mut rng), None);
        assert!(empty.is_empty());

        let zeros = WeightedChoice::new([(1u8, 0.0), (2, 0.0)]);
        assert_eq!(zeros.sample(&mut rng), None);
    }

    #[test]
    fn test_sample_consumes_one_draw_even_when_empty() {
        let mut a = MatchRng::new(5);
        let mut b = MatchRng::new(5);

        let zeros = WeightedChoice::new([(1u8, 0.0)]);
        assert_eq!(zeros.sample(&mut a), None);
        b.next_f64();

        assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
    }

    #[test]
    fn test_negative_and_nan_sanitized() {
        let choice = WeightedChoice::new([(1u8, -2.0), (2, f64::NAN), (3, 0.5)]);
        assert_eq!(choice.total(), 0.5);
        assert_eq!(choice.weight_of(1), 0.0);
        assert_eq!(choice.weight_of(3), 0.5);
    }

    #[test]
    fn test_normalized() {
        let choice = WeightedChoice::new([(1u8, 2.0), (2, 6.0)]);
        let norm = choice.normalized().unwrap();

        assert!((norm.total() - 1.0).abs() < 1e-12);
        assert!((norm.weight_of(1) - 0.25).abs() < 1e-12);

        let zeros = WeightedChoice::new([(1u8, 0.0)]);
        assert!(zeros.normalized().is_none());
    }

    #[test]
    fn test_frequencies_roughly_match_weights() {
        let mut rng = MatchRng::new(99);
        let choice = WeightedChoice::new([(0usize, 1.0), (1, 3.0)]);

        let mut counts = [0u32; 2];
        for _ in 0..10_000 {
            counts[choice.sample(&mut rng).unwrap()] += 1;
        }

        let share = counts[1] as f64 / 10_000.0;
        assert!((share - 0.75).abs() < 0.03, "share was {}", share);
    }
}
