//! Median selection among the inputs themselves.

use crate::INFINITY;
use crate::distance::{CostModel, edit_distance};
use crate::symbol::Symbol;

/// Index of the input string with the smallest weighted sum of distances
/// to all the others. `None` for an empty collection.
///
/// Pairwise distances are computed lazily into a triangular cache and each
/// candidate is abandoned as soon as its partial sum reaches the best total
/// seen so far, so many of the `n·(n−1)/2` pairs are never evaluated.
///
/// # Panics
///
/// Panics if `strings` and `weights` differ in length.
pub fn set_median_index<S: Symbol>(strings: &[&[S]], weights: &[f64]) -> Option<usize> {
    assert_eq!(
        strings.len(),
        weights.len(),
        "one weight per input string"
    );
    let n = strings.len();
    if n == 0 {
        return None;
    }

    // pair (hi, lo) with lo < hi lives at hi*(hi-1)/2 + lo
    let mut cache: Vec<Option<usize>> = vec![None; n * (n - 1) / 2];
    let mut best_index = 0;
    let mut best_dist = INFINITY;

    for i in 0..n {
        let mut dist = 0.0;
        let mut j = 0;
        // pairs with smaller index may be cached from earlier candidates;
        // ones skipped back then are simply recomputed
        while j < i && dist < best_dist {
            let d = cache[i * (i - 1) / 2 + j].unwrap_or_else(|| {
                edit_distance(strings[j], strings[i], CostModel::Levenshtein)
            });
            dist += weights[j] * d as f64;
            j += 1;
        }
        j += 1; // no distance of a string to itself
        while j < n && dist < best_dist {
            let d = edit_distance(strings[j], strings[i], CostModel::Levenshtein);
            cache[j * (j - 1) / 2 + i] = Some(d);
            dist += weights[j] * d as f64;
            j += 1;
        }
        if dist < best_dist {
            best_dist = dist;
            best_index = i;
        }
    }
    Some(best_index)
}

/// A copy of the input string selected by [`set_median_index`].
pub fn set_median<S: Symbol>(strings: &[&[S]], weights: &[f64]) -> Option<Vec<S>> {
    set_median_index(strings, weights).map(|i| strings[i].to_vec())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force_index(strings: &[&[u8]], weights: &[f64]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for i in 0..strings.len() {
            let dist: f64 = (0..strings.len())
                .filter(|&j| j != i)
                .map(|j| {
                    weights[j]
                        * edit_distance(strings[i], strings[j], CostModel::Levenshtein) as f64
                })
                .sum();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_obvious_center() {
        let strings: Vec<&[u8]> = vec![b"spam", b"spam", b"eggs"];
        assert_eq!(set_median_index(&strings, &[1.0, 1.0, 1.0]), Some(0));
        assert_eq!(
            set_median(&strings, &[1.0, 1.0, 1.0]).as_deref(),
            Some(b"spam".as_slice())
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(set_median_index::<u8>(&[], &[]), None);
        let strings: Vec<&[u8]> = vec![b"only"];
        assert_eq!(set_median_index(&strings, &[1.0]), Some(0));
    }

    #[test]
    fn test_weights_decide() {
        let strings: Vec<&[u8]> = vec![b"aaaa", b"bbbb"];
        // the heavier neighbor pulls the median to itself
        assert_eq!(set_median_index(&strings, &[1.0, 9.0]), Some(1));
        assert_eq!(set_median_index(&strings, &[9.0, 1.0]), Some(0));
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(79);
        for _ in 0..500 {
            let n = rng.gen_range(1..=6);
            let strings: Vec<Vec<u8>> = (0..n)
                .map(|_| {
                    let len = rng.gen_range(0..=6);
                    (0..len).map(|_| b"abc"[rng.gen_range(0..3)]).collect()
                })
                .collect();
            let weights: Vec<f64> = (0..n)
                .map(|_| [0.5, 1.0, 2.0][rng.gen_range(0..3)])
                .collect();
            let v: Vec<&[u8]> = strings.iter().map(Vec::as_slice).collect();
            let got = set_median_index(&v, &weights).unwrap();
            let want = brute_force_index(&v, &weights);
            // indices may differ only on exact SOD ties
            let sod = |i: usize| -> f64 {
                (0..n)
                    .filter(|&j| j != i)
                    .map(|j| {
                        weights[j]
                            * edit_distance(v[i], v[j], CostModel::Levenshtein) as f64
                    })
                    .sum()
            };
            assert!(
                (sod(got) - sod(want)).abs() < 1e-9,
                "set median picked {got} (SOD {}) over {want} (SOD {})",
                sod(got),
                sod(want)
            );
        }
    }
}
