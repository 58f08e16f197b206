//! Distances between collections of strings.
//!
//! Both metrics lift the single-string distance to whole collections: the
//! cost of replacing string `A` by string `B` is the length-normalized
//! `2 * d(A, B) / (|A| + |B|)` in `[0, 2]` (zero when both are empty),
//! with the inner distance taken under
//! [`CostModel::SplitSubstitution`](crate::CostModel::SplitSubstitution);
//! inserting or deleting a whole string costs 1.
//!
//! [`seq_distance`] respects the order of the collections and runs the same
//! single-row DP as the symbol-level distance, just with real-valued cells.
//! [`set_distance`] ignores order: it matches the two sides through the
//! assignment solver and charges the optimal pairing.

use smallvec::SmallVec;

use crate::distance::{CostModel, edit_distance};
use crate::munkres::minimum_assignment;
use crate::symbol::Symbol;

type FloatRow = SmallVec<[f64; 32]>;

/// Replace cost between two strings, normalized by their combined length.
fn fractional_cost<S: Symbol>(a: &[S], b: &[S]) -> f64 {
    let lensum = a.len() + b.len();
    if lensum == 0 {
        return 0.0;
    }
    edit_distance(a, b, CostModel::SplitSubstitution) as f64 / lensum as f64
}

/// Order-sensitive distance between two sequences of strings.
///
/// Bounded by `0 <= seq_distance(a, b) <= a.len() + b.len()`; zero exactly
/// for equal sequences.
pub fn seq_distance<S: Symbol>(source: &[&[S]], target: &[&[S]]) -> f64 {
    // strip runs of identical strings at both ends
    let mut a = source;
    let mut b = target;
    while let (Some(x), Some(y)) = (a.first(), b.first()) {
        if x != y {
            break;
        }
        a = &a[1..];
        b = &b[1..];
    }
    while let (Some(x), Some(y)) = (a.last(), b.last()) {
        if x != y {
            break;
        }
        a = &a[..a.len() - 1];
        b = &b[..b.len() - 1];
    }

    if a.is_empty() {
        return b.len() as f64;
    }
    if b.is_empty() {
        return a.len() as f64;
    }
    let (a, b) = if a.len() > b.len() { (b, a) } else { (a, b) };

    let l2 = b.len() + 1;
    let mut row: FloatRow = (0..l2).map(|j| j as f64).collect();
    for i in 1..=a.len() {
        let s1 = a[i - 1];
        // diag: previous row's diagonal cell, x: freshly written cell
        let mut diag = (i - 1) as f64;
        let mut x = i as f64;
        for j in 1..l2 {
            let q = diag + 2.0 * fractional_cost(s1, b[j - 1]);
            x += 1.0;
            if x > q {
                x = q;
            }
            let up = row[j];
            diag = up;
            if x > up + 1.0 {
                x = up + 1.0;
            }
            row[j] = x;
        }
    }
    row[l2 - 1]
}

/// Order-free distance between two sets of strings.
///
/// Builds the full matrix of fractional pairwise distances, solves the
/// assignment problem, and charges `(n2 - n1)` for the unmatched surplus
/// plus twice the fractional distance of every matched pair.
pub fn set_distance<S: Symbol>(source: &[&[S]], target: &[&[S]]) -> f64 {
    if source.is_empty() {
        return target.len() as f64;
    }
    if target.is_empty() {
        return source.len() as f64;
    }
    let (a, b) = if source.len() > target.len() {
        (target, source)
    } else {
        (source, target)
    };
    let columns = a.len();
    let rows = b.len();

    let mut costs = Vec::with_capacity(columns * rows);
    for &bi in b {
        for &aj in a {
            costs.push(fractional_cost(bi, aj));
        }
    }

    let map = minimum_assignment(&costs, columns, rows);

    let mut sum = (rows - columns) as f64;
    for (j, &i) in map.iter().enumerate() {
        sum += 2.0 * fractional_cost(a[j], b[i]);
    }
    sum
}

// =============================================================================
// Tests
// =============================================================================
