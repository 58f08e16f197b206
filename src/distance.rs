//! Single-row edit distance.
//!
//! Computes the Levenshtein distance between two symbol slices while keeping
//! only one row of the cost matrix alive.
//!
//! # Algorithm
//!
//! 1. Strip the common prefix and suffix; they never contribute cost.
//! 2. Answer trivial residuals directly (one side empty, shorter side of
//!    length 1).
//! 3. Run a single-row DP over the longer string.
//!
//! Under [`CostModel::Levenshtein`] the row is additionally *banded*: no
//! optimal path can cross the two corner triangles of width `half = l1/2`
//! of the matrix, so the active cell range starts past the upper triangle
//! and stops short of the lower one. The row is kept with
//! `row[0] = l1 - half - 1` so boundary reads shift with the band, and for
//! rows still inside the upper triangle a sentinel cell one past the active
//! end carries the band-border cost that the next row reads as its last
//! up-value.
//!
//! Under [`CostModel::SplitSubstitution`] a replacement costs as much as a
//! deletion plus an insertion, so the diagonal branch never beats the two
//! unit moves and the plain unbanded recurrence suffices.

use smallvec::{SmallVec, smallvec};

use crate::error::{EditError, EditResult};
use crate::symbol::Symbol;

/// One transient cost-matrix row; stays inline for typical string lengths.
pub(crate) type Row = SmallVec<[usize; 64]>;

// =============================================================================
// Public Types
// =============================================================================

/// Weighting of the replace operation.
///
/// Insertions and deletions always cost 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostModel {
    /// Replacement costs 1, the classic Levenshtein metric.
    #[default]
    Levenshtein,
    /// Replacement costs 2, i.e. it is priced as a deletion plus an
    /// insertion. This is the metric behind [`similarity_ratio`].
    SplitSubstitution,
}

// =============================================================================
// Public API
// =============================================================================

/// Compute the edit distance between `source` and `target`.
///
/// # Example
///
/// ```
/// use editkit::{CostModel, edit_distance};
///
/// assert_eq!(edit_distance(b"kitten", b"sitting", CostModel::Levenshtein), 3);
/// ```
pub fn edit_distance<S: Symbol>(source: &[S], target: &[S], costs: CostModel) -> usize {
    let (s1, s2) = strip_common(source, target);

    // Quick paths
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    // Keep the inner loop over the longer string
    let (s1, s2) = if s1.len() > s2.len() { (s2, s1) } else { (s1, s2) };

    // A single residual symbol is answered by membership; this fast path is
    // also what keeps the band entry conditions below well-formed.
    if s1.len() == 1 {
        let hit = s2.contains(&s1[0]);
        return match costs {
            CostModel::Levenshtein => s2.len() - usize::from(hit),
            CostModel::SplitSubstitution => s2.len() + 1 - 2 * usize::from(hit),
        };
    }

    match costs {
        CostModel::Levenshtein => banded_distance(s1, s2),
        CostModel::SplitSubstitution => split_distance(s1, s2),
    }
}

/// Number of positions at which two equally long strings differ.
pub fn hamming_distance<S: Symbol>(left: &[S], right: &[S]) -> EditResult<usize> {
    if left.len() != right.len() {
        return Err(EditError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left.iter().zip(right).filter(|(a, b)| a != b).count())
}

/// Normalized similarity in `[0, 1]`.
///
/// Defined as `(|a| + |b| - d) / (|a| + |b|)` where `d` is the
/// [`CostModel::SplitSubstitution`] distance; two empty strings are fully
/// similar.
pub fn similarity_ratio<S: Symbol>(left: &[S], right: &[S]) -> f64 {
    let lensum = left.len() + right.len();
    if lensum == 0 {
        return 1.0;
    }
    let dist = edit_distance(left, right, CostModel::SplitSubstitution);
    (lensum - dist) as f64 / lensum as f64
}

// =============================================================================
// Core
// =============================================================================

/// Drop the common prefix and the common suffix of both slices.
pub(crate) fn strip_common<'a, S: Symbol>(mut a: &'a [S], mut b: &'a [S]) -> (&'a [S], &'a [S]) {
    let mut prefix = 0;
    let bound = a.len().min(b.len());
    while prefix < bound && a[prefix] == b[prefix] {
        prefix += 1;
    }
    a = &a[prefix..];
    b = &b[prefix..];

    let mut suffix = 0;
    let bound = a.len().min(b.len());
    while suffix < bound && a[a.len() - 1 - suffix] == b[b.len() - 1 - suffix] {
        suffix += 1;
    }
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}

/// Banded unit-cost distance. Requires `2 <= s1.len() <= s2.len()`.
fn banded_distance<S: Symbol>(s1: &[S], s2: &[S]) -> usize {
    let l1 = s1.len() + 1;
    let l2 = s2.len() + 1;
    let half = l1 / 2;

    // Only the cells left of the upper corner triangle are ever read from
    // the virtual row 0; row[0] holds the shifted boundary value.
    let mut row: Row = smallvec![0; l2];
    for (j, cell) in row.iter_mut().enumerate().take(l2 - half) {
        *cell = j;
    }
    row[0] = l1 - half - 1;

    let mut end = l2 - 1;
    for i in 1..l1 {
        let c1 = s1[i - 1];
        // p: next cell to write, jc: next s2 index to compare,
        // d: previous row's cell left of p, plus one, x: cell left of p.
        let (mut p, mut jc, mut d, mut x);
        if i >= l1 - half {
            // Entering through the band boundary: the first active cell is
            // seeded from the shifted diagonal instead of column 0.
            let offset = i - (l1 - half);
            let c3 = row[offset] + usize::from(c1 != s2[offset]);
            x = row[offset + 1] + 1;
            d = x;
            if x > c3 {
                x = c3;
            }
            row[offset + 1] = x;
            p = offset + 2;
            jc = offset + 1;
        } else {
            p = 1;
            jc = 0;
            d = i;
            x = i;
        }
        // Active range still grows while inside the upper triangle.
        if i <= half + 1 {
            end = l2 + i - half - 2;
        }
        while p <= end {
            d -= 1;
            let c3 = d + usize::from(c1 != s2[jc]);
            jc += 1;
            x += 1;
            if x > c3 {
                x = c3;
            }
            d = row[p] + 1;
            if x > d {
                x = d;
            }
            row[p] = x;
            p += 1;
        }
        // Band-border sentinel, one past the active end; the next row reads
        // it as its final up-value. Placing it past `end` (rather than on
        // it) is what keeps the 2x2 residual case exact.
        if i <= half {
            d -= 1;
            let c3 = d + usize::from(c1 != s2[jc]);
            x += 1;
            if x > c3 {
                x = c3;
            }
            row[end + 1] = x;
        }
    }
    row[end]
}

/// Unbanded distance with replace = delete + insert.
/// Requires `1 <= s1.len() <= s2.len()`.
fn split_distance<S: Symbol>(s1: &[S], s2: &[S]) -> usize {
    let l2 = s2.len() + 1;
    let mut row: Row = (0..l2).collect();

    for i in 1..=s1.len() {
        let c1 = s1[i - 1];
        // d: previous row's diagonal cell, plus one; x: freshly written cell.
        let mut d = i;
        let mut x = i;
        for j in 1..l2 {
            if c1 == s2[j - 1] {
                d -= 1;
                x = d;
            } else {
                x += 1;
            }
            let up = row[j] + 1;
            if x > up {
                x = up;
            }
            d = up;
            row[j] = x;
        }
    }
    row[l2 - 1]
}

// =============================================================================
// Tests
// =============================================================================
