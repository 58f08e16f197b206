//! Generalized median strings.
//!
//! A median of a weighted collection of strings is a string with small
//! weighted sum of distances (SOD) to the collection. The exact median is
//! intractable, so this module offers the classic approximation ladder:
//!
//! - [`greedy_median`]: grow a candidate symbol by symbol, always appending
//!   the most promising symbol.
//! - [`median_improve`]: perturb an existing candidate position by position
//!   (replace / insert / delete), never making it worse.
//! - [`quick_median`]: a one-shot positional vote, cheapest and roughest.
//! - [`set_median`]: the best median among the input strings themselves.
//!
//! The greedy and improvement algorithms share one piece of machinery: for
//! every input string they cache the cost-matrix row of the current median
//! prefix against that string, extending it incrementally as the median
//! grows (`row[0]` always equals the committed prefix length).

mod greedy;
mod improve;
mod quick;
mod set;

pub use greedy::greedy_median;
pub use improve::median_improve;
pub use quick::quick_median;
pub use set::{set_median, set_median_index};

use crate::distance::Row;
use crate::symbol::Symbol;

/// One cached row per input string, describing the empty median prefix.
pub(crate) fn initial_rows<S: Symbol>(strings: &[&[S]]) -> Vec<Row> {
    strings
        .iter()
        .map(|string| (0..=string.len()).collect())
        .collect()
}

/// Extend a cached row by one median symbol, in place.
///
/// `row` must describe the matrix row of the previous median prefix against
/// `string`; afterwards it describes the prefix of length `new_prefix_len`
/// ending in `symbol`, with `row[0] == new_prefix_len`.
pub(crate) fn commit_symbol<S: Symbol>(
    row: &mut Row,
    string: &[S],
    symbol: S,
    new_prefix_len: usize,
) {
    let mut prev_diag = row[0];
    row[0] = new_prefix_len;
    let mut x = new_prefix_len;
    for (j, &c) in string.iter().enumerate() {
        let diag = prev_diag + usize::from(symbol != c);
        prev_diag = row[j + 1];
        x += 1;
        if x > diag {
            x = diag;
        }
        let up = prev_diag + 1;
        if x > up {
            x = up;
        }
        row[j + 1] = x;
    }
}

/// Weighted sum of distances of `candidate` to the collection, computed
/// from scratch. Test helper shared by the submodules.
#[cfg(test)]
pub(crate) fn sum_of_distances<S: Symbol>(
    candidate: &[S],
    strings: &[&[S]],
    weights: &[f64],
) -> f64 {
    use crate::distance::{CostModel, edit_distance};
    strings
        .iter()
        .zip(weights)
        .map(|(s, &w)| edit_distance(candidate, s, CostModel::Levenshtein) as f64 * w)
        .sum()
}
