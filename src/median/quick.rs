//! Voting median.

use rustc_hash::FxHashMap;

use crate::symbol::{Symbol, SymbolSet};

/// Elect an approximate median by weighted positional voting.
///
/// The output length is the weighted mean input length, rounded as
/// `floor(mean + 0.499999)`, so an exact half rounds *down*. Output position `j` maps onto the interval
/// `[|Sᵢ|·j/L, |Sᵢ|·(j+1)/L]` of every input string: symbols wholly inside
/// vote with the string's full weight, the fractional head and tail vote
/// proportionally. The symbol with the highest total wins; ties go to the
/// lowest symbol.
///
/// Much cheaper than [`greedy_median`](crate::greedy_median) and usually
/// much rougher; a common combination is seeding
/// [`median_improve`](crate::median_improve) with this result.
///
/// # Panics
///
/// Panics if `strings` and `weights` differ in length.
pub fn quick_median<S: Symbol>(strings: &[&[S]], weights: &[f64]) -> Vec<S> {
    assert_eq!(
        strings.len(),
        weights.len(),
        "one weight per input string"
    );
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return Vec::new();
    }
    let weighted_len: f64 = strings
        .iter()
        .zip(weights)
        .map(|(s, &w)| s.len() as f64 * w)
        .sum();
    let target_len = (weighted_len / total_weight + 0.499999).floor() as usize;
    if target_len == 0 {
        return Vec::new();
    }

    let symbols = SymbolSet::collect(strings);
    if symbols.is_empty() {
        return Vec::new();
    }
    let index: FxHashMap<S, usize> = symbols
        .symbols()
        .iter()
        .copied()
        .enumerate()
        .map(|(i, symbol)| (symbol, i))
        .collect();

    let mut votes = vec![0.0f64; symbols.len()];
    let mut median = Vec::with_capacity(target_len);

    for j in 0..target_len {
        votes.fill(0.0);
        for (&string, &weight) in strings.iter().zip(weights) {
            let len = string.len();
            if len == 0 {
                continue;
            }
            let span = len as f64 / target_len as f64;
            let start = span * j as f64;
            let end = start + span;
            let istart = (start.floor() as usize).min(len - 1);
            let iend = (end.ceil() as usize).min(len);

            // whole symbols strictly inside the interval
            for k in istart + 1..iend {
                votes[index[&string[k]]] += weight;
            }
            // fractional head; the tail was over-counted above and gives
            // its overshoot back
            votes[index[&string[istart]]] += weight * ((istart + 1) as f64 - start);
            votes[index[&string[iend - 1]]] -= weight * (iend as f64 - end);
        }

        let mut winner = 0;
        for i in 1..votes.len() {
            if votes[i] > votes[winner] {
                winner = i;
            }
        }
        median.push(symbols.symbols()[winner]);
    }
    median
}

// =============================================================================
// Tests
// =============================================================================
