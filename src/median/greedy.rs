//! Greedy generalized median.

use crate::INFINITY;
use crate::median::{commit_symbol, initial_rows};
use crate::symbol::{Symbol, SymbolSet};

/// Grow an approximate median symbol by symbol.
///
/// At each step every known symbol is tried as the next character: the
/// candidate rows are simulated one step ahead for every input string and
/// the symbol with the smallest weighted sum of simulated row minima wins.
/// The row minimum looks further ahead than the row-end cell alone (a
/// small row minimum means the grown median can still reach that string
/// cheaply) at no extra asymptotic cost.
///
/// Growth is capped at `2 * maxlen + 1` symbols and stops early once the
/// candidate is longer than every input and its total distance starts
/// rising. The returned string is the recorded prefix with the smallest
/// total distance, which may be empty.
///
/// # Panics
///
/// Panics if `strings` and `weights` differ in length.
pub fn greedy_median<S: Symbol>(strings: &[&[S]], weights: &[f64]) -> Vec<S> {
    assert_eq!(
        strings.len(),
        weights.len(),
        "one weight per input string"
    );
    let symbols = SymbolSet::collect(strings);
    if symbols.is_empty() {
        return Vec::new();
    }
    let maxlen = strings.iter().map(|s| s.len()).max().unwrap_or(0);
    let stoplen = 2 * maxlen + 1;

    let mut rows = initial_rows(strings);
    let mut median: Vec<S> = Vec::with_capacity(stoplen);
    // mediandist[len] = total distance of the candidate truncated to `len`;
    // the empty prefix costs every string its full length
    let mut mediandist: Vec<f64> = Vec::with_capacity(stoplen + 1);
    mediandist.push(
        strings
            .iter()
            .zip(weights)
            .map(|(s, &w)| s.len() as f64 * w)
            .sum(),
    );

    for len in 1..=stoplen {
        let mut best_minsum = INFINITY;
        let mut best_total = 0.0;
        let mut best_symbol = None;

        for &symbol in symbols.symbols() {
            let mut totaldist = 0.0;
            let mut minsum = 0.0;
            for (row, (&string, &weight)) in rows.iter().zip(strings.iter().zip(weights)) {
                // simulate the row that appending `symbol` would produce;
                // its cell 0 equals `len`, so seeding `min` with `len`
                // makes it the true row minimum
                let mut min = len;
                let mut x = len;
                for (j, &c) in string.iter().enumerate() {
                    let diag = row[j] + usize::from(symbol != c);
                    x += 1;
                    if x > diag {
                        x = diag;
                    }
                    let up = row[j + 1] + 1;
                    if x > up {
                        x = up;
                    }
                    if x < min {
                        min = x;
                    }
                }
                minsum += min as f64 * weight;
                totaldist += x as f64 * weight;
            }
            if minsum < best_minsum {
                best_minsum = minsum;
                best_total = totaldist;
                best_symbol = Some(symbol);
            }
        }

        let symbol = best_symbol.expect("symbol set is not empty");
        median.push(symbol);
        mediandist.push(best_total);

        // growing past every input only continues while it still pays off
        if len == stoplen || (len > maxlen && mediandist[len] > mediandist[len - 1]) {
            break;
        }

        for (row, &string) in rows.iter_mut().zip(strings) {
            commit_symbol(row, string, symbol, len);
        }
    }

    let mut bestlen = 0;
    for (len, &dist) in mediandist.iter().enumerate() {
        if dist < mediandist[bestlen] {
            bestlen = len;
        }
    }
    median.truncate(bestlen);
    median
}

// =============================================================================
// Tests
// =============================================================================
