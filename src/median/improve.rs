//! Median improvement by local perturbation.

use crate::distance::Row;
use crate::median::{commit_symbol, initial_rows};
use crate::script::OpKind;
use crate::symbol::{Symbol, SymbolSet};

/// Improve a candidate median by a single left-to-right perturbation pass.
///
/// At every position the current symbol competes against replacing it with
/// any other known symbol, inserting any symbol before it, or deleting it;
/// the strictly best option is applied before moving on. The result's
/// weighted sum of distances never exceeds the seed's; in the worst case
/// the seed comes back unchanged.
///
/// The per-string cost rows always describe the *committed* median prefix
/// left of the cursor; each perturbation is priced by completing the
/// matrix from the cached row over the (possibly perturbed) median tail.
///
/// # Panics
///
/// Panics if `strings` and `weights` differ in length.
pub fn median_improve<S: Symbol>(seed: &[S], strings: &[&[S]], weights: &[f64]) -> Vec<S> {
    assert_eq!(
        strings.len(),
        weights.len(),
        "one weight per input string"
    );
    let symbols = SymbolSet::collect(strings);
    if symbols.is_empty() {
        // with only empty strings in the collection, the empty string is
        // the exact median
        return Vec::new();
    }

    let mut rows = initial_rows(strings);
    let mut scratch = Row::new();

    // `buf[0]` is a sentinel slot: inserting at position 0 is simulated by
    // overwriting the slot *before* the tail, so the tail view must be able
    // to start one step left of the median itself
    let mut buf: Vec<S> = Vec::with_capacity(seed.len() + 1);
    buf.push(symbols.symbols()[0]);
    buf.extend_from_slice(seed);
    let mut medlen = seed.len();

    let mut best = finish_distance(&buf[1..=medlen], strings, weights, &rows, &mut scratch);

    let mut pos = 0;
    while pos <= medlen {
        let mut operation = OpKind::Keep;
        let mut winner = None;

        // replace the symbol under the cursor
        if pos < medlen {
            let original = buf[pos + 1];
            for &symbol in symbols.symbols() {
                if symbol == original {
                    continue;
                }
                buf[pos + 1] = symbol;
                let sum =
                    finish_distance(&buf[pos + 1..=medlen], strings, weights, &rows, &mut scratch);
                if sum < best {
                    best = sum;
                    winner = Some(symbol);
                    operation = OpKind::Replace;
                }
            }
            buf[pos + 1] = original;
        }

        // insert before the cursor, simulated by overwriting the slot left
        // of the tail and lengthening the tail by one
        {
            let original = buf[pos];
            for &symbol in symbols.symbols() {
                buf[pos] = symbol;
                let sum =
                    finish_distance(&buf[pos..=medlen], strings, weights, &rows, &mut scratch);
                if sum < best {
                    best = sum;
                    winner = Some(symbol);
                    operation = OpKind::Insert;
                }
            }
            buf[pos] = original;
        }

        // delete the symbol under the cursor
        if pos < medlen {
            let sum =
                finish_distance(&buf[pos + 2..=medlen], strings, weights, &rows, &mut scratch);
            if sum < best {
                best = sum;
                operation = OpKind::Delete;
            }
        }

        match operation {
            OpKind::Keep => {}
            OpKind::Replace => buf[pos + 1] = winner.expect("replace recorded a symbol"),
            OpKind::Insert => {
                buf.insert(pos + 1, winner.expect("insert recorded a symbol"));
                medlen += 1;
            }
            OpKind::Delete => {
                buf.remove(pos + 1);
                medlen -= 1;
            }
        }

        // after a delete the next symbol has already slid under the cursor
        // and the committed prefix is unchanged; everything else commits
        // the symbol now at the cursor and advances
        if operation != OpKind::Delete {
            if pos < medlen {
                let symbol = buf[pos + 1];
                for (row, &string) in rows.iter_mut().zip(strings) {
                    commit_symbol(row, string, symbol, pos + 1);
                }
            }
            pos += 1;
        }
    }

    buf.remove(0);
    buf
}

/// Complete the cached rows over the median tail `tail` and return the
/// weighted total distance.
///
/// Each cached row describes the committed median prefix whose length sits
/// in `row[0]`; the common suffix of tail and string is stripped first,
/// then the remaining matrix rows are computed into `scratch`.
fn finish_distance<S: Symbol>(
    tail: &[S],
    strings: &[&[S]],
    weights: &[f64],
    rows: &[Row],
    scratch: &mut Row,
) -> f64 {
    if tail.is_empty() {
        return strings
            .iter()
            .zip(weights)
            .zip(rows)
            .map(|((string, &weight), row)| row[string.len()] as f64 * weight)
            .sum();
    }

    let mut total = 0.0;
    for ((&string, &weight), row) in strings.iter().zip(weights).zip(rows) {
        let mut leni = string.len();
        let mut lent = tail.len();
        // the suffix can be stripped, the prefix is already in the rows
        while lent > 0 && leni > 0 && string[leni - 1] == tail[lent - 1] {
            lent -= 1;
            leni -= 1;
        }
        if lent == 0 {
            total += row[leni] as f64 * weight;
            continue;
        }
        let offset = row[0];
        if leni == 0 {
            total += (offset + lent) as f64 * weight;
            continue;
        }

        scratch.clear();
        scratch.extend_from_slice(&row[..=leni]);
        for i in 1..=lent {
            let c1 = tail[i - 1];
            let mut d = i + offset;
            let mut x = i + offset;
            for p in 1..=leni {
                d -= 1;
                let diag = d + usize::from(c1 != string[p - 1]);
                x += 1;
                if x > diag {
                    x = diag;
                }
                d = scratch[p] + 1;
                if x > d {
                    x = d;
                }
                scratch[p] = x;
            }
        }
        total += scratch[leni] as f64 * weight;
    }
    total
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::median::greedy_median;
    use crate::median::sum_of_distances;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rand_collection(rng: &mut StdRng, max_strings: usize, max_len: usize) -> Vec<Vec<u8>> {
        let n = rng.gen_range(1..=max_strings);
        (0..n)
            .map(|_| {
                let len = rng.gen_range(0..=max_len);
                (0..len).map(|_| b"abc"[rng.gen_range(0..3)]).collect()
            })
            .collect()
    }

    fn views<'a>(strings: &'a [Vec<u8>]) -> Vec<&'a [u8]> {
        strings.iter().map(Vec::as_slice).collect()
    }

    #[test]
    fn test_perfect_seed_survives() {
        let strings: Vec<&[u8]> = vec![b"median", b"median"];
        let weights = [1.0, 1.0];
        assert_eq!(median_improve(b"median", &strings, &weights), b"median");
    }

    #[test]
    fn test_repairs_scrambled_seed() {
        let strings: Vec<&[u8]> = vec![b"abc", b"abcd"];
        let weights = [1.0, 1.0];
        assert_eq!(median_improve(b"bacab", &strings, &weights), b"abcd");
    }

    #[test]
    fn test_grows_empty_seed() {
        let strings: Vec<&[u8]> = vec![b"abc", b"abc"];
        let weights = [1.0, 1.0];
        assert_eq!(median_improve(b"", &strings, &weights), b"abc");
    }

    #[test]
    fn test_empty_collection() {
        assert!(median_improve::<u8>(b"seed", &[], &[]).is_empty());
        let strings: Vec<&[u8]> = vec![b"", b""];
        assert!(median_improve(b"seed", &strings, &[1.0, 1.0]).is_empty());
    }

    #[test]
    fn test_never_worse_than_seed() {
        let mut rng = StdRng::seed_from_u64(73);
        for _ in 0..400 {
            let strings = rand_collection(&mut rng, 4, 6);
            let weights: Vec<f64> = (0..strings.len())
                .map(|_| [0.5, 1.0, 2.0][rng.gen_range(0..3)])
                .collect();
            let v = views(&strings);
            // improve both a random input string and the greedy result
            let seed = &strings[rng.gen_range(0..strings.len())];
            let improved = median_improve(seed, &v, &weights);
            assert!(
                sum_of_distances(&improved, &v, &weights)
                    <= sum_of_distances(seed, &v, &weights) + 1e-9
            );

            let greedy = greedy_median(&v, &weights);
            let improved = median_improve(&greedy, &v, &weights);
            assert!(
                sum_of_distances(&improved, &v, &weights)
                    <= sum_of_distances(&greedy, &v, &weights) + 1e-9
            );
        }
    }
}
