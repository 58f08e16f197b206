//! Minimum-cost assignment on rectangular matrices (Munkres/Kuhn).
//!
//! Solves the assignment problem for a row-major `rows x columns` cost
//! matrix with `columns <= rows`: pick one row per column, all distinct,
//! minimizing the total of the selected cells.
//!
//! The phases follow the classic construction: per-column reduction,
//! greedy initial starring, then alternating cover/prime rounds with matrix
//! adjustment until every column holds a starred zero. Subtractions snap
//! results below [`EPSILON`] to exact zero so the zero tests stay reliable
//! in floating point.

use crate::INFINITY;

/// Values this close to zero after a subtraction are treated as zero.
const EPSILON: f64 = 1e-14;

// =============================================================================
// Public API
// =============================================================================

/// Find the minimum-cost column→row assignment.
///
/// `costs` is row-major with `rows` rows of `columns` entries and
/// `columns <= rows`; entry `costs[i * columns + j]` prices assigning row
/// `i` to column `j`. Returns one row index per column, all distinct.
///
/// # Panics
///
/// Panics if `columns > rows` or if `costs` has the wrong length.
pub fn minimum_assignment(costs: &[f64], columns: usize, rows: usize) -> Vec<usize> {
    assert!(
        columns <= rows,
        "assignment needs columns ({columns}) <= rows ({rows})"
    );
    assert_eq!(
        costs.len(),
        columns * rows,
        "cost matrix has the wrong size"
    );
    if columns == 0 {
        return Vec::new();
    }
    Solver::new(costs.to_vec(), columns, rows).solve()
}

// =============================================================================
// Internal Solver
// =============================================================================

struct Solver {
    costs: Vec<f64>,
    columns: usize,
    rows: usize,
    covered_column: Vec<bool>,
    covered_row: Vec<bool>,
    /// Row of the starred zero in each column
    star_in_column: Vec<Option<usize>>,
    /// Column of the starred zero in each row
    star_in_row: Vec<Option<usize>>,
    /// Column of the primed zero in each row
    prime_in_row: Vec<Option<usize>>,
}

impl Solver {
    fn new(costs: Vec<f64>, columns: usize, rows: usize) -> Self {
        Self {
            costs,
            columns,
            rows,
            covered_column: vec![false; columns],
            covered_row: vec![false; rows],
            star_in_column: vec![None; columns],
            star_in_row: vec![None; rows],
            prime_in_row: vec![None; rows],
        }
    }

    fn solve(mut self) -> Vec<usize> {
        self.reduce_and_star();
        loop {
            // cover every column holding a star; all covered means done
            let mut covered = 0;
            for j in 0..self.columns {
                if self.star_in_column[j].is_some() {
                    self.covered_column[j] = true;
                    covered += 1;
                }
            }
            if covered == self.columns {
                break;
            }
            let row = self.prime_until_augmentable();
            self.augment(row);
        }
        self.star_in_column
            .into_iter()
            .map(|star| star.expect("every column ends up starred"))
            .collect()
    }

    /// Subtract each column's minimum and star a zero per column where the
    /// zero's row is still free.
    fn reduce_and_star(&mut self) {
        for j in 0..self.columns {
            let mut min_row = 0;
            let mut min = self.costs[j];
            for i in 1..self.rows {
                let v = self.costs[i * self.columns + j];
                if v < min {
                    min = v;
                    min_row = i;
                }
            }
            for i in 0..self.rows {
                let cell = &mut self.costs[i * self.columns + j];
                *cell -= min;
                if *cell < EPSILON {
                    *cell = 0.0;
                }
            }
            if self.star_in_column[j].is_none() && self.star_in_row[min_row].is_none() {
                self.star_in_column[j] = Some(min_row);
                self.star_in_row[min_row] = Some(j);
            } else {
                // the minimum's row is taken; any other zero of the column
                // in a free row serves as well
                for i in 0..self.rows {
                    if i != min_row
                        && self.costs[i * self.columns + j] == 0.0
                        && self.star_in_column[j].is_none()
                        && self.star_in_row[i].is_none()
                    {
                        self.star_in_column[j] = Some(i);
                        self.star_in_row[i] = Some(j);
                        break;
                    }
                }
            }
        }
    }

    /// Prime uncovered zeros until one lands in a star-free row (the start
    /// of an augmenting path), adjusting the matrix whenever no uncovered
    /// zero is left.
    fn prime_until_augmentable(&mut self) -> usize {
        loop {
            if let Some(row) = self.prime_uncovered_zeros() {
                return row;
            }
            self.adjust_by_min_uncovered();
        }
    }

    /// Scan for uncovered zeros. A primed zero whose row holds a star
    /// covers the row, uncovers the star's column and restarts the scan; a
    /// primed zero in a star-free row is returned. `None` means the
    /// uncovered matrix has no zero at all.
    fn prime_uncovered_zeros(&mut self) -> Option<usize> {
        'scan: loop {
            for j in 0..self.columns {
                if self.covered_column[j] {
                    continue;
                }
                for i in 0..self.rows {
                    if !self.covered_row[i] && self.costs[i * self.columns + j] == 0.0 {
                        self.prime_in_row[i] = Some(j);
                        if let Some(star_col) = self.star_in_row[i] {
                            self.covered_row[i] = true;
                            self.covered_column[star_col] = false;
                            continue 'scan;
                        }
                        return Some(i);
                    }
                }
            }
            return None;
        }
    }

    /// Add the minimal uncovered value to doubly covered cells and subtract
    /// it from doubly uncovered ones (the net effect of adding it to every
    /// covered row and subtracting it from every uncovered column).
    fn adjust_by_min_uncovered(&mut self) {
        let mut min = INFINITY;
        for j in 0..self.columns {
            if self.covered_column[j] {
                continue;
            }
            for i in 0..self.rows {
                let v = self.costs[i * self.columns + j];
                if !self.covered_row[i] && v < min {
                    min = v;
                }
            }
        }
        for j in 0..self.columns {
            for i in 0..self.rows {
                let cell = &mut self.costs[i * self.columns + j];
                if self.covered_row[i] && self.covered_column[j] {
                    *cell += min;
                } else if !self.covered_row[i] && !self.covered_column[j] {
                    *cell -= min;
                    if *cell < EPSILON {
                        *cell = 0.0;
                    }
                }
            }
        }
    }

    /// Convert the alternating prime/star path starting at the primed zero
    /// of `row` into stars, then drop all primes and covers.
    fn augment(&mut self, mut row: usize) {
        loop {
            let col = self.prime_in_row[row].expect("augmenting path starts at a prime");
            let displaced = self.star_in_column[col];
            self.star_in_row[row] = Some(col);
            self.star_in_column[col] = Some(row);
            match displaced {
                Some(star_row) => row = star_row,
                None => break,
            }
        }
        self.prime_in_row.fill(None);
        self.covered_row.fill(false);
        self.covered_column.fill(false);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Exhaustive minimum over all injective column→row assignments.
    fn brute_force(costs: &[f64], columns: usize, rows: usize) -> f64 {
        fn recurse(
            costs: &[f64],
            columns: usize,
            rows: usize,
            col: usize,
            used: &mut [bool],
        ) -> f64 {
            if col == columns {
                return 0.0;
            }
            let mut best = f64::INFINITY;
            for i in 0..rows {
                if used[i] {
                    continue;
                }
                used[i] = true;
                let total =
                    costs[i * columns + col] + recurse(costs, columns, rows, col + 1, used);
                used[i] = false;
                if total < best {
                    best = total;
                }
            }
            best
        }
        let mut used = vec![false; rows];
        recurse(costs, columns, rows, 0, &mut used)
    }

    #[test]
    fn test_identity_matrix() {
        // zero diagonal: the assignment must pick it
        let costs = vec![
            0.0, 1.0, 1.0, //
            1.0, 0.0, 1.0, //
            1.0, 1.0, 0.0,
        ];
        assert_eq!(minimum_assignment(&costs, 3, 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_forced_detour() {
        // greedy per-column zeros collide; the solver must reshuffle
        let costs = vec![
            1.0, 2.0, //
            1.0, 4.0, //
            5.0, 9.0,
        ];
        let map = minimum_assignment(&costs, 2, 3);
        let total: f64 = (0..2).map(|j| costs[map[j] * 2 + j]).sum();
        assert_eq!(total, brute_force(&costs, 2, 3));
    }

    #[test]
    fn test_empty() {
        assert!(minimum_assignment(&[], 0, 0).is_empty());
        assert!(minimum_assignment(&[], 0, 3).is_empty());
    }

    #[test]
    fn test_single_column() {
        let costs = vec![3.0, 1.0, 2.0];
        assert_eq!(minimum_assignment(&costs, 1, 3), vec![1]);
    }

    #[test]
    fn test_optimal_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(47);
        for _ in 0..1500 {
            let columns = rng.gen_range(1..=4);
            let rows = rng.gen_range(columns..=5);
            let costs: Vec<f64> = (0..columns * rows)
                .map(|_| (rng.gen_range(0..1000) as f64) / 1000.0)
                .collect();
            let map = minimum_assignment(&costs, columns, rows);

            // injective
            let mut seen = vec![false; rows];
            for &i in &map {
                assert!(!seen[i], "row {i} assigned twice");
                seen[i] = true;
            }

            let total: f64 = (0..columns).map(|j| costs[map[j] * columns + j]).sum();
            let best = brute_force(&costs, columns, rows);
            assert!(
                (total - best).abs() < 1e-9,
                "suboptimal assignment: {total} vs {best} for {costs:?}"
            );
        }
    }
}
