//! Optimal edit-script reconstruction.
//!
//! Unlike the distance computation, reconstruction keeps the full cost
//! matrix alive and walks it backwards from the bottom-right corner. The
//! walk is deterministic: among equally cheap predecessors it prefers to
//! continue in the direction of the previous non-diagonal step, so runs of
//! insertions or deletions come out contiguous instead of interleaved.

use crate::script::ops::edit_ops_to_op_codes;
use crate::script::{EditOp, OpCode, OpKind};
use crate::symbol::Symbol;

// =============================================================================
// Public API
// =============================================================================

/// Compute a normalized optimal edit script turning `source` into `target`.
///
/// The script realizes the unit-cost edit distance: its length equals
/// `edit_distance(source, target, CostModel::Levenshtein)`.
///
/// # Example
///
/// ```
/// use editkit::{apply_edit_ops, edit_ops};
///
/// let ops = edit_ops(b"Levenshtein", b"Lenvinsten");
/// assert_eq!(ops.len(), 4);
/// assert_eq!(apply_edit_ops(&ops, b"Levenshtein", b"Lenvinsten"), b"Lenvinsten");
/// ```
pub fn edit_ops<S: Symbol>(source: &[S], target: &[S]) -> Vec<EditOp> {
    // strip the common prefix, remembering how far positions shift back
    let bound = source.len().min(target.len());
    let mut offset = 0;
    while offset < bound && source[offset] == target[offset] {
        offset += 1;
    }
    let mut s1 = &source[offset..];
    let mut s2 = &target[offset..];

    // the common suffix needs no position bookkeeping
    let bound = s1.len().min(s2.len());
    let mut suffix = 0;
    while suffix < bound && s1[s1.len() - 1 - suffix] == s2[s2.len() - 1 - suffix] {
        suffix += 1;
    }
    s1 = &s1[..s1.len() - suffix];
    s2 = &s2[..s2.len() - suffix];

    let matrix = fill_cost_matrix(s1, s2);
    backtrack(&matrix, s1, s2, offset)
}

/// Compute the complete block-opcode list turning `source` into `target`.
///
/// Equivalent to converting [`edit_ops`] with
/// [`edit_ops_to_op_codes`](crate::edit_ops_to_op_codes); the result tiles
/// both strings.
pub fn op_codes<S: Symbol>(source: &[S], target: &[S]) -> Vec<OpCode> {
    let ops = edit_ops(source, target);
    edit_ops_to_op_codes(&ops, source.len(), target.len())
}

// =============================================================================
// Core
// =============================================================================

/// Fill the full `(s1.len()+1) x (s2.len()+1)` unit-cost matrix, row-major.
fn fill_cost_matrix<S: Symbol>(s1: &[S], s2: &[S]) -> Vec<usize> {
    let l1 = s1.len() + 1;
    let l2 = s2.len() + 1;
    let mut matrix = vec![0usize; l1 * l2];
    for (j, cell) in matrix.iter_mut().enumerate().take(l2) {
        *cell = j;
    }
    for i in 1..l1 {
        matrix[i * l2] = i;
    }
    for i in 1..l1 {
        let c1 = s1[i - 1];
        let mut x = i;
        for j in 1..l2 {
            let diag = matrix[(i - 1) * l2 + j - 1] + usize::from(c1 != s2[j - 1]);
            x += 1;
            if x > diag {
                x = diag;
            }
            let up = matrix[(i - 1) * l2 + j] + 1;
            if x > up {
                x = up;
            }
            matrix[i * l2 + j] = x;
        }
    }
    matrix
}

/// Walk the matrix from the bottom-right corner to (0, 0), emitting
/// operations in reverse.
///
/// `dir` remembers the last non-diagonal move (-1 insert, +1 delete, 0
/// after a diagonal): a consistent move in the same direction is taken
/// first, then a diagonal Keep, then a diagonal Replace, and only a
/// diagonal resets the direction; turning straight from inserting to
/// deleting (or back) is never cheaper than going diagonally.
fn backtrack<S: Symbol>(matrix: &[usize], s1: &[S], s2: &[S], offset: usize) -> Vec<EditOp> {
    let l2 = s2.len() + 1;
    let mut i = s1.len();
    let mut j = s2.len();
    let mut pos = matrix[matrix.len() - 1];
    let mut ops = vec![EditOp::new(OpKind::Keep, 0, 0); pos];
    let mut dir = 0i32;

    while i > 0 || j > 0 {
        let here = matrix[i * l2 + j];
        if dir < 0 && j > 0 && here == matrix[i * l2 + j - 1] + 1 {
            pos -= 1;
            j -= 1;
            ops[pos] = EditOp::new(OpKind::Insert, i + offset, j + offset);
            continue;
        }
        if dir > 0 && i > 0 && here == matrix[(i - 1) * l2 + j] + 1 {
            pos -= 1;
            i -= 1;
            ops[pos] = EditOp::new(OpKind::Delete, i + offset, j + offset);
            continue;
        }
        if i > 0 && j > 0 && here == matrix[(i - 1) * l2 + j - 1] && s1[i - 1] == s2[j - 1] {
            // keeps are not recorded, the script stays normalized
            i -= 1;
            j -= 1;
            dir = 0;
            continue;
        }
        if i > 0 && j > 0 && here == matrix[(i - 1) * l2 + j - 1] + 1 {
            pos -= 1;
            i -= 1;
            j -= 1;
            dir = 0;
            ops[pos] = EditOp::new(OpKind::Replace, i + offset, j + offset);
            continue;
        }
        if dir == 0 && j > 0 && here == matrix[i * l2 + j - 1] + 1 {
            pos -= 1;
            j -= 1;
            dir = -1;
            ops[pos] = EditOp::new(OpKind::Insert, i + offset, j + offset);
            continue;
        }
        if dir == 0 && i > 0 && here == matrix[(i - 1) * l2 + j] + 1 {
            pos -= 1;
            i -= 1;
            dir = 1;
            ops[pos] = EditOp::new(OpKind::Delete, i + offset, j + offset);
            continue;
        }
        unreachable!("lost in the cost matrix at ({i}, {j})");
    }
    debug_assert_eq!(pos, 0, "backtrack emitted too few operations");
    ops
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{CostModel, edit_distance};
    use crate::script::ops::{
        apply_edit_ops, check_edit_ops, invert_edit_ops, matching_blocks, normalize_edit_ops,
        subtract_edit_ops,
    };
    use crate::script::opcodes::{
        apply_op_codes, check_op_codes, invert_op_codes, matching_blocks_from_op_codes,
        op_codes_to_edit_ops,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rand_string(rng: &mut StdRng, max_len: usize, alphabet: &[u8]) -> Vec<u8> {
        let len = rng.gen_range(0..=max_len);
        (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect()
    }

    #[test]
    fn test_known_script() {
        let ops = edit_ops(b"Levenshtein", b"Lenvinsten");
        assert_eq!(ops.len(), 4);
        assert!(ops.iter().all(|op| !op.kind.is_keep()));
        assert_eq!(
            apply_edit_ops(&ops, b"Levenshtein", b"Lenvinsten"),
            b"Lenvinsten"
        );
    }

    #[test]
    fn test_known_op_codes() {
        let bops = op_codes(b"abcdef", b"abXYef");
        assert_eq!(
            bops,
            vec![
                OpCode::new(OpKind::Keep, 0, 2, 0, 2),
                OpCode::new(OpKind::Replace, 2, 4, 2, 4),
                OpCode::new(OpKind::Keep, 4, 6, 4, 6),
            ]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(edit_ops::<u8>(b"", b"").is_empty());
        let ops = edit_ops(b"", b"abc");
        assert_eq!(ops.len(), 3);
        assert_eq!(apply_edit_ops(&ops, b"", b"abc"), b"abc");
        let ops = edit_ops(b"abc", b"");
        assert_eq!(ops.len(), 3);
        assert_eq!(apply_edit_ops(&ops, b"abc", b""), b"");
    }

    #[test]
    fn test_script_realizes_distance() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..2000 {
            let a = rand_string(&mut rng, 10, b"abc");
            let b = rand_string(&mut rng, 10, b"abc");
            let ops = edit_ops(&a, &b);
            assert_eq!(
                ops.len(),
                edit_distance(&a, &b, CostModel::Levenshtein),
                "script length mismatch for {a:?} / {b:?}"
            );
            assert_eq!(check_edit_ops(&ops, a.len(), b.len()), Ok(()));
            assert_eq!(apply_edit_ops(&ops, &a, &b), b);
        }
    }

    #[test]
    fn test_op_codes_tile_and_apply() {
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..2000 {
            let a = rand_string(&mut rng, 10, b"abc");
            let b = rand_string(&mut rng, 10, b"abc");
            let bops = op_codes(&a, &b);
            assert_eq!(check_op_codes(&bops, a.len(), b.len()), Ok(()));
            assert_eq!(apply_op_codes(&bops, &a, &b), b);
        }
    }

    #[test]
    fn test_representation_round_trip() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..2000 {
            let a = rand_string(&mut rng, 10, b"abc");
            let b = rand_string(&mut rng, 10, b"abc");
            let ops = edit_ops(&a, &b);
            let bops = edit_ops_to_op_codes(&ops, a.len(), b.len());
            // expanding with keeps and normalizing again recovers the script
            let expanded = op_codes_to_edit_ops(&bops, true);
            assert_eq!(normalize_edit_ops(&expanded), ops);
            assert_eq!(op_codes_to_edit_ops(&bops, false), ops);
        }
    }

    #[test]
    fn test_inversion() {
        let mut rng = StdRng::seed_from_u64(37);
        for _ in 0..1000 {
            let a = rand_string(&mut rng, 10, b"abc");
            let b = rand_string(&mut rng, 10, b"abc");

            let ops = edit_ops(&a, &b);
            let mut inv = ops.clone();
            invert_edit_ops(&mut inv);
            assert_eq!(apply_edit_ops(&inv, &b, &a), a);
            invert_edit_ops(&mut inv);
            assert_eq!(inv, ops);

            let bops = op_codes(&a, &b);
            let mut binv = bops.clone();
            invert_op_codes(&mut binv);
            assert_eq!(apply_op_codes(&binv, &b, &a), a);
            invert_op_codes(&mut binv);
            assert_eq!(binv, bops);
        }
    }

    #[test]
    fn test_matching_blocks_agree() {
        let mut rng = StdRng::seed_from_u64(41);
        for _ in 0..1000 {
            let a = rand_string(&mut rng, 12, b"abc");
            let b = rand_string(&mut rng, 12, b"abc");
            let ops = edit_ops(&a, &b);
            let from_ops = matching_blocks(&ops, a.len(), b.len());
            let from_blocks = matching_blocks_from_op_codes(&op_codes(&a, &b));
            assert_eq!(from_ops, from_blocks);
            for mb in &from_ops {
                assert!(mb.len > 0);
                assert_eq!(a[mb.spos..mb.spos + mb.len], b[mb.dpos..mb.dpos + mb.len]);
            }
        }
    }

    #[test]
    fn test_subtract_law() {
        let mut rng = StdRng::seed_from_u64(43);
        for _ in 0..2000 {
            let a = rand_string(&mut rng, 10, b"abc");
            let b = rand_string(&mut rng, 10, b"abc");
            let ops = edit_ops(&a, &b);
            let sub: Vec<_> = ops.iter().filter(|_| rng.r#gen::<bool>()).copied().collect();
            let rem = subtract_edit_ops(&ops, &sub).unwrap();
            // applying the subtrahend and then the remainder lands on the
            // same string as applying the whole script
            let intermediate = apply_edit_ops(&sub, &a, &b);
            assert_eq!(
                apply_edit_ops(&rem, &intermediate, &b),
                b,
                "subtract law failed for {a:?} / {b:?} with {sub:?}"
            );
        }
    }

    #[test]
    fn test_wide_symbols() {
        let a: Vec<char> = "groß".chars().collect();
        let b: Vec<char> = "gross".chars().collect();
        let ops = edit_ops(&a, &b);
        assert_eq!(ops.len(), edit_distance(&a, &b, CostModel::Levenshtein));
        assert_eq!(apply_edit_ops(&ops, &a, &b), b);
    }
}
