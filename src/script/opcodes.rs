//! Algebra on block-opcode lists.
//!
//! Opcode lists are the "complete" script form: Keep blocks are explicit
//! and a valid list tiles both strings from (0, 0) to (source_len,
//! destination_len) with adjacent blocks meeting exactly.

use crate::error::{EditError, EditResult};
use crate::script::{EditOp, MatchingBlock, OpCode, OpKind};
use crate::symbol::Symbol;

// =============================================================================
// Validation
// =============================================================================

/// Validate a block-opcode list against the given string lengths.
///
/// Beyond bounds, this checks the tiling (first block at (0, 0), last block
/// at the string ends, adjacent blocks meeting on both axes) and the
/// per-kind span shape: Keep/Replace cover equal non-empty spans, Insert
/// covers no source and some destination, Delete the mirror image. An empty
/// list is valid.
pub fn check_op_codes(bops: &[OpCode], source_len: usize, destination_len: usize) -> EditResult<()> {
    let Some(first) = bops.first() else {
        return Ok(());
    };
    let last = bops.last().expect("non-empty list has a last block");
    if first.sbeg != 0 || first.dbeg != 0 || last.send != source_len || last.dend != destination_len
    {
        return Err(EditError::UncoveredSpan {
            source_len,
            destination_len,
        });
    }
    for (index, b) in bops.iter().enumerate() {
        if b.send < b.sbeg || b.dend < b.dbeg || b.send > source_len || b.dend > destination_len {
            return Err(EditError::OutOfBounds {
                index,
                spos: b.sbeg,
                dpos: b.dbeg,
                source_len,
                destination_len,
            });
        }
        if index > 0 && (b.sbeg != bops[index - 1].send || b.dbeg != bops[index - 1].dend) {
            return Err(EditError::UncoveredSpan {
                source_len,
                destination_len,
            });
        }
        let shape_ok = match b.kind {
            OpKind::Keep | OpKind::Replace => {
                b.source_len() == b.destination_len() && b.source_len() >= 1
            }
            OpKind::Insert => b.source_len() == 0 && b.destination_len() >= 1,
            OpKind::Delete => b.destination_len() == 0 && b.source_len() >= 1,
        };
        if !shape_ok {
            return Err(EditError::MalformedBlock { index });
        }
    }
    Ok(())
}

// =============================================================================
// Transformation
// =============================================================================

/// Reverse the direction of a block list in place: source and destination
/// spans swap, Insert and Delete swap kinds.
pub fn invert_op_codes(bops: &mut [OpCode]) {
    for b in bops {
        std::mem::swap(&mut b.sbeg, &mut b.dbeg);
        std::mem::swap(&mut b.send, &mut b.dend);
        b.kind = b.kind.inverse();
    }
}

/// Apply a block list to `source`, reading replacement/insertion spans from
/// `target`. Validity is not re-checked.
pub fn apply_op_codes<S: Symbol>(bops: &[OpCode], source: &[S], target: &[S]) -> Vec<S> {
    let mut out = Vec::with_capacity(target.len());
    for b in bops {
        match b.kind {
            OpKind::Keep => out.extend_from_slice(&source[b.sbeg..b.send]),
            OpKind::Replace | OpKind::Insert => out.extend_from_slice(&target[b.dbeg..b.dend]),
            OpKind::Delete => {}
        }
    }
    out
}

/// Expand a block list into elementary operations.
///
/// Every non-Keep block contributes `max(source span, destination span)`
/// atomic operations; Keep blocks are expanded only when `keep_keeps` is
/// set, otherwise the result is a normalized script.
pub fn op_codes_to_edit_ops(bops: &[OpCode], keep_keeps: bool) -> Vec<EditOp> {
    let mut ops = Vec::new();
    for b in bops {
        match b.kind {
            OpKind::Keep => {
                if keep_keeps {
                    for j in 0..b.source_len() {
                        ops.push(EditOp::new(OpKind::Keep, b.sbeg + j, b.dbeg + j));
                    }
                }
            }
            OpKind::Replace => {
                for j in 0..b.source_len() {
                    ops.push(EditOp::new(OpKind::Replace, b.sbeg + j, b.dbeg + j));
                }
            }
            OpKind::Delete => {
                for j in 0..b.source_len() {
                    ops.push(EditOp::new(OpKind::Delete, b.sbeg + j, b.dbeg));
                }
            }
            OpKind::Insert => {
                for j in 0..b.destination_len() {
                    ops.push(EditOp::new(OpKind::Insert, b.sbeg, b.dbeg + j));
                }
            }
        }
    }
    ops
}

/// Read the matching blocks directly off the Keep blocks of an opcode list.
pub fn matching_blocks_from_op_codes(bops: &[OpCode]) -> Vec<MatchingBlock> {
    bops.iter()
        .filter(|b| b.kind.is_keep())
        .map(|b| MatchingBlock {
            spos: b.sbeg,
            dpos: b.dbeg,
            len: b.source_len(),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
