//! Algebra on elementary edit scripts.
//!
//! All functions take scripts as plain slices. Only [`check_edit_ops`] and
//! [`subtract_edit_ops`] validate anything; the rest assume a valid script
//! and produce garbage (not UB) when handed an invalid one, so check first
//! when the script comes from outside.

use crate::error::{EditError, EditResult};
use crate::script::{EditOp, MatchingBlock, OpCode, OpKind};
use crate::symbol::Symbol;

// =============================================================================
// Validation
// =============================================================================

/// Validate an elementary script against the given string lengths.
///
/// Checks every position against the bounds (including the rule that an
/// operation sitting on the source end must be an Insert, and one on the
/// destination end must be a Delete) and that positions never decrease.
/// An empty script is valid.
pub fn check_edit_ops(ops: &[EditOp], source_len: usize, destination_len: usize) -> EditResult<()> {
    for (index, op) in ops.iter().enumerate() {
        let in_bounds = op.spos <= source_len
            && op.dpos <= destination_len
            && (op.spos < source_len || op.kind == OpKind::Insert)
            && (op.dpos < destination_len || op.kind == OpKind::Delete);
        if !in_bounds {
            return Err(EditError::OutOfBounds {
                index,
                spos: op.spos,
                dpos: op.dpos,
                source_len,
                destination_len,
            });
        }
    }
    for (index, pair) in ops.windows(2).enumerate() {
        if pair[1].spos < pair[0].spos || pair[1].dpos < pair[0].dpos {
            return Err(EditError::OutOfOrder { index: index + 1 });
        }
    }
    Ok(())
}

// =============================================================================
// Transformation
// =============================================================================

/// Reverse the direction of a script in place: source and destination
/// positions swap, Insert and Delete swap kinds.
pub fn invert_edit_ops(ops: &mut [EditOp]) {
    for op in ops {
        std::mem::swap(&mut op.spos, &mut op.dpos);
        op.kind = op.kind.inverse();
    }
}

/// Copy a script dropping every Keep.
pub fn normalize_edit_ops(ops: &[EditOp]) -> Vec<EditOp> {
    ops.iter().filter(|op| !op.kind.is_keep()).copied().collect()
}

/// Apply a script to `source`, reading replacement/insertion symbols from
/// `target`, and return the resulting string.
///
/// The script need not describe a complete transformation of `source` into
/// `target`: source runs not mentioned by any operation are copied through
/// unchanged, so partial scripts (e.g. a [`subtract_edit_ops`] remainder)
/// apply just as well.
pub fn apply_edit_ops<S: Symbol>(ops: &[EditOp], source: &[S], target: &[S]) -> Vec<S> {
    let mut out = Vec::with_capacity(source.len() + target.len());
    let mut sp = 0;
    for op in ops {
        // copy the untouched run before this operation; a Keep also copies
        // its own symbol
        let run = op.spos - sp + usize::from(op.kind.is_keep());
        out.extend_from_slice(&source[sp..sp + run]);
        sp += run;
        match op.kind {
            OpKind::Keep => {}
            OpKind::Delete => sp += 1,
            OpKind::Replace => {
                sp += 1;
                out.push(target[op.dpos]);
            }
            OpKind::Insert => out.push(target[op.dpos]),
        }
    }
    out.extend_from_slice(&source[sp..]);
    out
}

/// Remove `sub` from `ops` and return the remainder: the normalized script
/// that, applied after `sub`, reaches the same final string as `ops`.
///
/// `sub` must be an ordered subsequence of `ops` (matched by kind and both
/// positions; Keep entries on either side are ignored). Each matched Insert
/// lengthens the intermediate string, so later remainder source positions
/// shift by +1; each matched Delete shifts them by -1.
pub fn subtract_edit_ops(ops: &[EditOp], sub: &[EditOp]) -> EditResult<Vec<EditOp>> {
    let mut rem = Vec::new();
    let mut j = 0;
    let mut shift: isize = 0;
    for op in ops {
        if op.kind.is_keep() {
            continue;
        }
        while j < sub.len() && sub[j].kind.is_keep() {
            j += 1;
        }
        if j < sub.len() && *op == sub[j] {
            shift += match sub[j].kind {
                OpKind::Insert => 1,
                OpKind::Delete => -1,
                _ => 0,
            };
            j += 1;
        } else {
            let mut shifted = *op;
            shifted.spos = (shifted.spos as isize + shift) as usize;
            rem.push(shifted);
        }
    }
    while j < sub.len() && sub[j].kind.is_keep() {
        j += 1;
    }
    if j < sub.len() {
        return Err(EditError::NotASubsequence { index: j });
    }
    Ok(rem)
}

// =============================================================================
// Conversion & matching blocks
// =============================================================================

/// Convert an elementary script into a complete block-opcode list.
///
/// Keep operations are ignored; instead a Keep block is synthesized across
/// every positional gap between consecutive runs (and a terminal one up to
/// the string ends), so the result tiles `0..source_len` × `0..destination_len`.
pub fn edit_ops_to_op_codes(
    ops: &[EditOp],
    source_len: usize,
    destination_len: usize,
) -> Vec<OpCode> {
    let mut bops = Vec::new();
    let mut spos = 0;
    let mut dpos = 0;
    let mut k = 0;
    while k < ops.len() {
        while k < ops.len() && ops[k].kind.is_keep() {
            k += 1;
        }
        if k == ops.len() {
            break;
        }
        let op = ops[k];
        if spos < op.spos || dpos < op.dpos {
            bops.push(OpCode::new(OpKind::Keep, spos, op.spos, dpos, op.dpos));
            spos = op.spos;
            dpos = op.dpos;
        }
        let kind = op.kind;
        let sbeg = spos;
        let dbeg = dpos;
        // swallow the maximal run of this kind at consistently advancing
        // positions
        loop {
            match kind {
                OpKind::Replace => {
                    spos += 1;
                    dpos += 1;
                }
                OpKind::Delete => spos += 1,
                OpKind::Insert => dpos += 1,
                OpKind::Keep => unreachable!("keeps were skipped above"),
            }
            k += 1;
            if k == ops.len()
                || ops[k].kind != kind
                || ops[k].spos != spos
                || ops[k].dpos != dpos
            {
                break;
            }
        }
        bops.push(OpCode::new(kind, sbeg, spos, dbeg, dpos));
    }
    if spos < source_len || dpos < destination_len {
        bops.push(OpCode::new(
            OpKind::Keep,
            spos,
            source_len,
            dpos,
            destination_len,
        ));
    }
    bops
}

/// Read the maximal matching runs off an elementary script.
///
/// A matching block spans every positional gap between consecutive
/// non-Keep runs, plus the common tail after the last run.
pub fn matching_blocks(
    ops: &[EditOp],
    source_len: usize,
    destination_len: usize,
) -> Vec<MatchingBlock> {
    let mut blocks = Vec::new();
    let mut spos = 0;
    let mut dpos = 0;
    let mut k = 0;
    while k < ops.len() {
        while k < ops.len() && ops[k].kind.is_keep() {
            k += 1;
        }
        if k == ops.len() {
            break;
        }
        let op = ops[k];
        if spos < op.spos || dpos < op.dpos {
            blocks.push(MatchingBlock {
                spos,
                dpos,
                len: op.spos - spos,
            });
            spos = op.spos;
            dpos = op.dpos;
        }
        let kind = op.kind;
        loop {
            match kind {
                OpKind::Replace => {
                    spos += 1;
                    dpos += 1;
                }
                OpKind::Delete => spos += 1,
                OpKind::Insert => dpos += 1,
                OpKind::Keep => unreachable!("keeps were skipped above"),
            }
            k += 1;
            if k == ops.len()
                || ops[k].kind != kind
                || ops[k].spos != spos
                || ops[k].dpos != dpos
            {
                break;
            }
        }
    }
    if spos < source_len || dpos < destination_len {
        assert_eq!(
            source_len - spos,
            destination_len - dpos,
            "unmatched tail after the last operation"
        );
        blocks.push(MatchingBlock {
            spos,
            dpos,
            len: source_len - spos,
        });
    }
    blocks
}

// =============================================================================
// Tests
// =============================================================================
