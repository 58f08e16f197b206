//! Edit scripts in both representations.
//!
//! A script describing how a source string becomes a destination string can
//! be written two ways:
//!
//! - **Elementary operations** ([`EditOp`]): one record per touched symbol,
//!   carrying a kind and a (source, destination) position pair. Scripts are
//!   usually kept *normalized*, i.e. without Keep records.
//! - **Block opcodes** ([`OpCode`]): one record per maximal run, covering a
//!   contiguous source span and a contiguous destination span. Keep blocks
//!   are mandatory here; a valid opcode list tiles both strings completely.
//!
//! The submodules provide a closed algebra on the two forms: validation,
//! application, inversion, normalization, subtraction, conversion in both
//! directions, and matching-block extraction. [`edit_ops`] and [`op_codes`]
//! produce optimal scripts from string pairs.

mod ops;
mod opcodes;
mod reconstruct;

pub use ops::{
    apply_edit_ops, check_edit_ops, edit_ops_to_op_codes, invert_edit_ops, matching_blocks,
    normalize_edit_ops, subtract_edit_ops,
};
pub use opcodes::{
    apply_op_codes, check_op_codes, invert_op_codes, matching_blocks_from_op_codes,
    op_codes_to_edit_ops,
};
pub use reconstruct::{edit_ops, op_codes};

// =============================================================================
// Public Types
// =============================================================================

/// Kind of an edit operation.
///
/// The discriminants preserve the classic encoding: bit 1 marks the
/// asymmetric kinds (Insert/Delete) and flipping bit 0 swaps between them,
/// which is exactly what inversion does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpKind {
    /// Source and destination symbol agree at the aligned positions.
    Keep = 0,
    /// The source symbol is replaced by the destination symbol.
    Replace = 1,
    /// The destination symbol is inserted.
    Insert = 2,
    /// The source symbol is deleted.
    Delete = 3,
}

impl OpKind {
    /// The kind this becomes when the script direction is reversed:
    /// Insert and Delete swap, Keep and Replace are self-inverse.
    pub fn inverse(self) -> Self {
        match self {
            Self::Insert => Self::Delete,
            Self::Delete => Self::Insert,
            symmetric => symmetric,
        }
    }

    /// Check if this is a Keep operation.
    pub fn is_keep(self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// One elementary edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditOp {
    /// Operation kind
    pub kind: OpKind,
    /// Position in the source string, `0..=source_len`
    pub spos: usize,
    /// Position in the destination string, `0..=destination_len`
    pub dpos: usize,
}

impl EditOp {
    /// Create an operation.
    pub fn new(kind: OpKind, spos: usize, dpos: usize) -> Self {
        Self { kind, spos, dpos }
    }
}

/// One block operation covering a source span and a destination span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCode {
    /// Operation kind
    pub kind: OpKind,
    /// Start of the source span
    pub sbeg: usize,
    /// End of the source span (exclusive)
    pub send: usize,
    /// Start of the destination span
    pub dbeg: usize,
    /// End of the destination span (exclusive)
    pub dend: usize,
}

impl OpCode {
    /// Create a block operation.
    pub fn new(kind: OpKind, sbeg: usize, send: usize, dbeg: usize, dend: usize) -> Self {
        Self {
            kind,
            sbeg,
            send,
            dbeg,
            dend,
        }
    }

    /// Length of the covered source span.
    pub fn source_len(&self) -> usize {
        self.send - self.sbeg
    }

    /// Length of the covered destination span.
    pub fn destination_len(&self) -> usize {
        self.dend - self.dbeg
    }
}

/// A maximal run of equal symbols: `source[spos..spos+len] ==
/// destination[dpos..dpos+len]`.
///
/// Lists contain only non-trivial blocks; append a `{source_len,
/// destination_len, 0}` sentinel yourself if an algorithm wants one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchingBlock {
    /// Start of the run in the source string
    pub spos: usize,
    /// Start of the run in the destination string
    pub dpos: usize,
    /// Run length
    pub len: usize,
}
