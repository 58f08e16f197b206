//! Symbol alphabets and symbol collection.
//!
//! Every algorithm in the crate is generic over the element type of the
//! input strings. The two canonical alphabet families are bytes (`u8`) and
//! wide code points (`char`); semantics are identical across families.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Marker trait for string elements.
///
/// Blanket-implemented for every type that can be compared, ordered and
/// hashed by value. `Ord` is required so that symbol iteration order (and
/// with it every median tie-break) is deterministic.
pub trait Symbol: Copy + Eq + Ord + Hash {}

impl<T: Copy + Eq + Ord + Hash> Symbol for T {}

/// The set of distinct symbols occurring in a collection of strings.
///
/// Symbols are kept sorted ascending, so iterating the set visits byte
/// alphabets in `0..=255` order and wide alphabets in code-point order.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SymbolSet<S> {
    symbols: Vec<S>,
}

impl<S: Symbol> SymbolSet<S> {
    /// Collect the distinct symbols of all `strings`.
    pub fn collect(strings: &[&[S]]) -> Self {
        let mut seen = FxHashSet::default();
        for s in strings {
            seen.extend(s.iter().copied());
        }
        let mut symbols: Vec<S> = seen.into_iter().collect();
        symbols.sort_unstable();
        Self { symbols }
    }

    /// The distinct symbols, sorted ascending.
    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbol occurred at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
