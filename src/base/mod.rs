//! Foundation types for identifier resolution.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`] - Cheap-to-clone names of model elements and parameters
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`ParserOptions`] - Switches for optional identifier syntax
//! - [`is_identifier`] - Which names identifier segments can spell
//!
//! This module has NO dependencies on other modules of this crate.

mod options;

pub use options::ParserOptions;
pub use text_size::{TextRange, TextSize};

/// Name of a model element, parameter or product component.
///
/// Model names are short and cloned on every lookup, so they are stored
/// inline where possible.
pub type Name = smol_str::SmolStr;

/// Check if every byte offset of a text of `len` bytes fits a [`TextSize`].
pub(crate) fn fits_text_size(len: usize) -> bool {
    u32::try_from(len).is_ok()
}

/// Convert a byte offset into a [`TextSize`].
///
/// Offsets past `u32::MAX` saturate. The segment scanner rejects such
/// identifiers before any range is built from them.
pub(crate) fn to_text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::new(u32::MAX))
}

/// Build a [`TextRange`] from byte offsets.
pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(to_text_size(start), to_text_size(end))
}

/// Check if `name` is a Java-style identifier: a Unicode identifier that
/// may also start with `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(unicode_ident::is_xid_continue)
}
