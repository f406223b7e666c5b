//! SASS renderer for JSON values
//!
//! This module turns parsed JSON into SASS value syntax: objects become
//! maps, arrays become lists and strings are sniffed for colors, booleans
//! and numbers before falling back to quoted literals.

pub mod sass;
pub mod scalar;

pub use sass::SassRenderer;
pub use scalar::{classify, render_scalar, StringKind};
