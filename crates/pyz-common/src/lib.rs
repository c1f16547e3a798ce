//! Common infrastructure shared across the pyz crates.
//!
//! Currently this is just the string interner; identifier text is interned
//! once and compared as `Atom` handles everywhere else.

pub mod interner;

pub use interner::{Atom, Interner};
