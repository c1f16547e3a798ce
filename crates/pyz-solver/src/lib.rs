//! Type representation and narrowing type algebra.
//!
//! This crate is the pure half of the narrowing engine: the `Type` taxonomy,
//! the `combine_types` normalizing constructor, and the four transforms that
//! map an original type plus a branch polarity to a narrowed type. Nothing
//! in here looks at the AST; the AST-facing dispatch lives in `pyz-checker`.
//!
//! Key functions:
//! - `combine_types`: canonical union construction (flatten, dedup, collapse)
//! - `narrow_for_truthiness`: `if x:` / `if not x:`
//! - `narrow_for_is_none`: `x is None` / `x is not None`
//! - `narrow_for_is_class`: `type(x) is Y`
//! - `narrow_for_isinstance`: `isinstance(x, Y)` / `isinstance(x, (Y, Z))`

pub mod narrowing;
pub mod types;

pub use narrowing::{
    can_be_falsy, can_be_truthy, is_none_or_never, narrow_for_is_class, narrow_for_is_none,
    narrow_for_isinstance, narrow_for_truthiness,
};
pub use types::{ClassDef, ClassFlags, ClassType, Type, combine_types};

#[cfg(test)]
mod tests;
