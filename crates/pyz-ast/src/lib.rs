//! Expression AST for the pyz narrowing engine.
//!
//! Nodes live in an [`ExprArena`] and are referenced by lightweight
//! [`ExprId`] handles. The arena owns the interner for identifier text, so
//! any consumer holding `&ExprArena` can resolve names without extra
//! plumbing.
//!
//! The node set is deliberately the slice of Python's expression grammar the
//! narrowing engine dispatches on: references (names and attribute chains),
//! the boolean operators, `is`/`is not` comparisons, calls, and a few
//! "unsupported" shapes that exist so callers can hand the engine arbitrary
//! conditions and get a conservative answer back.

pub mod arena;

pub use arena::{BoolOpKind, CompareOp, ExprArena, ExprId, ExprKind};
