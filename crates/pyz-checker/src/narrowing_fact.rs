//! A single narrowing fact and its application rule.

use pyz_ast::{ExprArena, ExprId};
use pyz_solver::{Type, combine_types};

use crate::reference_matcher::references_match;

/// An immutable record pairing a stable reference with the type it was
/// narrowed to.
///
/// A *conditional* fact records one of possibly several ways the value could
/// have been produced, so applying it unions the narrowed type with the
/// current type instead of replacing it. Conversion to conditional always
/// produces a new value; facts are never mutated in place, which keeps
/// sharing across branches safe.
#[derive(Clone, Debug)]
pub struct NarrowingFact {
    reference: ExprId,
    narrowed: Type,
    conditional: bool,
}

impl NarrowingFact {
    pub fn new(reference: ExprId, narrowed: Type) -> NarrowingFact {
        NarrowingFact {
            reference,
            narrowed,
            conditional: false,
        }
    }

    pub fn reference(&self) -> ExprId {
        self.reference
    }

    pub fn narrowed_type(&self) -> &Type {
        &self.narrowed
    }

    pub fn is_conditional(&self) -> bool {
        self.conditional
    }

    /// A conditional copy of this fact. Already-conditional facts are
    /// returned as an identical clone.
    pub fn as_conditional(&self) -> NarrowingFact {
        NarrowingFact {
            reference: self.reference,
            narrowed: self.narrowed.clone(),
            conditional: true,
        }
    }

    /// Substitute the narrowed type into a type lookup for `query`.
    ///
    /// Returns `current` unchanged when `query` is a different reference.
    /// When the reference matches:
    /// - a special-builtin class marker never overrides an already-known
    ///   type; the evaluator synthesizes those through its own path, and a
    ///   narrowing fact must not clobber them (only an `Unbound` current
    ///   type yields to the fact);
    /// - a conditional fact unions its type with `current`;
    /// - a non-conditional fact replaces `current`.
    pub fn apply_to(&self, arena: &ExprArena, query: ExprId, current: &Type) -> Type {
        if !references_match(arena, self.reference, query) {
            return current.clone();
        }

        if let Type::Class(class) = &self.narrowed
            && class.is_special_builtin()
            && !matches!(current, Type::Unbound)
        {
            return current.clone();
        }

        if self.conditional {
            combine_types(vec![self.narrowed.clone(), current.clone()])
        } else {
            self.narrowed.clone()
        }
    }
}
