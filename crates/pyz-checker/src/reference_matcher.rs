//! Stable reference recognition and syntactic reference identity.
//!
//! Narrowing only applies to expressions whose value cannot change behind
//! the checker's back within straight-line code: bare names and attribute
//! chains rooted in a name. Matching is purely syntactic; no type
//! information is consulted. That is sound precisely because the supported
//! shapes exclude calls and subscripts, which could produce a different
//! value on every evaluation.

use pyz_ast::{ExprArena, ExprId, ExprKind};

/// True iff `expr` is a narrowable reference: a bare name, or a member
/// access whose object is recursively narrowable.
pub fn is_narrowable_reference(arena: &ExprArena, expr: ExprId) -> bool {
    match arena.get(expr) {
        Some(ExprKind::Name { .. }) => true,
        Some(ExprKind::MemberAccess { object, .. }) => is_narrowable_reference(arena, *object),
        _ => false,
    }
}

/// Structural identity of two references.
///
/// Names match on identifier text (atom equality); member accesses match
/// iff their members match and their objects recursively match. Any other
/// shape never matches, including against itself.
pub fn references_match(arena: &ExprArena, a: ExprId, b: ExprId) -> bool {
    match (arena.get(a), arena.get(b)) {
        (Some(ExprKind::Name { name: name_a }), Some(ExprKind::Name { name: name_b })) => {
            name_a == name_b
        }
        (
            Some(ExprKind::MemberAccess {
                object: object_a,
                member: member_a,
            }),
            Some(ExprKind::MemberAccess {
                object: object_b,
                member: member_b,
            }),
        ) => member_a == member_b && references_match(arena, *object_a, *object_b),
        _ => false,
    }
}
