//! The type-evaluation capability injected by the caller.

use pyz_ast::ExprId;
use pyz_solver::Type;

/// Computes the currently-known type of an expression at the program point
/// where a condition is being decomposed.
///
/// Implemented by the expression evaluator of the surrounding checker and
/// injected per call, so this crate carries no ambient evaluator state.
///
/// Contract: evaluation must be synchronous, side-effect-free, and
/// deterministic within one `ConditionNarrower` invocation — a second call
/// for the same expression must return the same type. The narrower assumes
/// this but cannot detect violations; a non-idempotent evaluator produces
/// unreliable facts, not a panic.
pub trait TypeEvaluator {
    fn evaluate(&self, expr: ExprId) -> Type;
}
