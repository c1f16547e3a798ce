//! Recursive decomposition of boolean test expressions into narrowing facts.
//!
//! `ConditionNarrower` walks a test expression and produces one fact list
//! per branch. Recognized shapes:
//! - `x is None` / `x is not None`
//! - `type(x) is Y` / `type(x) is not Y`
//! - `a and b`, `a or b`, `not a`
//! - bare references (truthiness tests)
//! - `isinstance(x, Y)` and `isinstance(x, (Y, Z, ...))`
//!
//! Anything else yields `None`: absence of narrowing is always a safe,
//! silent fallback, and the narrower never errors on any input shape.

use pyz_ast::{BoolOpKind, CompareOp, ExprArena, ExprId, ExprKind};
use pyz_solver::{
    ClassType, Type, narrow_for_is_class, narrow_for_is_none, narrow_for_isinstance,
    narrow_for_truthiness,
};
use tracing::{Level, span, trace};

use crate::evaluator::TypeEvaluator;
use crate::narrowing_fact::NarrowingFact;
use crate::reference_matcher::is_narrowable_reference;

/// Per-branch fact lists for one evaluated test expression.
///
/// Consumers must apply `if_facts` only along paths where the condition is
/// assumed true and `else_facts` only where it is assumed false, in the
/// order produced: when nested tests target the same reference, later facts
/// legitimately refine earlier ones.
#[derive(Debug, Default)]
pub struct ConditionConstraints {
    pub if_facts: Vec<NarrowingFact>,
    pub else_facts: Vec<NarrowingFact>,
}

impl ConditionConstraints {
    /// Exchange the branch assignments. Negation flips which branch each
    /// fact applies to; doing it twice round-trips.
    pub fn swapped(self) -> ConditionConstraints {
        ConditionConstraints {
            if_facts: self.else_facts,
            else_facts: self.if_facts,
        }
    }
}

/// Builds narrowing facts for one test expression.
///
/// Borrows the AST arena and the caller's type-evaluation capability; holds
/// no state of its own, so one value can decompose any number of condition
/// expressions.
pub struct ConditionNarrower<'a> {
    arena: &'a ExprArena,
    evaluator: &'a dyn TypeEvaluator,
}

impl<'a> ConditionNarrower<'a> {
    pub fn new(arena: &'a ExprArena, evaluator: &'a dyn TypeEvaluator) -> ConditionNarrower<'a> {
        ConditionNarrower { arena, evaluator }
    }

    /// Decompose `test`, returning per-branch facts, or `None` when the
    /// expression shape carries no narrowing information.
    pub fn build_for_condition(&self, test: ExprId) -> Option<ConditionConstraints> {
        let _span = span!(Level::TRACE, "build_for_condition", node = test.index()).entered();

        match self.arena.get(test)? {
            ExprKind::Compare { op, left, right } => {
                self.narrow_for_comparison(*op, *left, *right)
            }
            ExprKind::BoolOp {
                op: BoolOpKind::And,
                left,
                right,
            } => self.narrow_for_conjunction(*left, *right),
            ExprKind::BoolOp {
                op: BoolOpKind::Or,
                left,
                right,
            } => self.narrow_for_disjunction(*left, *right),
            ExprKind::UnaryNot { operand } => {
                Some(self.build_for_condition(*operand)?.swapped())
            }
            ExprKind::Name { .. } | ExprKind::MemberAccess { .. } => {
                self.narrow_for_truthiness_test(test)
            }
            ExprKind::Call { callee, args } => self.narrow_for_isinstance_call(*callee, args),
            ExprKind::NoneLiteral
            | ExprKind::NumberLiteral
            | ExprKind::BinaryArith { .. }
            | ExprKind::Subscript { .. }
            | ExprKind::TypeAnnotation { .. } => None,
        }
    }

    /// Assignment narrowing: `target = value` (or `target: T = value`)
    /// yields a non-conditional fact binding the target's reference to the
    /// assigned type. Unsupported target shapes (tuple unpacking and the
    /// like) are the binder's problem, not ours.
    pub fn build_for_assignment(&self, target: ExprId, assigned: Type) -> Option<NarrowingFact> {
        match self.arena.get(target)? {
            ExprKind::TypeAnnotation { expr, .. } => self.build_for_assignment(*expr, assigned),
            _ if is_narrowable_reference(self.arena, target) => {
                Some(NarrowingFact::new(target, assigned))
            }
            _ => None,
        }
    }

    /// `is` / `is not` comparisons. Two idioms narrow: a None test on a
    /// stable reference, and the exact-class test `type(x) is Y`.
    fn narrow_for_comparison(
        &self,
        op: CompareOp,
        left: ExprId,
        right: ExprId,
    ) -> Option<ConditionConstraints> {
        // `is` puts the positively-narrowed fact on the true branch;
        // `is not` inverts the assignment.
        let positive_on_true = op == CompareOp::Is;

        if matches!(self.arena.get(right)?, ExprKind::NoneLiteral)
            && is_narrowable_reference(self.arena, left)
        {
            let original = self.evaluator.evaluate(left);
            trace!(original = %original, "narrowing None test");
            return Some(self.polarity_facts(
                left,
                narrow_for_is_none(&original, true),
                narrow_for_is_none(&original, false),
                positive_on_true,
            ));
        }

        if let Some(argument) = self.type_call_argument(left) {
            let Type::Class(filter) = self.evaluator.evaluate(right) else {
                return None;
            };
            let original = self.evaluator.evaluate(argument);
            trace!(original = %original, filter = filter.name(), "narrowing type() test");
            return Some(self.polarity_facts(
                argument,
                narrow_for_is_class(&original, &filter, true),
                narrow_for_is_class(&original, &filter, false),
                positive_on_true,
            ));
        }

        None
    }

    /// `a and b`: both conjuncts hold on the true branch, so their if-facts
    /// concatenate. A false conjunction does not say which conjunct failed,
    /// so the false branch gets no facts at all.
    fn narrow_for_conjunction(&self, left: ExprId, right: ExprId) -> Option<ConditionConstraints> {
        let mut if_facts: Vec<NarrowingFact> = Vec::new();
        if let Some(lhs) = self.build_for_condition(left) {
            if_facts.extend(lhs.if_facts);
        }
        if let Some(rhs) = self.build_for_condition(right) {
            if_facts.extend(rhs.if_facts);
        }
        if if_facts.is_empty() {
            return None;
        }
        Some(ConditionConstraints {
            if_facts,
            else_facts: Vec::new(),
        })
    }

    /// `a or b`: dual of conjunction. Both disjuncts are false on the false
    /// branch; the true branch gets no facts.
    fn narrow_for_disjunction(&self, left: ExprId, right: ExprId) -> Option<ConditionConstraints> {
        let mut else_facts: Vec<NarrowingFact> = Vec::new();
        if let Some(lhs) = self.build_for_condition(left) {
            else_facts.extend(lhs.else_facts);
        }
        if let Some(rhs) = self.build_for_condition(right) {
            else_facts.extend(rhs.else_facts);
        }
        if else_facts.is_empty() {
            return None;
        }
        Some(ConditionConstraints {
            if_facts: Vec::new(),
            else_facts,
        })
    }

    /// A bare reference used as a condition: `if x:`.
    fn narrow_for_truthiness_test(&self, expr: ExprId) -> Option<ConditionConstraints> {
        if !is_narrowable_reference(self.arena, expr) {
            return None;
        }
        let original = self.evaluator.evaluate(expr);
        Some(ConditionConstraints {
            if_facts: vec![NarrowingFact::new(
                expr,
                narrow_for_truthiness(&original, true),
            )],
            else_facts: vec![NarrowingFact::new(
                expr,
                narrow_for_truthiness(&original, false),
            )],
        })
    }

    /// `isinstance(x, Y)` with exactly two arguments. `Y` must evaluate to a
    /// class, or to a tuple instance whose type arguments are all classes;
    /// one non-class element disqualifies the whole call.
    fn narrow_for_isinstance_call(
        &self,
        callee: ExprId,
        args: &[ExprId],
    ) -> Option<ConditionConstraints> {
        let ExprKind::Name { name } = self.arena.get(callee)? else {
            return None;
        };
        if self.arena.name_text(*name) != "isinstance" || args.len() != 2 {
            return None;
        }
        let target = args[0];
        if !is_narrowable_reference(self.arena, target) {
            return None;
        }
        let filters = self.isinstance_filter_classes(args[1])?;
        let original = self.evaluator.evaluate(target);
        trace!(original = %original, filters = filters.len(), "narrowing isinstance test");
        Some(ConditionConstraints {
            if_facts: vec![NarrowingFact::new(
                target,
                narrow_for_isinstance(&original, &filters, true),
            )],
            else_facts: vec![NarrowingFact::new(
                target,
                narrow_for_isinstance(&original, &filters, false),
            )],
        })
    }

    /// Extract the candidate class list from the second `isinstance`
    /// argument. Accepts a single class reference or the tuple-of-types
    /// idiom; anything else (including a tuple with one non-class element)
    /// yields `None`.
    fn isinstance_filter_classes(&self, arg: ExprId) -> Option<Vec<ClassType>> {
        match self.evaluator.evaluate(arg) {
            Type::Class(class) => Some(vec![class]),
            Type::Object(tuple) if tuple.is_builtin("tuple") => {
                let mut filters: Vec<ClassType> = Vec::with_capacity(tuple.type_args().len());
                for type_arg in tuple.type_args() {
                    let Type::Class(class) = type_arg else {
                        return None;
                    };
                    filters.push(class.clone());
                }
                Some(filters)
            }
            _ => None,
        }
    }

    /// The sole argument of a `type(...)` call, when `expr` is one and the
    /// argument is a narrowable reference.
    fn type_call_argument(&self, expr: ExprId) -> Option<ExprId> {
        let ExprKind::Call { callee, args } = self.arena.get(expr)? else {
            return None;
        };
        let ExprKind::Name { name } = self.arena.get(*callee)? else {
            return None;
        };
        if self.arena.name_text(*name) != "type" || args.len() != 1 {
            return None;
        }
        let argument = args[0];
        is_narrowable_reference(self.arena, argument).then_some(argument)
    }

    /// One fact per branch from the two polarities of a transform, assigned
    /// to branches according to the comparison operator.
    fn polarity_facts(
        &self,
        reference: ExprId,
        positive: Type,
        negative: Type,
        positive_on_true: bool,
    ) -> ConditionConstraints {
        let positive_fact = NarrowingFact::new(reference, positive);
        let negative_fact = NarrowingFact::new(reference, negative);
        if positive_on_true {
            ConditionConstraints {
                if_facts: vec![positive_fact],
                else_facts: vec![negative_fact],
            }
        } else {
            ConditionConstraints {
                if_facts: vec![negative_fact],
                else_facts: vec![positive_fact],
            }
        }
    }
}
