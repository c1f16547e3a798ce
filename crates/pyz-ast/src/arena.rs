//! ExprArena: node storage and creation methods (add_* methods).

use pyz_common::interner::{Atom, Interner};
use smallvec::SmallVec;

/// Handle to an expression node in an [`ExprArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    /// Sentinel for "no node".
    pub const NONE: ExprId = ExprId(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Comparison operators the narrowing engine dispatches on.
///
/// Python has many more comparison operators; anything that is not an
/// identity test is handed to the engine as [`ExprKind::BinaryArith`] by the
/// lowering layer, since none of them produce narrowing information.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Is,
    IsNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOpKind {
    And,
    Or,
}

/// Closed union of expression shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// A bare identifier.
    Name { name: Atom },
    /// Attribute access: `object.member`.
    MemberAccess { object: ExprId, member: Atom },
    /// A call with positional arguments only. Calls with keyword or starred
    /// arguments are lowered with `args` left empty, which makes them fail
    /// the arity checks in the narrowing engine.
    Call {
        callee: ExprId,
        args: SmallVec<[ExprId; 2]>,
    },
    /// Identity comparison: `left is right` / `left is not right`.
    Compare {
        op: CompareOp,
        left: ExprId,
        right: ExprId,
    },
    /// `left and right` / `left or right`.
    BoolOp {
        op: BoolOpKind,
        left: ExprId,
        right: ExprId,
    },
    /// `not operand`.
    UnaryNot { operand: ExprId },
    /// The `None` literal.
    NoneLiteral,
    /// A numeric literal. The value is irrelevant to narrowing.
    NumberLiteral,
    /// Any arithmetic or other non-identity binary expression.
    BinaryArith { left: ExprId, right: ExprId },
    /// Subscript access: `object[index]`.
    Subscript { object: ExprId, index: ExprId },
    /// An annotated assignment target: `expr: annotation`.
    TypeAnnotation { expr: ExprId, annotation: ExprId },
}

/// Arena owning all expression nodes and the identifier interner.
#[derive(Default)]
pub struct ExprArena {
    exprs: Vec<ExprKind>,
    interner: Interner,
}

impl ExprArena {
    pub fn new() -> ExprArena {
        ExprArena::default()
    }

    /// Get a node by handle.
    pub fn get(&self, id: ExprId) -> Option<&ExprKind> {
        if id.is_none() {
            return None;
        }
        self.exprs.get(id.0 as usize)
    }

    /// Resolve an identifier atom to its text.
    pub fn name_text(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    fn add(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(kind);
        id
    }

    pub fn add_name(&mut self, text: &str) -> ExprId {
        let name = self.interner.intern(text);
        self.add(ExprKind::Name { name })
    }

    pub fn add_member_access(&mut self, object: ExprId, member: &str) -> ExprId {
        let member = self.interner.intern(member);
        self.add(ExprKind::MemberAccess { object, member })
    }

    pub fn add_call(&mut self, callee: ExprId, args: &[ExprId]) -> ExprId {
        self.add(ExprKind::Call {
            callee,
            args: SmallVec::from_slice(args),
        })
    }

    pub fn add_compare(&mut self, op: CompareOp, left: ExprId, right: ExprId) -> ExprId {
        self.add(ExprKind::Compare { op, left, right })
    }

    pub fn add_bool_op(&mut self, op: BoolOpKind, left: ExprId, right: ExprId) -> ExprId {
        self.add(ExprKind::BoolOp { op, left, right })
    }

    pub fn add_not(&mut self, operand: ExprId) -> ExprId {
        self.add(ExprKind::UnaryNot { operand })
    }

    pub fn add_none_literal(&mut self) -> ExprId {
        self.add(ExprKind::NoneLiteral)
    }

    pub fn add_number_literal(&mut self) -> ExprId {
        self.add(ExprKind::NumberLiteral)
    }

    pub fn add_binary_arith(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.add(ExprKind::BinaryArith { left, right })
    }

    pub fn add_subscript(&mut self, object: ExprId, index: ExprId) -> ExprId {
        self.add(ExprKind::Subscript { object, index })
    }

    pub fn add_type_annotation(&mut self, expr: ExprId, annotation: ExprId) -> ExprId {
        self.add(ExprKind::TypeAnnotation { expr, annotation })
    }
}
