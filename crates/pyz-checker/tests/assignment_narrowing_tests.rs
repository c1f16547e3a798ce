use pyz_ast::{ExprArena, ExprId};
use pyz_checker::{ConditionNarrower, TypeEvaluator};
use pyz_solver::{ClassDef, ClassFlags, ClassType, Type};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Default)]
struct FakeEvaluator {
    types: FxHashMap<ExprId, Type>,
}

impl TypeEvaluator for FakeEvaluator {
    fn evaluate(&self, expr: ExprId) -> Type {
        self.types.get(&expr).cloned().unwrap_or(Type::Unknown)
    }
}

fn instance(def: &Arc<ClassDef>) -> Type {
    Type::Object(ClassType::new(def.clone()))
}

#[test]
fn name_target_produces_a_replacing_fact() {
    let mut arena = ExprArena::new();
    let x = arena.add_name("x");

    let int_def = ClassDef::new("int", vec![], ClassFlags::BUILTIN);
    let evaluator = FakeEvaluator::default();
    let narrower = ConditionNarrower::new(&arena, &evaluator);

    let fact = narrower
        .build_for_assignment(x, instance(&int_def))
        .expect("name targets are narrowable");
    assert!(!fact.is_conditional());
    assert_eq!(fact.reference(), x);
    assert_eq!(fact.apply_to(&arena, x, &Type::Unknown), instance(&int_def));
}

#[test]
fn annotated_target_recurses_to_inner_expression() {
    let mut arena = ExprArena::new();
    let x = arena.add_name("x");
    let annotation = arena.add_name("int");
    let annotated = arena.add_type_annotation(x, annotation);

    let int_def = ClassDef::new("int", vec![], ClassFlags::BUILTIN);
    let evaluator = FakeEvaluator::default();
    let narrower = ConditionNarrower::new(&arena, &evaluator);

    let fact = narrower
        .build_for_assignment(annotated, instance(&int_def))
        .expect("annotated targets narrow through their inner expression");
    assert_eq!(fact.reference(), x);
}

#[test]
fn attribute_chain_target_is_narrowable() {
    let mut arena = ExprArena::new();
    let root = arena.add_name("self");
    let field = arena.add_member_access(root, "value");

    let str_def = ClassDef::new("str", vec![], ClassFlags::BUILTIN);
    let evaluator = FakeEvaluator::default();
    let narrower = ConditionNarrower::new(&arena, &evaluator);

    let fact = narrower
        .build_for_assignment(field, instance(&str_def))
        .expect("attribute chains are narrowable");
    assert_eq!(fact.reference(), field);
}

#[test]
fn unsupported_targets_produce_no_fact() {
    let mut arena = ExprArena::new();
    let items = arena.add_name("items");
    let index = arena.add_number_literal();
    let subscript = arena.add_subscript(items, index);
    let func = arena.add_name("target");
    let call = arena.add_call(func, &[]);

    let int_def = ClassDef::new("int", vec![], ClassFlags::BUILTIN);
    let evaluator = FakeEvaluator::default();
    let narrower = ConditionNarrower::new(&arena, &evaluator);

    assert!(
        narrower
            .build_for_assignment(subscript, instance(&int_def))
            .is_none()
    );
    assert!(
        narrower
            .build_for_assignment(call, instance(&int_def))
            .is_none()
    );
}
