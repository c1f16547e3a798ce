use crate::types::*;
use std::sync::Arc;

fn class(name: &str) -> Arc<ClassDef> {
    ClassDef::new(name, vec![], ClassFlags::empty())
}

fn instance(def: &Arc<ClassDef>) -> Type {
    Type::Object(ClassType::new(def.clone()))
}

#[test]
fn test_combine_empty_is_never() {
    assert_eq!(combine_types(vec![]), Type::Never);
}

#[test]
fn test_combine_singleton_collapses() {
    let int_def = class("int");
    let combined = combine_types(vec![instance(&int_def)]);
    assert_eq!(combined, instance(&int_def));
}

#[test]
fn test_combine_excludes_never() {
    let int_def = class("int");
    let combined = combine_types(vec![instance(&int_def), Type::Never]);
    assert_eq!(combined, instance(&int_def));

    // All-never input still collapses to never.
    assert_eq!(combine_types(vec![Type::Never, Type::Never]), Type::Never);
}

#[test]
fn test_combine_flattens_nested_unions() {
    let int_def = class("int");
    let str_def = class("str");
    let inner = combine_types(vec![instance(&str_def), Type::None]);
    let combined = combine_types(vec![instance(&int_def), inner]);
    let Type::Union(members) = &combined else {
        panic!("expected a union, got {combined}");
    };
    assert_eq!(members.len(), 3);
    assert!(members.iter().all(|m| !matches!(m, Type::Union(_))));
}

#[test]
fn test_combine_deduplicates_preserving_order() {
    let int_def = class("int");
    let str_def = class("str");
    let combined = combine_types(vec![
        instance(&int_def),
        instance(&str_def),
        instance(&int_def),
    ]);
    let Type::Union(members) = &combined else {
        panic!("expected a union, got {combined}");
    };
    assert_eq!(members.len(), 2);
    assert_eq!(members[0], instance(&int_def));
    assert_eq!(members[1], instance(&str_def));
}

#[test]
fn test_class_identity_is_by_definition_not_name() {
    let a = class("Widget");
    let b = class("Widget");
    let ca = ClassType::new(a.clone());
    let cb = ClassType::new(b.clone());
    assert!(ca.is_same_generic_class(&ClassType::new(a)));
    assert!(!ca.is_same_generic_class(&cb));
}

#[test]
fn test_same_generic_class_ignores_type_args() {
    let list_def = class("list");
    let int_def = class("int");
    let bare = ClassType::new(list_def.clone());
    let applied = ClassType::with_type_args(list_def, vec![instance(&int_def)]);
    assert!(bare.is_same_generic_class(&applied));
    // But the ClassType values themselves compare unequal.
    assert_ne!(Type::Object(bare), Type::Object(applied));
}

#[test]
fn test_is_derived_from_walks_bases() {
    let animal = class("Animal");
    let dog = ClassDef::new("Dog", vec![animal.clone()], ClassFlags::empty());
    let puppy = ClassDef::new("Puppy", vec![dog.clone()], ClassFlags::empty());

    let animal_ref = ClassType::new(animal);
    let dog_ref = ClassType::new(dog);
    let puppy_ref = ClassType::new(puppy);

    assert!(dog_ref.is_derived_from(&animal_ref));
    assert!(puppy_ref.is_derived_from(&animal_ref));
    assert!(dog_ref.is_derived_from(&dog_ref));
    assert!(!animal_ref.is_derived_from(&dog_ref));
}

#[test]
fn test_builtin_queries() {
    let tuple_def = ClassDef::new("tuple", vec![], ClassFlags::BUILTIN);
    let user_tuple = class("tuple");
    assert!(ClassType::new(tuple_def).is_builtin("tuple"));
    assert!(!ClassType::new(user_tuple).is_builtin("tuple"));
}

#[test]
fn test_display() {
    let int_def = class("int");
    let combined = combine_types(vec![instance(&int_def), Type::None]);
    assert_eq!(combined.to_string(), "int | None");
    assert_eq!(Type::Class(ClassType::new(int_def)).to_string(), "type[int]");
    assert_eq!(Type::Never.to_string(), "Never");
}

#[test]
fn test_subtypes_view() {
    let int_def = class("int");
    let single = instance(&int_def);
    assert_eq!(single.subtypes(), std::slice::from_ref(&single));

    let union = combine_types(vec![instance(&int_def), Type::None]);
    assert_eq!(union.subtypes().len(), 2);
}
