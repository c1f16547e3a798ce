//! Pure narrowing transforms.
//!
//! Each transform takes the original (possibly union) type of a reference
//! and the branch polarity (`positive` = the branch where the condition
//! held) and returns the narrowed type. None of them consult the AST; the
//! condition-shape dispatch that decides *which* transform applies lives in
//! `pyz-checker`.
//!
//! All transforms are conservative: a subtype the transform cannot reason
//! about passes through unchanged, and an impossible branch collapses to
//! `Never` rather than raising.

use tracing::{Level, span, trace};

use crate::types::{ClassType, Type, combine_types};

/// True for the two subtypes the `x is None` test treats as "on the None
/// side": `None` itself and the empty type.
pub fn is_none_or_never(ty: &Type) -> bool {
    matches!(ty, Type::None | Type::Never)
}

/// Whether a value of this type can evaluate truthy.
///
/// `None` and `Never` cannot; neither can an instance of a class whose
/// protocol pins it falsy (`ALWAYS_FALSY`). Everything else might.
pub fn can_be_truthy(ty: &Type) -> bool {
    match ty {
        Type::None | Type::Never => false,
        Type::Object(class) => !class.is_always_falsy(),
        Type::Union(members) => members.iter().any(can_be_truthy),
        Type::Unknown | Type::Any | Type::Unbound | Type::Class(_) => true,
    }
}

/// Whether a value of this type can evaluate falsy.
///
/// Class objects are always truthy. Instances are assumed falsy-capable
/// because the type level cannot distinguish `0` from other ints or `""`
/// from other strings.
pub fn can_be_falsy(ty: &Type) -> bool {
    match ty {
        Type::None | Type::Never => true,
        Type::Class(_) => false,
        Type::Object(_) => true,
        Type::Union(members) => members.iter().any(can_be_falsy),
        Type::Unknown | Type::Any | Type::Unbound => true,
    }
}

/// Narrow for a bare truthiness test: `if x:` (positive) / `if not x:`
/// (negative, via branch swap).
pub fn narrow_for_truthiness(ty: &Type, positive: bool) -> Type {
    let _span = span!(Level::TRACE, "narrow_for_truthiness", positive).entered();

    // A truthiness test on Any/Unknown teaches us nothing.
    if ty.is_any_or_unknown() {
        return ty.clone();
    }

    let keep = if positive { can_be_truthy } else { can_be_falsy };
    let survivors: Vec<Type> = ty.subtypes().iter().filter(|t| keep(t)).cloned().collect();
    let narrowed = combine_types(survivors);
    trace!(original = %ty, narrowed = %narrowed, "truthiness narrowing");
    narrowed
}

/// Narrow for `x is None` (positive) / `x is not None` (negative).
pub fn narrow_for_is_none(ty: &Type, positive: bool) -> Type {
    let _span = span!(Level::TRACE, "narrow_for_is_none", positive).entered();

    match ty {
        Type::Union(members) => {
            let survivors: Vec<Type> = members
                .iter()
                .filter(|member| {
                    member.is_any_or_unknown() || is_none_or_never(member) == positive
                })
                .cloned()
                .collect();
            combine_types(survivors)
        }
        Type::None | Type::Never => {
            if positive {
                ty.clone()
            } else {
                // `x is not None` on a statically-None value: the branch is
                // unreachable.
                Type::Never
            }
        }
        _ => ty.clone(),
    }
}

/// Narrow for `type(x) is Y`.
///
/// Unlike `isinstance`, this is an exact-class test: an instance survives
/// the positive branch only when its class is the very same generic class
/// as `Y`, never a subclass of it.
pub fn narrow_for_is_class(ty: &Type, class: &ClassType, positive: bool) -> Type {
    let _span = span!(Level::TRACE, "narrow_for_is_class", class = class.name(), positive)
        .entered();

    let mut survivors: Vec<Type> = Vec::new();
    for subtype in ty.subtypes() {
        match subtype {
            Type::Object(subtype_class) => {
                if subtype_class.is_same_generic_class(class) == positive {
                    survivors.push(subtype.clone());
                }
            }
            Type::None | Type::Never => {
                if !positive {
                    survivors.push(subtype.clone());
                }
            }
            // Nothing was established about other shapes; keep them in both
            // branches.
            _ => survivors.push(subtype.clone()),
        }
    }
    combine_types(survivors)
}

/// Narrow for `isinstance(x, Y)` / `isinstance(x, (Y, Z, ...))`.
///
/// For each instance subtype `V` of the original type and each filter class
/// `F`:
/// - `F` a superclass of `V`: `V` already satisfies the test, keep it as is.
/// - `F` a subclass of `V`: the test would prove the more specific class,
///   keep `F` instead.
/// - unrelated: `V` cannot satisfy the test through `F`.
///
/// The negative branch keeps `V` only when no filter class is a superclass
/// of it; a subclass-only match is not enough to exclude `V` from the else
/// branch, since an arbitrary `V` need not be one of its own subclasses.
pub fn narrow_for_isinstance(ty: &Type, filter_classes: &[ClassType], positive: bool) -> Type {
    let _span = span!(
        Level::TRACE,
        "narrow_for_isinstance",
        filters = filter_classes.len(),
        positive
    )
    .entered();

    let mut survivors: Vec<Type> = Vec::new();
    for subtype in ty.subtypes() {
        match subtype {
            Type::Any | Type::Unknown => survivors.push(subtype.clone()),
            Type::Object(value_class) => {
                let mut found_superclass = false;
                let mut positive_matches: Vec<Type> = Vec::new();
                for filter in filter_classes {
                    let is_superclass = value_class.is_derived_from(filter);
                    let is_subclass = filter.is_derived_from(value_class);
                    if is_superclass {
                        found_superclass = true;
                        positive_matches.push(subtype.clone());
                    } else if is_subclass {
                        positive_matches.push(Type::Object(filter.clone()));
                    }
                }
                if positive {
                    survivors.append(&mut positive_matches);
                } else if !found_superclass {
                    survivors.push(subtype.clone());
                }
            }
            // None, Never, Unbound, and class objects can never satisfy an
            // isinstance test.
            _ => {
                if !positive {
                    survivors.push(subtype.clone());
                }
            }
        }
    }
    let narrowed = combine_types(survivors);
    trace!(original = %ty, narrowed = %narrowed, "isinstance narrowing");
    narrowed
}
