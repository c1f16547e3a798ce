//! The type taxonomy the narrowing transforms operate over.
//!
//! `Type` is a closed tagged union; every transform in this crate pattern
//! matches it exhaustively, so adding a variant is a compile-time event for
//! all of them. Class identity is `Arc` pointer identity on the underlying
//! `ClassDef`: two `ClassType`s are the same generic class iff they share a
//! definition, regardless of type arguments.

use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

bitflags! {
    /// Per-class-definition flags consulted during narrowing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ClassFlags: u8 {
        /// Declared in the builtins scope (`int`, `str`, `tuple`, ...).
        const BUILTIN = 1 << 0;
        /// Compiler-synthesized generic alias marker (`List`, `Dict`, ...).
        /// The evaluator computes these through its own dedicated path, so
        /// narrowing facts must not clobber them.
        const SPECIAL_BUILTIN = 1 << 1;
        /// Instances are statically known to always be falsy by protocol.
        const ALWAYS_FALSY = 1 << 2;
    }
}

/// A class definition: the nominal identity narrowing reasons about.
#[derive(Debug)]
pub struct ClassDef {
    name: String,
    bases: Vec<Arc<ClassDef>>,
    flags: ClassFlags,
}

impl ClassDef {
    pub fn new(name: &str, bases: Vec<Arc<ClassDef>>, flags: ClassFlags) -> Arc<ClassDef> {
        Arc::new(ClassDef {
            name: name.to_string(),
            bases,
            flags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Arc<ClassDef>] {
        &self.bases
    }

    pub fn flags(&self) -> ClassFlags {
        self.flags
    }
}

/// A reference to a class together with its generic arguments.
#[derive(Clone, Debug)]
pub struct ClassType {
    def: Arc<ClassDef>,
    type_args: Vec<Type>,
}

impl ClassType {
    pub fn new(def: Arc<ClassDef>) -> ClassType {
        ClassType {
            def,
            type_args: Vec::new(),
        }
    }

    pub fn with_type_args(def: Arc<ClassDef>, type_args: Vec<Type>) -> ClassType {
        ClassType { def, type_args }
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }

    pub fn type_args(&self) -> &[Type] {
        &self.type_args
    }

    /// True iff this class and `other` share a class definition, ignoring
    /// type arguments. This is the `type(x) is Y` notion of identity.
    pub fn is_same_generic_class(&self, other: &ClassType) -> bool {
        Arc::ptr_eq(&self.def, &other.def)
    }

    /// Reflexive-transitive walk of the base-class graph, ignoring type
    /// arguments.
    pub fn is_derived_from(&self, other: &ClassType) -> bool {
        fn walk(def: &Arc<ClassDef>, target: &Arc<ClassDef>) -> bool {
            if Arc::ptr_eq(def, target) {
                return true;
            }
            def.bases().iter().any(|base| walk(base, target))
        }
        walk(&self.def, &other.def)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.def.flags().contains(ClassFlags::BUILTIN) && self.def.name() == name
    }

    pub fn is_special_builtin(&self) -> bool {
        self.def.flags().contains(ClassFlags::SPECIAL_BUILTIN)
    }

    /// Instances of this class are statically known to be falsy.
    pub fn is_always_falsy(&self) -> bool {
        self.def.flags().contains(ClassFlags::ALWAYS_FALSY)
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &ClassType) -> bool {
        Arc::ptr_eq(&self.def, &other.def) && self.type_args == other.type_args
    }
}

impl Eq for ClassType {}

/// Closed tagged union of all type shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// Unannotated and unknown; matches any test outcome, never filtered.
    Unknown,
    /// Explicit `Any`; same narrowing behavior as `Unknown`.
    Any,
    /// Possibly-unassigned sentinel.
    Unbound,
    /// The empty type; a branch narrowed to `Never` is unreachable.
    Never,
    /// The type of the `None` singleton.
    None,
    /// The class object itself.
    Class(ClassType),
    /// An instance of a class.
    Object(ClassType),
    /// Non-empty disjunction. Always flattened, deduplicated, and never a
    /// singleton; use [`combine_types`] to build one.
    Union(Vec<Type>),
}

impl Type {
    pub fn is_any_or_unknown(&self) -> bool {
        matches!(self, Type::Any | Type::Unknown)
    }

    /// View this type as its list of subtypes: a union's members, or the
    /// type itself as a singleton list.
    pub fn subtypes(&self) -> &[Type] {
        match self {
            Type::Union(members) => members,
            _ => std::slice::from_ref(self),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unknown => write!(f, "Unknown"),
            Type::Any => write!(f, "Any"),
            Type::Unbound => write!(f, "Unbound"),
            Type::Never => write!(f, "Never"),
            Type::None => write!(f, "None"),
            Type::Class(class) => write!(f, "type[{}]", class.name()),
            Type::Object(class) => write!(f, "{}", class.name()),
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

/// Normalizing union constructor.
///
/// Enforces the canonical shape every transform relies on: nested unions are
/// flattened, duplicate members dropped (first occurrence wins the ordering),
/// `Never` members dropped (union identity), an empty result collapses to
/// `Never`, and a single survivor is returned unwrapped.
pub fn combine_types(types: Vec<Type>) -> Type {
    let mut members: Vec<Type> = Vec::with_capacity(types.len());
    for ty in types {
        match ty {
            Type::Union(nested) => {
                for member in nested {
                    // Members of a well-formed union are already flat.
                    if !members.contains(&member) {
                        members.push(member);
                    }
                }
            }
            Type::Never => {}
            _ => {
                if !members.contains(&ty) {
                    members.push(ty);
                }
            }
        }
    }

    match members.len() {
        0 => Type::Never,
        1 => members.pop().unwrap_or(Type::Never),
        _ => Type::Union(members),
    }
}
