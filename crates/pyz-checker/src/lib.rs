//! Narrowing constraint construction for flow-sensitive type checking.
//!
//! Given a boolean test expression used as a branch condition, this crate
//! computes the narrowing facts that hold along the "condition true" path
//! and the "condition false" path:
//!
//! ```python
//! def greet(name: str | None):
//!     if name is not None:
//!         # ConditionNarrower sees `name is not None` and returns an
//!         # if-branch fact narrowing `name` to str
//!         print(name.upper())
//!     else:
//!         # ... and an else-branch fact narrowing `name` to None
//!         print("anonymous")
//! ```
//!
//! This module is organized into several submodules:
//! - `evaluator` - the injected type-evaluation capability
//! - `reference_matcher` - which expressions are stable enough to narrow
//! - `narrowing_fact` - one narrowing fact and its application rule
//! - `condition_narrowing` - recursive decomposition of test expressions
//!
//! The control-flow engine that decides where the facts apply is a consumer
//! of this crate, not part of it. Everything here is pure and total:
//! unsupported condition shapes degrade to "no information", never an error.

pub mod condition_narrowing;
pub mod evaluator;
pub mod narrowing_fact;
pub mod reference_matcher;

pub use condition_narrowing::{ConditionConstraints, ConditionNarrower};
pub use evaluator::TypeEvaluator;
pub use narrowing_fact::NarrowingFact;
pub use reference_matcher::{is_narrowable_reference, references_match};
