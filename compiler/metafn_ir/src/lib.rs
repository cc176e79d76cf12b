//! metafn IR - Declaration Model
//!
//! Plain data describing the methods a host hands to the generator:
//! - [`MethodElement`]: one annotated method as discovered by the host
//! - [`MethodSignature`]: the validated model the generator works on
//! - [`ClassDefinition`]: all annotated methods of one declaring type
//! - [`Arity`]: the fixed catalog of function arities `0..=10`
//!
//! Nothing in this crate touches a live compiler or source file. Hosts
//! build [`MethodElement`]s from whatever introspection they have; all
//! downstream logic only sees the types defined here.

mod arity;
mod class_def;
mod config;
mod element;
mod signature;

pub use arity::{Arity, MAX_ARITY};
pub use class_def::ClassDefinition;
pub use config::GeneratorConfig;
pub use element::{DeclaringType, Import, Location, MethodElement, Modifiers, ParamElement};
pub use signature::{MethodSignature, ModelError, Param, ParamList};

/// Split a dotted name into its qualifier and simple name.
///
/// `"a.b.C"` → `("a.b", "C")`, `"C"` → `("", "C")`.
pub fn split_qualified(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) => (&name[..dot], &name[dot + 1..]),
        None => ("", name),
    }
}
