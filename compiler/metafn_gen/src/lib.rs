//! metafn Generator
//!
//! Turns annotated method declarations into arity-indexed overloads.
//!
//! # Architecture
//!
//! Data flows strictly one way:
//!
//! 1. **Scan**: [`DeclarationScanner`] validates each [`MethodElement`] and
//!    groups it into the [`ClassDefinition`] of its declaring type.
//! 2. **Generate**: [`OverloadGenerator`] produces, per method, one abstract
//!    form plus one overload per arity `0..=10`.
//! 3. **Emit**: [`ClassEmitter`] renders one compilation unit per class
//!    definition through [`JavaWriter`] and writes it to a [`Filer`].
//!
//! [`Processor`] drives the three steps across the rounds of a host build
//! and guarantees a single emission.
//!
//! [`MethodElement`]: metafn_ir::MethodElement
//! [`ClassDefinition`]: metafn_ir::ClassDefinition

pub mod class_emitter;
pub mod driver;
pub mod emitter;
pub mod filer;
pub mod generator;
pub mod scanner;
pub mod writer;

pub use class_emitter::{ClassEmitter, EmitError, ImportPlan};
pub use driver::{emit_all, ProcessError, Processor, Round, RoundOutcome};
pub use emitter::{Emitter, StringEmitter};
pub use filer::{DirectoryFiler, Filer, MemoryFiler};
pub use generator::{
    adapter_name, DeclParam, GeneratedOverload, MethodDecl, OverloadGenerator, RuntimeRefs,
};
pub use scanner::{DeclarationScanner, ScanError};
pub use writer::JavaWriter;
