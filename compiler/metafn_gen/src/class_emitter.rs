//! Class Emitter
//!
//! Renders one [`ClassDefinition`] as one compilation unit:
//!
//! ```text
//! // Generated by metafn from pkg.Outer.Router. Do not edit.
//! package pkg;
//!
//! import ...;
//!
//! @SuppressWarnings("unchecked")
//! abstract class Router_MetaFunction<R> {
//!     abstract ... route(..., MetaFunction<R> handler);
//!
//!     public ... route(..., Functions.F0<R> handler) { ... }
//!     ...
//! }
//! ```

use std::collections::BTreeSet;
use std::io::{self, Write};

use metafn_ir::{split_qualified, ClassDefinition, GeneratorConfig};
use tracing::debug;

use crate::emitter::StringEmitter;
use crate::filer::Filer;
use crate::generator::{OverloadGenerator, RuntimeRefs};
use crate::writer::JavaWriter;

/// Errors raised while writing generated units.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write generated unit `{destination}`: {source}")]
    Io {
        destination: String,
        #[source]
        source: io::Error,
    },

    #[error("`{first}` and `{second}` would both generate `{output}`")]
    OutputCollision {
        output: String,
        first: String,
        second: String,
    },
}

/// Imports and runtime spellings for one unit.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ImportPlan {
    pub refs: RuntimeRefs,
    /// Import targets, sorted, without `import`/`;`.
    pub imports: BTreeSet<String>,
}

/// Renders and writes class definitions.
pub struct ClassEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ClassEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        ClassEmitter { config }
    }

    /// Decide imports and how runtime types are spelled in `class`'s unit.
    ///
    /// The originating file's imports are kept so declared type text still
    /// resolves. Runtime types are imported and used by simple name unless
    /// that name is already taken in the unit, in which case they are
    /// written fully qualified. A name is taken by the output type, by
    /// another single-type import, or by any type declared in the
    /// originating file, since copied signatures may mention it.
    pub fn plan_imports(&self, class: &ClassDefinition) -> ImportPlan {
        let output_simple = class.output_simple_name(&self.config.suffix);
        let package = class.output_package();

        let mut imports = BTreeSet::new();
        for import in &class.declaring_type().imports {
            if !import.on_demand && split_qualified(&import.path).1 == output_simple {
                continue;
            }
            imports.insert(import.to_string());
        }

        let origin = class.declaring_type();
        let taken = |simple: &str| simple == output_simple || origin.declares_simple_name(simple);
        let wrapper = reference(&self.config.wrapper, package, &taken, &mut imports);
        let shapes = reference(&self.config.shapes, package, &taken, &mut imports);

        ImportPlan {
            refs: RuntimeRefs {
                wrapper,
                shapes,
                ..RuntimeRefs::qualified(self.config)
            },
            imports,
        }
    }

    /// Render the full unit text.
    pub fn render(&self, class: &ClassDefinition) -> String {
        let plan = self.plan_imports(class);
        let output_simple = class.output_simple_name(&self.config.suffix);

        let mut w = JavaWriter::new(StringEmitter::with_capacity(4096 * class.len()));
        w.comment(&format!(
            "Generated by metafn from {}. Do not edit.",
            class.qualified_name()
        ));
        w.package(class.output_package());
        w.imports(plan.imports.iter().map(String::as_str));
        w.annotation("SuppressWarnings(\"unchecked\")");
        w.begin_type(
            "abstract",
            "class",
            &format!("{output_simple}<{}>", self.config.result_param),
        );

        for (index, method) in class.methods().iter().enumerate() {
            if index > 0 {
                w.blank_line();
            }
            let generator = OverloadGenerator::new(method, &plan.refs);
            w.method(&generator.abstract_form());
            for overload in generator.overloads() {
                w.blank_line();
                w.method(&overload.decl);
            }
        }

        w.end_type();
        let mut out = w.into_inner();
        out.ensure_trailing_newline();
        out.output()
    }

    /// Render `class` and write it to `filer`; returns the unit's qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::Io`] naming the destination when the unit
    /// cannot be created, written or flushed.
    pub fn emit(&self, class: &ClassDefinition, filer: &mut dyn Filer) -> Result<String, EmitError> {
        let destination = class.output_qualified_name(&self.config.suffix);
        let text = self.render(class);
        let io_error = |source| EmitError::Io {
            destination: destination.clone(),
            source,
        };

        let mut out = filer
            .create_source_file(&destination, class.declaring_type())
            .map_err(io_error)?;
        out.write_all(text.as_bytes()).map_err(io_error)?;
        out.flush().map_err(io_error)?;
        drop(out);

        debug!(
            unit = %destination,
            origin = %class.qualified_name(),
            annotation = class.annotation(),
            methods = class.len(),
            bytes = text.len(),
            "emitted generated unit"
        );
        Ok(destination)
    }
}

/// Spelling of a runtime type in a unit, importing it when that is safe.
fn reference(
    qualified: &str,
    package: &str,
    reserved: &dyn Fn(&str) -> bool,
    imports: &mut BTreeSet<String>,
) -> String {
    let (owner, simple) = split_qualified(qualified);
    if owner.is_empty() {
        return qualified.to_string();
    }
    let taken = reserved(simple)
        || imports
            .iter()
            .any(|i| !i.ends_with(".*") && i != qualified && split_qualified(i).1 == simple);
    if taken {
        return qualified.to_string();
    }
    if owner != package {
        imports.insert(qualified.to_string());
    }
    simple.to_string()
}
