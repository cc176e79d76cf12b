//! Per-declaring-type grouping of annotated methods.

use rustc_hash::FxHashMap;

use crate::{DeclaringType, MethodSignature};

/// All annotated methods of one declaring type; the unit of output.
///
/// Methods keep collection order so emission is reproducible. Names are
/// unique: a second method with a known name is handed back to the caller
/// instead of replacing the first.
#[derive(Clone, Debug)]
pub struct ClassDefinition {
    declaring_type: DeclaringType,
    annotation: String,
    methods: Vec<MethodSignature>,
    by_name: FxHashMap<String, usize>,
}

impl ClassDefinition {
    /// Start a definition for `declaring_type`, first seen through `annotation`.
    pub fn new(declaring_type: DeclaringType, annotation: impl Into<String>) -> Self {
        ClassDefinition {
            declaring_type,
            annotation: annotation.into(),
            methods: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn declaring_type(&self) -> &DeclaringType {
        &self.declaring_type
    }

    /// Annotation that triggered collection of this type.
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub fn qualified_name(&self) -> String {
        self.declaring_type.qualified_name()
    }

    /// Package the generated type is declared in.
    pub fn output_package(&self) -> &str {
        &self.declaring_type.package
    }

    pub fn output_simple_name(&self, suffix: &str) -> String {
        self.declaring_type.output_simple_name(suffix)
    }

    pub fn output_qualified_name(&self, suffix: &str) -> String {
        self.declaring_type.output_qualified_name(suffix)
    }

    /// Add a method.
    ///
    /// # Errors
    ///
    /// Returns the already registered method when one with the same
    /// name exists; the definition is left unchanged.
    pub fn add_method(&mut self, signature: MethodSignature) -> Result<(), &MethodSignature> {
        if let Some(&existing) = self.by_name.get(signature.name()) {
            return Err(&self.methods[existing]);
        }
        self.by_name
            .insert(signature.name().to_string(), self.methods.len());
        self.methods.push(signature);
        Ok(())
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.by_name.get(name).map(|&index| &self.methods[index])
    }

    /// Methods in collection order.
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
