//! Declaration Scanner
//!
//! Groups annotated methods by declaring type. The scanner is fed once per
//! host round and keeps everything it has seen until emission.

use metafn_ir::{ClassDefinition, GeneratorConfig, Location, MethodElement, MethodSignature, ModelError};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Errors that stop scanning.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Malformed(#[from] ModelError),

    #[error(
        "{second}: method `{declaring_type}.{method}` is already declared at {first}; \
         annotated methods of one type need distinct names"
    )]
    DuplicateMethod {
        declaring_type: String,
        method: String,
        first: Location,
        second: Location,
    },
}

/// Collects annotated methods into [`ClassDefinition`]s.
pub struct DeclarationScanner {
    config: GeneratorConfig,
    classes: FxHashMap<String, ClassDefinition>,
    methods: usize,
}

impl DeclarationScanner {
    pub fn new(config: GeneratorConfig) -> Self {
        DeclarationScanner {
            config,
            classes: FxHashMap::default(),
            methods: 0,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Collect a batch of elements, stopping at the first error.
    ///
    /// Returns how many methods were added.
    ///
    /// # Errors
    ///
    /// See [`DeclarationScanner::collect_one`].
    pub fn collect<'e>(
        &mut self,
        elements: impl IntoIterator<Item = &'e MethodElement>,
    ) -> Result<usize, ScanError> {
        let mut added = 0;
        for element in elements {
            self.collect_one(element)?;
            added += 1;
        }
        Ok(added)
    }

    /// Validate `element` and add it to its declaring type's definition.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Malformed`] when the method does not have
    /// exactly one wrapper parameter (or is otherwise unusable), and
    /// [`ScanError::DuplicateMethod`] when its declaring type already has an
    /// annotated method of the same name.
    pub fn collect_one(&mut self, element: &MethodElement) -> Result<(), ScanError> {
        let signature = MethodSignature::from_element(element, &self.config)?;
        let qualified = element.declaring_type.qualified_name();

        let class = self.classes.entry(qualified.clone()).or_insert_with(|| {
            debug!(class = %qualified, "new class definition");
            ClassDefinition::new(element.declaring_type.clone(), annotation_of(element, &self.config))
        });

        if let Err(existing) = class.add_method(signature) {
            return Err(ScanError::DuplicateMethod {
                declaring_type: qualified,
                method: element.name.clone(),
                first: existing.location().clone(),
                second: element.location.clone(),
            });
        }

        self.methods += 1;
        debug!(class = %qualified, method = %element.name, "collected annotated method");
        Ok(())
    }

    pub fn class(&self, qualified_name: &str) -> Option<&ClassDefinition> {
        self.classes.get(qualified_name)
    }

    /// Class definitions sorted by qualified name.
    pub fn classes(&self) -> Vec<&ClassDefinition> {
        let mut classes: Vec<(&String, &ClassDefinition)> = self.classes.iter().collect();
        classes.sort_by(|a, b| a.0.cmp(b.0));
        classes.into_iter().map(|(_, class)| class).collect()
    }

    /// Number of collected methods across all classes.
    pub fn method_count(&self) -> usize {
        self.methods
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn annotation_of(element: &MethodElement, config: &GeneratorConfig) -> String {
    if element.annotation.is_empty() {
        config.marker.clone()
    } else {
        element.annotation.clone()
    }
}
