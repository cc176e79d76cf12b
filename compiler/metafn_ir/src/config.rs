//! Generator configuration.
//!
//! Names of the marker annotation and of the external runtime types the
//! generated code references. The defaults match the `metafunction`
//! runtime package.

use crate::split_qualified;

/// Names the generator reads and writes.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratorConfig {
    /// Qualified name of the marker annotation.
    pub marker: String,
    /// Qualified name of the array-based wrapper type.
    pub wrapper: String,
    /// Static factory on the wrapper taking a raw-arguments function.
    pub factory: String,
    /// Qualified name of the type holding the function-shape interfaces.
    pub shapes: String,
    /// Prefix of the shape interfaces inside `shapes` (`F` → `F0`..`F10`).
    pub shape_prefix: String,
    /// Appended to the originating simple name to name the output type.
    pub suffix: String,
    /// Type parameter of the output type standing for the function result.
    pub result_param: String,
    /// First candidate for the adapter's raw-arguments identifier.
    pub adapter_base: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            marker: "metafunction.MetaMethod".to_string(),
            wrapper: "metafunction.MetaFunction".to_string(),
            factory: "of".to_string(),
            shapes: "metafunction.Functions".to_string(),
            shape_prefix: "F".to_string(),
            suffix: "_MetaFunction".to_string(),
            result_param: "R".to_string(),
            adapter_base: "args".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Simple name of the marker annotation.
    pub fn marker_simple_name(&self) -> &str {
        split_qualified(&self.marker).1
    }

    /// Whether an annotation written as `name` refers to the marker.
    pub fn is_marker(&self, name: &str) -> bool {
        name == self.marker || name == self.marker_simple_name()
    }
}
