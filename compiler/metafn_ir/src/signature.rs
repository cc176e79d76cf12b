//! Method signature model.
//!
//! [`MethodSignature`] is the validated, immutable view of one annotated
//! method. Construction is the only place the "exactly one wrapper
//! parameter" rule is checked; everything downstream may rely on it.

use smallvec::SmallVec;

use crate::{Arity, GeneratorConfig, Location, MethodElement, Modifiers};

/// Parameter lists are short; most annotated methods take one or two.
pub type ParamList = SmallVec<[Param; 4]>;

/// Errors found while building a [`MethodSignature`].
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ModelError {
    #[error("{location}: method `{declaring_type}.{method}` has no `{wrapper}` parameter")]
    MissingFunctionParam {
        declaring_type: String,
        method: String,
        wrapper: String,
        location: Location,
    },

    #[error(
        "{location}: method `{declaring_type}.{method}` has more than one `{wrapper}` parameter ({})",
        .params.join(", ")
    )]
    AmbiguousFunctionParams {
        declaring_type: String,
        method: String,
        wrapper: String,
        params: Vec<String>,
        location: Location,
    },

    #[error("{location}: method `{declaring_type}.{method}`: only the last parameter may be variadic, `{param}` is not last")]
    MisplacedVararg {
        declaring_type: String,
        method: String,
        param: String,
        location: Location,
    },

    #[error("{location}: method `{declaring_type}.{method}`: the function parameter `{param}` cannot be variadic")]
    VariadicFunctionParam {
        declaring_type: String,
        method: String,
        param: String,
        location: Location,
    },

    #[error("{location}: method `{declaring_type}.{method}` cannot be `{modifier}`; generated overloads delegate to an overriding method")]
    IllegalModifier {
        declaring_type: String,
        method: String,
        modifier: &'static str,
        location: Location,
    },

    #[error("{location}: method `{declaring_type}.{method}` declares type parameter `{type_param}`, which generated overloads reserve")]
    TypeParamCollision {
        declaring_type: String,
        method: String,
        type_param: String,
        location: Location,
    },
}

/// One parameter of a [`MethodSignature`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: String,
    /// Declared type text; the element type when `is_vararg`.
    pub ty: String,
    /// This is the polymorphic-function slot.
    pub is_function: bool,
    /// Trailing variadic parameter.
    pub is_vararg: bool,
}

/// Validated signature of one annotated method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodSignature {
    name: String,
    return_type: String,
    type_params: Vec<String>,
    params: ParamList,
    throws: Vec<String>,
    function_index: usize,
    location: Location,
}

impl MethodSignature {
    /// Build and validate the model for `element`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] naming the method when it does not have
    /// exactly one wrapper-typed parameter, when varargs are misplaced,
    /// when the method cannot be overridden, or when its type parameters
    /// clash with the ones generated overloads introduce.
    pub fn from_element(element: &MethodElement, config: &GeneratorConfig) -> Result<Self, ModelError> {
        let declaring_type = || element.declaring_type.qualified_name();
        let location = || element.location.clone();

        for (modifier, word) in [(Modifiers::STATIC, "static"), (Modifiers::PRIVATE, "private")] {
            if element.modifiers.contains(modifier) {
                return Err(ModelError::IllegalModifier {
                    declaring_type: declaring_type(),
                    method: element.name.clone(),
                    modifier: word,
                    location: location(),
                });
            }
        }

        for type_param in &element.type_params {
            let name = type_param_name(type_param);
            if name == config.result_param || Arity::is_reserved_type_param(name) {
                return Err(ModelError::TypeParamCollision {
                    declaring_type: declaring_type(),
                    method: element.name.clone(),
                    type_param: name.to_string(),
                    location: location(),
                });
            }
        }

        let last = element.params.len().saturating_sub(1);
        let mut params = ParamList::with_capacity(element.params.len());
        let mut function_slots = Vec::new();

        for (index, param) in element.params.iter().enumerate() {
            let is_function = param.erasure == config.wrapper;
            if param.is_vararg && index != last {
                return Err(ModelError::MisplacedVararg {
                    declaring_type: declaring_type(),
                    method: element.name.clone(),
                    param: param.name.clone(),
                    location: location(),
                });
            }
            if is_function {
                if param.is_vararg {
                    return Err(ModelError::VariadicFunctionParam {
                        declaring_type: declaring_type(),
                        method: element.name.clone(),
                        param: param.name.clone(),
                        location: location(),
                    });
                }
                function_slots.push(index);
            }
            params.push(Param {
                name: param.name.clone(),
                ty: param.ty.clone(),
                is_function,
                is_vararg: param.is_vararg,
            });
        }

        let function_index = match function_slots.as_slice() {
            [index] => *index,
            [] => {
                return Err(ModelError::MissingFunctionParam {
                    declaring_type: declaring_type(),
                    method: element.name.clone(),
                    wrapper: config.wrapper.clone(),
                    location: location(),
                })
            }
            many => {
                return Err(ModelError::AmbiguousFunctionParams {
                    declaring_type: declaring_type(),
                    method: element.name.clone(),
                    wrapper: config.wrapper.clone(),
                    params: many.iter().map(|&i| params[i].name.clone()).collect(),
                    location: location(),
                })
            }
        };

        Ok(MethodSignature {
            name: element.name.clone(),
            return_type: element.return_type.clone(),
            type_params: element.type_params.clone(),
            params,
            throws: element.throws.clone(),
            function_index,
            location: element.location.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// `false` for `void` methods, whose delegating call is a bare statement.
    pub fn returns_value(&self) -> bool {
        self.return_type != "void"
    }

    pub fn type_params(&self) -> &[String] {
        &self.type_params
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn throws(&self) -> &[String] {
        &self.throws
    }

    /// Index of the polymorphic-function parameter.
    pub fn function_index(&self) -> usize {
        self.function_index
    }

    pub fn function_param(&self) -> &Param {
        &self.params[self.function_index]
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Whether any declared parameter is called `name`.
    pub fn has_param_named(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }
}

/// Name of a declared type parameter, without bounds.
fn type_param_name(declared: &str) -> &str {
    declared
        .split(|c: char| c.is_whitespace() || c == '&')
        .next()
        .unwrap_or(declared)
}

#[cfg(test)]
mod tests;
