//! Overload Generator
//!
//! For one [`MethodSignature`] with its function parameter at index `k`,
//! produces:
//!
//! - the **abstract form**: the signature with slot `k` retyped to the
//!   wrapper over the result parameter `R`; every overload delegates to it;
//! - one **overload per arity** `i` in `0..=10`: slot `k` retyped to shape
//!   `Fi<T0..T(i-1), R>`, with a body that wraps the caller's typed function
//!   in an adapter and calls the abstract form.
//!
//! The adapter casts raw argument slot `j` to `Tj`. The casts are unchecked:
//! the overload's own static signature is what matches argument count and
//! types, so they only fail for callers that bypass the overloads and build
//! a wrapper by hand.

use metafn_ir::{Arity, GeneratorConfig, MethodSignature};

/// How generated code spells the runtime collaborators.
///
/// [`ClassEmitter`](crate::ClassEmitter) decides per unit whether simple
/// names are safe to use; [`RuntimeRefs::qualified`] always is.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RuntimeRefs {
    /// Wrapper type as written in generated code.
    pub wrapper: String,
    /// Shape container as written in generated code.
    pub shapes: String,
    pub factory: String,
    pub shape_prefix: String,
    pub result_param: String,
    pub adapter_base: String,
}

impl RuntimeRefs {
    /// References using fully-qualified names only.
    pub fn qualified(config: &GeneratorConfig) -> Self {
        RuntimeRefs {
            wrapper: config.wrapper.clone(),
            shapes: config.shapes.clone(),
            factory: config.factory.clone(),
            shape_prefix: config.shape_prefix.clone(),
            result_param: config.result_param.clone(),
            adapter_base: config.adapter_base.clone(),
        }
    }

    /// `MetaFunction<R>`
    pub fn wrapper_type(&self) -> String {
        format!("{}<{}>", self.wrapper, self.result_param)
    }

    /// `Functions.F2<T0, T1, R>`
    pub fn shape_type(&self, arity: Arity) -> String {
        let mut args: Vec<&str> = arity.type_params().to_vec();
        args.push(&self.result_param);
        format!(
            "{}.{}<{}>",
            self.shapes,
            arity.shape_name(&self.shape_prefix),
            args.join(", ")
        )
    }
}

/// A parameter of a generated method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DeclParam {
    pub ty: String,
    pub name: String,
    pub is_vararg: bool,
}

/// A generated method declaration, ready for [`JavaWriter::method`](crate::JavaWriter::method).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDecl {
    pub modifiers: &'static str,
    pub type_params: Vec<String>,
    pub return_type: String,
    pub name: String,
    pub params: Vec<DeclParam>,
    pub throws: Vec<String>,
    /// Single body statement without the trailing `;`. `None` for abstract forms.
    pub body: Option<String>,
}

/// One concrete overload; only lives while its unit is being emitted.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratedOverload {
    pub arity: Arity,
    /// Adapter construction expression passed in place of the function slot.
    pub adapter: String,
    pub decl: MethodDecl,
}

impl GeneratedOverload {
    /// Type parameters this overload introduces on top of the method's own.
    pub fn introduced_type_params(&self) -> &'static [&'static str] {
        self.arity.type_params()
    }
}

/// Pick the raw-arguments identifier for a method's adapters.
///
/// Tries `base`, `base0`, `base1`, … and returns the first name no
/// parameter of `signature` uses. A lambda parameter may not redeclare a
/// local, and silently capturing one would change what the adapter reads.
pub fn adapter_name(signature: &MethodSignature, base: &str) -> String {
    if !signature.has_param_named(base) {
        return base.to_string();
    }
    let mut suffix = 0usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if !signature.has_param_named(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Generates the abstract form and overloads of one method.
pub struct OverloadGenerator<'a> {
    signature: &'a MethodSignature,
    refs: &'a RuntimeRefs,
    adapter_array: String,
}

impl<'a> OverloadGenerator<'a> {
    pub fn new(signature: &'a MethodSignature, refs: &'a RuntimeRefs) -> Self {
        let adapter_array = adapter_name(signature, &refs.adapter_base);
        OverloadGenerator {
            signature,
            refs,
            adapter_array,
        }
    }

    /// Identifier of the raw-arguments array inside every adapter.
    pub fn adapter_array(&self) -> &str {
        &self.adapter_array
    }

    /// The declaration every overload delegates to.
    pub fn abstract_form(&self) -> MethodDecl {
        MethodDecl {
            modifiers: "abstract",
            type_params: self.signature.type_params().to_vec(),
            return_type: self.signature.return_type().to_string(),
            name: self.signature.name().to_string(),
            params: self.params_with(&self.refs.wrapper_type()),
            throws: self.signature.throws().to_vec(),
            body: None,
        }
    }

    /// The overload accepting a function of `arity` parameters.
    pub fn overload(&self, arity: Arity) -> GeneratedOverload {
        let signature = self.signature;
        let array = &self.adapter_array;

        let casts: Vec<String> = arity
            .slots()
            .map(|(slot, ty)| format!("({ty}) {array}[{slot}]"))
            .collect();
        let adapter = format!(
            "{}.<{}>{}({array} -> {}.apply({}))",
            self.refs.wrapper,
            self.refs.result_param,
            self.refs.factory,
            signature.function_param().name,
            casts.join(", ")
        );

        let forwarded: Vec<&str> = signature
            .params()
            .iter()
            .enumerate()
            .map(|(index, param)| {
                if index == signature.function_index() {
                    adapter.as_str()
                } else {
                    param.name.as_str()
                }
            })
            .collect();
        let call = format!("{}({})", signature.name(), forwarded.join(", "));
        let body = if signature.returns_value() {
            format!("return {call}")
        } else {
            call
        };

        let mut type_params = signature.type_params().to_vec();
        type_params.extend(arity.type_params().iter().map(ToString::to_string));

        let decl = MethodDecl {
            modifiers: "public",
            type_params,
            return_type: signature.return_type().to_string(),
            name: signature.name().to_string(),
            params: self.params_with(&self.refs.shape_type(arity)),
            throws: signature.throws().to_vec(),
            body: Some(body),
        };

        GeneratedOverload {
            arity,
            adapter,
            decl,
        }
    }

    /// All overloads, arity 0 through 10.
    pub fn overloads(&self) -> impl Iterator<Item = GeneratedOverload> + '_ {
        Arity::ALL.into_iter().map(|arity| self.overload(arity))
    }

    /// Declared parameters with the function slot retyped to `slot_ty`.
    fn params_with(&self, slot_ty: &str) -> Vec<DeclParam> {
        let function_index = self.signature.function_index();
        self.signature
            .params()
            .iter()
            .enumerate()
            .map(|(index, param)| DeclParam {
                ty: if index == function_index {
                    slot_ty.to_string()
                } else {
                    param.ty.clone()
                },
                name: param.name.clone(),
                is_vararg: param.is_vararg,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
