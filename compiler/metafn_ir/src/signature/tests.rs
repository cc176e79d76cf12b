use pretty_assertions::assert_eq;

use super::*;
use crate::{DeclaringType, ParamElement};

const WRAPPER: &str = "metafunction.MetaFunction";

fn router() -> DeclaringType {
    DeclaringType::new("metafunction", ["MetaFunctionTest", "RouterExample"])
}

fn wrapper_param(name: &str) -> ParamElement {
    ParamElement::new(name, "MetaFunction<Object>", WRAPPER)
}

fn route(params: Vec<ParamElement>) -> MethodElement {
    MethodElement::new(router(), "route", "RouterExample", params)
        .with_location(Location::new("MetaFunctionTest.java", 7))
}

#[test]
fn finds_function_slot_after_leading_param() {
    let element = route(vec![
        ParamElement::new("path", "String", "java.lang.String"),
        wrapper_param("handler"),
    ]);
    let Ok(signature) = MethodSignature::from_element(&element, &GeneratorConfig::default()) else {
        panic!("expected a valid signature");
    };
    assert_eq!(signature.function_index(), 1);
    assert_eq!(signature.function_param().name, "handler");
    assert!(signature.function_param().is_function);
    assert!(!signature.params()[0].is_function);
    assert!(signature.returns_value());
}

#[test]
fn void_return_has_no_value() {
    let element = MethodElement::new(
        DeclaringType::new("metafunction", ["FunctionApplier"]),
        "when",
        "void",
        vec![wrapper_param("function")],
    );
    let signature = MethodSignature::from_element(&element, &GeneratorConfig::default());
    assert!(signature.is_ok_and(|s| !s.returns_value()));
}

#[test]
fn missing_function_param_names_the_method() {
    let element = route(vec![ParamElement::new("path", "String", "java.lang.String")]);
    let Err(err) = MethodSignature::from_element(&element, &GeneratorConfig::default()) else {
        panic!("expected a missing-parameter error");
    };
    assert!(matches!(err, ModelError::MissingFunctionParam { .. }));
    assert_eq!(
        err.to_string(),
        "MetaFunctionTest.java:7: method `metafunction.MetaFunctionTest.RouterExample.route` \
         has no `metafunction.MetaFunction` parameter"
    );
}

#[test]
fn two_function_params_are_rejected() {
    let element = route(vec![wrapper_param("first"), wrapper_param("second")]);
    let Err(err) = MethodSignature::from_element(&element, &GeneratorConfig::default()) else {
        panic!("expected an ambiguity error");
    };
    let ModelError::AmbiguousFunctionParams { params, method, .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(method, "route");
    assert_eq!(params, &vec!["first".to_string(), "second".to_string()]);
    assert!(err.to_string().contains("(first, second)"));
}

#[test]
fn wrapper_is_matched_by_erasure_not_text() {
    // Same simple name, different package.
    let element = route(vec![ParamElement::new("handler", "MetaFunction<Object>", "other.MetaFunction")]);
    assert!(matches!(
        MethodSignature::from_element(&element, &GeneratorConfig::default()),
        Err(ModelError::MissingFunctionParam { .. })
    ));
}

#[test]
fn trailing_vararg_is_kept() {
    let element = MethodElement::new(
        DeclaringType::new("metafunction", ["Named"]),
        "go",
        "String",
        vec![wrapper_param("func"), ParamElement::new("args", "Object", "java.lang.Object").vararg()],
    );
    let Ok(signature) = MethodSignature::from_element(&element, &GeneratorConfig::default()) else {
        panic!("expected a valid signature");
    };
    assert_eq!(signature.function_index(), 0);
    assert!(signature.params()[1].is_vararg);
    assert!(signature.has_param_named("args"));
}

#[test]
fn vararg_before_last_is_rejected() {
    let element = route(vec![
        ParamElement::new("rest", "Object", "java.lang.Object").vararg(),
        wrapper_param("handler"),
    ]);
    assert!(matches!(
        MethodSignature::from_element(&element, &GeneratorConfig::default()),
        Err(ModelError::MisplacedVararg { param, .. }) if param == "rest"
    ));
}

#[test]
fn variadic_function_param_is_rejected() {
    let element = route(vec![wrapper_param("handlers").vararg()]);
    assert!(matches!(
        MethodSignature::from_element(&element, &GeneratorConfig::default()),
        Err(ModelError::VariadicFunctionParam { .. })
    ));
}

#[test]
fn static_and_private_methods_are_rejected() {
    for (modifiers, word) in [(Modifiers::STATIC, "static"), (Modifiers::PRIVATE, "private")] {
        let element = route(vec![wrapper_param("handler")]).with_modifiers(modifiers | Modifiers::FINAL);
        assert!(matches!(
            MethodSignature::from_element(&element, &GeneratorConfig::default()),
            Err(ModelError::IllegalModifier { modifier, .. }) if modifier == word
        ));
    }
}

#[test]
fn reserved_type_params_are_rejected() {
    for declared in ["T0", "R", "T3 extends Comparable<T3>"] {
        let element = route(vec![wrapper_param("handler")]).with_type_params(vec![declared.to_string()]);
        assert!(
            matches!(
                MethodSignature::from_element(&element, &GeneratorConfig::default()),
                Err(ModelError::TypeParamCollision { .. })
            ),
            "{declared} should collide"
        );
    }
}

#[test]
fn unrelated_type_params_are_kept() {
    let element = route(vec![wrapper_param("handler")])
        .with_type_params(vec!["X extends Number".to_string()])
        .with_throws(vec!["java.io.IOException".to_string()]);
    let Ok(signature) = MethodSignature::from_element(&element, &GeneratorConfig::default()) else {
        panic!("expected a valid signature");
    };
    assert_eq!(signature.type_params(), ["X extends Number".to_string()]);
    assert_eq!(signature.throws(), ["java.io.IOException".to_string()]);
}
