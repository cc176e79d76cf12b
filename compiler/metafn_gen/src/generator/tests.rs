use metafn_ir::{DeclaringType, MethodElement, ParamElement, MAX_ARITY};
use pretty_assertions::assert_eq;

use super::*;

const WRAPPER: &str = "metafunction.MetaFunction";

fn simple_refs() -> RuntimeRefs {
    RuntimeRefs {
        wrapper: "MetaFunction".to_string(),
        shapes: "Functions".to_string(),
        ..RuntimeRefs::qualified(&GeneratorConfig::default())
    }
}

fn signature(return_type: &str, name: &str, params: Vec<ParamElement>) -> MethodSignature {
    let element = MethodElement::new(
        DeclaringType::new("metafunction", ["Fixture"]),
        name,
        return_type,
        params,
    );
    match MethodSignature::from_element(&element, &GeneratorConfig::default()) {
        Ok(signature) => signature,
        Err(err) => panic!("fixture should be valid: {err}"),
    }
}

fn fn_param(name: &str) -> ParamElement {
    ParamElement::new(name, "MetaFunction<Object>", WRAPPER)
}

fn string_param(name: &str) -> ParamElement {
    ParamElement::new(name, "String", "java.lang.String")
}

fn rendered_params(decl: &MethodDecl) -> Vec<String> {
    decl.params
        .iter()
        .map(|p| {
            if p.is_vararg {
                format!("{}... {}", p.ty, p.name)
            } else {
                format!("{} {}", p.ty, p.name)
            }
        })
        .collect()
}

#[test]
fn abstract_form_retypes_only_the_function_slot() {
    let sig = signature("RouterExample", "route", vec![string_param("path"), fn_param("handler")]);
    let refs = simple_refs();
    let decl = OverloadGenerator::new(&sig, &refs).abstract_form();

    assert_eq!(decl.modifiers, "abstract");
    assert!(decl.type_params.is_empty());
    assert_eq!(decl.return_type, "RouterExample");
    assert_eq!(rendered_params(&decl), ["String path", "MetaFunction<R> handler"]);
    assert_eq!(decl.body, None);
}

#[test]
fn arity_zero_ignores_the_argument_array() {
    // T when(Wrapper<T> fn), R = Object
    let sig = signature("Object", "when", vec![fn_param("fn")]);
    let refs = simple_refs();
    let overload = OverloadGenerator::new(&sig, &refs).overload(Arity::ALL[0]);

    assert!(overload.introduced_type_params().is_empty());
    assert!(overload.decl.type_params.is_empty());
    assert_eq!(rendered_params(&overload.decl), ["Functions.F0<R> fn"]);
    assert_eq!(overload.adapter, "MetaFunction.<R>of(args -> fn.apply())");
    assert_eq!(
        overload.decl.body.as_deref(),
        Some("return when(MetaFunction.<R>of(args -> fn.apply()))")
    );
}

#[test]
fn arity_one_casts_slot_zero() {
    // <T0> R run(F1<T0, R> fn)
    let sig = signature("R", "run", vec![fn_param("fn")]);
    let refs = simple_refs();
    let overload = OverloadGenerator::new(&sig, &refs).overload(Arity::ALL[1]);

    assert_eq!(overload.decl.modifiers, "public");
    assert_eq!(overload.decl.type_params, ["T0"]);
    assert_eq!(overload.decl.return_type, "R");
    assert_eq!(rendered_params(&overload.decl), ["Functions.F1<T0, R> fn"]);
    assert_eq!(overload.adapter, "MetaFunction.<R>of(args -> fn.apply((T0) args[0]))");
}

#[test]
fn leading_parameter_is_preserved_in_every_arity() {
    let sig = signature("RouterExample", "route", vec![string_param("path"), fn_param("handler")]);
    let refs = simple_refs();
    let generator = OverloadGenerator::new(&sig, &refs);

    for overload in generator.overloads() {
        let params = &overload.decl.params;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].ty, "String");
        assert_eq!(params[0].name, "path");
        assert_eq!(params[1].ty, refs.shape_type(overload.arity));
        let body = overload.decl.body.as_deref().unwrap_or_default();
        assert_eq!(body, format!("return route(path, {})", overload.adapter));
    }
}

#[test]
fn eleven_overloads_in_ascending_arity() {
    let sig = signature("void", "when", vec![fn_param("function")]);
    let refs = simple_refs();
    let arities: Vec<usize> = OverloadGenerator::new(&sig, &refs)
        .overloads()
        .map(|o| o.arity.get())
        .collect();
    assert_eq!(arities, (0..=MAX_ARITY).collect::<Vec<_>>());
}

#[test]
fn void_methods_delegate_without_return() {
    let sig = signature("void", "when", vec![fn_param("function")]);
    let refs = simple_refs();
    let overload = OverloadGenerator::new(&sig, &refs).overload(Arity::ALL[2]);
    assert_eq!(
        overload.decl.body.as_deref(),
        Some("when(MetaFunction.<R>of(args -> function.apply((T0) args[0], (T1) args[1])))")
    );
}

#[test]
fn max_arity_casts_every_slot_in_order() {
    let sig = signature("Object", "when", vec![fn_param("fn")]);
    let refs = simple_refs();
    let overload = OverloadGenerator::new(&sig, &refs).overload(Arity::ALL[MAX_ARITY]);
    let expected_casts: Vec<String> = (0..MAX_ARITY).map(|j| format!("(T{j}) args[{j}]")).collect();
    assert_eq!(
        overload.adapter,
        format!("MetaFunction.<R>of(args -> fn.apply({}))", expected_casts.join(", "))
    );
    assert_eq!(
        overload.decl.params[0].ty,
        "Functions.F10<T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, R>"
    );
}

#[test]
fn adapter_name_skips_used_identifiers() {
    let sig = signature(
        "Object",
        "call",
        vec![fn_param("fn"), string_param("args"), string_param("args0"), string_param("args1")],
    );
    assert_eq!(adapter_name(&sig, "args"), "args2");

    let refs = simple_refs();
    let generator = OverloadGenerator::new(&sig, &refs);
    assert_eq!(generator.adapter_array(), "args2");
    let overload = generator.overload(Arity::ALL[1]);
    assert_eq!(
        overload.decl.body.as_deref(),
        Some("return call(MetaFunction.<R>of(args2 -> fn.apply((T0) args2[0])), args, args0, args1)")
    );
}

#[test]
fn adapter_name_defaults_to_base() {
    let sig = signature("Object", "call", vec![fn_param("fn"), string_param("args0")]);
    assert_eq!(adapter_name(&sig, "args"), "args");
}

#[test]
fn varargs_survive_in_every_form() {
    // String go(MetaFunction<String> func, Object... args)
    let sig = signature(
        "String",
        "go",
        vec![fn_param("func"), ParamElement::new("args", "Object", "java.lang.Object").vararg()],
    );
    let refs = simple_refs();
    let generator = OverloadGenerator::new(&sig, &refs);

    assert_eq!(
        rendered_params(&generator.abstract_form()),
        ["MetaFunction<R> func", "Object... args"]
    );
    for overload in generator.overloads() {
        let last = &overload.decl.params[1];
        assert!(last.is_vararg, "arity {} lost varargs", overload.arity);
        assert_eq!(last.ty, "Object");
    }
    let one = generator.overload(Arity::ALL[1]);
    assert_eq!(
        one.decl.body.as_deref(),
        Some("return go(MetaFunction.<R>of(args0 -> func.apply((T0) args0[0])), args)")
    );
}

#[test]
fn method_type_params_and_throws_are_carried() {
    let element = MethodElement::new(
        DeclaringType::new("metafunction", ["Fixture"]),
        "map",
        "X",
        vec![fn_param("fn"), ParamElement::new("seed", "X", "java.lang.Object")],
    )
    .with_type_params(vec!["X extends Number".to_string()])
    .with_throws(vec!["java.io.IOException".to_string()]);
    let Ok(sig) = MethodSignature::from_element(&element, &GeneratorConfig::default()) else {
        panic!("fixture should be valid");
    };
    let refs = simple_refs();
    let generator = OverloadGenerator::new(&sig, &refs);

    let abstract_form = generator.abstract_form();
    assert_eq!(abstract_form.type_params, ["X extends Number"]);
    assert_eq!(abstract_form.throws, ["java.io.IOException"]);

    let two = generator.overload(Arity::ALL[2]);
    assert_eq!(two.decl.type_params, ["X extends Number", "T0", "T1"]);
    assert_eq!(two.decl.throws, ["java.io.IOException"]);
}

#[test]
fn qualified_refs_spell_full_names() {
    let sig = signature("Object", "when", vec![fn_param("fn")]);
    let refs = RuntimeRefs::qualified(&GeneratorConfig::default());
    let generator = OverloadGenerator::new(&sig, &refs);
    assert_eq!(
        generator.abstract_form().params[0].ty,
        "metafunction.MetaFunction<R>"
    );
    let one = generator.overload(Arity::ALL[1]);
    assert_eq!(one.decl.params[0].ty, "metafunction.Functions.F1<T0, R>");
    assert!(one.adapter.starts_with("metafunction.MetaFunction.<R>of("));
}
