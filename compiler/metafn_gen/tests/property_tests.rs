//! Property-based tests for overload generation.
//!
//! 1. Output is independent of the order declarations arrive in.
//! 2. The adapter identifier never shadows a parameter and is the first
//!    free name in the candidate sequence.
//! 3. The arity-`i` overload casts exactly slots `0..i`, in order.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use metafn_gen::{adapter_name, MemoryFiler, OverloadGenerator, Processor, Round, RuntimeRefs};
use metafn_ir::{Arity, DeclaringType, GeneratorConfig, MethodElement, MethodSignature, ParamElement};
use proptest::prelude::*;

const WRAPPER: &str = "metafunction.MetaFunction";
const CLASSES: [&str; 3] = ["Router", "Applier", "Builder"];

fn element(class: usize, method: &str, extra: &[String]) -> MethodElement {
    let mut params = vec![ParamElement::new("callback", "MetaFunction<Object>", WRAPPER)];
    params.extend(extra.iter().map(|name| ParamElement::new(name.as_str(), "String", "java.lang.String")));
    MethodElement::new(
        DeclaringType::new("app", [CLASSES[class]]),
        method,
        "Object",
        params,
    )
}

fn signature(extra: &[String]) -> MethodSignature {
    MethodSignature::from_element(&element(0, "call", extra), &GeneratorConfig::default()).unwrap()
}

/// Distinct parameter names drawn from a pool crowded with adapter name candidates.
fn param_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["args", "args0", "args1", "args2", "args10", "path", "value"]),
        0..7,
    )
    .prop_map(|names| {
        let mut distinct: Vec<String> = Vec::new();
        for name in names {
            if !distinct.iter().any(|d| d == name) {
                distinct.push(name.to_string());
            }
        }
        distinct
    })
}

/// Distinct (class, method) pairs with their shuffled order.
fn model_and_shuffle() -> impl Strategy<Value = (Vec<MethodElement>, Vec<MethodElement>)> {
    prop::collection::btree_set((0usize..CLASSES.len(), "[a-z]{1,6}"), 1..8)
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(class, method)| element(class, &method, &[]))
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|elements| (Just(elements.clone()), Just(elements).prop_shuffle()))
}

fn generate(elements: &[MethodElement]) -> MemoryFiler {
    let mut processor = Processor::new(GeneratorConfig::default());
    let mut filer = MemoryFiler::new();
    processor.process(Round::last(elements), &mut filer).unwrap();
    filer
}

/// Each unit as its sorted lines; member order is not part of the contract.
fn member_sets(filer: MemoryFiler) -> BTreeMap<String, Vec<String>> {
    filer
        .into_files()
        .into_iter()
        .map(|(name, text)| {
            let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
            lines.sort();
            (name, lines)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_is_order_independent((original, shuffled) in model_and_shuffle()) {
        let first = member_sets(generate(&original));
        let second = member_sets(generate(&shuffled));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn regeneration_is_identical(elements in model_and_shuffle().prop_map(|(e, _)| e)) {
        let first = generate(&elements).into_files();
        let second = generate(&elements).into_files();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn adapter_name_is_first_free_candidate(names in param_names()) {
        let sig = signature(&names);
        let chosen = adapter_name(&sig, "args");

        prop_assert!(!sig.has_param_named(&chosen));
        prop_assert_ne!(chosen.as_str(), "callback");

        let candidates: Vec<String> = std::iter::once("args".to_string())
            .chain((0..).map(|n| format!("args{n}")))
            .take_while(|candidate| *candidate != chosen)
            .collect();
        for earlier in candidates {
            prop_assert!(sig.has_param_named(&earlier), "{} was free but skipped", earlier);
        }
    }

    #[test]
    fn overloads_cast_slots_in_order(names in param_names()) {
        let sig = signature(&names);
        let refs = RuntimeRefs::qualified(&GeneratorConfig::default());
        let generator = OverloadGenerator::new(&sig, &refs);
        let array = generator.adapter_array().to_string();

        for overload in generator.overloads() {
            let arity = overload.arity.get();
            let casts: Vec<String> = (0..arity).map(|j| format!("(T{j}) {array}[{j}]")).collect();
            let expected_call = format!("callback.apply({}))", casts.join(", "));
            prop_assert!(overload.adapter.ends_with(&expected_call), "{}", overload.adapter);
            prop_assert_eq!(overload.adapter.matches(&format!("{array}[")).count(), arity);
            prop_assert_eq!(overload.decl.params.len(), names.len() + 1);
            prop_assert_eq!(Arity::new(arity), Some(overload.arity));
        }
    }
}
