use pretty_assertions::assert_eq;

use super::*;
use crate::emitter::StringEmitter;

fn decl(body: Option<&str>) -> MethodDecl {
    MethodDecl {
        modifiers: "public",
        type_params: vec!["T0".to_string()],
        return_type: "String".to_string(),
        name: "go".to_string(),
        params: vec![
            DeclParam {
                ty: "Functions.F1<T0, R>".to_string(),
                name: "func".to_string(),
                is_vararg: false,
            },
            DeclParam {
                ty: "Object".to_string(),
                name: "args".to_string(),
                is_vararg: true,
            },
        ],
        throws: Vec::new(),
        body: body.map(ToString::to_string),
    }
}

fn render(f: impl FnOnce(&mut JavaWriter<StringEmitter>)) -> String {
    let mut writer = JavaWriter::new(StringEmitter::default());
    f(&mut writer);
    writer.into_inner().output()
}

#[test]
fn method_with_body() {
    let out = render(|w| w.method(&decl(Some("return go(x, args)"))));
    assert_eq!(
        out,
        "public <T0> String go(Functions.F1<T0, R> func, Object... args) {\n    return go(x, args);\n}\n"
    );
}

#[test]
fn abstract_method() {
    let mut abstract_decl = decl(None);
    abstract_decl.modifiers = "abstract";
    abstract_decl.type_params.clear();
    abstract_decl.throws = vec!["java.io.IOException".to_string()];
    let out = render(|w| w.method(&abstract_decl));
    assert_eq!(
        out,
        "abstract String go(Functions.F1<T0, R> func, Object... args) throws java.io.IOException;\n"
    );
}

#[test]
fn type_body_is_indented() {
    let out = render(|w| {
        w.begin_type("abstract", "class", "A_MetaFunction<R>");
        w.method(&decl(Some("return null")));
        w.end_type();
    });
    assert_eq!(
        out,
        "abstract class A_MetaFunction<R> {\n    public <T0> String go(Functions.F1<T0, R> func, Object... args) {\n        return null;\n    }\n}\n"
    );
}

#[test]
fn default_package_and_no_imports_write_nothing() {
    let out = render(|w| {
        w.package("");
        w.imports(std::iter::empty());
    });
    assert_eq!(out, "");
}

#[test]
fn package_imports_and_annotation() {
    let out = render(|w| {
        w.package("metafunction");
        w.imports(["java.util.List", "java.util.Map"]);
        w.annotation("SuppressWarnings(\"unchecked\")");
    });
    assert_eq!(
        out,
        "package metafunction;\n\nimport java.util.List;\nimport java.util.Map;\n\n@SuppressWarnings(\"unchecked\")\n"
    );
}
