//! Java source writer.
//!
//! Thin layer over an [`Emitter`] that knows the shape of a Java
//! compilation unit: package, imports, annotations, a type header,
//! members and the closing brace. It keeps the current indentation and
//! nothing else; what gets written is decided by the caller.

use crate::emitter::Emitter;
use crate::generator::{DeclParam, MethodDecl};

pub struct JavaWriter<E: Emitter> {
    out: E,
    level: usize,
}

impl<E: Emitter> JavaWriter<E> {
    pub fn new(out: E) -> Self {
        JavaWriter { out, level: 0 }
    }

    pub fn into_inner(self) -> E {
        self.out
    }

    /// `// text`
    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {text}"));
    }

    /// `package name;` followed by a blank line. Nothing for the default package.
    pub fn package(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.line(&format!("package {name};"));
        self.blank_line();
    }

    /// One `import` per entry, followed by a blank line when any were written.
    pub fn imports<'i>(&mut self, imports: impl IntoIterator<Item = &'i str>) {
        let mut any = false;
        for import in imports {
            self.line(&format!("import {import};"));
            any = true;
        }
        if any {
            self.blank_line();
        }
    }

    /// `@text`
    pub fn annotation(&mut self, text: &str) {
        self.line(&format!("@{text}"));
    }

    /// `modifiers kind name {` and indent.
    pub fn begin_type(&mut self, modifiers: &str, kind: &str, name: &str) {
        if modifiers.is_empty() {
            self.line(&format!("{kind} {name} {{"));
        } else {
            self.line(&format!("{modifiers} {kind} {name} {{"));
        }
        self.level += 1;
    }

    /// Dedent and `}`.
    pub fn end_type(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.line("}");
    }

    /// Write a method: `;`-terminated when it has no body, a one-statement block otherwise.
    pub fn method(&mut self, decl: &MethodDecl) {
        let header = method_header(decl);
        match &decl.body {
            None => self.line(&format!("{header};")),
            Some(statement) => {
                self.line(&format!("{header} {{"));
                self.level += 1;
                self.line(&format!("{statement};"));
                self.level -= 1;
                self.line("}");
            }
        }
    }

    pub fn blank_line(&mut self) {
        self.out.emit_newline();
    }

    fn line(&mut self, text: &str) {
        self.out.emit_indent(self.level);
        self.out.emit(text);
        self.out.emit_newline();
    }
}

fn method_header(decl: &MethodDecl) -> String {
    let mut header = String::new();
    if !decl.modifiers.is_empty() {
        header.push_str(decl.modifiers);
        header.push(' ');
    }
    if !decl.type_params.is_empty() {
        header.push('<');
        header.push_str(&decl.type_params.join(", "));
        header.push_str("> ");
    }
    header.push_str(&decl.return_type);
    header.push(' ');
    header.push_str(&decl.name);
    header.push('(');
    let params: Vec<String> = decl.params.iter().map(param_text).collect();
    header.push_str(&params.join(", "));
    header.push(')');
    if !decl.throws.is_empty() {
        header.push_str(" throws ");
        header.push_str(&decl.throws.join(", "));
    }
    header
}

fn param_text(param: &DeclParam) -> String {
    if param.is_vararg {
        format!("{}... {}", param.ty, param.name)
    } else {
        format!("{} {}", param.ty, param.name)
    }
}

#[cfg(test)]
mod tests;
