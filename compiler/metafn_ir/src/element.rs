//! Host-facing declaration elements.
//!
//! A host (a source parser, a compiler plugin, a test) describes each
//! annotated method as a [`MethodElement`]. Elements carry type text as
//! written plus the few facts the generator cannot recover from text:
//! the resolved erasure of each parameter and whether it is variadic.

use std::fmt;

use smallvec::SmallVec;

bitflags::bitflags! {
    /// Declared method modifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const SYNCHRONIZED = 1 << 6;
        const NATIVE = 1 << 7;
        const DEFAULT = 1 << 8;
        const STRICTFP = 1 << 9;
    }
}

impl Modifiers {
    /// Parse a single modifier keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let flag = match word {
            "public" => Modifiers::PUBLIC,
            "protected" => Modifiers::PROTECTED,
            "private" => Modifiers::PRIVATE,
            "static" => Modifiers::STATIC,
            "abstract" => Modifiers::ABSTRACT,
            "final" => Modifiers::FINAL,
            "synchronized" => Modifiers::SYNCHRONIZED,
            "native" => Modifiers::NATIVE,
            "default" => Modifiers::DEFAULT,
            "strictfp" => Modifiers::STRICTFP,
            _ => return None,
        };
        Some(flag)
    }
}

/// Where a declaration came from, for diagnostics.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Location {
    pub file: String,
    /// 1-based line of the method name.
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Location {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "<unknown>:{}", self.line)
        } else {
            write!(f, "{}:{}", self.file, self.line)
        }
    }
}

/// A non-static import of the originating file.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Import {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    /// `import a.b.*;`
    pub on_demand: bool,
}

impl Import {
    pub fn single(path: impl Into<String>) -> Self {
        Import {
            path: path.into(),
            on_demand: false,
        }
    }

    pub fn on_demand(path: impl Into<String>) -> Self {
        Import {
            path: path.into(),
            on_demand: true,
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on_demand {
            write!(f, "{}.*", self.path)
        } else {
            f.write_str(&self.path)
        }
    }
}

/// The type that declares an annotated method.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct DeclaringType {
    /// Dotted package name, empty for the default package.
    pub package: String,
    /// Simple names from the outermost type to the declaring type itself.
    pub nesting: SmallVec<[String; 2]>,
    /// Imports of the originating file.
    pub imports: Vec<Import>,
    /// Simple names of every type declared in the originating file, at any
    /// depth. Generated code must not import a type that shadows them.
    pub file_types: Vec<String>,
}

impl DeclaringType {
    pub fn new<I, S>(package: impl Into<String>, nesting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DeclaringType {
            package: package.into(),
            nesting: nesting.into_iter().map(Into::into).collect(),
            imports: Vec::new(),
            file_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_imports(mut self, imports: Vec<Import>) -> Self {
        self.imports = imports;
        self
    }

    #[must_use]
    pub fn with_file_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `simple` names the declaring type, one of its enclosing
    /// types, or another type declared in the originating file.
    pub fn declares_simple_name(&self, simple: &str) -> bool {
        self.nesting.iter().chain(&self.file_types).any(|name| name == simple)
    }

    /// Innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.nesting.last().map_or("", String::as_str)
    }

    /// Dotted canonical name, e.g. `pkg.Outer.Inner`.
    pub fn qualified_name(&self) -> String {
        let mut name = self.package.clone();
        for part in &self.nesting {
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(part);
        }
        name
    }

    /// Simple name of the generated type.
    pub fn output_simple_name(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.simple_name())
    }

    /// Qualified name of the generated type.
    ///
    /// The output always lives at the top level of the originating
    /// package, whatever the nesting depth of the declaring type.
    pub fn output_qualified_name(&self, suffix: &str) -> String {
        let simple = self.output_simple_name(suffix);
        if self.package.is_empty() {
            simple
        } else {
            format!("{}.{simple}", self.package)
        }
    }
}

/// A parameter as declared.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamElement {
    pub name: String,
    /// Declared type text. For a variadic parameter this is the element
    /// type, without the `...`.
    pub ty: String,
    /// Qualified name of the raw type, used to recognise the wrapper.
    pub erasure: String,
    pub is_vararg: bool,
}

impl ParamElement {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, erasure: impl Into<String>) -> Self {
        ParamElement {
            name: name.into(),
            ty: ty.into(),
            erasure: erasure.into(),
            is_vararg: false,
        }
    }

    #[must_use]
    pub fn vararg(mut self) -> Self {
        self.is_vararg = true;
        self
    }
}

/// One annotated method, as seen by the host.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodElement {
    pub declaring_type: DeclaringType,
    pub name: String,
    pub return_type: String,
    /// Method type parameters as written, bounds included (`X extends Foo`).
    pub type_params: Vec<String>,
    pub params: Vec<ParamElement>,
    pub throws: Vec<String>,
    pub modifiers: Modifiers,
    /// Qualified name of the annotation that selected this method.
    pub annotation: String,
    pub location: Location,
}

impl MethodElement {
    pub fn new(
        declaring_type: DeclaringType,
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: Vec<ParamElement>,
    ) -> Self {
        MethodElement {
            declaring_type,
            name: name.into(),
            return_type: return_type.into(),
            type_params: Vec::new(),
            params,
            throws: Vec::new(),
            modifiers: Modifiers::empty(),
            annotation: String::new(),
            location: Location::default(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }

    #[must_use]
    pub fn with_throws(mut self, throws: Vec<String>) -> Self {
        self.throws = throws;
        self
    }
}
