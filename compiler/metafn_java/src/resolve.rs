//! Name resolution for discovered methods.
//!
//! Generated units are top-level types in the originating package, so
//! type text copied from a nested declaration has to keep resolving from
//! there. References to member types declared in the same file are
//! rewritten to their dotted path from the top-level type
//! (`AssertBuilder` → `FunctionAssert.AssertBuilder`). Parameter erasures
//! are resolved just far enough to recognise the wrapper type.

use metafn_ir::{DeclaringType, GeneratorConfig, Import, Location, MethodElement, ParamElement};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::parser::{CompilationUnit, MethodHeader, TypeArg, TypeDecl, TypeParam, TypeRef, TypeSegment};

const PRIMITIVES: [&str; 9] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// The names visible to a declaration inside one compilation unit.
pub struct TypeScope<'u> {
    package: &'u str,
    imports: &'u [Import],
    /// Dotted paths of every type declared in the file, from the top level.
    declared: FxHashSet<String>,
}

impl<'u> TypeScope<'u> {
    pub fn new(unit: &'u CompilationUnit) -> Self {
        let mut declared = FxHashSet::default();
        for decl in &unit.types {
            collect_declared(decl, "", &mut declared);
        }
        TypeScope {
            package: &unit.package,
            imports: &unit.imports,
            declared,
        }
    }

    /// Whether `path` (dotted, from the top level) is declared in this file.
    pub fn declares(&self, path: &str) -> bool {
        self.declared.contains(path)
    }

    /// Simple names of every type declared in the file, sorted.
    pub fn declared_simple_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .declared
            .iter()
            .map(|path| path.rsplit('.').next().unwrap_or(path))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Find the type `name` refers to from inside `nesting`.
    ///
    /// Member types of the innermost enclosing type win, then those of each
    /// outer type, then top-level types. Inherited member types are not
    /// seen.
    pub fn lookup(&self, nesting: &[String], name: &str) -> Option<String> {
        (0..=nesting.len()).rev().find_map(|depth| {
            let mut path = nesting[..depth].join(".");
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(name);
            self.declared.contains(&path).then_some(path)
        })
    }

    /// Rewrite references to types declared in this file to their full
    /// dotted path. `type_vars` shadow declared types.
    pub fn canonicalize(&self, ty: &TypeRef, nesting: &[String], type_vars: &[&str]) -> TypeRef {
        let segments: Vec<TypeSegment> = ty
            .segments
            .iter()
            .map(|segment| TypeSegment {
                name: segment.name.clone(),
                args: segment
                    .args
                    .iter()
                    .map(|arg| self.canonicalize_arg(arg, nesting, type_vars))
                    .collect(),
            })
            .collect();

        let first = ty.first();
        let path = if type_vars.contains(&first) {
            None
        } else {
            self.lookup(nesting, first)
        };

        let mut canonical = TypeRef {
            segments: Vec::with_capacity(segments.len()),
            dims: ty.dims,
        };
        if let Some(path) = path {
            // Every segment of the path but the last is an enclosing type.
            let outer = path.split('.').collect::<Vec<_>>();
            for name in &outer[..outer.len() - 1] {
                canonical.segments.push(TypeSegment {
                    name: (*name).to_string(),
                    args: Vec::new(),
                });
            }
        }
        canonical.segments.extend(segments);
        canonical
    }

    fn canonicalize_arg(&self, arg: &TypeArg, nesting: &[String], type_vars: &[&str]) -> TypeArg {
        match arg {
            TypeArg::Type(ty) => TypeArg::Type(self.canonicalize(ty, nesting, type_vars)),
            TypeArg::Wildcard(None) => TypeArg::Wildcard(None),
            TypeArg::Wildcard(Some((bound, ty))) => {
                TypeArg::Wildcard(Some((*bound, self.canonicalize(ty, nesting, type_vars))))
            }
        }
    }

    /// Qualified name of the raw type of an already canonical `ty`.
    ///
    /// Tried in order: types declared in this file, single-type imports,
    /// on-demand imports that supply the wrapper, names that are already
    /// qualified, then the file's own package. Type variables and
    /// primitives erase to themselves.
    pub fn erasure(&self, ty: &TypeRef, type_vars: &[&str], config: &GeneratorConfig) -> String {
        let raw = ty.raw_name();
        let first = ty.first();
        let mut erased = if (ty.segments.len() == 1 && type_vars.contains(&first))
            || PRIMITIVES.contains(&raw.as_str())
        {
            raw
        } else if self.declared.contains(first) {
            self.in_package(&raw)
        } else if let Some(import) = self.single_import(first) {
            let rest = &raw[first.len()..];
            format!("{}{rest}", import.path)
        } else if let Some(wrapper) = self.on_demand_wrapper(&raw, config) {
            wrapper
        } else if ty.segments.len() > 1 {
            raw
        } else {
            self.in_package(&raw)
        };

        for _ in 0..ty.dims {
            erased.push_str("[]");
        }
        erased
    }

    fn in_package(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.package)
        }
    }

    fn single_import(&self, simple: &str) -> Option<&Import> {
        self.imports.iter().find(|import| {
            !import.on_demand && metafn_ir::split_qualified(&import.path).1 == simple
        })
    }

    fn on_demand_wrapper(&self, raw: &str, config: &GeneratorConfig) -> Option<String> {
        self.imports
            .iter()
            .filter(|import| import.on_demand)
            .map(|import| format!("{}.{raw}", import.path))
            .find(|candidate| *candidate == config.wrapper)
    }
}

fn collect_declared(decl: &TypeDecl, prefix: &str, declared: &mut FxHashSet<String>) {
    let path = if prefix.is_empty() {
        decl.name.clone()
    } else {
        format!("{prefix}.{}", decl.name)
    };
    for member in &decl.members {
        collect_declared(member, &path, declared);
    }
    declared.insert(path);
}

/// Build a [`MethodElement`] for every marker-annotated method in `unit`.
///
/// Methods are returned in source order, outer types before their
/// members. `file` names the source in each element's location.
pub fn elements(unit: &CompilationUnit, file: &str, config: &GeneratorConfig) -> Vec<MethodElement> {
    let mut collector = Collector {
        scope: TypeScope::new(unit),
        unit,
        file,
        config,
        nesting: SmallVec::new(),
        found: Vec::new(),
    };
    for decl in &unit.types {
        collector.walk(decl, Vec::new());
    }
    collector.found
}

struct Collector<'u> {
    scope: TypeScope<'u>,
    unit: &'u CompilationUnit,
    file: &'u str,
    config: &'u GeneratorConfig,
    nesting: SmallVec<[String; 2]>,
    found: Vec<MethodElement>,
}

impl<'u> Collector<'u> {
    fn walk(&mut self, decl: &'u TypeDecl, mut type_vars: Vec<&'u str>) {
        self.nesting.push(decl.name.clone());
        type_vars.extend(decl.type_params.iter().map(|p| p.name.as_str()));

        for method in &decl.methods {
            if method.annotations.iter().any(|a| self.config.is_marker(a)) {
                trace!(method = %method.name, "marker annotation found");
                let element = self.element(&type_vars, method);
                self.found.push(element);
            }
        }
        for member in &decl.members {
            self.walk(member, type_vars.clone());
        }

        self.nesting.pop();
    }

    fn element(&self, class_vars: &[&str], method: &MethodHeader) -> MethodElement {
        let mut type_vars = class_vars.to_vec();
        type_vars.extend(method.type_params.iter().map(|p| p.name.as_str()));

        let canonical = |ty: &TypeRef| self.scope.canonicalize(ty, &self.nesting, &type_vars);

        let params = method
            .params
            .iter()
            .map(|param| {
                let ty = canonical(&param.ty);
                let erasure = self.scope.erasure(&ty, &type_vars, self.config);
                let element = ParamElement::new(param.name.as_str(), ty.to_string(), erasure);
                if param.is_vararg {
                    element.vararg()
                } else {
                    element
                }
            })
            .collect();

        let type_params = method
            .type_params
            .iter()
            .map(|param| {
                TypeParam {
                    name: param.name.clone(),
                    bounds: param.bounds.iter().map(canonical).collect(),
                }
                .to_string()
            })
            .collect();

        let declaring_type =
            DeclaringType::new(self.unit.package.as_str(), self.nesting.iter().map(String::as_str))
                .with_imports(self.unit.imports.clone())
                .with_file_types(self.scope.declared_simple_names());

        MethodElement::new(
            declaring_type,
            method.name.as_str(),
            canonical(&method.return_type).to_string(),
            params,
        )
        .with_type_params(type_params)
        .with_throws(method.throws.iter().map(|t| canonical(t).to_string()).collect())
        .with_modifiers(method.modifiers)
        .with_annotation(self.config.marker.as_str())
        .with_location(Location::new(self.file, method.line))
    }
}
