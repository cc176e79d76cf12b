//! Output sinks for generated compilation units.
//!
//! A [`Filer`] maps a unit's qualified name to a writable stream. Each
//! unit may be created once per session; asking again is an error, which
//! is what keeps a misbehaving driver from silently overwriting output.
//! Filers remember which type each unit was generated from so the error
//! can name both owners.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use metafn_ir::{split_qualified, DeclaringType};
use rustc_hash::FxHashMap;

/// Destination for generated units.
pub trait Filer {
    /// Open a new unit named `qualified_name`, generated from `originating`.
    ///
    /// # Errors
    ///
    /// Returns an error when the unit was already created in this session
    /// or the destination cannot be opened.
    fn create_source_file(
        &mut self,
        qualified_name: &str,
        originating: &DeclaringType,
    ) -> io::Result<Box<dyn Write + '_>>;
}

fn recreate_error(qualified_name: &str, first: &str, second: &DeclaringType) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!(
            "attempt to recreate generated unit `{qualified_name}` from `{}`; \
             it was already generated from `{first}`",
            second.qualified_name()
        ),
    )
}

/// Writes `root/<package path>/<Name>.java`.
pub struct DirectoryFiler {
    root: PathBuf,
    /// Created unit to the qualified name of the type it came from.
    created: FxHashMap<String, String>,
}

impl DirectoryFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryFiler {
            root: root.into(),
            created: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a unit is written to.
    pub fn path_for(&self, qualified_name: &str) -> PathBuf {
        let (package, simple) = split_qualified(qualified_name);
        let mut path = self.root.clone();
        for part in package.split('.').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path.push(format!("{simple}.java"));
        path
    }
}

impl Filer for DirectoryFiler {
    fn create_source_file(
        &mut self,
        qualified_name: &str,
        originating: &DeclaringType,
    ) -> io::Result<Box<dyn Write + '_>> {
        if let Some(first) = self.created.get(qualified_name) {
            return Err(recreate_error(qualified_name, first, originating));
        }
        self.created
            .insert(qualified_name.to_string(), originating.qualified_name());
        let path = self.path_for(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        tracing::debug!(
            path = %path.display(),
            origin = %originating.qualified_name(),
            "creating generated source"
        );
        let file = File::create(&path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Keeps generated units in memory, keyed by qualified name.
#[derive(Default, Debug)]
pub struct MemoryFiler {
    files: BTreeMap<String, MemoryUnit>,
}

#[derive(Debug)]
struct MemoryUnit {
    origin: String,
    bytes: Vec<u8>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a unit, if it was created and is valid UTF-8.
    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.files
            .get(qualified_name)
            .and_then(|unit| std::str::from_utf8(&unit.bytes).ok())
    }

    /// Qualified name of the type a unit was generated from.
    pub fn origin(&self, qualified_name: &str) -> Option<&str> {
        self.files.get(qualified_name).map(|unit| unit.origin.as_str())
    }

    /// Qualified names of every created unit, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All units as text, sorted by qualified name.
    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files
            .into_iter()
            .map(|(name, unit)| (name, String::from_utf8_lossy(&unit.bytes).into_owned()))
            .collect()
    }
}

impl Filer for MemoryFiler {
    fn create_source_file(
        &mut self,
        qualified_name: &str,
        originating: &DeclaringType,
    ) -> io::Result<Box<dyn Write + '_>> {
        match self.files.entry(qualified_name.to_string()) {
            Entry::Occupied(unit) => {
                Err(recreate_error(qualified_name, &unit.get().origin, originating))
            }
            Entry::Vacant(slot) => {
                let unit = slot.insert(MemoryUnit {
                    origin: originating.qualified_name(),
                    bytes: Vec::new(),
                });
                Ok(Box::new(&mut unit.bytes))
            }
        }
    }
}
