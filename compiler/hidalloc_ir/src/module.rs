//! Compiled units as handed over by the binary reader.

use rustc_hash::FxHashSet;

use crate::Instruction;

/// Errors found while validating a [`Module`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// Two method bodies share a fully-qualified name.
    #[error("duplicate method `{0}`")]
    DuplicateMethod(String),
}

/// One method body: its fully-qualified name and instruction stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodBody {
    /// Fully-qualified name, e.g. `System.Void Script::.ctor()`.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: Vec<Instruction>,
}

impl MethodBody {
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        MethodBody {
            name: name.into(),
            instructions,
        }
    }
}

/// A type declaration with its method bodies and nested types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDecl {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub methods: Vec<MethodBody>,
    /// Nested types: closures, iterator state machines, user types.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nested: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        TypeDecl {
            name: name.into(),
            ..TypeDecl::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodBody) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_nested(mut self, nested: TypeDecl) -> Self {
        self.nested.push(nested);
        self
    }

    fn collect_bodies<'a>(&'a self, out: &mut Vec<&'a MethodBody>) {
        out.extend(self.methods.iter());
        for nested in &self.nested {
            nested.collect_bodies(out);
        }
    }
}

/// A compiled unit.
///
/// Method bodies are reachable through [`Module::method_bodies`]. The
/// optional `source` is the text the unit was compiled from, when the reader
/// had it at hand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub source: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub types: Vec<TypeDecl>,
    /// Entry point for units that declare no types.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub entry_point: Option<MethodBody>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            ..Module::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_entry_point(mut self, body: MethodBody) -> Self {
        self.entry_point = Some(body);
        self
    }

    /// Every method body, depth-first in declaration order.
    ///
    /// Each type contributes its own methods before those of its nested
    /// types. When no types are declared, only the entry point is returned.
    pub fn method_bodies(&self) -> Vec<&MethodBody> {
        if self.types.is_empty() {
            return self.entry_point.iter().collect();
        }
        let mut bodies = Vec::new();
        for decl in &self.types {
            decl.collect_bodies(&mut bodies);
        }
        bodies
    }

    /// Look up a method body by fully-qualified name.
    pub fn method(&self, name: &str) -> Option<&MethodBody> {
        self.method_bodies().into_iter().find(|body| body.name == name)
    }

    /// Check that method names are unique.
    pub fn validate(&self) -> Result<(), ModuleError> {
        let mut seen = FxHashSet::default();
        for body in self.method_bodies() {
            if !seen.insert(body.name.as_str()) {
                return Err(ModuleError::DuplicateMethod(body.name.clone()));
            }
        }
        Ok(())
    }
}
