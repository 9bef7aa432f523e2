//! Reading module listings and source files.

use std::io;
use std::path::{Path, PathBuf};

use hidalloc_ir::{Module, ModuleError, SourceText};

/// Failure to read a usable module or source table, or to write the report.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{}", describe_io(.path, .source))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a valid module listing: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid module: {0}")]
    InvalidModule(#[from] ModuleError),

    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
}

fn describe_io(path: &Path, error: &io::Error) -> String {
    let path = path.display();
    match error.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {error}"),
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a module listing. `path` is only used in error messages.
pub fn parse_module(text: &str, path: &Path) -> Result<Module, InputError> {
    let module: Module = serde_json::from_str(text).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    module.validate()?;
    Ok(module)
}

/// Read, decode, and validate the module listing at `path`.
pub fn load_module(path: &Path) -> Result<Module, InputError> {
    let text = read_file(path)?;
    let module = parse_module(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        module = %module.name,
        types = module.types.len(),
        methods = module.method_bodies().len(),
        "loaded module listing"
    );
    Ok(module)
}

/// Source table for `module`.
///
/// An explicit source file wins over the listing's embedded source. With
/// neither, the table is empty and excerpts carry only their marker rows.
pub fn load_source(
    module: &Module,
    source_path: Option<&Path>,
) -> Result<SourceText, InputError> {
    match (source_path, &module.source) {
        (Some(path), _) => read_file(path).map(SourceText::new),
        (None, Some(embedded)) => Ok(SourceText::new(embedded.as_str())),
        (None, None) => {
            tracing::debug!(module = %module.name, "no source text available");
            Ok(SourceText::default())
        }
    }
}
