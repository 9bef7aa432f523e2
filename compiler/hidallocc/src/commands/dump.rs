//! The `dump` command: print every code group with its instructions.

use std::io::Write;
use std::path::{Path, PathBuf};

use hidalloc_analysis::{analyze_module, AnalysisConfig};

use crate::input::{load_module, load_source, InputError};
use crate::reporting::render_groups;

/// Options for `hidalloc dump`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DumpOptions {
    pub source: Option<PathBuf>,
    /// Print the classification of `None` groups too.
    pub all: bool,
}

pub fn parse_dump_options(args: &[String]) -> DumpOptions {
    let mut options = DumpOptions::default();

    for arg in args {
        if let Some(path) = arg.strip_prefix("--source=") {
            options.source = Some(PathBuf::from(path));
        } else if arg == "--all" {
            options.all = true;
        } else if arg.starts_with('-') {
            eprintln!("warning: unknown option '{arg}'");
        }
    }

    options
}

/// Write the group listing of the module at `path` to `out`.
///
/// Returns the number of groups printed.
pub fn run_dump<W: Write>(
    path: &Path,
    options: &DumpOptions,
    mut out: W,
) -> Result<usize, InputError> {
    let module = load_module(path)?;
    let source = load_source(&module, options.source.as_deref())?;
    let output = analyze_module(&module, &source, &AnalysisConfig::default());

    let listing = render_groups(output.groups(), options.all);
    out.write_all(listing.as_bytes())
        .map_err(InputError::Output)?;
    out.flush().map_err(InputError::Output)?;
    Ok(output.groups().len())
}

/// `hidalloc dump`: print to stdout, exit 1 on input or output errors.
pub fn dump_listing(path: &str, options: &DumpOptions) {
    if let Err(error) = run_dump(Path::new(path), options, std::io::stdout().lock()) {
        super::fail(&error);
    }
}
