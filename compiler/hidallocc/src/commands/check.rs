//! The `check` command: report hidden allocations in a module listing.

use std::io::Write;
use std::path::{Path, PathBuf};

use hidalloc_analysis::{analyze_module, AllocationSummary, AnalysisConfig};
use hidalloc_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};

use crate::input::{load_module, load_source, InputError};
use crate::reporting::allocation_diagnostics;

/// How diagnostics are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Options for `hidalloc check`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Source file overriding the listing's embedded source.
    pub source: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: ColorMode,
    pub parallel: bool,
}

fn parse_color(s: &str) -> Option<ColorMode> {
    match s {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}

/// Parse `check` flags. Unknown values warn and keep the default.
pub fn parse_check_options(args: &[String]) -> CheckOptions {
    let mut options = CheckOptions::default();

    for arg in args {
        if let Some(path) = arg.strip_prefix("--source=") {
            options.source = Some(PathBuf::from(path));
        } else if let Some(format) = arg.strip_prefix("--format=") {
            if let Some(format) = OutputFormat::from_str(format) {
                options.format = format;
            } else {
                eprintln!("warning: unknown format '{format}', using text");
            }
        } else if let Some(color) = arg.strip_prefix("--color=") {
            if let Some(mode) = parse_color(color) {
                options.color = mode;
            } else {
                eprintln!("warning: unknown color mode '{color}', using auto");
            }
        } else if arg == "--parallel" {
            options.parallel = true;
        } else if arg.starts_with('-') {
            eprintln!("warning: unknown option '{arg}'");
        }
    }

    options
}

/// Analyze the listing at `path` and write its diagnostics to `out`.
///
/// Text output ends with the emitter's warning count and the per-kind
/// summary line. JSON output is a single array of diagnostics.
pub fn run_check<W: Write>(
    path: &Path,
    options: &CheckOptions,
    mut out: W,
    is_tty: bool,
) -> Result<AllocationSummary, InputError> {
    let module = load_module(path)?;
    let source = load_source(&module, options.source.as_deref())?;
    let config = AnalysisConfig::default().with_parallel(options.parallel);

    let output = analyze_module(&module, &source, &config);
    let summary = output.summary();
    let diagnostics = allocation_diagnostics(output.allocations(), &source);
    tracing::debug!(
        groups = summary.groups(),
        diagnostics = diagnostics.len(),
        "check finished"
    );

    match options.format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::with_color_mode(&mut out, options.color, is_tty)
                .with_source(&source);
            emitter.emit_all(&diagnostics).map_err(InputError::Output)?;
            emitter
                .emit_summary(diagnostics.len())
                .map_err(InputError::Output)?;
            emitter.finish().map_err(InputError::Output)?;
            writeln!(out, "{summary}").map_err(InputError::Output)?;
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(&mut out);
            emitter.emit_all(&diagnostics).map_err(InputError::Output)?;
            emitter.finish().map_err(InputError::Output)?;
        }
    }

    Ok(summary)
}

/// `hidalloc check`: print diagnostics to stdout, exit 1 on input or
/// output errors.
///
/// Allocations are warnings and never fail the run.
pub fn check_listing(path: &str, options: &CheckOptions) {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    if let Err(error) = run_check(Path::new(path), options, std::io::stdout().lock(), is_tty) {
        super::fail(&error);
    }
}
