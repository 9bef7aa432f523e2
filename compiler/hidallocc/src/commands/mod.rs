//! Command handlers for the hidalloc CLI.
//!
//! Each `run_*` function does the work against an arbitrary writer and
//! returns errors; the `*_listing` wrappers print to the terminal and exit
//! on failure, the way `main` wants them.

mod check;
mod dump;
mod explain;

pub use check::{check_listing, parse_check_options, run_check, CheckOptions, OutputFormat};
pub use dump::{dump_listing, parse_dump_options, run_dump, DumpOptions};
pub use explain::explain_code;

use crate::input::InputError;

/// Print `error` to stderr and exit with status 1.
fn fail(error: &InputError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1)
}
