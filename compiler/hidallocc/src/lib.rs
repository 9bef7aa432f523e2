//! hidalloc command-line driver.
//!
//! ```text
//! listing.json ──► input::load_module ──► Module
//!                                           │
//!     --source / embedded source ──► SourceText
//!                                           │
//!                                           ▼
//!                        hidalloc_analysis::analyze_module
//!                                           │
//!                      ┌────────────────────┴───────────────────┐
//!                      ▼                                        ▼
//!        reporting::allocation_diagnostics           commands::dump (raw groups)
//!                      │
//!                      ▼
//!          Terminal / JSON emitter
//! ```
//!
//! The library half holds everything testable; `main.rs` only parses the
//! command line and dispatches.

pub mod commands;
pub mod input;
pub mod reporting;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=hidalloc_analysis=debug` or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
