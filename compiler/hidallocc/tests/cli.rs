//! End-to-end runs of `check` and `dump` against listings on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::io::Write as _;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use hidalloc_diagnostic::emitter::ColorMode;
use hidallocc::commands::{run_check, run_dump, CheckOptions, DumpOptions, OutputFormat};
use hidallocc::input::InputError;

const LISTING: &str = r#"{
  "name": "Test",
  "source": "object o = 5;\nvar a = new int[3];\nvar n = 1 + 2;\n",
  "types": [{
    "name": "Script",
    "methods": [{
      "name": "System.Void Script::.ctor()",
      "instructions": [
        { "offset": 0, "opcode": "NoOp",
          "span": { "start_line": 1, "start_column": 1, "end_line": 1, "end_column": 14 } },
        { "offset": 1, "opcode": { "Other": "ldc.i4.5" } },
        { "offset": 2, "opcode": "Box", "operand": { "Type": { "name": "System.Int32", "kind": "Value" } } },
        { "offset": 7, "opcode": "NoOp",
          "span": { "start_line": 2, "start_column": 1, "end_line": 2, "end_column": 20 } },
        { "offset": 8, "opcode": { "Other": "ldc.i4.3" } },
        { "offset": 9, "opcode": "AllocateArray", "operand": { "Type": { "name": "System.Int32", "kind": "Value" } } },
        { "offset": 14, "opcode": "NoOp",
          "span": { "start_line": 3, "start_column": 1, "end_line": 3, "end_column": 15 } },
        { "offset": 15, "opcode": { "Other": "ldc.i4.3" } },
        { "offset": 16, "opcode": { "Other": "stloc.2" } }
      ]
    }]
  }]
}"#;

/// Writer standing in for a closed stdout.
struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn check(path: &Path, options: &CheckOptions) -> (String, hidalloc_analysis::AllocationSummary) {
    let mut out = Vec::new();
    let summary = run_check(path, options, &mut out, false).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

fn text_options() -> CheckOptions {
    CheckOptions {
        color: ColorMode::Never,
        ..CheckOptions::default()
    }
}

// ── check ───────────────────────────────────────────────────────────

#[test]
fn check_reports_allocations_in_source_order() {
    let listing = write_temp(LISTING);
    let (text, summary) = check(listing.path(), &text_options());

    assert_eq!(summary.boxing, 1);
    assert_eq!(summary.new, 1);
    assert_eq!(summary.none, 1);

    let boxing = text.find("warning[A0002]: hidden allocation: Boxing").unwrap();
    let array = text.find("warning[A0001]: hidden allocation: New").unwrap();
    assert!(boxing < array);

    assert!(text.contains("  --> 1:1\n"));
    assert!(text.contains(" 1 | object o = 5;\n"));
    assert!(text.contains("  = note: decided by `IL_0009: newarr System.Int32`\n"));
    assert!(text.ends_with(
        "warning: 2 warnings emitted\n2 hidden allocations in 3 groups (New: 1, Boxing: 1, GetEnumerator: 0)\n"
    ));
    assert!(!text.contains("\x1b["));
}

#[test]
fn check_json_is_machine_readable() {
    let listing = write_temp(LISTING);
    let options = CheckOptions {
        format: OutputFormat::Json,
        ..CheckOptions::default()
    };
    let (text, _) = check(listing.path(), &options);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let diagnostics = value.as_array().unwrap();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0]["code"], "A0002");
    assert_eq!(diagnostics[0]["method"], "System.Void Script::.ctor()");
    assert_eq!(diagnostics[0]["sequence_point"]["end_column"], 14);
    assert_eq!(diagnostics[1]["code"], "A0001");
    assert_eq!(diagnostics[1]["label"]["start"], 14);
    assert_eq!(diagnostics[1]["decided_by"], "IL_0009: newarr System.Int32");
}

#[test]
fn check_prefers_explicit_source() {
    let listing = write_temp(LISTING);
    let source = write_temp("object boxed = 5;\n");
    let options = CheckOptions {
        source: Some(source.path().to_path_buf()),
        ..text_options()
    };
    let (text, _) = check(listing.path(), &options);

    assert!(text.contains(" 1 | object boxed = 5;\n"));
}

#[test]
fn parallel_check_matches_sequential() {
    let listing = write_temp(LISTING);
    let (sequential, first) = check(listing.path(), &text_options());
    let parallel_options = CheckOptions {
        parallel: true,
        ..text_options()
    };
    let (parallel, second) = check(listing.path(), &parallel_options);

    assert_eq!(first, second);
    assert_eq!(sequential, parallel);
}

#[test]
fn check_of_clean_listing_prints_only_the_summary() {
    let listing = write_temp(r#"{ "name": "Empty" }"#);
    let (text, summary) = check(listing.path(), &text_options());

    assert_eq!(summary.groups(), 0);
    assert_eq!(
        text,
        "0 hidden allocations in 0 groups (New: 0, Boxing: 0, GetEnumerator: 0)\n"
    );
}

#[test]
fn check_fails_on_bad_input() {
    let listing = write_temp("not json");
    let mut out = Vec::new();
    let error = run_check(listing.path(), &text_options(), &mut out, false).unwrap_err();

    assert!(error.to_string().contains("is not a valid module listing"));
    assert!(out.is_empty());
}

#[test]
fn check_reports_write_failures() {
    let listing = write_temp(LISTING);
    let json = CheckOptions {
        format: OutputFormat::Json,
        ..CheckOptions::default()
    };
    for options in [text_options(), json] {
        let error = run_check(listing.path(), &options, ClosedPipe, false).unwrap_err();
        assert!(matches!(error, InputError::Output(_)));
        assert!(error.to_string().starts_with("cannot write output: "));
    }
}

#[test]
fn check_of_clean_listing_still_reports_write_failures() {
    let listing = write_temp(r#"{ "name": "Empty" }"#);
    let error = run_check(listing.path(), &text_options(), ClosedPipe, false).unwrap_err();
    assert!(matches!(error, InputError::Output(_)));
}

// ── dump ────────────────────────────────────────────────────────────

#[test]
fn dump_lists_every_group() {
    let listing = write_temp(LISTING);
    let mut out = Vec::new();
    let groups = run_dump(listing.path(), &DumpOptions::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(groups, 3);
    assert_eq!(text.matches("System.Void Script::.ctor()\n").count(), 3);
    assert!(text.contains("\nBoxing\nIL_0000: nop @ 1,1 -> 1,14\n"));
    assert!(text.contains("\nNew\nIL_0007: nop @ 2,1 -> 2,20\n"));
    assert!(!text.contains("\nNone\n"));
    assert!(text.contains("IL_0010: stloc.2\n\n"));
}

#[test]
fn dump_all_includes_none() {
    let listing = write_temp(LISTING);
    let options = DumpOptions {
        all: true,
        ..DumpOptions::default()
    };
    let mut out = Vec::new();
    run_dump(listing.path(), &options, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("\nNone\nIL_000e: nop @ 3,1 -> 3,15\n"));
}

#[test]
fn dump_reports_write_failures() {
    let listing = write_temp(LISTING);
    let error = run_dump(listing.path(), &DumpOptions::default(), ClosedPipe).unwrap_err();
    assert!(matches!(error, InputError::Output(_)));
}
