use pretty_assertions::assert_eq;

use super::*;

fn boxing() -> Diagnostic {
    Diagnostic::new(ErrorCode::A0002, "M", SourceSpan::single_line(1, 1, 14))
        .with_message("hidden allocation: Boxing")
        .with_label(Span::new(0, 13), "value type boxed explicitly")
        .with_decided_by("IL_0002: box System.Int32")
        .with_instructions(["IL_0000: nop", "IL_0002: box System.Int32"])
}

#[test]
fn builder_collects_parts() {
    let diag = boxing();
    assert_eq!(diag.code, ErrorCode::A0002);
    assert_eq!(diag.span(), Some(Span::new(0, 13)));
    assert_eq!(diag.method, "M");
    assert_eq!(diag.instructions.len(), 2);
}

#[test]
fn notes_follow_rendering_order() {
    assert_eq!(
        boxing().notes(),
        vec![
            "sequence point @ 1,1 -> 1,14".to_string(),
            "in `M`".to_string(),
            "decided by `IL_0002: box System.Int32`".to_string(),
            "group:\n        IL_0000: nop\n        IL_0002: box System.Int32".to_string(),
        ]
    );
}

#[test]
fn bare_diagnostic_has_location_notes_only() {
    let diag = Diagnostic::new(ErrorCode::A0001, "M", SourceSpan::single_line(2, 3, 4));
    assert_eq!(diag.span(), None);
    assert_eq!(
        diag.notes(),
        vec!["sequence point @ 2,3 -> 2,4".to_string(), "in `M`".to_string()]
    );
}
