use super::*;

#[test]
fn hidden_sentinel_value() {
    assert_eq!(HIDDEN_LINE, 16_707_566);
    assert!(SourceSpan::HIDDEN.is_hidden());
}

#[test]
fn sentinel_on_either_line_is_hidden() {
    assert!(SourceSpan::new(HIDDEN_LINE, 0, 3, 4).is_hidden());
    assert!(SourceSpan::new(3, 1, HIDDEN_LINE, 0).is_hidden());
    assert!(!SourceSpan::new(3, 1, 3, 9).is_hidden());
}

#[test]
fn start_is_line_then_column() {
    let span = SourceSpan::new(7, 12, 9, 2);
    assert_eq!(span.start(), (7, 12));
}

#[test]
fn column_width_saturates() {
    assert_eq!(SourceSpan::single_line(1, 5, 9).column_width(), 4);
    assert_eq!(SourceSpan::single_line(1, 9, 5).column_width(), 0);
}

#[test]
fn equality_uses_whole_tuple() {
    let a = SourceSpan::single_line(5, 1, 10);
    let b = SourceSpan::single_line(5, 1, 11);
    assert_ne!(a, b);
    assert_eq!(a.start(), b.start());
}

#[test]
fn display_matches_sequence_point_format() {
    assert_eq!(SourceSpan::new(3, 1, 3, 24).to_string(), "3,1 -> 3,24");
    assert_eq!(SourceSpan::HIDDEN.to_string(), "HIDDEN (0xfeefee)");
}

#[test]
fn display_needs_sentinel_on_both_lines() {
    let half = SourceSpan::new(HIDDEN_LINE, 0, 4, 2);
    assert!(half.is_hidden());
    assert_eq!(half.to_string(), format!("{HIDDEN_LINE},0 -> 4,2"));
    assert_eq!(
        SourceSpan::new(HIDDEN_LINE, 0, HIDDEN_LINE, 0).to_string(),
        "HIDDEN (0xfeefee)"
    );
}
