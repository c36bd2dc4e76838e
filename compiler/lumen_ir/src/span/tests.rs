use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_span_merge() {
    let merged = Span::new(4, 6).merge(Span::new(1, 3));
    assert_eq!(merged, Span::new(1, 6));
    assert_eq!(merged.len(), 5);
}

#[test]
fn test_position_display_is_one_based() {
    assert_eq!(Position::new(0, 0).to_string(), "1:1");
    assert_eq!(Position::new(2, 7).to_string(), "3:8");
}

#[test]
fn test_line_index_single_line() {
    let index = LineIndex::new("let x = 1");
    assert_eq!(index.position(0), Position::new(0, 0));
    assert_eq!(index.position(4), Position::new(0, 4));
    assert_eq!(index.position(9), Position::new(0, 9));
}

#[test]
fn test_line_index_multiple_lines() {
    let index = LineIndex::new("a\nbc\n\nd");
    assert_eq!(index.line_count(), 4);
    assert_eq!(index.position(2), Position::new(1, 0));
    assert_eq!(index.position(3), Position::new(1, 1));
    assert_eq!(index.position(5), Position::new(2, 0));
    assert_eq!(index.position(6), Position::new(3, 0));
    assert_eq!(index.line_text(1), Some("bc"));
    assert_eq!(index.line_text(2), Some(""));
    assert_eq!(index.line_text(4), None);
}

#[test]
fn test_line_index_counts_characters_not_bytes() {
    let index = LineIndex::new("\"é\" x");
    // `x` sits after a two-byte character.
    assert_eq!(index.position(5), Position::new(0, 4));
}

#[test]
fn test_line_index_clamps_past_end() {
    let index = LineIndex::new("ab");
    assert_eq!(index.position(10), Position::new(0, 2));
}

#[test]
fn test_source_span_merge_orders_positions() {
    let a = SourceSpan::new(Position::new(1, 2), Position::new(1, 4));
    let b = SourceSpan::new(Position::new(0, 5), Position::new(0, 6));
    let merged = a.merge(b);
    assert_eq!(merged.begin, Position::new(0, 5));
    assert_eq!(merged.end, Position::new(1, 4));
}
