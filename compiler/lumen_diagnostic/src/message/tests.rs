#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn span(begin: (u32, u32), end: (u32, u32)) -> SourceSpan {
    SourceSpan::new(Position::new(begin.0, begin.1), Position::new(end.0, end.1))
}

#[test]
fn test_wire_format_field_shape() {
    let message = Message::error("Unrecognized identifier foo", span((0, 4), (0, 7)));
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "text": "Unrecognized identifier foo",
            "level": "Error",
            "begin": [0, 4],
            "end": [0, 7],
        })
    );
}

#[test]
fn test_wire_format_levels() {
    let levels = [Level::Info, Level::Warning, Level::Error];
    let names: Vec<String> = levels
        .iter()
        .map(|level| serde_json::to_value(level).unwrap().as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Info", "Warning", "Error"]);
}

#[test]
fn test_wire_format_reads_back() {
    let text = r#"{"text":"Too many arguments.","level":"Warning","begin":[2,1],"end":[3,0]}"#;
    let message: Message = serde_json::from_str(text).unwrap();
    assert_eq!(message, Message::warning("Too many arguments.", span((2, 1), (3, 0))));
}

#[test]
fn test_display_uses_one_based_position() {
    let message = Message::info("note", span((1, 2), (1, 3)));
    assert_eq!(message.to_string(), "info: note at 2:3");
}
