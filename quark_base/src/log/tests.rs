use super::{Message, Severity, SourceCodeDisplay};
use crate::source_file::{SourceFile, Span};

#[test]
fn test_severity_order() {
    assert!(Severity::Debug < Severity::Info);
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
}

#[test]
fn test_message_display() {
    let message = Message::new(Severity::Warning, "unused value").to_string();

    assert!(message.contains("[warning]:"));
    assert!(message.contains("unused value"));
}

#[test]
fn test_source_code_display() {
    let source_file = SourceFile::in_memory("main.qk", "x = 1;\ny = (2 + 3;\n");
    let span = Span::new(source_file, 11, 12);

    let display = SourceCodeDisplay::new(&span, Some("unclosed parenthesis")).to_string();

    assert!(display.contains("main.qk:2:5"));
    assert!(display.contains("2 + 3;"));
    assert!(display.contains("help"));
    assert!(display.contains("unclosed parenthesis"));
}
