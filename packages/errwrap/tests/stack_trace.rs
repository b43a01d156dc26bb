//! Stack capture against the real symbol table: ordering, skip depth,
//! truncation and unresolvable frames

#![cfg(feature = "full-backtrace")]

use errwrap::{Frame, StackCapture, Verb, MAX_DEPTH};
use std::hint::black_box;

#[inline(never)]
fn capture_in_a(skip: usize) -> StackCapture {
    black_box(StackCapture::new(skip))
}

#[inline(never)]
fn capture_in_b(skip: usize) -> StackCapture {
    black_box(capture_in_a(skip))
}

#[inline(never)]
fn capture_in_c(skip: usize) -> StackCapture {
    black_box(capture_in_b(skip))
}

#[inline(never)]
fn recurse(depth: usize) -> StackCapture {
    if depth == 0 {
        StackCapture::new(0)
    } else {
        black_box(recurse(depth - 1))
    }
}

/// Function names from the multi-line `{:+}` trace: every frame renders as
/// a name line followed by a tab-indented location line
fn function_names(capture: &StackCapture) -> Vec<String> {
    let dump = format!("{:+}", capture.stack_trace());
    dump.trim()
        .lines()
        .step_by(2)
        .map(str::to_owned)
        .collect()
}

fn assert_prefixes(names: &[String], expected: &[&str]) {
    assert!(names.len() >= expected.len(), "trace too short: {names:#?}");
    for (name, prefix) in names.iter().zip(expected) {
        assert!(
            name.starts_with(prefix),
            "stacktrace mismatch:\nexpect={expected:#?}\ngot={names:#?}"
        );
    }
}

#[test]
fn test_innermost_frame_first() {
    let capture = capture_in_c(0);
    assert_prefixes(
        &function_names(&capture),
        &[
            "stack_trace::capture_in_a",
            "stack_trace::capture_in_b",
            "stack_trace::capture_in_c",
            "stack_trace::test_innermost_frame_first",
        ],
    );
}

#[test]
fn test_skip_drops_callers() {
    let capture = capture_in_c(2);
    assert_prefixes(
        &function_names(&capture),
        &["stack_trace::capture_in_c", "stack_trace::test_skip_drops_callers"],
    );
}

#[test]
fn test_deep_stack_truncates() {
    let capture = recurse(MAX_DEPTH + 8);
    assert_eq!(capture.len(), MAX_DEPTH);
    for name in function_names(&capture) {
        assert!(name.starts_with("stack_trace::recurse"), "{name}");
    }
}

#[test]
fn test_frame_verbs_resolve() {
    let capture = capture_in_a(0);
    let frame = capture.frames()[0];

    assert_eq!(frame.display(Verb::Short).to_string(), "stack_trace.rs");
    assert!(frame.file().ends_with("stack_trace.rs"));
    assert!(frame.line() > 0);
    assert_eq!(frame.display(Verb::Line).to_string(), frame.line().to_string());
    assert_eq!(frame.display(Verb::Name).to_string(), "capture_in_a");
    assert_eq!(
        frame.display(Verb::Value).to_string(),
        format!("stack_trace.rs:{}", frame.line())
    );

    let plus = format!("{:+}", frame.display(Verb::Short));
    assert!(plus.starts_with("stack_trace::capture_in_a\n\t"), "{plus}");
}

#[test]
fn test_text_form() {
    let capture = capture_in_a(0);
    let frame = capture.frames()[0];
    let text = frame.to_text();

    assert!(text.starts_with("stack_trace::capture_in_a "), "{text}");
    assert!(text.ends_with(&format!("stack_trace.rs:{}", frame.line())), "{text}");
    assert_eq!(
        serde_json::to_value(frame).expect("frame serializes"),
        serde_json::Value::String(text)
    );
}

#[test]
fn test_trace_serializes_as_text_list() {
    let capture = capture_in_b(0);
    let value = serde_json::to_value(capture.stack_trace()).expect("trace serializes");
    let items = value.as_array().expect("array");

    assert_eq!(items.len(), capture.len());
    assert_eq!(items[0], serde_json::Value::String(capture.frames()[0].to_text()));
}

#[test]
fn test_unresolvable_frame() {
    let frame = Frame::from_addr(0);

    assert_eq!(frame.name(), "unknown");
    assert_eq!(frame.file(), "unknown");
    assert_eq!(frame.line(), 0);
    assert_eq!(frame.to_text(), "unknown");
    assert_eq!(frame.to_string(), "unknown:0");
}

#[test]
fn test_list_form() {
    let capture = capture_in_b(0);
    let list = capture.stack_trace().to_string();

    assert!(list.starts_with("[stack_trace.rs:"), "{list}");
    assert!(list.ends_with(']'), "{list}");
    assert_eq!(list.matches(' ').count() + 1, capture.len());
}
