use screen_index::report::console::{format_console_report, format_record_line};
use screen_index::screen::screen_model::{ElementDetails, ElementRecord, RecordRect, Snapshot};

// ============================================================================
// Helper builders
// ============================================================================

fn record(index: usize, tag: &str, text: &str, priority: u32) -> ElementRecord {
    let mut details = ElementDetails::for_tag(tag);
    details.text = text.to_string();
    ElementRecord {
        index,
        xpath: format!("/body/{}[1]", tag),
        details,
        rect: RecordRect {
            x: 10.0,
            y: 20.0,
            w: 80.0,
            h: 30.0,
        },
        priority,
    }
}

// ============================================================================
// Console Reporter Tests
// ============================================================================

#[test]
fn console_report_empty_snapshot() {
    let output = format_console_report(&Snapshot::default());
    assert!(output.starts_with("=== Snapshot: 0 elements (fingerprint "));
    assert!(output.contains("(no elements)"));
}

#[test]
fn console_report_lists_records_in_snapshot_order() {
    let snapshot = Snapshot::new(vec![
        record(1, "button", "Save", 50),
        record(0, "p", "Intro", 35),
    ]);
    let output = format_console_report(&snapshot);

    assert!(output.contains("2 elements"));
    let fingerprint = snapshot.fingerprint();
    assert!(output.contains(&fingerprint[..8]));

    let save = output.find("button").unwrap();
    let intro = output.find("\"Intro\"").unwrap();
    assert!(save < intro);
}

#[test]
fn record_line_layout() {
    let mut r = record(3, "input", "", 150);
    r.details.id = Some("email".into());
    r.details.placeholder = Some("you@example.com".into());
    r.details.enabled = false;

    assert_eq!(
        format_record_line(&r),
        "[  3] 150  input #email [you@example.com] (disabled) @10,20 80x30"
    );
}

#[test]
fn aria_label_wins_over_placeholder() {
    let mut r = record(0, "input", "", 0);
    r.details.aria_label = Some("Search".into());
    r.details.placeholder = Some("Type here".into());

    let line = format_record_line(&r);
    assert!(line.contains("[Search]"));
    assert!(!line.contains("Type here"));
}

#[test]
fn long_text_is_previewed() {
    let long = "word ".repeat(20);
    let r = record(0, "p", long.trim(), 35);
    let line = format_record_line(&r);

    assert!(line.contains("...\""));
    assert!(!line.contains(long.trim()));
}
