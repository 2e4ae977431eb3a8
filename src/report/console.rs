use crate::screen::screen_model::{ElementRecord, Snapshot};

// ============================================================================
// Console reporter: snapshot as a terminal table
// ============================================================================

const TEXT_PREVIEW_CHARS: usize = 40;

/// Format a snapshot for terminal output.
///
/// Produces output like:
/// ```text
/// === Snapshot: 2 elements (fingerprint 3f2a9c1e) ===
///
/// [  0] 150  button #go "Go" @10,10 80x30
/// [  1]  45  h2 "Results" @10,60 400x32
/// ```
pub fn format_console_report(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let fingerprint = snapshot.fingerprint();

    out.push_str(&format!(
        "=== Snapshot: {} elements (fingerprint {}) ===\n",
        snapshot.len(),
        &fingerprint[..8.min(fingerprint.len())]
    ));

    if snapshot.is_empty() {
        out.push_str("\n(no elements)\n");
        return out;
    }

    out.push('\n');
    for record in snapshot {
        out.push_str(&format_record_line(record));
        out.push('\n');
    }

    out
}

pub fn format_record_line(record: &ElementRecord) -> String {
    let d = &record.details;
    let mut line = format!("[{:>3}] {:>3}  {}", record.index, record.priority, d.tag);

    if let Some(id) = &d.id {
        line.push_str(&format!(" #{}", id));
    }
    if let Some(label) = d.aria_label.as_ref().or(d.placeholder.as_ref()) {
        line.push_str(&format!(" [{}]", label));
    }
    if !d.text.is_empty() {
        line.push_str(&format!(" \"{}\"", preview(&d.text)));
    }
    if !d.enabled {
        line.push_str(" (disabled)");
    }

    line.push_str(&format!(
        " @{},{} {}x{}",
        record.rect.x, record.rect.y, record.rect.w, record.rect.h
    ));
    line
}

fn preview(text: &str) -> String {
    if text.chars().count() <= TEXT_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}
