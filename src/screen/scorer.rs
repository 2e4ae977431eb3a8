use crate::screen::screen_model::ElementDetails;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const CONTENT_TAGS: &[&str] = &["p", "article", "section", "main"];

/// Additive salience score. Higher means a more stable, more meaningful
/// target; used for ordering only.
pub fn priority_score(details: &ElementDetails) -> u32 {
    let mut score = 0;

    // Stable identifiers
    if details.id.is_some() {
        score += 100;
    }
    if details.data_testid.is_some() {
        score += 90;
    }
    if details.data_test.is_some() {
        score += 85;
    }
    if details.aria_label.is_some() {
        score += 80;
    }
    if details.name.is_some() {
        score += 70;
    }
    if details.role.is_some() {
        score += 60;
    }

    // Form fields
    if details.tag == "input" {
        match details.input_type.as_deref() {
            Some("text") | Some("email") | Some("password") => score += 50,
            Some("submit") | Some("button") => score += 40,
            _ => {}
        }
    }

    if matches!(details.tag.as_str(), "button" | "a") {
        score += 30;
    }

    if HEADING_TAGS.contains(&details.tag.as_str()) {
        score += 25;
    }

    if CONTENT_TAGS.contains(&details.tag.as_str()) {
        score += 15;
    }

    if !details.text.is_empty() {
        score += 20;
    }

    score
}
