use crate::dom::document::{ComputedStyle, Document, NodeId};
use crate::screen::screen_model::ElementDetails;

pub const MAX_TEXT_CHARS: usize = 100;

/// Tags whose `disabled` attribute actually disables them.
const DISABLEABLE_TAGS: &[&str] = &[
    "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
];

pub fn extract_details(doc: &dyn Document, node: NodeId, style: &ComputedStyle) -> ElementDetails {
    let tag = doc.tag_name(node).to_string();
    let attr = |name: &str| {
        doc.attribute(node, name)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let text: String = doc
        .inner_text(node)
        .trim()
        .chars()
        .take(MAX_TEXT_CHARS)
        .collect();

    let visible = !(style.is_hidden() || style.is_transparent());

    ElementDetails {
        input_type: input_type(doc, node, &tag),
        id: attr("id"),
        class_name: attr("class"),
        name: attr("name"),
        value: attr("value"),
        placeholder: attr("placeholder"),
        title: attr("title"),
        alt: attr("alt"),
        href: attr("href"),
        role: attr("role"),
        data_testid: attr("data-testid"),
        data_test: attr("data-test"),
        aria_label: attr("aria-label"),
        aria_labelledby: attr("aria-labelledby"),
        text,
        visible,
        enabled: !is_disabled(doc, node),
        required: doc.has_attribute(node, "required"),
        checked: doc.has_attribute(node, "checked"),
        selected: doc.has_attribute(node, "selected"),
        tag,
    }
}

pub fn is_disabled(doc: &dyn Document, node: NodeId) -> bool {
    DISABLEABLE_TAGS.contains(&doc.tag_name(node)) && doc.has_attribute(node, "disabled")
}

/// The element's `type` property: form controls report their implicit type
/// when the attribute is missing.
fn input_type(doc: &dyn Document, node: NodeId, tag: &str) -> Option<String> {
    let declared = doc
        .attribute(node, "type")
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());

    match tag {
        "input" => Some(declared.unwrap_or_else(|| "text".to_string())),
        "button" => Some(declared.unwrap_or_else(|| "submit".to_string())),
        "select" if doc.has_attribute(node, "multiple") => Some("select-multiple".to_string()),
        "select" => Some("select-one".to_string()),
        "textarea" => Some("textarea".to_string()),
        _ => declared,
    }
}
