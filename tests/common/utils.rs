use screen_index::dom::document::{Document, NodeId};
use screen_index::dom::page::Page;
use serde_json::{Value, json};

pub const VIEWPORT_W: f64 = 1280.0;
pub const VIEWPORT_H: f64 = 720.0;

/// Single client rect, in fixture form.
pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Value {
    json!([{ "x": x, "y": y, "width": w, "height": h }])
}

/// `html > (head, body > children)` on a 1280x720 viewport.
pub fn page_with(body_children: Value) -> Page {
    Page::from_json_value(page_json(body_children)).expect("valid page fixture")
}

pub fn page_json(body_children: Value) -> Value {
    json!({
        "url": "https://example.test/",
        "title": "Fixture",
        "viewport": { "width": VIEWPORT_W, "height": VIEWPORT_H },
        "root": {
            "tag": "html",
            "rects": rect(0.0, 0.0, VIEWPORT_W, VIEWPORT_H),
            "children": [
                { "tag": "head", "children": [ { "tag": "title", "text": "Fixture" } ] },
                {
                    "tag": "body",
                    "rects": rect(0.0, 0.0, VIEWPORT_W, VIEWPORT_H),
                    "children": body_children
                }
            ]
        }
    })
}

pub fn button(id: &str, label: &str, x: f64, y: f64) -> Value {
    json!({
        "tag": "button",
        "attrs": { "id": id },
        "rects": rect(x, y, 80.0, 30.0),
        "text": label
    })
}

pub fn paragraph(text: &str, x: f64, y: f64) -> Value {
    json!({
        "tag": "p",
        "rects": rect(x, y, 400.0, 40.0),
        "text": text
    })
}

/// First attached element with the given `id` attribute.
pub fn by_id(page: &Page, id: &str) -> NodeId {
    page.element_by_id(id)
        .unwrap_or_else(|| panic!("no element with id '{}'", id))
}

/// Every attached element with the given tag, in document order.
pub fn by_tag(page: &Page, tag: &str) -> Vec<NodeId> {
    page.elements()
        .into_iter()
        .filter(|n| page.tag_name(*n) == tag)
        .collect()
}
