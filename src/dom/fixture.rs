use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::document::ComputedStyle;
use crate::dom::geometry::{Rect, Size, Viewport};

// ============================================================================
// Page dump format (JSON or YAML)
// ============================================================================

/// Serialized snapshot of a rendered page: the element tree with each
/// element's computed style and client rectangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub viewport: Viewport,
    pub root: ElementFixture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeFixture {
    // Element must come first: a bare `{ "text": ... }` has no `tag`.
    Element(ElementFixture),
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFixture {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "StyleFixture::is_empty")]
    pub style: StyleFixture,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rects: Vec<Rect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Size>,
    /// Shorthand for a leading text child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeFixture>,
}

/// CSS value as written in a dump; `opacity: 0` and `opacity: "0"` are both accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssValue {
    Text(String),
    Number(f64),
}

impl CssValue {
    fn into_css(self) -> String {
        match self {
            CssValue::Text(s) => s,
            CssValue::Number(n) => n.to_string(),
        }
    }
}

/// Authored subset of the computed style. Missing inherited properties
/// (visibility, cursor, pointer-events) take the parent's computed value;
/// missing non-inherited ones take their initial value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StyleFixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<CssValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, alias = "pointerEvents", skip_serializing_if = "Option::is_none")]
    pub pointer_events: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "button", "cite", "code", "em", "i", "img", "input", "kbd", "label",
    "mark", "q", "s", "select", "small", "span", "strong", "sub", "sup", "textarea", "u",
];

impl StyleFixture {
    pub fn is_empty(&self) -> bool {
        *self == StyleFixture::default()
    }

    pub fn resolve(&self, tag: &str, parent: Option<&ComputedStyle>) -> ComputedStyle {
        let inherited = parent.cloned().unwrap_or_default();
        let initial_display = if INLINE_TAGS.contains(&tag) {
            "inline"
        } else {
            "block"
        };

        ComputedStyle {
            visibility: self.visibility.clone().unwrap_or(inherited.visibility),
            display: self
                .display
                .clone()
                .unwrap_or_else(|| initial_display.to_string()),
            opacity: self
                .opacity
                .clone()
                .map(CssValue::into_css)
                .unwrap_or_else(|| "1".to_string()),
            cursor: self.cursor.clone().unwrap_or(inherited.cursor),
            pointer_events: self
                .pointer_events
                .clone()
                .unwrap_or(inherited.pointer_events),
            position: self
                .position
                .clone()
                .unwrap_or_else(|| "static".to_string()),
        }
    }

    /// Fully spelled-out fixture for a resolved style, used when dumping.
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            visibility: Some(style.visibility.clone()),
            display: Some(style.display.clone()),
            opacity: Some(CssValue::Text(style.opacity.clone())),
            cursor: Some(style.cursor.clone()),
            pointer_events: Some(style.pointer_events.clone()),
            position: Some(style.position.clone()),
        }
    }
}
