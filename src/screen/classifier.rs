use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dom::document::{ChildNode, ComputedStyle, Document, NodeId};
use crate::screen::details::is_disabled;
use crate::screen::scorer::priority_score;
use crate::screen::screen_model::{Classification, ElementDetails};

// ============================================================================
// Classifier trait: one pipeline, two capability sets
// ============================================================================

/// Everything a classifier may look at for one element.
pub struct ElementProbe<'a> {
    pub doc: &'a dyn Document,
    pub node: NodeId,
    pub tag: &'a str,
    pub style: &'a ComputedStyle,
}

impl<'a> ElementProbe<'a> {
    pub fn new(doc: &'a dyn Document, node: NodeId, style: &'a ComputedStyle) -> Self {
        Self {
            doc,
            node,
            tag: doc.tag_name(node),
            style,
        }
    }
}

/// Decides which elements enter a snapshot and how they rank.
pub trait Classifier {
    fn mode(&self) -> ClassifierMode;

    fn classify(&self, probe: &ElementProbe<'_>) -> Classification;

    fn priority(&self, details: &ElementDetails) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Interactive elements only, unranked.
    #[value(alias = "interactive")]
    Basic,
    /// Interactive and textual elements, ranked by attribute salience.
    #[default]
    Full,
}

impl ClassifierMode {
    /// Lenient lookup for config files: unknown names fall back to `Full`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "basic" | "interactive" => ClassifierMode::Basic,
            _ => ClassifierMode::Full,
        }
    }
}

pub fn build_classifier(mode: ClassifierMode) -> Box<dyn Classifier> {
    match mode {
        ClassifierMode::Basic => Box::new(BasicClassifier),
        ClassifierMode::Full => Box::new(RichClassifier),
    }
}

// ============================================================================
// RichClassifier: interactive + textual + priority
// ============================================================================

pub struct RichClassifier;

impl Classifier for RichClassifier {
    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Full
    }

    fn classify(&self, probe: &ElementProbe<'_>) -> Classification {
        Classification {
            interactive: is_interactive(probe, false),
            textual: is_text_element(probe),
        }
    }

    fn priority(&self, details: &ElementDetails) -> u32 {
        priority_score(details)
    }
}

// ============================================================================
// BasicClassifier: interactive only, discovery order
// ============================================================================

pub struct BasicClassifier;

impl Classifier for BasicClassifier {
    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Basic
    }

    fn classify(&self, probe: &ElementProbe<'_>) -> Classification {
        Classification {
            interactive: is_interactive(probe, true),
            textual: false,
        }
    }

    fn priority(&self, _details: &ElementDetails) -> u32 {
        0
    }
}

// ============================================================================
// Predicates
// ============================================================================

pub const INTERACTIVE_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "summary", "details", "label", "option",
    "optgroup",
];

pub const CLICKABLE_CLASSES: &[&str] = &["btn", "button", "clickable", "link", "nav-link"];

pub const TEXT_CONTAINER_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "section", "article", "main", "aside", "li",
    "td", "th", "blockquote", "cite", "figcaption", "nav", "header", "footer",
];

/// Above this many characters a container is a text dump, not a target.
pub const MAX_TEXT_CONTENT_CHARS: usize = 1000;
pub const MIN_TEXT_WIDTH: f64 = 50.0;
pub const MIN_TEXT_HEIGHT: f64 = 20.0;

/// Pointer cursor, an enabled interactive tag, a click handler, any role, or
/// a clickable class.
///
/// With `strict_tags`, a disabled or pointer-events:none interactive tag is
/// rejected outright; otherwise it only loses the tag rule and may still
/// qualify through handler, role or class.
pub fn is_interactive(probe: &ElementProbe<'_>, strict_tags: bool) -> bool {
    if probe.style.has_pointer_cursor() {
        return true;
    }

    if INTERACTIVE_TAGS.contains(&probe.tag) {
        let blocked =
            is_disabled(probe.doc, probe.node) || probe.style.suppresses_pointer_events();
        if !blocked {
            return true;
        }
        if strict_tags {
            return false;
        }
    }

    let doc = probe.doc;
    if doc.has_attribute(probe.node, "onclick")
        || doc.attribute(probe.node, "role").is_some_and(|r| !r.is_empty())
    {
        return true;
    }

    doc.attribute(probe.node, "class")
        .is_some_and(|class| CLICKABLE_CLASSES.iter().any(|c| class.contains(c)))
}

pub fn has_text_content(doc: &dyn Document, node: NodeId) -> bool {
    let text = doc.text_content(node);
    let len = text.trim().chars().count();
    len > 0 && len < MAX_TEXT_CONTENT_CHARS
}

/// Visible, reasonably sized block-level container carrying its own text.
pub fn is_text_element(probe: &ElementProbe<'_>) -> bool {
    if !TEXT_CONTAINER_TAGS.contains(&probe.tag) {
        return false;
    }

    let doc = probe.doc;
    if !has_text_content(doc, probe.node) {
        return false;
    }

    if probe.style.is_hidden() {
        return false;
    }

    let size = doc.offset_size(probe.node);
    if size.width == 0.0 || size.height == 0.0 {
        return false;
    }
    if size.width < MIN_TEXT_WIDTH || size.height < MIN_TEXT_HEIGHT {
        return false;
    }

    // Pure wrappers: their text belongs to descendants visited on their own.
    let children = doc.child_nodes(probe.node);
    let has_child_elements = children.iter().any(|c| matches!(c, ChildNode::Element(_)));
    if has_child_elements {
        return children
            .iter()
            .any(|c| matches!(c, ChildNode::Text(t) if !t.trim().is_empty()));
    }

    true
}
