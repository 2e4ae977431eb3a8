use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::geometry::{Rect, Size, Viewport};

/// Opaque handle to a node of the host page. Only meaningful for the
/// document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Resolved (post-cascade) visual properties of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComputedStyle {
    pub visibility: String,
    pub display: String,
    pub opacity: String,
    pub cursor: String,
    pub pointer_events: String,
    pub position: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            visibility: "visible".into(),
            display: "block".into(),
            opacity: "1".into(),
            cursor: "auto".into(),
            pointer_events: "auto".into(),
            position: "static".into(),
        }
    }
}

impl ComputedStyle {
    /// `visibility: hidden` or `display: none`.
    pub fn is_hidden(&self) -> bool {
        self.visibility == "hidden" || self.display == "none"
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity.trim().parse::<f64>().is_ok_and(|o| o == 0.0)
    }

    pub fn has_pointer_cursor(&self) -> bool {
        self.cursor == "pointer"
    }

    pub fn suppresses_pointer_events(&self) -> bool {
        self.pointer_events == "none"
    }

    pub fn is_fixed(&self) -> bool {
        self.position == "fixed"
    }
}

/// One child of an element: either another element or a raw text node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChildNode<'a> {
    Element(NodeId),
    Text(&'a str),
}

/// Read-only view of a rendered page, as consumed by one collection pass.
///
/// Unknown or detached nodes never fail: they report empty rects, a zero
/// offset size, the default style and empty text.
pub trait Document {
    fn viewport(&self) -> Viewport;

    /// Element every identity path is rooted at (`body` on a normal page).
    fn container(&self) -> Option<NodeId>;

    /// Every attached element, depth-first in document order.
    fn elements(&self) -> Vec<NodeId>;

    fn tag_name(&self, node: NodeId) -> &str;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Parent element, `None` for the document element or detached nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn child_nodes(&self, node: NodeId) -> Vec<ChildNode<'_>>;

    fn computed_style(&self, node: NodeId) -> ComputedStyle;

    fn client_rects(&self, node: NodeId) -> Vec<Rect>;

    fn offset_size(&self, node: NodeId) -> Size;

    /// Concatenation of every descendant text node.
    fn text_content(&self, node: NodeId) -> String;

    /// Rendered text: skips `display: none` subtrees and collapses whitespace.
    fn inner_text(&self, node: NodeId) -> String;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    fn is_attached(&self, node: NodeId) -> bool;

    fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.child_nodes(node)
            .into_iter()
            .filter_map(|c| match c {
                ChildNode::Element(id) => Some(id),
                ChildNode::Text(_) => None,
            })
            .collect()
    }
}

/// Description of a node the overlay injects into the page.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub style: ComputedStyle,
    pub rects: Vec<Rect>,
    pub text: Option<String>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Renders declarations into the `style` attribute, in the given order.
    pub fn inline_style(self, declarations: &[(&str, String)]) -> Self {
        let css = declarations
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ");
        self.attr("style", css)
    }

    pub fn style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rects = vec![rect];
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Mutations needed to draw and tear down the debug overlay.
pub trait OverlayHost: Document {
    /// Appends a new element as the last child of `parent`.
    fn create_element(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId;

    fn remove_children(&mut self, node: NodeId);

    /// Detaches `node` and its subtree. No-op for already detached nodes.
    fn remove(&mut self, node: NodeId);
}
