use std::collections::BTreeMap;
use std::path::Path;

use crate::dom::document::{ChildNode, ComputedStyle, Document, NodeId, NodeSpec, OverlayHost};
use crate::dom::fixture::{ElementFixture, NodeFixture, PageFixture, StyleFixture};
use crate::dom::geometry::{Rect, Size, Viewport};
use crate::error::IndexError;

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attrs: BTreeMap<String, String>,
    style: ComputedStyle,
    rects: Vec<Rect>,
    offset: Option<Size>,
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

/// In-memory rendered page: an arena of nodes addressed by `NodeId`.
///
/// Removed nodes keep their slot (ids are never reused) but are marked
/// detached, so stale handles degrade to empty geometry.
#[derive(Debug, Clone)]
pub struct Page {
    url: Option<String>,
    title: Option<String>,
    viewport: Viewport,
    nodes: Vec<Slot>,
    root: NodeId,
}

impl Page {
    pub fn from_fixture(fixture: PageFixture) -> Result<Self, IndexError> {
        let mut page = Page {
            url: fixture.url,
            title: fixture.title,
            viewport: fixture.viewport,
            nodes: Vec::new(),
            root: NodeId(0),
        };
        page.root = page.build_element(fixture.root, None)?;
        Ok(page)
    }

    pub fn from_json_str(json: &str) -> Result<Self, IndexError> {
        let fixture: PageFixture =
            serde_json::from_str(json).map_err(|e| IndexError::JsonParse {
                context: "page dump".into(),
                source: e,
            })?;
        Self::from_fixture(fixture)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, IndexError> {
        let fixture: PageFixture =
            serde_json::from_value(value).map_err(|e| IndexError::JsonParse {
                context: "page dump".into(),
                source: e,
            })?;
        Self::from_fixture(fixture)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, IndexError> {
        let fixture: PageFixture =
            serde_yaml::from_str(yaml).map_err(|e| IndexError::YamlParse {
                context: "page dump".into(),
                source: e,
            })?;
        Self::from_fixture(fixture)
    }

    /// Load a page dump; `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: &str) -> Result<Self, IndexError> {
        let content = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
        let is_yaml = Path::new(path)
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml");

        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Shift the client rects of every element outside a `position: fixed`
    /// subtree, as scrolling the document by (`dx`, `dy`) would. Positive
    /// `dy` scrolls down, moving content up.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        let mut stack = vec![(self.root, false)];

        while let Some((node, in_fixed)) = stack.pop() {
            if !self.is_attached(node) {
                continue;
            }
            let slot = &mut self.nodes[node.0 as usize];
            let fixed = match &mut slot.data {
                NodeData::Element(el) => {
                    let fixed = in_fixed || el.style.is_fixed();
                    if !fixed {
                        for r in el.rects.iter_mut() {
                            *r = r.translated(-dx, -dy);
                        }
                    }
                    fixed
                }
                NodeData::Text(_) => continue,
            };
            for child in slot.children.iter().rev() {
                stack.push((*child, fixed));
            }
        }
    }

    /// Dump the current tree (overlay nodes included) back to the fixture format.
    pub fn to_fixture(&self) -> PageFixture {
        PageFixture {
            url: self.url.clone(),
            title: self.title.clone(),
            viewport: self.viewport,
            root: self.dump_element(self.root),
        }
    }

    fn dump_element(&self, node: NodeId) -> ElementFixture {
        let slot = &self.nodes[node.0 as usize];
        let mut fixture = match &slot.data {
            NodeData::Element(el) => ElementFixture {
                tag: el.tag.clone(),
                attrs: el.attrs.clone(),
                style: StyleFixture::from_computed(&el.style),
                rects: el.rects.clone(),
                offset: el.offset,
                text: None,
                children: Vec::new(),
            },
            NodeData::Text(t) => ElementFixture {
                tag: "span".into(),
                attrs: BTreeMap::new(),
                style: StyleFixture::default(),
                rects: Vec::new(),
                offset: None,
                text: Some(t.clone()),
                children: Vec::new(),
            },
        };

        fixture.children = slot
            .children
            .iter()
            .map(|c| match &self.nodes[c.0 as usize].data {
                NodeData::Text(t) => NodeFixture::Text { text: t.clone() },
                NodeData::Element(_) => NodeFixture::Element(self.dump_element(*c)),
            })
            .collect();
        fixture
    }

    fn build_element(
        &mut self,
        fixture: ElementFixture,
        parent: Option<NodeId>,
    ) -> Result<NodeId, IndexError> {
        let tag = fixture.tag.trim().to_lowercase();
        if tag.is_empty() {
            return Err(IndexError::InvalidFixture("element with empty tag".into()));
        }

        let parent_style = parent.and_then(|p| match &self.nodes[p.0 as usize].data {
            NodeData::Element(el) => Some(el.style.clone()),
            NodeData::Text(_) => None,
        });
        let style = fixture.style.resolve(&tag, parent_style.as_ref());

        let id = self.push_slot(
            NodeData::Element(ElementData {
                tag,
                attrs: fixture.attrs,
                style,
                rects: fixture.rects,
                offset: fixture.offset,
            }),
            parent,
        );

        if let Some(text) = fixture.text {
            self.push_slot(NodeData::Text(text), Some(id));
        }

        for child in fixture.children {
            match child {
                NodeFixture::Element(el) => {
                    self.build_element(el, Some(id))?;
                }
                NodeFixture::Text { text } => {
                    self.push_slot(NodeData::Text(text), Some(id));
                }
            }
        }

        Ok(id)
    }

    fn push_slot(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let attached = parent.is_none_or(|p| self.nodes[p.0 as usize].attached);
        self.nodes.push(Slot {
            data,
            parent,
            children: Vec::new(),
            attached,
        });
        if let Some(p) = parent {
            self.nodes[p.0 as usize].children.push(id);
        }
        id
    }

    fn slot(&self, node: NodeId) -> Option<&Slot> {
        self.nodes.get(node.0 as usize).filter(|s| s.attached)
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.slot(node)?.data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Element that the layout would box: attached, and neither it nor any
    /// ancestor is `display: none`.
    fn rendered(&self, node: NodeId) -> Option<&ElementData> {
        let el = self.element(node)?;
        let mut current = Some(node);
        while let Some(n) = current {
            if self.element(n).is_some_and(|e| e.style.display == "none") {
                return None;
            }
            current = self.slot(n).and_then(|s| s.parent);
        }
        Some(el)
    }

    fn detach_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            let slot = &mut self.nodes[n.0 as usize];
            slot.attached = false;
            stack.extend(slot.children.iter().copied());
        }
    }

    fn collect_text(&self, node: NodeId, rendered: bool, out: &mut String) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        for child in &slot.children {
            match &self.nodes[child.0 as usize].data {
                NodeData::Text(t) => out.push_str(t),
                NodeData::Element(el) => {
                    if !rendered {
                        self.collect_text(*child, rendered, out);
                        continue;
                    }
                    if el.style.display == "none" {
                        continue;
                    }
                    let block = !el.style.display.starts_with("inline");
                    if block {
                        out.push(' ');
                    }
                    self.collect_text(*child, rendered, out);
                    if block {
                        out.push(' ');
                    }
                }
            }
        }
    }
}

impl Document for Page {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn container(&self) -> Option<NodeId> {
        if !self.is_attached(self.root) {
            return None;
        }
        self.elements()
            .into_iter()
            .find(|n| self.tag_name(*n) == "body")
            .or(Some(self.root))
    }

    fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_attached(self.root) {
            return out;
        }

        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            let slot = &self.nodes[node.0 as usize];
            if let NodeData::Element(_) = slot.data {
                out.push(node);
                for child in slot.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map(|e| e.tag.as_str()).unwrap_or("")
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node)?.parent
    }

    fn child_nodes(&self, node: NodeId) -> Vec<ChildNode<'_>> {
        let Some(slot) = self.slot(node) else {
            return Vec::new();
        };
        slot.children
            .iter()
            .map(|c| match &self.nodes[c.0 as usize].data {
                NodeData::Text(t) => ChildNode::Text(t.as_str()),
                NodeData::Element(_) => ChildNode::Element(*c),
            })
            .collect()
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        self.element(node)
            .map(|e| e.style.clone())
            .unwrap_or_default()
    }

    fn client_rects(&self, node: NodeId) -> Vec<Rect> {
        self.rendered(node)
            .map(|el| el.rects.clone())
            .unwrap_or_default()
    }

    fn offset_size(&self, node: NodeId) -> Size {
        match self.rendered(node) {
            Some(el) => el.offset.unwrap_or_else(|| {
                Rect::bounding(&el.rects)
                    .map(|b| Size::new(b.width, b.height))
                    .unwrap_or_default()
            }),
            None => Size::default(),
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, false, &mut out);
        out
    }

    fn inner_text(&self, node: NodeId) -> String {
        if self.rendered(node).is_none() {
            return String::new();
        }
        let mut out = String::new();
        self.collect_text(node, true, &mut out);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.get(node.0 as usize).is_some_and(|s| s.attached)
    }
}

impl OverlayHost for Page {
    fn create_element(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = self.push_slot(
            NodeData::Element(ElementData {
                tag: spec.tag.to_lowercase(),
                attrs: spec.attrs,
                style: spec.style,
                rects: spec.rects,
                offset: None,
            }),
            Some(parent),
        );
        if let Some(text) = spec.text {
            self.push_slot(NodeData::Text(text), Some(id));
        }
        id
    }

    fn remove_children(&mut self, node: NodeId) {
        if !self.is_attached(node) {
            return;
        }
        let children = std::mem::take(&mut self.nodes[node.0 as usize].children);
        for child in children {
            self.nodes[child.0 as usize].parent = None;
            self.detach_subtree(child);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if !self.is_attached(node) {
            return;
        }
        if let Some(parent) = self.nodes[node.0 as usize].parent.take() {
            self.nodes[parent.0 as usize].children.retain(|c| *c != node);
        }
        self.detach_subtree(node);
    }
}
