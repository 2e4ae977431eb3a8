use std::collections::HashMap;

use crate::dom::document::{Document, NodeId};

/// Derives `/body/div[2]/ul[1]/li[3]`-style structural paths, memoized for
/// the lifetime of one pass.
pub struct IdentityResolver<'d> {
    doc: &'d dyn Document,
    container: Option<NodeId>,
    paths: HashMap<NodeId, String>,
}

impl<'d> IdentityResolver<'d> {
    pub fn new(doc: &'d dyn Document) -> Self {
        Self {
            doc,
            container: doc.container(),
            paths: HashMap::new(),
        }
    }

    pub fn path_of(&mut self, node: NodeId) -> &str {
        let doc = self.doc;
        let container = self.container;
        self.paths
            .entry(node)
            .or_insert_with(|| identity_path(doc, container, node))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Walk from `node` up to (excluding) `container`, recording `tag[position]`
/// where position is the 1-based rank among preceding siblings with the same tag.
pub fn identity_path(doc: &dyn Document, container: Option<NodeId>, node: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(node);

    while let Some(n) = current {
        if Some(n) == container || !doc.is_attached(n) {
            break;
        }
        let tag = doc.tag_name(n);
        segments.push(format!("{}[{}]", tag, sibling_position(doc, n, tag)));
        current = doc.parent(n);
    }

    segments.reverse();
    let root = container.map(|c| doc.tag_name(c)).unwrap_or("body");
    format!("/{}/{}", root, segments.join("/"))
}

fn sibling_position(doc: &dyn Document, node: NodeId, tag: &str) -> usize {
    let Some(parent) = doc.parent(node) else {
        return 1;
    };

    doc.child_elements(parent)
        .into_iter()
        .take_while(|s| *s != node)
        .filter(|s| doc.tag_name(*s) == tag)
        .count()
        + 1
}
