use std::collections::HashMap;

use crate::dom::document::{ComputedStyle, Document, NodeId};
use crate::dom::geometry::Rect;

/// Pass-scoped memo of client rects and computed styles.
///
/// Build one per collection pass and drop it when the pass ends: entries are
/// keyed by node identity and are never revalidated against DOM mutations.
pub struct GeometryCache<'d> {
    doc: &'d dyn Document,
    rects: HashMap<NodeId, Vec<Rect>>,
    styles: HashMap<NodeId, ComputedStyle>,
    rect_queries: usize,
    style_queries: usize,
}

impl<'d> GeometryCache<'d> {
    pub fn new(doc: &'d dyn Document) -> Self {
        Self {
            doc,
            rects: HashMap::new(),
            styles: HashMap::new(),
            rect_queries: 0,
            style_queries: 0,
        }
    }

    pub fn rects_of(&mut self, node: NodeId) -> &[Rect] {
        let doc = self.doc;
        let queries = &mut self.rect_queries;
        self.rects.entry(node).or_insert_with(|| {
            *queries += 1;
            doc.client_rects(node)
        })
    }

    pub fn style_of(&mut self, node: NodeId) -> &ComputedStyle {
        let doc = self.doc;
        let queries = &mut self.style_queries;
        self.styles.entry(node).or_insert_with(|| {
            *queries += 1;
            doc.computed_style(node)
        })
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.styles.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len().max(self.styles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.styles.is_empty()
    }

    /// Rect lookups that actually reached the document.
    pub fn rect_queries(&self) -> usize {
        self.rect_queries
    }

    /// Style lookups that actually reached the document.
    pub fn style_queries(&self) -> usize {
        self.style_queries
    }
}
