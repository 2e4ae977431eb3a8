mod common;

use std::cell::Cell;
use std::collections::HashSet;

use common::utils::{by_id, by_tag, page_with, rect};
use screen_index::dom::document::{ChildNode, ComputedStyle, Document, NodeId, OverlayHost};
use screen_index::dom::geometry::{Rect, Size, Viewport};
use screen_index::dom::page::Page;
use screen_index::state::cache::GeometryCache;
use screen_index::state::identity::{IdentityResolver, identity_path};
use serde_json::json;

/// Delegates to a `Page` while counting geometry and style reads.
struct CountingDoc<'a> {
    inner: &'a Page,
    rect_reads: Cell<usize>,
    style_reads: Cell<usize>,
}

impl<'a> CountingDoc<'a> {
    fn new(inner: &'a Page) -> Self {
        Self {
            inner,
            rect_reads: Cell::new(0),
            style_reads: Cell::new(0),
        }
    }
}

impl Document for CountingDoc<'_> {
    fn viewport(&self) -> Viewport {
        self.inner.viewport()
    }
    fn container(&self) -> Option<NodeId> {
        self.inner.container()
    }
    fn elements(&self) -> Vec<NodeId> {
        self.inner.elements()
    }
    fn tag_name(&self, node: NodeId) -> &str {
        self.inner.tag_name(node)
    }
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.inner.attribute(node, name)
    }
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }
    fn child_nodes(&self, node: NodeId) -> Vec<ChildNode<'_>> {
        self.inner.child_nodes(node)
    }
    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        self.style_reads.set(self.style_reads.get() + 1);
        self.inner.computed_style(node)
    }
    fn client_rects(&self, node: NodeId) -> Vec<Rect> {
        self.rect_reads.set(self.rect_reads.get() + 1);
        self.inner.client_rects(node)
    }
    fn offset_size(&self, node: NodeId) -> Size {
        self.inner.offset_size(node)
    }
    fn text_content(&self, node: NodeId) -> String {
        self.inner.text_content(node)
    }
    fn inner_text(&self, node: NodeId) -> String {
        self.inner.inner_text(node)
    }
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner.element_by_id(id)
    }
    fn is_attached(&self, node: NodeId) -> bool {
        self.inner.is_attached(node)
    }
}

fn nested_page() -> Page {
    page_with(json!([
        { "tag": "div", "attrs": { "id": "first" }, "rects": rect(0.0, 0.0, 100.0, 20.0) },
        { "tag": "span", "rects": rect(0.0, 20.0, 100.0, 20.0) },
        {
            "tag": "div",
            "attrs": { "id": "second" },
            "rects": rect(0.0, 40.0, 400.0, 200.0),
            "children": [
                { "text": "List:" },
                {
                    "tag": "ul",
                    "attrs": { "id": "list" },
                    "rects": rect(0.0, 60.0, 400.0, 90.0),
                    "children": [
                        { "tag": "li", "rects": rect(0.0, 60.0, 400.0, 30.0), "text": "one" },
                        { "tag": "li", "rects": rect(0.0, 90.0, 400.0, 30.0), "text": "two" },
                        { "tag": "li", "attrs": { "id": "third" }, "rects": rect(0.0, 120.0, 400.0, 30.0), "text": "three" }
                    ]
                }
            ]
        }
    ]))
}

// =========================================================================
// GeometryCache
// =========================================================================

#[test]
fn cache_reads_each_node_once() {
    let page = nested_page();
    let doc = CountingDoc::new(&page);
    let node = by_id(&page, "third");

    let mut cache = GeometryCache::new(&doc);
    assert!(cache.is_empty());

    let first = cache.rects_of(node).to_vec();
    let second = cache.rects_of(node).to_vec();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);

    let visibility = cache.style_of(node).visibility.clone();
    cache.style_of(node);
    assert_eq!(visibility, "visible");

    assert_eq!(doc.rect_reads.get(), 1);
    assert_eq!(doc.style_reads.get(), 1);
    assert_eq!(cache.rect_queries(), 1);
    assert_eq!(cache.style_queries(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn cleared_cache_queries_again() {
    let page = nested_page();
    let doc = CountingDoc::new(&page);
    let node = by_id(&page, "list");

    let mut cache = GeometryCache::new(&doc);
    cache.rects_of(node);
    cache.clear();
    assert!(cache.is_empty());

    cache.rects_of(node);
    assert_eq!(doc.rect_reads.get(), 2);
}

#[test]
fn detached_nodes_yield_empty_geometry() {
    let mut page = nested_page();
    let node = by_id(&page, "list");
    page.remove(node);

    let mut cache = GeometryCache::new(&page);
    assert!(cache.rects_of(node).is_empty());
    assert_eq!(cache.style_of(node), &ComputedStyle::default());
}

// =========================================================================
// IdentityResolver
// =========================================================================

#[test]
fn path_counts_same_tag_siblings_only() {
    let page = nested_page();
    let container = page.container();

    assert_eq!(
        identity_path(&page, container, by_id(&page, "third")),
        "/body/div[2]/ul[1]/li[3]"
    );
    assert_eq!(identity_path(&page, container, by_id(&page, "first")), "/body/div[1]");
    assert_eq!(identity_path(&page, container, by_tag(&page, "span")[0]), "/body/span[1]");
}

#[test]
fn container_itself_has_empty_suffix() {
    let page = nested_page();
    let body = by_tag(&page, "body")[0];
    assert_eq!(identity_path(&page, page.container(), body), "/body/");
}

#[test]
fn resolver_memoizes_paths() {
    let page = nested_page();
    let mut resolver = IdentityResolver::new(&page);
    let node = by_id(&page, "third");

    let first = resolver.path_of(node).to_string();
    let second = resolver.path_of(node).to_string();
    assert_eq!(first, second);
    assert_eq!(resolver.len(), 1);
}

#[test]
fn paths_are_unique_within_a_page() {
    let page = nested_page();
    let mut resolver = IdentityResolver::new(&page);
    let body = by_tag(&page, "body")[0];

    let body_descendants: Vec<NodeId> = page
        .elements()
        .into_iter()
        .filter(|n| {
            let mut cur = page.parent(*n);
            while let Some(p) = cur {
                if p == body {
                    return true;
                }
                cur = page.parent(p);
            }
            false
        })
        .collect();

    let paths: HashSet<String> = body_descendants
        .iter()
        .map(|n| resolver.path_of(*n).to_string())
        .collect();
    assert_eq!(paths.len(), body_descendants.len());
}
