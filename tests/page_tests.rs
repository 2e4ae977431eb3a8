mod common;

use common::utils::{by_id, by_tag, page_json, page_with, rect};
use screen_index::Indexer;
use screen_index::collect::options::OptionsPatch;
use screen_index::dom::document::{Document, OverlayHost};
use screen_index::dom::geometry::{Rect, Size, Viewport};
use screen_index::dom::page::Page;
use screen_index::error::IndexError;
use serde_json::json;

// =========================================================================
// Geometry
// =========================================================================

#[test]
fn viewport_intersection_with_expansion() {
    let vp = Viewport::new(1280.0, 720.0);

    assert!(vp.intersects(&Rect::new(10.0, 10.0, 50.0, 50.0), 0.0));
    // Touching the edge still counts.
    assert!(vp.intersects(&Rect::new(0.0, 720.0, 50.0, 50.0), 0.0));
    assert!(!vp.intersects(&Rect::new(0.0, 800.0, 50.0, 50.0), 0.0));
    assert!(vp.intersects(&Rect::new(0.0, 800.0, 50.0, 50.0), 80.0));
    assert!(!vp.intersects(&Rect::new(-200.0, 10.0, 100.0, 50.0), 0.0));
    assert!(vp.intersects(&Rect::new(-200.0, 10.0, 100.0, 50.0), 100.0));
}

#[test]
fn bounding_box_and_degenerate_rects() {
    assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_degenerate());
    assert!(!Rect::new(5.0, 5.0, 1.0, 1.0).is_degenerate());

    let b = Rect::bounding(&[Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(20.0, 5.0, 10.0, 20.0)]).unwrap();
    assert_eq!(b, Rect::new(0.0, 0.0, 30.0, 25.0));
    assert!(Rect::bounding(&[]).is_none());
}

// =========================================================================
// Fixture loading
// =========================================================================

#[test]
fn fixture_builds_tree_in_document_order() {
    let page = page_with(json!([
        { "tag": "DIV", "attrs": { "id": "a" }, "children": [ { "tag": "span", "attrs": { "id": "b" } } ] },
        { "tag": "p", "attrs": { "id": "c" } }
    ]));

    assert_eq!(page.url(), Some("https://example.test/"));
    assert_eq!(page.title(), Some("Fixture"));

    let tags: Vec<&str> = page.elements().iter().map(|n| page.tag_name(*n)).collect();
    assert_eq!(tags, vec!["html", "head", "title", "body", "div", "span", "p"]);

    let a = by_id(&page, "a");
    assert_eq!(page.parent(by_id(&page, "b")), Some(a));
    assert_eq!(page.container(), Some(by_tag(&page, "body")[0]));
}

#[test]
fn inherited_properties_flow_to_descendants() {
    let page = page_with(json!([
        {
            "tag": "div",
            "attrs": { "id": "outer" },
            "style": { "visibility": "hidden", "cursor": "pointer", "pointerEvents": "none", "opacity": "0.5" },
            "children": [
                { "tag": "span", "attrs": { "id": "inner" } },
                { "tag": "div", "attrs": { "id": "shown" }, "style": { "visibility": "visible" } }
            ]
        }
    ]));

    let inner = page.computed_style(by_id(&page, "inner"));
    assert_eq!(inner.visibility, "hidden");
    assert_eq!(inner.cursor, "pointer");
    assert_eq!(inner.pointer_events, "none");
    assert_eq!(inner.opacity, "1", "opacity does not inherit");
    assert_eq!(inner.display, "inline");

    let shown = page.computed_style(by_id(&page, "shown"));
    assert_eq!(shown.visibility, "visible");
    assert_eq!(shown.display, "block");
}

#[test]
fn numeric_and_string_opacity_are_equivalent() {
    let page = page_with(json!([
        { "tag": "div", "attrs": { "id": "n" }, "style": { "opacity": 0 } },
        { "tag": "div", "attrs": { "id": "s" }, "style": { "opacity": "0" } },
        { "tag": "div", "attrs": { "id": "half" }, "style": { "opacity": 0.5 } }
    ]));

    assert!(page.computed_style(by_id(&page, "n")).is_transparent());
    assert!(page.computed_style(by_id(&page, "s")).is_transparent());
    assert!(!page.computed_style(by_id(&page, "half")).is_transparent());
}

#[test]
fn yaml_dump_loads() {
    let yaml = r#"
url: https://example.test/form
viewport: { width: 800, height: 600 }
root:
  tag: html
  children:
    - tag: body
      rects: [{ x: 0, y: 0, width: 800, height: 600 }]
      children:
        - tag: button
          attrs: { id: go }
          rects: [{ x: 10, y: 10, width: 80, height: 30 }]
          text: Go
"#;
    let page = Page::from_yaml_str(yaml).unwrap();
    assert_eq!(page.viewport(), Viewport::new(800.0, 600.0));
    assert_eq!(page.inner_text(by_id(&page, "go")), "Go");
}

#[test]
fn load_picks_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("page.json");
    std::fs::write(&json_path, page_json(json!([])).to_string()).unwrap();
    assert!(Page::load(json_path.to_str().unwrap()).is_ok());

    let yaml_path = dir.path().join("page.yml");
    std::fs::write(&yaml_path, "root:\n  tag: body\n").unwrap();
    let page = Page::load(yaml_path.to_str().unwrap()).unwrap();
    assert_eq!(page.tag_name(page.root()), "body");

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Page::load(missing.to_str().unwrap()),
        Err(IndexError::Io { .. })
    ));
}

#[test]
fn malformed_dumps_are_rejected() {
    assert!(matches!(
        Page::from_json_str("{ not json"),
        Err(IndexError::JsonParse { .. })
    ));
    assert!(matches!(
        Page::from_json_value(json!({ "root": { "tag": "  " } })),
        Err(IndexError::InvalidFixture(_))
    ));
}

// =========================================================================
// Geometry and text accessors
// =========================================================================

#[test]
fn offset_size_defaults_to_bounding_box() {
    let page = page_with(json!([
        {
            "tag": "span",
            "attrs": { "id": "wrapped" },
            "rects": [
                { "x": 100.0, "y": 10.0, "width": 200.0, "height": 16.0 },
                { "x": 0.0, "y": 26.0, "width": 120.0, "height": 16.0 }
            ]
        },
        { "tag": "div", "attrs": { "id": "explicit" }, "rects": rect(0.0, 0.0, 10.0, 10.0), "offset": { "width": 0.0, "height": 0.0 } },
        { "tag": "div", "attrs": { "id": "none" }, "style": { "display": "none" }, "rects": rect(0.0, 0.0, 10.0, 10.0) }
    ]));

    assert_eq!(page.offset_size(by_id(&page, "wrapped")), Size::new(300.0, 32.0));
    assert!(page.offset_size(by_id(&page, "explicit")).is_zero());

    let none = by_id(&page, "none");
    assert!(page.offset_size(none).is_zero());
    assert!(page.client_rects(none).is_empty());
}

#[test]
fn display_none_ancestor_hides_subtree_geometry() {
    let page = page_with(json!([
        {
            "tag": "div",
            "style": { "display": "none" },
            "children": [
                {
                    "tag": "section",
                    "children": [
                        { "tag": "button", "attrs": { "id": "deep" }, "rects": rect(10.0, 10.0, 80.0, 30.0), "text": "Deep" }
                    ]
                }
            ]
        }
    ]));

    let deep = by_id(&page, "deep");
    assert!(page.client_rects(deep).is_empty());
    assert!(page.offset_size(deep).is_zero());
    assert_eq!(page.inner_text(deep), "");
    assert_eq!(page.text_content(deep), "Deep");
}

#[test]
fn inner_text_separates_blocks_and_collapses_whitespace() {
    let page = page_with(json!([
        {
            "tag": "div",
            "attrs": { "id": "x" },
            "children": [
                { "tag": "p", "text": "First\n   line" },
                { "tag": "p", "text": "Second" },
                { "tag": "b", "text": "!" }
            ]
        }
    ]));

    let node = by_id(&page, "x");
    assert_eq!(page.inner_text(node), "First line Second !");
    assert_eq!(page.text_content(node), "First\n   lineSecond!");
}

#[test]
fn scroll_moves_everything_but_fixed_subtrees() {
    let mut page = page_with(json!([
        { "tag": "div", "attrs": { "id": "flow" }, "rects": rect(0.0, 500.0, 100.0, 20.0) },
        {
            "tag": "div",
            "attrs": { "id": "bar" },
            "style": { "position": "fixed" },
            "rects": rect(0.0, 0.0, 1280.0, 40.0),
            "children": [ { "tag": "a", "attrs": { "id": "link" }, "rects": rect(10.0, 10.0, 40.0, 20.0) } ]
        }
    ]));

    page.scroll_by(0.0, 300.0);
    assert_eq!(page.client_rects(by_id(&page, "flow"))[0].y, 200.0);
    assert_eq!(page.client_rects(by_id(&page, "bar"))[0].y, 0.0);
    assert_eq!(page.client_rects(by_id(&page, "link"))[0].y, 10.0);
}

// =========================================================================
// Mutation
// =========================================================================

#[test]
fn removed_nodes_degrade_gracefully() {
    let mut page = page_with(json!([
        { "tag": "div", "attrs": { "id": "x" }, "rects": rect(0.0, 0.0, 10.0, 10.0), "text": "gone" }
    ]));
    let node = by_id(&page, "x");
    page.remove(node);

    assert!(!page.is_attached(node));
    assert!(page.element_by_id("x").is_none());
    assert_eq!(page.tag_name(node), "");
    assert!(page.client_rects(node).is_empty());
    assert_eq!(page.inner_text(node), "");

    // Removing twice is harmless.
    page.remove(node);
}

#[test]
fn detached_document_fails_collection() {
    let mut page = page_with(json!([]));
    let root = page.root();
    page.remove(root);

    let mut indexer = Indexer::new();
    let err = indexer.collect(&mut page, &OptionsPatch::default()).unwrap_err();
    assert!(matches!(err, IndexError::DetachedDocument));
}

#[test]
fn dump_includes_the_overlay() {
    let mut page = page_with(json!([
        { "tag": "button", "attrs": { "id": "go" }, "rects": rect(10.0, 10.0, 80.0, 30.0), "text": "Go" }
    ]));
    let mut indexer = Indexer::new();
    indexer.collect(&mut page, &OptionsPatch::default()).unwrap();

    let dumped = serde_json::to_string(&page.to_fixture()).unwrap();
    assert!(dumped.contains("screen-index-overlay"));
    assert!(dumped.contains("0(150)"));

    let reloaded = Page::from_json_str(&dumped).unwrap();
    assert_eq!(reloaded.elements().len(), page.elements().len());
}
