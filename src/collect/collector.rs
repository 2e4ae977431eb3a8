use serde::Serialize;
use tracing::{debug, info};

use crate::collect::options::CollectOptions;
use crate::dom::document::{Document, NodeId};
use crate::dom::geometry::Rect;
use crate::screen::classifier::{ElementProbe, build_classifier};
use crate::screen::details::extract_details;
use crate::screen::screen_model::{ElementRecord, Snapshot};
use crate::state::cache::GeometryCache;
use crate::state::identity::IdentityResolver;

/// Counters for one pass, in filter-chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectStats {
    pub enumerated: usize,
    pub skipped_hidden: usize,
    pub skipped_zero_size: usize,
    pub skipped_offscreen: usize,
    pub skipped_unclassified: usize,
    /// Discovery indices handed out (one per rect of a qualifying element).
    pub indexed_rects: usize,
    pub degenerate_rects: usize,
    pub records: usize,
    pub style_queries: usize,
    pub rect_queries: usize,
}

#[derive(Debug, Clone)]
pub struct CollectOutcome {
    pub snapshot: Snapshot,
    pub stats: CollectStats,
}

struct Candidate {
    node: NodeId,
    rect: Rect,
    index: usize,
}

/// Run one collection pass over `doc`.
///
/// Every element is visited once in document order and must survive the
/// filter chain (hidden, zero-size, off-viewport, unclassified). Each rect of
/// a survivor takes the next discovery index, degenerate rects included, so
/// indices stay stable for a given page whatever the focus filter.
pub fn collect(doc: &dyn Document, options: &CollectOptions) -> CollectOutcome {
    if options.debug {
        info!(?options, "collect config");
    }

    let classifier = build_classifier(options.mode);
    let viewport = doc.viewport();
    let focus = options.focus();

    let mut cache = GeometryCache::new(doc);
    let mut stats = CollectStats::default();
    let mut candidates = Vec::new();
    let mut next_index = 0usize;

    for node in doc.elements() {
        stats.enumerated += 1;

        let style = cache.style_of(node).clone();
        if style.is_hidden() {
            stats.skipped_hidden += 1;
            continue;
        }

        if doc.offset_size(node).is_zero() {
            stats.skipped_zero_size += 1;
            continue;
        }

        let rects = cache.rects_of(node).to_vec();
        if options.viewport_only && !viewport.intersects_any(&rects, options.viewport_expansion) {
            stats.skipped_offscreen += 1;
            continue;
        }

        let classification = classifier.classify(&ElementProbe::new(doc, node, &style));
        if !classification.qualifies() {
            stats.skipped_unclassified += 1;
            continue;
        }

        if options.debug {
            debug!(
                node = node.0,
                tag = doc.tag_name(node),
                interactive = classification.interactive,
                textual = classification.textual,
                rects = rects.len(),
                "element qualifies"
            );
        }

        for rect in rects {
            let index = next_index;
            next_index += 1;
            stats.indexed_rects += 1;

            if rect.is_degenerate() {
                stats.degenerate_rects += 1;
                continue;
            }
            if focus.is_some_and(|f| f != index) {
                continue;
            }
            candidates.push(Candidate { node, rect, index });
        }
    }

    let mut identities = IdentityResolver::new(doc);
    let mut records: Vec<ElementRecord> = candidates
        .into_iter()
        .map(|c| {
            let style = cache.style_of(c.node).clone();
            let details = extract_details(doc, c.node, &style);
            let priority = classifier.priority(&details);
            ElementRecord {
                index: c.index,
                xpath: identities.path_of(c.node).to_string(),
                details,
                rect: c.rect.into(),
                priority,
            }
        })
        .collect();

    // Stable: equal priorities keep discovery order.
    records.sort_by(|a, b| b.priority.cmp(&a.priority));

    stats.records = records.len();
    stats.style_queries = cache.style_queries();
    stats.rect_queries = cache.rect_queries();

    if options.debug {
        info!(
            enumerated = stats.enumerated,
            indexed = stats.indexed_rects,
            records = stats.records,
            "collect pass complete"
        );
    }

    CollectOutcome {
        snapshot: Snapshot::new(records),
        stats,
    }
}
