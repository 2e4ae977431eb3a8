use tracing::debug;

use crate::{
    collect::{
        collector::{CollectStats, collect},
        options::{CollectOptions, OptionsPatch},
    },
    dom::document::OverlayHost,
    error::IndexError,
    overlay::renderer::OverlayRenderer,
    refresh::scheduler::{RefreshScheduler, RefreshSignal},
    screen::screen_model::Snapshot,
    trace::{
        logger::TraceLogger,
        trace::{PassTrigger, TraceEvent},
    },
};

pub mod cli;
pub mod collect;
pub mod dom;
pub mod error;
pub mod overlay;
pub mod refresh;
pub mod report;
pub mod screen;
pub mod state;
pub mod trace;

/// Page-lifetime indexing session: remembers the last options, owns the
/// overlay and the refresh scheduler. One per page; drop it on navigation.
pub struct Indexer {
    base: CollectOptions,
    options: CollectOptions,
    overlay: OverlayRenderer,
    scheduler: RefreshScheduler,
    tracer: Option<TraceLogger>,
    passes: u64,
    last_stats: Option<CollectStats>,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexer {
    pub fn new() -> Self {
        Self::with_base_options(CollectOptions::default())
    }

    /// Options bags passed to `collect` are merged over `base` instead of
    /// the built-in defaults.
    pub fn with_base_options(base: CollectOptions) -> Self {
        Self {
            options: base.clone(),
            base,
            overlay: OverlayRenderer::new(),
            scheduler: RefreshScheduler::new(),
            tracer: None,
            passes: 0,
            last_stats: None,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Collect a snapshot of `page` with `patch` merged over the base options.
    /// The merged options are kept for later refreshes.
    pub fn collect<P: OverlayHost>(
        &mut self,
        page: &mut P,
        patch: &OptionsPatch,
    ) -> Result<Snapshot, IndexError> {
        self.options = patch.apply_to(&self.base);
        self.run_pass(page, PassTrigger::Call)
    }

    /// Remove every overlay node this session injected. Idempotent.
    pub fn cleanup_highlights<P: OverlayHost>(&mut self, page: &mut P) {
        self.overlay.dispose(page);
        self.last_stats = None;
    }

    /// Record a scroll or resize; true when it scheduled a new refresh frame.
    pub fn notify(&mut self, signal: RefreshSignal) -> bool {
        let scheduled = self.scheduler.notify(signal);
        debug!(?signal, scheduled, "refresh signal");
        scheduled
    }

    /// Run the pending refresh, if one is scheduled, with the last options.
    pub fn animation_frame<P: OverlayHost>(
        &mut self,
        page: &mut P,
    ) -> Result<Option<Snapshot>, IndexError> {
        if !self.scheduler.take_frame() {
            return Ok(None);
        }
        self.run_pass(page, PassTrigger::Refresh).map(Some)
    }

    pub fn last_options(&self) -> &CollectOptions {
        &self.options
    }

    pub fn last_stats(&self) -> Option<&CollectStats> {
        self.last_stats.as_ref()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn overlay(&self) -> &OverlayRenderer {
        &self.overlay
    }

    fn run_pass<P: OverlayHost>(
        &mut self,
        page: &mut P,
        trigger: PassTrigger,
    ) -> Result<Snapshot, IndexError> {
        if page.container().is_none() {
            return Err(IndexError::DetachedDocument);
        }

        let container = if self.options.highlight {
            self.overlay.init_container(page)
        } else {
            None
        };

        let outcome = collect(&*page, &self.options);

        if let Some(container) = container {
            self.overlay.render(page, container, &outcome.snapshot);
        }

        self.passes += 1;
        if let Some(tracer) = &self.tracer {
            let event = TraceEvent::now(self.passes, trigger, &self.options)
                .with_stats(&outcome.stats)
                .with_snapshot(&outcome.snapshot);
            tracer.log(&event);
        }
        self.last_stats = Some(outcome.stats);

        Ok(outcome.snapshot)
    }
}
