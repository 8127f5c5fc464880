use std::{cell::RefCell, rc::Rc};

use crate::{
    assets::store::{FrameStore, LoadEvent, LoadHandle, LoadingStatus, PreparedImage},
    config::SessionConfig,
    foundation::core::{FrameIndex, Viewport},
    foundation::error::BrewResult,
    overlay::window::OverlayState,
    render::canvas::CanvasSurface,
    render::renderer::{FrameRenderer, RenderOutcome},
    render::schedule::RenderScheduler,
    scroll::tracker::{ScrollGeometry, ScrollTracker, Subscription},
};

/// Component-lifetime state of one mounted scroll sequence.
///
/// Built on mount, released on [`ScrollSession::unmount`]. The host forwards its events here:
/// scroll and resize notifications, refresh callbacks, and frame load completions. After
/// unmount every entry point is a no-op, so late completions of in-flight fetches are harmless.
pub struct ScrollSession {
    config: SessionConfig,
    store: FrameStore,
    tracker: ScrollTracker,
    renderer: FrameRenderer,
    scheduler: Rc<RenderScheduler>,
    overlay_states: Rc<RefCell<Vec<OverlayState>>>,
    subscriptions: Vec<Subscription>,
    last_outcome: Option<RenderOutcome>,
    mounted: bool,
}

impl std::fmt::Debug for ScrollSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSession")
            .field("mounted", &self.mounted)
            .field("status", &self.store.status())
            .field("progress", &self.tracker.current())
            .field("last_outcome", &self.last_outcome)
            .finish()
    }
}

impl ScrollSession {
    /// Mount with a drawing surface sized to `viewport`.
    pub fn mount(config: SessionConfig, viewport: Viewport) -> BrewResult<Self> {
        Self::mount_with(config, FrameRenderer::new(viewport))
    }

    /// Mount on a host that could not provide a drawing surface. Rendering is a no-op; loading
    /// and overlays still work.
    pub fn mount_detached(config: SessionConfig) -> BrewResult<Self> {
        tracing::warn!("no drawing surface available; frames will not be drawn");
        Self::mount_with(config, FrameRenderer::detached())
    }

    fn mount_with(config: SessionConfig, renderer: FrameRenderer) -> BrewResult<Self> {
        config.validate()?;
        let store = FrameStore::new(config.frame_count, config.naming.clone())?;
        let overlays = config.overlay_scheduler()?;
        let tracker = ScrollTracker::new(config.scroll_offsets);
        let scheduler = Rc::new(RenderScheduler::new());
        let overlay_states = Rc::new(RefCell::new(overlays.evaluate(tracker.current())));

        let render_sub = {
            let scheduler = Rc::clone(&scheduler);
            tracker.subscribe(move |p| {
                scheduler.request(p);
            })
        };
        let overlay_sub = {
            let states = Rc::clone(&overlay_states);
            tracker.subscribe(move |p| overlays.evaluate_into(p, &mut states.borrow_mut()))
        };

        tracing::debug!(frames = config.frame_count, "scroll session mounted");
        Ok(Self {
            config,
            store,
            tracker,
            renderer,
            scheduler,
            overlay_states,
            subscriptions: vec![render_sub, overlay_sub],
            last_outcome: None,
            mounted: true,
        })
    }

    /// Start fetching every frame; repeated calls return an empty handle.
    pub fn begin_loading(&mut self) -> LoadHandle {
        if !self.mounted {
            return LoadHandle::default();
        }
        self.store.load()
    }

    /// Deliver one fetch outcome. The completion that makes the store ready also performs the
    /// first draw at the current progress.
    #[tracing::instrument(skip(self, outcome), fields(frame = index.0))]
    pub fn frame_loaded(
        &mut self,
        index: FrameIndex,
        outcome: BrewResult<PreparedImage>,
    ) -> BrewResult<Option<LoadEvent>> {
        if !self.mounted {
            tracing::debug!("completion after unmount ignored");
            return Ok(None);
        }
        let event = self.store.complete(index, outcome)?;
        if event.is_some_and(|ev| ev.became_ready) {
            let outcome = self.renderer.render(self.tracker.current(), &self.store);
            self.last_outcome = Some(outcome);
        }
        Ok(event)
    }

    /// Like [`ScrollSession::frame_loaded`] with still-encoded bytes.
    pub fn frame_bytes_loaded(
        &mut self,
        index: FrameIndex,
        bytes: BrewResult<Vec<u8>>,
    ) -> BrewResult<Option<LoadEvent>> {
        let outcome = bytes.and_then(|b| crate::assets::decode::decode_image(&b));
        self.frame_loaded(index, outcome)
    }

    /// Feed a scroll notification. Returns true when the host should schedule one refresh
    /// callback ([`ScrollSession::on_animation_frame`]).
    pub fn on_scroll(&mut self, geometry: &ScrollGeometry) -> bool {
        if !self.mounted {
            return false;
        }
        let was_pending = self.scheduler.is_pending();
        self.tracker.update(geometry);
        self.after_progress(was_pending)
    }

    /// Feed an already-normalized progress value, for hosts that compute it themselves.
    pub fn on_progress(&mut self, progress: f64) -> bool {
        if !self.mounted {
            return false;
        }
        let was_pending = self.scheduler.is_pending();
        self.tracker.set_progress(progress);
        self.after_progress(was_pending)
    }

    fn after_progress(&mut self, was_pending: bool) -> bool {
        if !self.store.is_ready() {
            self.scheduler.cancel();
            return false;
        }
        !was_pending && self.scheduler.is_pending()
    }

    /// Refresh callback: draw the latest progress if a render is pending.
    pub fn on_animation_frame(&mut self) -> Option<RenderOutcome> {
        if !self.mounted {
            return None;
        }
        let progress = self.scheduler.take()?;
        let outcome = self.renderer.render(progress, &self.store);
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Resize the surface to the new viewport and redraw at the current progress.
    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self, viewport: Viewport) -> Option<RenderOutcome> {
        if !self.mounted {
            return None;
        }
        let outcome = self
            .renderer
            .resize_at(viewport, self.tracker.current(), &self.store);
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Release the session: observers are deregistered, pending renders dropped, and the
    /// surface torn down.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.subscriptions.clear();
        self.scheduler.cancel();
        self.renderer.teardown();
        tracing::debug!("scroll session unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn loading_status(&self) -> LoadingStatus {
        self.store.status()
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    pub fn progress(&self) -> f64 {
        self.tracker.current()
    }

    /// Frame the current progress resolves to.
    pub fn current_frame(&self) -> FrameIndex {
        FrameIndex::from_progress(self.tracker.current(), self.store.frame_count())
    }

    /// Overlay states at the current progress, in configuration order.
    pub fn overlays(&self) -> Vec<OverlayState> {
        self.overlay_states.borrow().clone()
    }

    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.renderer.surface()
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn last_outcome(&self) -> Option<RenderOutcome> {
        self.last_outcome
    }

    /// Whether a refresh callback is outstanding.
    pub fn render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }
}

impl Drop for ScrollSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
