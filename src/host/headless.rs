use crate::{
    assets::source::FrameSource,
    assets::store::LoadingStatus,
    config::SessionConfig,
    foundation::core::Viewport,
    foundation::error::BrewResult,
    render::canvas::CanvasSurface,
    render::renderer::RenderOutcome,
    scroll::tracker::ScrollGeometry,
    session::ScrollSession,
};

/// Element height, in viewports, used when the caller does not pick one (a 600vh container).
pub const DEFAULT_TARGET_VIEWPORTS: f64 = 6.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Order in which load completions are delivered.
pub enum LoadOrder {
    #[default]
    Sequential,
    Reversed,
}

/// Drives a [`ScrollSession`] without a browser.
///
/// Fetches come from a [`FrameSource`], scroll positions are turned into element geometry for a
/// tracked element of `target_height`, and refresh callbacks are pumped explicitly.
pub struct HeadlessHost<S> {
    session: ScrollSession,
    source: S,
    viewport: Viewport,
    target_height: f64,
    refreshes: u64,
}

impl<S: FrameSource> HeadlessHost<S> {
    pub fn new(config: SessionConfig, viewport: Viewport, source: S) -> BrewResult<Self> {
        let session = ScrollSession::mount(config, viewport)?;
        Ok(Self {
            session,
            source,
            viewport,
            target_height: f64::from(viewport.height) * DEFAULT_TARGET_VIEWPORTS,
            refreshes: 0,
        })
    }

    pub fn with_target_height(mut self, target_height: f64) -> Self {
        self.target_height = target_height;
        self
    }

    pub fn session(&self) -> &ScrollSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ScrollSession {
        &mut self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.session.surface()
    }

    /// Refresh callbacks that produced a render.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Issue every frame request and deliver the results in `order`.
    ///
    /// Individual fetch or decode failures are absorbed by the store; only bookkeeping errors
    /// propagate.
    #[tracing::instrument(skip(self))]
    pub fn load_all(&mut self, order: LoadOrder) -> BrewResult<LoadingStatus> {
        let mut requests = self.session.begin_loading().into_requests();
        if order == LoadOrder::Reversed {
            requests.reverse();
        }
        for req in &requests {
            let bytes = self.source.fetch(&req.path);
            self.session.frame_bytes_loaded(req.index, bytes)?;
        }
        let status = self.session.loading_status();
        tracing::debug!(loaded = status.loaded, total = status.total, "load pass finished");
        Ok(status)
    }

    /// Element geometry at which the tracker reports `progress`.
    pub fn geometry_at(&self, progress: f64) -> ScrollGeometry {
        self.session.config().scroll_offsets.geometry_at(
            progress,
            self.target_height,
            f64::from(self.viewport.height),
        )
    }

    /// Scroll the element to `progress` and run the refresh callback if one was scheduled.
    pub fn scroll_to(&mut self, progress: f64) -> Option<RenderOutcome> {
        let geometry = self.geometry_at(progress);
        self.session.on_scroll(&geometry);
        self.pump()
    }

    /// Feed `progress` directly, bypassing the geometry round trip.
    pub fn seek(&mut self, progress: f64) -> Option<RenderOutcome> {
        self.session.on_progress(progress);
        self.pump()
    }

    /// Replay a scroll path, delivering `events_per_refresh` scroll events between refresh
    /// callbacks. Returns one entry per callback that rendered.
    pub fn replay(&mut self, path: &[f64], events_per_refresh: usize) -> Vec<RenderOutcome> {
        let per = events_per_refresh.max(1);
        let mut outcomes = Vec::new();
        for chunk in path.chunks(per) {
            for &p in chunk {
                let geometry = self.geometry_at(p);
                self.session.on_scroll(&geometry);
            }
            outcomes.extend(self.pump());
        }
        outcomes
    }

    /// Run one refresh callback.
    pub fn pump(&mut self) -> Option<RenderOutcome> {
        let outcome = self.session.on_animation_frame();
        if outcome.is_some() {
            self.refreshes += 1;
        }
        outcome
    }

    pub fn resize(&mut self, viewport: Viewport) -> Option<RenderOutcome> {
        self.viewport = viewport;
        self.session.on_resize(viewport)
    }

    /// Unmount the session and hand back the source.
    pub fn finish(mut self) -> S {
        self.session.unmount();
        self.source
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
