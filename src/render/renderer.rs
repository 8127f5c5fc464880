use crate::{
    assets::store::FrameStore,
    foundation::core::{FrameIndex, Size, Viewport},
    render::canvas::CanvasSurface,
    render::fit::{ContainFit, contain_fit},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Why a render call left the surface untouched.
pub enum SkipReason {
    /// No drawing surface: never provided, or torn down.
    NoSurface,
    /// The surface has zero width or height.
    EmptySurface,
    /// The frame store has not accounted for every frame yet.
    NotReady,
    /// The resolved frame is pending, failed, or malformed.
    FrameUnavailable(FrameIndex),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Result of one render call.
pub enum RenderOutcome {
    /// The surface was cleared and `frame` drawn at `fit`.
    Drawn {
        frame: FrameIndex,
        fit: ContainFit,
    },
    /// Nothing was drawn and prior content was kept.
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn { .. })
    }

    pub fn frame(&self) -> Option<FrameIndex> {
        match self {
            Self::Drawn { frame, .. } => Some(*frame),
            Self::Skipped(SkipReason::FrameUnavailable(frame)) => Some(*frame),
            Self::Skipped(_) => None,
        }
    }
}

/// Owns the drawing surface and turns progress into a contain-fitted frame.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    surface: Option<CanvasSurface>,
    last_progress: f64,
    last_drawn: Option<FrameIndex>,
}

impl FrameRenderer {
    /// Renderer drawing into a fresh surface of `viewport` size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            surface: Some(CanvasSurface::new(viewport)),
            last_progress: 0.0,
            last_drawn: None,
        }
    }

    /// Renderer for a host that could not provide a drawing surface; every render is a no-op.
    pub fn detached() -> Self {
        Self {
            surface: None,
            last_progress: 0.0,
            last_drawn: None,
        }
    }

    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.surface.as_ref()
    }

    /// Progress of the most recent render request, drawn or not.
    pub fn last_progress(&self) -> f64 {
        self.last_progress
    }

    pub fn last_drawn(&self) -> Option<FrameIndex> {
        self.last_drawn
    }

    /// Draw the frame `progress` resolves to.
    ///
    /// Clears and redraws the whole surface only when the frame is drawable; otherwise the call
    /// is a no-op and previous content stays on screen.
    pub fn render(&mut self, progress: f64, store: &FrameStore) -> RenderOutcome {
        self.last_progress = progress;

        let Some(surface) = self.surface.as_mut() else {
            return RenderOutcome::Skipped(SkipReason::NoSurface);
        };
        if !store.is_ready() {
            return RenderOutcome::Skipped(SkipReason::NotReady);
        }

        let frame = FrameIndex::from_progress(progress, store.frame_count());
        let Some(image) = store.frame(frame) else {
            tracing::trace!(frame = frame.0, "frame not drawable; keeping previous content");
            return RenderOutcome::Skipped(SkipReason::FrameUnavailable(frame));
        };

        if let Err(err) = image.check() {
            tracing::warn!(frame = frame.0, error = %err, "malformed frame; keeping previous content");
            return RenderOutcome::Skipped(SkipReason::FrameUnavailable(frame));
        }

        let image_size = Size::new(f64::from(image.width), f64::from(image.height));
        let Some(fit) = contain_fit(surface.viewport().size(), image_size) else {
            return RenderOutcome::Skipped(SkipReason::EmptySurface);
        };

        surface.clear();
        if let Err(err) = surface.draw_image(image, fit.dest) {
            tracing::warn!(frame = frame.0, error = %err, "frame draw failed");
            self.last_drawn = None;
            return RenderOutcome::Skipped(SkipReason::FrameUnavailable(frame));
        }

        self.last_drawn = Some(frame);
        RenderOutcome::Drawn { frame, fit }
    }

    /// Reset the surface to `viewport` and redraw at the last-known progress.
    ///
    /// Resizing always clears the surface, so a stale-sized frame never survives a resize.
    pub fn resize(&mut self, viewport: Viewport, store: &FrameStore) -> RenderOutcome {
        self.resize_at(viewport, self.last_progress, store)
    }

    /// Like [`FrameRenderer::resize`], redrawing at `progress` instead.
    pub fn resize_at(
        &mut self,
        viewport: Viewport,
        progress: f64,
        store: &FrameStore,
    ) -> RenderOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return RenderOutcome::Skipped(SkipReason::NoSurface);
        };
        surface.resize(viewport);
        self.last_drawn = None;
        tracing::debug!(width = viewport.width, height = viewport.height, "surface resized");
        self.render(progress, store)
    }

    /// Drop the surface. Later calls are no-ops.
    pub fn teardown(&mut self) {
        self.surface = None;
        self.last_drawn = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.surface.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
