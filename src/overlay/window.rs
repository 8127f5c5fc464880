use crate::{
    foundation::error::{BrewError, BrewResult},
    foundation::math::interp_clamped,
};

/// Fade margin used by the stock overlays.
pub const DEFAULT_FADE_MARGIN: f64 = 0.05;
/// Vertical travel, in pixels, of an overlay fading in or out.
pub const DEFAULT_SLIDE_DISTANCE: f64 = 50.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal placement of an overlay block.
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Progress range over which one text block is fully visible, plus its fade margins.
pub struct OverlayWindow {
    /// Progress at which the block becomes fully opaque.
    pub start: f64,
    /// Progress after which the block starts fading out.
    pub end: f64,
    /// Progress span of each fade ramp; unset windows use the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_margin: Option<f64>,
    #[serde(default)]
    pub align: Align,
    /// Opaque identifier of the block's presentation content.
    #[serde(default)]
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Visual parameters of one overlay block at a given progress.
pub struct OverlayState {
    /// In `[0, 1]`.
    pub opacity: f64,
    /// Vertical translation in pixels; positive is below the resting position.
    pub offset_y: f64,
    pub align: Align,
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

impl OverlayWindow {
    pub fn new(start: f64, end: f64, align: Align, content: impl Into<String>) -> Self {
        Self {
            start,
            end,
            fade_margin: None,
            align,
            content: content.into(),
        }
    }

    pub fn with_fade_margin(mut self, fade_margin: f64) -> Self {
        self.fade_margin = Some(fade_margin);
        self
    }

    /// Effective fade margin.
    pub fn fade_margin(&self) -> f64 {
        self.fade_margin.unwrap_or(DEFAULT_FADE_MARGIN)
    }

    /// `[start - margin, start, end, end + margin]`.
    pub fn breakpoints(&self) -> [f64; 4] {
        let margin = self.fade_margin();
        [self.start - margin, self.start, self.end, self.end + margin]
    }

    /// `progress` lies in the fully visible range `[start, end]`.
    pub fn holds(&self, progress: f64) -> bool {
        self.start <= progress && progress <= self.end
    }

    /// Ramp 0 -> 1 into the window, hold 1 across it, ramp back to 0 after it.
    pub fn opacity(&self, progress: f64) -> f64 {
        if self.holds(progress) {
            return 1.0;
        }
        interp_clamped(progress, self.breakpoints(), [0.0, 1.0, 1.0, 0.0])
    }

    /// Slide from `slide` below, rest at 0 across the window, leave to `slide` above.
    pub fn offset_y(&self, progress: f64, slide: f64) -> f64 {
        if self.holds(progress) {
            return 0.0;
        }
        interp_clamped(progress, self.breakpoints(), [slide, 0.0, 0.0, -slide])
    }

    pub fn state_at(&self, progress: f64, slide: f64) -> OverlayState {
        OverlayState {
            opacity: self.opacity(progress),
            offset_y: self.offset_y(progress, slide),
            align: self.align,
        }
    }

    /// True when the faded extents of `self` and `other` intersect by more than rounding noise.
    pub fn overlaps(&self, other: &OverlayWindow) -> bool {
        const EPS: f64 = 1e-9;
        let [a0, _, _, a1] = self.breakpoints();
        let [b0, _, _, b1] = other.breakpoints();
        a0 + EPS < b1 && b0 + EPS < a1
    }

    pub fn validate(&self) -> BrewResult<()> {
        let margin = self.fade_margin();
        if !self.start.is_finite() || !self.end.is_finite() || !margin.is_finite() {
            return Err(BrewError::validation("overlay window bounds must be finite"));
        }
        if self.start > self.end {
            return Err(BrewError::validation(format!(
                "overlay window start {} is after end {}",
                self.start, self.end
            )));
        }
        if margin < 0.0 {
            return Err(BrewError::validation("overlay fade_margin must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/window.rs"]
mod tests;
