use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    assets::source::FrameNaming,
    assets::store::DEFAULT_FRAME_COUNT,
    foundation::error::{BrewError, BrewResult},
    overlay::scheduler::{OverlayScheduler, coffee_pour_windows},
    overlay::window::{DEFAULT_FADE_MARGIN, DEFAULT_SLIDE_DISTANCE, OverlayWindow},
    scroll::tracker::ScrollOffsets,
};

/// Everything a [`crate::ScrollSession`] needs besides the host.
///
/// Every field has a default, so `{}` deserializes to the stock 64-frame coffee sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Sequence length N.
    pub frame_count: u32,
    /// Path template of the frames.
    pub naming: FrameNaming,
    /// Where scroll progress starts and ends.
    pub scroll_offsets: ScrollOffsets,
    /// Fade margin applied to windows that do not set their own.
    pub fade_margin: f64,
    /// Vertical travel of overlay blocks in pixels.
    pub slide_distance: f64,
    /// Overlay blocks in layering order.
    pub overlays: Vec<OverlayWindow>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            naming: FrameNaming::default(),
            scroll_offsets: ScrollOffsets::default(),
            fade_margin: DEFAULT_FADE_MARGIN,
            slide_distance: DEFAULT_SLIDE_DISTANCE,
            overlays: coffee_pour_windows(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(s: &str) -> BrewResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| BrewError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> BrewResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open session config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| BrewError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> BrewResult<()> {
        if self.frame_count == 0 {
            return Err(BrewError::validation("frame_count must be > 0"));
        }
        self.naming.validate()?;
        if !self.fade_margin.is_finite() || self.fade_margin < 0.0 {
            return Err(BrewError::validation("fade_margin must be finite and >= 0"));
        }
        for offset in [self.scroll_offsets.start, self.scroll_offsets.end] {
            if !offset.target.is_finite() || !offset.viewport.is_finite() {
                return Err(BrewError::validation("scroll offsets must be finite"));
            }
        }
        for w in &self.overlays {
            w.validate()?;
        }
        Ok(())
    }

    /// Overlay scheduler for this configuration.
    ///
    /// Windows that leave `fade_margin` unset take the config-wide one.
    pub fn overlay_scheduler(&self) -> BrewResult<OverlayScheduler> {
        let windows = self
            .overlays
            .iter()
            .cloned()
            .map(|w| match w.fade_margin {
                Some(_) => w,
                None => w.with_fade_margin(self.fade_margin),
            })
            .collect();
        OverlayScheduler::new(windows, self.slide_distance)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
