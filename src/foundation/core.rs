use crate::foundation::error::{BrewError, BrewResult};

pub use kurbo::{Point, Rect, Size};

/// 1-based position of a frame in the image sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// First frame of every sequence.
    pub const FIRST: Self = Self(1);

    /// Map a scroll progress onto a frame of a `frame_count` long sequence.
    ///
    /// `1 + progress * (frame_count - 1)` is floored and clamped to `[1, frame_count]`, so
    /// rubber-banded progress outside `[0, 1]` still lands on a valid slot. Non-finite progress
    /// resolves to the first frame.
    pub fn from_progress(progress: f64, frame_count: u32) -> Self {
        let last = frame_count.max(1);
        if !progress.is_finite() {
            return Self::FIRST;
        }
        let raw = 1.0 + progress * f64::from(last - 1);
        let floored = raw.floor().clamp(1.0, f64::from(last));
        Self(floored as u32)
    }

    /// Zero-based slot in an index-addressable sequence.
    pub fn slot(self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    /// Validate that this index addresses one of `frame_count` frames.
    pub fn checked(self, frame_count: u32) -> BrewResult<Self> {
        if self.0 == 0 || self.0 > frame_count {
            return Err(BrewError::validation(format!(
                "frame index {} out of range 1..={frame_count}",
                self.0
            )));
        }
        Ok(self)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host viewport size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
