use crate::{
    foundation::error::{BrewError, BrewResult},
    overlay::window::{Align, DEFAULT_SLIDE_DISTANCE, OverlayState, OverlayWindow},
};

/// Evaluates every configured overlay window against one progress value.
///
/// Stateless: each window is computed on its own and overlapping windows simply stack.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayScheduler {
    windows: Vec<OverlayWindow>,
    slide_distance: f64,
}

impl OverlayScheduler {
    pub fn new(windows: Vec<OverlayWindow>, slide_distance: f64) -> BrewResult<Self> {
        if !slide_distance.is_finite() || slide_distance < 0.0 {
            return Err(BrewError::validation(
                "overlay slide_distance must be finite and >= 0",
            ));
        }
        for w in &windows {
            w.validate()?;
        }

        let out = Self {
            windows,
            slide_distance,
        };
        for (a, b) in out.overlapping_pairs() {
            tracing::warn!(
                first = a,
                second = b,
                "overlay windows overlap; blocks will stack"
            );
        }
        Ok(out)
    }

    /// The four stock blocks of the coffee-pour page.
    pub fn coffee_pour() -> Self {
        Self {
            windows: coffee_pour_windows(),
            slide_distance: DEFAULT_SLIDE_DISTANCE,
        }
    }

    pub fn windows(&self) -> &[OverlayWindow] {
        &self.windows
    }

    pub fn slide_distance(&self) -> f64 {
        self.slide_distance
    }

    /// One state per window, in configuration order.
    pub fn evaluate(&self, progress: f64) -> Vec<OverlayState> {
        let mut out = Vec::with_capacity(self.windows.len());
        self.evaluate_into(progress, &mut out);
        out
    }

    pub fn evaluate_into(&self, progress: f64, out: &mut Vec<OverlayState>) {
        out.clear();
        out.extend(
            self.windows
                .iter()
                .map(|w| w.state_at(progress, self.slide_distance)),
        );
    }

    /// Index pairs of windows whose faded extents intersect.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.windows.iter().enumerate() {
            for (j, b) in self.windows.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

pub(crate) fn coffee_pour_windows() -> Vec<OverlayWindow> {
    vec![
        OverlayWindow::new(0.0, 0.15, Align::Center, "headline"),
        OverlayWindow::new(0.25, 0.40, Align::Left, "harvest"),
        OverlayWindow::new(0.50, 0.65, Align::Right, "roast"),
        OverlayWindow::new(0.80, 0.98, Align::Center, "call-to-order"),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/scheduler.rs"]
mod tests;
