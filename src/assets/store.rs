use std::sync::Arc;

use crate::{
    assets::decode as assets_decode,
    assets::source::{FrameNaming, FrameSource},
    foundation::core::FrameIndex,
    foundation::error::{BrewError, BrewResult},
};

/// Frame count of the stock coffee-pour sequence.
pub const DEFAULT_FRAME_COUNT: u32 = 64;

#[derive(Clone, Debug)]
/// Decoded raster frame in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Reject images with no pixels or with a buffer that does not hold `width * height` texels.
    pub fn check(&self) -> BrewResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BrewError::asset(format!(
                "frame image is {}x{}",
                self.width, self.height
            )));
        }
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4));
        if expected != Some(self.rgba8_premul.len()) {
            return Err(BrewError::asset(format!(
                "frame image {}x{} carries {} bytes",
                self.width,
                self.height,
                self.rgba8_premul.len()
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Loading lifecycle of one frame.
pub enum FrameState {
    /// Requested, no completion delivered yet.
    Pending,
    /// Decoded and drawable.
    Loaded,
    /// Fetch or decode failed. Counts toward readiness, never drawable.
    Failed,
}

#[derive(Clone, Debug)]
enum FrameSlot {
    Pending,
    Loaded(PreparedImage),
    Failed,
}

#[derive(Clone, Debug)]
/// One frame of the sequence, addressed by its 1-based index.
pub struct FrameAsset {
    index: FrameIndex,
    path: String,
    slot: FrameSlot,
}

impl FrameAsset {
    pub fn index(&self) -> FrameIndex {
        self.index
    }

    /// Served path derived from the naming template.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> FrameState {
        match self.slot {
            FrameSlot::Pending => FrameState::Pending,
            FrameSlot::Loaded(_) => FrameState::Loaded,
            FrameSlot::Failed => FrameState::Failed,
        }
    }

    /// Decoded image, only once loaded.
    pub fn image(&self) -> Option<&PreparedImage> {
        match &self.slot {
            FrameSlot::Loaded(img) => Some(img),
            FrameSlot::Pending | FrameSlot::Failed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A fetch the host must perform and report back through [`FrameStore::complete`].
pub struct FrameRequest {
    /// Frame the fetch belongs to.
    pub index: FrameIndex,
    /// Served path to fetch.
    pub path: String,
}

#[derive(Clone, Debug, Default)]
/// Result of [`FrameStore::load`].
///
/// Only the first call in a lifecycle carries requests; later calls are empty and not fresh.
pub struct LoadHandle {
    requests: Vec<FrameRequest>,
    fresh: bool,
}

impl LoadHandle {
    /// True when this call started the load.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn requests(&self) -> &[FrameRequest] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<FrameRequest> {
        self.requests
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Accounting update produced by one accepted completion.
pub struct LoadEvent {
    /// Frame that completed.
    pub index: FrameIndex,
    /// State the frame settled in.
    pub state: FrameState,
    /// Completions accounted so far, failures included.
    pub loaded_count: usize,
    /// True for exactly one completion per lifecycle: the one that made the store ready.
    pub became_ready: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Loading signal consumed by a progress indicator.
pub struct LoadingStatus {
    /// All frames accounted for.
    pub ready: bool,
    /// Frames accounted for, failures included.
    pub loaded: usize,
    /// Sequence length.
    pub total: usize,
    /// `round(loaded / total * 100)`.
    pub percent: u8,
}

impl LoadingStatus {
    pub fn new(loaded: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((loaded as f64 / total as f64) * 100.0)
                .round()
                .clamp(0.0, 100.0) as u8
        };
        Self {
            ready: total > 0 && loaded == total,
            loaded,
            total,
            percent,
        }
    }
}

#[derive(Clone, Debug)]
/// Ordered, index-addressable frame sequence with load accounting.
pub struct FrameStore {
    naming: FrameNaming,
    frame_count: u32,
    frames: Vec<FrameAsset>,
    loaded_count: usize,
    ready: bool,
}

impl FrameStore {
    pub fn new(frame_count: u32, naming: FrameNaming) -> BrewResult<Self> {
        if frame_count == 0 {
            return Err(BrewError::validation("frame_count must be > 0"));
        }
        naming.validate()?;
        Ok(Self {
            naming,
            frame_count,
            frames: Vec::new(),
            loaded_count: 0,
            ready: false,
        })
    }

    /// Stock 64-frame coffee sequence.
    pub fn coffee_pour() -> Self {
        Self {
            naming: FrameNaming::default(),
            frame_count: DEFAULT_FRAME_COUNT,
            frames: Vec::new(),
            loaded_count: 0,
            ready: false,
        }
    }

    /// Start loading every frame.
    ///
    /// The first call creates all frames as pending and returns one request per frame. Calls
    /// after that return an empty handle so a double mount never issues duplicate fetches.
    pub fn load(&mut self) -> LoadHandle {
        if self.is_loading_started() {
            tracing::debug!("frame load already started; ignoring repeated load");
            return LoadHandle::default();
        }

        self.frames = (1..=self.frame_count)
            .map(|i| {
                let index = FrameIndex(i);
                FrameAsset {
                    index,
                    path: self.naming.path_for(index),
                    slot: FrameSlot::Pending,
                }
            })
            .collect();

        tracing::debug!(frames = self.frame_count, "frame load started");
        LoadHandle {
            requests: self
                .frames
                .iter()
                .map(|f| FrameRequest {
                    index: f.index,
                    path: f.path.clone(),
                })
                .collect(),
            fresh: true,
        }
    }

    /// Record the outcome of one fetch.
    ///
    /// Failures, including malformed images, are logged and counted like successes so one
    /// missing file cannot stall readiness. Completions for a frame that already settled are ignored and yield `None`.
    pub fn complete(
        &mut self,
        index: FrameIndex,
        outcome: BrewResult<PreparedImage>,
    ) -> BrewResult<Option<LoadEvent>> {
        if !self.is_loading_started() {
            return Err(BrewError::validation(format!(
                "completion for frame {index} before load started"
            )));
        }
        let index = index.checked(self.frame_count)?;
        let frame = &mut self.frames[index.slot()];
        if !matches!(frame.slot, FrameSlot::Pending) {
            tracing::debug!(frame = index.0, "duplicate completion ignored");
            return Ok(None);
        }

        frame.slot = match outcome.and_then(|img| img.check().map(|()| img)) {
            Ok(img) => FrameSlot::Loaded(img),
            Err(err) => {
                tracing::error!(frame = index.0, error = %err, "failed to load {}", frame.path);
                FrameSlot::Failed
            }
        };
        let state = frame.state();

        self.loaded_count += 1;
        let became_ready = !self.ready && self.loaded_count == self.frames.len();
        if became_ready {
            self.ready = true;
            tracing::debug!(frames = self.loaded_count, "frame store ready");
        }

        Ok(Some(LoadEvent {
            index,
            state,
            loaded_count: self.loaded_count,
            became_ready,
        }))
    }

    /// Decode fetched bytes and record the outcome; decode failures take the failed path.
    pub fn complete_bytes(
        &mut self,
        index: FrameIndex,
        bytes: BrewResult<Vec<u8>>,
    ) -> BrewResult<Option<LoadEvent>> {
        let outcome = bytes.and_then(|b| assets_decode::decode_image(&b));
        self.complete(index, outcome)
    }

    /// Fetch one request from `source` and record it.
    pub fn fulfill(
        &mut self,
        request: &FrameRequest,
        source: &mut dyn FrameSource,
    ) -> BrewResult<Option<LoadEvent>> {
        let bytes = source.fetch(&request.path);
        self.complete_bytes(request.index, bytes)
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn naming(&self) -> &FrameNaming {
        &self.naming
    }

    pub fn is_loading_started(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn status(&self) -> LoadingStatus {
        LoadingStatus::new(self.loaded_count, self.frame_count as usize)
    }

    /// Frame at `index`, if loading has started and the index is in range.
    pub fn asset(&self, index: FrameIndex) -> Option<&FrameAsset> {
        if index.0 == 0 {
            return None;
        }
        self.frames.get(index.slot())
    }

    pub fn state(&self, index: FrameIndex) -> Option<FrameState> {
        self.asset(index).map(FrameAsset::state)
    }

    /// Drawable image at `index`; `None` while pending, after failure, or out of range.
    pub fn frame(&self, index: FrameIndex) -> Option<&PreparedImage> {
        self.asset(index).and_then(FrameAsset::image)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameAsset> {
        self.frames.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
