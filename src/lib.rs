//! brewscroll turns scroll position into a frame-by-frame coffee pour.
//!
//! A tall element is tracked while a full-viewport surface stays pinned; as the element scrolls,
//! its normalized progress selects one of N pre-rendered frames, which is contain-fitted onto a
//! CPU canvas. Text overlays fade and slide in and out over their own progress windows.
//!
//! # Flow
//!
//! 1. **Load**: [`FrameStore::load`] issues one request per frame; completions (success or
//!    failure) are counted until the store is ready.
//! 2. **Track**: [`ScrollTracker`] converts element geometry into progress in `[0, 1]` and pushes
//!    it to its observers.
//! 3. **Schedule**: [`RenderScheduler`] coalesces bursts of progress updates into one pending
//!    render per refresh.
//! 4. **Render**: [`FrameRenderer`] resolves progress to a [`FrameIndex`] and draws it.
//!
//! [`ScrollSession`] wires these together for one mounted component; [`HeadlessHost`] drives a
//! session without a browser and backs the `brewscroll` CLI.
//!
//! Everything is single-threaded. Shared state uses `Rc` and `RefCell`, so sessions are `!Send`.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod host;
mod overlay;
mod render;
mod scroll;
mod session;

pub use assets::decode::decode_image;
pub use assets::source::{
    DirFrameSource, FrameNaming, FrameSource, MemoryFrameSource, normalize_site_path,
};
pub use assets::store::{
    DEFAULT_FRAME_COUNT, FrameAsset, FrameRequest, FrameState, FrameStore, LoadEvent, LoadHandle,
    LoadingStatus, PreparedImage,
};
pub use config::SessionConfig;
pub use foundation::core::{FrameIndex, Point, Rect, Size, Viewport};
pub use foundation::error::{BrewError, BrewResult};
pub use host::headless::{DEFAULT_TARGET_VIEWPORTS, HeadlessHost, LoadOrder};
pub use overlay::scheduler::OverlayScheduler;
pub use overlay::window::{
    Align, DEFAULT_FADE_MARGIN, DEFAULT_SLIDE_DISTANCE, OverlayState, OverlayWindow,
};
pub use render::canvas::{CanvasSurface, PremulRgba8};
pub use render::fit::{ContainFit, contain_fit};
pub use render::renderer::{FrameRenderer, RenderOutcome, SkipReason};
pub use render::schedule::RenderScheduler;
pub use scroll::tracker::{
    Intersection, ScrollGeometry, ScrollOffsets, ScrollTracker, Subscription,
};
pub use session::ScrollSession;
