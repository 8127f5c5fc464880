use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{BrewError, BrewResult},
};

/// Path template for frame assets: `{dir}/{stem}{index:0digits}.{ext}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameNaming {
    /// Site-absolute directory the frames are served from.
    pub dir: String,
    /// File name prefix before the zero-padded index.
    pub stem: String,
    /// Zero-padding width of the index.
    pub digits: usize,
    /// File extension without the dot.
    pub ext: String,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            dir: "/frames".to_string(),
            stem: "coffee_frame_".to_string(),
            digits: 3,
            ext: "jpg".to_string(),
        }
    }
}

impl FrameNaming {
    /// Resolve the served path of a frame, e.g. index 7 -> `/frames/coffee_frame_007.jpg`.
    pub fn path_for(&self, index: FrameIndex) -> String {
        format!(
            "{}/{}{:0width$}.{}",
            self.dir.trim_end_matches('/'),
            self.stem,
            index.0,
            self.ext,
            width = self.digits
        )
    }

    pub fn validate(&self) -> BrewResult<()> {
        if self.digits == 0 {
            return Err(BrewError::validation("frame naming digits must be > 0"));
        }
        if self.stem.is_empty() && self.ext.is_empty() {
            return Err(BrewError::validation(
                "frame naming needs a stem or an extension",
            ));
        }
        Ok(())
    }
}

/// Something that can fetch the encoded bytes behind a served frame path.
pub trait FrameSource {
    fn fetch(&mut self, path: &str) -> BrewResult<Vec<u8>>;
}

/// Serves frame paths from a directory standing in for the site root.
#[derive(Clone, Debug)]
pub struct DirFrameSource {
    root: PathBuf,
}

impl DirFrameSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for DirFrameSource {
    fn fetch(&mut self, path: &str) -> BrewResult<Vec<u8>> {
        let rel = normalize_site_path(path)?;
        let full = self.root.join(Path::new(&rel));
        std::fs::read(&full)
            .with_context(|| format!("read frame bytes from '{}'", full.display()))
            .map_err(BrewError::from)
    }
}

/// In-memory frame source keyed by served path.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrameSource {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for MemoryFrameSource {
    fn fetch(&mut self, path: &str) -> BrewResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| BrewError::asset(format!("no frame served at '{path}'")))
    }
}

/// Turn a served path (`/frames/x.jpg`, `frames\x.jpg`) into a root-relative one.
///
/// Rejects empty paths and any `..` segment.
pub fn normalize_site_path(path: &str) -> BrewResult<String> {
    let s = path.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BrewError::validation("frame paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BrewError::validation("frame path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
