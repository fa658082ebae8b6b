use std::collections::HashMap;
use std::path::PathBuf;

use crate::foundation::error::{HitsujunError, HitsujunResult};

/// Byte source for per-character SVG assets.
///
/// Failures map to [`HitsujunError::Network`] (with a status when the source has one) or
/// [`HitsujunError::Configuration`] for unusable paths.
pub trait AssetSource {
    /// Fetch the raw bytes stored under `path` (relative, `/`-separated).
    fn fetch(&self, path: &str) -> HitsujunResult<Vec<u8>>;
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn fetch(&self, path: &str) -> HitsujunResult<Vec<u8>> {
        (**self).fetch(path)
    }
}

impl<S: AssetSource + ?Sized> AssetSource for Box<S> {
    fn fetch(&self, path: &str) -> HitsujunResult<Vec<u8>> {
        (**self).fetch(path)
    }
}

/// Canonical key for an SVG asset path, as stored under a source root.
///
/// Backslashes become `/` and empty or `.` segments drop out, so `kanji_svg\\065e5.svg` and
/// `./kanji_svg//065e5.svg` share one key. Keys never leave the root: absolute paths, drive or
/// scheme prefixes and `..` segments are configuration errors.
pub fn asset_key(path: &str) -> HitsujunResult<String> {
    let unified = path.trim().replace('\\', "/");
    if unified.starts_with('/') {
        return Err(HitsujunError::configuration(format!(
            "asset path '{path}' is absolute; expected a path under the asset root"
        )));
    }

    let segments: Vec<&str> = unified
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect();
    if let Some(bad) = segments.iter().find(|seg| **seg == ".." || seg.contains(':')) {
        return Err(HitsujunError::configuration(format!(
            "asset path '{path}' escapes the asset root at '{bad}'"
        )));
    }
    if segments.is_empty() {
        return Err(HitsujunError::configuration(format!(
            "asset path '{path}' names no file"
        )));
    }
    Ok(segments.join("/"))
}

/// Assets stored on the local filesystem under a root directory.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serve assets from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory assets are resolved against.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, path: &str) -> HitsujunResult<Vec<u8>> {
        let rel = asset_key(path)?;
        let full = self.root.join(&rel);
        std::fs::read(&full).map_err(|e| {
            let status = match e.kind() {
                std::io::ErrorKind::NotFound => Some(404),
                std::io::ErrorKind::PermissionDenied => Some(403),
                _ => None,
            };
            HitsujunError::network(status, format!("read '{}': {e}", full.display()))
        })
    }
}

/// In-process asset map; handy for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `path`, replacing earlier content.
    pub fn insert(&mut self, path: &str, bytes: impl Into<Vec<u8>>) -> HitsujunResult<()> {
        let rel = asset_key(path)?;
        self.files.insert(rel, bytes.into());
        Ok(())
    }

    /// Builder-style [`MemorySource::insert`].
    pub fn with(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> HitsujunResult<Self> {
        self.insert(path, bytes)?;
        Ok(self)
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, path: &str) -> HitsujunResult<Vec<u8>> {
        let rel = asset_key(path)?;
        self.files
            .get(&rel)
            .cloned()
            .ok_or_else(|| HitsujunError::network(Some(404), format!("no asset at '{rel}'")))
    }
}

/// Assets served over HTTP(S) from a base URL.
#[cfg(feature = "http")]
#[derive(Clone, Debug)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Serve assets from `base_url` (a trailing `/` is optional).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
impl AssetSource for HttpSource {
    fn fetch(&self, path: &str) -> HitsujunResult<Vec<u8>> {
        let rel = asset_key(path)?;
        let url = format!("{}/{rel}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| HitsujunError::network(None, format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HitsujunError::network(
                Some(status.as_u16()),
                format!("GET {url}: {status}"),
            ));
        }
        resp.bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HitsujunError::network(Some(status.as_u16()), format!("read body of {url}: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
