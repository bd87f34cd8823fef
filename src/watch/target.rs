// src/watch/target.rs

//! Interpretation of the user's watch path.
//!
//! Accepted forms:
//!
//! ```text
//! ./              watch the current directory recursively
//! dir/            watch dir recursively
//! dir             (existing directory) watch dir, direct children only
//! dir/*.rs        watch dir, direct children matching *.rs
//! D:\Data\**      watch D:\Data recursively
//! notes.txt       watch notes.txt in the current directory
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};

use crate::errors::{Result, WhenChangedError};
use crate::fs::FileSystem;
use crate::watch::path_utils::{has_trailing_separator, relative_to};

/// Filter used when the path ends with a separator.
pub const RECURSIVE_FILTER: &str = "**";

/// A resolved directory to watch plus an optional file filter.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    root: PathBuf,
    filter: Option<String>,
    matcher: Option<GlobMatcher>,
    recursive: bool,
}

impl WatchTarget {
    /// Resolve `raw` against `cwd`.
    ///
    /// The directory that ends up being watched must exist.
    pub fn resolve(raw: &str, cwd: &Path, fs: &dyn FileSystem) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(WhenChangedError::InvalidWatchTarget(
                "watch path must not be empty".to_string(),
            ));
        }

        let absolute = if Path::new(raw).is_absolute() {
            PathBuf::from(raw)
        } else {
            cwd.join(raw)
        };
        // Drops `.` components and any trailing separator.
        let normalized: PathBuf = absolute.components().collect();

        if has_trailing_separator(raw) {
            return Self::build(fs, normalized, Some(RECURSIVE_FILTER), false);
        }

        if fs.is_dir(&normalized) {
            return Self::build(fs, normalized, None, false);
        }

        let (Some(parent), Some(name)) = (normalized.parent(), normalized.file_name()) else {
            return Err(WhenChangedError::InvalidWatchTarget(format!(
                "cannot determine a directory to watch from {raw:?}"
            )));
        };
        let filter = name.to_string_lossy().into_owned();
        // An existing file is watched by its exact name, glob characters and all.
        let literal = fs.exists(&normalized);
        Self::build(fs, parent.to_path_buf(), Some(&filter), literal)
    }

    fn build(
        fs: &dyn FileSystem,
        dir: PathBuf,
        filter: Option<&str>,
        literal: bool,
    ) -> Result<Self> {
        if !fs.is_dir(&dir) {
            return Err(WhenChangedError::InvalidWatchTarget(format!(
                "directory {} does not exist",
                dir.display()
            )));
        }

        let root = fs.canonicalize(&dir).unwrap_or(dir);
        let matcher = filter
            .map(|f| {
                let pattern = if literal { globset::escape(f) } else { f.to_string() };
                Glob::new(&pattern).map(|g| g.compile_matcher())
            })
            .transpose()?;

        Ok(Self {
            root,
            filter: filter.map(str::to_string),
            matcher,
            recursive: !literal && filter.is_some_and(|f| f.contains(RECURSIVE_FILTER)),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Whether a changed `path` falls under this target.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(rel) = relative_to(&self.root, path) else {
            return false;
        };
        if rel.is_empty() {
            return false;
        }
        if !self.recursive && rel.contains('/') {
            return false;
        }

        match &self.matcher {
            Some(matcher) => matcher.is_match(&rel),
            None => true,
        }
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filter {
            Some(filter) => write!(f, "{}", self.root.join(filter).display()),
            None => write!(f, "{}", self.root.display()),
        }
    }
}
