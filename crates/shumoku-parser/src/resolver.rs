//! File access for multi-file topologies.
//!
//! The [`FileResolver`] trait is the only I/O seam of the parser. Paths are
//! plain `/`-separated strings in the resolver's own address space; a leading
//! `/` is absolute within that space, anything else is relative.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use indexmap::IndexMap;
use log::trace;

/// Reads documents and resolves include paths.
#[async_trait]
pub trait FileResolver: Send + Sync {
    /// Reads the document at an already resolved `path`.
    async fn read(&self, path: &str) -> io::Result<String>;

    /// Resolves `relative` against the directory of the document at `base`.
    fn resolve(&self, base: &str, relative: &str) -> String {
        resolve_path(base, relative)
    }
}

/// Lexically resolves `relative` against the directory containing `base`.
///
/// `./x` and `x` land next to `base`, `..` climbs one directory and a leading
/// `/` makes `relative` absolute. A `base` ending in `/` is itself a directory.
///
/// ```
/// # use shumoku_parser::resolver::resolve_path;
/// assert_eq!(resolve_path("sites/root.yaml", "./dc1.yaml"), "sites/dc1.yaml");
/// assert_eq!(resolve_path("sites/root.yaml", "dc1.yaml"), "sites/dc1.yaml");
/// assert_eq!(resolve_path("/a/b/root.yaml", "../c.yaml"), "/a/c.yaml");
/// assert_eq!(resolve_path("/a/b/root.yaml", "/x.yaml"), "/x.yaml");
/// assert_eq!(resolve_path("sites/", "dc1.yaml"), "sites/dc1.yaml");
/// ```
pub fn resolve_path(base: &str, relative: &str) -> String {
    let absolute = relative.starts_with('/') || base.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    if !relative.starts_with('/') {
        let mut base_segments: Vec<&str> = base.split('/').collect();
        // Drop the file name (or the empty segment after a trailing slash).
        base_segments.pop();
        push_segments(&mut segments, base_segments, absolute);
    }
    push_segments(&mut segments, relative.split('/'), absolute);

    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

/// Normalizes a single path: same as resolving it against an empty base.
pub fn normalize_path(path: &str) -> String {
    resolve_path("", path)
}

fn push_segments<'a>(
    segments: &mut Vec<&'a str>,
    parts: impl IntoIterator<Item = &'a str>,
    absolute: bool,
) {
    for part in parts {
        match part {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // Relative paths keep climbing above their start; `/..` is `/`.
                _ if !absolute => segments.push(".."),
                _ => {}
            },
            name => segments.push(name),
        }
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FsFileResolver {
    root: Option<PathBuf>,
}

impl FsFileResolver {
    /// Resolver without a root: absolute paths are real filesystem paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver where a leading `/` is mapped under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn fs_path(&self, path: &str) -> PathBuf {
        match (&self.root, path.strip_prefix('/')) {
            (Some(root), Some(inner)) => root.join(inner),
            (Some(root), None) => root.join(path),
            (None, _) => Path::new(path).to_path_buf(),
        }
    }
}

#[async_trait]
impl FileResolver for FsFileResolver {
    async fn read(&self, path: &str) -> io::Result<String> {
        let fs_path = self.fs_path(path);
        trace!(path, fs_path:? = fs_path; "Reading file");
        tokio::fs::read_to_string(&fs_path).await
    }
}

/// Serves documents from an in-memory map. Used by tests and embedders.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileResolver {
    files: IndexMap<String, String>,
}

impl MemoryFileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a virtual file.
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.files.insert(normalize_path(path), content.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }
}

#[async_trait]
impl FileResolver for MemoryFileResolver {
    async fn read(&self, path: &str) -> io::Result<String> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
            })
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn path_strategy() -> impl Strategy<Value = String> {
        (
            any::<bool>(),
            prop::collection::vec(prop::sample::select(vec!["a", "b", "dc1.yaml", ".", "..", ""]), 0..8),
        )
            .prop_map(|(absolute, parts)| {
                let joined = parts.join("/");
                if absolute { format!("/{joined}") } else { joined }
            })
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(path in path_strategy()) {
            let once = normalize_path(&path);
            prop_assert_eq!(normalize_path(&once), once);
        }

        #[test]
        fn prop_resolved_paths_have_no_dot_segments(
            base in path_strategy(),
            relative in path_strategy(),
        ) {
            let resolved = resolve_path(&base, &relative);
            let body = resolved.strip_prefix('/').unwrap_or(&resolved);
            if !body.is_empty() {
                prop_assert!(body.split('/').all(|part| !part.is_empty() && part != "."));
            }
        }
    }
}
