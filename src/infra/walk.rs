//! Filepath: src/infra/walk.rs
//! Directory primitives for addon discovery.
//! - One-level subdirectory walk (no recursion, no ignore files)
//! - Flat directory listing that reports "not found" as `None`
//! - Deterministic (name-sorted) output for stable tests/CI
//!
//! The walk is backed by ripgrep's `ignore` crate with all of its
//! filters turned off, so hidden and gitignored addons are still seen.

use std::{
    io,
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;

/// Walker yielding the immediate subdirectories of a root.
pub struct DirWalker
{
    /// Follow symbolic links; default true (symlinked addons count)
    follow_symlinks: bool,
}

impl Default for DirWalker
{
    fn default() -> Self
    {
        Self { follow_symlinks: true }
    }
}

impl DirWalker
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// (Optional) Follow or skip symbolic links.
    pub fn with_follow_symlinks(
        mut self,
        follow: bool,
    ) -> Self
    {
        self.follow_symlinks = follow;
        self
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // Plain directory semantics: no hidden/gitignore/.ignore filtering
        b.standard_filters(false);
        b.follow_links(self.follow_symlinks);

        // Depth 0 is the root itself, depth 1 its children
        b.max_depth(Some(1));
        b.sort_by_file_name(|a, b| a.cmp(b));

        b
    }

    /// List the immediate subdirectories of `root`, sorted by name.
    /// Any walk error (including a missing root) aborts the listing.
    pub fn subdirectories<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Result<Vec<PathBuf>, ignore::Error>
    {
        let root_path = root.as_ref();
        let mut out = Vec::new();

        for entry in self
            .build_walk(root_path)
            .build()
        {
            let entry = entry?;

            if entry.depth() == 0
            {
                continue;
            }

            let is_dir = entry
                .file_type()
                .is_some_and(|ft| ft.is_dir());

            if is_dir
            {
                out.push(entry.into_path());
            }
        }

        Ok(out)
    }
}

/// Names of the non-directory entries in `dir`, in listing order.
/// Returns `Ok(None)` when `dir` does not exist.
pub fn list_file_names(dir: &Path) -> io::Result<Option<Vec<String>>>
{
    let entries = match std::fs::read_dir(dir)
    {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut names = Vec::new();

    for entry in entries
    {
        let entry = entry?;

        // Resolve symlinks so a linked file still counts as a file
        let is_dir = std::fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);

        if is_dir
        {
            continue;
        }

        names.push(
            entry
                .file_name()
                .to_string_lossy()
                .into_owned(),
        );
    }

    Ok(Some(names))
}
