//! Filepath: src/core/pipeline.rs
//! End-to-end read: discover addons → resolve every addon in parallel →
//! sort by prefix → build the ordered mapping.
//!
//! Nothing here writes output or installs global state; warnings are
//! returned next to the mapping and the caller decides how to show them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::addon::{AddonFolder, FolderRecord, aggregate};
use crate::core::collate::compare_prefixes;
use crate::core::error::{ReadError, ScanWarning};
use crate::core::functions::{ExtractMode, ExtractedFunction, FunctionResolver};
use crate::infra::walk::DirWalker;

/// Directory and naming conventions of an addon tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Directory under the root holding one folder per addon
    pub addons_dir: String,
    /// Directory inside each addon holding its function files
    pub functions_dir: String,
    /// Case-insensitive glob selecting function files
    pub function_glob: String,
    /// Leading segment of every derived function name
    pub name_prefix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            addons_dir: "addons".to_string(),
            functions_dir: "functions".to_string(),
            function_glob: "fn*.sqf".to_string(),
            name_prefix: "ACE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Extract stripped header comments instead of full file contents
    pub only_comments: bool,
    pub layout: Layout,
}

/// Prefix → functions, iterating in prefix collation order.
pub type ResultMapping = IndexMap<String, Vec<ExtractedFunction>>;

#[derive(Debug, Default)]
pub struct Extraction {
    pub mapping: ResultMapping,
    /// Recovered header-comment failures, in mapping order.
    pub warnings: Vec<ScanWarning>,
}

impl Extraction {
    pub fn function_count(&self) -> usize {
        self.mapping.values().map(Vec::len).sum()
    }
}

/// Immediate subdirectories of `{root}/{addons_dir}`.
/// Zero addons is an error: there is nothing to document.
pub fn discover_addons(root: &Path, layout: &Layout) -> Result<Vec<AddonFolder>, ReadError> {
    let addons_root: PathBuf = root.join(&layout.addons_dir);

    let dirs = DirWalker::new()
        .subdirectories(&addons_root)
        .map_err(|source| ReadError::Discovery {
            path: addons_root.clone(),
            source,
        })?;

    if dirs.is_empty() {
        return Err(ReadError::NoAddonsFound { path: addons_root });
    }

    Ok(dirs.into_iter().map(AddonFolder::new).collect())
}

/// Read every addon under `root` into one ordered mapping.
#[instrument(skip(root, options), fields(root = %root.display(), only_comments = options.only_comments))]
pub fn read(root: &Path, options: &ReadOptions) -> Result<Extraction, ReadError> {
    let layout = &options.layout;
    let resolver = FunctionResolver::new(layout, ExtractMode::from_only_comments(options.only_comments))?;

    let folders = discover_addons(root, layout)?;
    info!(count = folders.len(), "found addon folders");

    let mut records: Vec<FolderRecord> = folders
        .par_iter()
        .map(|folder| aggregate(folder, &layout.functions_dir, &resolver))
        .collect::<Result<_, _>>()?;

    records.sort_by(|a, b| compare_prefixes(&a.prefix, &b.prefix));

    let mut extraction = Extraction::default();
    for record in records {
        extraction.warnings.extend(record.warnings);
        extraction.mapping.insert(record.prefix, record.functions);
    }

    info!(
        addons = extraction.mapping.len(),
        functions = extraction.function_count(),
        warnings = extraction.warnings.len(),
        "read complete"
    );
    Ok(extraction)
}
