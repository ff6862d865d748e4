//! Addon folder aggregation: one folder in, one record out.

use std::path::PathBuf;

use tracing::debug;

use crate::core::error::{ReadError, ScanWarning};
use crate::core::functions::{ExtractedFunction, FunctionResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonFolder {
    pub path: PathBuf,
    /// Last path segment; the mapping key and part of every function name.
    pub prefix: String,
}

impl AddonFolder {
    pub fn new(path: PathBuf) -> Self {
        let prefix = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, prefix }
    }

    pub fn functions_dir(&self, functions_dir: &str) -> PathBuf {
        self.path.join(functions_dir)
    }
}

#[derive(Debug)]
pub struct FolderRecord {
    pub prefix: String,
    pub functions: Vec<ExtractedFunction>,
    pub warnings: Vec<ScanWarning>,
}

/// Resolve the functions of `folder`. Failures propagate unchanged.
pub fn aggregate(
    folder: &AddonFolder,
    functions_dir: &str,
    resolver: &FunctionResolver,
) -> Result<FolderRecord, ReadError> {
    let dir = folder.functions_dir(functions_dir);
    let resolved = resolver.resolve(&dir, &folder.prefix)?;

    debug!(
        prefix = %folder.prefix,
        functions = resolved.functions.len(),
        warnings = resolved.warnings.len(),
        "addon resolved"
    );

    Ok(FolderRecord {
        prefix: folder.prefix.clone(),
        functions: resolved.functions,
        warnings: resolved.warnings,
    })
}
