//! Filepath: src/core/functions.rs
//! Per-folder function file resolution:
//! list → filter by glob → sort by name → extract in parallel → name.
//!
//! Extraction order is fixed by the byte-wise filename sort before fan-out;
//! the indexed parallel collect keeps that order regardless of which file
//! finishes first.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::error::{ReadError, ScanWarning};
use crate::core::header::scan_file;
use crate::core::pipeline::Layout;
use crate::infra::io::load_text;
use crate::infra::walk::list_file_names;

/// One extracted unit: a derived function name and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFunction {
    pub name: String,
    pub text: String,
}

/// What to pull out of each function file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Whole file contents; read failures abort the run.
    FullText,
    /// Stripped header comment; failures become warnings with empty text.
    HeaderComment,
}

impl ExtractMode {
    pub fn from_only_comments(only_comments: bool) -> Self {
        if only_comments {
            ExtractMode::HeaderComment
        } else {
            ExtractMode::FullText
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionFile {
    pub path: PathBuf,
    pub derived_name: String,
}

/// `{name_prefix}_{addon_prefix}_{file stem}`; only the extension is dropped.
pub fn derive_name(name_prefix: &str, addon_prefix: &str, file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| file_name.into());
    format!("{name_prefix}_{addon_prefix}_{stem}")
}

/// Functions of one folder plus the recovered per-file failures.
#[derive(Debug, Default)]
pub struct ResolvedFunctions {
    pub functions: Vec<ExtractedFunction>,
    pub warnings: Vec<ScanWarning>,
}

/// Resolves the function files of a `functions` directory.
#[derive(Debug)]
pub struct FunctionResolver {
    matcher: GlobMatcher,
    name_prefix: String,
    mode: ExtractMode,
}

impl FunctionResolver {
    pub fn new(layout: &Layout, mode: ExtractMode) -> Result<Self, ReadError> {
        let matcher = GlobBuilder::new(&layout.function_glob)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|source| ReadError::Pattern {
                pattern: layout.function_glob.clone(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            matcher,
            name_prefix: layout.name_prefix.clone(),
            mode,
        })
    }

    pub fn is_function_file(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    /// Matching files in `dir`, sorted by file name.
    /// A missing `dir` yields an empty list.
    pub fn function_files(
        &self,
        dir: &Path,
        addon_prefix: &str,
    ) -> Result<Vec<FunctionFile>, ReadError> {
        let names = list_file_names(dir).map_err(|source| ReadError::Listing {
            path: dir.to_path_buf(),
            source,
        })?;

        let Some(mut names) = names else {
            debug!(dir = %dir.display(), "no functions directory");
            return Ok(Vec::new());
        };

        names.retain(|n| self.is_function_file(n));
        names.sort();

        Ok(names
            .into_iter()
            .map(|n| FunctionFile {
                derived_name: derive_name(&self.name_prefix, addon_prefix, &n),
                path: dir.join(n),
            })
            .collect())
    }

    #[instrument(level = "debug", skip(self, dir), fields(dir = %dir.display()))]
    pub fn resolve(
        &self,
        dir: &Path,
        addon_prefix: &str,
    ) -> Result<ResolvedFunctions, ReadError> {
        let files = self.function_files(dir, addon_prefix)?;
        debug!(count = files.len(), "function files");

        let extracted: Vec<(ExtractedFunction, Option<ScanWarning>)> = files
            .into_par_iter()
            .map(|file| self.extract(file))
            .collect::<Result<_, _>>()?;

        let mut out = ResolvedFunctions::default();
        for (function, warning) in extracted {
            out.functions.push(function);
            out.warnings.extend(warning);
        }
        Ok(out)
    }

    fn extract(
        &self,
        file: FunctionFile,
    ) -> Result<(ExtractedFunction, Option<ScanWarning>), ReadError> {
        let FunctionFile { path, derived_name } = file;

        let (text, warning) = match self.mode {
            ExtractMode::FullText => {
                let text = load_text(&path).map_err(|source| ReadError::FileRead {
                    path: path.clone(),
                    source,
                })?;
                (text, None)
            }
            ExtractMode::HeaderComment => match scan_file(&path) {
                Ok(text) => (text, None),
                Err(reason) => {
                    // returned to the caller as a ScanWarning; only traced here
                    debug!(file = %path.display(), %reason, "header comment not extracted");
                    (String::new(), Some(ScanWarning { path, reason }))
                }
            },
        };

        Ok((
            ExtractedFunction {
                name: derived_name,
                text,
            },
            warning,
        ))
    }
}
