//! **acedoc** - Collects addon function files for documentation generators
//!
//! Scans `{root}/addons/*/functions/fn*.sqf`, extracting either full file text
//! or the leading header comment, and returns a prefix-ordered mapping.
//! Folders and files are processed in parallel; output order never depends
//! on completion order.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Extraction pipeline
pub mod core {
    /// Leading block-comment state machine
    pub mod header;
    pub use header::{HeaderError, HeaderScanner, ScanState, scan_file, scan_lines};

    /// Function file listing, filtering, naming and extraction
    pub mod functions;
    pub use functions::{ExtractMode, ExtractedFunction, FunctionResolver};

    /// Per-addon aggregation
    pub mod addon;
    pub use addon::{AddonFolder, FolderRecord};

    /// Discovery, parallel fan-out and ordered merge
    pub mod pipeline;
    pub use pipeline::{Extraction, Layout, ReadOptions, ResultMapping, read};

    /// Prefix ordering for the result mapping
    pub mod collate;
    pub use collate::compare_prefixes;

    /// Pipeline error taxonomy
    pub mod error;
    pub use error::{ReadError, ScanWarning};

    /// `read` command: JSON export of the mapping
    pub mod export;
    pub use export::run as read_run;
}

/// Infrastructure - Configuration, I/O, and directory primitives
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Whole-file loading and blank-skipping line reader
    pub mod io;
    pub use io::{NonBlankLines, load_text};

    /// One-level directory walking and listing
    pub mod walk;
    pub use walk::DirWalker;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use self::core::{
    ExtractedFunction, Extraction, HeaderError, Layout, ReadError, ReadOptions, ResultMapping,
    ScanWarning, read, read_run,
};
pub use infra::{Config, load_config};
