//! Shared test utilities for integration tests
//!
//! Builds addon trees of the form `addons/{prefix}/functions/{file}`.

#![allow(dead_code)]

use assert_fs::prelude::*;

/// A well-formed two-line header comment.
pub const GOOD_HEADER: &str = "/*\r\n * Line one.\r\n * Line two.\r\n */\r\nparams [\"_unit\"];\r\n";

/// Create an empty mod root
pub fn mod_root() -> assert_fs::TempDir
{
    assert_fs::TempDir::new().expect("tempdir")
}

/// Create `addons/{prefix}` without a functions directory
pub fn add_addon(
    root: &assert_fs::TempDir,
    prefix: &str,
)
{
    root.child(format!("addons/{prefix}"))
        .create_dir_all()
        .expect("create addon");
}

/// Write `addons/{prefix}/functions/{file}`
pub fn add_function(
    root: &assert_fs::TempDir,
    prefix: &str,
    file: &str,
    contents: &str,
)
{
    root.child(format!("addons/{prefix}/functions/{file}"))
        .write_str(contents)
        .expect("write function");
}

/// Root with addons `zeus` and `medical`, each holding `fnDoStuff.sqf`
pub fn two_addon_fixture() -> assert_fs::TempDir
{
    let root = mod_root();
    for prefix in ["zeus", "medical"]
    {
        add_function(&root, prefix, "fnDoStuff.sqf", GOOD_HEADER);
    }
    root
}
