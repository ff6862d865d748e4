use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::pipeline::Layout;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Worker threads for extraction (rayon default when unset)
    pub threads: Option<usize>,

    /// Where addons and their function files live
    pub layout: Layout,

    /// Default read settings
    pub read: ReadConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadConfig
{
    pub only_comments: bool,
    pub pretty: bool,
    pub output_file: Option<PathBuf>,
}

impl Default for ReadConfig
{
    fn default() -> Self
    {
        Self { only_comments: false, pretty: true, output_file: None }
    }
}

const CONFIG_PATHS: [&str; 4] = ["acedoc.toml", "acedoc.yaml", "acedoc.json", ".acedoc.toml"];

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Load configuration relative to `dir`: the first config file found,
/// then `ACEDOC__*` environment overrides.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_PATHS
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    // e.g. ACEDOC__LAYOUT__NAME_PREFIX=ACEX
    builder = builder.add_source(
        config::Environment::with_prefix("ACEDOC")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("acedoc.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("DRY RUN: Would write {}:\n{}", config_path.display(), toml_string);
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
