//! `acedoc read`: run the pipeline and write the mapping as JSON.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::Write;
use tracing::warn;

use crate::cli::{AppContext, ReadArgs};
use crate::core::pipeline::{Extraction, ReadOptions, discover_addons, read};
use crate::infra::config::{Config, load_config};

pub fn run(args: ReadArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_else(|e| {
        warn!("ignoring configuration: {e:#}");
        Config::default()
    });

    // CLI flags win over config values
    let options = ReadOptions {
        only_comments: !args.full_text && (args.only_comments || config.read.only_comments),
        layout: config.layout,
    };
    let output = args.output.or(config.read.output_file);
    let pretty = config.read.pretty && !args.compact;
    let threads = args.threads.or(config.threads);

    if ctx.dry_run {
        let folders = discover_addons(&args.root, &options.layout)
            .with_context(|| format!("Failed to discover addons under {}", args.root.display()))?;
        if !ctx.quiet {
            println!("{}", paint_yellow("DRY RUN: Would read:", ctx));
            for folder in &folders {
                println!("  {} ({})", folder.prefix, folder.path.display());
            }
            println!(
                "  mode: {}",
                if options.only_comments { "header comments" } else { "full text" }
            );
        }
        return Ok(());
    }

    let result = match threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .context("Failed to build worker pool")?
            .install(|| read(&args.root, &options)),
        None => read(&args.root, &options),
    };
    let extraction =
        result.with_context(|| format!("Failed to read addons under {}", args.root.display()))?;

    if !ctx.quiet {
        for warning in &extraction.warnings {
            eprintln!("{}", paint_yellow(&format!("WARNING: {warning}"), ctx));
        }
    }

    let json = render_json(&extraction, pretty)?;

    match &output {
        Some(path) => std::fs::write(path, &json)
            .with_context(|| format!("Failed to write to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")?;
        }
    }

    if !ctx.quiet {
        let summary = format!(
            "✓ Read {} functions from {} addons ({} warnings)",
            extraction.function_count(),
            extraction.mapping.len(),
            extraction.warnings.len()
        );
        if ctx.no_color {
            eprintln!("{summary}");
        } else {
            eprintln!("{}", summary.green());
        }
    }

    Ok(())
}

pub fn render_json(extraction: &Extraction, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(&extraction.mapping)
    } else {
        serde_json::to_string(&extraction.mapping)
    };
    json.context("Failed to serialize result mapping")
}

fn paint_yellow(s: &str, ctx: &AppContext) -> String {
    if ctx.no_color {
        s.to_string()
    } else {
        s.yellow().to_string()
    }
}
