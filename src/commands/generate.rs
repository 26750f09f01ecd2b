//! Generate command handler

use anyhow::{bail, Context, Result};
use humansize::{format_size, BINARY};
use std::fs;
use std::path::Path;

use code2prompt::cli::GenerateArgs;
use code2prompt::utils::InterruptGuard;
use code2prompt::{ArchiveJob, BatchResult, Config};

use super::{apply_filters, load_config};

/// Build a prompt from the given archives and write it out.
///
/// Log lines go to stderr. Fails when no archive produced any output.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &GenerateArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args);

    let guard = InterruptGuard::new();
    guard.register_signal_handlers();

    let pipeline = config.pipeline().with_cancel_flag(guard.flag());
    let jobs = build_jobs(&config, args);
    let result = if config.processing.parallel {
        pipeline.process_parallel(&jobs)
    } else {
        pipeline.process(&jobs)
    };

    for line in &result.logs {
        eprintln!("{}", line);
    }
    if args.tree {
        eprint!("{}", render_tree(&result));
    }
    if guard.is_interrupted() {
        bail!("Interrupted");
    }
    if result.is_empty() {
        bail!("No archive produced any output");
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &result.prompt)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            eprintln!(
                "Wrote {} ({} files) to {}",
                format_size(result.prompt.len() as u64, BINARY),
                result.file_tree.len(),
                path.display()
            );
        }
        None => println!("{}", result.prompt),
    }
    Ok(())
}

/// Layer command-line flags over the loaded configuration.
pub(crate) fn apply_overrides(config: &mut Config, args: &GenerateArgs) {
    apply_filters(config, &args.filters);
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.no_boundaries {
        config.output.include_boundaries = false;
    }
    if let Some(truncate) = args.truncate {
        config.output.truncate_length = truncate;
    }
    if args.metadata {
        config.output.include_metadata = true;
    }
    if args.parallel {
        config.processing.parallel = true;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }
}

pub(crate) fn build_jobs(config: &Config, args: &GenerateArgs) -> Vec<ArchiveJob> {
    args.archives
        .iter()
        .map(|archive| config.job_for(archive.clone()))
        .collect()
}

pub(crate) fn render_tree(result: &BatchResult) -> String {
    let mut out = format!("Included files ({}):\n", result.file_tree.len());
    for path in &result.file_tree {
        out.push_str("  ");
        out.push_str(path);
        out.push('\n');
    }
    out
}
