//! Tree command handler

use anyhow::Result;
use std::path::Path;

use code2prompt::cli::TreeArgs;
use code2prompt::discover;

use super::{apply_filters, load_config};

/// Print the relative paths an archive would contribute, one per line.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &TreeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_filters(&mut config, &args.filters);

    for path in list_files(&config, &args.archive)? {
        println!("{}", path);
    }
    Ok(())
}

/// Extract `archive`, discover its files and remove the staging area.
pub(crate) fn list_files(config: &code2prompt::Config, archive: &Path) -> Result<Vec<String>> {
    let job = config.job_for(archive);
    let staging = config.extractor().extract(job.archive())?;
    for name in staging.rejected_entries() {
        eprintln!("Skipped unsafe archive entry: {}", name);
    }

    let discovered = discover(staging.path(), job.ignore_names(), job.extensions());
    staging.close()?;
    Ok(discovered?.into_iter().map(|file| file.relative).collect())
}
