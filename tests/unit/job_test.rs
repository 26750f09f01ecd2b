//! Unit tests for ArchiveJob construction

use std::path::Path;

use code2prompt::format::{FileMetadata, FormattingOptions};
use code2prompt::pipeline::normalize_extension;
use code2prompt::{ArchiveJob, Config, OutputFormat};

#[test]
fn job_from_default_config_matches_default_job() {
    let config = Config::default();
    assert_eq!(config.job_for("a.zip"), ArchiveJob::new("a.zip"));
}

#[test]
fn job_from_config_carries_every_setting() {
    let mut config = Config::default();
    config.discovery.ignore_dirs = vec!["vendor".to_string()];
    config.discovery.extensions = vec!["PY".to_string(), ".rs".to_string()];
    config.output.format = OutputFormat::Json;
    config.output.include_boundaries = false;
    config.output.truncate_length = 80;
    config.output.include_metadata = true;

    let job = config.job_for("p.zip");

    assert_eq!(job.archive(), Path::new("p.zip"));
    assert_eq!(job.ignore_names().iter().collect::<Vec<_>>(), vec!["vendor"]);
    assert_eq!(job.extensions().iter().collect::<Vec<_>>(), vec![".py", ".rs"]);
    assert_eq!(job.format(), OutputFormat::Json);
    assert!(!job.options().include_boundaries);
    assert_eq!(job.options().truncate_length, 80);
    assert!(job.include_metadata());
}

#[test]
fn duplicate_filters_collapse() {
    let job = ArchiveJob::new("a.zip")
        .with_ignore_names(["dist", "dist"])
        .with_extensions(["py", ".py", "PY"]);
    assert_eq!(job.ignore_names().len(), 1);
    assert_eq!(job.extensions().len(), 1);
}

#[test]
fn caller_metadata_is_replaced_per_file() {
    let job = ArchiveJob::new("a.zip").with_options(FormattingOptions {
        include_boundaries: true,
        truncate_length: 0,
        file_metadata: Some(FileMetadata { size: 123 }),
    });
    assert_eq!(job.options().file_metadata, None);
}

#[test]
fn normalize_extension_forms() {
    assert_eq!(normalize_extension("md").as_deref(), Some(".md"));
    assert_eq!(normalize_extension(".Md").as_deref(), Some(".md"));
    assert_eq!(normalize_extension("   ").as_deref(), None);
}
