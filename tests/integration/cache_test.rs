//! Integration tests for result caching in the pipeline

use std::fs;
use tempfile::TempDir;

use code2prompt::{BatchPipeline, Extractor, OutputFormat, ResultCache};

use super::helpers::{node_modules_job, project_zip, write_corrupt_zip};

fn cached_pipeline(staging: &std::path::Path, capacity: usize) -> BatchPipeline {
    BatchPipeline::new()
        .with_extractor(Extractor::new().with_staging_parent(staging))
        .with_cache(ResultCache::new(capacity))
}

#[test]
fn cache_hit_skips_extraction() {
    let temp = TempDir::new().unwrap();
    let staging = temp.path().join("staging");
    fs::create_dir(&staging).unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    let pipeline = cached_pipeline(&staging, 4);
    let job = node_modules_job(&archive);

    let first = pipeline.process_archive(&job).unwrap();
    // Any further extraction would now fail to create its staging directory
    fs::remove_dir(&staging).unwrap();
    let second = pipeline.process_archive(&job).unwrap();

    assert_eq!(first, second);
    assert_eq!(pipeline.cache().unwrap().len(), 1);
}

#[test]
fn identical_bytes_under_another_name_hit_the_cache() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    let copy = temp.path().join("copy.zip");
    fs::copy(&archive, &copy).unwrap();
    let pipeline = BatchPipeline::new().with_cache(ResultCache::new(4));

    let first = pipeline.process_archive(&node_modules_job(&archive)).unwrap();
    let second = pipeline.process_archive(&node_modules_job(&copy)).unwrap();

    assert_eq!(first, second);
    assert_eq!(pipeline.cache().unwrap().len(), 1);
}

#[test]
fn different_options_are_cached_separately() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    let pipeline = BatchPipeline::new().with_cache(ResultCache::new(4));

    let plain = pipeline.process_archive(&node_modules_job(&archive)).unwrap();
    let json = pipeline
        .process_archive(&node_modules_job(&archive).with_format(OutputFormat::Json))
        .unwrap();

    assert_ne!(plain.prompt, json.prompt);
    assert_eq!(pipeline.cache().unwrap().len(), 2);
}

#[test]
fn failures_are_not_cached() {
    let temp = TempDir::new().unwrap();
    let bad = write_corrupt_zip(temp.path(), "bad.zip");
    let pipeline = BatchPipeline::new().with_cache(ResultCache::new(4));

    assert!(pipeline.process_archive(&node_modules_job(&bad)).is_err());
    assert!(pipeline.process_archive(&node_modules_job(&bad)).is_err());
    assert!(pipeline.cache().unwrap().is_empty());
}

#[test]
fn cached_and_uncached_batches_agree() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    let jobs = [node_modules_job(&archive), node_modules_job(&archive)];

    let cached = BatchPipeline::new()
        .with_cache(ResultCache::new(1))
        .process(&jobs);
    let uncached = BatchPipeline::new().process(&jobs);

    assert_eq!(cached, uncached);
}
