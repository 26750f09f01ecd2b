//! Command handlers for the c2p CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod generate;
pub mod tree;

use anyhow::Result;
use std::path::Path;

use code2prompt::cli::FilterArgs;
use code2prompt::Config;

/// Load the configuration from `--config` or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Apply discovery flags on top of the configured filters.
///
/// `--ignore` adds to the configured names, `--no-default-ignores` drops them
/// first, and `--ext` replaces the configured extension list.
pub fn apply_filters(config: &mut Config, filters: &FilterArgs) {
    if filters.no_default_ignores {
        config.discovery.ignore_dirs.clear();
    }
    for name in &filters.ignore {
        if !config.discovery.ignore_dirs.contains(name) {
            config.discovery.ignore_dirs.push(name.clone());
        }
    }
    if !filters.extensions.is_empty() {
        config.discovery.extensions = filters.extensions.clone();
    }
}
