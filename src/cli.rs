//! CLI definitions for c2p
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::format::OutputFormat;

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Version string, with the git commit appended for dev builds.
pub fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "unknown" => format!("{} ({})", env!("CARGO_PKG_VERSION"), sha),
        _ => env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Parser)]
#[command(name = "c2p")]
#[command(about = "[ code2prompt ] - turn zipped source code into a single LLM prompt")]
#[command(
    long_about = "code2prompt (c2p) - Turn ZIP archives of source code into one prompt document.

Each archive is extracted into a private staging directory, its files are
discovered (skipping dependency and build directories), rendered in the
chosen format and concatenated. The prompt is written to stdout; skipped
files and failed archives are reported on stderr.

QUICK START:
    c2p generate project.zip                 Plaintext prompt on stdout
    c2p generate project.zip --format XML    XML prompt
    c2p generate a.zip b.zip -o prompt.md    Several archives into one file
    c2p tree project.zip                     Preview which files are included

CONFIGURATION:
    c2p config init                          Write ~/.config/code2prompt/config.toml
    c2p config show                          Print the effective configuration"
)]
#[command(version = version())]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this configuration file instead of ~/.config/code2prompt/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a prompt from one or more archives
    #[command(long_about = "Build a prompt document from one or more ZIP archives.

Archives are processed in the order given. An archive that cannot be opened
or extracted is reported and skipped; the others still contribute. Files
that are not valid UTF-8 text are skipped and reported.

Command-line flags override the configuration file.

EXAMPLES:
    c2p generate project.zip
    c2p generate project.zip --format Markdown --ext py --ext ts
    c2p generate project.zip --ignore fixtures --truncate 2000
    c2p generate a.zip b.zip --parallel --output prompt.txt
    c2p generate project.zip --format JSON --metadata --tree")]
    Generate(GenerateArgs),

    /// List the files an archive would contribute
    #[command(long_about = "Extract an archive and print the relative paths that would be
included in the prompt, one per line, using the configured filters.

EXAMPLES:
    c2p tree project.zip
    c2p tree project.zip --ext py")]
    Tree(TreeArgs),

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and create the c2p configuration file.

Configuration is stored in ~/.config/code2prompt/config.toml unless --config
points elsewhere. Missing files and missing fields fall back to defaults.

EXAMPLES:
    c2p config show          Display the effective configuration
    c2p config init          Write a default configuration file
    c2p config path          Print the configuration file location"
    )]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Print a shell completion script to stdout.

EXAMPLES:
    c2p completions bash > ~/.local/share/bash-completion/completions/c2p
    c2p completions zsh > ~/.zfunc/_c2p")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Discovery filters shared by `generate` and `tree`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Directory name to exclude at any depth (repeatable, adds to the configured list)
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Do not apply the configured ignore list
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Only include files with this extension (repeatable, e.g. py or .py)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// ZIP archives to process, in order
    #[arg(required = true, value_name = "ARCHIVE")]
    pub archives: Vec<PathBuf>,

    /// Output encoding
    #[arg(long, short, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Omit header/footer markers around each file
    #[arg(long)]
    pub no_boundaries: bool,

    /// Truncate each file to N characters (0 disables)
    #[arg(long, value_name = "N")]
    pub truncate: Option<usize>,

    /// Annotate each file with its size
    #[arg(long)]
    pub metadata: bool,

    /// Write the prompt to FILE instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the list of included files to stderr
    #[arg(long)]
    pub tree: bool,

    /// Process archives concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Disable the in-memory result cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// ZIP archive to inspect
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

EXAMPLE:
    c2p config show")]
    Show,
    /// Write a default configuration file
    #[command(long_about = "Write the default configuration to the config file location.

Refuses to overwrite an existing file unless --force is given.

EXAMPLE:
    c2p config init
    c2p config init --force")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}
