//! Rendering of a single file into one of the four prompt encodings.
//!
//! Every encoding has its own rendering function; [`render`] dispatches on
//! the closed [`OutputFormat`] enum. The exact text layout of each encoding
//! is what downstream consumers parse, so the templates below must not drift.

mod language;

pub use language::language_for;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Output encoding of the prompt document.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum OutputFormat {
    #[default]
    #[value(name = "Plaintext")]
    Plaintext,
    #[value(name = "Markdown")]
    Markdown,
    #[serde(rename = "XML")]
    #[value(name = "XML")]
    Xml,
    #[serde(rename = "JSON")]
    #[value(name = "JSON")]
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Plaintext,
        OutputFormat::Markdown,
        OutputFormat::Xml,
        OutputFormat::Json,
    ];

    /// Canonical, case-sensitive name.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Plaintext => "Plaintext",
            OutputFormat::Markdown => "Markdown",
            OutputFormat::Xml => "XML",
            OutputFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A format name that is not one of `Plaintext`, `Markdown`, `XML`, `JSON`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported format '{0}'. Choose from: Plaintext, Markdown, XML, JSON")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// File facts that can be appended to boundary headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FileMetadata {
    /// Size on disk in bytes.
    pub size: u64,
}

/// Per-file rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormattingOptions {
    /// Wrap content in header/footer markers. Ignored by JSON.
    pub include_boundaries: bool,
    /// Maximum content length in characters; `0` disables truncation.
    pub truncate_length: usize,
    pub file_metadata: Option<FileMetadata>,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            include_boundaries: true,
            truncate_length: 0,
            file_metadata: None,
        }
    }
}

/// Format by name, as received from a front-end.
///
/// The name must match exactly (`Plaintext`, `Markdown`, `XML`, `JSON`).
pub fn format_file_content(
    relative_path: &str,
    content: &str,
    format_name: &str,
    options: FormattingOptions,
) -> Result<String> {
    let format =
        OutputFormat::from_str(format_name).map_err(|e| Error::format(relative_path, e))?;
    render(relative_path, content, format, &options)
}

/// Render one file in the given format.
pub fn render(
    relative_path: &str,
    content: &str,
    format: OutputFormat,
    options: &FormattingOptions,
) -> Result<String> {
    if relative_path.trim().is_empty() {
        return Err(Error::format(
            relative_path,
            "File path must be a non-empty string",
        ));
    }

    let content = truncate(content, options.truncate_length);
    let metadata = options
        .file_metadata
        .map(|m| format!(" [Size: {} bytes]", m.size))
        .unwrap_or_default();
    let language = language_for(relative_path);
    let boundaries = options.include_boundaries;

    let rendered = match format {
        OutputFormat::Plaintext => plaintext(relative_path, &content, &metadata, boundaries),
        OutputFormat::Markdown => {
            markdown(relative_path, &content, language, &metadata, boundaries)
        }
        OutputFormat::Xml => xml(relative_path, &content, language, &metadata, boundaries),
        OutputFormat::Json => json(relative_path, &content, language, options.file_metadata)?,
    };
    Ok(rendered)
}

/// Cut `content` to `limit` characters and append `...`.
///
/// Content whose length equals the limit is returned unchanged.
pub fn truncate(content: &str, limit: usize) -> Cow<'_, str> {
    if limit == 0 {
        return Cow::Borrowed(content);
    }
    match content.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &content[..cut])),
        None => Cow::Borrowed(content),
    }
}

fn plaintext(path: &str, content: &str, metadata: &str, boundaries: bool) -> String {
    if !boundaries {
        return content.to_string();
    }
    format!("=== File: {path}{metadata} ===\n{content}\n=== End of File: {path} ===\n")
}

fn markdown(
    path: &str,
    content: &str,
    language: Option<&str>,
    metadata: &str,
    boundaries: bool,
) -> String {
    let fence = format!("```{}", language.unwrap_or_default());
    let block = format!("{fence}\n{content}\n```\n");
    if !boundaries {
        return block;
    }
    format!("## File: {path}{metadata}\n{block}")
}

fn xml(
    path: &str,
    content: &str,
    language: Option<&str>,
    metadata: &str,
    boundaries: bool,
) -> String {
    let cdata = escape_cdata(content);
    if !boundaries {
        return format!("<content><![CDATA[{cdata}]]></content>\n");
    }
    let lang_attr = language
        .map(|l| format!(" language=\"{l}\""))
        .unwrap_or_default();
    format!(
        "<file path=\"{path}\"{lang_attr}{metadata}>\n  <content><![CDATA[{cdata}]]></content>\n</file>\n"
    )
}

/// Split every `]]>` across two CDATA sections so the section stays closed
/// only where we close it.
fn escape_cdata(content: &str) -> Cow<'_, str> {
    if content.contains("]]>") {
        Cow::Owned(content.replace("]]>", "]]]]><![CDATA[>"))
    } else {
        Cow::Borrowed(content)
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<FileMetadata>,
}

fn json(
    path: &str,
    content: &str,
    language: Option<&str>,
    metadata: Option<FileMetadata>,
) -> Result<String> {
    let file = JsonFile {
        path,
        content,
        language,
        metadata,
    };
    serde_json::to_string_pretty(&file).map_err(|e| Error::format(path, e))
}
