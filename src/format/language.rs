//! Extension to language-tag mapping used by Markdown fences, XML attributes
//! and the JSON `language` field.

use std::path::Path;

use crate::discovery::extension_of;

/// Language label for a file path, or `None` for unknown extensions.
pub fn language_for(path: &str) -> Option<&'static str> {
    let ext = extension_of(Path::new(path))?;
    let language = match ext.as_str() {
        ".py" => "python",
        ".js" | ".jsx" => "javascript",
        ".ts" | ".tsx" => "typescript",
        ".java" => "java",
        ".html" => "html",
        ".css" => "css",
        ".json" => "json",
        ".xml" => "xml",
        ".md" => "markdown",
        ".yml" | ".yaml" => "yaml",
        ".rb" => "ruby",
        ".php" => "php",
        _ => return None,
    };
    Some(language)
}
