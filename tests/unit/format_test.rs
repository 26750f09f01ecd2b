//! Unit tests for the named-format entry point

use code2prompt::{format_file_content, Error, FormattingOptions};

fn opts() -> FormattingOptions {
    FormattingOptions::default()
}

#[test]
fn every_canonical_name_renders() {
    for name in ["Plaintext", "Markdown", "XML", "JSON"] {
        let out = format_file_content("src/app.py", "print(1)", name, opts()).unwrap();
        assert!(out.contains("print(1)"), "{name} lost the content");
    }
}

#[test]
fn unsupported_name_is_a_format_error() {
    let err = format_file_content("src/app.py", "print(1)", "markdown", opts()).unwrap_err();
    assert!(matches!(err, Error::Format { .. }));
}

#[test]
fn blank_path_is_a_format_error() {
    let err = format_file_content("", "x", "Plaintext", opts()).unwrap_err();
    assert!(matches!(err, Error::Format { .. }));
}

#[test]
fn markdown_uses_language_fence() {
    let out = format_file_content("web/App.tsx", "export {}", "Markdown", opts()).unwrap();
    assert_eq!(out, "## File: web/App.tsx\n```typescript\nexport {}\n```\n");
}

#[test]
fn xml_without_language_has_no_attribute() {
    let out = format_file_content("Makefile", "all:", "XML", opts()).unwrap();
    assert!(out.starts_with("<file path=\"Makefile\">\n"));
}

#[test]
fn json_keeps_non_ascii_as_utf8() {
    let out = format_file_content("greet.py", "print('héllo')", "JSON", opts()).unwrap();
    assert!(out.contains("héllo"));
}
