//! Destination filename resolution for downloaded Drive files.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static DISPOSITION_FILENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename\*?=(?:UTF-8'')?"?([^";]+)"?"#)
        .expect("Invalid Content-Disposition regex")
});

/// Pull the filename out of a `Content-Disposition` header value.
///
/// Accepts `filename="x"`, `filename=x` and `filename*=UTF-8''x`; the first
/// occurrence wins. Only the final path component is kept.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let raw = DISPOSITION_FILENAME_REGEX
        .captures(header)?
        .get(1)?
        .as_str()
        .trim();

    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)?;

    (!name.is_empty()).then_some(name)
}

/// Guess a file extension (with leading dot) from a `Content-Type` value.
///
/// Unknown types yield an empty string.
pub fn infer_extension(content_type: &str) -> &'static str {
    if content_type.starts_with("application/pdf") {
        ".pdf"
    } else if content_type.contains("wordprocessingml.document") || content_type.contains("msword") {
        ".docx"
    } else if content_type.contains("presentationml.presentation") {
        ".pptx"
    } else if content_type.contains("spreadsheet") {
        ".xlsx"
    } else {
        ""
    }
}

/// Resolve the name a Drive file is saved under.
///
/// Prefers the server-supplied name, falling back to `<fallback_base><ext>`.
pub fn resolve_filename(
    disposition: Option<&str>,
    content_type: Option<&str>,
    fallback_base: &str,
) -> String {
    if let Some(name) = disposition.and_then(filename_from_disposition) {
        return name;
    }

    let ext = infer_extension(content_type.unwrap_or_default());
    format!("{fallback_base}{ext}")
}
