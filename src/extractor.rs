//! Extraction of Google Drive and Docs identifiers from page markup.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `/file/d/<ID>` links (viewer and preview URLs).
static FILE_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/file/d/([A-Za-z0-9_-]+)").expect("Invalid file path regex")
});

/// Legacy `open?id=<ID>` links.
static OPEN_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"open\?id=([A-Za-z0-9_-]+)").expect("Invalid open id regex")
});

static DOCUMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/document/d/([A-Za-z0-9_-]+)").expect("Invalid document regex")
});

static FOLDER_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://drive\.google\.com/drive/folders/[A-Za-z0-9_-]+")
        .expect("Invalid folder URL regex")
});

/// Identifiers referenced by one piece of markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedIds {
    pub file_ids: BTreeSet<String>,
    pub doc_ids: BTreeSet<String>,
    pub folder_urls: BTreeSet<String>,
}

impl ExtractedIds {
    /// Union another extraction into this one.
    pub fn merge(&mut self, other: ExtractedIds) {
        self.file_ids.extend(other.file_ids);
        self.doc_ids.extend(other.doc_ids);
        self.folder_urls.extend(other.folder_urls);
    }

    pub fn is_empty(&self) -> bool {
        self.file_ids.is_empty() && self.doc_ids.is_empty() && self.folder_urls.is_empty()
    }
}

/// Scan markup for Drive file IDs, Doc IDs and Drive folder URLs.
///
/// Every rule is applied independently, so one link can never hide another.
/// Duplicates collapse into a single entry.
///
/// # Examples
///
/// ```
/// use sites_drive::extractor::extract_ids;
///
/// let ids = extract_ids(r#"<a href="https://drive.google.com/file/d/1abc/view">x</a>"#);
/// assert!(ids.file_ids.contains("1abc"));
/// assert!(ids.doc_ids.is_empty());
/// ```
pub fn extract_ids(markup: &str) -> ExtractedIds {
    let mut file_ids = capture_all(&FILE_PATH_REGEX, markup);
    file_ids.extend(capture_all(&OPEN_ID_REGEX, markup));

    let folder_urls = FOLDER_URL_REGEX
        .find_iter(markup)
        .map(|m| m.as_str().to_string())
        .collect();

    ExtractedIds {
        file_ids,
        doc_ids: capture_all(&DOCUMENT_REGEX, markup),
        folder_urls,
    }
}

fn capture_all(regex: &Regex, markup: &str) -> BTreeSet<String> {
    regex
        .captures_iter(markup)
        .filter_map(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .collect()
}
