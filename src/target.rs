//! Target URLs and the output directories derived from them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{HarvestError, Result};

/// Directory name used when a URL has no path.
pub const ROOT_SLUG: &str = "root";

static NON_ALNUM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("Invalid slug regex"));

/// A site page to crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    url: Url,
}

impl TargetUrl {
    /// Parse and validate an absolute URL.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim())
            .map_err(|e| HarvestError::InvalidTargetUrl(format!("{input}: {e}")))?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Filesystem-safe name for this target, built from the decoded path.
    pub fn slug(&self) -> String {
        let decoded = urlencoding::decode_binary(self.url.path().as_bytes());
        slugify_path(&String::from_utf8_lossy(&decoded))
    }

    /// `<root>/<slug>`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(self.slug())
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Replace every run of non-alphanumeric characters in a URL path with `_`.
///
/// Leading and trailing slashes are ignored; an empty path becomes [`ROOT_SLUG`].
pub fn slugify_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let slug = NON_ALNUM_REGEX.replace_all(trimmed, "_");
    if slug.is_empty() {
        ROOT_SLUG.to_string()
    } else {
        slug.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_of_site_page() {
        let target = TargetUrl::parse("https://sites.google.com/view/my-class/unit-1").unwrap();
        assert_eq!(target.slug(), "view_my_class_unit_1");
    }

    #[test]
    fn test_slug_collapses_runs() {
        assert_eq!(slugify_path("/a/b c!/d"), "a_b_c_d");
        assert_eq!(slugify_path("/x--//y/"), "x_y");
    }

    #[test]
    fn test_slug_ignores_percent_escapes() {
        let target = TargetUrl::parse("https://sites.google.com/a/b c!/d").unwrap();
        assert_eq!(target.slug(), "a_b_c_d");

        let target = TargetUrl::parse("https://sites.google.com/view/b%20c!/d").unwrap();
        assert_eq!(target.slug(), "view_b_c_d");

        let target = TargetUrl::parse("https://sites.google.com/view/cours-français").unwrap();
        assert_eq!(target.slug(), "view_cours_fran_ais");
    }

    #[test]
    fn test_slug_of_empty_path() {
        assert_eq!(slugify_path(""), ROOT_SLUG);
        assert_eq!(slugify_path("/"), ROOT_SLUG);
        let target = TargetUrl::parse("https://sites.google.com").unwrap();
        assert_eq!(target.slug(), ROOT_SLUG);
    }

    #[test]
    fn test_output_dir() {
        let target = TargetUrl::parse("https://sites.google.com/view/site").unwrap();
        assert_eq!(
            target.output_dir(Path::new("resources")),
            PathBuf::from("resources/view_site")
        );
    }

    #[test]
    fn test_invalid_target() {
        assert!(TargetUrl::parse("not a url").is_err());
        assert!(TargetUrl::parse("").is_err());
    }
}
