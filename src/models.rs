//! Data models shared by the crawl and download phases.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::target::TargetUrl;

/// Everything collected for one target page: where to save and what to fetch.
#[derive(Debug, Clone)]
pub struct TargetPlan {
    pub target: TargetUrl,
    pub output_dir: PathBuf,
    pub file_ids: BTreeSet<String>,
    pub doc_ids: BTreeSet<String>,
}

impl TargetPlan {
    /// Number of download attempts this plan will make.
    pub fn attempt_count(&self) -> usize {
        self.file_ids.len() + self.doc_ids.len() * ExportFormat::ALL.len()
    }
}

/// Export format for Google Docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// Every document is exported in each of these, in order.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Docx];

    /// Value of the `format` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn extension(self) -> &'static str {
        self.as_param()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A single thing to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    DriveFile { id: String },
    DocExport { id: String, format: ExportFormat },
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::DriveFile { id } => write!(f, "Drive file {}", id),
            Resource::DocExport { id, format } => write!(f, "Doc {} as {}", id, format),
        }
    }
}

/// A file written to disk by the downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

impl SavedFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(SavedFile),
    Failed { reason: String },
}

/// Outcome of one resource fetch, tied to the page it was found on.
#[derive(Debug, Clone)]
pub struct DownloadRecord {
    pub target: TargetUrl,
    pub resource: Resource,
    pub outcome: DownloadOutcome,
}

impl DownloadRecord {
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, DownloadOutcome::Saved(_))
    }
}

impl fmt::Display for DownloadRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            DownloadOutcome::Saved(saved) => match &self.resource {
                Resource::DriveFile { .. } => write!(
                    f,
                    " ✅ Saved Drive file {} ({})",
                    saved.file_name(),
                    format_size(saved.bytes)
                ),
                Resource::DocExport { .. } => write!(
                    f,
                    " ✅ Saved Doc export {} ({})",
                    saved.file_name(),
                    format_size(saved.bytes)
                ),
            },
            DownloadOutcome::Failed { reason } => {
                write!(f, " ❌ Failed {}: {}", self.resource, reason)
            }
        }
    }
}

/// All download records of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<DownloadRecord>,
}

impl RunReport {
    pub fn saved(&self) -> usize {
        self.records.iter().filter(|r| r.is_saved()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.saved()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DownloadRecord> {
        self.records.iter().filter(|r| !r.is_saved())
    }
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
