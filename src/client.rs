//! Authenticated downloads of Drive files and Google Docs exports.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Response};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{HarvestError, Result};
use crate::filename::resolve_filename;
use crate::models::{ExportFormat, SavedFile};

/// Default host for the Drive file-export endpoint.
pub const DRIVE_BASE: &str = "https://drive.google.com";

/// Default host for the Docs document-export endpoint.
pub const DOCS_BASE: &str = "https://docs.google.com";

/// Size of the write buffer used when streaming to disk (32 KiB).
pub const CHUNK_SIZE: usize = 32 * 1024;

/// Prefix of the cookie set by the "can't scan for viruses" interstitial.
const DOWNLOAD_WARNING_PREFIX: &str = "download_warning";

/// Base URLs of the export endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub drive_base: String,
    pub docs_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            drive_base: DRIVE_BASE.to_string(),
            docs_base: DOCS_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Point both endpoints at one host, e.g. a local mock server.
    pub fn single(base: &str) -> Self {
        Self {
            drive_base: base.to_string(),
            docs_base: base.to_string(),
        }
    }

    fn file_export_url(&self) -> String {
        format!("{}/uc", self.drive_base.trim_end_matches('/'))
    }

    fn doc_export_url(&self, doc_id: &str) -> String {
        format!(
            "{}/document/d/{}/export",
            self.docs_base.trim_end_matches('/'),
            doc_id
        )
    }
}

/// HTTP session carrying the signed-in user's cookies.
///
/// Built by [`crate::session::bridge`].
pub struct DriveSession {
    http: Client,
    endpoints: Endpoints,
}

impl DriveSession {
    pub fn new(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Download a Drive file into `out_dir`.
    ///
    /// The saved name comes from `Content-Disposition` when present, otherwise
    /// it is the file ID plus an extension guessed from `Content-Type`.
    ///
    /// # Arguments
    /// * `file_id` - The Drive file ID
    /// * `out_dir` - Directory to save into, created if missing
    pub async fn download_drive_file(&self, file_id: &str, out_dir: &Path) -> Result<SavedFile> {
        let url = self.endpoints.file_export_url();
        let response = self
            .fetch_confirmed(&url, &[("export", "download"), ("id", file_id)])
            .await?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let filename = resolve_filename(
            header(CONTENT_DISPOSITION).as_deref(),
            header(CONTENT_TYPE).as_deref(),
            file_id,
        );

        save_response(response, out_dir, &filename).await
    }

    /// Export a Google Doc into `out_dir` as `<doc_id>_export.<ext>`.
    ///
    /// The server-supplied filename is ignored.
    pub async fn download_doc_export(
        &self,
        doc_id: &str,
        out_dir: &Path,
        format: ExportFormat,
    ) -> Result<SavedFile> {
        let url = self.endpoints.doc_export_url(doc_id);
        let response = self
            .fetch_confirmed(&url, &[("format", format.as_param())])
            .await?;

        let filename = format!("{}_export.{}", doc_id, format.extension());
        save_response(response, out_dir, &filename).await
    }

    /// GET with the interstitial confirmation step.
    ///
    /// When the first response sets a `download_warning*` cookie, the request is
    /// repeated once with its value as `confirm`.
    async fn fetch_confirmed(&self, url: &str, params: &[(&str, &str)]) -> Result<Response> {
        debug!(url, ?params, "requesting");
        let mut response = self.http.get(url).query(params).send().await?;

        if let Some(token) = confirm_token(&response) {
            debug!(url, "download needs confirmation, retrying with token");
            let mut confirmed = params.to_vec();
            confirmed.push(("confirm", token.as_str()));
            response = self.http.get(url).query(&confirmed).send().await?;
        }

        // Report the URL that answered, which differs from `url` after a redirect.
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response)
    }
}

/// Value of the first response cookie named `download_warning*`.
fn confirm_token(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name().starts_with(DOWNLOAD_WARNING_PREFIX))
        .map(|cookie| cookie.value().to_string())
}

/// Stream a response body to `<out_dir>/<filename>`, replacing any existing file.
async fn save_response(response: Response, out_dir: &Path, filename: &str) -> Result<SavedFile> {
    fs::create_dir_all(out_dir).await?;
    let path: PathBuf = out_dir.join(filename);

    let file = File::create(&path).await?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        bytes += chunk.len() as u64;
    }

    writer.flush().await?;
    debug!(path = %path.display(), bytes, "saved");

    Ok(SavedFile { path, bytes })
}
