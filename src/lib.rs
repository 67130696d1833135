//! sites_drive - Download the Drive files and Google Docs linked from Google Sites pages.
//!
//! This library provides functionality to:
//! - Render site pages in a signed-in browser and extract Drive/Docs identifiers
//! - Reuse the browser's cookies in a plain HTTP session
//! - Download Drive files and export Docs (PDF and DOCX) into one directory per page
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sites_drive::{pipeline, Endpoints, StdinGate, TargetUrl, WebDriverBrowser};
//! use sites_drive::browser::BrowserKind;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let browser = WebDriverBrowser::launch("http://localhost:9515", BrowserKind::Chrome).await?;
//!     let targets = vec![TargetUrl::parse("https://sites.google.com/view/my-class")?];
//!
//!     let report = pipeline::run(
//!         browser,
//!         &StdinGate,
//!         &targets,
//!         Path::new("resources"),
//!         &Endpoints::default(),
//!     )
//!     .await?;
//!
//!     println!("{} saved, {} failed", report.saved(), report.failed());
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod client;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod filename;
pub mod logging;
pub mod login;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod target;

// Re-exports for convenience
pub use browser::{Browser, WebDriverBrowser};
pub use client::{DriveSession, Endpoints};
pub use crawler::SiteCrawler;
pub use error::{HarvestError, Result};
pub use extractor::{extract_ids, ExtractedIds};
pub use login::{LoginGate, PreConfirmed, StdinGate};
pub use models::{DownloadOutcome, DownloadRecord, RunReport, TargetPlan};
pub use target::TargetUrl;
