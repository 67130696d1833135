//! The end-to-end run: sign in, crawl, bridge the session, download.
//!
//! Each phase is a type that owns exactly the resources it needs and hands
//! them on when it completes:
//!
//! ```text
//! Init ──login──▶ LoggedIn ──crawl──▶ Crawled ──bridge──▶ SessionBridged ──download_all──▶ RunReport
//! ```
//!
//! The browser lives until [`Crawled::bridge`] quits it; the HTTP session only
//! exists after that, so the two are never in use at the same time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::browser::Browser;
use crate::client::{DriveSession, Endpoints};
use crate::crawler::{SiteCrawler, DEFAULT_SETTLE};
use crate::error::Result;
use crate::login::LoginGate;
use crate::models::{
    DownloadOutcome, DownloadRecord, ExportFormat, Resource, RunReport, SavedFile, TargetPlan,
};
use crate::session;
use crate::target::TargetUrl;

/// Identity provider page shown to the user before crawling.
pub const SIGN_IN_URL: &str = "https://accounts.google.com/signin";

/// A launched browser, not yet signed in.
pub struct Init<B: Browser> {
    browser: B,
    output_root: PathBuf,
    settle: Duration,
}

impl<B: Browser> Init<B> {
    pub fn new(browser: B, output_root: impl Into<PathBuf>) -> Self {
        Self {
            browser,
            output_root: output_root.into(),
            settle: DEFAULT_SETTLE,
        }
    }

    /// Override the settle period used while crawling.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Open the sign-in page and wait for the user.
    pub async fn login(self, gate: &dyn LoginGate) -> Result<LoggedIn<B>> {
        self.browser.goto(SIGN_IN_URL).await?;
        gate.wait_for_login().await?;
        info!("login confirmed");

        Ok(LoggedIn {
            browser: self.browser,
            output_root: self.output_root,
            settle: self.settle,
        })
    }
}

/// A signed-in browser ready to crawl.
pub struct LoggedIn<B: Browser> {
    browser: B,
    output_root: PathBuf,
    settle: Duration,
}

impl<B: Browser> LoggedIn<B> {
    pub async fn crawl(self, targets: &[TargetUrl]) -> Result<Crawled<B>> {
        let plans = SiteCrawler::new(&self.browser, self.output_root.clone())
            .with_settle(self.settle)
            .crawl(targets)
            .await?;

        Ok(Crawled {
            browser: self.browser,
            plans,
        })
    }
}

/// Crawl results, with the browser still open for its cookies.
pub struct Crawled<B: Browser> {
    browser: B,
    plans: Vec<TargetPlan>,
}

impl<B: Browser> Crawled<B> {
    pub fn plans(&self) -> &[TargetPlan] {
        &self.plans
    }

    /// Capture the cookies, shut the browser down and build the HTTP session.
    pub async fn bridge(self, endpoints: &Endpoints) -> Result<SessionBridged> {
        let cookies = self.browser.cookies().await?;
        self.browser.quit().await?;
        drop(self.browser);
        info!(cookies = cookies.len(), "browser closed, session cookies captured");

        Ok(SessionBridged {
            session: session::bridge(&cookies, endpoints)?,
            plans: self.plans,
        })
    }
}

/// An authenticated HTTP session plus everything left to download.
pub struct SessionBridged {
    session: DriveSession,
    plans: Vec<TargetPlan>,
}

impl SessionBridged {
    pub fn plans(&self) -> &[TargetPlan] {
        &self.plans
    }

    /// Attempt every resource of every plan. Individual failures are recorded,
    /// never returned.
    pub async fn download_all(self) -> RunReport {
        let mut report = RunReport::default();

        for plan in &self.plans {
            println!("\n📥 Downloading for {}", plan.target);
            info!(page = %plan.target, attempts = plan.attempt_count(), "downloading");

            for file_id in &plan.file_ids {
                let resource = Resource::DriveFile {
                    id: file_id.clone(),
                };
                let result = self
                    .session
                    .download_drive_file(file_id, &plan.output_dir)
                    .await;
                report.records.push(record(plan, resource, result));
            }

            for doc_id in &plan.doc_ids {
                for format in ExportFormat::ALL {
                    let resource = Resource::DocExport {
                        id: doc_id.clone(),
                        format,
                    };
                    let result = self
                        .session
                        .download_doc_export(doc_id, &plan.output_dir, format)
                        .await;
                    report.records.push(record(plan, resource, result));
                }
            }
        }

        report
    }
}

fn record(plan: &TargetPlan, resource: Resource, result: Result<SavedFile>) -> DownloadRecord {
    let outcome = match result {
        Ok(saved) => DownloadOutcome::Saved(saved),
        Err(e) => {
            warn!(resource = %resource, error = %e, "download failed");
            DownloadOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    let record = DownloadRecord {
        target: plan.target.clone(),
        resource,
        outcome,
    };
    println!("{}", record);
    record
}

/// Run every phase in order.
///
/// Errors before the download phase are returned; download failures end up
/// in the report.
pub async fn run<B: Browser>(
    browser: B,
    gate: &dyn LoginGate,
    targets: &[TargetUrl],
    output_root: &Path,
    endpoints: &Endpoints,
) -> Result<RunReport> {
    run_with_settle(browser, gate, targets, output_root, endpoints, DEFAULT_SETTLE).await
}

/// [`run`] with a custom settle period.
pub async fn run_with_settle<B: Browser>(
    browser: B,
    gate: &dyn LoginGate,
    targets: &[TargetUrl],
    output_root: &Path,
    endpoints: &Endpoints,
    settle: Duration,
) -> Result<RunReport> {
    let report = Init::new(browser, output_root)
        .with_settle(settle)
        .login(gate)
        .await?
        .crawl(targets)
        .await?
        .bridge(endpoints)
        .await?
        .download_all()
        .await;

    info!(saved = report.saved(), failed = report.failed(), "run complete");
    Ok(report)
}
