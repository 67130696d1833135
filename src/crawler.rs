//! Site crawler: renders target pages and collects the resources they link to.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::browser::{Browser, SCROLL_TO_BOTTOM};
use crate::error::Result;
use crate::extractor::{extract_ids, ExtractedIds};
use crate::models::TargetPlan;
use crate::target::TargetUrl;

/// Time given to client-side rendering after each navigation.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(3);

/// Crawls target pages through a signed-in browser.
pub struct SiteCrawler<'a, B: Browser> {
    browser: &'a B,
    output_root: PathBuf,
    settle: Duration,
}

impl<'a, B: Browser> SiteCrawler<'a, B> {
    pub fn new(browser: &'a B, output_root: impl Into<PathBuf>) -> Self {
        Self {
            browser,
            output_root: output_root.into(),
            settle: DEFAULT_SETTLE,
        }
    }

    /// Override the settle period.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Crawl every target in order. The first browser error aborts the crawl.
    pub async fn crawl(&self, targets: &[TargetUrl]) -> Result<Vec<TargetPlan>> {
        let mut plans = Vec::with_capacity(targets.len());
        for target in targets {
            plans.push(self.crawl_target(target).await?);
        }
        Ok(plans)
    }

    /// Crawl one page plus the Drive folders it links to (one level only).
    pub async fn crawl_target(&self, target: &TargetUrl) -> Result<TargetPlan> {
        let output_dir = target.output_dir(&self.output_root);
        println!("\n🌐 Processing {}\n→ will save into {}", target, output_dir.display());

        self.browser.goto(target.as_str()).await?;
        self.browser.execute(SCROLL_TO_BOTTOM).await?;
        let page = self.capture().await?;

        let mut collected = ExtractedIds {
            file_ids: page.file_ids,
            doc_ids: page.doc_ids,
            ..Default::default()
        };

        for folder in &page.folder_urls {
            println!("   🔍 crawling folder: {}", folder);
            self.browser.goto(folder).await?;
            let mut inner = self.capture().await?;
            // Only the parent page's folders are followed.
            inner.folder_urls.clear();
            collected.merge(inner);
        }

        info!(
            page = %target,
            files = collected.file_ids.len(),
            docs = collected.doc_ids.len(),
            folders = page.folder_urls.len(),
            "crawled target"
        );

        Ok(TargetPlan {
            target: target.clone(),
            output_dir,
            file_ids: collected.file_ids,
            doc_ids: collected.doc_ids,
        })
    }

    async fn capture(&self) -> Result<ExtractedIds> {
        tokio::time::sleep(self.settle).await;
        let markup = self.browser.source().await?;
        debug!(bytes = markup.len(), "captured page source");
        Ok(extract_ids(&markup))
    }
}
