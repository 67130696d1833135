//! Browser automation seam and its WebDriver implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tracing::debug;

use crate::error::Result;

/// Script used to trigger lazily loaded content.
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// The operations the crawler needs from a live browser session.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Load `url`, replacing the current page.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Run a script in the current page, ignoring its return value.
    async fn execute(&self, script: &str) -> Result<()>;

    /// Markup of the current page.
    async fn source(&self) -> Result<String>;

    /// All cookies visible to the session, by name.
    async fn cookies(&self) -> Result<HashMap<String, String>>;

    /// End the browser session.
    async fn quit(&self) -> Result<()>;
}

/// Which browser the WebDriver server should launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

/// A [`Browser`] backed by a W3C WebDriver server (chromedriver, geckodriver).
pub struct WebDriverBrowser {
    driver: WebDriver,
}

impl WebDriverBrowser {
    /// Start a new browser session on the WebDriver server at `server_url`.
    ///
    /// The window is opened visibly, since the user has to sign in by hand.
    pub async fn launch(server_url: &str, kind: BrowserKind) -> Result<Self> {
        let driver = match kind {
            BrowserKind::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                caps.add_arg("--start-maximized")?;
                WebDriver::new(server_url, caps).await?
            }
            BrowserKind::Firefox => {
                let caps = DesiredCapabilities::firefox();
                WebDriver::new(server_url, caps).await?
            }
        };

        debug!(server_url, ?kind, "WebDriver session started");
        Ok(Self { driver })
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn execute(&self, script: &str) -> Result<()> {
        self.driver.execute(script, Vec::new()).await?;
        Ok(())
    }

    async fn source(&self) -> Result<String> {
        Ok(self.driver.source().await?)
    }

    async fn cookies(&self) -> Result<HashMap<String, String>> {
        let cookies = self.driver.get_all_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|cookie| (cookie.name, cookie.value))
            .collect())
    }

    async fn quit(&self) -> Result<()> {
        self.driver.clone().quit().await?;
        Ok(())
    }
}
