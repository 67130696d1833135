//! In-memory browser used by the crawler and pipeline tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sites_drive::error::{HarvestError, Result};
use sites_drive::Browser;

/// Serves canned markup per URL and records what the crawler did.
///
/// Clones share their recordings, so a test can keep one handle while the
/// pipeline consumes another.
#[derive(Default, Clone)]
pub struct FakeBrowser {
    pages: HashMap<String, String>,
    cookies: HashMap<String, String>,
    current: Arc<Mutex<Option<String>>>,
    visited: Arc<Mutex<Vec<String>>>,
    scripts: Arc<Mutex<Vec<String>>>,
    quit: Arc<Mutex<bool>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    pub fn cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    pub fn has_quit(&self) -> bool {
        *self.quit.lock().unwrap()
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        if *self.quit.lock().unwrap() {
            return Err(HarvestError::Navigation {
                url: url.to_string(),
                message: "browser already closed".to_string(),
            });
        }
        self.visited.lock().unwrap().push(url.to_string());
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn execute(&self, script: &str) -> Result<()> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok(())
    }

    async fn source(&self) -> Result<String> {
        let current = self.current.lock().unwrap().clone().unwrap_or_default();
        Ok(self.pages.get(&current).cloned().unwrap_or_default())
    }

    async fn cookies(&self) -> Result<HashMap<String, String>> {
        Ok(self.cookies.clone())
    }

    async fn quit(&self) -> Result<()> {
        *self.quit.lock().unwrap() = true;
        Ok(())
    }
}

/// A browser whose navigation always fails.
pub struct BrokenBrowser;

#[async_trait]
impl Browser for BrokenBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        Err(HarvestError::Navigation {
            url: url.to_string(),
            message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        })
    }

    async fn execute(&self, _script: &str) -> Result<()> {
        Ok(())
    }

    async fn source(&self) -> Result<String> {
        Ok(String::new())
    }

    async fn cookies(&self) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }

    async fn quit(&self) -> Result<()> {
        Ok(())
    }
}
