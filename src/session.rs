//! Transfers the browser's signed-in cookies into a plain HTTP session.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::client::{DriveSession, Endpoints};
use crate::error::{HarvestError, Result};

/// Cookie store for a bridged session.
///
/// The browser's cookies are attached to every request, whatever the host,
/// so downloads stay signed in when the export endpoints redirect to content
/// hosts. Cookies set by responses are kept in a regular [`Jar`] and win over
/// a bridged cookie of the same name.
pub struct BridgedCookies {
    bridged: BTreeMap<String, String>,
    jar: Jar,
}

impl BridgedCookies {
    pub fn new(cookies: &HashMap<String, String>) -> Self {
        let mut bridged = BTreeMap::new();
        for (name, value) in cookies {
            if name.is_empty() {
                warn!("skipping browser cookie with empty name");
                continue;
            }
            bridged.insert(name.clone(), value.clone());
            debug!(cookie = %name, "bridged cookie");
        }

        Self {
            bridged,
            jar: Jar::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.bridged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridged.is_empty()
    }
}

impl CookieStore for BridgedCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar.set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        let mut pairs = self.bridged.clone();

        if let Some(stored) = self.jar.cookies(url) {
            if let Ok(stored) = stored.to_str() {
                for pair in stored.split("; ") {
                    if let Some((name, value)) = pair.split_once('=') {
                        pairs.insert(name.to_string(), value.to_string());
                    }
                }
            }
        }

        if pairs.is_empty() {
            return None;
        }

        let header = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&header).ok()
    }
}

/// Build a [`DriveSession`] carrying every browser cookie.
///
/// Values are never logged.
pub fn bridge(cookies: &HashMap<String, String>, endpoints: &Endpoints) -> Result<DriveSession> {
    validate_endpoints(endpoints)?;

    let store = Arc::new(BridgedCookies::new(cookies));
    debug!(count = store.len(), "HTTP session ready");

    let http = Client::builder().cookie_provider(store).build()?;
    Ok(DriveSession::new(http, endpoints.clone()))
}

fn validate_endpoints(endpoints: &Endpoints) -> Result<()> {
    for base in [&endpoints.drive_base, &endpoints.docs_base] {
        Url::parse(base).map_err(|e| HarvestError::InvalidEndpoint(format!("{base}: {e}")))?;
    }
    Ok(())
}
