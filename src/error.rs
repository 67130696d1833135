//! Error types for the sites_drive crate.

use thiserror::Error;

/// Errors that can occur while crawling sites or downloading resources.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Login aborted: {0}")]
    LoginAborted(String),

    #[error("Invalid target URL: {0}")]
    InvalidTargetUrl(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error ({status}) for {url}")]
    Status { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for HarvestError.
pub type Result<T> = std::result::Result<T, HarvestError>;
