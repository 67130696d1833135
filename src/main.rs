//! sites_drive CLI - Download Drive files and Docs linked from Google Sites pages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use sites_drive::browser::BrowserKind;
use sites_drive::{logging, pipeline, Endpoints, StdinGate, TargetUrl, WebDriverBrowser};

/// Scrape Google Sites pages for Drive files and Docs, then download them.
#[derive(Parser, Debug)]
#[command(name = "sites_drive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// One or more Google Sites URLs to scrape.
    #[arg(required = true)]
    urls: Vec<String>,

    /// URL of a running WebDriver server (chromedriver, geckodriver).
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    webdriver_url: String,

    /// Browser the WebDriver server should launch.
    #[arg(long, env = "SITES_DRIVE_BROWSER", value_enum, default_value_t = BrowserKind::Chrome)]
    browser: BrowserKind,

    /// Root directory; each URL gets its own subdirectory.
    #[arg(long, env = "SITES_DRIVE_OUTPUT", default_value = "resources")]
    output_dir: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(?cli, "CLI arguments parsed");

    // Reject bad input before a browser window opens
    let targets = cli
        .urls
        .iter()
        .map(|url| TargetUrl::parse(url))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid target URL")?;

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create directory: {:?}", cli.output_dir))?;

    let browser = WebDriverBrowser::launch(&cli.webdriver_url, cli.browser)
        .await
        .with_context(|| format!("Failed to start a browser via {}", cli.webdriver_url))?;

    let report = pipeline::run(
        browser,
        &StdinGate,
        &targets,
        &cli.output_dir,
        &Endpoints::default(),
    )
    .await
    .context("Run aborted before downloads started")?;

    println!(
        "\n🎉 All done! {} saved, {} failed. Check your files in {}",
        report.saved(),
        report.failed(),
        cli.output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_url() {
        assert!(Cli::try_parse_from(["sites_drive"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sites_drive", "https://sites.google.com/view/a"]).unwrap();
        assert_eq!(cli.urls.len(), 1);
        assert_eq!(cli.browser, BrowserKind::Chrome);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "sites_drive",
            "--browser",
            "firefox",
            "--output-dir",
            "out",
            "-vv",
            "https://sites.google.com/view/a",
            "https://sites.google.com/view/b",
        ])
        .unwrap();
        assert_eq!(cli.urls.len(), 2);
        assert_eq!(cli.browser, BrowserKind::Firefox);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.verbose, 2);
    }
}
