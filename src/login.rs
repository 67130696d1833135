//! The manual sign-in step.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{HarvestError, Result};

/// Blocks the pipeline until the user has signed in.
#[async_trait]
pub trait LoginGate: Send + Sync {
    async fn wait_for_login(&self) -> Result<()>;
}

/// Prompts on stdout and waits for ENTER on stdin.
pub struct StdinGate;

#[async_trait]
impl LoginGate for StdinGate {
    async fn wait_for_login(&self) -> Result<()> {
        println!("👉 Log in to Google in the browser, then press ENTER here…");

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        if read == 0 {
            return Err(HarvestError::LoginAborted(
                "stdin closed before confirmation".to_string(),
            ));
        }
        Ok(())
    }
}

/// A gate that is already open. Used when the session is known to be signed in.
pub struct PreConfirmed;

#[async_trait]
impl LoginGate for PreConfirmed {
    async fn wait_for_login(&self) -> Result<()> {
        Ok(())
    }
}
