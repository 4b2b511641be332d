//! Infrastructure implementation of the `DeploymentClient` port.

use std::error::Error as _;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use nlq_common::{DeployRequest, DeploymentResult, HelperResponse, Stack};

use crate::application::ports::DeploymentClient;
use crate::domain::deploy::{connection_refused_message, from_helper, helper_url};

/// Upper bound for one deployment; image pulls can be slow.
pub const DEPLOY_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Calls `POST http://{host}:{port}/deploy` on the deployment helper.
#[derive(Debug, Clone)]
pub struct HttpDeploymentClient {
    client: reqwest::Client,
}

impl HttpDeploymentClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEPLOY_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building deployment HTTP client")?;
        Ok(Self { client })
    }
}

impl DeploymentClient for HttpDeploymentClient {
    async fn deploy(&self, host: &str, port: u16, stack: Stack) -> DeploymentResult {
        let url = format!("{}/deploy", helper_url(host, port));
        let response = match self
            .client
            .post(&url)
            .json(&DeployRequest { system: stack })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if is_connection_refused(&e) => {
                return DeploymentResult::error(connection_refused_message(port));
            }
            Err(e) => return DeploymentResult::error(e.to_string()),
        };

        let status = response.status().as_u16();
        match response.json::<HelperResponse>().await {
            Ok(body) => from_helper(status, body, stack),
            Err(e) => DeploymentResult::error(format!(
                "Unreadable reply from deployment service (HTTP {status}): {e}"
            )),
        }
    }
}

fn is_connection_refused(error: &reqwest::Error) -> bool {
    if !error.is_connect() {
        return false;
    }
    let mut source = error.source();
    while let Some(cause) = source {
        if cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io| io.kind() == io::ErrorKind::ConnectionRefused)
        {
            return true;
        }
        source = cause.source();
    }
    false
}
