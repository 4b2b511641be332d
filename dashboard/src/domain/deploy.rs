//! Interpretation of deployment helper replies.

use nlq_common::{DeploymentResult, HelperResponse, Stack};

/// Base URL of the deployment helper.
#[must_use]
pub fn helper_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}")
}

/// Message returned when nothing listens on the helper port.
#[must_use]
pub fn connection_refused_message(port: u16) -> String {
    format!(
        "Cannot connect to deployment service on port {port}. \
         Make sure the deployment service is running (docker compose up deployment-service) \
         and listening on port {port}."
    )
}

/// Map a decoded helper reply to a [`DeploymentResult`].
///
/// A 2xx reply that does not itself report `status: "error"` is a success
/// wrapping the helper's stdout. Anything else is an error carrying the
/// helper's message, stderr and compose path.
#[must_use]
pub fn from_helper(http_status: u16, body: HelperResponse, stack: Stack) -> DeploymentResult {
    let reported_error = body.status.as_deref() == Some("error");
    if (200..300).contains(&http_status) && !reported_error {
        return DeploymentResult::Success {
            stdout: body.stdout.unwrap_or_default(),
            system: stack,
        };
    }
    DeploymentResult::Error {
        message: body
            .message
            .unwrap_or_else(|| format!("Deployment service returned HTTP {http_status}")),
        stderr: body.stderr,
        compose_path: body.compose_path,
    }
}
