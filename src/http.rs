use log::warn;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::error::SnapError;

/// Builds the HTTP client shared by the backend clients
pub fn build_client(timeout: Duration) -> Result<Client, SnapError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("recipesnap/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Passes successful responses through and turns everything else into a
/// `ServerError`, picking up `{"detail": "..."}` from the body when present.
pub async fn check_status(response: Response) -> Result<Response, SnapError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body);
    warn!(
        "Request to backend failed with {}: {}",
        status,
        detail.as_deref().unwrap_or("<no detail>")
    );

    Err(SnapError::ServerError {
        status: status.as_u16(),
        detail,
    })
}

/// Best-effort parse of an error body. Only a string `detail` counts.
fn error_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json["detail"].as_str().map(String::from)
}
