//! HTTP plumbing shared by the provider clients.

use std::time::Duration;

use reqwest::Client;

use crate::error::FactoryError;

/// Join a configured base URL and an API path.
pub(super) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Build the HTTP client backing one handle.
///
/// Building a client opens no sockets.
pub(super) fn http_client(timeout_secs: Option<u64>) -> Result<Client, FactoryError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
