use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure of a single outbound HTTP call.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err.without_url().to_string())
    }
}

pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Rejects non-2xx responses, keeping the status code and body.
pub fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

pub fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let body = check_status(response)?.text()?;
    serde_json::from_str(&body).map_err(|err| RemoteError::Decode(err.to_string()))
}

pub fn read_bytes(response: Response) -> Result<Vec<u8>, RemoteError> {
    let bytes = check_status(response)?.bytes()?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_body() {
        let err = RemoteError::Status {
            status: 422,
            body: "{\"errors\":[]}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote returned status 422: {\"errors\":[]}"
        );
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(build_client().is_ok());
    }
}
