use crate::config::MissingConfig;
use crate::ghost::GhostError;
use crate::ghost::token::TokenError;
use crate::input::InputError;
use crate::mcp::errors;
use crate::poller::PollError;
use crate::remote::RemoteError;
use crate::vertex::VertexError;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::warn;

pub mod create_post;
pub mod download_video;
pub mod generate_image;
pub mod generate_video;
pub mod list_videos;
pub mod retrieve_catalog;

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> serde_json::Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

pub fn text_result(text: impl Into<String>, structured: Value) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "structuredContent": structured,
        "isError": false
    })
}

/// Runs a tool body and shapes any failure into an error envelope.
pub fn respond(tool: &str, outcome: Result<Value, ToolError>) -> Value {
    match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!(tool, kind = err.kind, message = %err.message, "tool call failed");
            error_result(err.kind, err.message, err.source.as_deref())
        }
    }
}

#[derive(Debug)]
pub struct ToolError {
    pub kind: &'static str,
    pub message: String,
    pub source: Option<String>,
}

impl ToolError {
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl From<InputError> for ToolError {
    fn from(err: InputError) -> Self {
        ToolError::new(err.kind, err.message)
    }
}

impl From<MissingConfig> for ToolError {
    fn from(err: MissingConfig) -> Self {
        ToolError::new(errors::MISSING_CONFIG, err.to_string())
    }
}

impl From<TokenError> for ToolError {
    fn from(err: TokenError) -> Self {
        ToolError::new(errors::MALFORMED_CREDENTIAL, err.to_string())
    }
}

impl From<RemoteError> for ToolError {
    fn from(err: RemoteError) -> Self {
        ToolError::new(errors::REMOTE_ERROR, err.to_string())
    }
}

impl From<GhostError> for ToolError {
    fn from(err: GhostError) -> Self {
        match err {
            GhostError::Token(err) => err.into(),
            GhostError::Remote(err) => err.into(),
            empty @ GhostError::EmptyResponse => {
                ToolError::new(errors::REMOTE_ERROR, empty.to_string())
            }
        }
    }
}

impl From<PollError> for ToolError {
    fn from(err: PollError) -> Self {
        let kind = match &err {
            PollError::JobFailed { .. } => errors::JOB_FAILED,
            PollError::MissingArtifact { .. } => errors::MISSING_ARTIFACT,
            PollError::Timeout { .. } => errors::POLL_TIMEOUT,
            PollError::Remote(_) => errors::REMOTE_ERROR,
        };
        ToolError::new(kind, err.to_string())
    }
}

impl From<VertexError> for ToolError {
    fn from(err: VertexError) -> Self {
        match err {
            VertexError::Remote(err) => err.into(),
            other @ VertexError::NoImage => {
                ToolError::new(errors::MISSING_ARTIFACT, other.to_string())
            }
            other @ VertexError::InvalidPayload(_) => {
                ToolError::new(errors::REMOTE_ERROR, other.to_string())
            }
        }
    }
}

pub struct SavedArtifact {
    pub path: String,
    pub uri: String,
    pub content: Vec<Value>,
}

fn file_uri(absolute: &Path) -> String {
    let path = absolute.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}

/// Writes `bytes` to `path`, creating parent directories. The reported path
/// and URI are absolute.
pub fn save_artifact(
    path: &Path,
    bytes: &[u8],
    mime_type: &str,
    summary: &str,
) -> Result<SavedArtifact, ToolError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| {
            ToolError::new(
                errors::INTERNAL_ERROR,
                format!("failed to create {}: {err}", parent.display()),
            )
        })?;
    }
    fs::write(path, bytes).map_err(|err| {
        ToolError::new(
            errors::INTERNAL_ERROR,
            format!("failed to write output: {err}"),
        )
    })?;

    let absolute = std::path::absolute(path).map_err(|err| {
        ToolError::new(
            errors::INTERNAL_ERROR,
            format!("failed to resolve {}: {err}", path.display()),
        )
    })?;
    let display = absolute.display().to_string();
    let uri = file_uri(&absolute);
    let name = path
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or("artifact");

    let content = vec![
        json!({
            "type": "text",
            "text": format!("{summary} and saved to {display}")
        }),
        json!({
            "type": "resource_link",
            "uri": uri,
            "name": name,
            "mimeType": mime_type
        }),
    ];

    Ok(SavedArtifact {
        path: display,
        uri,
        content,
    })
}
