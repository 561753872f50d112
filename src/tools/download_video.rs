use crate::context::ServerContext;
use crate::input::Arguments;
use crate::mcp::contracts::{
    DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, MAX_RETRIES,
    TOOL_DOWNLOAD_VIDEO,
};
use crate::poller::{PollPolicy, ThreadSleeper, poll_and_fetch};
use crate::tools::{ToolError, respond, save_artifact};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::info;

pub fn call(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_DOWNLOAD_VIDEO, run(ctx, args))
}

fn run(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    let args = Arguments::from_value(args)?;
    let video_id = args.required_str("video_id")?;
    let interval_ms = args
        .optional_u64("poll_interval", 1, MAX_POLL_INTERVAL_MS)?
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
    let max_retries = args
        .optional_u64("max_retries", 1, MAX_RETRIES)?
        .unwrap_or(DEFAULT_MAX_RETRIES);
    let output_path = match args.optional_str("output_path")? {
        Some(path) => PathBuf::from(path),
        None => ctx
            .config
            .heygen
            .output_dir
            .join(default_file_name(video_id)),
    };

    info!(
        video_id,
        poll_interval_ms = interval_ms,
        max_retries,
        "waiting for video"
    );
    let client = ctx.heygen()?;
    let policy = PollPolicy::from_millis(interval_ms, max_retries as u32);
    let artifact = poll_and_fetch(&client, &ThreadSleeper, video_id, policy)
        .map_err(|err| ToolError::from(err).with_source(video_id))?;

    let bytes_len = artifact.bytes.len() as u64;
    let saved = save_artifact(
        &output_path,
        &artifact.bytes,
        "video/mp4",
        "Video downloaded successfully",
    )?;

    Ok(json!({
        "content": saved.content,
        "structuredContent": {
            "video_id": video_id,
            "path": saved.path,
            "uri": saved.uri,
            "bytes_len": bytes_len,
            "attempts": artifact.attempts
        },
        "isError": false
    }))
}

// Ids are opaque; only the file name derived from one is restricted.
fn default_file_name(video_id: &str) -> String {
    let stem: String = video_id
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("video_{stem}.mp4")
}
