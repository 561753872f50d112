use crate::context::ServerContext;
use crate::input::Arguments;
use crate::mcp::contracts::{MAX_LIST_LIMIT, TOOL_LIST_VIDEOS};
use crate::tools::{ToolError, respond, text_result};
use serde_json::{Value, json};
use tracing::info;

pub fn call(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_LIST_VIDEOS, run(ctx, args))
}

fn run(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    let args = Arguments::from_value(args)?;
    let limit = args.optional_u64("limit", 0, MAX_LIST_LIMIT)?;
    let token = args.optional_str("token")?;

    let listing = ctx.heygen()?.list_videos(limit, token)?;
    let page = listing.data.unwrap_or_default();
    info!(count = page.videos.len(), "listed videos");

    let summary = match &page.token {
        Some(_) => format!("Retrieved {} videos (more available)", page.videos.len()),
        None => format!("Retrieved {} videos", page.videos.len()),
    };
    Ok(text_result(
        summary,
        json!({
            "code": listing.code,
            "message": listing.message,
            "data": page
        }),
    ))
}
