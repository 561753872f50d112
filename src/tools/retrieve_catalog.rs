use crate::context::ServerContext;
use crate::input::Arguments;
use crate::mcp::contracts::{TOOL_RETRIEVE_AVATARS, TOOL_RETRIEVE_VOICES};
use crate::tools::{ToolError, respond, text_result};
use serde_json::{Value, json};
use tracing::info;

pub fn call_voices(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_RETRIEVE_VOICES, run_voices(ctx, args))
}

pub fn call_avatars(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_RETRIEVE_AVATARS, run_avatars(ctx, args))
}

fn run_voices(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    Arguments::from_value(args)?;
    let voices = ctx.heygen()?.voices()?.voices;
    info!(count = voices.len(), "retrieved voices");
    Ok(text_result(
        format!("Successfully retrieved {} available voices", voices.len()),
        json!({ "count": voices.len(), "voices": voices }),
    ))
}

fn run_avatars(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    Arguments::from_value(args)?;
    let avatars = ctx.heygen()?.avatars()?.avatars;
    info!(count = avatars.len(), "retrieved avatars");
    Ok(text_result(
        format!("Successfully retrieved {} available avatars", avatars.len()),
        json!({ "count": avatars.len(), "avatars": avatars }),
    ))
}
