use crate::context::ServerContext;
use crate::heygen::types::Dimension;
use crate::heygen::{DEFAULT_AVATAR_ID, DEFAULT_DIMENSION, DEFAULT_VOICE_ID, VideoSpec};
use crate::input::Arguments;
use crate::mcp::contracts::{MAX_VIDEO_DIMENSION, TOOL_GENERATE_VIDEO};
use crate::tools::{ToolError, respond, text_result};
use serde_json::{Value, json};
use tracing::info;

pub fn call(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_GENERATE_VIDEO, run(ctx, args))
}

fn run(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    let args = Arguments::from_value(args)?;
    let script = args.required_str("script")?;
    let avatar_id = args.optional_str("avatar_id")?.unwrap_or(DEFAULT_AVATAR_ID);
    let voice_id = args.optional_str("voice_id")?.unwrap_or(DEFAULT_VOICE_ID);
    let width = args.optional_u64("width", 1, MAX_VIDEO_DIMENSION)?;
    let height = args.optional_u64("height", 1, MAX_VIDEO_DIMENSION)?;
    let dimension = Dimension {
        width: width.map_or(DEFAULT_DIMENSION.width, |value| value as u32),
        height: height.map_or(DEFAULT_DIMENSION.height, |value| value as u32),
    };

    info!(
        avatar_id,
        voice_id,
        script_chars = script.chars().count(),
        "starting video generation"
    );
    let client = ctx.heygen()?;
    let video_id = client.generate_video(&VideoSpec {
        script,
        avatar_id,
        voice_id,
        dimension,
    })?;

    Ok(text_result(
        format!("Video generation initiated. Video ID: {video_id}"),
        json!({
            "video_id": video_id,
            "avatar_id": avatar_id,
            "voice_id": voice_id,
            "dimension": dimension
        }),
    ))
}
