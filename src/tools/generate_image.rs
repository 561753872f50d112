use crate::context::ServerContext;
use crate::input::{Arguments, InputError};
use crate::mcp::contracts::TOOL_GENERATE_IMAGE;
use crate::tools::{ToolError, respond, save_artifact, text_result};
use crate::vertex::{ASPECT_RATIOS, DEFAULT_ASPECT_RATIO};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

pub fn call(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_GENERATE_IMAGE, run(ctx, args))
}

fn run(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    let args = Arguments::from_value(args)?;
    let prompt = args.required_str("prompt")?;
    let save_to_file = args.optional_str("save_to_file")?;
    let aspect_ratio = args
        .optional_str("aspect_ratio")?
        .unwrap_or(DEFAULT_ASPECT_RATIO);
    if !ASPECT_RATIOS.contains(&aspect_ratio) {
        return Err(InputError::invalid_input(format!(
            "aspect_ratio must be one of {}",
            ASPECT_RATIOS.join(", ")
        ))
        .into());
    }

    info!(aspect_ratio, saving = save_to_file.is_some(), "generating image");
    let image = ctx.vertex()?.generate_image(prompt, aspect_ratio)?;
    let bytes_len = image.bytes.len() as u64;

    match save_to_file {
        Some(path) => {
            let saved = save_artifact(
                Path::new(path),
                &image.bytes,
                &image.mime_type,
                "Image generated",
            )?;
            Ok(json!({
                "content": saved.content,
                "structuredContent": {
                    "file_path": saved.path,
                    "uri": saved.uri,
                    "mime_type": image.mime_type,
                    "bytes_len": bytes_len
                },
                "isError": false
            }))
        }
        None => Ok(text_result(
            format!("Image generated ({bytes_len} bytes, {})", image.mime_type),
            json!({
                "image_data": STANDARD.encode(&image.bytes),
                "mime_type": image.mime_type,
                "bytes_len": bytes_len
            }),
        )),
    }
}
