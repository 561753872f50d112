use crate::context::ServerContext;
use crate::ghost::{NewPost, PostStatus};
use crate::input::{Arguments, InputError};
use crate::mcp::contracts::TOOL_CREATE_POST;
use crate::tools::{ToolError, respond, text_result};
use serde_json::{Value, json};
use tracing::info;

pub fn call(ctx: &ServerContext, args: &Value) -> Value {
    respond(TOOL_CREATE_POST, run(ctx, args))
}

fn run(ctx: &ServerContext, args: &Value) -> Result<Value, ToolError> {
    let args = Arguments::from_value(args)?;
    let title = args.required_str("title")?;
    let html = args.required_str("html_content")?;
    let status = match args.optional_str("status")? {
        None => PostStatus::Draft,
        Some(value) => PostStatus::parse(value).ok_or_else(|| {
            InputError::invalid_input("status must be draft, published, or scheduled")
        })?,
    };

    info!(title, status = status.as_str(), "creating ghost post");
    let client = ctx.ghost()?;
    let created = client.create_post(&NewPost {
        title,
        html,
        status: status.as_str(),
    })?;

    let post = &created.post;
    let summary = match &post.url {
        Some(url) => format!("Created {} post \"{title}\" ({}) at {url}", status.as_str(), post.id),
        None => format!("Created {} post \"{title}\" ({})", status.as_str(), post.id),
    };
    Ok(text_result(summary, json!({ "post": post, "response": created.response })))
}
