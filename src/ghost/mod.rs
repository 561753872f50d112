use crate::remote::{self, RemoteError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

pub mod token;

use token::{CredentialPair, TokenError};

pub const ACCEPT_VERSION: &str = "v5.0";

#[derive(Debug, Error)]
pub enum GhostError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("admin api response contained no posts")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Published,
    Scheduled,
}

impl PostStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            "scheduled" => Some(PostStatus::Scheduled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub html: &'a str,
    pub status: &'static str,
}

#[derive(Serialize)]
struct CreatePostsRequest<'a> {
    posts: [&'a NewPost<'a>; 1],
}

#[derive(Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<Post>,
}

/// A post as returned by the admin API. Fields beyond the ones named here
/// are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The first created post together with the full response body.
#[derive(Debug)]
pub struct CreatedPost {
    pub post: Post,
    pub response: Value,
}

impl CreatedPost {
    fn from_response(response: Value) -> Result<Self, GhostError> {
        let parsed: PostsResponse = serde_json::from_value(response.clone())
            .map_err(|err| RemoteError::Decode(err.to_string()))?;
        let post = parsed
            .posts
            .into_iter()
            .next()
            .ok_or(GhostError::EmptyResponse)?;
        Ok(Self { post, response })
    }
}

pub struct GhostClient<'a> {
    http: &'a Client,
    admin_url: String,
    admin_key: &'a str,
}

impl<'a> GhostClient<'a> {
    pub fn new(http: &'a Client, admin_url: &str, admin_key: &'a str) -> Self {
        Self {
            http,
            admin_url: admin_url.trim_end_matches('/').to_string(),
            admin_key,
        }
    }

    // A new token per request; tokens expire five minutes after issue.
    fn authorization(&self) -> Result<String, TokenError> {
        let credentials = CredentialPair::parse(self.admin_key)?;
        debug!(kid = credentials.key_id(), "signing admin token");
        Ok(format!("Ghost {}", credentials.sign_now()?))
    }

    pub fn create_post(&self, post: &NewPost<'_>) -> Result<CreatedPost, GhostError> {
        let url = format!("{}/posts/", self.admin_url);
        debug!(%url, status = post.status, "creating ghost post");

        let response = self
            .http
            .post(&url)
            .query(&[("source", "html")])
            .header("Authorization", self.authorization()?)
            .header("Accept-Version", ACCEPT_VERSION)
            .json(&CreatePostsRequest { posts: [post] })
            .send()
            .map_err(RemoteError::from)?;

        let created = CreatedPost::from_response(remote::read_json(response)?)?;
        info!(post_id = %created.post.id, "ghost post created");
        Ok(created)
    }
}
