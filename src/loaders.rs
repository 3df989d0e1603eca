//! Headless-CMS content: blog posts and portfolio projects.
//!
//! The content API speaks GraphQL over HTTP. This module owns both ends of
//! the exchange except the transport: the request bodies for the two fixed
//! queries and the validated decoding of responses shaped like
//!
//! ```json
//! { "data": { "posts": [ { "id": "...", "title": "...", ... } ] } }
//! ```
//!
//! Decoded posts become [`PageEntry`] values under `posts/<id>` so they are
//! routed like any other page. Projects are grouped for the portfolio page.

use crate::types::{Frontmatter, NavbarMeta, PageEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Collection name, and id prefix, of remote posts.
pub const POSTS_COLLECTION: &str = "posts";

pub const POSTS_QUERY: &str = "
    {
      posts {
        id
        title
        dates
        excerpt
        slug
        content {
            html
        }
      }
    }";

pub const PROJECTS_QUERY: &str = "
    {
      projects {
        id
        title
        dates
        excerpt
        slug
        content {
            html
        }
        isCompleted
      }
    }";

/// Content type of request bodies.
pub const CONTENT_TYPE: &str = "application/json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content API error: {0}")]
    Api(String),
    #[error("Response has no `data.{0}` field")]
    MissingField(&'static str),
    #[error("Invalid {collection} record: {source}")]
    Validation {
        collection: &'static str,
        source: serde_json::Error,
    },
}

/// A GraphQL request body: `{"query": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
}

impl GraphQlRequest {
    pub fn posts() -> Self {
        Self { query: POSTS_QUERY }
    }

    pub fn projects() -> Self {
        Self { query: PROJECTS_QUERY }
    }

    /// JSON body to POST with [`CONTENT_TYPE`].
    pub fn body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RichText {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: RichText,
    pub excerpt: String,
    pub dates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub content: RichText,
    pub excerpt: String,
    pub is_completed: Option<bool>,
    pub dates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Decode `data.<field>` of a response into records.
fn decode_collection<T: DeserializeOwned>(body: &str, field: &'static str) -> Result<Vec<T>, LoadError> {
    let envelope: Value = serde_json::from_str(body)?;
    let Some(records) = envelope
        .pointer(&format!("/data/{field}"))
        .filter(|v| !v.is_null())
        .cloned()
    else {
        return Err(api_errors(&envelope).unwrap_or(LoadError::MissingField(field)));
    };
    let decoded: Vec<T> = serde_json::from_value(records).map_err(|source| LoadError::Validation {
        collection: field,
        source,
    })?;
    log::debug!("decoded {} {field}", decoded.len());
    Ok(decoded)
}

/// GraphQL `errors` of a failed response, joined.
fn api_errors(envelope: &Value) -> Option<LoadError> {
    let messages: Vec<&str> = envelope
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();
    (!messages.is_empty()).then(|| LoadError::Api(messages.join("; ")))
}

pub fn parse_posts(body: &str) -> Result<Vec<Post>, LoadError> {
    decode_collection(body, POSTS_COLLECTION)
}

pub fn parse_projects(body: &str) -> Result<Vec<Project>, LoadError> {
    decode_collection(body, "projects")
}

/// Page entries for posts. Posts are reachable by slug but stay out of the
/// automatic navbar.
pub fn posts_to_pages(posts: &[Post]) -> Vec<PageEntry> {
    posts
        .iter()
        .map(|post| {
            let id = format!("{POSTS_COLLECTION}/{}", post.id);
            PageEntry {
                slug: id.clone(),
                file_path: id.clone(),
                id,
                collection: POSTS_COLLECTION.to_string(),
                data: Frontmatter {
                    title: post.title.clone(),
                    description: Some(post.excerpt.clone()).filter(|e| !e.is_empty()),
                    date: Some(post.dates.clone()),
                    draft: false,
                    navbar: NavbarMeta {
                        hidden: true,
                        ..NavbarMeta::default()
                    },
                    ..Frontmatter::default()
                },
                body: post.content.html.clone(),
            }
        })
        .collect()
}

/// Portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectGroups {
    #[serde(rename = "Current projects")]
    pub current: Vec<ProjectSummary>,
    #[serde(rename = "Past projects")]
    pub past: Vec<ProjectSummary>,
}

/// Split projects by completion; unknown completion counts as current.
pub fn group_projects(projects: &[Project]) -> ProjectGroups {
    let mut groups = ProjectGroups::default();
    for project in projects {
        let summary = ProjectSummary {
            name: project.title.clone(),
            desc: project.excerpt.clone(),
        };
        if project.is_completed == Some(true) {
            groups.past.push(summary);
        } else {
            groups.current.push(summary);
        }
    }
    groups
}
