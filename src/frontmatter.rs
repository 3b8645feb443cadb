//! YAML front matter extraction and post field resolution.
//!
//! Posts are written in a note-taking tool whose templates use capitalized,
//! space-separated keys (`Article Title`, `Publish Date`, `Thumbnail`). Plain
//! lowercase keys work too. Each field is resolved from the first key present:
//!
//! | Field       | Keys tried, in order                    | Fallback      |
//! |-------------|-----------------------------------------|---------------|
//! | title       | `Article Title`, `Title`, `title`       | slug          |
//! | description | `Description`, `description`            | empty         |
//! | date        | `Publish Date`, `date`, `Date`          | none          |
//! | tags        | `tags`                                  | empty         |
//! | image       | `Thumbnail`, `image`, `cover`           | none          |
//! | published   | `Published`, `published`                | true          |

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter is not closed with ---")]
    Unclosed,
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a markdown document into its front matter and body.
///
/// A document without a leading `---` line has no front matter: the whole text
/// is the body and the returned value is `Value::Null`.
pub fn split(content: &str) -> Result<(Value, &str), FrontMatterError> {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return Ok((Value::Null, content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let value = if yaml.trim().is_empty() {
                Value::Null
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((value, body));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unclosed)
}

/// Post fields resolved from front matter.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFields {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    /// Set when a date key is present but could not be parsed.
    pub invalid_date: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub published: bool,
}

/// Resolve post fields from front matter using the key fallbacks above.
pub fn post_fields(meta: &Value, slug: &str, hidden_tags: &[String]) -> PostFields {
    let title = first_string(meta, &["Article Title", "Title", "title"])
        .unwrap_or_else(|| slug.to_string());
    let description = first_string(meta, &["Description", "description"]).unwrap_or_default();

    let raw_date = first_string(meta, &["Publish Date", "date", "Date"]);
    let date = raw_date.as_deref().and_then(parse_date);
    let invalid_date = raw_date.filter(|_| date.is_none());

    let tags = string_list(meta.get("tags"))
        .into_iter()
        .filter(|tag| !hidden_tags.iter().any(|h| h.eq_ignore_ascii_case(tag)))
        .collect();

    let image = first_string(meta, &["Thumbnail", "image", "cover"])
        .map(|raw| resolve_image(&raw, slug));

    let published = !matches!(meta.get("Published"), Some(Value::Bool(false)))
        && !matches!(meta.get("published"), Some(Value::Bool(false)));

    PostFields {
        title,
        description,
        date,
        invalid_date,
        tags,
        image,
        published,
    }
}

/// Parse the date formats seen in front matter.
///
/// Accepts `2024-01-01`, RFC 3339 timestamps, and `2024-01-01 10:30` /
/// `2024-01-01T10:30:00` local timestamps. Only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Rewrite a cover image reference into a site path.
///
/// - `[[cover.png]]` → `/blog/<slug>/cover.png`
/// - `cover.png` → `/blog/<slug>/cover.png`
/// - `/images/x.png` and `https://…` are kept as-is
fn resolve_image(raw: &str, slug: &str) -> String {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .find("[[")
        .and_then(|start| trimmed[start + 2..].split_once("]]").map(|(name, _)| name))
    {
        return format!("/blog/{slug}/{inner}");
    }
    if trimmed.starts_with('/') || trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("/blog/{slug}/{trimmed}")
    }
}

fn first_string(meta: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match meta.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
