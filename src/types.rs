//! Shared types serialized between the scan and generate stages.
//!
//! The scan stage writes these into `manifest.json`; the generate stage reads
//! them back. Both sides must agree on every field.

use crate::config::SiteConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scan output: everything the generator needs, with no further disk reads
/// except copying post assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<HomePage>,
    /// Project categories, already sorted by priority.
    pub categories: Vec<ProjectCategory>,
    /// Every post found, newest first, including unpublished ones.
    pub posts: Vec<Post>,
}

impl Manifest {
    /// Posts that are allowed on the site, newest first.
    pub fn published_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.published)
    }

    /// All projects in category order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.categories.iter().flat_map(|c| c.projects.iter())
    }

    /// Known project slugs in category order.
    pub fn project_slugs(&self) -> Vec<&str> {
        self.projects().map(|p| p.slug.as_str()).collect()
    }
}

/// Intro text for the home page, from `content/home.md`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    /// First `# heading`, or the site title.
    pub title: String,
    /// Markdown body.
    pub body: String,
}

/// A group of projects shown together on the projects page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lower shows first.
    pub priority: i32,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// One portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    /// Route segment under `/projects/`.
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Thumbnail path, site-absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Markdown write-up from `content/projects/<slug>.md`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Directory name under the blog root; route segment under `/blog/`.
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Cover image, site-absolute or external.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// e.g. "4 min read".
    pub reading_time: String,
    pub published: bool,
    /// Markdown body with authoring-tool syntax already rewritten.
    pub body: String,
    /// Non-markdown files in the post directory, relative to it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
}
