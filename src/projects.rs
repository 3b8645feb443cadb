//! Project registry: `content/projects.toml` plus optional write-ups.
//!
//! ```toml
//! [[categories]]
//! id = "academic"
//! name = "Academic Projects"
//! description = "Coursework and research"
//! priority = 2                       # lower shows first
//!
//! [[categories.projects]]
//! slug = "project_tsp"
//! name = "Travelling Salesman Heuristics"
//! description = "..."
//! tags = ["Python", "Optimization"]
//! image = "/images/tsp.jpeg"
//! featured = true
//! year = 2024
//! duration = "1 month"
//! ```
//!
//! A project's page body comes from `content/projects/<slug>.md` when that
//! file exists. The registry is the only list of known project slugs; the
//! sitemap and the generator both read it from here.

use crate::types::{Project, ProjectCategory};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("projects.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("duplicate project slug: {0}")]
    DuplicateSlug(String),
    #[error("invalid project slug {0:?}: use letters, digits, '-' and '_' only")]
    InvalidSlug(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    categories: Vec<ProjectCategory>,
}

/// Load the registry from `<root>/projects.toml`, attach write-ups from
/// `<root>/projects/<slug>.md`, and sort categories by priority.
///
/// A missing registry means no projects.
pub fn load_registry(root: &Path) -> Result<Vec<ProjectCategory>, RegistryError> {
    let path = root.join("projects.toml");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: RegistryFile = toml::from_str(&fs::read_to_string(&path)?)?;
    let mut categories = file.categories;
    validate_slugs(&categories)?;

    let pages_dir = root.join("projects");
    for project in categories.iter_mut().flat_map(|c| c.projects.iter_mut()) {
        let page = pages_dir.join(format!("{}.md", project.slug));
        if page.is_file() {
            project.body = Some(fs::read_to_string(page)?);
        }
    }

    categories.sort_by_key(|c| c.priority);
    Ok(categories)
}

fn validate_slugs(categories: &[ProjectCategory]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for project in categories.iter().flat_map(|c| c.projects.iter()) {
        let slug = project.slug.as_str();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RegistryError::InvalidSlug(slug.to_string()));
        }
        if !seen.insert(slug) {
            return Err(RegistryError::DuplicateSlug(slug.to_string()));
        }
    }
    Ok(())
}

/// Projects to suggest next to `current`.
///
/// Same-category projects first (registry order), then featured projects from
/// other categories until `max` is reached. Never includes `current`.
pub fn related<'a>(
    categories: &'a [ProjectCategory],
    current: &str,
    max: usize,
) -> Vec<&'a Project> {
    let home = categories
        .iter()
        .find(|c| c.projects.iter().any(|p| p.slug == current));

    let mut related: Vec<&Project> = home
        .map(|c| {
            c.projects
                .iter()
                .filter(|p| p.slug != current)
                .take(max)
                .collect()
        })
        .unwrap_or_default();

    if related.len() < max {
        let home_id = home.map(|c| c.id.as_str());
        let extra: Vec<&Project> = categories
            .iter()
            .filter(|c| Some(c.id.as_str()) != home_id)
            .flat_map(|c| c.projects.iter())
            .filter(|p| p.featured && p.slug != current)
            .filter(|p| !related.iter().any(|r| r.slug == p.slug))
            .take(max - related.len())
            .collect();
        related.extend(extra);
    }
    related
}

/// Featured projects across all categories, in category order.
pub fn featured(categories: &[ProjectCategory]) -> Vec<&Project> {
    categories
        .iter()
        .flat_map(|c| c.projects.iter())
        .filter(|p| p.featured)
        .collect()
}
