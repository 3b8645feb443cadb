//! Blog content provider.
//!
//! Posts live one per directory under the blog root:
//!
//! ```text
//! content/blog/
//! ├── cfd-with-python/
//! │   ├── index.md          # front matter + markdown (index.mdx preferred)
//! │   └── contours.png      # asset, copied next to the rendered page
//! └── drafts-are-fine/
//!     └── index.mdx
//! ```
//!
//! The directory name is the slug. Directories without an index file are
//! skipped. A missing blog root means "no posts", not an error.
//!
//! Consumers go through [`ContentProvider`] so the sitemap can be built from
//! disk, from a manifest, or from a stub in tests.

use crate::config::BlogConfig;
use crate::frontmatter::{self, FrontMatterError};
use crate::markdown;
use crate::types::{Manifest, Post};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("{path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Source of blog posts.
pub trait ContentProvider {
    /// Every post, newest first. Unpublished posts are included; callers filter.
    fn all_posts(&self) -> Result<Vec<Post>, ContentError>;

    /// Sorted, de-duplicated tags over published posts.
    fn all_tags(&self) -> Result<Vec<String>, ContentError> {
        Ok(collect_tags(self.all_posts()?.iter().filter(|p| p.published)))
    }
}

/// A scanned manifest already holds every post.
impl ContentProvider for Manifest {
    fn all_posts(&self) -> Result<Vec<Post>, ContentError> {
        Ok(self.posts.clone())
    }
}

/// Sorted unique tags across `posts`.
fn collect_tags<'a>(posts: impl Iterator<Item = &'a Post>) -> Vec<String> {
    let mut tags: Vec<String> = posts.flat_map(|p| p.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Posts read from a blog directory on disk.
pub struct BlogDir<'a> {
    root: PathBuf,
    config: &'a BlogConfig,
}

impl<'a> BlogDir<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a BlogConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    fn read_post(&self, dir: &Path, slug: &str) -> Result<Option<Post>, ContentError> {
        let Some(index) = index_file(dir) else {
            return Ok(None);
        };
        let source = fs::read_to_string(&index)?;
        let (meta, body) = frontmatter::split(&source).map_err(|source| {
            ContentError::FrontMatter {
                path: index.clone(),
                source,
            }
        })?;
        let fields = frontmatter::post_fields(&meta, slug, &self.config.hidden_tags);
        if let Some(raw) = &fields.invalid_date {
            log::warn!("{}: unrecognized date {raw:?}, treating as undated", index.display());
        }

        Ok(Some(Post {
            slug: slug.to_string(),
            title: fields.title,
            description: fields.description,
            date: fields.date,
            tags: fields.tags,
            image: fields.image,
            reading_time: markdown::reading_time(body, self.config.words_per_minute),
            published: fields.published,
            body: markdown::rewrite_note_syntax(body, slug),
            assets: post_assets(dir)?,
        }))
    }
}

impl ContentProvider for BlogDir<'_> {
    fn all_posts(&self) -> Result<Vec<Post>, ContentError> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut dirs: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        let mut posts = Vec::new();
        for dir in dirs {
            let slug = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if slug.starts_with('.') {
                continue;
            }
            if let Some(post) = self.read_post(&dir, &slug)? {
                posts.push(post);
            }
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Newest first. An undated post counts as dated at build time, so it leads;
/// ties keep slug order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|p| p.date.map(Reverse));
}

/// `index.mdx` wins over `index.md`.
fn index_file(dir: &Path) -> Option<PathBuf> {
    ["index.mdx", "index.md"]
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Files in the post directory that are not the post itself, relative to it.
fn post_assets(dir: &Path) -> Result<Vec<String>, ContentError> {
    let mut assets = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            ContentError::Unavailable(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other(format!("walking {}", dir.display()))
            }))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || name == "index.md" || name == "index.mdx" {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(dir) {
            assets.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(assets)
}
