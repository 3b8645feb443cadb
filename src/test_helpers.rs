//! Shared test utilities for the folio test suite.
//!
//! Provides an isolated copy of `fixtures/content` and lookup helpers over
//! scan-phase data ([`Manifest`], [`Post`], [`Project`]).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest, "cfd-with-python");
//! assert!(post.published);
//! assert_eq!(category_ids(&manifest), vec!["industry", "academic"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Manifest, Post, Project};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panic with the available names on a miss
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a Post {
    manifest
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| panic!("post '{slug}' not found. Available: {:?}", post_slugs(manifest)))
}

/// Find a project by slug across all categories. Panics if not found.
pub fn find_project<'a>(manifest: &'a Manifest, slug: &str) -> &'a Project {
    manifest
        .projects()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            panic!(
                "project '{slug}' not found. Available: {:?}",
                manifest.project_slugs()
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All post slugs in manifest order, published or not.
pub fn post_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Category ids in display order.
pub fn category_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.categories.iter().map(|c| c.id.as_str()).collect()
}
