//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the build. Reads everything under the content root once and
//! produces a [`Manifest`] that the generate stage renders without touching
//! markdown or TOML again.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── home.md                      # Home page intro (optional)
//! ├── projects.toml                # Project registry (optional)
//! ├── projects/
//! │   └── project_tsp.md           # Write-up for the project with that slug
//! ├── assets/                      # Copied verbatim to the output root
//! │   └── images/tsp.svg
//! └── blog/
//!     ├── cfd-with-python/
//!     │   ├── index.md             # Front matter + markdown
//!     │   └── cover.svg            # Post asset
//!     └── notes-on-heuristics/
//!         └── index.mdx
//! ```
//!
//! ## Validation
//!
//! The scanner fails on:
//! - invalid `config.toml` (unknown keys, bad values)
//! - malformed `projects.toml`, duplicate or unsafe project slugs
//! - unparseable front matter in a post
//!
//! Unrecognized post dates are not an error: the post is treated as undated
//! (listed first, as if dated at build time) and a warning is logged.

use crate::config::{self, SiteConfig};
use crate::content::{BlogDir, ContentError, ContentProvider};
use crate::markdown;
use crate::projects::{self, RegistryError};
use crate::sitemap::{self, SitemapEntry};
use crate::types::{HomePage, Manifest};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Project registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Blog error: {0}")]
    Content(#[from] ContentError),
    #[error("Content directory not found: {0}")]
    MissingRoot(std::path::PathBuf),
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    // Uses defaults if config.toml doesn't exist
    let config = config::load_config(root)?;
    let home = read_home(root, &config)?;
    let categories = projects::load_registry(root)?;
    let posts = BlogDir::new(root.join("blog"), &config.blog).all_posts()?;

    Ok(Manifest {
        config,
        home,
        categories,
        posts,
    })
}

/// Sitemap entries for the content directory, without a full scan.
///
/// Posts are read through [`BlogDir`], so a blog that cannot be read loses
/// only its own entries; config and registry errors still fail.
pub fn scan_sitemap(root: &Path, now: DateTime<Utc>) -> Result<Vec<SitemapEntry>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let config = config::load_config(root)?;
    let categories = projects::load_registry(root)?;
    let slugs: Vec<&str> = categories
        .iter()
        .flat_map(|c| c.projects.iter())
        .map(|p| p.slug.as_str())
        .collect();
    let blog = BlogDir::new(root.join("blog"), &config.blog);
    Ok(sitemap::build_sitemap(&config.site, &slugs, &blog, now))
}

/// `home.md`, titled by its first heading or the site title.
fn read_home(root: &Path, config: &SiteConfig) -> Result<Option<HomePage>, ScanError> {
    let path = root.join("home.md");
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(path)?;
    let title = markdown::first_heading(&body).unwrap_or_else(|| config.site.title.clone());
    Ok(Some(HomePage { title, body }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Jane Doe");
        assert_eq!(manifest.config.site.base_url, "https://jane.dev");
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("config.toml")).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Portfolio");
    }

    #[test]
    fn invalid_config_is_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), "[site]\ntitel = \"typo\"\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    #[test]
    fn home_title_from_heading() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let home = manifest.home.unwrap();
        assert_eq!(home.title, "Hi, I'm Jane");
        assert!(home.body.contains("turbomachinery"));
    }

    #[test]
    fn home_title_falls_back_to_site_title() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("home.md"), "No heading here.\n").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.home.unwrap().title, "Jane Doe");
    }

    #[test]
    fn no_home_without_file() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("home.md")).unwrap();
        assert!(scan(tmp.path()).unwrap().home.is_none());
    }

    #[test]
    fn categories_in_priority_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(category_ids(&manifest), vec!["industry", "academic"]);
        assert_eq!(
            manifest.project_slugs(),
            vec![
                "project_volute_fillet",
                "project_pump_curves",
                "project_tsp",
                "Project_MoviesSoftware"
            ]
        );
    }

    #[test]
    fn project_write_up_attached() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let tsp = find_project(&manifest, "project_tsp");
        assert!(tsp.body.as_deref().unwrap().contains("2-opt"));
        assert!(find_project(&manifest, "project_pump_curves").body.is_none());
    }

    #[test]
    fn duplicate_project_slug_is_error() {
        let tmp = setup_fixtures();
        let registry = fs::read_to_string(tmp.path().join("projects.toml")).unwrap();
        fs::write(
            tmp.path().join("projects.toml"),
            registry.replace("project_pump_curves", "project_tsp"),
        )
        .unwrap();
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::Registry(RegistryError::DuplicateSlug(_)))
        ));
    }

    #[test]
    fn posts_newest_first_with_undated_leading() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            post_slugs(&manifest),
            vec![
                "undated-thoughts",
                "draft-ideas",
                "cfd-with-python",
                "notes-on-heuristics"
            ]
        );
    }

    #[test]
    fn unpublished_post_kept_in_manifest_but_flagged() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert!(!find_post(&manifest, "draft-ideas").published);
        let published: Vec<&str> = manifest.published_posts().map(|p| p.slug.as_str()).collect();
        assert!(!published.contains(&"draft-ideas"));
        assert_eq!(published.len(), 3);
    }

    #[test]
    fn front_matter_fallbacks_applied() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let cfd = find_post(&manifest, "cfd-with-python");
        assert_eq!(cfd.title, "CFD post-processing with Python");
        assert_eq!(cfd.tags, vec!["python", "cfd"]);
        assert_eq!(cfd.image.as_deref(), Some("/blog/cfd-with-python/cover.svg"));
        assert_eq!(cfd.assets, vec!["cover.svg", "plots/contours.svg"]);

        let notes = find_post(&manifest, "notes-on-heuristics");
        assert_eq!(notes.title, "Notes on heuristics");
        assert_eq!(notes.tags, vec!["optimization", "python"]);
        assert!(notes.body.contains("**Travelling Salesman Heuristics**"));
        assert_eq!(notes.reading_time, "1 min read");

        assert_eq!(find_post(&manifest, "undated-thoughts").date, None);
    }

    #[test]
    fn broken_front_matter_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("blog/undated-thoughts/index.md"),
            "---\ntags: [oops\n---\n",
        )
        .unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Content(_))));
    }

    #[test]
    fn empty_content_dir_scans() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.home.is_none());
        assert!(manifest.categories.is_empty());
        assert!(manifest.posts.is_empty());
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            scan(&tmp.path().join("nope")),
            Err(ScanError::MissingRoot(_))
        ));
    }

    #[test]
    fn manifest_survives_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(post_slugs(&back), post_slugs(&manifest));
        assert_eq!(back.config.site.title, "Jane Doe");
    }

    // =========================================================================
    // Sitemap without a full scan
    // =========================================================================

    #[test]
    fn scan_sitemap_matches_full_scan() {
        let tmp = setup_fixtures();
        let entries = scan_sitemap(tmp.path(), chrono::Utc::now()).unwrap();
        assert_eq!(entries.len(), 3 + 4 + 3);
        assert_eq!(entries[0].url, "https://jane.dev");
        assert_eq!(entries[7].url, "https://jane.dev/blog/undated-thoughts");
    }

    #[test]
    fn scan_sitemap_survives_broken_post() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("blog/draft-ideas/index.md"),
            "---\ntitle: [unclosed\n---\nbody\n",
        )
        .unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Content(_))));

        let entries = scan_sitemap(tmp.path(), chrono::Utc::now()).unwrap();
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls.len(), 3 + 4);
        assert!(urls.contains(&"https://jane.dev/projects/project_tsp"));
        assert!(!urls.iter().any(|u| u.contains("/blog/")));
    }
}
