//! # Folio
//!
//! A static site generator for a personal portfolio and blog. A content
//! directory holds the site config, a project registry, project write-ups
//! and blog posts with YAML front matter; folio turns it into a plain HTML
//! site with three top-level sections (home, projects, blog), a sitemap and a
//! small page transition script.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON: if a page looks wrong, the manifest
//! shows whether scanning or rendering is at fault.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads config, home page, project registry and blog posts into a manifest |
//! | [`generate`] | Stage 2: renders every page with Maud, writes stylesheet, scripts and sitemap |
//! | [`config`] | `config.toml` loading, validation, merging over stock defaults, color CSS |
//! | [`types`] | Shared types serialized between stages (`Manifest`, `Post`, `Project`) |
//! | [`content`] | `ContentProvider` trait and the on-disk blog directory provider |
//! | [`frontmatter`] | YAML front matter splitting and post field fallbacks |
//! | [`markdown`] | Note-syntax rewriting, reading time, HTML rendering |
//! | [`projects`] | `projects.toml` registry, featured and related projects |
//! | [`nav`] | Section order and the path → section index resolver |
//! | [`transition`] | Page transition coordinator and its browser-side script |
//! | [`sitemap`] | Sitemap entries and XML |
//! | [`output`] | CLI output formatting for both stages |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Templates are Rust expressions, interpolation is escaped by
//! default and there is no template directory to ship.
//!
//! ## One Source for Section Order
//!
//! [`nav::NAVIGATION_ORDER`] drives the nav bar, the active tab, the slide
//! direction of page transitions and the generated `transitions.js`. A page
//! under `/blog/…` is always "blog" everywhere.
//!
//! ## Registry Instead of Hardcoded Slugs
//!
//! Project slugs come from `projects.toml`. The projects page, project pages,
//! related-project suggestions and the sitemap all read the same list.

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod nav;
pub mod output;
pub mod projects;
pub mod scan;
pub mod sitemap;
pub mod transition;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
