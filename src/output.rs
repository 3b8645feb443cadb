//! CLI output formatting for the scan and generate stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity
//! (category, project, post) leads with its positional index and title; the
//! file it came from or the page it produced is secondary context on an
//! indented line or after an arrow.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Home
//!     Hi, I'm Jane
//!         Source: home.md
//!
//! Projects
//! 001 Industry Projects (2 projects)
//!     001 Volute Fillet Optimization (featured)
//!     002 Pump Curve Digitizer
//! 002 Academic Projects (2 projects)
//!     001 Travelling Salesman Heuristics (featured)
//!         Source: projects/project_tsp.md
//!
//! Posts
//! 001 Undated thoughts
//!     undated · 1 min read
//!     Source: blog/undated-thoughts/
//! 002 Draft ideas (unpublished)
//!     2025-01-15 · 1 min read
//!     Source: blog/draft-ideas/
//! 003 CFD post-processing with Python
//!     2024-03-10 · 1 min read
//!     Source: blog/cfd-with-python/
//!     Assets: 2 files
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Projects → projects/index.html
//!     001 Volute Fillet Optimization → projects/project_volute_fillet/index.html
//! Blog → blog/index.html
//!     001 Undated thoughts → blog/undated-thoughts/index.html
//!     002 CFD post-processing with Python → blog/cfd-with-python/index.html
//! Not found → 404.html
//! Sitemap → sitemap.xml (10 URLs)
//!
//! Generated 4 project pages, 3 posts (1 unpublished skipped)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure
//! apart from checking which optional source files exist.

use crate::types::{Manifest, Post};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a count: `1 post`, `3 posts`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn post_detail(post: &Post) -> String {
    match post.date {
        Some(date) => format!("{} \u{b7} {}", date.format("%Y-%m-%d"), post.reading_time),
        None => format!("undated \u{b7} {}", post.reading_time),
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing discovered content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(home) = &manifest.home {
        lines.push("Home".to_string());
        lines.push(format!("{}{}", indent(1), home.title));
        lines.push(format!("{}Source: home.md", indent(2)));
        lines.push(String::new());
    }

    lines.push("Projects".to_string());
    for (i, category) in manifest.categories.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            category.name,
            count(category.projects.len(), "project")
        ));
        for (j, project) in category.projects.iter().enumerate() {
            let marker = if project.featured { " (featured)" } else { "" };
            lines.push(format!(
                "{}{} {}{}",
                indent(1),
                format_index(j + 1),
                project.name,
                marker
            ));
            if project.body.is_some() {
                lines.push(format!("{}Source: projects/{}.md", indent(2), project.slug));
            }
        }
    }

    lines.push(String::new());
    lines.push("Posts".to_string());
    for (i, post) in manifest.posts.iter().enumerate() {
        let marker = if post.published { "" } else { " (unpublished)" };
        lines.push(format!("{} {}{}", format_index(i + 1), post.title, marker));
        lines.push(format!("{}{}", indent(1), post_detail(post)));
        lines.push(format!("{}Source: blog/{}/", indent(1), post.slug));
        if !post.assets.is_empty() {
            lines.push(format!("{}Assets: {}", indent(1), count(post.assets.len(), "file")));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join("assets").is_dir() {
        lines.push(format!("{}assets/", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing the pages written.
///
/// Each entity leads with its positional index and title, followed by `→`
/// and the output path.
pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Home \u{2192} index.html".to_string());

    lines.push("Projects \u{2192} projects/index.html".to_string());
    let mut project_count = 0;
    for (i, project) in manifest.projects().enumerate() {
        lines.push(format!(
            "{}{} {} \u{2192} projects/{}/index.html",
            indent(1),
            format_index(i + 1),
            project.name,
            project.slug
        ));
        project_count += 1;
    }

    lines.push("Blog \u{2192} blog/index.html".to_string());
    let mut post_count = 0;
    for (i, post) in manifest.published_posts().enumerate() {
        lines.push(format!(
            "{}{} {} \u{2192} blog/{}/index.html",
            indent(1),
            format_index(i + 1),
            post.title,
            post.slug
        ));
        post_count += 1;
    }

    lines.push("Not found \u{2192} 404.html".to_string());
    if manifest.config.sitemap.enable {
        let urls = 3 + project_count + post_count;
        lines.push(format!("Sitemap \u{2192} sitemap.xml ({urls} URLs)"));
    }

    let skipped = manifest.posts.len() - post_count;
    let mut summary = format!(
        "Generated {}, {}",
        count(project_count, "project page"),
        count(post_count, "post")
    );
    if skipped > 0 {
        summary.push_str(&format!(" ({skipped} unpublished skipped)"));
    }
    lines.push(String::new());
    lines.push(summary);

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}
