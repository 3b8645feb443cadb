//! Sitemap generation.
//!
//! The sitemap is rebuilt from scratch on every build and lists, in order:
//!
//! | Entries                 | URL                      | Priority | Frequency |
//! |-------------------------|--------------------------|----------|-----------|
//! | home                    | `<base>`                 | 1.0      | monthly   |
//! | blog index              | `<base>/blog`            | 0.8      | weekly    |
//! | projects index          | `<base>/projects`        | 0.8      | monthly   |
//! | one per project slug    | `<base>/projects/<slug>` | 0.6      | monthly   |
//! | one per published post  | `<base>/blog/<slug>`     | 0.7      | yearly    |
//!
//! Blog entries keep the content provider's order. A provider that cannot be
//! read contributes no entries; the rest of the sitemap is still produced.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use crate::config::SiteMeta;
use crate::content::ContentProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Monthly,
    Weekly,
    Yearly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Yearly => "yearly",
        })
    }
}

/// One crawlable URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    /// In `[0, 1]`.
    pub priority: f32,
}

/// Build the ordered sitemap: static, then projects, then published posts.
pub fn build_sitemap<P: ContentProvider + ?Sized>(
    site: &SiteMeta,
    project_slugs: &[&str],
    provider: &P,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let entry = |path: &str, change_frequency, priority| SitemapEntry {
        url: site.absolute(path),
        last_modified: now,
        change_frequency,
        priority,
    };

    let mut entries = vec![
        entry("/", ChangeFrequency::Monthly, 1.0),
        entry("/blog", ChangeFrequency::Weekly, 0.8),
        entry("/projects", ChangeFrequency::Monthly, 0.8),
    ];

    entries.extend(
        project_slugs
            .iter()
            .map(|slug| entry(&format!("/projects/{slug}"), ChangeFrequency::Monthly, 0.6)),
    );

    let posts = provider.all_posts().unwrap_or_else(|err| {
        log::warn!("sitemap: skipping blog posts: {err}");
        Vec::new()
    });
    entries.extend(posts.iter().filter(|p| p.published).map(|post| SitemapEntry {
        url: site.absolute(&format!("/blog/{}", post.slug)),
        last_modified: post
            .date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(now),
        change_frequency: ChangeFrequency::Yearly,
        priority: 0.7,
    }));

    entries
}

/// Render entries as sitemap XML.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.format("%Y-%m-%d")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Write `sitemap.xml` into `output_dir`.
pub fn write_sitemap(output_dir: &Path, entries: &[SitemapEntry]) -> std::io::Result<()> {
    fs::write(output_dir.join("sitemap.xml"), render_xml(entries))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
