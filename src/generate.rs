//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scan manifest and writes the final static
//! site. Nothing here parses front matter or TOML; that happened in
//! [`scan`](crate::scan).
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): intro from `home.md`, featured projects, latest posts
//! - **Projects** (`/projects/index.html`): project cards grouped by category
//! - **Project pages** (`/projects/{slug}/index.html`): write-up and related projects
//! - **Blog** (`/blog/index.html`): post cards with tag filter and search box
//! - **Posts** (`/blog/{slug}/index.html`): rendered markdown, assets copied alongside
//! - **Not found** (`/404.html`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── style.css                  # Color variables + static/style.css
//! ├── transitions.js             # Section slide transitions
//! ├── filter.js                  # Blog tag filter and search
//! ├── images/…                   # Copied from content/assets/
//! ├── projects/
//! │   ├── index.html
//! │   └── project_tsp/index.html
//! └── blog/
//!     ├── index.html
//!     └── cfd-with-python/
//!         ├── index.html
//!         └── cover.svg
//! ```
//!
//! ## Navigation
//!
//! Every page carries the same sliding nav bar. The active tab comes from
//! [`Section::of_path`], the same rule the transition script uses to pick a
//! slide direction, so a post under `/blog/…` highlights "Blog".
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Markdown
//! bodies go through [`markdown::to_html`] and are inserted pre-escaped.

use crate::config::{self, SiteConfig};
use crate::content::{ContentError, ContentProvider};
use crate::markdown;
use crate::nav::{NAVIGATION_ORDER, Section};
use crate::projects;
use crate::sitemap;
use crate::transition;
use crate::types::{Manifest, Post, Project, ProjectCategory};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Copying {path}: {source}")]
    Asset {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const FILTER_JS: &str = include_str!("../static/filter.js");

/// Number of posts shown on the home page.
const LATEST_POSTS: usize = 3;
/// Related projects shown under a project write-up.
const RELATED_PROJECTS: usize = 3;

/// Read `manifest.json` and generate the site into `output_dir`.
///
/// `source_dir` is the content root; post assets and `assets/` are copied
/// from there.
pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_dir, output_dir, Utc::now())
}

/// Render every page of `manifest` into `output_dir`.
pub fn generate_site(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    now: DateTime<Utc>,
) -> Result<(), GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets = StaticAssets::build(&manifest.config);
    assets.write(output_dir)?;
    copy_assets_dir(&source_dir.join("assets"), output_dir)?;

    let site = Site {
        config: &manifest.config,
        urls: &assets.urls,
        year: now.year(),
    };

    write_page(output_dir, "/", render_home(manifest, &site))?;
    write_page(output_dir, "/projects", render_projects_index(&manifest.categories, &site))?;
    for category in &manifest.categories {
        for project in &category.projects {
            let related = projects::related(&manifest.categories, &project.slug, RELATED_PROJECTS);
            let page = render_project_page(project, category, &related, &site);
            write_page(output_dir, &project_href(project), page)?;
        }
    }

    let published: Vec<&Post> = manifest.published_posts().collect();
    let tags = manifest.all_tags()?;
    write_page(output_dir, "/blog", render_blog_index(&published, &tags, &site))?;
    published.par_iter().try_for_each(|post| {
        write_page(output_dir, &post_href(post), render_post_page(post, &site))?;
        copy_post_assets(post, &source_dir.join("blog"), output_dir)
    })?;

    fs::write(
        output_dir.join("404.html"),
        render_not_found(&site).into_string(),
    )?;

    if manifest.config.sitemap.enable {
        let slugs = manifest.project_slugs();
        let entries = sitemap::build_sitemap(&manifest.config.site, &slugs, manifest, now);
        sitemap::write_sitemap(output_dir, &entries)?;
    }

    Ok(())
}

/// Write a page for a route, as `<route>/index.html`.
fn write_page(output_dir: &Path, route: &str, page: Markup) -> Result<(), GenerateError> {
    let dir = output_dir.join(route.trim_start_matches('/'));
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), page.into_string())?;
    Ok(())
}

fn copy_post_assets(post: &Post, blog_dir: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    let src_dir = blog_dir.join(&post.slug);
    let dst_dir = output_dir.join("blog").join(&post.slug);
    for asset in &post.assets {
        let src = src_dir.join(asset);
        let dst = dst_dir.join(asset);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&src, &dst).map_err(|source| GenerateError::Asset { path: src, source })?;
    }
    Ok(())
}

/// Copy `content/assets/` to the output root, preserving structure.
fn copy_assets_dir(assets_dir: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(());
    }
    for entry in walkdir::WalkDir::new(assets_dir).min_depth(1) {
        let entry = entry.map_err(|e| GenerateError::Asset {
            path: e.path().map(Path::to_path_buf).unwrap_or_default(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop")),
        })?;
        let Ok(rel) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            fs::copy(entry.path(), &dst).map_err(|source| GenerateError::Asset {
                path: entry.path().to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

fn project_href(project: &Project) -> String {
    format!("/projects/{}", project.slug)
}

fn post_href(post: &Post) -> String {
    format!("/blog/{}", post.slug)
}

// ============================================================================
// Static assets
// ============================================================================

/// Stylesheet and scripts shared by every page.
struct StaticAssets {
    css: String,
    transitions_js: String,
    urls: AssetUrls,
}

/// Fingerprinted URLs, so a rebuilt asset is never served stale.
struct AssetUrls {
    css: String,
    transitions_js: String,
    filter_js: String,
}

impl StaticAssets {
    fn build(config: &SiteConfig) -> Self {
        let css = format!(
            "{}\n\n{}",
            config::generate_color_css(&config.colors),
            CSS_STATIC
        );
        let transitions_js = transition::client_script(&config.transition);
        let urls = AssetUrls {
            css: format!("/style.css?v={}", fingerprint(&css)),
            transitions_js: format!("/transitions.js?v={}", fingerprint(&transitions_js)),
            filter_js: format!("/filter.js?v={}", fingerprint(FILTER_JS)),
        };
        Self {
            css,
            transitions_js,
            urls,
        }
    }

    fn write(&self, output_dir: &Path) -> std::io::Result<()> {
        fs::write(output_dir.join("style.css"), &self.css)?;
        fs::write(output_dir.join("transitions.js"), &self.transitions_js)?;
        fs::write(output_dir.join("filter.js"), FILTER_JS)
    }
}

/// First 8 hex digits of the SHA-256 of `content`.
fn fingerprint(content: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
    digest[..8].to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Everything a page template needs besides its own data.
struct Site<'a> {
    config: &'a SiteConfig,
    urls: &'a AssetUrls,
    year: i32,
}

/// Per-page metadata for `<head>`.
struct PageMeta<'a> {
    /// Page title without the site suffix; `None` on the home page.
    title: Option<&'a str>,
    description: &'a str,
    /// Site-relative route, used for the canonical URL and active nav tab.
    path: &'a str,
}

/// Renders the base HTML document structure
fn base_document(site: &Site, page: &PageMeta, content: Markup) -> Markup {
    let site_title = site.config.site.title.as_str();
    let full_title = match page.title {
        Some(t) => format!("{t} | {site_title}"),
        None => site_title.to_string(),
    };
    let canonical = site.config.site.absolute(page.path);
    let author = Some(site.config.site.author.as_str()).filter(|a| !a.is_empty());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta name="description" content=(page.description);
                @if let Some(author) = author {
                    meta name="author" content=(author);
                }
                link rel="canonical" href=(canonical);
                meta property="og:title" content=(full_title);
                meta property="og:description" content=(page.description);
                meta property="og:url" content=(canonical);
                @if site.config.sitemap.enable {
                    link rel="sitemap" type="application/xml" href="/sitemap.xml";
                }
                link rel="stylesheet" href=(site.urls.css);
                script defer src=(site.urls.transitions_js) {}
                script defer src=(site.urls.filter_js) {}
            }
            body {
                (site_header(site, page.path))
                (content)
                (site_footer(site))
            }
        }
    }
}

/// Renders the site header: title link and sliding nav bar
fn site_header(site: &Site, current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" data-nav { (site.config.site.title) }
            (render_nav(current_path))
        }
    }
}

/// Renders the sliding section nav. The indicator sits under the active tab.
pub fn render_nav(current_path: &str) -> Markup {
    let active = Section::of_path(current_path);
    let indicator = format!("--active-index: {};", active.index());

    html! {
        nav.site-nav style=(indicator) {
            ul {
                @for section in NAVIGATION_ORDER {
                    @let is_active = section == active;
                    li {
                        a.nav-tab.active[is_active]
                            href=(section.prefix())
                            aria-current=[is_active.then_some("page")]
                            data-nav {
                            (section.label())
                        }
                    }
                }
            }
            span.nav-indicator aria-hidden="true" {}
        }
    }
}

fn site_footer(site: &Site) -> Markup {
    let author = site.config.site.author.as_str();
    let owner = if author.is_empty() {
        site.config.site.title.as_str()
    } else {
        author
    };
    html! {
        footer.site-footer {
            p { "© " (site.year) " " (owner) }
            @if site.config.sitemap.enable {
                a href="/sitemap.xml" { "Sitemap" }
            }
        }
    }
}

fn project_card(project: &Project) -> Markup {
    html! {
        a.project-card href=(project_href(project)) data-nav {
            @if let Some(image) = &project.image {
                img src=(image) alt=(project.name) loading="lazy";
            }
            div.card-body {
                h3 { (project.name) }
                p { (project.description) }
                (project_meta(project))
                (tag_list(&project.tags))
            }
        }
    }
}

fn project_meta(project: &Project) -> Markup {
    html! {
        @if project.year.is_some() || project.duration.is_some() {
            p.card-meta {
                @if let Some(year) = project.year { span { (year) } }
                @if let Some(duration) = &project.duration { span { (duration) } }
            }
        }
    }
}

fn post_card(post: &Post) -> Markup {
    let search = format!("{} {} {}", post.title, post.description, post.tags.join(" ")).to_lowercase();
    html! {
        a.post-card href=(post_href(post)) data-nav
            data-tags=(post.tags.join("|")) data-search=(search) {
            @if let Some(image) = &post.image {
                img src=(image) alt=(post.title) loading="lazy";
            }
            div.card-body {
                h3 { (post.title) }
                @if !post.description.is_empty() {
                    p { (post.description) }
                }
                (post_meta(post))
                (tag_list(&post.tags))
            }
        }
    }
}

fn post_meta(post: &Post) -> Markup {
    html! {
        p.card-meta {
            @if let Some(date) = post.date {
                time datetime=(date.format("%Y-%m-%d").to_string()) { (display_date(date)) }
            }
            span { (post.reading_time) }
        }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags { li.tag { (tag) } }
            }
        }
    }
}

fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page: intro, featured projects, latest posts
fn render_home(manifest: &Manifest, site: &Site) -> Markup {
    let meta = &site.config.site;
    let featured = projects::featured(&manifest.categories);
    let latest: Vec<&Post> = manifest.published_posts().take(LATEST_POSTS).collect();

    let content = html! {
        main.home-page {
            section.intro {
                @match &manifest.home {
                    Some(home) => (PreEscaped(markdown::to_html(&home.body))),
                    None => {
                        h1 { (meta.title) }
                        p { (meta.description) }
                    }
                }
            }
            @if !featured.is_empty() {
                section.featured {
                    h2 { "Featured projects" }
                    div.project-grid {
                        @for project in &featured { (project_card(project)) }
                    }
                    a.more href="/projects" data-nav { "All projects →" }
                }
            }
            @if !latest.is_empty() {
                section.latest {
                    h2 { "Latest posts" }
                    div.post-grid {
                        @for post in &latest { (post_card(post)) }
                    }
                    a.more href="/blog" data-nav { "All posts →" }
                }
            }
        }
    };

    let page = PageMeta {
        title: None,
        description: &meta.description,
        path: "/",
    };
    base_document(site, &page, content)
}

/// Renders the projects page with one section per category
fn render_projects_index(categories: &[ProjectCategory], site: &Site) -> Markup {
    let content = html! {
        main.projects-page {
            h1 { "Projects" }
            @for category in categories {
                section.category id=(category.id) {
                    h2 { (category.name) }
                    @if let Some(desc) = &category.description {
                        p.category-description { (desc) }
                    }
                    div.project-grid {
                        @for project in &category.projects { (project_card(project)) }
                    }
                }
            }
        }
    };

    let page = PageMeta {
        title: Some("Projects"),
        description: "Selected projects.",
        path: "/projects",
    };
    base_document(site, &page, content)
}

/// Renders a project write-up with related projects
fn render_project_page(
    project: &Project,
    category: &ProjectCategory,
    related: &[&Project],
    site: &Site,
) -> Markup {
    let href = project_href(project);
    let content = html! {
        main.project-page {
            article.project {
                header.project-header {
                    p.eyebrow { a href="/projects" data-nav { (category.name) } }
                    h1 { (project.name) }
                    p.lead { (project.description) }
                    (project_meta(project))
                    (tag_list(&project.tags))
                }
                @if let Some(image) = &project.image {
                    img.cover src=(image) alt=(project.name);
                }
                @if let Some(body) = &project.body {
                    div.prose { (PreEscaped(markdown::to_html(body))) }
                }
            }
            @if !related.is_empty() {
                section.related {
                    h2 { "Related projects" }
                    div.project-grid {
                        @for other in related { (project_card(other)) }
                    }
                }
            }
        }
    };

    let page = PageMeta {
        title: Some(project.name.as_str()),
        description: &project.description,
        path: &href,
    };
    base_document(site, &page, content)
}

/// Renders the blog index with tag filter buttons and a search box
fn render_blog_index(posts: &[&Post], tags: &[String], site: &Site) -> Markup {
    let count = format!("{} posts", posts.len());

    let content = html! {
        main.blog-page {
            h1 { "Blog" }
            div.post-filters {
                input #post-search type="search" placeholder="Search posts…" aria-label="Search posts";
                @if !tags.is_empty() {
                    div.tag-filter role="group" aria-label="Filter by tag" {
                        button.tag-button.active type="button" data-tag="" { "All" }
                        @for tag in tags {
                            button.tag-button type="button" data-tag=(tag) { (tag) }
                        }
                    }
                }
            }
            p #post-count aria-live="polite" { (count) }
            div.post-grid {
                @for post in posts { (post_card(post)) }
            }
            div #no-posts hidden {
                p { "No posts match." }
                button type="button" data-clear-filters { "Clear filters" }
            }
        }
    };

    let page = PageMeta {
        title: Some("Blog"),
        description: "Notes and articles.",
        path: "/blog",
    };
    base_document(site, &page, content)
}

/// Renders a blog post
fn render_post_page(post: &Post, site: &Site) -> Markup {
    let href = post_href(post);
    let content = html! {
        main.post-page {
            article.post {
                header.post-header {
                    a.back href="/blog" data-nav { "← All posts" }
                    h1 { (post.title) }
                    (post_meta(post))
                    @if !post.tags.is_empty() {
                        ul.tags {
                            @for tag in &post.tags {
                                li.tag { a href={ "/blog?tag=" (tag) } { (tag) } }
                            }
                        }
                    }
                }
                @if let Some(image) = &post.image {
                    img.cover src=(image) alt=(post.title);
                }
                div.prose { (PreEscaped(markdown::to_html(&post.body))) }
            }
        }
    };

    let page = PageMeta {
        title: Some(post.title.as_str()),
        description: &post.description,
        path: &href,
    };
    base_document(site, &page, content)
}

fn render_not_found(site: &Site) -> Markup {
    let content = html! {
        main.not-found-page {
            h1 { "Page not found" }
            p { "The page you were looking for does not exist." }
            ul {
                @for section in NAVIGATION_ORDER {
                    li { a href=(section.prefix()) data-nav { (section.label()) } }
                }
            }
        }
    };

    let page = PageMeta {
        title: Some("Not found"),
        description: "Page not found.",
        path: "/404.html",
    };
    base_document(site, &page, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use crate::test_helpers::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn test_urls() -> AssetUrls {
        AssetUrls {
            css: "/style.css?v=0".to_string(),
            transitions_js: "/transitions.js?v=0".to_string(),
            filter_js: "/filter.js?v=0".to_string(),
        }
    }

    fn post(slug: &str, title: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            description: "About things".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 10),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
            reading_time: "2 min read".to_string(),
            published: true,
            body: "Hello **world**".to_string(),
            assets: vec![],
        }
    }

    fn build_fixture_site() -> (TempDir, TempDir) {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        generate_site(&manifest, content.path(), out.path(), now()).unwrap();
        (content, out)
    }

    fn read(out: &TempDir, rel: &str) -> String {
        fs::read_to_string(out.path().join(rel))
            .unwrap_or_else(|e| panic!("reading {rel}: {e}"))
    }

    // =========================================================================
    // Component tests
    // =========================================================================

    #[test]
    fn nav_marks_active_section() {
        let html = render_nav("/blog/some-post").into_string();
        assert!(html.contains(r#"class="nav-tab active" href="/blog""#));
        assert!(html.contains("--active-index: 2;"));
        assert_eq!(html.matches("active").count(), 2); // class + css variable
    }

    #[test]
    fn nav_unknown_path_is_home() {
        let html = render_nav("/about").into_string();
        assert!(html.contains(r#"class="nav-tab active" href="/""#));
        assert!(html.contains("--active-index: 0;"));
    }

    #[test]
    fn nav_tabs_in_order() {
        let html = render_nav("/").into_string();
        let home = html.find(">Home<").unwrap();
        let projects = html.find(">Projects<").unwrap();
        let blog = html.find(">Blog<").unwrap();
        assert!(home < projects && projects < blog);
    }

    #[test]
    fn base_document_head() {
        let config = SiteConfig::default();
        let urls = test_urls();
        let site = Site {
            config: &config,
            urls: &urls,
            year: 2025,
        };
        let page = PageMeta {
            title: Some("Blog"),
            description: "Notes",
            path: "/blog",
        };
        let doc = base_document(&site, &page, html! { main { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Blog | Portfolio</title>"));
        assert!(doc.contains(r#"<link rel="canonical" href="https://example.com/blog">"#));
        assert!(doc.contains(r#"href="/style.css?v=0""#));
        assert!(doc.contains(r#"src="/transitions.js?v=0""#));
        assert!(doc.contains("© 2025 Portfolio"));
    }

    #[test]
    fn post_card_carries_filter_data() {
        let html = post_card(&post("p", "Rust & CFD", &["rust", "cfd"])).into_string();
        assert!(html.contains(r#"data-tags="rust|cfd""#));
        assert!(html.contains(r#"data-search="rust &amp; cfd about things rust cfd""#));
        assert!(html.contains("March 10, 2024"));
    }

    #[test]
    fn html_escape_in_maud() {
        let html = post_card(&post("p", "<script>alert('xss')</script>", &[])).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn fingerprint_is_short_and_stable() {
        assert_eq!(fingerprint("a"), fingerprint("a"));
        assert_ne!(fingerprint("a"), fingerprint("b"));
        assert_eq!(fingerprint("a").len(), 8);
    }

    // =========================================================================
    // Full site tests
    // =========================================================================

    #[test]
    fn writes_every_page() {
        let (_content, out) = build_fixture_site();
        for rel in [
            "index.html",
            "404.html",
            "sitemap.xml",
            "style.css",
            "transitions.js",
            "filter.js",
            "projects/index.html",
            "projects/project_tsp/index.html",
            "projects/Project_MoviesSoftware/index.html",
            "projects/project_volute_fillet/index.html",
            "projects/project_pump_curves/index.html",
            "blog/index.html",
            "blog/cfd-with-python/index.html",
            "blog/notes-on-heuristics/index.html",
            "blog/undated-thoughts/index.html",
        ] {
            assert!(out.path().join(rel).is_file(), "missing {rel}");
        }
    }

    #[test]
    fn unpublished_post_not_generated() {
        let (_content, out) = build_fixture_site();
        assert!(!out.path().join("blog/draft-ideas").exists());
        assert!(!read(&out, "blog/index.html").contains("Draft ideas"));
        assert!(!read(&out, "sitemap.xml").contains("draft-ideas"));
    }

    #[test]
    fn post_assets_copied() {
        let (_content, out) = build_fixture_site();
        assert!(out.path().join("blog/cfd-with-python/cover.svg").is_file());
        assert!(out.path().join("blog/cfd-with-python/plots/contours.svg").is_file());
        assert!(!out.path().join("blog/cfd-with-python/index.md").exists());
    }

    #[test]
    fn content_assets_copied_to_root() {
        let (_content, out) = build_fixture_site();
        assert!(out.path().join("images/tsp.svg").is_file());
    }

    #[test]
    fn home_shows_intro_featured_and_latest() {
        let (_content, out) = build_fixture_site();
        let html = read(&out, "index.html");
        assert!(html.contains("<title>Jane Doe</title>"));
        assert!(html.contains("Hi, I&#x27;m Jane") || html.contains("Hi, I'm Jane"));
        assert!(html.contains("Volute Fillet Optimization"));
        assert!(html.contains("Travelling Salesman Heuristics"));
        assert!(!html.contains("Pump Curve Digitizer"));
        assert!(html.contains("CFD post-processing with Python"));
    }

    #[test]
    fn projects_page_orders_categories() {
        let (_content, out) = build_fixture_site();
        let html = read(&out, "projects/index.html");
        let industry = html.find("Industry Projects").unwrap();
        let academic = html.find("Academic Projects").unwrap();
        assert!(industry < academic);
        assert!(html.contains(r#"class="nav-tab active" href="/projects""#));
    }

    #[test]
    fn project_page_renders_write_up_and_related() {
        let (_content, out) = build_fixture_site();
        let html = read(&out, "projects/project_tsp/index.html");
        assert!(html.contains("<h2>What worked</h2>"));
        assert!(html.contains("Related projects"));
        assert!(html.contains(r#"href="/projects/Project_MoviesSoftware""#));
        assert!(html.contains(r#"href="/projects/project_volute_fillet""#));
        assert!(
            html.contains(r#"<link rel="canonical" href="https://jane.dev/projects/project_tsp">"#)
        );
    }

    #[test]
    fn blog_index_has_filters() {
        let (_content, out) = build_fixture_site();
        let html = read(&out, "blog/index.html");
        assert!(html.contains(r#"id="post-search""#));
        assert!(html.contains(r#"data-tag="cfd""#));
        assert!(html.contains(r#"data-tag="optimization""#));
        assert!(!html.contains(r#"data-tag="blog""#));
        assert!(!html.contains(r#"data-tag="secret""#));
        assert!(html.contains("3 posts"));
    }

    #[test]
    fn post_page_renders_markdown_and_note_syntax() {
        let (_content, out) = build_fixture_site();
        let html = read(&out, "blog/cfd-with-python/index.html");
        assert!(html.contains(r#"<img src="/blog/cfd-with-python/plots/contours.svg""#));
        assert!(html.contains("<strong>Pump Curve Digitizer</strong>"));
        assert!(html.contains("March 10, 2024"));
        assert!(html.contains(r#"class="nav-tab active" href="/blog""#));
        assert!(html.contains(r#"href="/blog?tag=python""#));
    }

    #[test]
    fn stylesheet_has_configured_colors() {
        let (_content, out) = build_fixture_site();
        let css = read(&out, "style.css");
        assert!(css.contains("--color-bg"));
        assert!(css.contains(".back-transition"));
    }

    #[test]
    fn sitemap_lists_projects_and_posts() {
        let (_content, out) = build_fixture_site();
        let xml = read(&out, "sitemap.xml");
        assert_eq!(xml.matches("<url>").count(), 3 + 4 + 3);
        assert!(xml.contains("<loc>https://jane.dev/projects/project_tsp</loc>"));
        assert!(xml.contains("<loc>https://jane.dev/blog/cfd-with-python</loc>"));

        let undated = xml.find("/blog/undated-thoughts</loc>").unwrap();
        let dated = xml.find("/blog/cfd-with-python</loc>").unwrap();
        assert!(undated < dated);
    }

    #[test]
    fn sitemap_can_be_disabled() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let mut manifest = scan::scan(content.path()).unwrap();
        manifest.config.sitemap.enable = false;
        generate_site(&manifest, content.path(), out.path(), now()).unwrap();
        assert!(!out.path().join("sitemap.xml").exists());
        assert!(!read(&out, "index.html").contains("/sitemap.xml"));
    }

    #[test]
    fn generate_reads_manifest_json() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let manifest_path = content.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        generate(&manifest_path, content.path(), out.path()).unwrap();
        assert!(out.path().join("blog/notes-on-heuristics/index.html").is_file());
    }

    #[test]
    fn missing_post_asset_is_error() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        fs::remove_file(content.path().join("blog/cfd-with-python/cover.svg")).unwrap();
        let err = generate_site(&manifest, content.path(), out.path(), now()).unwrap_err();
        assert!(matches!(err, GenerateError::Asset { .. }));
    }
}
