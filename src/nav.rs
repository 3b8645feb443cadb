//! Top-level section order and path classification.
//!
//! The site has exactly three top-level sections, always in this order:
//!
//! ```text
//! 0  /           Home
//! 1  /projects   Projects
//! 2  /blog       Blog
//! ```
//!
//! A path is classified by prefix, so nested routes (`/blog/some-post`,
//! `/projects/project_tsp`) belong to their parent section. The ordinal is what
//! the page transition uses to decide whether a navigation slides forward or
//! back, and what the nav bar uses to mark the active tab.

use serde::{Deserialize, Serialize};

/// One of the three top-level sections of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    Projects,
    Blog,
}

/// Fixed navigation order. Index 0 is the home route.
pub const NAVIGATION_ORDER: [Section; 3] = [Section::Home, Section::Projects, Section::Blog];

impl Section {
    /// Route prefix for this section.
    pub fn prefix(self) -> &'static str {
        match self {
            Section::Home => "/",
            Section::Projects => "/projects",
            Section::Blog => "/blog",
        }
    }

    /// Label shown on the nav bar tab.
    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Projects => "Projects",
            Section::Blog => "Blog",
        }
    }

    /// Position in [`NAVIGATION_ORDER`].
    pub fn index(self) -> usize {
        match self {
            Section::Home => 0,
            Section::Projects => 1,
            Section::Blog => 2,
        }
    }

    /// Classify a URL path. Blog is checked before projects; anything else is home.
    pub fn of_path(path: &str) -> Section {
        if path.starts_with(Section::Blog.prefix()) {
            Section::Blog
        } else if path.starts_with(Section::Projects.prefix()) {
            Section::Projects
        } else {
            Section::Home
        }
    }
}

/// Map a URL path to its ordinal in the navigation order.
///
/// Total over all strings: unknown paths resolve to home (0).
pub fn resolve_index(path: &str) -> usize {
    Section::of_path(path).index()
}

/// Slide direction for a transition between two paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Back,
}

impl Direction {
    /// `Back` only when the target sits strictly before the current section.
    pub fn between(current_path: &str, target_href: &str) -> Direction {
        if resolve_index(target_href) < resolve_index(current_path) {
            Direction::Back
        } else {
            Direction::Forward
        }
    }
}
