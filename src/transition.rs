//! Page transitions between top-level sections.
//!
//! Navigating from one section to another slides the page left or right. The
//! direction comes from [`nav::resolve_index`](crate::nav::resolve_index):
//! moving to an earlier section (blog → projects, projects → home) slides
//! back, everything else slides forward. The back direction is signalled to
//! CSS by a `back-transition` class on the document root, which must be
//! present for exactly as long as a backward transition is running.
//!
//! [`TransitionCoordinator`] owns that sequencing against a [`Browser`]:
//!
//! ```text
//! Idle ──navigate──► Transitioning { direction }
//!   ▲                    │  set marker (back only)
//!   │                    │  start view transition
//!   │                    │    └─ update: push route, settle delay
//!   │                    │  await finished (Ok or Err)
//!   └────────────────────┘  clear marker (always, via guard)
//! ```
//!
//! A second `navigate` while one is in flight is rejected with
//! [`NavigateError::Busy`]. A transition that fails after the route was pushed
//! is logged and reported as [`NavigateOutcome::Failed`]; the navigation itself
//! already happened.
//!
//! The generated site runs the same algorithm in the browser; [`client_script`]
//! emits it with the configured timings.

use crate::config::TransitionConfig;
use crate::nav::{Direction, NAVIGATION_ORDER, Section};
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Class put on the document root during a backward transition.
pub const BACK_MARKER_CLASS: &str = "back-transition";

/// The route update run inside a view transition.
pub type Update<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// The view transition's completion signal rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("view transition failed: {0}")]
pub struct TransitionFailed(pub String);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateError {
    #[error("a {in_flight:?} transition is already in progress")]
    Busy { in_flight: Direction },
}

/// How a navigation was carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// No view transition support; navigated without animation.
    Plain,
    /// Animated navigation finished.
    Completed { direction: Direction },
    /// Navigated, but the animation's completion rejected.
    Failed {
        direction: Direction,
        reason: TransitionFailed,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Transitioning { direction: Direction },
}

/// The browser capabilities a transition needs.
///
/// Single-threaded: implementations are expected to use interior mutability,
/// the way DOM handles do.
pub trait Browser {
    /// Whether animated view transitions are available.
    fn supports_view_transitions(&self) -> bool;

    /// Push a new route. Opaque side effect.
    fn push(&self, href: &str);

    /// Add or remove [`BACK_MARKER_CLASS`] on the document root.
    fn set_back_marker(&self, present: bool);

    /// Wait `delay` so the new content can start rendering.
    fn settle(&self, delay: Duration) -> impl Future<Output = ()>;

    /// Run `update` inside a view transition and resolve once the transition
    /// has finished.
    fn start_view_transition<'a>(
        &'a self,
        update: Update<'a>,
    ) -> impl Future<Output = Result<(), TransitionFailed>> + 'a;
}

/// Sequences view transitions around navigations. One in flight at a time.
pub struct TransitionCoordinator<B> {
    browser: B,
    settle_delay: Duration,
    state: Cell<TransitionState>,
}

impl<B: Browser> TransitionCoordinator<B> {
    pub fn new(browser: B, settle_delay: Duration) -> Self {
        Self {
            browser,
            settle_delay,
            state: Cell::new(TransitionState::Idle),
        }
    }

    pub fn from_config(browser: B, config: &TransitionConfig) -> Self {
        Self::new(browser, config.settle_delay())
    }

    pub fn state(&self) -> TransitionState {
        self.state.get()
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Navigate to `target_href` from `current_path`, animating when possible.
    pub async fn navigate(
        &self,
        target_href: &str,
        current_path: &str,
    ) -> Result<NavigateOutcome, NavigateError> {
        let direction = Direction::between(current_path, target_href);

        if !self.browser.supports_view_transitions() {
            self.browser.push(target_href);
            return Ok(NavigateOutcome::Plain);
        }

        if let TransitionState::Transitioning { direction } = self.state.get() {
            return Err(NavigateError::Busy {
                in_flight: direction,
            });
        }

        let _active = ActiveTransition::enter(&self.browser, &self.state, direction);

        let browser = &self.browser;
        let settle_delay = self.settle_delay;
        let update: Update<'_> = Box::pin(async move {
            browser.push(target_href);
            browser.settle(settle_delay).await;
        });

        match self.browser.start_view_transition(update).await {
            Ok(()) => Ok(NavigateOutcome::Completed { direction }),
            Err(reason) => {
                log::warn!("transition to {target_href} ({direction:?}): {reason}");
                Ok(NavigateOutcome::Failed { direction, reason })
            }
        }
    }
}

/// Holds the marker and the `Transitioning` state; releases both on drop,
/// including when the navigate future is dropped or unwinds.
struct ActiveTransition<'a, B: Browser> {
    browser: &'a B,
    state: &'a Cell<TransitionState>,
}

impl<'a, B: Browser> ActiveTransition<'a, B> {
    fn enter(browser: &'a B, state: &'a Cell<TransitionState>, direction: Direction) -> Self {
        browser.set_back_marker(direction == Direction::Back);
        state.set(TransitionState::Transitioning { direction });
        Self { browser, state }
    }
}

impl<B: Browser> Drop for ActiveTransition<'_, B> {
    fn drop(&mut self) {
        self.browser.set_back_marker(false);
        self.state.set(TransitionState::Idle);
    }
}

// ============================================================================
// Client script
// ============================================================================

/// Browser-side transition script for the generated site.
///
/// Links marked `data-nav` are intercepted. The target page is fetched and its
/// `<main>` and nav bar swapped in inside `document.startViewTransition`.
/// Without view transition support the link is followed normally.
pub fn client_script(config: &TransitionConfig) -> String {
    let order = NAVIGATION_ORDER
        .iter()
        .map(|s| format!("{:?}", s.prefix()))
        .collect::<Vec<_>>()
        .join(", ");

    let index_checks = NAVIGATION_ORDER
        .iter()
        .rev()
        .filter(|s| **s != Section::Home)
        .map(|s| {
            format!(
                "    if (path.startsWith({:?})) return {};\n",
                s.prefix(),
                s.index()
            )
        })
        .collect::<String>();

    format!(
        r#"(() => {{
  const PAGE_ORDER = [{order}];
  const SETTLE_MS = {settle};
  const FALLBACK_MS = {fallback};
  const BACK_CLASS = "{marker}";
  let transitioning = false;

  function pageIndex(path) {{
{index_checks}    return 0;
  }}

  const sleep = (ms) => new Promise((resolve) => setTimeout(resolve, ms));

  async function swap(href) {{
    const res = await fetch(href);
    if (!res.ok) throw new Error("HTTP " + res.status);
    const doc = new DOMParser().parseFromString(await res.text(), "text/html");
    const main = doc.querySelector("main");
    if (!main) throw new Error("no <main> in " + href);
    document.title = doc.title;
    document.querySelector("main").replaceWith(main);
    const nav = doc.querySelector(".site-nav");
    const currentNav = document.querySelector(".site-nav");
    if (nav && currentNav) currentNav.replaceWith(nav);
    window.scrollTo(0, 0);
    document.dispatchEvent(new CustomEvent("folio:swapped"));
  }}

  async function push(href) {{
    const swapped = swap(href).then(() => history.pushState({{}}, "", href));
    swapped.catch(() => location.assign(href));
    await Promise.race([swapped.catch(() => {{}}), sleep(FALLBACK_MS)]);
  }}

  async function navigate(href, currentPath) {{
    if (!document.startViewTransition) {{
      location.assign(href);
      return;
    }}
    if (transitioning) return;
    const root = document.documentElement;
    root.classList.toggle(BACK_CLASS, pageIndex(href) < pageIndex(currentPath));
    transitioning = true;
    try {{
      const transition = document.startViewTransition(async () => {{
        await push(href);
        await sleep(SETTLE_MS);
      }});
      await transition.finished;
    }} catch (err) {{
      console.warn("page transition failed", err);
    }} finally {{
      root.classList.remove(BACK_CLASS);
      transitioning = false;
    }}
  }}

  document.addEventListener("click", (event) => {{
    const link = event.target.closest("a[data-nav]");
    if (!link || event.defaultPrevented || event.button !== 0) return;
    if (event.metaKey || event.ctrlKey || event.shiftKey || event.altKey) return;
    const url = new URL(link.href, location.href);
    if (url.origin !== location.origin) return;
    event.preventDefault();
    if (url.pathname !== location.pathname) navigate(url.pathname, location.pathname);
  }});

  window.addEventListener("popstate", () => location.reload());
  window.folioPageOrder = PAGE_ORDER;
}})();
"#,
        settle = config.settle_ms,
        fallback = config.fallback_ms,
        marker = BACK_MARKER_CLASS,
    )
}
