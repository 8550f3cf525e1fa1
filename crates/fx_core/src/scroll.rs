use shared::domain::{NodeId, ScrollBehavior};
use tracing::debug;

use crate::platform::Env;

/// Anchors that scroll in-page instead of navigating.
pub const IN_PAGE_ANCHOR: &str = r##".nav-link, a[href^="#"]"##;

pub struct ScrollManager {
    navbar: Option<NodeId>,
}

impl ScrollManager {
    pub fn new(env: &mut Env<'_>) -> Self {
        Self {
            navbar: env.dom.query(".navbar"),
        }
    }

    /// Returns true when the click landed on an in-page anchor, in which case
    /// the default navigation must be suppressed.
    pub fn handle_click(&self, env: &mut Env<'_>, target: NodeId) -> bool {
        let Some(anchor) = env.dom.closest(target, IN_PAGE_ANCHOR) else {
            return false;
        };
        let Some(href) = env.dom.attribute(anchor, "href") else {
            return true;
        };
        match resolve_target(env, &href) {
            Some(section) => self.scroll_to_section(env, section),
            None => debug!(%href, "anchor target not found"),
        }
        true
    }

    pub fn scroll_to_section(&self, env: &mut Env<'_>, section: NodeId) {
        let nav_height = self
            .navbar
            .map(|navbar| env.dom.offset_height(navbar))
            .unwrap_or(0.0);
        let top = env.dom.offset_top(section) - nav_height;
        debug!(top, "smooth scrolling to section");
        env.dom.scroll_to(top, ScrollBehavior::Smooth);
    }
}

fn resolve_target(env: &mut Env<'_>, href: &str) -> Option<NodeId> {
    // A bare "#" is not a usable selector.
    if href.len() < 2 || !href.starts_with('#') {
        return None;
    }
    env.dom.query(href)
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
