//! Mobile menu state, active-link tracking and navbar restyling.

use shared::domain::{NodeId, Theme};
use tracing::debug;

use crate::{
    config::Settings,
    platform::Env,
    theme::THEME_ATTRIBUTE,
};

pub const ACTIVE_CLASS: &str = "active";
pub const KEYBOARD_NAVIGATION_CLASS: &str = "keyboard-navigation";

const DARK_NAVBAR_BACKGROUND: &str = "rgba(15, 23, 42, 0.95)";
const LIGHT_NAVBAR_BACKGROUND: &str = "rgba(255, 255, 255, 0.95)";

/// Per-bar styles: (bar index, property, open value, closed value).
const HAMBURGER_BARS: [(usize, &str, &str, &str); 3] = [
    (0, "transform", "rotate(-45deg) translate(-5px, 6px)", "none"),
    (1, "opacity", "0", "1"),
    (2, "transform", "rotate(45deg) translate(-5px, -6px)", "none"),
];

pub struct NavigationManager {
    menu_open: bool,
    navbar: Option<NodeId>,
    hamburger: Option<NodeId>,
    menu: Option<NodeId>,
    links: Vec<NodeId>,
    sections: Vec<NodeId>,
    active_link_offset: f64,
}

impl NavigationManager {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let manager = Self {
            menu_open: false,
            navbar: env.dom.query(".navbar"),
            hamburger: env.dom.query(".hamburger"),
            menu: env.dom.query(".nav-menu"),
            links: env.dom.query_all(".nav-link"),
            sections: env.dom.query_all("section"),
            active_link_offset: settings.active_link_offset,
        };
        manager.restyle_navbar(env);
        manager
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self, env: &mut Env<'_>) {
        if self.menu_open {
            self.close_menu(env);
        } else {
            self.open_menu(env);
        }
    }

    pub fn open_menu(&mut self, env: &mut Env<'_>) {
        self.set_menu_classes(env, true);
        self.animate_hamburger(env, true);
        self.menu_open = true;
        debug!("menu opened");
    }

    pub fn close_menu(&mut self, env: &mut Env<'_>) {
        self.set_menu_classes(env, false);
        self.animate_hamburger(env, false);
        self.menu_open = false;
        debug!("menu closed");
    }

    fn set_menu_classes(&self, env: &mut Env<'_>, open: bool) {
        for node in [self.menu, self.hamburger].into_iter().flatten() {
            if open {
                env.dom.add_class(node, ACTIVE_CLASS);
            } else {
                env.dom.remove_class(node, ACTIVE_CLASS);
            }
        }
    }

    fn animate_hamburger(&self, env: &mut Env<'_>, open: bool) {
        let Some(hamburger) = self.hamburger else {
            return;
        };
        let bars = env.dom.query_within(hamburger, ".bar");
        for (index, property, open_value, closed_value) in HAMBURGER_BARS {
            if let Some(bar) = bars.get(index) {
                let value = if open { open_value } else { closed_value };
                env.dom.set_style(*bar, property, value);
            }
        }
    }

    /// Hamburger toggles; a nav link or any click outside menu and hamburger closes.
    pub fn handle_click(&mut self, env: &mut Env<'_>, target: NodeId) {
        if let Some(hamburger) = self.hamburger {
            if env.dom.contains(hamburger, target) {
                self.toggle_menu(env);
                return;
            }
        }

        if !self.menu_open {
            return;
        }

        let on_link = self
            .links
            .iter()
            .any(|link| env.dom.contains(*link, target));
        let inside_menu = self.menu.is_some_and(|menu| env.dom.contains(menu, target));
        if on_link || !inside_menu {
            self.close_menu(env);
        }
    }

    pub fn handle_key(&mut self, env: &mut Env<'_>, key: &str) {
        match key {
            "Escape" if self.menu_open => self.close_menu(env),
            "Tab" => {
                let body = env.dom.body();
                env.dom.add_class(body, KEYBOARD_NAVIGATION_CLASS);
            }
            _ => {}
        }
    }

    pub fn handle_mouse_down(&mut self, env: &mut Env<'_>) {
        let body = env.dom.body();
        env.dom.remove_class(body, KEYBOARD_NAVIGATION_CLASS);
    }

    /// Marks the link whose section contains `scroll_y + offset`. When several
    /// sections match, the last one in document order wins; when none match
    /// the previous marking is kept.
    pub fn update_active_nav_link(&mut self, env: &mut Env<'_>, scroll_y: f64) -> Option<NodeId> {
        let marker = scroll_y + self.active_link_offset;
        let mut marked = None;

        for section in &self.sections {
            let top = env.dom.offset_top(*section);
            let bottom = top + env.dom.offset_height(*section);
            if marker < top || marker > bottom {
                continue;
            }

            let href = format!("#{}", env.dom.attribute(*section, "id").unwrap_or_default());
            marked = None;
            for link in &self.links {
                env.dom.remove_class(*link, ACTIVE_CLASS);
                if env.dom.attribute(*link, "href").as_deref() == Some(href.as_str()) {
                    env.dom.add_class(*link, ACTIVE_CLASS);
                    marked = Some(*link);
                }
            }
        }

        marked
    }

    pub fn active_link(&self, env: &Env<'_>) -> Option<NodeId> {
        self.links
            .iter()
            .copied()
            .find(|link| env.dom.has_class(*link, ACTIVE_CLASS))
    }

    pub fn restyle_navbar(&self, env: &mut Env<'_>) {
        let Some(navbar) = self.navbar else {
            return;
        };
        let root = env.dom.document_element();
        let dark = env.dom.attribute(root, THEME_ATTRIBUTE).as_deref() == Some(Theme::Dark.as_str());
        let background = if dark {
            DARK_NAVBAR_BACKGROUND
        } else {
            LIGHT_NAVBAR_BACKGROUND
        };
        env.dom.set_style(navbar, "background", background);
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
