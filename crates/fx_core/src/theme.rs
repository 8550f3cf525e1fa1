use shared::domain::{NodeId, Theme};
use tracing::{debug, warn};

use crate::{config::Settings, platform::Env};

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const THEME_TOGGLE: &str = "#theme-toggle";

/// Icon shown on the toggle: the theme you would switch *to*.
pub fn icon_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "fas fa-sun",
        Theme::Light => "fas fa-moon",
    }
}

pub struct ThemeManager {
    theme: Theme,
    storage_key: String,
    toggle: Option<NodeId>,
}

impl ThemeManager {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let storage_key = settings.theme_storage_key.clone();
        let theme = match env.prefs.get(&storage_key) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|error| {
                debug!(%error, "persisted theme not recognised; using default");
                settings.default_theme
            }),
            Ok(None) => settings.default_theme,
            Err(error) => {
                warn!(%error, "could not read persisted theme");
                settings.default_theme
            }
        };

        let mut manager = Self {
            theme,
            storage_key,
            toggle: env.dom.query(THEME_TOGGLE),
        };
        manager.set_theme(env, theme);
        manager
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, env: &mut Env<'_>, theme: Theme) {
        self.theme = theme;
        let root = env.dom.document_element();
        env.dom.set_attribute(root, THEME_ATTRIBUTE, theme.as_str());

        if let Err(error) = env.prefs.set(&self.storage_key, theme.as_str()) {
            warn!(%error, %theme, "theme applied but not persisted");
        }

        if let Some(toggle) = self.toggle {
            if let Some(icon) = env.dom.query_within(toggle, "i").into_iter().next() {
                env.dom.set_class_name(icon, icon_class(theme));
            }
        }
        debug!(%theme, "theme set");
    }

    pub fn toggle_theme(&mut self, env: &mut Env<'_>) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(env, next);
        next
    }

    pub fn handle_click(&mut self, env: &mut Env<'_>, target: NodeId) {
        if self.toggle.is_none() {
            return;
        }
        if env.dom.closest(target, THEME_TOGGLE).is_some() {
            self.toggle_theme(env);
        }
    }
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
