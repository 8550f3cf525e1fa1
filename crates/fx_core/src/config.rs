use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use shared::{domain::Theme, error::FxError};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_PRELOAD_URLS: [&str; 2] = [
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0.0/css/all.min.css",
    "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme_storage_key: String,
    pub default_theme: Theme,

    pub active_link_offset: f64,

    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub submit_delay_ms: u64,
    pub notification_enter_ms: u64,
    pub notification_display_ms: u64,
    pub notification_fade_ms: u64,

    pub counter_threshold: f64,
    pub counter_steps: u32,
    pub counter_tick_ms: u64,

    pub typing_phrases: Vec<String>,
    pub typing_type_ms: u64,
    pub typing_delete_ms: u64,
    pub typing_full_pause_ms: u64,
    pub typing_empty_pause_ms: u64,

    pub particle_count: usize,
    pub particle_color: String,
    pub particle_canvas_opacity: f64,

    pub enhanced_init_delay_ms: u64,
    pub cursor_smoothing: f64,
    pub loader_display_ms: u64,
    pub loader_fade_ms: u64,
    pub link_press_ms: u64,
    pub scroll_debounce_ms: u64,
    pub preload_urls: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme_storage_key: "theme".into(),
            default_theme: Theme::Dark,
            active_link_offset: 100.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".into(),
            submit_delay_ms: 2000,
            notification_enter_ms: 100,
            notification_display_ms: 3000,
            notification_fade_ms: 300,
            counter_threshold: 0.7,
            counter_steps: 50,
            counter_tick_ms: 40,
            typing_phrases: vec![
                "Full Stack Developer".into(),
                "UI/UX Designer".into(),
                "Problem Solver".into(),
                "Creative Thinker".into(),
            ],
            typing_type_ms: 100,
            typing_delete_ms: 50,
            typing_full_pause_ms: 2000,
            typing_empty_pause_ms: 500,
            particle_count: 50,
            particle_color: "#8B5CF6".into(),
            particle_canvas_opacity: 0.1,
            enhanced_init_delay_ms: 100,
            cursor_smoothing: 0.1,
            loader_display_ms: 1500,
            loader_fade_ms: 500,
            link_press_ms: 150,
            scroll_debounce_ms: 16,
            preload_urls: DEFAULT_PRELOAD_URLS.iter().map(|url| url.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("typing phrase list is empty")]
    EmptyPhraseList,
    #[error("typing phrase {index} is empty")]
    EmptyPhrase { index: usize },
    #[error("counter_steps must be at least 1")]
    ZeroCounterSteps,
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
    #[error("{name} must lie in [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
}

impl From<ConfigError> for FxError {
    fn from(value: ConfigError) -> Self {
        FxError::Config(value.to_string())
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing_phrases.is_empty() {
            return Err(ConfigError::EmptyPhraseList);
        }
        if let Some(index) = self.typing_phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPhrase { index });
        }
        if self.counter_steps == 0 {
            return Err(ConfigError::ZeroCounterSteps);
        }
        for (name, value) in [
            ("counter_tick_ms", self.counter_tick_ms),
            ("typing_type_ms", self.typing_type_ms),
            ("typing_delete_ms", self.typing_delete_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { name });
            }
        }
        for (name, value) in [
            ("reveal_threshold", self.reveal_threshold),
            ("counter_threshold", self.counter_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        Ok(())
    }

    pub fn counter_tick(&self) -> Duration {
        Duration::from_millis(self.counter_tick_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn enhanced_init_delay(&self) -> Duration {
        Duration::from_millis(self.enhanced_init_delay_ms)
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }
}

/// Defaults, overlaid by the TOML file at `path` when readable, then by `APP__*`
/// environment variables. Unreadable or malformed files are logged and skipped.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match Settings::from_toml_str(&raw) {
            Ok(file_cfg) => {
                debug!(path = %path.display(), "loaded settings file");
                file_cfg
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring malformed settings file");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__THEME_STORAGE_KEY") {
        settings.theme_storage_key = v;
    }

    if let Some(v) = lookup("APP__DEFAULT_THEME") {
        match v.parse::<Theme>() {
            Ok(theme) => settings.default_theme = theme,
            Err(error) => warn!(%error, "ignoring APP__DEFAULT_THEME"),
        }
    }

    if let Some(v) = lookup("APP__PARTICLE_COUNT") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.particle_count = parsed;
        }
    }

    if let Some(v) = lookup("APP__TYPING_PHRASES") {
        settings.typing_phrases = v
            .split(',')
            .map(|phrase| phrase.trim().to_string())
            .filter(|phrase| !phrase.is_empty())
            .collect();
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
