use std::time::Duration;

use shared::{domain::TaskHandle, event::Task};
use tracing::{debug, warn};
use url::Url;

use crate::{config::Settings, platform::Env};

/// Lazy image loading, scroll debouncing and stylesheet preload hints.
pub struct PerformanceOptimizer {
    debounce: Duration,
    pending_scroll: Option<TaskHandle>,
    lazy_images: usize,
    preloaded: Vec<Url>,
}

impl PerformanceOptimizer {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let lazy_images = defer_images(env);
        let preloaded = preload_stylesheets(env, &settings.preload_urls);
        debug!(lazy_images, preloads = preloaded.len(), "performance hints applied");
        Self {
            debounce: settings.scroll_debounce(),
            pending_scroll: None,
            lazy_images,
            preloaded,
        }
    }

    pub fn lazy_images(&self) -> usize {
        self.lazy_images
    }

    pub fn preloaded(&self) -> &[Url] {
        &self.preloaded
    }

    /// Restarts the quiet period; only the last scroll of a burst comes back
    /// as a `DebouncedScroll` task.
    pub fn debounce_scroll(&mut self, env: &mut Env<'_>, scroll_y: f64) {
        if let Some(pending) = self.pending_scroll.take() {
            env.scheduler.cancel(pending);
        }
        self.pending_scroll = Some(
            env.scheduler
                .schedule(self.debounce, Task::DebouncedScroll { scroll_y }),
        );
    }

    /// Called when the debounced task fires.
    pub fn scroll_settled(&mut self) {
        self.pending_scroll = None;
    }

    pub fn stop(&mut self, env: &mut Env<'_>) {
        if let Some(pending) = self.pending_scroll.take() {
            env.scheduler.cancel(pending);
        }
    }
}

/// Marks images without an explicit `loading` attribute as lazy.
pub fn defer_images(env: &mut Env<'_>) -> usize {
    let mut deferred = 0;
    for image in env.dom.query_all("img") {
        if env.dom.attribute(image, "loading").is_none() {
            env.dom.set_attribute(image, "loading", "lazy");
            deferred += 1;
        }
    }
    deferred
}

/// Appends `<link rel="preload" as="style">` to the head for every URL that parses.
pub fn preload_stylesheets(env: &mut Env<'_>, urls: &[String]) -> Vec<Url> {
    let head = env.dom.head();
    let mut preloaded = Vec::new();
    for raw in urls {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(error) => {
                warn!(url = %raw, %error, "skipping invalid preload url");
                continue;
            }
        };
        let link = env.dom.create_element("link");
        env.dom.set_attribute(link, "rel", "preload");
        env.dom.set_attribute(link, "as", "style");
        env.dom.set_attribute(link, "href", raw);
        env.dom.append_child(head, link);
        preloaded.push(url);
    }
    preloaded
}

#[cfg(test)]
#[path = "tests/performance_tests.rs"]
mod tests;
