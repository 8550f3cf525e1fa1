//! Startup loader overlay and the press-scale affordance on in-page links.

use std::time::Duration;

use shared::{
    domain::{NodeId, TaskHandle},
    event::Task,
};
use tracing::debug;

use crate::{
    config::Settings,
    platform::{apply_styles, Env},
};

pub const INTERNAL_LINK: &str = r##"a[href^="#"]"##;
pub const LOADER_TEXT: &str = "Loading...";

const LOADER_STYLES: [(&str, &str); 10] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("background", "var(--bg-primary)"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("z-index", "10000"),
];

pub struct PageTransitions {
    loader: NodeId,
    loader_timer: Option<TaskHandle>,
    fade_for: Duration,
    press_for: Duration,
    pressed: Vec<(NodeId, TaskHandle)>,
}

fn append_div(env: &mut Env<'_>, parent: NodeId, class: &str) -> NodeId {
    let node = env.dom.create_element("div");
    env.dom.set_class_name(node, class);
    env.dom.append_child(parent, node);
    node
}

impl PageTransitions {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let loader = env.dom.create_element("div");
        env.dom.set_class_name(loader, "page-loader");
        let content = append_div(env, loader, "loader-content");
        let logo = append_div(env, content, "loader-logo");
        append_div(env, logo, "logo-animation");
        let text = append_div(env, content, "loader-text");
        env.dom.set_text(text, LOADER_TEXT);
        let progress = append_div(env, content, "loader-progress");
        append_div(env, progress, "loader-bar");

        apply_styles(&mut *env.dom, loader, &LOADER_STYLES);
        env.dom.set_style(loader, "transition", "all 0.5s ease");
        let body = env.dom.body();
        env.dom.append_child(body, loader);

        let timer = env.scheduler.schedule(
            Duration::from_millis(settings.loader_display_ms),
            Task::FadeLoader { node: loader },
        );
        debug!("page loader shown");

        Self {
            loader,
            loader_timer: Some(timer),
            fade_for: Duration::from_millis(settings.loader_fade_ms),
            press_for: Duration::from_millis(settings.link_press_ms),
            pressed: Vec::new(),
        }
    }

    pub fn loader(&self) -> NodeId {
        self.loader
    }

    pub fn fade_loader(&mut self, env: &mut Env<'_>, node: NodeId) {
        env.dom.set_style(node, "opacity", "0");
        self.loader_timer = Some(
            env.scheduler
                .schedule(self.fade_for, Task::RemoveLoader { node }),
        );
    }

    pub fn remove_loader(&mut self, env: &mut Env<'_>, node: NodeId) {
        env.dom.remove(node);
        self.loader_timer = None;
        debug!("page loader removed");
    }

    /// Shrinks an in-page link briefly. Never affects the click's default.
    pub fn handle_click(&mut self, env: &mut Env<'_>, target: NodeId) {
        let Some(link) = env.dom.closest(target, INTERNAL_LINK) else {
            return;
        };
        env.dom.set_style(link, "transform", "scale(0.95)");
        let timer = env
            .scheduler
            .schedule(self.press_for, Task::RestoreLinkScale { node: link });
        self.pressed.push((link, timer));
    }

    pub fn restore_link_scale(&mut self, env: &mut Env<'_>, node: NodeId) {
        env.dom.set_style(node, "transform", "scale(1)");
        if let Some(index) = self.pressed.iter().position(|(link, _)| *link == node) {
            self.pressed.remove(index);
        }
    }

    pub fn stop(&mut self, env: &mut Env<'_>) {
        if let Some(timer) = self.loader_timer.take() {
            env.scheduler.cancel(timer);
        }
        for (_, timer) in self.pressed.drain(..) {
            env.scheduler.cancel(timer);
        }
    }
}

#[cfg(test)]
#[path = "tests/transitions_tests.rs"]
mod tests;
