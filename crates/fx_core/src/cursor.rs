//! Custom pointer dot plus a ring that eases toward the pointer each frame.

use shared::{
    domain::{NodeId, Point, TaskHandle},
    event::Task,
};
use tracing::debug;

use crate::{
    config::Settings,
    platform::{apply_styles, css_px, Env},
};

pub const INTERACTIVE: &str = "a, button, .project-card, .skill-item, .hobby-item";
pub const DOT_OFFSET: f64 = 4.0;
pub const FOLLOWER_OFFSET: f64 = 15.0;

const DOT_STYLES: [(&str, &str); 8] = [
    ("position", "fixed"),
    ("width", "8px"),
    ("height", "8px"),
    ("background", "var(--primary-color)"),
    ("border-radius", "50%"),
    ("pointer-events", "none"),
    ("z-index", "10000"),
    ("transition", "transform 0.1s ease"),
];

const FOLLOWER_STYLES: [(&str, &str); 9] = [
    ("position", "fixed"),
    ("width", "30px"),
    ("height", "30px"),
    ("border", "2px solid var(--primary-color)"),
    ("border-radius", "50%"),
    ("pointer-events", "none"),
    ("z-index", "9999"),
    ("opacity", "0.5"),
    ("transition", "all 0.3s ease"),
];

pub struct CursorEffect {
    dot: NodeId,
    follower: NodeId,
    pointer: Point,
    trailing: Point,
    smoothing: f64,
    frame: Option<TaskHandle>,
}

impl CursorEffect {
    /// Returns `None` on touch-capable devices, where there is no pointer to follow.
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Option<Self> {
        if env.dom.is_touch_capable() {
            debug!("touch device; custom cursor disabled");
            return None;
        }

        let body = env.dom.body();
        let dot = env.dom.create_element("div");
        env.dom.set_class_name(dot, "custom-cursor");
        apply_styles(&mut *env.dom, dot, &DOT_STYLES);

        let follower = env.dom.create_element("div");
        env.dom.set_class_name(follower, "cursor-follower");
        apply_styles(&mut *env.dom, follower, &FOLLOWER_STYLES);

        env.dom.append_child(body, dot);
        env.dom.append_child(body, follower);

        let mut cursor = Self {
            dot,
            follower,
            pointer: Point::default(),
            trailing: Point::default(),
            smoothing: settings.cursor_smoothing,
            frame: None,
        };
        cursor.animate(env);
        Some(cursor)
    }

    pub fn dot(&self) -> NodeId {
        self.dot
    }

    pub fn follower(&self) -> NodeId {
        self.follower
    }

    pub fn trailing(&self) -> Point {
        self.trailing
    }

    pub fn handle_pointer_move(&mut self, env: &mut Env<'_>, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        env.dom.set_style(self.dot, "left", &css_px(x - DOT_OFFSET));
        env.dom.set_style(self.dot, "top", &css_px(y - DOT_OFFSET));
    }

    /// Moves the ring a fixed fraction of the remaining distance.
    pub fn animate(&mut self, env: &mut Env<'_>) {
        self.trailing.x += (self.pointer.x - self.trailing.x) * self.smoothing;
        self.trailing.y += (self.pointer.y - self.trailing.y) * self.smoothing;
        env.dom
            .set_style(self.follower, "left", &css_px(self.trailing.x - FOLLOWER_OFFSET));
        env.dom
            .set_style(self.follower, "top", &css_px(self.trailing.y - FOLLOWER_OFFSET));
        self.frame = Some(env.scheduler.request_frame(Task::CursorFrame));
    }

    pub fn handle_pointer_over(&mut self, env: &mut Env<'_>, target: NodeId) {
        if env.dom.closest(target, INTERACTIVE).is_some() {
            self.set_hover(env, true);
        }
    }

    /// Hover ends only when the pointer leaves the interactive element itself,
    /// not when it moves between that element's children.
    pub fn handle_pointer_out(&mut self, env: &mut Env<'_>, target: NodeId, related: Option<NodeId>) {
        let Some(element) = env.dom.closest(target, INTERACTIVE) else {
            return;
        };
        if related.is_some_and(|next| env.dom.contains(element, next)) {
            return;
        }
        self.set_hover(env, false);
    }

    fn set_hover(&self, env: &mut Env<'_>, hovering: bool) {
        let (scale, opacity) = if hovering {
            ("scale(1.5)", "0.2")
        } else {
            ("scale(1)", "0.5")
        };
        env.dom.set_style(self.dot, "transform", scale);
        env.dom.set_style(self.follower, "transform", scale);
        env.dom.set_style(self.follower, "opacity", opacity);
    }

    pub fn handle_leave_window(&mut self, env: &mut Env<'_>) {
        env.dom.set_style(self.dot, "opacity", "0");
        env.dom.set_style(self.follower, "opacity", "0");
    }

    pub fn handle_enter_window(&mut self, env: &mut Env<'_>) {
        env.dom.set_style(self.dot, "opacity", "1");
        env.dom.set_style(self.follower, "opacity", "0.5");
    }

    pub fn stop(&mut self, env: &mut Env<'_>) {
        if let Some(frame) = self.frame.take() {
            env.scheduler.cancel(frame);
        }
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
