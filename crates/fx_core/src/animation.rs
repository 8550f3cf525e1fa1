use shared::{
    domain::{ObserverId, ObserverOptions},
    event::IntersectionEntry,
};

use crate::{
    config::Settings,
    platform::{css_number, Env},
};

pub const FADE_IN_TARGETS: &str =
    ".about-content > *, .skill-category, .timeline-item, .project-card, .contact-content > *";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const PARALLAX_SHAPES: &str = ".shape";

/// Intersection-driven fade-ins and scroll parallax for the floating shapes.
///
/// Fade-in targets stay observed after their first reveal; adding the class
/// again is harmless.
pub struct AnimationManager {
    observed: usize,
}

impl AnimationManager {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let options = ObserverOptions {
            threshold: settings.reveal_threshold,
            root_margin: settings.reveal_root_margin.clone(),
        };
        let targets = env.dom.query_all(FADE_IN_TARGETS);
        for node in &targets {
            env.dom.observe(ObserverId::FadeIn, &options, *node);
        }
        Self {
            observed: targets.len(),
        }
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn handle_intersection(&mut self, env: &mut Env<'_>, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            env.dom.add_class(entry.node, FADE_IN_CLASS);
        }
    }

    pub fn handle_scroll(&mut self, env: &mut Env<'_>, scroll_y: f64) {
        for (index, shape) in env.dom.query_all(PARALLAX_SHAPES).into_iter().enumerate() {
            env.dom.set_style(shape, "transform", &parallax_transform(index, scroll_y));
        }
    }
}

pub fn parallax_speed(index: usize) -> f64 {
    0.5 + index as f64 * 0.1
}

pub fn parallax_transform(index: usize, scroll_y: f64) -> String {
    let offset = -(scroll_y * parallax_speed(index));
    format!(
        "translateY({}px) rotate({}deg)",
        css_number(offset),
        css_number(scroll_y * 0.1)
    )
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
