//! Staggered directional reveals for hero, about, skills, timeline and project blocks.

use shared::{
    domain::{NodeId, ObserverId, ObserverOptions, RevealDirection},
    event::IntersectionEntry,
};
use tracing::debug;

use crate::{
    config::Settings,
    platform::{apply_styles, Env},
};

pub const REVEAL_TRANSITION: &str = "all 0.6s cubic-bezier(0.25, 0.46, 0.45, 0.94)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealRule {
    pub selector: &'static str,
    /// Added per element index within the rule.
    pub stagger_ms: u64,
    pub direction: RevealDirection,
}

pub const REVEAL_RULES: [RevealRule; 7] = [
    RevealRule {
        selector: ".hero-text > *",
        stagger_ms: 100,
        direction: RevealDirection::Up,
    },
    RevealRule {
        selector: ".profile-card",
        stagger_ms: 200,
        direction: RevealDirection::Right,
    },
    RevealRule {
        selector: ".about-stats .stat",
        stagger_ms: 150,
        direction: RevealDirection::Up,
    },
    RevealRule {
        selector: ".hobby-item",
        stagger_ms: 100,
        direction: RevealDirection::Scale,
    },
    RevealRule {
        selector: ".skill-item",
        stagger_ms: 50,
        direction: RevealDirection::Scale,
    },
    RevealRule {
        selector: ".timeline-item",
        stagger_ms: 200,
        direction: RevealDirection::Left,
    },
    RevealRule {
        selector: ".project-card",
        stagger_ms: 200,
        direction: RevealDirection::Up,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealRecord {
    pub node: NodeId,
    pub direction: RevealDirection,
    pub revealed: bool,
}

pub struct EnhancedScrollReveal {
    records: Vec<RevealRecord>,
}

impl EnhancedScrollReveal {
    /// Hides every matched element in its starting pose and starts observing it.
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let mut records = Vec::new();
        for rule in &REVEAL_RULES {
            for (index, node) in env.dom.query_all(rule.selector).into_iter().enumerate() {
                let delay = format!("{}ms", index as u64 * rule.stagger_ms);
                apply_styles(
                    &mut *env.dom,
                    node,
                    &[
                        ("opacity", "0"),
                        ("transition", REVEAL_TRANSITION),
                        ("transition-delay", delay.as_str()),
                        ("transform", rule.direction.initial_transform()),
                    ],
                );
                records.push(RevealRecord {
                    node,
                    direction: rule.direction,
                    revealed: false,
                });
            }
        }

        let options = ObserverOptions {
            threshold: settings.reveal_threshold,
            root_margin: settings.reveal_root_margin.clone(),
        };
        for record in &records {
            env.dom.observe(ObserverId::ScrollReveal, &options, record.node);
        }
        debug!(elements = records.len(), "scroll reveal armed");

        Self { records }
    }

    pub fn records(&self) -> &[RevealRecord] {
        &self.records
    }

    pub fn handle_intersection(&mut self, env: &mut Env<'_>, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            // An element matched by two rules keeps the first record.
            let Some(record) = self.records.iter_mut().find(|r| r.node == entry.node) else {
                continue;
            };
            if record.revealed {
                continue;
            }
            env.dom.set_style(record.node, "opacity", "1");
            env.dom
                .set_style(record.node, "transform", record.direction.revealed_transform());
            record.revealed = true;
        }
    }
}

#[cfg(test)]
#[path = "tests/reveal_tests.rs"]
mod tests;
