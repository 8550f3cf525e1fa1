//! One-shot count-up for the statistic headings.

use std::time::Duration;

use shared::{
    domain::{NodeId, ObserverId, ObserverOptions, TaskHandle},
    event::{IntersectionEntry, Task},
};
use tracing::debug;

use crate::{config::Settings, platform::Env};

pub const COUNTER_TARGETS: &str = ".stat h3";

/// The numeric part of a counter label and what surrounds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterText {
    pub target: u64,
    pub suffix: String,
}

/// Every digit in `text` forms the target; everything else is the suffix.
/// Returns `None` when there is nothing to count.
pub fn parse_counter_text(text: &str) -> Option<CounterText> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let target = digits.parse::<u64>().ok()?;
    let suffix = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    Some(CounterText { target, suffix })
}

/// Value shown after `step` of `steps` ticks. Integer arithmetic keeps the
/// sequence monotonic and exact at the end.
pub fn counter_value(target: u64, step: u32, steps: u32) -> u64 {
    let steps = u128::from(steps.max(1));
    let step = u128::from(step).min(steps);
    (u128::from(target) * step / steps) as u64
}

/// Every text a counter shows, in order, ending with the untouched original.
pub fn count_up_frames(text: &str, steps: u32) -> Vec<String> {
    let Some(parsed) = parse_counter_text(text) else {
        return Vec::new();
    };
    let mut frames = Vec::new();
    let mut step = 0;
    loop {
        step += 1;
        let value = counter_value(parsed.target, step, steps);
        if value >= parsed.target {
            frames.push(text.to_string());
            return frames;
        }
        frames.push(format!("{value}{}", parsed.suffix));
    }
}

struct RunningCounter {
    node: NodeId,
    original: String,
    parsed: CounterText,
    step: u32,
    timer: TaskHandle,
}

pub struct StatsCounter {
    counters: Vec<NodeId>,
    steps: u32,
    tick: Duration,
    running: Vec<RunningCounter>,
}

impl StatsCounter {
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let counters = env.dom.query_all(COUNTER_TARGETS);
        let options = ObserverOptions {
            threshold: settings.counter_threshold,
            root_margin: "0px".into(),
        };
        for counter in &counters {
            env.dom.observe(ObserverId::StatsCounter, &options, *counter);
        }
        Self {
            counters,
            steps: settings.counter_steps,
            tick: settings.counter_tick(),
            running: Vec::new(),
        }
    }

    /// Counters still waiting to become visible.
    pub fn counters(&self) -> &[NodeId] {
        &self.counters
    }

    pub fn is_running(&self, node: NodeId) -> bool {
        self.running.iter().any(|r| r.node == node)
    }

    /// Starts each visible counter once and stops watching it.
    pub fn handle_intersection(&mut self, env: &mut Env<'_>, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(position) = self.counters.iter().position(|c| *c == entry.node) else {
                continue;
            };
            self.counters.remove(position);
            env.dom.unobserve(ObserverId::StatsCounter, entry.node);
            self.start(env, entry.node);
        }
    }

    fn start(&mut self, env: &mut Env<'_>, node: NodeId) {
        let original = env.dom.text(node);
        let Some(parsed) = parse_counter_text(&original) else {
            debug!(text = %original, "counter has no digits; leaving as is");
            return;
        };
        debug!(target = parsed.target, "counting up");
        let timer = env.scheduler.schedule(self.tick, Task::CounterTick { node });
        self.running.push(RunningCounter {
            node,
            original,
            parsed,
            step: 0,
            timer,
        });
    }

    pub fn tick(&mut self, env: &mut Env<'_>, node: NodeId) {
        let Some(index) = self.running.iter().position(|r| r.node == node) else {
            return;
        };
        let counter = &mut self.running[index];
        counter.step += 1;
        let value = counter_value(counter.parsed.target, counter.step, self.steps);

        if value >= counter.parsed.target {
            env.dom.set_text(node, &counter.original);
            self.running.swap_remove(index);
            return;
        }

        env.dom
            .set_text(node, &format!("{value}{}", counter.parsed.suffix));
        counter.timer = env.scheduler.schedule(self.tick, Task::CounterTick { node });
    }

    pub fn stop(&mut self, env: &mut Env<'_>) {
        for counter in self.running.drain(..) {
            env.scheduler.cancel(counter.timer);
        }
    }
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
