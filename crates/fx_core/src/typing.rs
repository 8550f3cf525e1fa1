//! Looping typewriter for the hero subtitle.

use std::time::Duration;

use shared::{
    domain::{NodeId, TaskHandle},
    event::Task,
};
use tracing::debug;

use crate::{config::Settings, platform::Env};

pub const TYPING_TARGET: &str = ".hero-subtitle";

/// What the wait after the most recent step is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingPhase {
    #[default]
    Typing,
    PausingFull,
    Deleting,
    PausingEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub full_pause: Duration,
    pub empty_pause: Duration,
}

impl TypingTiming {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            type_delay: Duration::from_millis(settings.typing_type_ms),
            delete_delay: Duration::from_millis(settings.typing_delete_ms),
            full_pause: Duration::from_millis(settings.typing_full_pause_ms),
            empty_pause: Duration::from_millis(settings.typing_empty_pause_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStep {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypingState {
    pub phrase_index: usize,
    pub char_index: usize,
    pub phase: TypingPhase,
}

impl TypingState {
    /// Adds or removes one character and reports the text to show and how
    /// long to wait before the next step.
    pub fn advance(&mut self, phrases: &[String], timing: &TypingTiming) -> TypingStep {
        let Some(phrase) = phrases.get(self.phrase_index) else {
            return TypingStep {
                text: String::new(),
                delay: timing.type_delay,
            };
        };
        let chars: Vec<char> = phrase.chars().collect();
        let deleting = matches!(self.phase, TypingPhase::PausingFull | TypingPhase::Deleting);

        self.char_index = if deleting {
            self.char_index.saturating_sub(1)
        } else {
            (self.char_index + 1).min(chars.len())
        };
        let text = chars[..self.char_index].iter().collect();

        let (phase, delay) = if !deleting && self.char_index == chars.len() {
            (TypingPhase::PausingFull, timing.full_pause)
        } else if deleting && self.char_index == 0 {
            self.phrase_index = (self.phrase_index + 1) % phrases.len();
            (TypingPhase::PausingEmpty, timing.empty_pause)
        } else if deleting {
            (TypingPhase::Deleting, timing.delete_delay)
        } else {
            (TypingPhase::Typing, timing.type_delay)
        };
        self.phase = phase;

        TypingStep { text, delay }
    }
}

/// The texts shown during the first `span`, each with the instant it appears.
pub fn timeline(phrases: &[String], timing: &TypingTiming, span: Duration) -> Vec<(Duration, String)> {
    let mut state = TypingState::default();
    let mut at = Duration::ZERO;
    let mut out = Vec::new();
    if phrases.is_empty() {
        return out;
    }
    while at <= span {
        let step = state.advance(phrases, timing);
        out.push((at, step.text));
        at += step.delay;
    }
    out
}

pub struct TypingEffect {
    element: Option<NodeId>,
    phrases: Vec<String>,
    timing: TypingTiming,
    state: TypingState,
    timer: Option<TaskHandle>,
}

impl TypingEffect {
    /// Shows the first character straight away when the subtitle exists.
    pub fn new(env: &mut Env<'_>, settings: &Settings) -> Self {
        let mut effect = Self {
            element: env.dom.query(TYPING_TARGET),
            phrases: settings.typing_phrases.clone(),
            timing: TypingTiming::from_settings(settings),
            state: TypingState::default(),
            timer: None,
        };
        if effect.element.is_some() && !effect.phrases.is_empty() {
            effect.tick(env);
        }
        effect
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn tick(&mut self, env: &mut Env<'_>) {
        let Some(element) = self.element else {
            return;
        };
        let step = self.state.advance(&self.phrases, &self.timing);
        env.dom.set_text(element, &step.text);
        if self.state.phase == TypingPhase::PausingEmpty {
            debug!(next = self.state.phrase_index, "typing moves to next phrase");
        }
        self.timer = Some(env.scheduler.schedule(step.delay, Task::TypeTick));
    }

    pub fn stop(&mut self, env: &mut Env<'_>) {
        if let Some(timer) = self.timer.take() {
            env.scheduler.cancel(timer);
        }
    }
}

#[cfg(test)]
#[path = "tests/typing_tests.rs"]
mod tests;
