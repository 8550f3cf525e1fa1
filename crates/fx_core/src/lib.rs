//! Interactive effects for the portfolio page.
//!
//! Every controller works against the [`Dom`] and [`Scheduler`] seams handed
//! to it through [`Env`], so the same code runs in the browser and in the
//! [`headless`] host. [`Page`] owns the controllers and routes host events and
//! due tasks to them.

pub mod animation;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod headless;
pub mod navigation;
pub mod particles;
pub mod performance;
pub mod platform;
pub mod reveal;
pub mod scroll;
pub mod stats;
pub mod styles;
pub mod theme;
pub mod transitions;
pub mod typing;

use shared::{
    domain::{NodeId, ObserverId, Size, TaskHandle},
    event::{EventOutcome, PageEvent, Task},
};
use tracing::{debug, error, info};

pub use config::{load_settings, ConfigError, Settings};
pub use platform::{Dom, Env, Scheduler};

use animation::AnimationManager;
use contact::ContactFormManager;
use cursor::CursorEffect;
use navigation::NavigationManager;
use particles::ParticleBackground;
use performance::PerformanceOptimizer;
use reveal::EnhancedScrollReveal;
use scroll::ScrollManager;
use stats::StatsCounter;
use theme::ThemeManager;
use transitions::PageTransitions;
use typing::TypingEffect;

pub const LOADED_CLASS: &str = "loaded";

/// Controller registry for one page. Core controllers start on
/// [`PageEvent::Ready`]; the cosmetic ones follow after
/// `enhanced_init_delay_ms`.
#[derive(Default)]
pub struct Page {
    settings: Settings,
    ready: bool,
    theme: Option<ThemeManager>,
    navigation: Option<NavigationManager>,
    scroll: Option<ScrollManager>,
    animation: Option<AnimationManager>,
    contact: Option<ContactFormManager>,
    stats: Option<StatsCounter>,
    typing: Option<TypingEffect>,
    particles: Option<ParticleBackground>,
    reveal: Option<EnhancedScrollReveal>,
    cursor: Option<CursorEffect>,
    transitions: Option<PageTransitions>,
    performance: Option<PerformanceOptimizer>,
    enhanced_timer: Option<TaskHandle>,
}

impl Page {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn theme(&self) -> Option<&ThemeManager> {
        self.theme.as_ref()
    }

    pub fn navigation(&self) -> Option<&NavigationManager> {
        self.navigation.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactFormManager> {
        self.contact.as_ref()
    }

    pub fn stats(&self) -> Option<&StatsCounter> {
        self.stats.as_ref()
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub fn particles(&self) -> Option<&ParticleBackground> {
        self.particles.as_ref()
    }

    pub fn reveal(&self) -> Option<&EnhancedScrollReveal> {
        self.reveal.as_ref()
    }

    pub fn cursor(&self) -> Option<&CursorEffect> {
        self.cursor.as_ref()
    }

    pub fn transitions(&self) -> Option<&PageTransitions> {
        self.transitions.as_ref()
    }

    pub fn performance(&self) -> Option<&PerformanceOptimizer> {
        self.performance.as_ref()
    }

    pub fn dispatch(&mut self, env: &mut Env<'_>, event: PageEvent) -> EventOutcome {
        debug!(event = event.name(), "dispatching page event");
        match event {
            PageEvent::Ready => self.init_core(env),
            PageEvent::Click { target } => return self.handle_click(env, target),
            PageEvent::KeyDown { key } => {
                if let Some(navigation) = self.navigation.as_mut() {
                    navigation.handle_key(env, &key);
                }
            }
            PageEvent::MouseDown => {
                if let Some(navigation) = self.navigation.as_mut() {
                    navigation.handle_mouse_down(env);
                }
            }
            PageEvent::Focus { target } => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.handle_focus(env, target);
                }
            }
            PageEvent::Blur { target } => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.handle_blur(env, target);
                }
            }
            PageEvent::Submit { form } => {
                let handled = self
                    .contact
                    .as_mut()
                    .is_some_and(|contact| contact.handle_submit(env, form));
                if handled {
                    return EventOutcome::prevented();
                }
            }
            PageEvent::Scroll { scroll_y } => self.handle_scroll(env, scroll_y),
            PageEvent::Resize { width, height } => {
                if let Some(particles) = self.particles.as_mut() {
                    particles.resize(env, Size::new(width, height));
                }
            }
            PageEvent::PointerMove { x, y } => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.handle_pointer_move(env, x, y);
                }
            }
            PageEvent::PointerOver { target } => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.handle_pointer_over(env, target);
                }
            }
            PageEvent::PointerOut { target, related } => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.handle_pointer_out(env, target, related);
                }
            }
            PageEvent::PointerLeaveWindow => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.handle_leave_window(env);
                }
            }
            PageEvent::PointerEnterWindow => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.handle_enter_window(env);
                }
            }
            PageEvent::Intersection { observer, entries } => match observer {
                ObserverId::FadeIn => {
                    if let Some(animation) = self.animation.as_mut() {
                        animation.handle_intersection(env, &entries);
                    }
                }
                ObserverId::StatsCounter => {
                    if let Some(stats) = self.stats.as_mut() {
                        stats.handle_intersection(env, &entries);
                    }
                }
                ObserverId::ScrollReveal => {
                    if let Some(reveal) = self.reveal.as_mut() {
                        reveal.handle_intersection(env, &entries);
                    }
                }
            },
            PageEvent::Error { message } => error!(%message, "portfolio error"),
        }
        EventOutcome::default()
    }

    pub fn run_task(&mut self, env: &mut Env<'_>, task: Task) {
        match task {
            Task::TypeTick => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.tick(env);
                }
            }
            Task::CounterTick { node } => {
                if let Some(stats) = self.stats.as_mut() {
                    stats.tick(env, node);
                }
            }
            Task::FinishSubmit { form } => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.finish_submit(env, form);
                }
            }
            Task::ShowNotification { node } => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.show_notification(env, node);
                }
            }
            Task::DismissNotification { node } => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.dismiss_notification(env, node);
                }
            }
            Task::RemoveNotification { node } => {
                if let Some(contact) = self.contact.as_mut() {
                    contact.remove_notification(env, node);
                }
            }
            Task::FadeLoader { node } => {
                if let Some(transitions) = self.transitions.as_mut() {
                    transitions.fade_loader(env, node);
                }
            }
            Task::RemoveLoader { node } => {
                if let Some(transitions) = self.transitions.as_mut() {
                    transitions.remove_loader(env, node);
                }
            }
            Task::RestoreLinkScale { node } => {
                if let Some(transitions) = self.transitions.as_mut() {
                    transitions.restore_link_scale(env, node);
                }
            }
            Task::InitEnhanced => self.init_enhanced(env),
            Task::DebouncedScroll { scroll_y } => {
                if let Some(performance) = self.performance.as_mut() {
                    performance.scroll_settled();
                }
                debug!(scroll_y, "debounced scroll settled");
                if let Some(navigation) = self.navigation.as_ref() {
                    navigation.restyle_navbar(env);
                }
            }
            Task::ParticleFrame => {
                if let Some(particles) = self.particles.as_mut() {
                    particles.animate(env);
                }
            }
            Task::CursorFrame => {
                if let Some(cursor) = self.cursor.as_mut() {
                    cursor.animate(env);
                }
            }
        }
    }

    fn init_core(&mut self, env: &mut Env<'_>) {
        if self.ready {
            debug!("page already initialised; ignoring ready");
            return;
        }
        styles::inject_styles(env);

        let settings = &self.settings;
        self.theme = Some(ThemeManager::new(env, settings));
        self.navigation = Some(NavigationManager::new(env, settings));
        self.scroll = Some(ScrollManager::new(env));
        self.animation = Some(AnimationManager::new(env, settings));
        self.contact = Some(ContactFormManager::new(env, settings));
        self.stats = Some(StatsCounter::new(env, settings));
        self.typing = Some(TypingEffect::new(env, settings));
        self.particles = Some(ParticleBackground::new(env, settings));

        let body = env.dom.body();
        env.dom.add_class(body, LOADED_CLASS);
        self.ready = true;
        info!("portfolio loaded");

        self.enhanced_timer = Some(
            env.scheduler
                .schedule(self.settings.enhanced_init_delay(), Task::InitEnhanced),
        );
    }

    fn init_enhanced(&mut self, env: &mut Env<'_>) {
        self.enhanced_timer = None;
        if self.reveal.is_some() {
            return;
        }
        let settings = &self.settings;
        self.reveal = Some(EnhancedScrollReveal::new(env, settings));
        self.cursor = CursorEffect::new(env, settings);
        self.transitions = Some(PageTransitions::new(env, settings));
        self.performance = Some(PerformanceOptimizer::new(env, settings));
        info!(cursor = self.cursor.is_some(), "enhanced effects initialised");
    }

    fn handle_click(&mut self, env: &mut Env<'_>, target: NodeId) -> EventOutcome {
        if let Some(transitions) = self.transitions.as_mut() {
            transitions.handle_click(env, target);
        }
        if let Some(theme) = self.theme.as_mut() {
            theme.handle_click(env, target);
        }
        if let Some(navigation) = self.navigation.as_mut() {
            navigation.handle_click(env, target);
        }
        let scrolled = self
            .scroll
            .as_ref()
            .is_some_and(|scroll| scroll.handle_click(env, target));
        if scrolled {
            EventOutcome::prevented()
        } else {
            EventOutcome::default()
        }
    }

    /// Active link and parallax follow every scroll; the navbar restyle is
    /// debounced once the performance layer is up.
    fn handle_scroll(&mut self, env: &mut Env<'_>, scroll_y: f64) {
        if let Some(navigation) = self.navigation.as_mut() {
            navigation.update_active_nav_link(env, scroll_y);
        }
        if let Some(animation) = self.animation.as_mut() {
            animation.handle_scroll(env, scroll_y);
        }
        match (self.performance.as_mut(), self.navigation.as_ref()) {
            (Some(performance), _) => performance.debounce_scroll(env, scroll_y),
            (None, Some(navigation)) => navigation.restyle_navbar(env),
            (None, None) => {}
        }
    }

    /// Cancels every pending timer and frame. The document is left as is.
    pub fn teardown(&mut self, env: &mut Env<'_>) {
        if let Some(timer) = self.enhanced_timer.take() {
            env.scheduler.cancel(timer);
        }
        if let Some(contact) = self.contact.as_mut() {
            contact.stop(env);
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.stop(env);
        }
        if let Some(typing) = self.typing.as_mut() {
            typing.stop(env);
        }
        if let Some(particles) = self.particles.as_mut() {
            particles.stop(env);
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.stop(env);
        }
        if let Some(transitions) = self.transitions.as_mut() {
            transitions.stop(env);
        }
        if let Some(performance) = self.performance.as_mut() {
            performance.stop(env);
        }
        info!("page torn down");
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
