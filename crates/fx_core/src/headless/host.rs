use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use shared::{
    domain::{NodeId, Size},
    event::{EventOutcome, IntersectionEntry, PageEvent},
};
use storage::{MemoryPreferences, PreferenceStore};
use tracing::debug;

use super::{dom::MemoryDom, scheduler::VirtualScheduler};
use crate::{config::Settings, platform::Env, Page};

pub const DEFAULT_SEED: u64 = 0x5eed;

/// The platform half of a headless run: document, clock, preferences, randomness.
pub struct HeadlessHost<P = MemoryPreferences> {
    pub dom: MemoryDom,
    pub scheduler: VirtualScheduler,
    pub prefs: P,
    pub rng: StdRng,
}

impl HeadlessHost<MemoryPreferences> {
    pub fn new(dom: MemoryDom) -> Self {
        Self::with_prefs(dom, MemoryPreferences::new(), DEFAULT_SEED)
    }
}

impl<P: PreferenceStore> HeadlessHost<P> {
    pub fn with_prefs(dom: MemoryDom, prefs: P, seed: u64) -> Self {
        Self {
            dom,
            scheduler: VirtualScheduler::new(),
            prefs,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn env(&mut self) -> Env<'_> {
        Env {
            dom: &mut self.dom,
            scheduler: &mut self.scheduler,
            prefs: &mut self.prefs,
            rng: &mut self.rng,
        }
    }
}

/// A page plus its headless host, driven by explicit events and virtual time.
pub struct HeadlessPage<P = MemoryPreferences> {
    page: Page,
    host: HeadlessHost<P>,
}

impl HeadlessPage<MemoryPreferences> {
    pub fn new(dom: MemoryDom, settings: Settings) -> Self {
        Self::with_host(HeadlessHost::new(dom), settings)
    }
}

impl<P: PreferenceStore> HeadlessPage<P> {
    pub fn with_host(host: HeadlessHost<P>, settings: Settings) -> Self {
        Self {
            page: Page::new(settings),
            host,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn dom(&self) -> &MemoryDom {
        &self.host.dom
    }

    pub fn dom_mut(&mut self) -> &mut MemoryDom {
        &mut self.host.dom
    }

    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.host.scheduler
    }

    pub fn prefs(&self) -> &P {
        &self.host.prefs
    }

    pub fn now(&self) -> Duration {
        self.host.scheduler.now()
    }

    pub fn boot(&mut self) {
        self.dispatch(PageEvent::Ready);
    }

    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        let mut env = self.host.env();
        self.page.dispatch(&mut env, event)
    }

    /// Runs every task due within `span`, in due order, then parks the clock
    /// at the end of the span. Returns how many tasks ran.
    pub fn advance(&mut self, span: Duration) -> usize {
        let deadline = self.host.scheduler.now() + span;
        let mut ran = 0;
        while let Some((handle, task)) = self.host.scheduler.pop_due(deadline) {
            debug!(?handle, task = ?task, "running task");
            let mut env = self.host.env();
            self.page.run_task(&mut env, task);
            ran += 1;
        }
        self.host.scheduler.advance_clock_to(deadline);
        ran
    }

    pub fn advance_ms(&mut self, millis: u64) -> usize {
        self.advance(Duration::from_millis(millis))
    }

    /// Reports `node` as intersecting to every observer currently watching it.
    pub fn reveal(&mut self, node: NodeId) {
        for observer in self.host.dom.observers_of(node) {
            self.dispatch(PageEvent::Intersection {
                observer,
                entries: vec![IntersectionEntry {
                    node,
                    is_intersecting: true,
                }],
            });
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) -> EventOutcome {
        self.host.dom.set_scroll_y(scroll_y);
        self.dispatch(PageEvent::Scroll { scroll_y })
    }

    /// Changes the viewport, then reports the resize the way a browser would.
    pub fn resize(&mut self, width: f64, height: f64) -> EventOutcome {
        self.host.dom.set_viewport(Size::new(width, height));
        self.dispatch(PageEvent::Resize { width, height })
    }

    pub fn click(&mut self, target: NodeId) -> EventOutcome {
        self.dispatch(PageEvent::Click { target })
    }

    pub fn teardown(&mut self) {
        let mut env = self.host.env();
        self.page.teardown(&mut env);
    }

    pub fn into_host(self) -> HeadlessHost<P> {
        self.host
    }
}
