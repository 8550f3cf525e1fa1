//! Browser host for the portfolio effects.
//!
//! Binds `fx_core` to the live document: [`dom::WebDom`] maps elements onto
//! node handles, [`scheduler::WebScheduler`] turns tasks into timeouts and
//! animation frames and [`listeners`] forwards native events to the page.

pub mod dom;
pub mod local_storage;
mod listeners;
mod logging;
pub mod scheduler;

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use fx_core::{Env, Page, Settings};
use rand::{rngs::StdRng, SeedableRng};
use shared::{
    domain::TaskHandle,
    error::FxError,
    event::{EventOutcome, PageEvent, Task},
};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::{dom::WebDom, local_storage::LocalStoragePreferences, scheduler::WebScheduler};

/// Inline TOML that overrides the default settings when present.
const SETTINGS_ELEMENT: &str = "fx-settings";

/// Everything the page needs from the browser.
pub(crate) struct WebHost {
    dom: WebDom,
    scheduler: WebScheduler,
    prefs: LocalStoragePreferences,
    rng: StdRng,
}

impl WebHost {
    fn env(&mut self) -> Env<'_> {
        Env {
            dom: &mut self.dom,
            scheduler: &mut self.scheduler,
            prefs: &mut self.prefs,
            rng: &mut self.rng,
        }
    }
}

pub(crate) struct Runtime {
    page: Page,
    host: WebHost,
}

impl Runtime {
    pub(crate) fn dom_mut(&mut self) -> &mut WebDom {
        &mut self.host.dom
    }

    pub(crate) fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        let Runtime { page, host } = self;
        let mut env = host.env();
        page.dispatch(&mut env, event)
    }

    pub(crate) fn run_task(&mut self, handle: TaskHandle, task: Task) {
        self.host.scheduler.fired(handle);
        let Runtime { page, host } = self;
        let mut env = host.env();
        page.run_task(&mut env, task);
    }
}

/// Weak route back into the runtime for browser callbacks.
#[derive(Clone)]
pub struct Dispatcher(Weak<RefCell<Runtime>>);

impl Dispatcher {
    /// A dispatcher with no runtime behind it; callbacks routed through it
    /// are dropped.
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    /// Runs `f` against the runtime. Re-entrant calls are dropped with a
    /// warning rather than panicking on the borrow.
    pub(crate) fn with_runtime<R>(&self, f: impl FnOnce(&mut Runtime) -> R) -> Option<R> {
        let runtime = self.0.upgrade()?;
        let Ok(mut runtime) = runtime.try_borrow_mut() else {
            warn!("runtime busy; dropping re-entrant callback");
            return None;
        };
        Some(f(&mut runtime))
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Rc<RefCell<Runtime>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init("info");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let settings = read_settings(&document);
    let prefs = LocalStoragePreferences::from_window(&window);

    let runtime = Rc::new_cyclic(|weak: &Weak<RefCell<Runtime>>| {
        let dispatcher = Dispatcher(weak.clone());
        RefCell::new(Runtime {
            page: Page::new(settings),
            host: WebHost {
                dom: WebDom::new(window.clone(), document.clone(), dispatcher.clone()),
                scheduler: WebScheduler::new(window.clone(), move |handle, task| {
                    dispatcher.with_runtime(|runtime| runtime.run_task(handle, task));
                }),
                prefs,
                rng: StdRng::from_entropy(),
            },
        })
    });

    listeners::install(&window, &document, Dispatcher(Rc::downgrade(&runtime)))?;
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));
    info!("portfolio effects attached");
    Ok(())
}

/// Cancels every pending timer and frame. Listeners stay attached but find
/// an idle page.
#[wasm_bindgen]
pub fn teardown() {
    RUNTIME.with(|slot| {
        let Some(runtime) = slot.borrow().as_ref().map(Rc::downgrade) else {
            return;
        };
        Dispatcher(runtime).with_runtime(|runtime| {
            let Runtime { page, host } = runtime;
            page.teardown(&mut host.env());
        });
    });
}

/// Wraps a rejected browser call so it logs like any other page failure.
pub(crate) fn platform_error(call: &str, error: JsValue) -> FxError {
    FxError::Platform(format!("{call}: {error:?}"))
}

fn read_settings(document: &web_sys::Document) -> Settings {
    let Some(raw) = document
        .get_element_by_id(SETTINGS_ELEMENT)
        .and_then(|element| element.text_content())
    else {
        return Settings::default();
    };

    match Settings::from_toml_str(&raw).and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => {
            debug!("using inline settings");
            settings
        }
        Err(error) => {
            warn!(%error, "ignoring inline settings");
            Settings::default()
        }
    }
}
