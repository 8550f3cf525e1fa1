#![cfg(target_arch = "wasm32")]

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use fx_core::{Dom, Scheduler};
use portfolio_web::{
    dom::WebDom, local_storage::LocalStoragePreferences, scheduler::WebScheduler, Dispatcher,
};
use shared::{domain::NodeId, event::Task};
use storage::PreferenceStore;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const THEME_KEY: &str = "fx-test-theme";

fn window() -> web_sys::Window {
    web_sys::window().expect("window")
}

fn web_dom() -> WebDom {
    let window = window();
    let document = window.document().expect("document");
    WebDom::new(window, document, Dispatcher::detached())
}

async fn sleep(millis: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            .expect("setTimeout");
    });
    JsFuture::from(promise).await.expect("sleep");
}

/// A scheduler whose sink records every task and releases its handle, the
/// way the runtime does.
fn recording_scheduler() -> (Rc<RefCell<WebScheduler>>, Rc<RefCell<Vec<Task>>>) {
    let fired = Rc::new(RefCell::new(Vec::new()));
    let scheduler = Rc::new_cyclic(|weak: &Weak<RefCell<WebScheduler>>| {
        let weak = weak.clone();
        let fired = Rc::clone(&fired);
        RefCell::new(WebScheduler::new(window(), move |handle, task| {
            if let Some(scheduler) = weak.upgrade() {
                scheduler.borrow_mut().fired(handle);
            }
            fired.borrow_mut().push(task);
        }))
    });
    (scheduler, fired)
}

#[wasm_bindgen_test]
fn local_storage_round_trips_the_theme() {
    let mut prefs = LocalStoragePreferences::from_window(&window());
    prefs.set(THEME_KEY, "light").expect("set");
    assert_eq!(prefs.get(THEME_KEY).expect("get").as_deref(), Some("light"));

    let reopened = LocalStoragePreferences::from_window(&window());
    assert_eq!(reopened.get(THEME_KEY).expect("get").as_deref(), Some("light"));
    assert_eq!(reopened.get("fx-test-missing").expect("get"), None);
}

#[wasm_bindgen_test]
fn created_elements_are_tagged_and_queryable() {
    let mut dom = web_dom();
    let body = dom.body();
    let card = dom.create_element("div");
    dom.set_attribute(card, "id", "fx-test-card");
    dom.append_child(body, card);

    assert_eq!(dom.attribute(card, "data-fx-node"), Some(card.0.to_string()));
    assert_eq!(dom.query("#fx-test-card"), Some(card));
    assert_eq!(dom.closest(card, "body"), Some(body));

    dom.remove(card);
}

#[wasm_bindgen_test]
fn class_and_style_writes_reach_the_element() {
    let mut dom = web_dom();
    let body = dom.body();
    let link = dom.create_element("a");
    dom.append_child(body, link);

    dom.add_class(link, "active");
    assert!(dom.has_class(link, "active"));
    dom.remove_class(link, "active");
    assert!(!dom.has_class(link, "active"));

    dom.set_style(link, "opacity", "0.5");
    let style = dom.attribute(link, "style").unwrap_or_default();
    assert!(style.contains("opacity: 0.5"), "{style}");

    dom.remove(link);
}

#[wasm_bindgen_test]
fn removed_elements_release_their_handle() {
    let mut dom = web_dom();
    let body = dom.body();
    let note = dom.create_element("div");
    dom.set_attribute(note, "id", "fx-test-note");
    dom.append_child(body, note);

    dom.remove(note);

    assert_eq!(dom.query("#fx-test-note"), None);
    assert_eq!(dom.attribute(note, "id"), None);
    assert!(!dom.contains(body, note));
}

#[wasm_bindgen_test]
async fn cancelled_timeout_never_fires() {
    let (scheduler, fired) = recording_scheduler();
    let dropped = {
        let mut scheduler = scheduler.borrow_mut();
        scheduler.schedule(Duration::from_millis(10), Task::TypeTick);
        scheduler.schedule(Duration::from_millis(10), Task::FinishSubmit { form: NodeId(7) })
    };
    scheduler.borrow_mut().cancel(dropped);
    assert_eq!(scheduler.borrow().pending(), 1);

    sleep(60).await;

    assert_eq!(*fired.borrow(), vec![Task::TypeTick]);
    assert_eq!(scheduler.borrow().pending(), 0);
}

#[wasm_bindgen_test]
async fn cancelled_frame_never_fires() {
    let (scheduler, fired) = recording_scheduler();
    let frame = scheduler.borrow_mut().request_frame(Task::ParticleFrame);
    scheduler.borrow_mut().cancel(frame);
    assert_eq!(scheduler.borrow().pending(), 0);

    sleep(100).await;

    assert!(fired.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn repeated_debounce_keeps_one_pending_timer() {
    let (scheduler, fired) = recording_scheduler();
    let mut previous = None;
    for _ in 0..20 {
        let mut scheduler = scheduler.borrow_mut();
        if let Some(handle) = previous.take() {
            scheduler.cancel(handle);
        }
        previous = Some(scheduler.schedule(
            Duration::from_millis(16),
            Task::DebouncedScroll { scroll_y: 120.0 },
        ));
    }
    assert_eq!(scheduler.borrow().pending(), 1);

    sleep(60).await;

    assert_eq!(*fired.borrow(), vec![Task::DebouncedScroll { scroll_y: 120.0 }]);
    assert_eq!(scheduler.borrow().pending(), 0);
}
