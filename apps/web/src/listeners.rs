//! Native event wiring. Each listener maps its event onto a [`PageEvent`]
//! and forwards it through the [`Dispatcher`]; listeners live as long as
//! the page, so their closures are leaked on purpose.

use shared::{domain::NodeId, event::PageEvent};
use tracing::debug;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, ErrorEvent, Event, EventTarget, KeyboardEvent, MouseEvent, Window};

use crate::{Dispatcher, Runtime};

fn listen<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    E: wasm_bindgen::convert::FromWasmAbi,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn element_of(target: Option<EventTarget>) -> Option<Element> {
    target?.dyn_into::<Element>().ok()
}

fn node_of(runtime: &mut Runtime, target: Option<EventTarget>) -> Option<NodeId> {
    element_of(target).map(|element| runtime.dom_mut().node_for(&element))
}

/// Dispatches the event built from `event`'s target and cancels the native
/// default when the page asks for it.
fn forward_targeted(
    dispatcher: &Dispatcher,
    event: &Event,
    build: impl FnOnce(NodeId) -> PageEvent,
) {
    let prevent = dispatcher
        .with_runtime(|runtime| {
            let target = node_of(runtime, event.target())?;
            Some(runtime.dispatch(build(target)).prevent_default)
        })
        .flatten()
        .unwrap_or(false);
    if prevent {
        event.prevent_default();
    }
}

fn forward(dispatcher: &Dispatcher, event: PageEvent) {
    dispatcher.with_runtime(|runtime| runtime.dispatch(event));
}

pub(crate) fn install(
    window: &Window,
    document: &Document,
    dispatcher: Dispatcher,
) -> Result<(), JsValue> {
    let doc: &EventTarget = document.as_ref();
    let win: &EventTarget = window.as_ref();

    let d = dispatcher.clone();
    listen(doc, "click", move |event: Event| {
        forward_targeted(&d, &event, |target| PageEvent::Click { target });
    })?;

    let d = dispatcher.clone();
    listen(doc, "submit", move |event: Event| {
        forward_targeted(&d, &event, |form| PageEvent::Submit { form });
    })?;

    let d = dispatcher.clone();
    listen(doc, "focusin", move |event: Event| {
        forward_targeted(&d, &event, |target| PageEvent::Focus { target });
    })?;

    let d = dispatcher.clone();
    listen(doc, "focusout", move |event: Event| {
        forward_targeted(&d, &event, |target| PageEvent::Blur { target });
    })?;

    let d = dispatcher.clone();
    listen(doc, "keydown", move |event: KeyboardEvent| {
        forward(&d, PageEvent::KeyDown { key: event.key() });
    })?;

    let d = dispatcher.clone();
    listen(doc, "mousedown", move |_: MouseEvent| {
        forward(&d, PageEvent::MouseDown);
    })?;

    let d = dispatcher.clone();
    listen(doc, "mousemove", move |event: MouseEvent| {
        forward(
            &d,
            PageEvent::PointerMove {
                x: f64::from(event.client_x()),
                y: f64::from(event.client_y()),
            },
        );
    })?;

    let d = dispatcher.clone();
    listen(doc, "mouseover", move |event: MouseEvent| {
        forward_targeted(&d, &event, |target| PageEvent::PointerOver { target });
    })?;

    let d = dispatcher.clone();
    listen(doc, "mouseout", move |event: MouseEvent| {
        d.with_runtime(|runtime| {
            let Some(target) = node_of(runtime, event.target()) else {
                return;
            };
            let related = node_of(runtime, event.related_target());
            runtime.dispatch(PageEvent::PointerOut { target, related });
        });
    })?;

    let d = dispatcher.clone();
    listen(doc, "mouseleave", move |_: MouseEvent| {
        forward(&d, PageEvent::PointerLeaveWindow);
    })?;

    let d = dispatcher.clone();
    listen(doc, "mouseenter", move |_: MouseEvent| {
        forward(&d, PageEvent::PointerEnterWindow);
    })?;

    let d = dispatcher.clone();
    let scroll_window = window.clone();
    listen(win, "scroll", move |_: Event| {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        forward(&d, PageEvent::Scroll { scroll_y });
    })?;

    let d = dispatcher.clone();
    let resize_window = window.clone();
    listen(win, "resize", move |_: Event| {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
        };
        forward(
            &d,
            PageEvent::Resize {
                width: dimension(resize_window.inner_width()),
                height: dimension(resize_window.inner_height()),
            },
        );
    })?;

    let d = dispatcher.clone();
    listen(win, "error", move |event: ErrorEvent| {
        forward(
            &d,
            PageEvent::Error {
                message: event.message(),
            },
        );
    })?;

    if document.ready_state() == "loading" {
        let d = dispatcher;
        listen(doc, "DOMContentLoaded", move |_: Event| {
            forward(&d, PageEvent::Ready);
        })?;
    } else {
        debug!("document already parsed; starting now");
        forward(&dispatcher, PageEvent::Ready);
    }
    Ok(())
}
