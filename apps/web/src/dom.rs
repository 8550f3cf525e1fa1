use std::collections::HashMap;

use fx_core::Dom;
use js_sys::{Array, Reflect};
use shared::{
    domain::{NodeId, ObserverId, ObserverOptions, ScrollBehavior, Size},
    event::{DrawCommand, IntersectionEntry, PageEvent},
};
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, NodeList,
    ScrollToOptions, Window,
};

use crate::{platform_error, Dispatcher};

/// Marks an element with its node handle so event targets map back.
const NODE_ATTRIBUTE: &str = "data-fx-node";
const FORM_FIELDS: &str = "input, textarea, select";

struct LiveObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// The live document behind the [`Dom`] seam. Elements are registered on
/// first sight; a slot stays empty when the browser refused to create one.
pub struct WebDom {
    window: Window,
    document: Document,
    dispatcher: Dispatcher,
    elements: Vec<Option<Element>>,
    observers: HashMap<ObserverId, LiveObserver>,
    contexts: HashMap<NodeId, CanvasRenderingContext2d>,
}

impl WebDom {
    pub fn new(window: Window, document: Document, dispatcher: Dispatcher) -> Self {
        let mut dom = Self {
            window,
            document,
            dispatcher,
            elements: Vec::new(),
            observers: HashMap::new(),
            contexts: HashMap::new(),
        };
        let root = dom.document.document_element();
        let head = dom.document.head().map(Into::into);
        let body = dom.document.body().map(Into::into);
        for element in [root, head, body] {
            dom.register_slot(element);
        }
        dom
    }

    fn register_slot(&mut self, element: Option<Element>) -> NodeId {
        let id = NodeId(self.elements.len() as u64);
        if let Some(element) = &element {
            if let Err(error) = element.set_attribute(NODE_ATTRIBUTE, &id.0.to_string()) {
                warn!(error = %platform_error("setAttribute", error), "could not tag element");
            }
        }
        self.elements.push(element);
        id
    }

    /// Handle for `element`, registering it when unseen.
    pub fn node_for(&mut self, element: &Element) -> NodeId {
        let known = element
            .get_attribute(NODE_ATTRIBUTE)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(NodeId)
            .filter(|id| self.element(*id) == Some(element));
        match known {
            Some(id) => id,
            None => self.register_slot(Some(element.clone())),
        }
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0 as usize)?.as_ref()
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }

    fn register_list(&mut self, list: Result<NodeList, JsValue>, selector: &str) -> Vec<NodeId> {
        let list = match list {
            Ok(list) => list,
            Err(error) => {
                warn!(selector, ?error, "selector rejected");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.node_for(&element))
            .collect()
    }

    fn observer_for(&mut self, id: ObserverId, options: &ObserverOptions) -> Option<&IntersectionObserver> {
        if !self.observers.contains_key(&id) {
            let dispatcher = self.dispatcher.clone();
            let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, _observer: IntersectionObserver| {
                    let entries: Vec<IntersectionObserverEntry> = entries
                        .iter()
                        .filter_map(|entry| entry.dyn_into().ok())
                        .collect();
                    dispatcher.with_runtime(|runtime| {
                        let entries = entries
                            .iter()
                            .map(|entry| IntersectionEntry {
                                node: runtime.dom_mut().node_for(&entry.target()),
                                is_intersecting: entry.is_intersecting(),
                            })
                            .collect();
                        runtime.dispatch(PageEvent::Intersection {
                            observer: id,
                            entries,
                        });
                    });
                },
            );

            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(&options.root_margin);
            let observer = match IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &init,
            ) {
                Ok(observer) => observer,
                Err(error) => {
                    warn!(?id, error = %platform_error("IntersectionObserver", error), "observer unavailable");
                    return None;
                }
            };
            debug!(?id, "created intersection observer");
            self.observers.insert(
                id,
                LiveObserver {
                    observer,
                    _callback: callback,
                },
            );
        }
        self.observers.get(&id).map(|live| &live.observer)
    }

    fn context(&mut self, canvas: NodeId) -> Option<CanvasRenderingContext2d> {
        if let Some(context) = self.contexts.get(&canvas) {
            return Some(context.clone());
        }
        let element = self.element(canvas)?.dyn_ref::<HtmlCanvasElement>()?;
        let context = element
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        self.contexts.insert(canvas, context.clone());
        Some(context)
    }
}

impl Dom for WebDom {
    fn document_element(&self) -> NodeId {
        NodeId(0)
    }

    fn head(&self) -> NodeId {
        NodeId(1)
    }

    fn body(&self) -> NodeId {
        NodeId(2)
    }

    fn query(&mut self, selector: &str) -> Option<NodeId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|element| self.node_for(&element)),
            Err(error) => {
                warn!(selector, ?error, "selector rejected");
                None
            }
        }
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let list = self.document.query_selector_all(selector);
        self.register_list(list, selector)
    }

    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(list) = self.element(root).map(|root| root.query_selector_all(selector)) else {
            return Vec::new();
        };
        self.register_list(list, selector)
    }

    fn closest(&mut self, node: NodeId, selector: &str) -> Option<NodeId> {
        let found = self.element(node)?.closest(selector).ok().flatten()?;
        Some(self.node_for(&found))
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.node_for(&parent))
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(ancestor), Some(node)) => ancestor.contains(Some(node.as_ref())),
            _ => false,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            if let Err(error) = element.set_attribute(name, value) {
                warn!(name, error = %platform_error("setAttribute", error), "dom update skipped");
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            if let Err(error) = element.class_list().add_1(class) {
                warn!(class, error = %platform_error("classList.add", error), "dom update skipped");
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            if let Err(error) = element.class_list().remove_1(class) {
                warn!(class, error = %platform_error("classList.remove", error), "dom update skipped");
            }
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(element) = self.element(node) {
            element.set_class_name(class_name);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.html(node) {
            if let Err(error) = element.style().set_property(property, value) {
                warn!(property, error = %platform_error("style.setProperty", error), "dom update skipped");
            }
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        let Some(element) = self.element(node) else {
            return;
        };
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        }
    }

    fn form_data(&self, form: NodeId) -> Vec<(String, String)> {
        let Some(Ok(list)) = self
            .element(form)
            .map(|form| form.query_selector_all(FORM_FIELDS))
        else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|field| {
                let name = field.get_attribute("name")?;
                let value = if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
                    input.value()
                } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
                    area.value()
                } else {
                    field.dyn_ref::<HtmlSelectElement>()?.value()
                };
                Some((name, value))
            })
            .collect()
    }

    fn reset_form(&mut self, form: NodeId) {
        if let Some(form) = self
            .element(form)
            .and_then(|element| element.dyn_ref::<HtmlFormElement>())
        {
            form.reset();
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(element) => self.register_slot(Some(element)),
            Err(error) => {
                warn!(tag, error = %platform_error("createElement", error), "element not created");
                self.register_slot(None)
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            if let Err(error) = parent.append_child(child) {
                warn!(error = %platform_error("appendChild", error), "dom update skipped");
            }
        }
    }

    /// Detaches the element and forgets it; the handle stays dead.
    fn remove(&mut self, node: NodeId) {
        if let Some(element) = self
            .elements
            .get_mut(node.0 as usize)
            .and_then(Option::take)
        {
            element.remove();
        }
        self.contexts.remove(&node);
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.html(node)
            .map(|element| f64::from(element.offset_top()))
            .unwrap_or(0.0)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.html(node)
            .map(|element| f64::from(element.offset_height()))
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport(&self) -> Size {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0)
        };
        Size::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn is_touch_capable(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
            || self.window.navigator().max_touch_points() > 0
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn observe(&mut self, observer: ObserverId, options: &ObserverOptions, node: NodeId) {
        let Some(element) = self.element(node).cloned() else {
            return;
        };
        if let Some(live) = self.observer_for(observer, options) {
            live.observe(&element);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        if let (Some(live), Some(element)) = (self.observers.get(&observer), self.element(node)) {
            live.observer.unobserve(element);
        }
    }

    fn set_canvas_size(&mut self, canvas: NodeId, size: Size) {
        if let Some(canvas) = self
            .element(canvas)
            .and_then(|element| element.dyn_ref::<HtmlCanvasElement>())
        {
            canvas.set_width(size.width.max(0.0) as u32);
            canvas.set_height(size.height.max(0.0) as u32);
        }
    }

    fn draw(&mut self, canvas: NodeId, commands: &[DrawCommand]) {
        let Some(context) = self.context(canvas) else {
            return;
        };
        for command in commands {
            match command {
                DrawCommand::Clear { width, height } => {
                    context.clear_rect(0.0, 0.0, *width, *height);
                }
                DrawCommand::FillCircle {
                    x,
                    y,
                    radius,
                    color,
                } => {
                    context.begin_path();
                    if let Err(error) = context.arc(*x, *y, *radius, 0.0, std::f64::consts::TAU) {
                        warn!(error = %platform_error("arc", error), "circle skipped");
                        continue;
                    }
                    context.set_fill_style_str(color);
                    context.fill();
                }
            }
        }
    }
}
