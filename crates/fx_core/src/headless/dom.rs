use std::collections::{BTreeMap, HashMap};

use shared::{
    domain::{NodeId, ObserverId, ObserverOptions, ScrollBehavior, Size},
    event::DrawCommand,
};
use tracing::debug;

use super::selector::{ElementView, SelectorList};
use crate::platform::Dom;

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    disabled: bool,
    offset_top: f64,
    offset_height: f64,
}

#[derive(Debug, Clone)]
pub struct Observation {
    pub observer: ObserverId,
    pub node: NodeId,
    pub options: ObserverOptions,
}

/// In-memory document used by tests, the CLI simulator and anything else
/// that runs the controllers without a browser.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    scroll_y: f64,
    viewport: Size,
    touch_capable: bool,
    observations: Vec<Observation>,
    canvas_sizes: HashMap<NodeId, Size>,
    frames: HashMap<NodeId, Vec<DrawCommand>>,
    frame_counts: HashMap<NodeId, usize>,
    scroll_requests: Vec<(f64, ScrollBehavior)>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            scroll_y: 0.0,
            viewport: Size::new(1280.0, 800.0),
            touch_capable: false,
            observations: Vec::new(),
            canvas_sizes: HashMap::new(),
            frames: HashMap::new(),
            frame_counts: HashMap::new(),
            scroll_requests: Vec::new(),
        };
        dom.root = dom.alloc("html");
        dom.head = dom.alloc("head");
        dom.body = dom.alloc("body");
        dom.link(dom.root, dom.head);
        dom.link(dom.root, dom.body);
        dom
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        id
    }

    fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0 as usize)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.node_mut(parent) {
            data.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).and_then(|data| data.parent) else {
            return;
        };
        if let Some(data) = self.node_mut(parent) {
            data.children.retain(|child| *child != node);
        }
        if let Some(data) = self.node_mut(node) {
            data.parent = None;
        }
    }

    /// Creates an element under `parent`. A `class` attribute is split into classes.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.alloc(tag);
        for (name, value) in attributes {
            self.set_attribute(node, name, value);
        }
        self.link(parent, node);
        node
    }

    pub fn append_text_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let node = self.append_element(parent, tag, attributes);
        if let Some(data) = self.node_mut(node) {
            data.text = text.to_string();
        }
        node
    }

    pub fn set_layout(&mut self, node: NodeId, offset_top: f64, offset_height: f64) {
        if let Some(data) = self.node_mut(node) {
            data.offset_top = offset_top;
            data.offset_height = offset_height;
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.value = value.to_string();
        }
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_touch_capable(&mut self, touch_capable: bool) {
        self.touch_capable = touch_capable;
    }

    /// Preorder walk below `root`, excluding `root` itself.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(root)
            .map(|data| data.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(data) = self.node(node) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        out
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(error) => {
                debug!(%error, "selector did not parse; treating as no match");
                return Vec::new();
            }
        };
        self.descendants(root)
            .into_iter()
            .filter(|node| list.matches(self, *node))
            .collect()
    }

    pub fn find(&self, selector: &str) -> Option<NodeId> {
        self.select(self.root, selector).into_iter().next()
    }

    pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root, selector)
    }

    pub fn find_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.select(root, selector)
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.node(id).and_then(|data| data.parent);
        }
        false
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|data| data.tag.as_str())
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)
            .and_then(|data| data.styles.get(property))
            .map(String::as_str)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        ElementView::has_class(self, node, class)
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node).map(|data| data.classes.clone()).unwrap_or_default()
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|data| data.disabled)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|data| data.children.clone()).unwrap_or_default()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn observers_of(&self, node: NodeId) -> Vec<ObserverId> {
        self.observations
            .iter()
            .filter(|observation| observation.node == node)
            .map(|observation| observation.observer)
            .collect()
    }

    pub fn canvas_size(&self, canvas: NodeId) -> Option<Size> {
        self.canvas_sizes.get(&canvas).copied()
    }

    pub fn last_frame(&self, canvas: NodeId) -> Option<&[DrawCommand]> {
        self.frames.get(&canvas).map(Vec::as_slice)
    }

    pub fn frames_drawn(&self, canvas: NodeId) -> usize {
        self.frame_counts.get(&canvas).copied().unwrap_or(0)
    }

    pub fn scroll_requests(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_requests
    }
}

impl ElementView for MemoryDom {
    fn tag(&self, node: NodeId) -> &str {
        self.node(node).map(|data| data.tag.as_str()).unwrap_or("")
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        Dom::attribute(self, node, name)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|data| data.parent)
    }
}

impl Dom for MemoryDom {
    fn document_element(&self) -> NodeId {
        self.root
    }

    fn head(&self) -> NodeId {
        self.head
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.find(selector)
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        self.find_all(selector)
    }

    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.find_within(root, selector)
    }

    fn closest(&mut self, node: NodeId, selector: &str) -> Option<NodeId> {
        let list = SelectorList::parse(selector).ok()?;
        let mut current = Some(node);
        while let Some(id) = current {
            if list.matches(&*self, id) {
                return Some(id);
            }
            current = self.parent_of(id);
        }
        None
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        self.parent_of(node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let data = self.node(node)?;
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(node, value);
            return;
        }
        if let Some(data) = self.node_mut(node) {
            if name == "value" && data.value.is_empty() {
                data.value = value.to_string();
            }
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        ElementView::has_class(self, node, class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.node_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.node_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(data) = self.node_mut(node) {
            data.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, node: NodeId) -> String {
        let Some(data) = self.node(node) else {
            return String::new();
        };
        let mut text = data.text.clone();
        for child in &data.children {
            text.push_str(&self.text(*child));
        }
        text
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let children = self.children(node);
        for child in children {
            self.detach(child);
        }
        if let Some(data) = self.node_mut(node) {
            data.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.node(node).map(|data| data.value.clone()).unwrap_or_default()
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(data) = self.node_mut(node) {
            data.disabled = disabled;
        }
    }

    fn form_data(&self, form: NodeId) -> Vec<(String, String)> {
        self.find_within(form, "input, textarea, select")
            .into_iter()
            .filter_map(|field| {
                let name = Dom::attribute(self, field, "name")?;
                Some((name, self.value(field)))
            })
            .collect()
    }

    fn reset_form(&mut self, form: NodeId) {
        for field in self.find_within(form, "input, textarea, select") {
            let default = Dom::attribute(self, field, "value").unwrap_or_default();
            self.set_value(field, &default);
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(tag)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.node(node).map(|data| data.offset_top).unwrap_or(0.0)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.node(node).map(|data| data.offset_height).unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn is_touch_capable(&self) -> bool {
        self.touch_capable
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push((top, behavior));
    }

    fn observe(&mut self, observer: ObserverId, options: &ObserverOptions, node: NodeId) {
        let already = self
            .observations
            .iter()
            .any(|observation| observation.observer == observer && observation.node == node);
        if !already {
            self.observations.push(Observation {
                observer,
                node,
                options: options.clone(),
            });
        }
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        self.observations
            .retain(|observation| !(observation.observer == observer && observation.node == node));
    }

    fn set_canvas_size(&mut self, canvas: NodeId, size: Size) {
        self.canvas_sizes.insert(canvas, size);
    }

    fn draw(&mut self, canvas: NodeId, commands: &[DrawCommand]) {
        self.frames.insert(canvas, commands.to_vec());
        *self.frame_counts.entry(canvas).or_default() += 1;
    }
}
