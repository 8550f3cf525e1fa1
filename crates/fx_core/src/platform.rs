//! Seams between the controllers and whatever hosts them (a browser or the headless harness).

use std::time::Duration;

use rand::RngCore;
use shared::{
    domain::{NodeId, ObserverId, ObserverOptions, ScrollBehavior, Size, TaskHandle},
    event::{DrawCommand, Task},
};
use storage::PreferenceStore;

/// Document and viewport access.
///
/// Lookups that can hand out new node handles take `&mut self` because a
/// host may need to register the element before returning its handle.
pub trait Dom {
    fn document_element(&self) -> NodeId;
    fn head(&self) -> NodeId;
    fn body(&self) -> NodeId;

    fn query(&mut self, selector: &str) -> Option<NodeId>;
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;
    fn query_within(&mut self, root: NodeId, selector: &str) -> Vec<NodeId>;
    fn closest(&mut self, node: NodeId, selector: &str) -> Option<NodeId>;
    fn parent(&mut self, node: NodeId) -> Option<NodeId>;
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    fn set_class_name(&mut self, node: NodeId, class_name: &str);
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn text(&self, node: NodeId) -> String;
    fn set_text(&mut self, node: NodeId, text: &str);

    fn value(&self, node: NodeId) -> String;
    fn set_disabled(&mut self, node: NodeId, disabled: bool);
    fn form_data(&self, form: NodeId) -> Vec<(String, String)>;
    fn reset_form(&mut self, form: NodeId);

    fn create_element(&mut self, tag: &str) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    fn remove(&mut self, node: NodeId);

    fn offset_top(&self, node: NodeId) -> f64;
    fn offset_height(&self, node: NodeId) -> f64;
    fn scroll_y(&self) -> f64;
    fn viewport(&self) -> Size;
    fn is_touch_capable(&self) -> bool;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    fn observe(&mut self, observer: ObserverId, options: &ObserverOptions, node: NodeId);
    fn unobserve(&mut self, observer: ObserverId, node: NodeId);

    fn set_canvas_size(&mut self, canvas: NodeId, size: Size);
    fn draw(&mut self, canvas: NodeId, commands: &[DrawCommand]);
}

/// Timer and animation-frame scheduling. Cancelling a handle that already
/// fired or was never issued is a no-op.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskHandle;
    fn request_frame(&mut self, task: Task) -> TaskHandle;
    fn cancel(&mut self, handle: TaskHandle);
}

/// Everything a controller may touch, passed explicitly on every call.
pub struct Env<'a> {
    pub dom: &'a mut dyn Dom,
    pub scheduler: &'a mut dyn Scheduler,
    pub prefs: &'a mut dyn PreferenceStore,
    pub rng: &'a mut dyn RngCore,
}

/// Formats a number the way a browser prints it inside a CSS string.
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

pub fn css_px(value: f64) -> String {
    format!("{}px", css_number(value))
}

/// Applies `property: value` pairs in order.
pub fn apply_styles(dom: &mut dyn Dom, node: NodeId, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        dom.set_style(node, property, value);
    }
}
