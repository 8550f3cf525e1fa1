use serde::{Deserialize, Serialize};

use crate::domain::{NodeId, ObserverId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub node: NodeId,
    pub is_intersecting: bool,
}

/// Browser-dispatched events, already mapped onto node handles by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PageEvent {
    Ready,
    Click {
        target: NodeId,
    },
    KeyDown {
        key: String,
    },
    MouseDown,
    Focus {
        target: NodeId,
    },
    Blur {
        target: NodeId,
    },
    Submit {
        form: NodeId,
    },
    Scroll {
        scroll_y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerOver {
        target: NodeId,
    },
    PointerOut {
        target: NodeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        related: Option<NodeId>,
    },
    PointerLeaveWindow,
    PointerEnterWindow,
    Intersection {
        observer: ObserverId,
        entries: Vec<IntersectionEntry>,
    },
    Error {
        message: String,
    },
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Ready => "ready",
            PageEvent::Click { .. } => "click",
            PageEvent::KeyDown { .. } => "key_down",
            PageEvent::MouseDown => "mouse_down",
            PageEvent::Focus { .. } => "focus",
            PageEvent::Blur { .. } => "blur",
            PageEvent::Submit { .. } => "submit",
            PageEvent::Scroll { .. } => "scroll",
            PageEvent::Resize { .. } => "resize",
            PageEvent::PointerMove { .. } => "pointer_move",
            PageEvent::PointerOver { .. } => "pointer_over",
            PageEvent::PointerOut { .. } => "pointer_out",
            PageEvent::PointerLeaveWindow => "pointer_leave_window",
            PageEvent::PointerEnterWindow => "pointer_enter_window",
            PageEvent::Intersection { .. } => "intersection",
            PageEvent::Error { .. } => "error",
        }
    }
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            prevent_default: true,
        }
    }
}

/// Deferred work. Hosts keep tasks as data and hand them back to the page
/// once their delay elapses or the next animation frame arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Task {
    TypeTick,
    CounterTick { node: NodeId },
    FinishSubmit { form: NodeId },
    ShowNotification { node: NodeId },
    DismissNotification { node: NodeId },
    RemoveNotification { node: NodeId },
    FadeLoader { node: NodeId },
    RemoveLoader { node: NodeId },
    RestoreLinkScale { node: NodeId },
    InitEnhanced,
    DebouncedScroll { scroll_y: f64 },
    ParticleFrame,
    CursorFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: String,
    },
}
