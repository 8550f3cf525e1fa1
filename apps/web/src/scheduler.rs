use std::{collections::HashMap, rc::Rc, time::Duration};

use fx_core::Scheduler;
use shared::{domain::TaskHandle, event::Task};
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::platform_error;

#[derive(Debug, Clone, Copy)]
enum BrowserId {
    Timeout(i32),
    Frame(i32),
}

/// A scheduled callback. Dropping it frees the Rust side of the closure, so
/// an entry lives exactly until it fires or is cancelled.
struct Pending {
    id: BrowserId,
    _callback: Closure<dyn FnMut()>,
}

/// `setTimeout` and `requestAnimationFrame` behind the scheduler seam. Each
/// firing hands `(handle, task)` to the sink, which must report it back via
/// [`WebScheduler::fired`].
pub struct WebScheduler {
    window: Window,
    sink: Rc<dyn Fn(TaskHandle, Task)>,
    next_handle: u64,
    pending: HashMap<u64, Pending>,
}

impl WebScheduler {
    pub fn new(window: Window, sink: impl Fn(TaskHandle, Task) + 'static) -> Self {
        Self {
            window,
            sink: Rc::new(sink),
            next_handle: 0,
            pending: HashMap::new(),
        }
    }

    /// Releases the closure of a handle that just ran.
    pub fn fired(&mut self, handle: TaskHandle) {
        self.pending.remove(&handle.0);
    }

    /// Timeouts and frames that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn allocate(&mut self) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn callback(&self, handle: TaskHandle, task: Task) -> Closure<dyn FnMut()> {
        let sink = Rc::clone(&self.sink);
        Closure::once(move || sink(handle, task))
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskHandle {
        let handle = self.allocate();
        let callback = self.callback(handle, task);
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(id) => {
                self.pending.insert(
                    handle.0,
                    Pending {
                        id: BrowserId::Timeout(id),
                        _callback: callback,
                    },
                );
            }
            Err(error) => warn!(error = %platform_error("setTimeout", error), "task dropped"),
        }
        handle
    }

    fn request_frame(&mut self, task: Task) -> TaskHandle {
        let handle = self.allocate();
        let callback = self.callback(handle, task);
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.pending.insert(
                    handle.0,
                    Pending {
                        id: BrowserId::Frame(id),
                        _callback: callback,
                    },
                );
            }
            Err(error) => {
                warn!(error = %platform_error("requestAnimationFrame", error), "frame dropped")
            }
        }
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let Some(pending) = self.pending.remove(&handle.0) else {
            return;
        };
        match pending.id {
            BrowserId::Timeout(id) => self.window.clear_timeout_with_handle(id),
            BrowserId::Frame(id) => {
                if let Err(error) = self.window.cancel_animation_frame(id) {
                    warn!(error = %platform_error("cancelAnimationFrame", error), "frame not cancelled");
                }
            }
        }
    }
}
