//! Event listener bookkeeping.
//!
//! Every listener the painter attaches goes through a `ListenerRegistry`
//! so that teardown can remove exactly what init added. Dropping the
//! registry detaches whatever is still attached.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

struct Listener {
    target: EventTarget,
    event: &'static str,
    handler: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` for `event` on `target` and remember it.
    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let handler = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            handler,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener, most recent first. Safe to call repeatedly.
    pub fn detach_all(&mut self) {
        let count = self.listeners.len();
        while let Some(listener) = self.listeners.pop() {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.handler.as_ref().unchecked_ref(),
            ) {
                log::warn!("failed to detach `{}` listener: {err:?}", listener.event);
            }
        }
        if count > 0 {
            log::debug!("detached {count} listeners");
        }
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        self.detach_all();
    }
}
