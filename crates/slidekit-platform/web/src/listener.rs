use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::WebSliderError;

/// A DOM event listener that is removed when dropped.
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event_type: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebSliderError> {
        Self::register(target, event_type, false, handler)
    }

    /// Listen during the capture phase, ahead of any listener on descendants.
    pub fn new_capturing(
        target: &EventTarget,
        event_type: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebSliderError> {
        Self::register(target, event_type, true, handler)
    }

    fn register(
        target: &EventTarget,
        event_type: &'static str,
        capture: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, WebSliderError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback_and_bool(
                event_type,
                callback.as_ref().unchecked_ref(),
                capture,
            )
            .map_err(|source| WebSliderError::Listener { event_type, source })?;
        Ok(Self {
            target: target.clone(),
            event_type,
            capture,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self.target.remove_event_listener_with_callback_and_bool(
            self.event_type,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        ) {
            log::warn!("failed to remove '{}' listener: {err:?}", self.event_type);
        }
    }
}
