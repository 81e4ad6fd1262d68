use std::{cell::RefCell, fmt::Debug, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::{js, Error, OrbitApp};

const KEYDOWN: &str = "keydown";

/// Window-level `keydown` listener driving an [`OrbitApp`].
///
/// Every key-down re-renders the app; W/A/S/D additionally orbit the camera
/// first. The listener is removed when the handler is dropped.
pub(crate) struct KeyboardHandler {
    window: Window,
    key_down: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl Debug for KeyboardHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyboardHandler {{ ... }}")
    }
}

impl KeyboardHandler {
    pub(crate) fn new(app: Rc<RefCell<OrbitApp>>) -> Result<Self, Error> {
        let window = js::window()?;

        let key_down = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            app.borrow_mut().handle_key_code(event.key_code());
        }) as Box<dyn FnMut(_)>);

        window
            .add_event_listener_with_callback(KEYDOWN, key_down.as_ref().unchecked_ref())
            .map_err(|_| Error::listener_registration_failed(KEYDOWN))?;

        Ok(Self { window, key_down })
    }
}

impl Drop for KeyboardHandler {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback(KEYDOWN, self.key_down.as_ref().unchecked_ref());
    }
}
