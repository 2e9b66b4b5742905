//! Browser input wiring
//!
//! Listeners convert mouse and touch events against the game element's
//! bounding rect and forward them to the shared session.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, TouchEvent};

use super::{PointerKind, PointerSample, handle_pointer};
use crate::session::Session;
use crate::sim::Playfield;

/// Current horizontal extent of `element`
pub fn playfield_of(element: &Element) -> Playfield {
    let rect = element.get_bounding_client_rect();
    Playfield::new(rect.left() as f32, rect.width() as f32)
}

/// Register mouse and touch listeners on `element`
pub fn attach_input(element: &Element, session: Rc<RefCell<Session>>) -> Result<(), JsValue> {
    {
        let session = session.clone();
        let target = element.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let sample = PointerSample::new(
                PointerKind::Mouse,
                event.client_x() as f32,
                event.client_y() as f32,
            );
            handle_pointer(&mut *session.borrow_mut(), sample, playfield_of(&target));
        });
        element.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for (name, kind) in [
        ("touchstart", PointerKind::TouchStart),
        ("touchmove", PointerKind::TouchMove),
    ] {
        let session = session.clone();
        let target = element.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            let sample =
                PointerSample::new(kind, touch.client_x() as f32, touch.client_y() as f32);
            if handle_pointer(&mut *session.borrow_mut(), sample, playfield_of(&target)) {
                event.prevent_default();
                event.stop_propagation();
            }
        });
        element.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    log::info!("Input listeners attached");
    Ok(())
}
