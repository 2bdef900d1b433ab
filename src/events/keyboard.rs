use super::keymap::{action_for, KeyAction};
use crate::app::App;
use crate::constants::STORY_SCROLL_STEP;
use slowtide_core::Mode;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<App>>) {
    let Some(action) = action_for(&ev.key(), ev.ctrl_key(), ev.shift_key()) else {
        return;
    };
    let mut app = app.borrow_mut();
    match action {
        KeyAction::ToggleAdmin => {
            app.toggle_admin();
            log::info!("[keys] admin overlay {}", if app.admin_visible() { "on" } else { "off" });
            ev.prevent_default();
        }
        KeyAction::CloseAdmin => {
            if app.admin_visible() {
                app.toggle_admin();
            }
        }
        KeyAction::ScrollLeft | KeyAction::ScrollRight => {
            let dx = if action == KeyAction::ScrollLeft {
                -STORY_SCROLL_STEP
            } else {
                STORY_SCROLL_STEP
            };
            if app.mode() == Some(Mode::Story) {
                app.scroll_story(dx);
                ev.prevent_default();
            }
        }
    }
}

pub fn wire_global_keydown(app: Rc<RefCell<App>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
