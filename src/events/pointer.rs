use crate::app::App;
use crate::constants::{HEADER_ID, MODAL_CLASS, NAV_BUTTON_CLASS, STORY_SCROLL_STEP};
use crate::dom;
use slowtide_core::modes::InputKind;
use slowtide_core::Mode;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Presses that land on chrome rather than the play area.
fn on_chrome(ev: &web::Event) -> bool {
    dom::event_within(ev, &format!(".{}", NAV_BUTTON_CLASS))
        || dom::event_within(ev, &format!("#{}", HEADER_ID))
        || dom::event_within(ev, &format!(".{}", MODAL_CLASS))
}

pub fn wire_input_handlers(app: &Rc<RefCell<App>>) {
    let canvas = app.borrow().canvas().clone();
    wire_pointerdown(app, &canvas);
    wire_pointermove(app, &canvas);
    for name in ["pointerup", "pointercancel", "pointerleave"] {
        wire_pointer_end(app, &canvas, name);
    }
    wire_wheel(app, &canvas);
}

fn wire_pointerdown(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if on_chrome(&ev) {
            return;
        }
        ev.prevent_default();
        _ = target.set_pointer_capture(ev.pointer_id());
        let point = dom::pointer_canvas_px(&ev, &target);
        app.borrow_mut().pointer(InputKind::Start, point);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if on_chrome(&ev) {
            return;
        }
        let point = dom::pointer_canvas_px(&ev, &target);
        app.borrow_mut().pointer(InputKind::Move, point);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointer_end(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement, event: &str) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if target.has_pointer_capture(ev.pointer_id()) {
            _ = target.release_pointer_capture(ev.pointer_id());
        }
        let point = dom::pointer_canvas_px(&ev, &target);
        app.borrow_mut().pointer(InputKind::End, point);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Wheel and trackpad scroll pan the story world.
fn wire_wheel(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let mut app = app.borrow_mut();
        if app.mode() != Some(Mode::Story) {
            return;
        }
        let delta = if ev.delta_x().abs() > ev.delta_y().abs() {
            ev.delta_x()
        } else {
            ev.delta_y()
        };
        if delta != 0.0 {
            app.scroll_story(STORY_SCROLL_STEP * delta.signum() as f32);
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
