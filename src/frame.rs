use crate::app::{now_ms, App};
use crate::constants::{FRAME_STALL_MS, TICK_INTERVAL_MS};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame driver around the shared app.
pub struct FrameContext {
    pub app: Rc<RefCell<App>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(app: Rc<RefCell<App>>) -> Self {
        Self {
            app,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        if dt.as_millis() > FRAME_STALL_MS {
            log::debug!("[frame] stalled for {} ms", dt.as_millis());
        }
        self.app.borrow_mut().frame(now_ms());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// One-second interval for the session timer. Runs for the page lifetime;
/// the mode manager ignores ticks outside a live activities session.
pub fn start_ticker(app: Rc<RefCell<App>>) {
    let closure = Closure::wrap(Box::new(move || {
        app.borrow_mut().tick(now_ms());
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        if let Err(e) = w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        ) {
            log::error!("[timer] setInterval failed: {:?}", e);
        }
    }
    closure.forget();
}
