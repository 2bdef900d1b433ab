#![cfg(target_arch = "wasm32")]
use crate::app::App;
use crate::constants::*;
use slowtide_core::{Mode, ViewKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod analytics;
mod app;
mod audio;
mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod storage;

fn wire_canvas_resize(app: &Rc<RefCell<App>>) {
    let app_resize = app.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        app_resize.borrow_mut().resize();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_start_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    for (id, mode) in [
        (BEGIN_ACTIVITIES_ID, Mode::Activities),
        (BEGIN_STORY_ID, Mode::Story),
    ] {
        let app = app.clone();
        dom::add_click_listener(document, id, move || {
            app.borrow_mut().begin(mode);
            schedule_nav_reveal(&app);
        });
    }
}

fn schedule_nav_reveal(app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let reveal = Closure::once(move || app.borrow().reveal_nav());
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            reveal.as_ref().unchecked_ref(),
            NAV_FADE_IN_MS,
        );
    }
    reveal.forget();
}

fn wire_nav_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    for view in ViewKind::ACTIVITIES {
        let app = app.clone();
        dom::add_click_listener(document, &format!("btn-{}", view), move || {
            app.borrow_mut().switch_view(view);
        });
    }
}

fn wire_settings_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    for el in dom::query_all(document, SETTING_BUTTON_SELECTOR) {
        let (Some(name), Some(value)) = (el.get_attribute("data-setting"), el.get_attribute("data-value"))
        else {
            continue;
        };
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move || {
            app.borrow_mut().change_setting(&name, &value);
        }) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_overlay_buttons(document: &web::Document, app: &Rc<RefCell<App>>) {
    let bind = |id: &str, f: fn(&mut App)| {
        let app = app.clone();
        dom::add_click_listener(document, id, move || f(&mut app.borrow_mut()));
    };
    bind(TITLE_ID, App::title_tap);
    bind(MATHS_SUBMIT_ID, App::submit_answer);
    bind(MATHS_CANCEL_ID, App::cancel_challenge);
    bind(SETTINGS_CLOSE_ID, |a| a.close_settings());
    bind(PAUSE_BUTTON_ID, App::toggle_pause);
    bind(QUIT_BUTTON_ID, |a| a.show_quit_confirm());
    bind(CONFIRM_QUIT_ID, App::reset);
    bind(CANCEL_QUIT_ID, |a| a.cancel_quit());
    bind(ADMIN_SUNSET_ID, App::admin_force_sunset);
    bind(ADMIN_PREV_SCENE_ID, |a| a.admin_cycle_scene(false));
    bind(ADMIN_NEXT_SCENE_ID, |a| a.admin_cycle_scene(true));
    bind(ADMIN_CLOSE_ID, App::toggle_admin);

    // Enter submits the challenge answer.
    if let Some(input) = document.get_element_by_id(MATHS_ANSWER_ID) {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            if ev.key() == "Enter" {
                app.borrow_mut().submit_answer();
                ev.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

async fn register_service_worker() {
    let Some(window) = web::window() else {
        return;
    };
    let container = window.navigator().service_worker();
    match JsFuture::from(container.register("sw.js")).await {
        Ok(_) => log::info!("[sw] registered"),
        Err(e) => log::warn!("[sw] registration failed: {:?}", e),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("slowtide starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    spawn_local(register_service_worker());
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let app = Rc::new(RefCell::new(App::new(document.clone(), canvas)?));

    wire_canvas_resize(&app);
    wire_start_buttons(&document, &app);
    wire_nav_buttons(&document, &app);
    wire_settings_buttons(&document, &app);
    wire_overlay_buttons(&document, &app);
    events::pointer::wire_input_handlers(&app);
    events::keyboard::wire_global_keydown(app.clone());

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext::new(app.clone()))));
    frame::start_ticker(app);
    Ok(())
}
