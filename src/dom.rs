use crate::constants::{HIDDEN_CLASS, SELECTED_CLASS};
use slowtide_core::activities::Surface;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = wasm_bindgen::closure::Closure::wrap(
                Box::new(move || handler()) as Box<dyn FnMut()>
            );
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::warn!("[dom] missing #{}", element_id),
    }
}

fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn set_display(document: &web::Document, id: &str, display: &str) {
    if let Some(el) = html_element(document, id) {
        _ = el.style().set_property("display", display);
    }
}

pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
    }
    set_display(document, id, "");
}

pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
    }
    set_display(document, id, "none");
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_opacity(document: &web::Document, id: &str, opacity: f64) {
    if let Some(el) = html_element(document, id) {
        _ = el
            .style()
            .set_property("opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)));
    }
}

pub fn toggle_class(document: &web::Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().toggle_with_force(class, on);
    }
}

/// Read and clear a text input.
pub fn take_input_value(document: &web::Document, id: &str) -> Option<String> {
    let input = document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?;
    let value = input.value();
    input.set_value("");
    Some(value)
}

pub fn focus(document: &web::Document, id: &str) {
    if let Some(el) = html_element(document, id) {
        _ = el.focus();
    }
}

/// Mark the buttons matching `selector` whose `attr` equals `value` as
/// selected and clear the rest.
pub fn mark_selected(document: &web::Document, selector: &str, attr: &str, value: &str) {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let on = el.get_attribute(attr).as_deref() == Some(value);
        _ = el.class_list().toggle_with_force(SELECTED_CLASS, on);
    }
}

/// Every element matching `selector`.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// True when the event started inside an element matching `selector`.
pub fn event_within(ev: &web::Event, selector: &str) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio. Returns the CSS-pixel surface the core lays out in, the ratio, and
/// whether the backing store was reassigned (which clears it).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (Surface, f64, bool) {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let surface = Surface::new(rect.width() as f32, rect.height() as f32);
    let (w_px, h_px) = surface.backing_size(dpr);
    let cleared = canvas.width() != w_px || canvas.height() != h_px;
    if cleared {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (surface, dpr, cleared)
}

/// Pointer position in CSS pixels relative to the canvas.
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> glam::Vec2 {
    let rect = canvas.get_bounding_client_rect();
    glam::Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    )
}
