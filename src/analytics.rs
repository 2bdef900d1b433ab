use js_sys::{Array, Date, Function, Reflect};
use slowtide_core::analytics::{day_of_week, time_of_day, AnalyticsEvent, AnalyticsSink};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Forwards events to the page's `gtag` function. Does nothing when the
/// tag is not loaded (blocked, offline, local builds).
#[derive(Default)]
pub struct GtagSink;

fn gtag() -> Option<Function> {
    let window = web::window()?;
    Reflect::get(&window, &JsValue::from_str("gtag"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn device_type() -> &'static str {
    let agent = web::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default()
        .to_lowercase();
    if agent.contains("ipad") || agent.contains("tablet") {
        "tablet"
    } else if agent.contains("mobi") || agent.contains("android") || agent.contains("iphone") {
        "mobile"
    } else {
        "desktop"
    }
}

impl AnalyticsSink for GtagSink {
    fn send(&mut self, event: &AnalyticsEvent) {
        let Some(gtag) = gtag() else {
            return;
        };
        let mut params = event.params();
        params.insert("device_type".into(), device_type().into());
        if matches!(
            event,
            AnalyticsEvent::SessionStart { .. } | AnalyticsEvent::SessionEnd { .. }
        ) {
            let now = Date::new_0();
            params.insert("time_of_day".into(), time_of_day(now.get_hours()).into());
            params.insert("day_of_week".into(), day_of_week(now.get_day()).into());
        }

        let json = serde_json::Value::Object(params).to_string();
        let payload = match js_sys::JSON::parse(&json) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[analytics] could not encode {}: {:?}", event.name(), e);
                return;
            }
        };
        let args = Array::of3(
            &JsValue::from_str("event"),
            &JsValue::from_str(event.name()),
            &payload,
        );
        if let Err(e) = gtag.apply(&JsValue::NULL, &args) {
            log::warn!("[analytics] gtag failed: {:?}", e);
        }
    }
}
