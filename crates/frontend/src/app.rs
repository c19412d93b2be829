use crate::config::CONTEXT_GLOBAL;
use crate::dashboards::Behaviours;
use contracts::dashboards::d404_behaviours::{Site, StatsQuery};
use leptos::prelude::*;
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Site and query the embedding page hands to the app.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehavioursContext {
    pub site: Site,
    #[serde(default)]
    pub query: StatsQuery,
}

pub fn parse_context(raw: &str) -> Result<BehavioursContext, String> {
    serde_json::from_str(raw).map_err(|e| format!("Invalid {}: {}", CONTEXT_GLOBAL, e))
}

/// Reads the context global, either a JSON string or a plain object.
fn load_context() -> Option<BehavioursContext> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONTEXT_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        log::warn!("{} is not set, nothing to render", CONTEXT_GLOBAL);
        return None;
    }

    let parsed = match value.as_string() {
        Some(raw) => parse_context(&raw),
        None => serde_wasm_bindgen::from_value(value)
            .map_err(|e| format!("Invalid {}: {}", CONTEXT_GLOBAL, e)),
    };
    parsed.map_err(|e| log::error!("{}", e)).ok()
}

#[component]
pub fn App() -> impl IntoView {
    match load_context() {
        Some(context) => view! {
            <Behaviours site=context.site query=context.query />
        }
        .into_any(),
        None => view! { <></> }.into_any(),
    }
}
