use leptos::window;
use portico_core::Clock;
use wasm_bindgen::JsValue;

/// Wall-clock time as reported by the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn unix_seconds(&self) -> f64 {
        js_sys::Date::now() / 1000.0
    }
}

/// The query string of the current page, including the leading `?`.
pub fn current_query() -> String {
    window().location().search().unwrap_or_default()
}

/// Swaps the visible URL without navigating.
pub fn replace_url(path: &str) {
    let title = window().document().map(|document| document.title());

    let result = window().history().and_then(|history| {
        history.replace_state_with_url(&JsValue::NULL, title.as_deref().unwrap_or_default(), Some(path))
    });

    if let Err(error) = result {
        warn!("Could not replace the page URL: {:?}", error);
    }
}

pub fn navigate(url: &str) {
    if let Err(error) = window().location().set_href(url) {
        error!("Could not navigate to {}: {:?}", url, error);
    }
}

pub fn alert(message: &str) {
    if let Err(error) = window().alert_with_message(message) {
        warn!("Could not show alert {:?}: {:?}", message, error);
    }
}
