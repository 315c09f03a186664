use leptos::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;

const VIEWER_ELEMENT_ID: &str = "swagger-ui";

#[wasm_bindgen]
extern "C" {
    /// Provided by the Swagger UI bundle that `index.html` loads.
    #[wasm_bindgen(js_name = SwaggerUIBundle, catch)]
    fn swagger_ui_bundle(config: &JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ViewerConfig {
    pub url: String,
    pub dom_id: String,
    #[serde(rename = "deepLinking")]
    pub deep_linking: bool,
}

impl ViewerConfig {
    pub fn new(url: &str) -> Self {
        ViewerConfig {
            url: url.to_string(),
            dom_id: format!("#{}", VIEWER_ELEMENT_ID),
            deep_linking: true,
        }
    }
}

fn render_viewer(url: &str) {
    let config = match serde_wasm_bindgen::to_value(&ViewerConfig::new(url)) {
        Ok(config) => config,
        Err(error) => {
            error!("Could not build the viewer configuration: {}", error);
            return;
        }
    };

    match swagger_ui_bundle(&config) {
        Ok(_) => debug!("Viewer showing {}", url),
        Err(error) => error!("Swagger UI failed to load {}: {:?}", url, error),
    }
}

/// Embeds Swagger UI, rebuilding it whenever `url` changes.
#[component]
pub fn ApiViewer(#[prop(into)] url: Signal<String>) -> impl IntoView {
    create_effect(move |_| render_viewer(&url.get()));

    view! { <div id=VIEWER_ELEMENT_ID class="api-viewer"></div> }
}

#[cfg(all(test, target_arch = "wasm32"))]
pub mod tests {
    use wasm_bindgen_test::*;

    use super::ViewerConfig;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn it_points_swagger_ui_at_the_viewer_element() {
        let config = ViewerConfig::new("http://127.0.0.1:8000/swagger.yaml?v=2");
        let value = serde_wasm_bindgen::to_value(&config).unwrap();

        let dom_id = js_sys::Reflect::get(&value, &"dom_id".into()).unwrap();
        assert_eq!(dom_id.as_string().as_deref(), Some("#swagger-ui"));

        let url = js_sys::Reflect::get(&value, &"url".into()).unwrap();
        assert_eq!(url.as_string().as_deref(), Some("http://127.0.0.1:8000/swagger.yaml?v=2"));
    }
}
