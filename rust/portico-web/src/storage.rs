use gloo_storage::{LocalStorage, Storage as GlooStorage};
use portico_core::{TokenStore, TOKEN_STORAGE_KEY};

/// Keeps the session token in `localStorage`, surviving reloads. The value
/// is stored as the bare token string rather than JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn read(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn write(&mut self, token: &str) {
        if let Err(error) = LocalStorage::raw().set_item(TOKEN_STORAGE_KEY, token) {
            error!("Storage error: {:?}", error);
        }
    }

    fn clear(&mut self) {
        LocalStorage::delete(TOKEN_STORAGE_KEY);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
pub mod tests {
    use portico_core::TokenStore;
    use wasm_bindgen_test::*;

    use super::BrowserTokenStore;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn it_persists_the_token_across_instances() {
        let mut store = BrowserTokenStore;
        store.write("abc123");

        assert_eq!(BrowserTokenStore.read().as_deref(), Some("abc123"));

        store.clear();
        assert_eq!(BrowserTokenStore.read(), None);
    }
}
