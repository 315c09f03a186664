/// Key under which the bearer token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "jwt_token";

/// Persistence for the single session token.
pub trait TokenStore {
    fn read(&self) -> Option<String>;
    fn write(&mut self, token: &str);
    fn clear(&mut self);
}

#[cfg(test)]
pub mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::TokenStore;

    /// Clones share the same slot, so a test can keep a handle on what the
    /// session persisted.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryTokenStore {
        slot: Rc<RefCell<Option<String>>>,
    }

    impl MemoryTokenStore {
        pub fn with_token(token: &str) -> Self {
            MemoryTokenStore {
                slot: Rc::new(RefCell::new(Some(token.to_string()))),
            }
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn read(&self) -> Option<String> {
            self.slot.borrow().clone()
        }

        fn write(&mut self, token: &str) {
            *self.slot.borrow_mut() = Some(token.to_string());
        }

        fn clear(&mut self) {
            self.slot.borrow_mut().take();
        }
    }
}
