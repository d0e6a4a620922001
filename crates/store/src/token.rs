use std::sync::Arc;

use crate::{KeyValueStore, StoreError};

pub const TOKEN_KEY: &str = "token";

/// Typed view over the persisted session token.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)
    }
}
