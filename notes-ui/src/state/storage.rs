//! Session token in `localStorage`

use notes_assistant::{StoreError, TokenStore};
use web_sys::Storage;

/// Key the token is stored under
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl LocalTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let token = Self::storage()?
            .get_item(TOKEN_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
