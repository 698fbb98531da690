//! `localStorage` persistence for the session token and wizard drafts

use api_client::SessionStore;
use wasm_bindgen::prelude::*;

const TOKEN_KEY: &str = "oscal_auth_token";
const DRAFT_PREFIX: &str = "oscal_draft:";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Bearer token kept in `localStorage` so it survives page reloads
#[derive(Debug, Clone)]
pub struct LocalStorageSession {
    key: String,
}

impl LocalStorageSession {
    pub fn new() -> Self {
        Self::with_key(TOKEN_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        local_storage()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set_token(&self, token: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(&self.key, token).is_err() {
                tracing::warn!("failed to persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

fn draft_key(name: &str) -> String {
    format!("{}{}", DRAFT_PREFIX, name)
}

/// Store a wizard draft (JSON) under `name`
#[wasm_bindgen(js_name = saveDraft)]
pub fn save_draft(name: &str, json: &str) -> Result<(), JsValue> {
    let storage = local_storage().ok_or("localStorage not available")?;
    storage.set_item(&draft_key(name), json)
}

#[wasm_bindgen(js_name = loadDraft)]
pub fn load_draft(name: &str) -> Result<Option<String>, JsValue> {
    let storage = local_storage().ok_or("localStorage not available")?;
    storage.get_item(&draft_key(name))
}

#[wasm_bindgen(js_name = deleteDraft)]
pub fn delete_draft(name: &str) -> Result<(), JsValue> {
    let storage = local_storage().ok_or("localStorage not available")?;
    storage.remove_item(&draft_key(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_key() {
        assert_eq!(draft_key("payroll"), "oscal_draft:payroll");
    }
}
