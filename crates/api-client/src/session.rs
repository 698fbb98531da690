//! Bearer token storage

use std::sync::{Arc, RwLock};

/// Where the client keeps the bearer token between calls
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// In-process session, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    token: Arc<RwLock<Option<String>>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }

    fn set_token(&self, token: &str) {
        (**self).set_token(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
