//! Client session state
//!
//! Holds at most one authentication token. The application sets it on login
//! and clears it on logout; the gateway only reads it.

use parking_lot::RwLock;

/// Read access to the current session token.
pub trait TokenSource: Send + Sync {
    /// Token held at the moment of the call, if any.
    fn token(&self) -> Option<String>;
}

/// Process-wide session store, shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_token(token);
        store
    }

    /// Store the token issued at login. An empty token clears the session.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        *self.token.write() = if token.is_empty() { None } else { Some(token) };
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }
}
