//! Per-session token storage.

use std::collections::HashMap;
use std::sync::RwLock;

use formsmith_core::{FormError, FormResult};

/// Where session tokens live between requests.
///
/// Implementations must be safe to share across request handlers.
pub trait TokenStore: Send + Sync {
    /// Returns the session's token, if one was stored.
    fn get(&self, session: &str) -> FormResult<Option<String>>;

    /// Stores (or replaces) the session's token.
    fn set(&self, session: &str, token: &str) -> FormResult<()>;

    /// Forgets the session's token. Unknown sessions are not an error.
    fn delete(&self, session: &str) -> FormResult<()>;
}

/// An in-process store backed by a `RwLock<HashMap>`.
///
/// Suitable for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    pub fn len(&self) -> usize {
        self.tokens.read().map_or(0, |tokens| tokens.len())
    }

    /// Returns `true` if no session has a token.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> FormError {
    FormError::Csrf("token store lock poisoned".to_string())
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, session: &str) -> FormResult<Option<String>> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        Ok(tokens.get(session).cloned())
    }

    fn set(&self, session: &str, token: &str) -> FormResult<()> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;
        tokens.insert(session.to_string(), token.to_string());
        Ok(())
    }

    fn delete(&self, session: &str) -> FormResult<()> {
        let mut tokens = self.tokens.write().map_err(poisoned)?;
        tokens.remove(session);
        Ok(())
    }
}
