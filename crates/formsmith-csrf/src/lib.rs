//! # formsmith-csrf
//!
//! Produces the token a form embeds in its hidden CSRF input and checks the
//! value that comes back. Tokens are kept per session in a [`TokenStore`];
//! pages render a masked copy so the secret never appears verbatim.
//!
//! ```
//! use formsmith_csrf::{CsrfTokens, MemoryTokenStore};
//!
//! let tokens = CsrfTokens::new(MemoryTokenStore::new());
//! let field_value = tokens.masked_token_for("session-1").unwrap();
//! assert!(tokens.verify("session-1", &field_value).unwrap());
//! assert!(!tokens.verify("session-2", &field_value).unwrap());
//! ```

pub mod store;
pub mod token;

pub use store::{MemoryTokenStore, TokenStore};
pub use token::{generate_token, mask_token, tokens_match, unmask_token, TOKEN_LENGTH};

use formsmith_core::FormResult;

/// Session-scoped CSRF tokens on top of a [`TokenStore`].
#[derive(Debug)]
pub struct CsrfTokens<S: TokenStore> {
    store: S,
}

impl<S: TokenStore> CsrfTokens<S> {
    /// Wraps a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the session's token, generating and storing one if needed.
    pub fn token_for(&self, session: &str) -> FormResult<String> {
        if let Some(token) = self.store.get(session)? {
            return Ok(token);
        }
        let token = generate_token();
        self.store.set(session, &token)?;
        tracing::debug!(session, "Issued CSRF token");
        Ok(token)
    }

    /// Returns a freshly masked copy of the session's token, for rendering.
    pub fn masked_token_for(&self, session: &str) -> FormResult<String> {
        self.token_for(session).map(|token| mask_token(&token))
    }

    /// Replaces the session's token, e.g. after login.
    pub fn rotate(&self, session: &str) -> FormResult<String> {
        let token = generate_token();
        self.store.set(session, &token)?;
        tracing::debug!(session, "Rotated CSRF token");
        Ok(token)
    }

    /// Checks a submitted token (raw or masked) against the session's token.
    ///
    /// A session without a token never verifies.
    pub fn verify(&self, session: &str, submitted: &str) -> FormResult<bool> {
        let Some(expected) = self.store.get(session)? else {
            tracing::warn!(session, "CSRF check against a session without a token");
            return Ok(false);
        };
        let ok = tokens_match(submitted, &expected);
        if !ok {
            tracing::warn!(session, "CSRF token mismatch");
        }
        Ok(ok)
    }

    /// Forgets the session's token, e.g. on logout.
    pub fn delete(&self, session: &str) -> FormResult<()> {
        self.store.delete(session)?;
        tracing::debug!(session, "Deleted CSRF token");
        Ok(())
    }
}

impl<S: TokenStore + Default> Default for CsrfTokens<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> CsrfTokens<MemoryTokenStore> {
        CsrfTokens::default()
    }

    #[test]
    fn test_token_for_is_stable_per_session() {
        let t = tokens();
        let first = t.token_for("s").unwrap();
        assert_eq!(t.token_for("s").unwrap(), first);
        assert_ne!(t.token_for("other").unwrap(), first);
        assert_eq!(t.store().len(), 2);
    }

    #[test]
    fn test_masked_token_verifies() {
        let t = tokens();
        let masked = t.masked_token_for("s").unwrap();
        assert_eq!(masked.len(), TOKEN_LENGTH * 4);
        assert!(t.verify("s", &masked).unwrap());
        let raw = t.token_for("s").unwrap();
        assert!(t.verify("s", &raw).unwrap());
    }

    #[test]
    fn test_rotate_invalidates_old_token() {
        let t = tokens();
        let old = t.token_for("s").unwrap();
        let new = t.rotate("s").unwrap();
        assert_ne!(old, new);
        assert!(!t.verify("s", &old).unwrap());
        assert!(t.verify("s", &new).unwrap());
    }

    #[test]
    fn test_verify_unknown_session() {
        let t = tokens();
        assert!(!t.verify("nobody", &generate_token()).unwrap());
    }

    #[test]
    fn test_delete_forgets_token() {
        let t = tokens();
        let token = t.token_for("s").unwrap();
        t.delete("s").unwrap();
        assert!(!t.verify("s", &token).unwrap());
        assert!(t.store().is_empty());
    }
}
