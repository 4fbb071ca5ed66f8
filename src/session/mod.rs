//! Explicit session state with a defined lifecycle: `init` reads the
//! persisted credential, `set_token` stores a fresh one, `clear_once` is the
//! 401 path, `teardown` is logout. Injected everywhere as `Arc<Session>` so
//! tests can substitute an in-memory store.

use std::sync::RwLock;

mod claims;
pub use claims::{AdminClaims, User, decode_claims};

mod store;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

mod error;
pub use error::{SessionError, SessionResult};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

pub struct Session {
    state: RwLock<SessionState>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Read the persisted credential, if any. Tokens that no longer decode or
    /// that already expired are dropped here, so the app simply starts
    /// signed-out instead of bouncing off a 401.
    pub fn init(store: Box<dyn TokenStore>) -> Self {
        let mut state = SessionState::default();

        if let Some(token) = store.load() {
            match decode_claims(&token) {
                Ok(claims) if !claims.expired() => match User::try_from(claims) {
                    Ok(user) => {
                        state.token = Some(token);
                        state.user = Some(user);
                    }
                    Err(e) => {
                        tracing::warn!("persisted token rejected: {e}");
                        let _ = store.clear();
                    }
                },
                Ok(_) => {
                    tracing::debug!("persisted token expired, discarding");
                    let _ = store.clear();
                }
                Err(e) => {
                    tracing::warn!("persisted token rejected: {e}");
                    let _ = store.clear();
                }
            }
        }

        Self {
            state: RwLock::new(state),
            store,
        }
    }

    /// Accept a freshly issued token: decode the staff identity, persist the
    /// token, and mark the session signed-in.
    pub fn set_token(&self, token: &str) -> SessionResult<User> {
        let user = User::try_from(decode_claims(token)?)?;
        self.store.save(token)?;

        let mut state = self.state.write().unwrap();
        state.token = Some(token.to_string());
        state.user = Some(user.clone());
        Ok(user)
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().unwrap().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().token.is_some()
    }

    /// Clear the credential if one is present. Returns whether anything was
    /// cleared, which is what makes the 401 side effect fire exactly once
    /// even when several in-flight requests come back rejected.
    pub fn clear_once(&self) -> bool {
        let mut state = self.state.write().unwrap();
        if state.token.is_none() {
            return false;
        }
        state.token = None;
        state.user = None;
        drop(state);

        if let Err(e) = self.store.clear() {
            crate::error::log_error(&e);
        }
        true
    }

    /// Logout. Same clearing as the 401 path, minus the "was it the first
    /// time" bookkeeping.
    pub fn teardown(&self) {
        self.clear_once();
    }
}

#[cfg(test)]
mod test {
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    fn token_for(email: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &json!({ "id": "staff-1", "email": email, "role": "Admin" }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap()
    }

    #[test]
    fn init_restores_persisted_token() {
        let token = token_for("a@leximon.vn");
        let session = Session::init(Box::new(MemoryTokenStore::with_token(token.clone())));

        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some(token));
        assert_eq!(session.user().unwrap().email(), "a@leximon.vn");
    }

    #[test]
    fn init_discards_garbage_token() {
        let session = Session::init(Box::new(MemoryTokenStore::with_token("not-a-jwt")));
        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
    }

    #[test]
    fn clear_once_fires_once() {
        let session = Session::init(Box::new(MemoryTokenStore::new()));
        session.set_token(&token_for("b@leximon.vn")).unwrap();

        assert!(session.clear_once());
        assert!(!session.clear_once());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn set_token_persists_to_store() {
        let session = Session::init(Box::new(MemoryTokenStore::new()));
        let user = session.set_token(&token_for("c@leximon.vn")).unwrap();
        assert_eq!(user.role(), "Admin");
        assert!(session.is_authenticated());

        session.teardown();
        assert_eq!(session.token(), None);
    }
}
