//! Session context.
//!
//! Holds the values written at login (token, user id, display name, role,
//! email) and read by every page's auth check. The context is constructed
//! once and handed to the API client and the flows explicitly.

mod store;

pub use store::{FileStore, MemoryStore, SessionError, SessionStore};

use std::sync::Arc;
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::models::{LoginResponse, Role};
use crate::routes::{Route, ADMIN_DASHBOARD_PATH};

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const USER_NAME_KEY: &str = "userName";
pub const USER_ROLE_KEY: &str = "userRole";
pub const USER_EMAIL_KEY: &str = "userEmail";

/// Typed view of the stored session values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub role: Role,
    pub email: Option<String>,
}

impl Session {
    pub fn from_login(login: &LoginResponse) -> Self {
        Self {
            token: login.token.clone(),
            user_id: Some(login.user_id.to_string()),
            user_name: Some(login.name.clone()),
            role: login.role,
            email: login.email.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Profile")
    }
}

#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionContext {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read the session back. Absence of a token means "not logged in",
    /// whatever else is stored.
    pub fn load(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            user_id: self.store.get(USER_ID_KEY),
            user_name: self.store.get(USER_NAME_KEY),
            role: self
                .store
                .get(USER_ROLE_KEY)
                .map(Role::from)
                .unwrap_or(Role::User),
            email: self.store.get(USER_EMAIL_KEY),
        })
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, &session.token)?;
        self.put_optional(USER_ID_KEY, session.user_id.as_deref())?;
        self.put_optional(USER_NAME_KEY, session.user_name.as_deref())?;
        self.store.set(USER_ROLE_KEY, session.role.as_str())?;
        self.put_optional(USER_EMAIL_KEY, session.email.as_deref())?;
        info!(role = %session.role, "Session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Local-only display name change, as the profile page does.
    pub fn set_user_name(&self, name: &str) -> Result<(), SessionError> {
        self.store.set(USER_NAME_KEY, name)
    }

    /// Gate a user page: no token means a redirect to login that carries
    /// `return_path`.
    pub fn require_auth(&self, return_path: &str) -> ClientResult<Session> {
        self.load()
            .ok_or_else(|| ClientError::NotAuthenticated(Route::login_returning_to(return_path)))
    }

    /// Gate the admin panel: requires a token and the ADMIN role.
    pub fn require_admin(&self) -> ClientResult<Session> {
        match self.load() {
            Some(session) if session.is_admin() => Ok(session),
            _ => Err(ClientError::NotAuthenticated(Route::login_returning_to(
                ADMIN_DASHBOARD_PATH,
            ))),
        }
    }

    fn put_optional(&self, key: &str, value: Option<&str>) -> Result<(), SessionError> {
        match value {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        }
    }
}
