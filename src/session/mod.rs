// Session context: current user identity, bearer token and the durable
// storage behind them. Injected explicitly into the HTTP client and the
// route guard rather than accessed as ambient global state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use crate::config;
use crate::models::User;
use crate::services::users::{LoginData, UserService};
use crate::services::ServiceResponse;
use crate::types::role_display_name;

/// Durable storage keys, shared with earlier deployments of the web client.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const AUTH_USER_KEY: &str = "auth_user";

const LOGIN_ROUTE: &str = "/login";

/// Key/value store surviving restarts, used for session restoration.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str);
}

/// File-per-key storage under the client config directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn from_config() -> Self {
        Self::new(config::config().storage.config_dir.clone())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.dir.join(key));
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Two-state session: Anonymous (no token, no user) or Authenticated.
///
/// Transitions: `login` on success, `logout` explicitly, `invalidate` on a
/// 401 from any API call. The forced navigation a browser would do on
/// logout/401 is modeled as a pending redirect the caller consumes.
pub struct Session {
    state: RwLock<SessionState>,
    storage: Box<dyn SessionStorage>,
    pending_redirect: Mutex<Option<String>>,
}

impl Session {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
            pending_redirect: Mutex::new(None),
        }
    }

    /// Restore Authenticated state from durable storage at startup.
    ///
    /// A missing token keeps the session Anonymous; an unparseable stored
    /// user clears both durable entries.
    pub fn initialize(&self) {
        let stored_token = self.storage.get(AUTH_TOKEN_KEY);
        let stored_user = self.storage.get(AUTH_USER_KEY);

        match (stored_token, stored_user) {
            (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => {
                    let mut state = self.state.write().unwrap();
                    state.token = Some(token);
                    state.user = Some(user);
                }
                Err(err) => {
                    tracing::warn!("corrupted stored session, clearing: {err}");
                    self.storage.remove(AUTH_TOKEN_KEY);
                    self.storage.remove(AUTH_USER_KEY);
                }
            },
            (token, _) => {
                // Token without user (or vice versa) is not restorable
                if token.is_some() {
                    self.storage.remove(AUTH_TOKEN_KEY);
                    self.storage.remove(AUTH_USER_KEY);
                }
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Current bearer token: in-memory state first, durable storage as a
    /// fallback.
    pub fn token(&self) -> Option<String> {
        if let Some(token) = self.state.read().unwrap().token.clone() {
            return Some(token);
        }
        self.storage.get(AUTH_TOKEN_KEY)
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    /// Current user's role. An empty role attribute counts as no role.
    pub fn role(&self) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .user
            .as_ref()
            .map(|u| u.role.clone())
            .filter(|role| !role.is_empty())
    }

    pub fn role_display(&self) -> Option<String> {
        self.role().map(|r| role_display_name(&r).to_string())
    }

    /// Authenticate and transition Anonymous -> Authenticated on success.
    /// A failed call leaves the session untouched and returns the error
    /// envelope as-is.
    pub async fn login(
        &self,
        users: &UserService,
        username: &str,
        password: &str,
    ) -> ServiceResponse<LoginData> {
        let result = users.login(username, password).await;

        if result.success {
            if let Some(data) = &result.data {
                self.establish(&data.token, &data.user);
            }
        }

        result
    }

    /// Persist a fresh token + user pair in memory and durable storage.
    pub fn establish(&self, token: &str, user: &User) {
        if let Err(err) = self.storage.set(AUTH_TOKEN_KEY, token) {
            tracing::warn!("failed to persist auth token: {err}");
        }
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(err) = self.storage.set(AUTH_USER_KEY, &raw) {
                    tracing::warn!("failed to persist auth user: {err}");
                }
            }
            Err(err) => tracing::warn!("failed to serialize auth user: {err}"),
        }

        let mut state = self.state.write().unwrap();
        state.token = Some(token.to_string());
        state.user = Some(user.clone());
    }

    /// Explicit logout: clear everything and force navigation to the
    /// login route.
    pub fn logout(&self) {
        self.clear();
        self.force_redirect(LOGIN_ROUTE);
    }

    /// Teardown on an unauthorized response. Same effect as logout, kept
    /// separate so the 401 path is visible in logs.
    pub fn invalidate(&self) {
        tracing::warn!("session invalidated by unauthorized response");
        self.clear();
        self.force_redirect(LOGIN_ROUTE);
    }

    fn clear(&self) {
        {
            let mut state = self.state.write().unwrap();
            state.token = None;
            state.user = None;
        }
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(AUTH_USER_KEY);
    }

    fn force_redirect(&self, to: &str) {
        *self.pending_redirect.lock().unwrap() = Some(to.to_string());
    }

    /// Consume the forced-navigation target, if one is pending.
    pub fn take_redirect(&self) -> Option<String> {
        self.pending_redirect.lock().unwrap().take()
    }
}
