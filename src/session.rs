use crate::models::{Role, UserInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

const KEY_ID: &str = "user_id";
const KEY_ROLE: &str = "user_role";
const KEY_NAME: &str = "user_name";

/// The logged-in user as remembered by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: u64,
    pub role: Role,
    pub name: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<UserInfo> for Session {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name,
        }
    }
}

pub trait SessionProvider {
    fn get(&self) -> Option<Session>;
    fn set(&self, session: Session);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemorySession {
    inner: Mutex<Option<Session>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionProvider for MemorySession {
    fn get(&self) -> Option<Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, session: Session) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    fn clear(&self) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Persists the `user_id`, `user_role` and `user_name` keys as a flat JSON
/// object of strings.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_keys(&self) -> Option<BTreeMap<String, String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                error!("failed to read session file {}: {err}", self.path.display());
                return None;
            }
        };
        serde_json::from_slice(&bytes)
            .map_err(|err| warn!("ignoring malformed session file: {err}"))
            .ok()
    }
}

impl SessionProvider for FileSessionStore {
    fn get(&self) -> Option<Session> {
        let keys = self.read_keys()?;
        let session = session_from_keys(&keys);
        if session.is_none() {
            warn!("ignoring incomplete session in {}", self.path.display());
        }
        session
    }

    fn set(&self, session: Session) {
        let keys = BTreeMap::from([
            (KEY_ID, session.id.to_string()),
            (KEY_ROLE, session.role.as_str().to_string()),
            (KEY_NAME, session.name),
        ]);
        let result = serde_json::to_vec_pretty(&keys)
            .map_err(std::io::Error::other)
            .and_then(|payload| {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(&self.path, payload)
            });
        if let Err(err) = result {
            error!("failed to write session file {}: {err}", self.path.display());
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => error!("failed to remove session file {}: {err}", self.path.display()),
        }
    }
}

fn session_from_keys(keys: &BTreeMap<String, String>) -> Option<Session> {
    Some(Session {
        id: keys.get(KEY_ID)?.parse().ok()?,
        role: keys.get(KEY_ROLE)?.parse().ok()?,
        name: keys.get(KEY_NAME)?.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Session {
        Session {
            id: 3,
            role: Role::Admin,
            name: "Rita".into(),
        }
    }

    fn temp_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("feedback_app_session_{tag}_{}.json", std::process::id()));
        path
    }

    #[test]
    fn memory_session_round_trip() {
        let store = MemorySession::new();
        assert!(store.get().is_none());
        store.set(admin());
        assert!(store.get().unwrap().is_admin());
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn file_store_writes_browser_keys() {
        let store = FileSessionStore::new(temp_path("keys"));
        store.set(admin());

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["user_id"], "3");
        assert_eq!(raw["user_role"], "admin");
        assert_eq!(raw["user_name"], "Rita");
        assert_eq!(store.get(), Some(admin()));

        store.clear();
        assert!(store.get().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_ignores_partial_data() {
        let store = FileSessionStore::new(temp_path("partial"));
        fs::write(store.path(), br#"{"user_id": "9"}"#).unwrap();
        assert!(store.get().is_none());
        store.clear();
    }
}
