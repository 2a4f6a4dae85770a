use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use shared_models::error::AppError;

/// Key under which the bearer token is persisted. The booking flow only
/// ever reads this key; it is written by the (external) login flow.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key under which the preferred UI language is persisted.
pub const LOCALE_KEY: &str = "selected_language";

/// Typed contract over the device key-value store. Injected into every
/// component that needs the session, never reached through ambient globals.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Read the bearer token, failing when none is stored. Callers that can
/// proceed unauthenticated use `get` directly instead.
pub async fn require_token(store: &dyn SessionStore) -> Result<String, AppError> {
    match store.get(ACCESS_TOKEN_KEY).await? {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::Auth("No access token stored".to_string())),
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .expect("session store lock poisoned")
            .insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("session store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("session store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("session store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON-file-backed store, the desktop stand-in for the phone's key-value
/// storage. The file holds a flat string map; a missing file reads as empty.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Storage(format!("corrupt session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        debug!("Persisting session key {}", key);
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}
