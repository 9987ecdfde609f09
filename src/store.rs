use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Process-wide storage for the two session credentials.
///
/// Implementations hold at most one access token and one refresh token
/// (last write wins) and treat both as opaque strings. All operations are
/// synchronous; no implementation performs network calls.
pub trait TokenStore: Send + Sync {
    /// Currently stored access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Store a new access token, replacing any previous one.
    fn set_access_token(&self, token: &str);

    /// Currently stored refresh token, if any.
    fn refresh_token(&self) -> Option<String>;

    /// Store a new refresh token, replacing any previous one.
    fn set_refresh_token(&self, token: &str);

    /// Remove both tokens. Idempotent: the store ends in the logged-out
    /// state no matter how many times this is called.
    fn clear(&self);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// In-memory token store. The client default; also what tests inject.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<StoredTokens>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.inner.read().ok()?.access_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.access_token = Some(token.to_string());
        }
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner.read().ok()?.refresh_token.clone()
    }

    fn set_refresh_token(&self, token: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.refresh_token = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = StoredTokens::default();
        }
    }
}

/// Durable token store backed by a small JSON file.
///
/// The file holds the two fixed keys `accessToken` and `refreshToken` and
/// nothing else; values are opaque and unversioned. Writes are best-effort:
/// an I/O failure keeps the in-memory state and logs a warning rather than
/// failing the caller.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cache: RwLock<StoredTokens>,
}

impl FileTokenStore {
    /// Open (or create) a token store at `path`, loading any tokens already
    /// persisted there. A missing file starts the store empty; an unreadable
    /// file is an error so callers don't silently drop a live session.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let cache = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(
                    target: "store",
                    path = %path.display(),
                    error = %err,
                    "Token file unparseable, starting empty"
                );
                StoredTokens::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoredTokens::default(),
            Err(err) => return Err(err),
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    fn persist(&self, tokens: &StoredTokens) {
        let payload = match serde_json::to_string_pretty(tokens) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(target: "store", error = %err, "Failed to serialize tokens");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(
                    target: "store",
                    path = %self.path.display(),
                    error = %err,
                    "Failed to create token store directory"
                );
                return;
            }
        }

        if let Err(err) = std::fs::write(&self.path, payload) {
            tracing::warn!(
                target: "store",
                path = %self.path.display(),
                error = %err,
                "Failed to persist tokens"
            );
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.cache.read().ok()?.access_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.access_token = Some(token.to_string());
            self.persist(&cache);
        }
    }

    fn refresh_token(&self) -> Option<String> {
        self.cache.read().ok()?.refresh_token.clone()
    }

    fn set_refresh_token(&self, token: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.refresh_token = Some(token.to_string());
            self.persist(&cache);
        }
    }

    fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            *cache = StoredTokens::default();
            self.persist(&cache);
        }
    }
}
