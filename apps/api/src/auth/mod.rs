//! In-memory accounts and bearer-token sessions.
//!
//! Nothing is persisted: restarting the process forgets every account.

pub mod handlers;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserAccount;
use crate::models::NewsAnalysis;

pub use session::AuthSession;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Default)]
struct Accounts {
    users: HashMap<String, UserAccount>,
    sessions: HashMap<Uuid, String>,
}

/// Shared handle to the account and session tables. Clones share the same tables.
#[derive(Clone, Default)]
pub struct AccountStore {
    inner: Arc<RwLock<Accounts>>,
}

impl AccountStore {
    pub async fn signup(&self, username: &str, password: &str) -> Result<UserAccount, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username cannot be empty".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut accounts = self.inner.write().await;
        if accounts.users.contains_key(username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        let account = UserAccount::new(username.to_string(), hash_password(password));
        accounts.users.insert(username.to_string(), account.clone());
        info!(username, "account created");
        Ok(account)
    }

    /// Checks credentials and opens a new session, returning its token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Uuid, AppError> {
        let mut accounts = self.inner.write().await;
        let matches = accounts
            .users
            .get(username.trim())
            .is_some_and(|u| u.password_hash == hash_password(password));
        if !matches {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
        let token = Uuid::new_v4();
        accounts.sessions.insert(token, username.trim().to_string());
        info!(username = username.trim(), "session opened");
        Ok(token)
    }

    /// Returns whether a session was actually closed.
    pub async fn logout(&self, token: Uuid) -> bool {
        self.inner.write().await.sessions.remove(&token).is_some()
    }

    pub async fn resolve(&self, token: Uuid) -> Option<String> {
        self.inner.read().await.sessions.get(&token).cloned()
    }

    pub async fn cached_news(&self, username: &str, content_hash: &str) -> Option<NewsAnalysis> {
        self.inner
            .read()
            .await
            .users
            .get(username)
            .and_then(|u| u.news_cache.get(content_hash).cloned())
    }

    pub async fn cache_news(&self, username: &str, content_hash: String, analysis: NewsAnalysis) {
        if let Some(user) = self.inner.write().await.users.get_mut(username) {
            user.news_cache.insert(content_hash, analysis);
        }
    }
}

/// SHA-256 hex digest. Used for stored passwords and content cache keys.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

fn hash_password(password: &str) -> String {
    sha256_hex(password)
}
