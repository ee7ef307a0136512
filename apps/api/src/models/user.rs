use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::NewsAnalysis;

/// An account in the in-memory store. Lives only as long as the process.
#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    /// News analyses keyed by SHA-256 of the submitted content.
    #[serde(skip)]
    pub news_cache: HashMap<String, NewsAnalysis>,
}

impl UserAccount {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
            news_cache: HashMap::new(),
        }
    }
}
