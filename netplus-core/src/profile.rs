//! Local profile store
//!
//! Read-only key lookup for the issuer name and contact number printed in
//! the receipt header. The mobile shell persists these at login; this core
//! only reads them, with fixed fallbacks when a key is absent.

use crate::models::IssuerProfile;
use std::collections::HashMap;

pub const PROFILE_KEY_NAME: &str = "name";
pub const PROFILE_KEY_MOBILE: &str = "mobile";

/// Header fallback when no issuer name was stored
pub const DEFAULT_ISSUER_NAME: &str = "FW / Net+";

/// Read-only key/value profile lookup
pub trait ProfileStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory profile store
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    entries: HashMap<String, String>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Build the issuer header from the profile store, applying fallbacks
pub fn issuer_profile(store: &dyn ProfileStore) -> IssuerProfile {
    IssuerProfile {
        name: store
            .get(PROFILE_KEY_NAME)
            .unwrap_or_else(|| DEFAULT_ISSUER_NAME.to_string()),
        contact: store.get(PROFILE_KEY_MOBILE).unwrap_or_default(),
    }
}
