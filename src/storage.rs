//! Storage port — the narrow interface the shell session is persisted
//! through.
//!
//! The shell keeps exactly three keys (auth flag, selected role, selected
//! page). Instead of globals, a [`ShellSession`] value is loaded through a
//! [`StoragePort`] and injected into whatever hosts the view root. The
//! in-memory backend is the only one shipped; a browser- or disk-backed
//! port implements the same trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageError;

/// Keys owned by the shell.
pub mod keys {
    pub const AUTHENTICATED: &str = "shell.authenticated";
    pub const ROLE: &str = "shell.role";
    pub const PAGE: &str = "shell.page";
}

/// Narrow key/value port.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl StoragePort for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Portal role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Hr,
    RelationshipManager,
}

impl Default for Role {
    fn default() -> Self {
        Self::Employee
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Employee => "employee",
            Self::Hr => "hr",
            Self::RelationshipManager => "relationship_manager",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "hr" => Ok(Self::Hr),
            "relationship_manager" => Ok(Self::RelationshipManager),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// Portal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalPage {
    Dashboard,
    Orders,
    Agent,
    Hr,
    Crm,
    Links,
}

impl Default for PortalPage {
    fn default() -> Self {
        Self::Dashboard
    }
}

impl PortalPage {
    /// Whether this page may be restored from storage on the next visit.
    /// Role-gated pages are always entered explicitly, never restored.
    pub fn is_persistable(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Orders | Self::Agent)
    }
}

impl std::fmt::Display for PortalPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Dashboard => "dashboard",
            Self::Orders => "orders",
            Self::Agent => "agent",
            Self::Hr => "hr",
            Self::Crm => "crm",
            Self::Links => "links",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PortalPage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "orders" => Ok(Self::Orders),
            "agent" => Ok(Self::Agent),
            "hr" => Ok(Self::Hr),
            "crm" => Ok(Self::Crm),
            "links" => Ok(Self::Links),
            _ => Err(format!("Unknown page: {s}")),
        }
    }
}

/// The injected session-configuration object for the view root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellSession {
    pub authenticated: bool,
    pub role: Role,
    pub page: PortalPage,
}

impl ShellSession {
    /// Load the shell session, defaulting any missing or malformed key.
    pub async fn load(port: &dyn StoragePort) -> Result<Self, StorageError> {
        let authenticated = port
            .get(keys::AUTHENTICATED)
            .await?
            .map(|v| v == "true")
            .unwrap_or(false);
        let role = port
            .get(keys::ROLE)
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let page = port
            .get(keys::PAGE)
            .await?
            .and_then(|v| v.parse::<PortalPage>().ok())
            .filter(PortalPage::is_persistable)
            .unwrap_or_default();
        Ok(Self {
            authenticated,
            role,
            page,
        })
    }

    /// Persist the shell session. Non-persistable pages are skipped, so a
    /// role-gated page never leaks into the next visit.
    pub async fn save(&self, port: &dyn StoragePort) -> Result<(), StorageError> {
        port.set(keys::AUTHENTICATED, if self.authenticated { "true" } else { "false" })
            .await?;
        port.set(keys::ROLE, &self.role.to_string()).await?;
        if self.page.is_persistable() {
            port.set(keys::PAGE, &self.page.to_string()).await?;
        }
        debug!(role = %self.role, page = %self.page, "Shell session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("k").await.unwrap().is_none());
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn shell_session_defaults_when_empty() {
        let store = MemoryStore::new();
        let session = ShellSession::load(store.as_ref()).await.unwrap();
        assert!(!session.authenticated);
        assert_eq!(session.role, Role::Employee);
        assert_eq!(session.page, PortalPage::Dashboard);
    }

    #[tokio::test]
    async fn shell_session_roundtrip() {
        let store = MemoryStore::new();
        let session = ShellSession {
            authenticated: true,
            role: Role::Hr,
            page: PortalPage::Orders,
        };
        session.save(store.as_ref()).await.unwrap();
        let loaded = ShellSession::load(store.as_ref()).await.unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn role_gated_page_is_not_persisted() {
        let store = MemoryStore::new();
        let session = ShellSession {
            authenticated: true,
            role: Role::RelationshipManager,
            page: PortalPage::Crm,
        };
        session.save(store.as_ref()).await.unwrap();
        let loaded = ShellSession::load(store.as_ref()).await.unwrap();
        // The CRM page falls back to the dashboard on the next visit
        assert_eq!(loaded.page, PortalPage::Dashboard);
        assert_eq!(loaded.role, Role::RelationshipManager);
    }

    #[tokio::test]
    async fn malformed_stored_page_falls_back() {
        let store = MemoryStore::new();
        store.set(keys::PAGE, "definitely-not-a-page").await.unwrap();
        store.set(keys::ROLE, "hr").await.unwrap();
        let loaded = ShellSession::load(store.as_ref()).await.unwrap();
        assert_eq!(loaded.page, PortalPage::Dashboard);
        assert_eq!(loaded.role, Role::Hr);
    }

    #[test]
    fn role_display_fromstr() {
        assert_eq!(Role::Hr.to_string(), "hr");
        assert_eq!(
            "relationship_manager".parse::<Role>().unwrap(),
            Role::RelationshipManager
        );
        assert!("superuser".parse::<Role>().is_err());
    }
}
