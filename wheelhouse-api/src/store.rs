//! Authoritative store contract
//!
//! The logical REST contract the admin core consumes. Transport is an
//! external collaborator: an implementation may live in-process (see
//! [`crate::MemoryStore`]) or behind HTTP, and maps whatever failures
//! it sees onto [`wheelhouse_core::Error`]. A 401-class response ends
//! the session outside this core and never reaches these types.
//!
//! The contract is last-write-wins. There are no versions, ETags, or
//! optimistic-concurrency tokens; two administrators mutating the same
//! store concurrently are not guaranteed a consistent outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use wheelhouse_core::Result;
use wheelhouse_core::config::{ConfigDocument, Location, VirtualHost};

/// Server status report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub status: String,
    pub ports: Vec<String>,
}

/// Aggregate configuration statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerStats {
    pub virtual_hosts: usize,
    pub ports: Vec<String>,
    pub mime_types: usize,
}

/// The authoritative configuration store.
///
/// Location `index` arguments are positional and only valid against
/// the most recent successful `list_locations` result; the session
/// layer is responsible for never replaying a stale index.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// GET /config
    async fn fetch_config(&self) -> Result<ConfigDocument>;

    /// PUT /config — whole-document overwrite
    async fn replace_config(&self, document: &ConfigDocument) -> Result<()>;

    /// POST /config/reload — the store re-reads its persisted source
    async fn reload_config(&self) -> Result<()>;

    /// GET /virtualhosts
    async fn list_virtual_hosts(&self) -> Result<Vec<VirtualHost>>;

    /// GET /virtualhosts/{serverName}
    async fn fetch_virtual_host(&self, server_name: &str) -> Result<VirtualHost>;

    /// POST /virtualhosts
    async fn create_virtual_host(&self, host: &VirtualHost) -> Result<()>;

    /// PUT /virtualhosts/{serverName} — full replacement, same key
    async fn update_virtual_host(&self, server_name: &str, host: &VirtualHost) -> Result<()>;

    /// DELETE /virtualhosts/{serverName}
    async fn delete_virtual_host(&self, server_name: &str) -> Result<()>;

    /// GET /virtualhosts/{serverName}/locations
    async fn list_locations(&self, server_name: &str) -> Result<Vec<Location>>;

    /// POST /virtualhosts/{serverName}/locations — appends
    async fn create_location(&self, server_name: &str, location: &Location) -> Result<()>;

    /// PUT /virtualhosts/{serverName}/locations/{index}
    async fn update_location(
        &self,
        server_name: &str,
        index: usize,
        location: &Location,
    ) -> Result<()>;

    /// DELETE /virtualhosts/{serverName}/locations/{index}
    async fn delete_location(&self, server_name: &str, index: usize) -> Result<()>;

    /// GET /server/status
    async fn server_status(&self) -> Result<ServerStatus>;

    /// GET /stats
    async fn server_stats(&self) -> Result<ServerStats>;

    /// POST /server/reload — apply live configuration without restart
    async fn reload_server(&self) -> Result<()>;
}
