//! In-memory authoritative store
//!
//! Behaves like the reference admin server: name-addressed virtual
//! host CRUD with conflict detection, positional location CRUD with
//! bounds checks, regex pattern validation on every location write,
//! and a persisted snapshot that `reload_config` restores from.
//!
//! Every successful mutation persists before it is visible, so a
//! failed write never leaves the store half-updated.

use async_trait::async_trait;
use parking_lot::RwLock;
use regex::Regex;

use wheelhouse_core::config::{ConfigDocument, Location, MatchType, VirtualHost};
use wheelhouse_core::error::{Error, Result};

use crate::store::{ConfigStore, ServerStats, ServerStatus};

/// In-process [`ConfigStore`] holding the canonical document.
pub struct MemoryStore {
    current: RwLock<ConfigDocument>,
    persisted: RwLock<ConfigDocument>,
}

impl MemoryStore {
    /// Create a store whose live and persisted state both start from
    /// `document`.
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            persisted: RwLock::new(document.clone()),
            current: RwLock::new(document),
        }
    }

    /// Snapshot of the live document.
    pub fn snapshot(&self) -> ConfigDocument {
        self.current.read().clone()
    }

    /// Overwrite the persisted snapshot without touching live state,
    /// emulating an out-of-band edit of the store's backing source.
    pub fn set_persisted(&self, document: ConfigDocument) {
        *self.persisted.write() = document;
    }

    fn persist(&self, document: &ConfigDocument) {
        *self.persisted.write() = document.clone();
    }
}

/// Check that every regex-mode location in `host` carries a compilable
/// pattern. Prefix rules are opaque literals and never compiled.
fn check_location_patterns(host: &VirtualHost) -> Result<()> {
    for location in &host.locations {
        check_pattern(location)?;
    }
    Ok(())
}

fn check_pattern(location: &Location) -> Result<()> {
    let pattern = match location.matcher.match_type {
        MatchType::Prefix => return Ok(()),
        MatchType::Regex => location.matcher.path.clone(),
        MatchType::RegexCaseInsensitive => format!("(?i){}", location.matcher.path),
    };
    Regex::new(&pattern).map_err(|e| {
        Error::Validation(format!(
            "invalid regex pattern in location {}: {}",
            location.matcher.path, e
        ))
    })?;
    Ok(())
}

fn resolve_host<'a>(doc: &'a ConfigDocument, name: &str) -> Result<&'a VirtualHost> {
    doc.resolve_virtual_host(name)
        .ok_or_else(|| Error::NotFound(format!("virtual host '{name}'")))
}

fn resolve_host_mut<'a>(doc: &'a mut ConfigDocument, name: &str) -> Result<&'a mut VirtualHost> {
    doc.virtual_hosts
        .iter_mut()
        .find(|v| v.server_name == name || v.server_alias.iter().any(|a| a == name))
        .ok_or_else(|| Error::NotFound(format!("virtual host '{name}'")))
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn fetch_config(&self) -> Result<ConfigDocument> {
        Ok(self.current.read().clone())
    }

    async fn replace_config(&self, document: &ConfigDocument) -> Result<()> {
        for host in &document.virtual_hosts {
            check_location_patterns(host)?;
        }
        let mut current = self.current.write();
        *current = document.clone();
        self.persist(&current);
        tracing::info!("configuration replaced");
        Ok(())
    }

    async fn reload_config(&self) -> Result<()> {
        let persisted = self.persisted.read().clone();
        *self.current.write() = persisted;
        tracing::info!("configuration reloaded from persisted source");
        Ok(())
    }

    async fn list_virtual_hosts(&self) -> Result<Vec<VirtualHost>> {
        Ok(self.current.read().virtual_hosts.clone())
    }

    async fn fetch_virtual_host(&self, server_name: &str) -> Result<VirtualHost> {
        let current = self.current.read();
        resolve_host(&current, server_name).cloned()
    }

    async fn create_virtual_host(&self, host: &VirtualHost) -> Result<()> {
        if host.server_name.is_empty() {
            return Err(Error::Validation("serverName is required".to_string()));
        }
        check_location_patterns(host)?;

        let mut current = self.current.write();
        if current.resolve_virtual_host(&host.server_name).is_some() {
            return Err(Error::Conflict(format!(
                "virtual host '{}' already exists",
                host.server_name
            )));
        }
        current.virtual_hosts.push(host.clone());
        self.persist(&current);
        Ok(())
    }

    async fn update_virtual_host(&self, server_name: &str, host: &VirtualHost) -> Result<()> {
        // serverName is the identity key; rename is delete-then-create.
        if host.server_name != server_name {
            return Err(Error::Validation(format!(
                "serverName cannot be changed in place ('{}' -> '{}')",
                server_name, host.server_name
            )));
        }
        check_location_patterns(host)?;

        let mut current = self.current.write();
        let existing = current
            .virtual_host_mut(server_name)
            .ok_or_else(|| Error::NotFound(format!("virtual host '{server_name}'")))?;
        *existing = host.clone();
        self.persist(&current);
        Ok(())
    }

    async fn delete_virtual_host(&self, server_name: &str) -> Result<()> {
        let mut current = self.current.write();
        current
            .remove_virtual_host(server_name)
            .ok_or_else(|| Error::NotFound(format!("virtual host '{server_name}'")))?;
        self.persist(&current);
        Ok(())
    }

    async fn list_locations(&self, server_name: &str) -> Result<Vec<Location>> {
        let current = self.current.read();
        Ok(resolve_host(&current, server_name)?.locations.clone())
    }

    async fn create_location(&self, server_name: &str, location: &Location) -> Result<()> {
        check_pattern(location)?;
        let mut current = self.current.write();
        let host = resolve_host_mut(&mut current, server_name)?;
        host.locations.push(location.clone());
        self.persist(&current);
        Ok(())
    }

    async fn update_location(
        &self,
        server_name: &str,
        index: usize,
        location: &Location,
    ) -> Result<()> {
        check_pattern(location)?;
        let mut current = self.current.write();
        let host = resolve_host_mut(&mut current, server_name)?;
        let slot = host
            .locations
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("location index {index}")))?;
        *slot = location.clone();
        self.persist(&current);
        Ok(())
    }

    async fn delete_location(&self, server_name: &str, index: usize) -> Result<()> {
        let mut current = self.current.write();
        let host = resolve_host_mut(&mut current, server_name)?;
        if index >= host.locations.len() {
            return Err(Error::NotFound(format!("location index {index}")));
        }
        host.locations.remove(index);
        self.persist(&current);
        Ok(())
    }

    async fn server_status(&self) -> Result<ServerStatus> {
        let current = self.current.read();
        Ok(ServerStatus {
            status: "running".to_string(),
            ports: current.all_listen_ports(),
        })
    }

    async fn server_stats(&self) -> Result<ServerStats> {
        let current = self.current.read();
        Ok(ServerStats {
            virtual_hosts: current.virtual_hosts.len(),
            ports: current.all_listen_ports(),
            mime_types: current.mime_types.len(),
        })
    }

    async fn reload_server(&self) -> Result<()> {
        self.reload_config().await?;
        tracing::info!("🔄 server reload initiated");
        Ok(())
    }
}
