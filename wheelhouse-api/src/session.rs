//! Admin session
//!
//! One client's editing session against an authoritative store: the
//! save/reload state machine for the global document plus virtual-host
//! and location operations. The session owns the draft reconciler and
//! never touches it when a store operation fails.
//!
//! Location identity on the wire is positional, so the session mints a
//! synthetic [`LocationId`] for every entry of the most recent list
//! fetch and only translates it back to an index at write time. Ids
//! from before the latest fetch fail to resolve and the write is
//! rejected as stale; after every successful mutation the list is
//! fetched again before another id-addressed write is possible.
//!
//! Operations take `&mut self`, so one session has at most one
//! in-flight operation; concurrent sessions against the same store are
//! last-write-wins (see [`crate::store`]).

use std::collections::HashMap;

use wheelhouse_config::DraftReconciler;
use wheelhouse_core::config::{Location, VirtualHost};
use wheelhouse_core::error::{Error, Result};

use crate::store::{ConfigStore, ServerStats, ServerStatus};

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No load attempted yet
    Idle,
    /// Initial fetch in flight
    Loading,
    /// Fetch settled; the draft may be absent if the fetch failed
    Ready,
    /// Whole-document write in flight
    Saving,
    /// Discard-and-refetch in flight
    Reloading,
    /// Last save or reload failed; the draft (if any) is preserved
    Error,
}

/// Stable client-side identity for one listed location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationId(u64);

/// One location as listed, with its session-local id
#[derive(Debug, Clone)]
pub struct TrackedLocation {
    pub id: LocationId,
    pub location: Location,
}

/// The location list of one virtual host as of the latest fetch
#[derive(Debug, Clone, Default)]
pub struct LocationRoster {
    entries: Vec<TrackedLocation>,
}

impl LocationRoster {
    pub fn entries(&self) -> &[TrackedLocation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, id: LocationId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

/// Editing session over a [`ConfigStore`]
pub struct AdminSession<S> {
    store: S,
    state: SessionState,
    draft: Option<DraftReconciler>,
    rosters: HashMap<String, LocationRoster>,
    next_id: u64,
}

impl<S: ConfigStore> AdminSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Idle,
            draft: None,
            rosters: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current draft, absent until a load succeeds.
    pub fn draft(&self) -> Option<&DraftReconciler> {
        self.draft.as_ref()
    }

    /// Mutable access for structured and raw-text edits.
    pub fn draft_mut(&mut self) -> Option<&mut DraftReconciler> {
        self.draft.as_mut()
    }

    /// Fetch the document and start a fresh draft, discarding any
    /// unsaved edits. On failure the session stays usable but has no
    /// data; callers must not assume a draft is present.
    pub async fn load(&mut self) -> Result<()> {
        self.state = SessionState::Loading;
        self.rosters.clear();
        match self.store.fetch_config().await {
            Ok(document) => {
                self.draft = Some(DraftReconciler::new(document));
                self.state = SessionState::Ready;
                tracing::info!("configuration loaded");
                Ok(())
            }
            Err(e) => {
                self.draft = None;
                self.state = SessionState::Ready;
                tracing::warn!("load failed: {}", e);
                Err(e)
            }
        }
    }

    /// Send the whole draft as one write. Success does not refresh the
    /// draft; the accepted value is assumed identical to what was
    /// sent. Failure preserves the draft for retry or correction.
    pub async fn save(&mut self) -> Result<()> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| Error::Validation("no draft to save".to_string()))?;
        draft.draft().validate()?;

        self.state = SessionState::Saving;
        match self.store.replace_config(draft.draft()).await {
            Ok(()) => {
                self.state = SessionState::Ready;
                self.rosters.clear();
                tracing::info!("configuration saved");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Error;
                tracing::warn!("save failed, draft preserved: {}", e);
                Err(e)
            }
        }
    }

    /// Ask the store to re-read its persisted source, then refetch.
    /// Unconditionally discards the local draft.
    pub async fn reload(&mut self) -> Result<()> {
        self.state = SessionState::Reloading;
        self.draft = None;
        self.rosters.clear();

        let result = async {
            self.store.reload_config().await?;
            self.store.fetch_config().await
        }
        .await;

        match result {
            Ok(document) => {
                self.draft = Some(DraftReconciler::new(document));
                self.state = SessionState::Ready;
                tracing::info!("configuration reloaded");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Error;
                tracing::warn!("reload failed: {}", e);
                Err(e)
            }
        }
    }

    /// GET /server/status passthrough.
    pub async fn status(&mut self) -> Result<ServerStatus> {
        self.store.server_status().await
    }

    /// GET /stats passthrough.
    pub async fn stats(&mut self) -> Result<ServerStats> {
        self.store.server_stats().await
    }

    /// Apply the live configuration without a restart.
    pub async fn reload_server(&mut self) -> Result<()> {
        self.store.reload_server().await
    }

    pub async fn list_virtual_hosts(&mut self) -> Result<Vec<VirtualHost>> {
        self.store.list_virtual_hosts().await
    }

    pub async fn virtual_host(&mut self, server_name: &str) -> Result<VirtualHost> {
        self.store.fetch_virtual_host(server_name).await
    }

    pub async fn create_virtual_host(&mut self, host: &VirtualHost) -> Result<()> {
        host.validate()?;
        self.store.create_virtual_host(host).await?;
        self.rosters.remove(&host.server_name);
        Ok(())
    }

    /// Full replacement under the same identity key. Renames are
    /// delete-then-create; a mismatched name never reaches the store.
    pub async fn update_virtual_host(&mut self, server_name: &str, host: &VirtualHost) -> Result<()> {
        if host.server_name != server_name {
            return Err(Error::Validation(format!(
                "serverName cannot be changed in place ('{}' -> '{}'); delete and recreate",
                server_name, host.server_name
            )));
        }
        host.validate()?;
        self.store.update_virtual_host(server_name, host).await?;
        // The replacement may have rewritten the location list wholesale.
        self.rosters.remove(server_name);
        Ok(())
    }

    pub async fn delete_virtual_host(&mut self, server_name: &str) -> Result<()> {
        self.store.delete_virtual_host(server_name).await?;
        self.rosters.remove(server_name);
        Ok(())
    }

    /// Fetch the location list for a host, minting fresh ids. Any id
    /// from an earlier fetch of this host stops resolving.
    pub async fn locations(&mut self, server_name: &str) -> Result<&LocationRoster> {
        self.refresh_roster(server_name).await?;
        Ok(&self.rosters[server_name])
    }

    /// Append a location. The list is refetched before another
    /// id-addressed write is possible.
    pub async fn create_location(&mut self, server_name: &str, location: &Location) -> Result<()> {
        location.validate()?;
        self.store.create_location(server_name, location).await?;
        self.refresh_roster(server_name).await
    }

    /// Replace the location identified by `id` in place.
    pub async fn update_location(
        &mut self,
        server_name: &str,
        id: LocationId,
        location: &Location,
    ) -> Result<()> {
        location.validate()?;
        let index = self.resolve(server_name, id)?;
        self.store.update_location(server_name, index, location).await?;
        self.refresh_roster(server_name).await
    }

    /// Delete the location identified by `id`.
    pub async fn delete_location(&mut self, server_name: &str, id: LocationId) -> Result<()> {
        let index = self.resolve(server_name, id)?;
        self.store.delete_location(server_name, index).await?;
        self.refresh_roster(server_name).await
    }

    fn resolve(&self, server_name: &str, id: LocationId) -> Result<usize> {
        let roster = self.rosters.get(server_name).ok_or_else(|| {
            Error::Stale(format!("no location list fetched for '{server_name}'"))
        })?;
        roster.index_of(id).ok_or_else(|| {
            Error::Stale(format!(
                "location handle predates the latest list of '{server_name}'"
            ))
        })
    }

    async fn refresh_roster(&mut self, server_name: &str) -> Result<()> {
        match self.store.list_locations(server_name).await {
            Ok(locations) => {
                let entries = locations
                    .into_iter()
                    .map(|location| {
                        self.next_id += 1;
                        TrackedLocation {
                            id: LocationId(self.next_id),
                            location,
                        }
                    })
                    .collect();
                self.rosters
                    .insert(server_name.to_string(), LocationRoster { entries });
                tracing::debug!("location roster refreshed for {}", server_name);
                Ok(())
            }
            Err(e) => {
                // Without a fresh list no held id can be trusted.
                self.rosters.remove(server_name);
                Err(e)
            }
        }
    }
}
