//! Draft reconciler
//!
//! Keeps one canonical in-memory [`ConfigDocument`] and a derived
//! raw-text JSON view mutually consistent. Structured edits regenerate
//! the raw view immediately; raw-text edits replace the canonical state
//! only when they parse. A malformed raw edit returns an error but
//! leaves the canonical state untouched, so a caller driving a text
//! buffer can absorb failures keystroke by keystroke and keep the last
//! valid document.

use serde_json::Value;
use wheelhouse_core::config::ConfigDocument;
use wheelhouse_core::error::{Error, Result};

use crate::adapter::JsonAdapter;

/// Editable draft of a configuration document with a synchronized
/// raw-text view.
#[derive(Debug, Clone)]
pub struct DraftReconciler {
    draft: ConfigDocument,
    raw: String,
}

impl DraftReconciler {
    /// Start a draft from an authoritative document.
    pub fn new(document: ConfigDocument) -> Self {
        let mut reconciler = Self {
            draft: document,
            raw: String::new(),
        };
        reconciler.regenerate();
        reconciler
    }

    /// The canonical structured draft.
    pub fn draft(&self) -> &ConfigDocument {
        &self.draft
    }

    /// The canonical raw-text view, regenerated after every committed
    /// edit.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Discard the draft and start over from a fresh document.
    pub fn reset(&mut self, document: ConfigDocument) {
        self.draft = document;
        self.regenerate();
    }

    /// Consume the reconciler, yielding the draft.
    pub fn into_draft(self) -> ConfigDocument {
        self.draft
    }

    /// Apply a typed structured edit. The closure sees the draft
    /// directly; the raw view is regenerated afterwards.
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ConfigDocument),
    {
        f(&mut self.draft);
        self.regenerate();
    }

    /// Replace one field, addressed by JSON pointer (RFC 6901), with a
    /// new value. The edit is atomic: either the whole draft is
    /// replaced by the updated document, or nothing changes.
    pub fn apply_field_edit(&mut self, pointer: &str, value: Value) -> Result<()> {
        let mut tree = serde_json::to_value(&self.draft)
            .map_err(|e| Error::Config(e.to_string()))?;

        let slot = tree.pointer_mut(pointer).ok_or_else(|| {
            Error::Validation(format!("no such field: '{pointer}'"))
        })?;
        *slot = value;

        let updated: ConfigDocument = serde_json::from_value(tree).map_err(|e| {
            Error::Validation(format!("field edit at '{pointer}' rejected: {e}"))
        })?;

        self.draft = updated;
        self.regenerate();
        Ok(())
    }

    /// Apply a raw-text edit. A well-formed parse atomically replaces
    /// the canonical draft; a malformed one leaves it unchanged and
    /// returns `Error::Parse`, which callers are expected to absorb
    /// while the text is in flux.
    pub fn apply_raw_text(&mut self, text: &str) -> Result<()> {
        match JsonAdapter::parse(text) {
            Ok(document) => {
                self.draft = document;
                self.regenerate();
                Ok(())
            }
            Err(e) => {
                tracing::debug!("raw-text edit not applied: {}", e);
                Err(e)
            }
        }
    }

    fn regenerate(&mut self) {
        self.raw = JsonAdapter::serialize(&self.draft).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wheelhouse_core::config::{HandlerConfig, Location, MatchType, PathMatch, VirtualHost};

    fn sample() -> ConfigDocument {
        ConfigDocument {
            user: "www-data".to_string(),
            group: "www-data".to_string(),
            listen: vec!["80".to_string()],
            directory_index: "index.html".to_string(),
            virtual_hosts: vec![VirtualHost {
                server_name: "a.com".to_string(),
                document_root: "/var/www/a".to_string(),
                locations: vec![Location {
                    matcher: PathMatch {
                        path: "/api".to_string(),
                        match_type: MatchType::Prefix,
                    },
                    handler: HandlerConfig::Proxy {
                        proxy_unix_socket: "/run/a.sock".to_string(),
                        proxy_type: Default::default(),
                    },
                    directory_index: String::new(),
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_views_agree_after_reset() {
        let reconciler = DraftReconciler::new(sample());
        let parsed = JsonAdapter::parse(reconciler.raw_text()).unwrap();
        assert_eq!(&parsed, reconciler.draft());
    }

    #[test]
    fn test_structured_edit_regenerates_raw() {
        let mut reconciler = DraftReconciler::new(sample());
        reconciler.edit(|doc| doc.user = "nobody".to_string());
        assert!(reconciler.raw_text().contains(r#""user": "nobody""#));
    }

    #[test]
    fn test_field_edit_by_pointer() {
        let mut reconciler = DraftReconciler::new(sample());
        reconciler
            .apply_field_edit("/virtualHosts/0/documentRoot", json!("/srv/a"))
            .unwrap();
        assert_eq!(reconciler.draft().virtual_hosts[0].document_root, "/srv/a");
        assert!(reconciler.raw_text().contains("/srv/a"));
    }

    #[test]
    fn test_field_edit_unknown_pointer_rejected() {
        let mut reconciler = DraftReconciler::new(sample());
        let before = reconciler.draft().clone();
        let err = reconciler
            .apply_field_edit("/virtualHosts/7/documentRoot", json!("/srv"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(reconciler.draft(), &before);
    }

    #[test]
    fn test_field_edit_is_atomic_on_type_mismatch() {
        let mut reconciler = DraftReconciler::new(sample());
        let before = reconciler.draft().clone();
        let raw_before = reconciler.raw_text().to_string();
        assert!(reconciler
            .apply_field_edit("/adminEnabled", json!("yes"))
            .is_err());
        assert_eq!(reconciler.draft(), &before);
        assert_eq!(reconciler.raw_text(), raw_before);
    }

    #[test]
    fn test_malformed_raw_text_leaves_draft_unchanged() {
        let mut reconciler = DraftReconciler::new(sample());
        let before = reconciler.draft().clone();
        let err = reconciler.apply_raw_text("{\"user\": ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(reconciler.draft(), &before);
    }

    #[test]
    fn test_valid_raw_text_replaces_draft_exactly() {
        let mut reconciler = DraftReconciler::new(sample());
        let text = r#"{"user": "edited", "listen": ["8080"]}"#;
        reconciler.apply_raw_text(text).unwrap();
        assert_eq!(reconciler.draft().user, "edited");
        assert_eq!(reconciler.draft().listen, vec!["8080"]);
        assert!(reconciler.draft().virtual_hosts.is_empty());
    }

    #[test]
    fn test_serialize_parse_serialize_round_trip() {
        let first = JsonAdapter::serialize(&sample()).unwrap();
        let second =
            JsonAdapter::serialize(&JsonAdapter::parse(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
