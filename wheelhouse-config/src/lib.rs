//! Wheelhouse Configuration Editing
//!
//! This crate keeps the two client-side views of a configuration
//! draft — structured and raw text — mutually consistent.
//!
//! # Example
//!
//! ```rust,ignore
//! use wheelhouse_config::DraftReconciler;
//!
//! let mut draft = DraftReconciler::new(document);
//! draft.edit(|doc| doc.user = "www-data".into());
//! assert!(draft.apply_raw_text("{ not json").is_err()); // draft intact
//! ```

pub mod adapter;
pub mod draft;
pub mod form;

pub use adapter::JsonAdapter;
pub use draft::DraftReconciler;
pub use form::HandlerForm;
