//! Configuration model

mod loader;
mod types;
mod validate;

pub use self::loader::ConfigLoader;
pub use self::types::{
    ConfigDocument, HandlerConfig, HandlerKind, Location, MatchType, MimeType, PathMatch,
    ProxyType, VirtualHost,
};
pub use self::validate::validate_port_spec;
