//! Configuration type definitions
//!
//! These types represent the administrative view of the server
//! configuration: global settings, virtual hosts, and their ordered
//! location rules. The wire form is JSON with camelCase keys; a
//! location is a flat object whose `handler` key discriminates the
//! handler variant.

use serde::{Deserialize, Serialize};

/// Root configuration document
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Worker process user
    #[serde(default)]
    pub user: String,

    /// Worker process group
    #[serde(default)]
    pub group: String,

    /// Administrative contact
    #[serde(default)]
    pub server_admin: String,

    /// Global ports to listen on (applies to all virtual hosts)
    #[serde(default)]
    pub listen: Vec<String>,

    /// Virtual hosts, ordered; `server_name` is the identity key
    #[serde(default)]
    pub virtual_hosts: Vec<VirtualHost>,

    /// Extra MIME type registrations
    #[serde(default)]
    pub mime_types: Vec<MimeType>,

    /// Global default directory index
    #[serde(default)]
    pub directory_index: String,

    /// Requests allowed per rate-limit window (0 = server default)
    #[serde(default)]
    pub rate_limit_requests: u32,

    /// Rate-limit window in seconds (0 = server default)
    #[serde(default)]
    pub rate_limit_window_seconds: u32,

    /// Port for the admin API
    #[serde(default)]
    pub admin_port: String,

    /// Enable the admin API
    #[serde(default)]
    pub admin_enabled: bool,
}

/// Virtual host configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHost {
    /// Ports this virtual host listens on (empty = all ports)
    #[serde(default)]
    pub listen: Vec<String>,

    /// Primary host name; unique within a document
    #[serde(default)]
    pub server_name: String,

    /// Additional host names served by this virtual host
    #[serde(default)]
    pub server_alias: Vec<String>,

    /// Filesystem root for this host
    #[serde(default)]
    pub document_root: String,

    /// Per-host worker user override
    #[serde(default)]
    pub user: String,

    /// Per-host worker group override
    #[serde(default)]
    pub group: String,

    /// Administrative contact for this host
    #[serde(default)]
    pub server_admin: String,

    /// Directory index override for this host
    #[serde(default)]
    pub directory_index: String,

    /// Ordered location rules; identity within a host is positional
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// MIME type registration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MimeType {
    /// File extension, without the dot
    pub ext: String,

    /// MIME type value
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// One location rule: a path matcher, a handler, and common overrides
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// How request paths are matched against this rule
    #[serde(flatten)]
    pub matcher: PathMatch,

    /// How matched requests are handled
    #[serde(flatten)]
    pub handler: HandlerConfig,

    /// Directory index override for this location
    #[serde(default)]
    pub directory_index: String,
}

/// How a location matches request paths
///
/// Representational only: the pattern is preserved exactly and never
/// compiled or executed here. Matching belongs to the serving engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathMatch {
    /// Literal prefix or regex pattern, depending on `match_type`
    #[serde(default)]
    pub path: String,

    /// Match mode
    #[serde(default)]
    pub match_type: MatchType,
}

/// Location match modes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// Literal string prefix match
    #[default]
    Prefix,
    /// Case-sensitive regex match
    Regex,
    /// Case-insensitive regex match
    RegexCaseInsensitive,
}

/// Handler configuration
///
/// The `handler` key discriminates the variant on the wire; only the
/// active variant's fields are ever serialized, so a saved location can
/// not carry stale fields from a previously selected handler type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "handler", rename_all = "lowercase")]
pub enum HandlerConfig {
    /// Serve files from the document root
    Static,

    /// Forward to a backend over a unix socket
    #[serde(rename_all = "camelCase")]
    Proxy {
        #[serde(default)]
        proxy_unix_socket: String,
        #[serde(default)]
        proxy_type: ProxyType,
    },

    /// Execute CGI scripts under a path
    #[serde(rename_all = "camelCase")]
    Cgi {
        #[serde(default)]
        cgi_path: String,
    },

    /// Hand off to a PHP FastCGI backend over TCP
    Php {
        #[serde(rename = "phpProxyFCGI", default)]
        php_proxy_fcgi: String,
    },
}

/// Proxy backend protocols
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    #[default]
    Http,
    Fcgi,
}

/// Handler discriminator, detached from any variant's fields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    #[default]
    Static,
    Proxy,
    Cgi,
    Php,
}

impl HandlerKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Static => "static",
            HandlerKind::Proxy => "proxy",
            HandlerKind::Cgi => "cgi",
            HandlerKind::Php => "php",
        }
    }
}

impl HandlerConfig {
    /// The active variant's discriminator.
    pub fn kind(&self) -> HandlerKind {
        match self {
            HandlerConfig::Static => HandlerKind::Static,
            HandlerConfig::Proxy { .. } => HandlerKind::Proxy,
            HandlerConfig::Cgi { .. } => HandlerKind::Cgi,
            HandlerConfig::Php { .. } => HandlerKind::Php,
        }
    }
}

impl ConfigDocument {
    /// Exact lookup by `server_name`, the identity key used by the
    /// admin protocol.
    pub fn virtual_host(&self, server_name: &str) -> Option<&VirtualHost> {
        self.virtual_hosts.iter().find(|v| v.server_name == server_name)
    }

    /// Mutable exact lookup by `server_name`.
    pub fn virtual_host_mut(&mut self, server_name: &str) -> Option<&mut VirtualHost> {
        self.virtual_hosts.iter_mut().find(|v| v.server_name == server_name)
    }

    /// Lookup by host name, considering server aliases as well. This is
    /// the resolution the serving engine uses for reads.
    pub fn resolve_virtual_host(&self, name: &str) -> Option<&VirtualHost> {
        self.virtual_hosts
            .iter()
            .find(|v| v.server_name == name || v.server_alias.iter().any(|a| a == name))
    }

    /// Remove a virtual host by its identity key.
    pub fn remove_virtual_host(&mut self, server_name: &str) -> Option<VirtualHost> {
        let idx = self
            .virtual_hosts
            .iter()
            .position(|v| v.server_name == server_name)?;
        Some(self.virtual_hosts.remove(idx))
    }

    /// All unique ports to listen on: the global list plus every
    /// virtual host's, deduplicated in first-seen order.
    pub fn all_listen_ports(&self) -> Vec<String> {
        let mut ports: Vec<String> = Vec::new();
        let global = self.listen.iter();
        let per_host = self.virtual_hosts.iter().flat_map(|v| v.listen.iter());
        for port in global.chain(per_host) {
            if !port.is_empty() && !ports.iter().any(|p| p == port) {
                ports.push(port.clone());
            }
        }
        ports
    }

    /// Directory index for a host, falling back to the global default.
    pub fn directory_index_for<'a>(&'a self, host: Option<&'a VirtualHost>) -> &'a str {
        match host {
            Some(v) if !v.directory_index.is_empty() => &v.directory_index,
            _ => &self.directory_index,
        }
    }

    /// Effective rate-limit settings: (max requests, window seconds).
    pub fn rate_limit(&self) -> (u32, u32) {
        let requests = if self.rate_limit_requests > 0 {
            self.rate_limit_requests
        } else {
            100
        };
        let window = if self.rate_limit_window_seconds > 0 {
            self.rate_limit_window_seconds
        } else {
            60
        };
        (requests, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document() {
        let doc = ConfigDocument::default();
        assert!(doc.virtual_hosts.is_empty());
        assert!(!doc.admin_enabled);
        assert_eq!(doc.rate_limit(), (100, 60));
    }

    #[test]
    fn test_location_wire_form() {
        let json = r#"{
            "path": "/api",
            "matchType": "prefix",
            "handler": "proxy",
            "proxyUnixSocket": "/run/app.sock",
            "proxyType": "fcgi"
        }"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.matcher.path, "/api");
        assert_eq!(loc.matcher.match_type, MatchType::Prefix);
        assert_eq!(
            loc.handler,
            HandlerConfig::Proxy {
                proxy_unix_socket: "/run/app.sock".to_string(),
                proxy_type: ProxyType::Fcgi,
            }
        );
    }

    #[test]
    fn test_stale_variant_fields_ignored_on_read() {
        // Documents written by older tooling can carry fields for
        // handler types other than the active one.
        let json = r#"{
            "path": "/",
            "handler": "static",
            "proxyUnixSocket": "/run/stale.sock",
            "cgiPath": "/cgi-bin"
        }"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.handler, HandlerConfig::Static);
    }

    #[test]
    fn test_inactive_variant_fields_not_serialized() {
        let loc = Location {
            matcher: PathMatch {
                path: "/".to_string(),
                match_type: MatchType::Prefix,
            },
            handler: HandlerConfig::Static,
            directory_index: String::new(),
        };
        let value = serde_json::to_value(&loc).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("handler").unwrap(), "static");
        assert!(!obj.contains_key("proxyUnixSocket"));
        assert!(!obj.contains_key("proxyType"));
        assert!(!obj.contains_key("cgiPath"));
        assert!(!obj.contains_key("phpProxyFCGI"));
    }

    #[test]
    fn test_match_type_wire_names() {
        let m: MatchType = serde_json::from_str(r#""regexCaseInsensitive""#).unwrap();
        assert_eq!(m, MatchType::RegexCaseInsensitive);
        assert_eq!(serde_json::to_string(&MatchType::Prefix).unwrap(), r#""prefix""#);
    }

    #[test]
    fn test_listen_port_union() {
        let doc = ConfigDocument {
            listen: vec!["80".to_string(), "443".to_string()],
            virtual_hosts: vec![
                VirtualHost {
                    server_name: "a.com".to_string(),
                    listen: vec!["443".to_string(), "8443".to_string()],
                    ..Default::default()
                },
                VirtualHost {
                    server_name: "b.com".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(doc.all_listen_ports(), vec!["80", "443", "8443"]);
    }

    #[test]
    fn test_host_resolution() {
        let doc = ConfigDocument {
            virtual_hosts: vec![VirtualHost {
                server_name: "a.com".to_string(),
                server_alias: vec!["www.a.com".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(doc.virtual_host("www.a.com").is_none());
        assert!(doc.resolve_virtual_host("www.a.com").is_some());
    }

    #[test]
    fn test_directory_index_fallback() {
        let doc = ConfigDocument {
            directory_index: "index.html".to_string(),
            ..Default::default()
        };
        let host = VirtualHost {
            directory_index: "index.php".to_string(),
            ..Default::default()
        };
        assert_eq!(doc.directory_index_for(Some(&host)), "index.php");
        assert_eq!(doc.directory_index_for(None), "index.html");
        let bare = VirtualHost::default();
        assert_eq!(doc.directory_index_for(Some(&bare)), "index.html");
    }
}
