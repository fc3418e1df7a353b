//! Handler editing form
//!
//! Working state for a handler-type selector. Every variant's fields
//! are remembered while the user toggles the active kind, so switching
//! proxy -> static -> proxy does not lose the socket path that was
//! already typed in. Only the active variant's fields ever make it
//! into the [`HandlerConfig`] built for a write.

use wheelhouse_core::config::{HandlerConfig, HandlerKind, ProxyType};

/// In-progress handler selection with per-variant field retention.
#[derive(Debug, Clone, Default)]
pub struct HandlerForm {
    active: HandlerKind,
    pub proxy_unix_socket: String,
    pub proxy_type: ProxyType,
    pub cgi_path: String,
    pub php_proxy_fcgi: String,
}

impl HandlerForm {
    /// Start from an existing handler, seeding that variant's fields.
    pub fn from_handler(handler: &HandlerConfig) -> Self {
        let mut form = Self {
            active: handler.kind(),
            ..Default::default()
        };
        match handler {
            HandlerConfig::Static => {}
            HandlerConfig::Proxy {
                proxy_unix_socket,
                proxy_type,
            } => {
                form.proxy_unix_socket = proxy_unix_socket.clone();
                form.proxy_type = *proxy_type;
            }
            HandlerConfig::Cgi { cgi_path } => {
                form.cgi_path = cgi_path.clone();
            }
            HandlerConfig::Php { php_proxy_fcgi } => {
                form.php_proxy_fcgi = php_proxy_fcgi.clone();
            }
        }
        form
    }

    /// The currently selected kind.
    pub fn active(&self) -> HandlerKind {
        self.active
    }

    /// Switch the active kind. Fields of the previous kind stay put.
    pub fn select(&mut self, kind: HandlerKind) {
        self.active = kind;
    }

    /// Build the handler for a write: the active variant's fields and
    /// nothing else.
    pub fn to_handler(&self) -> HandlerConfig {
        match self.active {
            HandlerKind::Static => HandlerConfig::Static,
            HandlerKind::Proxy => HandlerConfig::Proxy {
                proxy_unix_socket: self.proxy_unix_socket.clone(),
                proxy_type: self.proxy_type,
            },
            HandlerKind::Cgi => HandlerConfig::Cgi {
                cgi_path: self.cgi_path.clone(),
            },
            HandlerKind::Php => HandlerConfig::Php {
                php_proxy_fcgi: self.php_proxy_fcgi.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_retains_other_variant_fields() {
        let mut form = HandlerForm::from_handler(&HandlerConfig::Proxy {
            proxy_unix_socket: "/run/app.sock".to_string(),
            proxy_type: ProxyType::Fcgi,
        });

        form.select(HandlerKind::Static);
        assert_eq!(form.to_handler(), HandlerConfig::Static);

        // Toggling back finds the socket where it was left.
        form.select(HandlerKind::Proxy);
        assert_eq!(
            form.to_handler(),
            HandlerConfig::Proxy {
                proxy_unix_socket: "/run/app.sock".to_string(),
                proxy_type: ProxyType::Fcgi,
            }
        );
    }

    #[test]
    fn test_built_handler_carries_only_active_fields() {
        let mut form = HandlerForm::default();
        form.proxy_unix_socket = "/run/app.sock".to_string();
        form.cgi_path = "/cgi-bin".to_string();
        form.select(HandlerKind::Php);
        form.php_proxy_fcgi = "127.0.0.1:9000".to_string();

        let handler = form.to_handler();
        assert_eq!(
            handler,
            HandlerConfig::Php {
                php_proxy_fcgi: "127.0.0.1:9000".to_string(),
            }
        );
        let json = serde_json::to_string(&handler).unwrap();
        assert!(!json.contains("proxyUnixSocket"));
        assert!(!json.contains("cgiPath"));
    }
}
