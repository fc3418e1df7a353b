//! Pre-submission configuration validation
//!
//! Catches client-side errors before a write is sent to the
//! authoritative store. The store remains the final validator; these
//! checks cover required fields and syntactic invariants only.

use crate::error::{Error, Result};

use super::types::{ConfigDocument, HandlerConfig, Location, PathMatch, VirtualHost};

/// Validate one listen port specifier: a decimal port in 1..=65535.
pub fn validate_port_spec(spec: &str) -> Result<()> {
    match spec.parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => Ok(()),
        _ => Err(Error::Validation(format!("invalid port spec '{spec}'"))),
    }
}

impl PathMatch {
    /// The pattern is kept opaque; only presence is required here.
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::Validation("location path is required".to_string()));
        }
        Ok(())
    }
}

impl HandlerConfig {
    /// Per-variant validation hook.
    ///
    /// Every variant currently accepts anything beyond the presence of
    /// the discriminator (which the type system guarantees); stricter
    /// per-variant rules attach here without touching the others.
    pub fn validate(&self) -> Result<()> {
        match self {
            HandlerConfig::Static => Ok(()),
            HandlerConfig::Proxy { .. } => Ok(()),
            HandlerConfig::Cgi { .. } => Ok(()),
            HandlerConfig::Php { .. } => Ok(()),
        }
    }
}

impl Location {
    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;
        self.handler.validate()
    }
}

impl VirtualHost {
    pub fn validate(&self) -> Result<()> {
        if self.server_name.is_empty() {
            return Err(Error::Validation("serverName is required".to_string()));
        }
        if self.document_root.is_empty() {
            return Err(Error::Validation(format!(
                "documentRoot is required for '{}'",
                self.server_name
            )));
        }
        for port in &self.listen {
            validate_port_spec(port)?;
        }
        for location in &self.locations {
            location.validate()?;
        }
        Ok(())
    }
}

impl ConfigDocument {
    pub fn validate(&self) -> Result<()> {
        for port in &self.listen {
            validate_port_spec(port)?;
        }

        // serverName is the identity key; duplicates would make the
        // name-addressed protocol ambiguous.
        for (i, host) in self.virtual_hosts.iter().enumerate() {
            host.validate()?;
            if self.virtual_hosts[..i]
                .iter()
                .any(|other| other.server_name == host.server_name)
            {
                return Err(Error::Validation(format!(
                    "duplicate serverName '{}'",
                    host.server_name
                )));
            }
        }

        // adminEnabled without a port would be silently meaningless on
        // the server side; reject it here instead.
        if self.admin_enabled && self.admin_port.is_empty() {
            return Err(Error::Validation(
                "adminEnabled requires adminPort to be set".to_string(),
            ));
        }
        if !self.admin_port.is_empty() {
            validate_port_spec(&self.admin_port)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::MatchType;

    fn host(name: &str) -> VirtualHost {
        VirtualHost {
            server_name: name.to_string(),
            document_root: format!("/var/www/{name}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_port_specs() {
        assert!(validate_port_spec("80").is_ok());
        assert!(validate_port_spec("65535").is_ok());
        assert!(validate_port_spec("0").is_err());
        assert!(validate_port_spec("65536").is_err());
        assert!(validate_port_spec("http").is_err());
        assert!(validate_port_spec("").is_err());
    }

    #[test]
    fn test_empty_path_rejected() {
        let loc = Location {
            matcher: PathMatch {
                path: String::new(),
                match_type: MatchType::Regex,
            },
            handler: HandlerConfig::Static,
            directory_index: String::new(),
        };
        assert!(loc.validate().is_err());
    }

    #[test]
    fn test_host_required_fields() {
        assert!(host("a.com").validate().is_ok());

        let mut missing_root = host("a.com");
        missing_root.document_root.clear();
        assert!(missing_root.validate().is_err());

        let mut missing_name = host("a.com");
        missing_name.server_name.clear();
        assert!(missing_name.validate().is_err());

        let mut bad_port = host("a.com");
        bad_port.listen.push("eighty".to_string());
        assert!(bad_port.validate().is_err());
    }

    #[test]
    fn test_duplicate_server_names_rejected() {
        let doc = ConfigDocument {
            virtual_hosts: vec![host("a.com"), host("b.com"), host("a.com")],
            ..Default::default()
        };
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("a.com"));
    }

    #[test]
    fn test_admin_enabled_requires_port() {
        let doc = ConfigDocument {
            admin_enabled: true,
            ..Default::default()
        };
        assert!(doc.validate().is_err());

        let doc = ConfigDocument {
            admin_enabled: true,
            admin_port: "8080".to_string(),
            ..Default::default()
        };
        assert!(doc.validate().is_ok());
    }
}
