//! Startup configuration assembly.
//!
//! Order: file (or defaults) → command-line overrides → validation.

use std::path::Path;

use crate::config::{load_config, validate_config, ConfigError, ProxyConfig};

/// Values given on the command line that replace file settings.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen_addr: Option<String>,
    pub auth_backend: Option<String>,
}

pub fn prepare_config(path: Option<&Path>, overrides: Overrides) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(addr) = overrides.listen_addr {
        config.listener.bind_address = addr;
    }
    if let Some(backend) = overrides.auth_backend {
        config.auth_backend.url = backend;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = prepare_config(None, Overrides::default()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8181");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[auth_backend]\nurl = \"http://from-file:8080\"\n[listener]\nbind_address = \"127.0.0.1:1\""
        )
        .unwrap();

        let config = prepare_config(
            Some(file.path()),
            Overrides {
                listen_addr: Some("0.0.0.0:8181".into()),
                auth_backend: Some("http://from-flag:3000".into()),
            },
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8181");
        assert_eq!(config.auth_backend.url, "http://from-flag:3000");
    }

    #[test]
    fn test_overrides_are_validated() {
        let err = prepare_config(
            None,
            Overrides {
                listen_addr: None,
                auth_backend: Some("localhost".into()),
            },
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::BackendUrl("localhost".into())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
