use mysql_async::{Opts, OptsBuilder};
use serde::{Deserialize, Serialize};

use crate::error::DbSessionError;

fn default_port() -> u16 {
    3306
}

/// Connection parameters for one database session
///
/// Credentials are typically sourced from external configuration; the struct
/// is serde-derived so callers can deserialize it from whatever format their
/// configuration lives in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Hostname or IP of the MySQL server
    pub host: String,
    /// TCP port, 3306 when absent
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for the connection
    pub user: String,
    /// Password for the connection (empty is allowed)
    #[serde(default)]
    pub password: String,
    /// Name of the database to connect to
    pub database: String,
}

impl SessionConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Validate that all required config fields are present
    ///
    /// # Errors
    /// Returns `DbSessionError::ConfigError` naming the first missing field.
    pub fn validate(&self) -> Result<(), DbSessionError> {
        if self.host.is_empty() {
            return Err(DbSessionError::ConfigError("host is required".to_string()));
        }
        if self.user.is_empty() {
            return Err(DbSessionError::ConfigError("user is required".to_string()));
        }
        if self.database.is_empty() {
            return Err(DbSessionError::ConfigError(
                "database is required".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn to_opts(&self) -> Opts {
        let builder = OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()));
        Opts::from(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_rejected() {
        let config = SessionConfig::new("", "user", "pw", "db");
        assert!(matches!(
            config.validate(),
            Err(DbSessionError::ConfigError(msg)) if msg.contains("host")
        ));

        let config = SessionConfig::new("localhost", "user", "pw", "");
        assert!(matches!(
            config.validate(),
            Err(DbSessionError::ConfigError(msg)) if msg.contains("database")
        ));
    }

    #[test]
    fn empty_password_is_allowed() {
        let config = SessionConfig::new("localhost", "user", "", "db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn port_defaults_when_deserialized_without_one() {
        let config: SessionConfig = serde_json::from_str(
            r#"{"host":"localhost","user":"u","password":"p","database":"d"}"#,
        )
        .unwrap();
        assert_eq!(config.port, 3306);
    }
}
