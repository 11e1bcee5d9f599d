use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is invalid, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the error domain or log filter is blank
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.errors.domain.trim().is_empty() {
            anyhow::bail!("server.errors.domain must not be empty");
        }

        if self.telemetry.log_filter.trim().is_empty() {
            anyhow::bail!("telemetry.log_filter must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::SocketAddr;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert!(config.server.listen_address.is_none());
        assert_eq!(config.server.errors.domain, "global");
        assert!(config.trace.detail);
        assert!(!config.trace.locations);
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(!config.telemetry.json);
    }

    #[test]
    fn full_config() {
        let toml = r#"
            [server]
            listen_address = "127.0.0.1:8080"

            [server.errors]
            domain = "catalog"

            [trace]
            detail = false
            locations = true

            [telemetry]
            log_filter = "debug"
            json = true
        "#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(
            config.server.listen_address,
            Some("127.0.0.1:8080".parse::<SocketAddr>().unwrap())
        );
        assert_eq!(config.server.errors.domain, "catalog");
        assert!(!config.trace.detail);
        assert!(config.trace.locations);
        assert_eq!(config.telemetry.log_filter, "debug");
        assert!(config.telemetry.json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[trace]\ncolour = true").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn blank_domain_is_rejected() {
        let err = Config::parse("[server.errors]\ndomain = \" \"").unwrap_err();
        assert!(err.to_string().contains("server.errors.domain"));
    }

    #[test]
    fn expands_environment_before_parsing() {
        temp_env::with_var("HTTPERR_TEST_LISTEN", Some("0.0.0.0:9000"), || {
            let config = Config::parse("[server]\nlisten_address = \"{{ env.HTTPERR_TEST_LISTEN }}\"").unwrap();
            assert_eq!(config.server.listen_address.unwrap().port(), 9000);
        });
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[telemetry]\nlog_filter = \"warn\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.telemetry.log_filter, "warn");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load(Path::new("/nonexistent/httperr.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/httperr.toml"));
    }
}
