//! Configuration validation.

use super::Config;
use crate::drivers::PlatformImpl;
use crate::error::{PlatformError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.platform.r#type.trim().is_empty() {
        return Err(PlatformError::Config("platform.type is required".into()));
    }

    // Resolves the type alias and parses the version
    PlatformImpl::from_config(&config.platform)?;

    if let Some(version) = &config.platform.version {
        if version.trim().is_empty() {
            return Err(PlatformError::Config(
                "platform.version must not be empty when set".into(),
            ));
        }
    }

    for (field, value) in [
        ("defaults.engine", &config.defaults.engine),
        ("defaults.charset", &config.defaults.charset),
        ("defaults.collation", &config.defaults.collation),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(PlatformError::Config(format!(
                "{} must not be empty when set",
                field
            )));
        }
    }

    if config.output.terminator.contains('\n') {
        return Err(PlatformError::Config(
            "output.terminator must not contain a newline".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config::for_platform("postgres")
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_platform_type() {
        let mut config = valid_config();
        config.platform.r#type = "".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("platform.type is required"));
    }

    #[test]
    fn test_unknown_platform_type() {
        let mut config = valid_config();
        config.platform.r#type = "db2".to_string();
        assert!(matches!(validate(&config), Err(PlatformError::Config(_))));
    }

    #[test]
    fn test_mysql_version() {
        let mut config = Config::for_platform("mysql");
        config.platform.version = Some("5.7".to_string());
        assert!(validate(&config).is_ok());

        config.platform.version = Some("4.1".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_defaults_rejected() {
        let mut config = valid_config();
        config.defaults.engine = Some(" ".to_string());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("defaults.engine"));
    }

    #[test]
    fn test_terminator_newline_rejected() {
        let mut config = valid_config();
        config.output.terminator = ";\n".to_string();
        assert!(validate(&config).is_err());
    }
}
