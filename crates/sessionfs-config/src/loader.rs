//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;

        config.session.save_path = Self::expand_path_buf(&config.session.save_path);
        if let Some(dir) = config.logging.dir.take() {
            config.logging.dir = Some(Self::expand_path_buf(&dir));
        }

        Ok(config)
    }

    /// Load `path` when given, else the per-user config file if present,
    /// else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    /// `~/.sessionfs/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".sessionfs").join("config.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.sessionfs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    fn expand_path_buf(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => PathBuf::from(Self::expand_path(s)),
            None => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.session.lifetime, 1440);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [session]
            save_path = "/var/lib/sessions"
            lifetime = 3600
            gc_max_lifetime = 7200

            [logging]
            level = "debug"
            dir = "/var/log/sessionfs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.session.save_path, PathBuf::from("/var/lib/sessions"));
        assert_eq!(config.session.lifetime, 3600);
        assert_eq!(config.session.gc_max_lifetime, 7200);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/sessionfs")));
    }

    #[test]
    fn test_load_expands_tilde_in_save_path() {
        let content = r#"
            [session]
            save_path = "~/sessions"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let save_path = config.session.save_path.to_string_lossy().to_string();
        assert!(!save_path.starts_with('~'));
        assert!(save_path.ends_with("/sessions"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[session]").unwrap();
        writeln!(file, "lifetime = 99").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.session.lifetime, 99);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/sessionfs.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_explicit_missing() {
        let result = ConfigLoader::load_or_default(Some(Path::new("/nonexistent/sessionfs.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();

        let config = ConfigLoader::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_wrong_type() {
        let content = r#"
            [session]
            lifetime = "forever"
        "#;
        assert!(ConfigLoader::load_str(content).is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("SESSIONFS_TEST_SAVE_DIR", "/srv/sessions");
        }
        let content = r#"
            [session]
            save_path = "${SESSIONFS_TEST_SAVE_DIR}"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.session.save_path, PathBuf::from("/srv/sessions"));
        unsafe {
            std::env::remove_var("SESSIONFS_TEST_SAVE_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_SESSIONFS_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/var/lib/sessions";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }
}
