//! Portal configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::accounts::AdminCredential;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "certify.toml";

/// Top-level certify configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Administrator credential.
    #[serde(default)]
    pub admin: AdminCredential,
    /// Catalog to seed courses from. When unset the two default courses
    /// are created with empty question banks.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

/// Resolve a value of the exact form `${VAR}` from the environment.
///
/// Anything else is returned unchanged, so literal `$` and `{` survive.
fn resolve_env_var(s: &str) -> String {
    match s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(name) if !name.is_empty() && !name.contains(['$', '{', '}']) => {
            std::env::var(name).unwrap_or_default()
        }
        _ => s.to_string(),
    }
}

/// Load config from an explicit path, or from `certify.toml` in the
/// current directory, falling back to defaults.
///
/// Environment variable overrides: `CERTIFY_ADMIN_ID`, `CERTIFY_ADMIN_PASSWORD`.
pub fn load_config_from(path: Option<&Path>) -> Result<PortalConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = parse_config_str(&content, &path)?;
            // Relative catalog paths are relative to the config file.
            if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
                if catalog.is_relative() {
                    *catalog = dir.join(&*catalog);
                }
            }
            config
        }
        None => PortalConfig::default(),
    };

    config.admin.id = resolve_env_var(&config.admin.id);
    config.admin.password = resolve_env_var(&config.admin.password);

    // Overrides are taken verbatim.
    if let Ok(id) = std::env::var("CERTIFY_ADMIN_ID") {
        config.admin.id = id;
    }
    if let Ok(password) = std::env::var("CERTIFY_ADMIN_PASSWORD") {
        config.admin.password = password;
    }

    tracing::debug!(?config, "config loaded");
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<PortalConfig> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_var_whole_value_only() {
        std::env::set_var("_CERTIFY_TEST_VAR", "hello");
        assert_eq!(resolve_env_var("${_CERTIFY_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_var("prefix_${_CERTIFY_TEST_VAR}_suffix"),
            "prefix_${_CERTIFY_TEST_VAR}_suffix"
        );
        assert_eq!(resolve_env_var("no_refs"), "no_refs");
        assert_eq!(resolve_env_var("${}"), "${}");
        assert_eq!(resolve_env_var("${a}${b}"), "${a}${b}");
        std::env::remove_var("_CERTIFY_TEST_VAR");
    }

    #[test]
    fn literal_dollar_password_survives_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certify.toml");
        std::fs::write(&path, "[admin]\nid = \"root\"\npassword = \"p${w}d\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        if std::env::var_os("CERTIFY_ADMIN_PASSWORD").is_none() {
            assert_eq!(config.admin.password, "p${w}d");
        }
    }

    #[test]
    fn default_config() {
        let config = PortalConfig::default();
        assert_eq!(config.admin, AdminCredential::new("admin", "admin123"));
        assert!(config.catalog.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            "[admin]\npassword = \"hunter2\"\n",
            Path::new("certify.toml"),
        )
        .unwrap();
        assert_eq!(config.admin.id, "admin");
        assert_eq!(config.admin.password, "hunter2");
    }

    #[test]
    fn catalog_path_is_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "catalog = \"courses.toml\"\n\n[admin]\nid = \"root\"\npassword = \"pw\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.catalog, Some(dir.path().join("courses.toml")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
