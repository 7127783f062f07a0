//! Configuration Management
//!
//! This module handles the two configuration inputs the pipeline consumes:
//!
//! - [`AppOptions`]: the per-invocation options (AWS profile, region,
//!   username override, dry-run). Built once from the CLI in `main` and
//!   passed by reference into the pipeline stages; the core functions never
//!   read flag or environment state themselves.
//! - [`ClientBinaries`] loading: the per-engine client binary table,
//!   overridable from a JSON file.
//!
//! # Configuration Locations
//! - Local: `.rdshell/config.json` (per-project)
//! - Global: `~/.config/rdshell/config.json` (per-user)
//!
//! Local takes precedence over global; a missing file means defaults. Keys
//! absent from the file keep their default binary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::command::ClientBinaries;
use crate::error::{RdshellError, Result};

/// Immutable per-invocation options, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// AWS shared-credentials profile name
    pub profile: String,

    /// AWS region to list endpoints in
    pub region: String,

    /// Username override; empty means "use the endpoint's master username"
    pub user: String,

    /// Print the built command instead of executing it
    pub dry_run: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            region: "ap-northeast-1".to_string(),
            user: String::new(),
            dry_run: false,
        }
    }
}

/// Get path to the local config file (`.rdshell/config.json`)
pub fn local_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()
        .map_err(|e| RdshellError::config(format!("Could not determine current directory: {e}")))?;

    Ok(current_dir.join(".rdshell").join("config.json"))
}

/// Get path to the global config file (`~/.config/rdshell/config.json`)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| RdshellError::config("Could not determine user config directory"))?;

    Ok(config_dir.join("rdshell").join("config.json"))
}

/// Load the client binary table from a specific file.
///
/// A missing file yields the default table. An unreadable or malformed file
/// is a [`RdshellError::Config`].
pub fn load_client_binaries_from(path: &Path) -> Result<ClientBinaries> {
    if !path.exists() {
        return Ok(ClientBinaries::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| RdshellError::config(format!("Could not read config file: {e}")))?;

    serde_json::from_str::<ClientBinaries>(&contents)
        .map_err(|e| RdshellError::config(format!("Invalid config file format: {e}")))
}

/// Resolve the client binary table: local config first, then global, then
/// built-in defaults.
pub fn resolve_client_binaries() -> Result<ClientBinaries> {
    let local = local_config_path()?;
    if local.exists() {
        return load_client_binaries_from(&local);
    }

    let global = global_config_path()?;
    load_client_binaries_from(&global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("rdshell_test_{name}.json"));
        fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("rdshell_test_does_not_exist.json");
        let bins = load_client_binaries_from(&path).unwrap();
        assert_eq!(bins, ClientBinaries::default());
    }

    #[test]
    fn test_default_table_matches_stock_clients() {
        let bins = ClientBinaries::default();
        assert_eq!(bins.mysql, "mysql");
        assert_eq!(bins.mariadb, "mysql");
        assert_eq!(bins.postgres, "psql");
        assert_eq!(bins.mssql, "mssql-cli");
        assert_eq!(bins.oracle, "sqlplus64");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let path = temp_config("partial", r#"{"postgres": "pgcli"}"#);
        let bins = load_client_binaries_from(&path).unwrap();
        assert_eq!(bins.postgres, "pgcli");
        assert_eq!(bins.mysql, "mysql");
        assert_eq!(bins.oracle, "sqlplus64");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_full_override() {
        let path = temp_config(
            "full",
            r#"{"mysql": "mycli", "mariadb": "mariadb", "postgres": "pgcli", "mssql": "sqlcmd", "oracle": "sqlplus"}"#,
        );
        let bins = load_client_binaries_from(&path).unwrap();
        assert_eq!(bins.mysql, "mycli");
        assert_eq!(bins.mariadb, "mariadb");
        assert_eq!(bins.postgres, "pgcli");
        assert_eq!(bins.mssql, "sqlcmd");
        assert_eq!(bins.oracle, "sqlplus");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = temp_config("malformed", "not json at all");
        let err = load_client_binaries_from(&path).unwrap_err();
        assert!(matches!(err, RdshellError::Config(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_app_options_defaults() {
        let opts = AppOptions::default();
        assert_eq!(opts.profile, "default");
        assert_eq!(opts.region, "ap-northeast-1");
        assert_eq!(opts.user, "");
        assert!(!opts.dry_run);
    }
}
