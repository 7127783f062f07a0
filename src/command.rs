//! Client Command Construction
//!
//! Maps a resolved endpoint plus its engine family to the exact invocation
//! string for the matching native client. The mapping is a closed table:
//! engine families outside it produce a typed `UnsupportedEngine` error,
//! never a best-effort guess.
//!
//! # Username resolution
//! An explicit operator override wins; an empty override falls back to the
//! endpoint's master username. The substitution happens once, when the
//! profile is built, before any template expansion.

use serde::{Deserialize, Serialize};

use crate::endpoint::{EngineFamily, ResolvedEndpoint};
use crate::error::{RdshellError, Result};

fn default_mysql() -> String {
    "mysql".to_string()
}

fn default_postgres() -> String {
    "psql".to_string()
}

fn default_mssql() -> String {
    "mssql-cli".to_string()
}

fn default_oracle() -> String {
    "sqlplus64".to_string()
}

/// Resolved per-engine client binary table.
///
/// Defaults match the stock clients; each entry is overridable from the
/// configuration file (see [`crate::config`]). MariaDB shares the MySQL
/// client by default but keeps its own key so it can be overridden
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBinaries {
    /// Client for mysql, aurora and aurora-mysql
    #[serde(default = "default_mysql")]
    pub mysql: String,

    /// Client for mariadb
    #[serde(default = "default_mysql")]
    pub mariadb: String,

    /// Client for postgres and aurora-postgresql
    #[serde(default = "default_postgres")]
    pub postgres: String,

    /// Client for the sqlserver-* families
    #[serde(default = "default_mssql")]
    pub mssql: String,

    /// Client for the oracle-* families
    #[serde(default = "default_oracle")]
    pub oracle: String,
}

impl Default for ClientBinaries {
    fn default() -> Self {
        Self {
            mysql: default_mysql(),
            mariadb: default_mysql(),
            postgres: default_postgres(),
            mssql: default_mssql(),
            oracle: default_oracle(),
        }
    }
}

/// Everything the command builder needs to produce an invocation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    /// Engine family string of the target endpoint
    pub engine: String,

    /// Endpoint DNS address
    pub address: String,

    /// Endpoint port
    pub port: u16,

    /// Already-resolved connection username
    pub username: String,

    /// Initial database name, used as the Oracle SID
    pub database_name: Option<String>,

    /// Per-engine client binary table
    pub client_binaries: ClientBinaries,
}

impl ConnectionProfile {
    /// Build a profile from a resolved endpoint.
    ///
    /// `user_override` wins when non-empty; otherwise the endpoint's master
    /// username is used.
    #[must_use]
    pub fn from_endpoint(
        endpoint: &ResolvedEndpoint,
        user_override: &str,
        client_binaries: ClientBinaries,
    ) -> Self {
        let username = if user_override.is_empty() {
            endpoint.master_username.clone()
        } else {
            user_override.to_string()
        };
        Self {
            engine: endpoint.engine.clone(),
            address: endpoint.address.clone(),
            port: endpoint.port,
            username,
            database_name: endpoint.database_name.clone(),
            client_binaries,
        }
    }
}

/// Produce the exact client invocation string for this profile.
///
/// Pure: identical profiles yield byte-identical strings.
///
/// # Errors
///
/// Returns [`RdshellError::UnsupportedEngine`] when the engine family is not
/// in the invocation table.
pub fn build(profile: &ConnectionProfile) -> Result<String> {
    let family = EngineFamily::from_engine(&profile.engine)
        .ok_or_else(|| RdshellError::unsupported_engine(&profile.engine))?;

    let ConnectionProfile { address, port, username, client_binaries: bins, .. } = profile;

    let command = match family {
        EngineFamily::Mysql | EngineFamily::Aurora | EngineFamily::AuroraMysql => {
            format!("{} -h {address} -P {port} -u {username} -p", bins.mysql)
        }
        EngineFamily::Mariadb => {
            format!("{} -h {address} -P {port} -u {username} -p", bins.mariadb)
        }
        EngineFamily::Postgres | EngineFamily::AuroraPostgresql => {
            format!("{} -h {address} -p {port} -U {username} -d postgres", bins.postgres)
        }
        EngineFamily::OracleEe
        | EngineFamily::OracleSe2
        | EngineFamily::OracleSe1
        | EngineFamily::OracleSe => {
            let sid = profile.database_name.as_deref().unwrap_or_default();
            format!(
                "{} '{username}@(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST={address})(PORT={port})))(CONNECT_DATA=(SID={sid})))'",
                bins.oracle
            )
        }
        EngineFamily::SqlserverEe
        | EngineFamily::SqlserverSe
        | EngineFamily::SqlserverEx
        | EngineFamily::SqlserverWeb => {
            format!("{} -S tcp:{address},{port} -U {username}", bins.mssql)
        }
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Role;
    use pretty_assertions::assert_eq;

    fn profile(engine: &str, port: u16) -> ConnectionProfile {
        ConnectionProfile {
            engine: engine.to_string(),
            address: "db.example.internal".to_string(),
            port,
            username: "admin".to_string(),
            database_name: Some("ORCL".to_string()),
            client_binaries: ClientBinaries::default(),
        }
    }

    #[test]
    fn test_mysql_family_template() {
        for engine in ["mysql", "aurora", "aurora-mysql"] {
            let cmd = build(&profile(engine, 3306)).unwrap();
            assert_eq!(cmd, "mysql -h db.example.internal -P 3306 -u admin -p", "engine {engine}");
        }
    }

    #[test]
    fn test_mariadb_shares_mysql_client_by_default() {
        let cmd = build(&profile("mariadb", 3306)).unwrap();
        assert_eq!(cmd, "mysql -h db.example.internal -P 3306 -u admin -p");
    }

    #[test]
    fn test_postgres_family_template() {
        for engine in ["postgres", "aurora-postgresql"] {
            let cmd = build(&profile(engine, 5432)).unwrap();
            assert_eq!(
                cmd,
                "psql -h db.example.internal -p 5432 -U admin -d postgres",
                "engine {engine}"
            );
        }
    }

    #[test]
    fn test_oracle_family_template() {
        for engine in ["oracle-ee", "oracle-se2", "oracle-se1", "oracle-se"] {
            let cmd = build(&profile(engine, 1521)).unwrap();
            assert_eq!(
                cmd,
                "sqlplus64 'admin@(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST=db.example.internal)(PORT=1521)))(CONNECT_DATA=(SID=ORCL)))'",
                "engine {engine}"
            );
        }
    }

    #[test]
    fn test_oracle_absent_database_name_expands_to_empty_sid() {
        let mut p = profile("oracle-ee", 1521);
        p.database_name = None;
        let cmd = build(&p).unwrap();
        assert!(cmd.ends_with("(CONNECT_DATA=(SID=)))'"));
    }

    #[test]
    fn test_sqlserver_family_template() {
        for engine in ["sqlserver-ee", "sqlserver-se", "sqlserver-ex", "sqlserver-web"] {
            let cmd = build(&profile(engine, 1433)).unwrap();
            assert_eq!(cmd, "mssql-cli -S tcp:db.example.internal,1433 -U admin", "engine {engine}");
        }
    }

    #[test]
    fn test_unsupported_engine_returns_typed_error() {
        let err = build(&profile("docdb", 27017)).unwrap_err();
        assert!(matches!(err, RdshellError::UnsupportedEngine(ref e) if e == "docdb"));
    }

    #[test]
    fn test_build_is_pure() {
        let p = profile("postgres", 5432);
        assert_eq!(build(&p).unwrap(), build(&p).unwrap());
    }

    #[test]
    fn test_binary_overrides_are_honored() {
        let mut p = profile("mysql", 3306);
        p.client_binaries.mysql = "mycli".to_string();
        assert_eq!(build(&p).unwrap(), "mycli -h db.example.internal -P 3306 -u admin -p");

        let mut p = profile("mariadb", 3306);
        p.client_binaries.mariadb = "mariadb".to_string();
        assert_eq!(build(&p).unwrap(), "mariadb -h db.example.internal -P 3306 -u admin -p");
    }

    fn endpoint() -> ResolvedEndpoint {
        ResolvedEndpoint {
            identifier: "db-1".to_string(),
            status: "available".to_string(),
            instance_class: "db.t3.micro".to_string(),
            engine: "mysql".to_string(),
            engine_version: "8.0.35".to_string(),
            master_username: "root_account".to_string(),
            database_name: None,
            address: "db.example.internal".to_string(),
            port: 3306,
            role: Role::Instance,
        }
    }

    #[test]
    fn test_empty_override_falls_back_to_master_username() {
        let p = ConnectionProfile::from_endpoint(&endpoint(), "", ClientBinaries::default());
        assert_eq!(p.username, "root_account");
    }

    #[test]
    fn test_nonempty_override_is_used_verbatim() {
        let p = ConnectionProfile::from_endpoint(&endpoint(), "auditor", ClientBinaries::default());
        assert_eq!(p.username, "auditor");
    }
}
