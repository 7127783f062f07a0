//! Endpoint Data Model
//!
//! Core types shared by the fetch, reconcile, select and command stages.
//!
//! # Immutability
//! Nothing here is mutated after construction. Each pipeline stage consumes a
//! snapshot of the previous stage's output and produces new values, so the
//! same inputs always reconcile to the same roles.

use serde::{Deserialize, Serialize};

/// Placeholder shown for the endpoint address and port of an instance that is
/// still being created. Such an instance is selectable but not connectable.
pub const PENDING_ENDPOINT: &str = "not yet available";

/// Lifecycle status value under which RDS has not yet assigned an endpoint.
pub const STATUS_CREATING: &str = "creating";

/// One (cluster, member) pair from a `DescribeDBClusters` response.
///
/// Transient: rebuilt from every cluster-list response, with no identity
/// beyond the pair itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMembership {
    /// Instance identifier of the cluster member
    pub member_identifier: String,

    /// Whether this member is the cluster's writer
    pub is_writer: bool,
}

impl ClusterMembership {
    /// Create a new membership entry
    pub fn new(member_identifier: impl Into<String>, is_writer: bool) -> Self {
        Self { member_identifier: member_identifier.into(), is_writer }
    }
}

/// Canonical description of one addressable RDS endpoint, as returned by
/// `DescribeDBInstances`.
///
/// Endpoint fields are absent exactly while `status` is `"creating"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Instance identifier (unique key)
    pub identifier: String,

    /// Lifecycle state, e.g. "creating", "available"
    pub status: String,

    /// Instance class, e.g. "db.t3.micro"
    pub instance_class: String,

    /// Engine family string, e.g. "mysql", "aurora-postgresql"
    pub engine: String,

    /// Engine version string
    pub engine_version: String,

    /// Master user name configured on the instance
    pub master_username: String,

    /// Initial database name, if one was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,

    /// Endpoint DNS address, absent while the instance is being created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_address: Option<String>,

    /// Endpoint port, absent while the instance is being created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_port: Option<u16>,

    /// Identifier of the instance this one replicates from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_replica_source_identifier: Option<String>,

    /// Identifiers of read replicas of this instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub read_replica_target_identifiers: Vec<String>,

    /// Identifiers of Aurora clusters replicating from this instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub read_replica_cluster_target_identifiers: Vec<String>,
}

/// Computed connectivity classification of an endpoint.
///
/// Purely informational: the operator may select and connect to any role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Instance is still being created; endpoint not yet assigned
    PendingCreate,
    /// Cluster member reported as the writer
    Writer,
    /// Cluster member reported as a reader
    Reader,
    /// Standalone instance replicating from another instance
    Replica,
    /// Standalone instance with replicas pointing at it
    Master,
    /// Standalone instance with no replication relationships
    Instance,
}

impl Role {
    /// Get the role name as a display string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingCreate => "PendingCreate",
            Self::Writer => "Writer",
            Self::Reader => "Reader",
            Self::Replica => "Replica",
            Self::Master => "Master",
            Self::Instance => "Instance",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported engine families, one variant per invocation template group.
///
/// This is a closed table: engine strings outside it surface as
/// `UnsupportedEngine` at command-construction time rather than silently
/// falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFamily {
    Mysql,
    Aurora,
    AuroraMysql,
    AuroraPostgresql,
    Mariadb,
    Postgres,
    OracleEe,
    OracleSe2,
    OracleSe1,
    OracleSe,
    SqlserverEe,
    SqlserverSe,
    SqlserverEx,
    SqlserverWeb,
}

impl EngineFamily {
    /// Parse an RDS engine string; `None` means no template exists for it.
    #[must_use]
    pub fn from_engine(engine: &str) -> Option<Self> {
        match engine {
            "mysql" => Some(Self::Mysql),
            "aurora" => Some(Self::Aurora),
            "aurora-mysql" => Some(Self::AuroraMysql),
            "aurora-postgresql" => Some(Self::AuroraPostgresql),
            "mariadb" => Some(Self::Mariadb),
            "postgres" => Some(Self::Postgres),
            "oracle-ee" => Some(Self::OracleEe),
            "oracle-se2" => Some(Self::OracleSe2),
            "oracle-se1" => Some(Self::OracleSe1),
            "oracle-se" => Some(Self::OracleSe),
            "sqlserver-ee" => Some(Self::SqlserverEe),
            "sqlserver-se" => Some(Self::SqlserverSe),
            "sqlserver-ex" => Some(Self::SqlserverEx),
            "sqlserver-web" => Some(Self::SqlserverWeb),
            _ => None,
        }
    }

    /// Get the engine family as its RDS engine string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Aurora => "aurora",
            Self::AuroraMysql => "aurora-mysql",
            Self::AuroraPostgresql => "aurora-postgresql",
            Self::Mariadb => "mariadb",
            Self::Postgres => "postgres",
            Self::OracleEe => "oracle-ee",
            Self::OracleSe2 => "oracle-se2",
            Self::OracleSe1 => "oracle-se1",
            Self::OracleSe => "oracle-se",
            Self::SqlserverEe => "sqlserver-ee",
            Self::SqlserverSe => "sqlserver-se",
            Self::SqlserverEx => "sqlserver-ex",
            Self::SqlserverWeb => "sqlserver-web",
        }
    }

    /// Whether instances of this family participate in cluster membership.
    ///
    /// Clustered engines are classified Writer/Reader from the membership
    /// table; everything else uses the standalone replication fields.
    /// This check intentionally works on the raw engine string so that
    /// engines outside the closed table still reconcile (to `Instance`).
    #[must_use]
    pub fn is_clustered_engine(engine: &str) -> bool {
        matches!(engine, "aurora" | "aurora-mysql" | "aurora-postgresql")
    }
}

impl std::fmt::Display for EngineFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The Reconciler's output per instance: all `InstanceRecord` descriptive
/// fields plus the computed role and a display-safe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEndpoint {
    /// Instance identifier
    pub identifier: String,

    /// Lifecycle state
    pub status: String,

    /// Instance class
    pub instance_class: String,

    /// Engine family string
    pub engine: String,

    /// Engine version string
    pub engine_version: String,

    /// Master user name
    pub master_username: String,

    /// Initial database name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,

    /// Endpoint address, or `PENDING_ENDPOINT` while creating
    pub address: String,

    /// Endpoint port; 0 while creating
    pub port: u16,

    /// Computed connectivity role
    pub role: Role,
}

impl ResolvedEndpoint {
    /// Display form of the port: the pending placeholder while the instance
    /// is still being created, the numeric port otherwise.
    #[must_use]
    pub fn port_display(&self) -> String {
        if self.role == Role::PendingCreate {
            PENDING_ENDPOINT.to_string()
        } else {
            self.port.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_family_round_trip() {
        for engine in [
            "mysql",
            "aurora",
            "aurora-mysql",
            "aurora-postgresql",
            "mariadb",
            "postgres",
            "oracle-ee",
            "oracle-se2",
            "oracle-se1",
            "oracle-se",
            "sqlserver-ee",
            "sqlserver-se",
            "sqlserver-ex",
            "sqlserver-web",
        ] {
            let family = EngineFamily::from_engine(engine).expect("known engine");
            assert_eq!(family.as_str(), engine);
        }
    }

    #[test]
    fn test_engine_family_rejects_unknown() {
        assert_eq!(EngineFamily::from_engine("docdb"), None);
        assert_eq!(EngineFamily::from_engine(""), None);
        assert_eq!(EngineFamily::from_engine("MySQL"), None); // case-sensitive
    }

    #[test]
    fn test_clustered_engine_detection() {
        assert!(EngineFamily::is_clustered_engine("aurora"));
        assert!(EngineFamily::is_clustered_engine("aurora-mysql"));
        assert!(EngineFamily::is_clustered_engine("aurora-postgresql"));
        assert!(!EngineFamily::is_clustered_engine("mysql"));
        assert!(!EngineFamily::is_clustered_engine("postgres"));
        assert!(!EngineFamily::is_clustered_engine("docdb"));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Writer.to_string(), "Writer");
        assert_eq!(Role::PendingCreate.to_string(), "PendingCreate");
    }

    #[test]
    fn test_port_display_uses_placeholder_when_pending() {
        let pending = ResolvedEndpoint {
            identifier: "db-1".to_string(),
            status: STATUS_CREATING.to_string(),
            instance_class: "db.t3.micro".to_string(),
            engine: "mysql".to_string(),
            engine_version: "8.0.35".to_string(),
            master_username: "admin".to_string(),
            database_name: None,
            address: PENDING_ENDPOINT.to_string(),
            port: 0,
            role: Role::PendingCreate,
        };
        assert_eq!(pending.port_display(), PENDING_ENDPOINT);

        let live = ResolvedEndpoint { role: Role::Instance, port: 3306, ..pending };
        assert_eq!(live.port_display(), "3306");
    }
}
