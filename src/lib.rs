//! rdshell - Interactive RDS Connection Launcher
//!
//! rdshell lists the RDS endpoints reachable from an AWS profile, annotates
//! each with its connectivity role (writer, reader, replica, ...), lets the
//! operator fuzzy-pick one, and launches the matching native client
//! (`mysql`, `psql`, `sqlplus64`, `mssql-cli`) against it.
//!
//! # Core Principles
//! - The role view is reconciled purely from the two RDS listings; it never
//!   restricts connectivity, only informs the pick
//! - Deterministic behavior (identical listings → identical role view and
//!   identical client command)
//! - Partial listing failures degrade to a shorter list, never an abort
//! - Explicit configuration passed by value; no ambient flag state
//!
//! # Pipeline
//! fetch → reconcile → select → build → execute, fully sequential. Only the
//! fetch stage performs network I/O; [`reconcile`] and [`command`] are pure.
//!
//! # Module Organization
//! - [`error`] - Error types and handling
//! - [`endpoint`] - Endpoint data model, roles and engine families
//! - [`reconcile`] - Endpoint-role reconciliation engine
//! - [`command`] - Engine-to-client command construction
//! - [`config`] - Invocation options and client binary overrides
//! - [`fetch`] - RDS listing calls (AWS SDK)
//! - [`select`] - Interactive fuzzy picker
//! - [`exec`] - Dry-run printing / subprocess spawn

pub mod command;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod reconcile;
pub mod select;

// Re-export commonly used types for convenience
pub use command::{build, ClientBinaries, ConnectionProfile};
pub use config::AppOptions;
pub use endpoint::{
    ClusterMembership, EngineFamily, InstanceRecord, ResolvedEndpoint, Role, PENDING_ENDPOINT,
};
pub use error::{RdshellError, Result};
pub use reconcile::reconcile;
