//! Endpoint-Role Reconciliation
//!
//! Merges the two independent RDS listings (per-instance metadata and
//! per-cluster membership metadata) into a single role-annotated view of
//! every reachable endpoint.
//!
//! # Contract
//! `reconcile` is a pure function of its two inputs: no I/O, deterministic,
//! and total. Malformed or missing data is treated as "no extra information"
//! and falls back to the defensive `Instance` role; it never aborts.
//!
//! # Classification priority (first match wins)
//! 1. `status == "creating"` → `PendingCreate`, endpoint replaced by a
//!    placeholder
//! 2. clustered engine (aurora family) → membership lookup:
//!    writer → `Writer`, non-writer → `Reader`, unlisted → `Instance`
//! 3. otherwise: replica-source set → `Replica`, then any replica targets →
//!    `Master` (the `Master` check runs after and overwrites unconditionally;
//!    this last-write-wins tie-break is kept for compatibility), else
//!    `Instance`

use std::collections::HashMap;

use crate::endpoint::{
    ClusterMembership, EngineFamily, InstanceRecord, ResolvedEndpoint, Role, PENDING_ENDPOINT,
    STATUS_CREATING,
};

/// Classify every instance into exactly one connectivity role.
///
/// Role assignment never depends on the ordering of `instances` or
/// `memberships`, with one documented exception: if the backend reports the
/// same member identifier twice (inconsistent data), the later membership
/// entry wins, matching the behavior of scanning the list in order.
#[must_use]
pub fn reconcile(
    instances: &[InstanceRecord],
    memberships: &[ClusterMembership],
) -> Vec<ResolvedEndpoint> {
    // Flatten cluster membership into an identifier → is_writer table.
    let writers: HashMap<&str, bool> = memberships
        .iter()
        .map(|m| (m.member_identifier.as_str(), m.is_writer))
        .collect();

    instances.iter().map(|record| resolve_one(record, &writers)).collect()
}

fn resolve_one(record: &InstanceRecord, writers: &HashMap<&str, bool>) -> ResolvedEndpoint {
    if record.status == STATUS_CREATING {
        // No endpoint has been assigned yet; keep the row selectable with a
        // placeholder rather than dropping it.
        return ResolvedEndpoint {
            identifier: record.identifier.clone(),
            status: record.status.clone(),
            instance_class: record.instance_class.clone(),
            engine: record.engine.clone(),
            engine_version: record.engine_version.clone(),
            master_username: record.master_username.clone(),
            database_name: record.database_name.clone(),
            address: PENDING_ENDPOINT.to_string(),
            port: 0,
            role: Role::PendingCreate,
        };
    }

    let role = if EngineFamily::is_clustered_engine(&record.engine) {
        match writers.get(record.identifier.as_str()) {
            Some(true) => Role::Writer,
            Some(false) => Role::Reader,
            // Claims a clustered engine but no membership was reported.
            None => Role::Instance,
        }
    } else {
        let mut role = Role::Instance;
        if record.read_replica_source_identifier.as_deref().is_some_and(|s| !s.is_empty()) {
            role = Role::Replica;
        }
        // Evaluated after the replica-source check; overwrites it when both
        // hold (last write wins).
        if !record.read_replica_target_identifiers.is_empty()
            || !record.read_replica_cluster_target_identifiers.is_empty()
        {
            role = Role::Master;
        }
        role
    };

    ResolvedEndpoint {
        identifier: record.identifier.clone(),
        status: record.status.clone(),
        instance_class: record.instance_class.clone(),
        engine: record.engine.clone(),
        engine_version: record.engine_version.clone(),
        master_username: record.master_username.clone(),
        database_name: record.database_name.clone(),
        address: record.endpoint_address.clone().unwrap_or_default(),
        port: record.endpoint_port.unwrap_or_default(),
        role,
    }
}
