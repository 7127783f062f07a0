//! RDS Listing Fetcher
//!
//! Retrieves the two raw listings the reconciler merges: per-instance
//! metadata (`DescribeDBInstances`) and per-cluster membership metadata
//! (`DescribeDBClusters`).
//!
//! # Partial Failure
//! The two calls fail independently. A failed call is reported and its list
//! comes back empty so the pipeline still runs on whatever loaded; the
//! operator sees every endpoint that could be listed.

use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_rds::config::Region;
use aws_sdk_rds::types::{DbCluster, DbInstance};
use aws_sdk_rds::Client;
use tracing::warn;

use crate::config::AppOptions;
use crate::endpoint::{ClusterMembership, InstanceRecord};
use crate::error::{RdshellError, Result};

/// Build an RDS client for the profile and region in `opts`.
///
/// The region flag wins over whatever the profile or environment would
/// resolve; the profile only supplies credentials.
pub async fn rds_client(opts: &AppOptions) -> Client {
    let region_provider =
        RegionProviderChain::first_try(Region::new(opts.region.clone())).or_default_provider();

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(&opts.profile)
        .region(region_provider)
        .load()
        .await;

    Client::new(&aws_config)
}

/// Fetch both listings, tolerating partial failure.
///
/// Each call's failure is logged as its own fetch error and replaced by an
/// empty list.
pub async fn fetch_endpoints(client: &Client) -> (Vec<InstanceRecord>, Vec<ClusterMembership>) {
    let instances = match fetch_instances(client).await {
        Ok(instances) => instances,
        Err(err) => {
            warn!(code = err.error_code(), "{err}");
            Vec::new()
        }
    };

    let memberships = match fetch_memberships(client).await {
        Ok(memberships) => memberships,
        Err(err) => {
            warn!(code = err.error_code(), "{err}");
            Vec::new()
        }
    };

    (instances, memberships)
}

/// List every DB instance in the region as an [`InstanceRecord`].
pub async fn fetch_instances(client: &Client) -> Result<Vec<InstanceRecord>> {
    let mut records = Vec::new();
    let mut pages = client.describe_db_instances().into_paginator().items().send();

    while let Some(item) = pages.next().await {
        let db = item.map_err(|e| RdshellError::fetch("DescribeDBInstances", e.to_string()))?;
        records.push(instance_record(&db));
    }

    Ok(records)
}

/// Flatten every (cluster, member) pair in the region into
/// [`ClusterMembership`] entries.
pub async fn fetch_memberships(client: &Client) -> Result<Vec<ClusterMembership>> {
    let mut memberships = Vec::new();
    let mut pages = client.describe_db_clusters().into_paginator().items().send();

    while let Some(item) = pages.next().await {
        let cluster = item.map_err(|e| RdshellError::fetch("DescribeDBClusters", e.to_string()))?;
        memberships.extend(cluster_memberships(&cluster));
    }

    Ok(memberships)
}

fn instance_record(db: &DbInstance) -> InstanceRecord {
    InstanceRecord {
        identifier: db.db_instance_identifier().unwrap_or_default().to_string(),
        status: db.db_instance_status().unwrap_or_default().to_string(),
        instance_class: db.db_instance_class().unwrap_or_default().to_string(),
        engine: db.engine().unwrap_or_default().to_string(),
        engine_version: db.engine_version().unwrap_or_default().to_string(),
        master_username: db.master_username().unwrap_or_default().to_string(),
        database_name: db.db_name().map(str::to_string),
        endpoint_address: db.endpoint().and_then(|e| e.address()).map(str::to_string),
        endpoint_port: db
            .endpoint()
            .and_then(|e| e.port())
            .and_then(|p| u16::try_from(p).ok()),
        read_replica_source_identifier: db
            .read_replica_source_db_instance_identifier()
            .map(str::to_string),
        read_replica_target_identifiers: db.read_replica_db_instance_identifiers().to_vec(),
        read_replica_cluster_target_identifiers: db.read_replica_db_cluster_identifiers().to_vec(),
    }
}

fn cluster_memberships(cluster: &DbCluster) -> Vec<ClusterMembership> {
    cluster
        .db_cluster_members()
        .iter()
        .map(|member| {
            ClusterMembership::new(
                member.db_instance_identifier().unwrap_or_default(),
                member.is_cluster_writer().unwrap_or(false),
            )
        })
        .collect()
}
