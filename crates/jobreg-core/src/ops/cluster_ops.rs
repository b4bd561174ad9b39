use std::time::Instant;

use uuid::Uuid;

use crate::errors::{RegistryError, Result};
use crate::model::{Cluster, ClusterPatch, Command, EntityKind, NewCluster, Resource};
use crate::ops::store::Store;
use crate::rules::{protected_tags, validation};
use crate::{log_op_end, log_op_start};

/// Create a new Cluster
///
/// The id is taken from the payload when supplied, otherwise a UUID v7 is
/// generated. The permanent tags `{id, name}` are injected into the tag set
/// at creation.
///
/// # Errors
/// * `MissingId` / `BlankField` - If a supplied id or required field is blank
/// * `AlreadyExists` - If a cluster with the id already exists
pub fn create_cluster(store: &mut Store, payload: NewCluster) -> Result<Cluster> {
    validation::validate_new_cluster(&payload)?;

    let id = payload
        .id
        .clone()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    if store.cluster_exists(&id) {
        return Err(RegistryError::AlreadyExists {
            kind: EntityKind::Cluster,
            id,
        });
    }

    let mut cluster = Cluster::new(
        id,
        payload.name,
        payload.user,
        payload.version,
        payload.status,
    );
    cluster.tags = payload.tags;
    cluster.configs = payload.configs;
    cluster.jars = payload.jars;
    protected_tags::enforce_protected_tags(&cluster.id, &cluster.name, &mut cluster.tags);

    store.insert_cluster(cluster.clone());
    Ok(cluster)
}

/// Read a Cluster by id
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If no cluster with this id exists
pub fn get_cluster<'a>(store: &'a Store, id: &str) -> Result<&'a Cluster> {
    validation::require_id(EntityKind::Cluster, id)?;
    store.get_cluster(id)
}

/// Partially update a Cluster
///
/// Only fields present in the patch overwrite; `None` means "leave
/// unchanged". Command membership is not patchable here; it goes through
/// the association operations.
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `IdMismatch` - If the patch carries an id different from `id`
/// * `EntityNotFound` - If no cluster with this id exists
pub fn update_cluster(store: &mut Store, id: &str, patch: ClusterPatch) -> Result<Cluster> {
    validation::require_id(EntityKind::Cluster, id)?;
    if let Some(payload_id) = &patch.id {
        if payload_id != id {
            return Err(RegistryError::IdMismatch {
                kind: EntityKind::Cluster,
                target_id: id.to_string(),
                payload_id: payload_id.clone(),
            });
        }
    }

    let cluster = store.get_cluster_mut(id)?;
    if let Some(name) = patch.name {
        cluster.name = name;
    }
    if let Some(user) = patch.user {
        cluster.user = user;
    }
    if let Some(version) = patch.version {
        cluster.version = version;
    }
    if let Some(status) = patch.status {
        cluster.status = status;
    }
    if let Some(tags) = patch.tags {
        cluster.tags = tags;
    }
    if let Some(configs) = patch.configs {
        cluster.configs = configs;
    }
    if let Some(jars) = patch.jars {
        cluster.jars = jars;
    }

    let (cluster_id, cluster_name) = (cluster.id.clone(), cluster.name.clone());
    protected_tags::enforce_protected_tags(&cluster_id, &cluster_name, &mut cluster.tags);
    cluster.touch();

    Ok(cluster.clone())
}

/// Delete a Cluster, removing it from every member Command
///
/// Member Commands survive; only the association edges are cleared, on
/// both sides.
///
/// # Returns
/// The removed Cluster
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If no cluster with this id exists
pub fn delete_cluster(store: &mut Store, id: &str) -> Result<Cluster> {
    validation::require_id(EntityKind::Cluster, id)?;
    let members: Vec<String> = store.get_cluster(id)?.command_ids.iter().cloned().collect();

    let started = Instant::now();
    log_op_start!("delete_cluster", entity_id = id);

    for command_id in &members {
        let command = store.get_command_mut(command_id)?;
        command.cluster_ids.remove(id);
        command.touch();
    }

    let removed = store
        .remove_cluster(id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Cluster, id))?;

    log_op_end!(
        "delete_cluster",
        duration_ms = started.elapsed().as_millis() as u64,
        cascade_len = members.len() as u64
    );
    Ok(removed)
}

/// Delete every Cluster, applying the per-cluster cascade to each
///
/// # Returns
/// The removed Clusters in id order, for audit or undo by the caller
pub fn delete_all_clusters(store: &mut Store) -> Result<Vec<Cluster>> {
    let mut ids: Vec<String> = store.clusters.keys().cloned().collect();
    ids.sort();

    let mut removed = Vec::with_capacity(ids.len());
    for id in ids {
        removed.push(delete_cluster(store, &id)?);
    }
    Ok(removed)
}

// ===== Command membership =====

/// Register a Command on a Cluster
///
/// Both sides of the association are written together after all validation,
/// so a half-linked pair is never observable. Adding an existing member is
/// a no-op.
///
/// # Errors
/// * `MissingId` - If either id is blank
/// * `EntityNotFound` - If the cluster or the command does not exist
pub fn add_command_to_cluster(store: &mut Store, cluster_id: &str, command_id: &str) -> Result<()> {
    validation::require_id(EntityKind::Cluster, cluster_id)?;
    validation::require_id(EntityKind::Command, command_id)?;
    store.get_cluster(cluster_id)?;
    store.get_command(command_id)?;

    let cluster = store.get_cluster_mut(cluster_id)?;
    cluster.command_ids.insert(command_id.to_string());
    cluster.touch();

    let command = store.get_command_mut(command_id)?;
    command.cluster_ids.insert(cluster_id.to_string());
    command.touch();
    Ok(())
}

/// Deregister a Command from a Cluster
///
/// Both sides of the association are cleared together. Removing a
/// non-member is a no-op.
///
/// # Errors
/// * `MissingId` - If either id is blank
/// * `EntityNotFound` - If the cluster or the command does not exist
pub fn remove_command_from_cluster(
    store: &mut Store,
    cluster_id: &str,
    command_id: &str,
) -> Result<()> {
    validation::require_id(EntityKind::Cluster, cluster_id)?;
    validation::require_id(EntityKind::Command, command_id)?;
    store.get_cluster(cluster_id)?;
    store.get_command(command_id)?;

    let cluster = store.get_cluster_mut(cluster_id)?;
    cluster.command_ids.remove(command_id);
    cluster.touch();

    let command = store.get_command_mut(command_id)?;
    command.cluster_ids.remove(cluster_id);
    command.touch();
    Ok(())
}

/// Get the Commands registered on a Cluster
///
/// Returns an empty vec (not an error) when the cluster has no commands.
///
/// # Errors
/// * `MissingId` - If `cluster_id` is blank
/// * `EntityNotFound` - If the cluster does not exist
pub fn get_commands_for_cluster(store: &Store, cluster_id: &str) -> Result<Vec<Command>> {
    validation::require_id(EntityKind::Cluster, cluster_id)?;
    let cluster = store.get_cluster(cluster_id)?;

    let mut commands = Vec::with_capacity(cluster.command_ids.len());
    for command_id in &cluster.command_ids {
        commands.push(store.get_command(command_id)?.clone());
    }
    // command_ids iterates in order, so the result is already sorted by id
    Ok(commands)
}
