use std::time::Instant;

use uuid::Uuid;

use crate::errors::{RegistryError, Result};
use crate::model::{
    Application, Cluster, Command, CommandPatch, EntityKind, NewCommand, Resource,
};
use crate::ops::store::Store;
use crate::rules::{protected_tags, validation};
use crate::{log_op_end, log_op_start};

/// Create a new Command
///
/// The id is taken from the payload when supplied, otherwise a UUID v7 is
/// generated. The permanent tags `{id, name}` are injected into the tag set
/// at creation. A new command has no owning application and belongs to no
/// clusters; those edges are added through the relationship operations.
///
/// # Errors
/// * `MissingId` / `BlankField` - If a supplied id or required field is blank
/// * `AlreadyExists` - If a command with the id already exists
pub fn create_command(store: &mut Store, payload: NewCommand) -> Result<Command> {
    validation::validate_new_command(&payload)?;

    let id = payload
        .id
        .clone()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    if store.command_exists(&id) {
        return Err(RegistryError::AlreadyExists {
            kind: EntityKind::Command,
            id,
        });
    }

    let mut command = Command::new(
        id,
        payload.name,
        payload.user,
        payload.version,
        payload.status,
        payload.executable,
    );
    command.job_type = payload.job_type;
    command.tags = payload.tags;
    command.configs = payload.configs;
    command.jars = payload.jars;
    protected_tags::enforce_protected_tags(&command.id, &command.name, &mut command.tags);

    store.insert_command(command.clone());
    Ok(command)
}

/// Read a Command by id
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If no command with this id exists
pub fn get_command<'a>(store: &'a Store, id: &str) -> Result<&'a Command> {
    validation::require_id(EntityKind::Command, id)?;
    store.get_command(id)
}

/// Partially update a Command
///
/// Only fields present in the patch overwrite; `None` means "leave
/// unchanged". The owner reference and cluster memberships are not
/// patchable here; they go through the relationship operations.
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `IdMismatch` - If the patch carries an id different from `id`
/// * `EntityNotFound` - If no command with this id exists
pub fn update_command(store: &mut Store, id: &str, patch: CommandPatch) -> Result<Command> {
    validation::require_id(EntityKind::Command, id)?;
    if let Some(payload_id) = &patch.id {
        if payload_id != id {
            return Err(RegistryError::IdMismatch {
                kind: EntityKind::Command,
                target_id: id.to_string(),
                payload_id: payload_id.clone(),
            });
        }
    }

    let command = store.get_command_mut(id)?;
    if let Some(name) = patch.name {
        command.name = name;
    }
    if let Some(user) = patch.user {
        command.user = user;
    }
    if let Some(version) = patch.version {
        command.version = version;
    }
    if let Some(status) = patch.status {
        command.status = status;
    }
    if let Some(executable) = patch.executable {
        command.executable = executable;
    }
    if let Some(job_type) = patch.job_type {
        command.job_type = Some(job_type);
    }
    if let Some(tags) = patch.tags {
        command.tags = tags;
    }
    if let Some(configs) = patch.configs {
        command.configs = configs;
    }
    if let Some(jars) = patch.jars {
        command.jars = jars;
    }

    let (command_id, command_name) = (command.id.clone(), command.name.clone());
    protected_tags::enforce_protected_tags(&command_id, &command_name, &mut command.tags);
    command.touch();

    Ok(command.clone())
}

/// Delete a Command, removing it from every Cluster it belongs to
///
/// Both sides of the cluster association are cleared; the owner reference,
/// being stored only on the command, disappears with the row (the owning
/// Application's derived command set shrinks implicitly).
///
/// # Returns
/// The removed Command
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If no command with this id exists
pub fn delete_command(store: &mut Store, id: &str) -> Result<Command> {
    validation::require_id(EntityKind::Command, id)?;
    let member_of: Vec<String> = store
        .get_command(id)?
        .cluster_ids
        .iter()
        .cloned()
        .collect();

    let started = Instant::now();
    log_op_start!("delete_command", entity_id = id);

    for cluster_id in &member_of {
        let cluster = store.get_cluster_mut(cluster_id)?;
        cluster.command_ids.remove(id);
        cluster.touch();
    }

    let removed = store
        .remove_command(id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Command, id))?;

    log_op_end!(
        "delete_command",
        duration_ms = started.elapsed().as_millis() as u64,
        cascade_len = member_of.len() as u64
    );
    Ok(removed)
}

/// Delete every Command, applying the per-command cascade to each
///
/// # Returns
/// The removed Commands in id order, for audit or undo by the caller
pub fn delete_all_commands(store: &mut Store) -> Result<Vec<Command>> {
    let mut ids: Vec<String> = store.commands.keys().cloned().collect();
    ids.sort();

    let mut removed = Vec::with_capacity(ids.len());
    for id in ids {
        removed.push(delete_command(store, &id)?);
    }
    Ok(removed)
}

// ===== Owner application =====

/// Set the owning Application for a Command
///
/// Overwrites any existing owner reference; this is a replace, not a merge.
///
/// # Errors
/// * `MissingId` - If either id is blank
/// * `EntityNotFound` - If the command or the application does not exist
pub fn set_application_for_command(
    store: &mut Store,
    command_id: &str,
    application_id: &str,
) -> Result<()> {
    validation::require_id(EntityKind::Command, command_id)?;
    validation::require_id(EntityKind::Application, application_id)?;
    store.get_application(application_id)?;

    let command = store.get_command_mut(command_id)?;
    command.application_id = Some(application_id.to_string());
    command.touch();
    Ok(())
}

/// Get the Application a Command references as owner
///
/// # Errors
/// * `MissingId` - If `command_id` is blank
/// * `EntityNotFound` - If the command does not exist, or its owner
///   reference dangles
/// * `NoApplicationSet` - If the command has no owner
pub fn get_application_for_command(store: &Store, command_id: &str) -> Result<Application> {
    validation::require_id(EntityKind::Command, command_id)?;
    let command = store.get_command(command_id)?;

    match &command.application_id {
        Some(application_id) => Ok(store.get_application(application_id)?.clone()),
        None => Err(RegistryError::NoApplicationSet {
            command_id: command_id.to_string(),
        }),
    }
}

/// Clear a Command's owner reference, returning the detached Application
///
/// # Errors
/// * `MissingId` - If `command_id` is blank
/// * `EntityNotFound` - If the command does not exist
/// * `NoApplicationSet` - If the command has no owner to remove
pub fn remove_application_for_command(store: &mut Store, command_id: &str) -> Result<Application> {
    let application = get_application_for_command(store, command_id)?;

    let command = store.get_command_mut(command_id)?;
    command.application_id = None;
    command.touch();
    Ok(application)
}

/// Get the Clusters a Command is registered on
///
/// Returns an empty vec (not an error) when the command belongs to no
/// cluster.
///
/// # Errors
/// * `MissingId` - If `command_id` is blank
/// * `EntityNotFound` - If the command does not exist
pub fn get_clusters_for_command(store: &Store, command_id: &str) -> Result<Vec<Cluster>> {
    validation::require_id(EntityKind::Command, command_id)?;
    let command = store.get_command(command_id)?;

    let mut clusters = Vec::with_capacity(command.cluster_ids.len());
    for cluster_id in &command.cluster_ids {
        clusters.push(store.get_cluster(cluster_id)?.clone());
    }
    // cluster_ids iterates in order, so the result is already sorted by id
    Ok(clusters)
}
