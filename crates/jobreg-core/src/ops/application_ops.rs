use std::time::Instant;

use uuid::Uuid;

use crate::errors::{RegistryError, Result};
use crate::model::{Application, ApplicationPatch, Command, EntityKind, NewApplication, Resource};
use crate::ops::store::Store;
use crate::rules::{protected_tags, validation};
use crate::{log_op_end, log_op_start};

/// Create a new Application
///
/// The id is taken from the payload when supplied, otherwise a UUID v7 is
/// generated. The permanent tags `{id, name}` are injected into the tag set
/// at creation.
///
/// # Arguments
/// * `store` - Mutable reference to the Store
/// * `payload` - Create payload; `name`, `user` and `version` must be
///   non-blank
///
/// # Returns
/// The created Application
///
/// # Errors
/// * `MissingId` / `BlankField` - If a supplied id or required field is blank
/// * `AlreadyExists` - If an application with the id already exists
pub fn create_application(store: &mut Store, payload: NewApplication) -> Result<Application> {
    validation::validate_new_application(&payload)?;

    let id = payload
        .id
        .clone()
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    if store.application_exists(&id) {
        return Err(RegistryError::AlreadyExists {
            kind: EntityKind::Application,
            id,
        });
    }

    let mut application = Application::new(
        id,
        payload.name,
        payload.user,
        payload.version,
        payload.status,
    );
    application.tags = payload.tags;
    application.configs = payload.configs;
    application.jars = payload.jars;
    protected_tags::enforce_protected_tags(
        &application.id,
        &application.name,
        &mut application.tags,
    );

    store.insert_application(application.clone());
    Ok(application)
}

/// Read an Application by id
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If no application with this id exists
pub fn get_application<'a>(store: &'a Store, id: &str) -> Result<&'a Application> {
    validation::require_id(EntityKind::Application, id)?;
    store.get_application(id)
}

/// Partially update an Application
///
/// Only fields present in the patch overwrite; `None` means "leave
/// unchanged". A patched tag set passes through permanent-tag enforcement.
/// Bumps the `updated` timestamp.
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `IdMismatch` - If the patch carries an id different from `id`
/// * `EntityNotFound` - If no application with this id exists
pub fn update_application(
    store: &mut Store,
    id: &str,
    patch: ApplicationPatch,
) -> Result<Application> {
    validation::require_id(EntityKind::Application, id)?;
    if let Some(payload_id) = &patch.id {
        if payload_id != id {
            return Err(RegistryError::IdMismatch {
                kind: EntityKind::Application,
                target_id: id.to_string(),
                payload_id: payload_id.clone(),
            });
        }
    }

    let application = store.get_application_mut(id)?;
    if let Some(name) = patch.name {
        application.name = name;
    }
    if let Some(user) = patch.user {
        application.user = user;
    }
    if let Some(version) = patch.version {
        application.version = version;
    }
    if let Some(status) = patch.status {
        application.status = status;
    }
    if let Some(tags) = patch.tags {
        application.tags = tags;
    }
    if let Some(configs) = patch.configs {
        application.configs = configs;
    }
    if let Some(jars) = patch.jars {
        application.jars = jars;
    }

    // Re-assert the permanent tags whether or not the patch replaced the set
    let (app_id, app_name) = (application.id.clone(), application.name.clone());
    protected_tags::enforce_protected_tags(&app_id, &app_name, &mut application.tags);
    application.touch();

    Ok(application.clone())
}

/// Delete an Application, detaching every Command that references it
///
/// Commands owned by this application survive with their owner reference
/// cleared. The cascade is validated before the first mutation, so the
/// store is never left half-updated.
///
/// # Returns
/// The removed Application
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If no application with this id exists
pub fn delete_application(store: &mut Store, id: &str) -> Result<Application> {
    validation::require_id(EntityKind::Application, id)?;
    store.get_application(id)?;

    let started = Instant::now();
    log_op_start!("delete_application", entity_id = id);

    let owned: Vec<String> = store
        .commands
        .values()
        .filter(|c| c.application_id.as_deref() == Some(id))
        .map(|c| c.id.clone())
        .collect();

    for command_id in &owned {
        let command = store.get_command_mut(command_id)?;
        command.application_id = None;
        command.touch();
    }

    let removed = store
        .remove_application(id)
        .ok_or_else(|| RegistryError::not_found(EntityKind::Application, id))?;

    log_op_end!(
        "delete_application",
        duration_ms = started.elapsed().as_millis() as u64,
        cascade_len = owned.len() as u64
    );
    Ok(removed)
}

/// Delete every Application, applying the per-application cascade to each
///
/// # Returns
/// The removed Applications in id order, for audit or undo by the caller
pub fn delete_all_applications(store: &mut Store) -> Result<Vec<Application>> {
    let mut ids: Vec<String> = store.applications.keys().cloned().collect();
    ids.sort();

    let mut removed = Vec::with_capacity(ids.len());
    for id in ids {
        removed.push(delete_application(store, &id)?);
    }
    Ok(removed)
}

/// Get the set of Commands that currently reference this Application
///
/// The inverse of the Command owner reference is computed, never stored.
/// Returns an empty vec (not an error) when no command references the
/// application.
///
/// # Errors
/// * `MissingId` - If `application_id` is blank
/// * `EntityNotFound` - If no application with this id exists
pub fn get_commands_for_application(store: &Store, application_id: &str) -> Result<Vec<Command>> {
    validation::require_id(EntityKind::Application, application_id)?;
    store.get_application(application_id)?;

    let mut commands: Vec<Command> = store
        .commands
        .values()
        .filter(|c| c.application_id.as_deref() == Some(application_id))
        .cloned()
        .collect();
    commands.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(commands)
}
