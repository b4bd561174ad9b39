//! Whole-store integrity auditors
//!
//! Each function scans the registry for violations of one invariant and
//! returns every offender; `validate_store` runs them all and surfaces the
//! first violation as an error. The operations in `ops` maintain these
//! invariants transactionally, so a non-empty result here means a bug or a
//! corrupted backing store, not a caller mistake.

use crate::errors::{RegistryError, Result};
use crate::ops::store::Store;

/// Find cluster/command association edges recorded on only one side
///
/// Returns `(cluster_id, command_id)` pairs where the cluster lists the
/// command but not vice versa, or the command lists the cluster but not
/// vice versa (including edges pointing at ids that do not exist).
pub fn find_asymmetric_associations(store: &Store) -> Vec<(String, String)> {
    let mut broken = Vec::new();

    for cluster in store.clusters.values() {
        for command_id in &cluster.command_ids {
            let mirrored = store
                .commands
                .get(command_id)
                .map(|c| c.cluster_ids.contains(&cluster.id))
                .unwrap_or(false);
            if !mirrored {
                broken.push((cluster.id.clone(), command_id.clone()));
            }
        }
    }

    for command in store.commands.values() {
        for cluster_id in &command.cluster_ids {
            let mirrored = store
                .clusters
                .get(cluster_id)
                .map(|k| k.command_ids.contains(&command.id))
                .unwrap_or(false);
            if !mirrored {
                broken.push((cluster_id.clone(), command.id.clone()));
            }
        }
    }

    broken.sort();
    broken.dedup();
    broken
}

/// Find commands whose owner reference points at a missing application
///
/// Returns `(command_id, application_id)` pairs.
pub fn find_dangling_owner_refs(store: &Store) -> Vec<(String, String)> {
    let mut dangling: Vec<(String, String)> = store
        .commands
        .values()
        .filter_map(|c| {
            c.application_id
                .as_ref()
                .filter(|app_id| !store.applications.contains_key(*app_id))
                .map(|app_id| (c.id.clone(), app_id.clone()))
        })
        .collect();
    dangling.sort();
    dangling
}

/// Find entities whose tag set is missing a permanent member
///
/// Returns `(kind, id, missing_tag)` triples. Entities seeded directly into
/// the store (the analogue of a database fixture) may appear here until
/// their first tag mutation; anything created or mutated through `ops` may
/// not.
pub fn find_missing_protected_tags(store: &Store) -> Vec<(String, String, String)> {
    let mut missing = Vec::new();

    let mut check = |kind: &str, id: &str, name: &str, tags: &std::collections::BTreeSet<String>| {
        if !tags.contains(id) {
            missing.push((kind.to_string(), id.to_string(), id.to_string()));
        }
        if !tags.contains(name) {
            missing.push((kind.to_string(), id.to_string(), name.to_string()));
        }
    };

    for app in store.applications.values() {
        check("application", &app.id, &app.name, &app.tags);
    }
    for command in store.commands.values() {
        check("command", &command.id, &command.name, &command.tags);
    }
    for cluster in store.clusters.values() {
        check("cluster", &cluster.id, &cluster.name, &cluster.tags);
    }

    missing.sort();
    missing
}

/// Validate the entire registry
///
/// Runs the association-symmetry and owner-reference audits and returns an
/// error describing the first violation found. Protected-tag presence is
/// not checked here because directly-seeded rows are allowed to predate the
/// rule; use [`find_missing_protected_tags`] for that audit.
///
/// # Errors
/// Returns `Inconsistent` naming the first broken edge.
pub fn validate_store(store: &Store) -> Result<()> {
    if let Some((cluster_id, command_id)) = find_asymmetric_associations(store).first() {
        return Err(RegistryError::Inconsistent {
            message: format!(
                "association between cluster {cluster_id} and command {command_id} is one-sided"
            ),
        });
    }

    if let Some((command_id, application_id)) = find_dangling_owner_refs(store).first() {
        return Err(RegistryError::Inconsistent {
            message: format!(
                "command {command_id} references missing application {application_id}"
            ),
        });
    }

    Ok(())
}
