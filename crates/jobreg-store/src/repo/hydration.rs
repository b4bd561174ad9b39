//! Hydration layer - loads registry models from SQLite into a Store
//!
//! Converts database rows back into Application/Command/Cluster structs.
//! The cluster/command association is stored once (in `cluster_commands`);
//! hydration writes it onto both in-memory sides, so the symmetry invariant
//! holds by construction after a load.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::sqlite_repo::{set_from_json, status_from_text};
use jobreg_core::model::{Application, Cluster, Command};
use jobreg_core::Store;
use rusqlite::Connection;

fn timestamp(millis: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(millis).unwrap_or_else(chrono::Utc::now)
}

/// Load all Applications from the database into the Store
pub fn load_all_applications(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, user, version, status, tags, configs, jars, created, updated
             FROM applications ORDER BY id",
        )
        .map_err(from_rusqlite)?;

    let rows: Vec<(String, String, String, String, String, String, String, String, i64, i64)> =
        stmt.query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, name, user, version, status, tags, configs, jars, created, updated) in rows {
        let mut application = Application::new(id, name, user, version, status_from_text(&status)?);
        application.tags = set_from_json(&tags);
        application.configs = set_from_json(&configs);
        application.jars = set_from_json(&jars);
        application.created = timestamp(created);
        application.updated = timestamp(updated);
        store.insert_application(application);
    }

    Ok(())
}

/// Load all Commands from the database into the Store
///
/// Cluster membership is filled in separately by [`load_associations`].
pub fn load_all_commands(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, user, version, status, executable, job_type, application_id,
                    tags, configs, jars, created, updated
             FROM commands ORDER BY id",
        )
        .map_err(from_rusqlite)?;

    #[allow(clippy::type_complexity)]
    let rows: Vec<(
        String,
        String,
        String,
        String,
        String,
        String,
        Option<String>,
        Option<String>,
        String,
        String,
        String,
        i64,
        i64,
    )> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
                row.get(10)?,
                row.get(11)?,
                row.get(12)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (
        id,
        name,
        user,
        version,
        status,
        executable,
        job_type,
        application_id,
        tags,
        configs,
        jars,
        created,
        updated,
    ) in rows
    {
        let mut command = Command::new(id, name, user, version, status_from_text(&status)?, executable);
        command.job_type = job_type;
        command.application_id = application_id;
        command.tags = set_from_json(&tags);
        command.configs = set_from_json(&configs);
        command.jars = set_from_json(&jars);
        command.created = timestamp(created);
        command.updated = timestamp(updated);
        store.insert_command(command);
    }

    Ok(())
}

/// Load all Clusters from the database into the Store
///
/// Command membership is filled in separately by [`load_associations`].
pub fn load_all_clusters(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, user, version, status, tags, configs, jars, created, updated
             FROM clusters ORDER BY id",
        )
        .map_err(from_rusqlite)?;

    let rows: Vec<(String, String, String, String, String, String, String, String, i64, i64)> =
        stmt.query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (id, name, user, version, status, tags, configs, jars, created, updated) in rows {
        let mut cluster = Cluster::new(id, name, user, version, status_from_text(&status)?);
        cluster.tags = set_from_json(&tags);
        cluster.configs = set_from_json(&configs);
        cluster.jars = set_from_json(&jars);
        cluster.created = timestamp(created);
        cluster.updated = timestamp(updated);
        store.insert_cluster(cluster);
    }

    Ok(())
}

/// Replay the `cluster_commands` join table onto both in-memory sides
///
/// Edges referencing rows missing from the store are skipped rather than
/// invented; `persist_store` never writes such edges.
pub fn load_associations(conn: &Connection, store: &mut Store) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT cluster_id, command_id FROM cluster_commands ORDER BY cluster_id, command_id")
        .map_err(from_rusqlite)?;

    let edges: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    for (cluster_id, command_id) in edges {
        if !store.cluster_exists(&cluster_id) || !store.command_exists(&command_id) {
            continue;
        }
        store
            .get_cluster_mut(&cluster_id)?
            .command_ids
            .insert(command_id.clone());
        store
            .get_command_mut(&command_id)?
            .cluster_ids
            .insert(cluster_id);
    }

    Ok(())
}

/// Load the entire registry from the database
///
/// Returns a Store with every entity and both sides of every association
/// restored.
pub fn load_registry(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();
    load_all_applications(conn, &mut store)?;
    load_all_commands(conn, &mut store)?;
    load_all_clusters(conn, &mut store)?;
    load_associations(conn, &mut store)?;
    tracing::debug!(
        applications = store.list_applications().len(),
        commands = store.list_commands().len(),
        clusters = store.list_clusters().len(),
        "hydrated registry"
    );
    Ok(store)
}
