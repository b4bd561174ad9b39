//! SQLite repository implementation
//!
//! Persists Applications, Commands and Clusters from the in-memory Store to
//! SQLite. Attribute sets are stored as JSON array text; the cluster/command
//! association is stored once, in the `cluster_commands` join table.
//!
//! The core crate drives all cascades; this layer persists the rows an
//! operation touched. Callers persisting a multi-row change (an association
//! update, a cascading delete) must do so through the `_tx` variants inside
//! a single transaction.

#![allow(clippy::result_large_err)]

use std::collections::BTreeSet;

use crate::errors::{from_rusqlite, Result};
use jobreg_core::model::{Application, Cluster, Command};
use jobreg_core::Store;
use rusqlite::{Connection, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// SQLite repository for registry entities
pub struct SqliteRepo;

/// Render a status enum as its wire string (e.g. `ACTIVE`, `OUT_OF_SERVICE`)
fn status_to_text<S: Serialize>(status: &S) -> Result<String> {
    match serde_json::to_value(status)? {
        serde_json::Value::String(s) => Ok(s),
        other => Err(jobreg_core::RegistryError::Serialization {
            message: format!("status did not serialize to a string: {other}"),
        }),
    }
}

/// Parse a status enum from its wire string
pub(crate) fn status_from_text<S: DeserializeOwned>(text: &str) -> Result<S> {
    Ok(serde_json::from_value(serde_json::Value::String(
        text.to_string(),
    ))?)
}

fn set_to_json(set: &BTreeSet<String>) -> Result<String> {
    Ok(serde_json::to_string(set)?)
}

pub(crate) fn set_from_json(json: &str) -> BTreeSet<String> {
    serde_json::from_str(json).unwrap_or_default()
}

impl SqliteRepo {
    // ===== Applications =====

    /// Persist an Application, inserting or updating by id
    pub fn persist_application(conn: &Connection, application: &Application) -> Result<()> {
        conn.execute(
            "INSERT INTO applications (id, name, user, version, status, tags, configs, jars, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                user = excluded.user,
                version = excluded.version,
                status = excluded.status,
                tags = excluded.tags,
                configs = excluded.configs,
                jars = excluded.jars,
                updated = excluded.updated",
            rusqlite::params![
                application.id,
                application.name,
                application.user,
                application.version,
                status_to_text(&application.status)?,
                set_to_json(&application.tags)?,
                set_to_json(&application.configs)?,
                set_to_json(&application.jars)?,
                application.created.timestamp_millis(),
                application.updated.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Persist an Application within a transaction
    pub fn persist_application_tx(tx: &Transaction, application: &Application) -> Result<()> {
        Self::persist_application(tx, application)
    }

    /// Delete an Application row within a transaction
    ///
    /// The caller persists the detached commands the core cascade touched
    /// in the same transaction.
    pub fn delete_application_tx(tx: &Transaction, id: &str) -> Result<()> {
        tx.execute("DELETE FROM applications WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        Ok(())
    }

    // ===== Commands =====

    /// Persist a Command, inserting or updating by id
    ///
    /// The owner reference is a column on the row; cluster membership is
    /// not written here (it lives in `cluster_commands`, synced by
    /// [`Self::persist_cluster`]).
    pub fn persist_command(conn: &Connection, command: &Command) -> Result<()> {
        conn.execute(
            "INSERT INTO commands (id, name, user, version, status, executable, job_type, application_id, tags, configs, jars, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                user = excluded.user,
                version = excluded.version,
                status = excluded.status,
                executable = excluded.executable,
                job_type = excluded.job_type,
                application_id = excluded.application_id,
                tags = excluded.tags,
                configs = excluded.configs,
                jars = excluded.jars,
                updated = excluded.updated",
            rusqlite::params![
                command.id,
                command.name,
                command.user,
                command.version,
                status_to_text(&command.status)?,
                command.executable,
                command.job_type,
                command.application_id,
                set_to_json(&command.tags)?,
                set_to_json(&command.configs)?,
                set_to_json(&command.jars)?,
                command.created.timestamp_millis(),
                command.updated.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Persist a Command within a transaction
    pub fn persist_command_tx(tx: &Transaction, command: &Command) -> Result<()> {
        Self::persist_command(tx, command)
    }

    /// Delete a Command row and its association edges within a transaction
    pub fn delete_command_tx(tx: &Transaction, id: &str) -> Result<()> {
        tx.execute("DELETE FROM cluster_commands WHERE command_id = ?1", [id])
            .map_err(from_rusqlite)?;
        tx.execute("DELETE FROM commands WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        Ok(())
    }

    // ===== Clusters =====

    /// Persist a Cluster, inserting or updating by id, and sync its
    /// association edges
    ///
    /// The join rows are replaced to match `command_ids` in the same
    /// statement sequence; run inside a transaction (or via
    /// [`Self::persist_cluster_tx`]) when other rows change too.
    pub fn persist_cluster(conn: &Connection, cluster: &Cluster) -> Result<()> {
        conn.execute(
            "INSERT INTO clusters (id, name, user, version, status, tags, configs, jars, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                user = excluded.user,
                version = excluded.version,
                status = excluded.status,
                tags = excluded.tags,
                configs = excluded.configs,
                jars = excluded.jars,
                updated = excluded.updated",
            rusqlite::params![
                cluster.id,
                cluster.name,
                cluster.user,
                cluster.version,
                status_to_text(&cluster.status)?,
                set_to_json(&cluster.tags)?,
                set_to_json(&cluster.configs)?,
                set_to_json(&cluster.jars)?,
                cluster.created.timestamp_millis(),
                cluster.updated.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        conn.execute(
            "DELETE FROM cluster_commands WHERE cluster_id = ?1",
            [&cluster.id],
        )
        .map_err(from_rusqlite)?;
        for command_id in &cluster.command_ids {
            conn.execute(
                "INSERT INTO cluster_commands (cluster_id, command_id) VALUES (?1, ?2)",
                [&cluster.id, command_id],
            )
            .map_err(from_rusqlite)?;
        }

        Ok(())
    }

    /// Persist a Cluster within a transaction
    pub fn persist_cluster_tx(tx: &Transaction, cluster: &Cluster) -> Result<()> {
        Self::persist_cluster(tx, cluster)
    }

    /// Delete a Cluster row and its association edges within a transaction
    pub fn delete_cluster_tx(tx: &Transaction, id: &str) -> Result<()> {
        tx.execute("DELETE FROM cluster_commands WHERE cluster_id = ?1", [id])
            .map_err(from_rusqlite)?;
        tx.execute("DELETE FROM clusters WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        Ok(())
    }

    // ===== Whole registry =====

    /// Persist the entire Store in one transaction
    ///
    /// Replaces the database contents with the in-memory state. Rows are
    /// written applications first, then commands, then clusters with their
    /// join rows, so foreign keys hold at every point.
    pub fn persist_store(conn: &mut Connection, store: &Store) -> Result<()> {
        let tx = conn.transaction().map_err(from_rusqlite)?;

        tx.execute("DELETE FROM cluster_commands", [])
            .map_err(from_rusqlite)?;
        tx.execute("DELETE FROM commands", [])
            .map_err(from_rusqlite)?;
        tx.execute("DELETE FROM clusters", [])
            .map_err(from_rusqlite)?;
        tx.execute("DELETE FROM applications", [])
            .map_err(from_rusqlite)?;

        for application in store.list_applications() {
            Self::persist_application(&tx, application)?;
        }
        for command in store.list_commands() {
            Self::persist_command(&tx, command)?;
        }
        for cluster in store.list_clusters() {
            Self::persist_cluster(&tx, cluster)?;
        }

        tx.commit().map_err(from_rusqlite)?;
        tracing::debug!(
            applications = store.list_applications().len(),
            commands = store.list_commands().len(),
            clusters = store.list_clusters().len(),
            "persisted registry"
        );
        Ok(())
    }
}
