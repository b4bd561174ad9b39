use std::collections::HashMap;

use crate::errors::{RegistryError, Result};
use crate::model::{Application, Cluster, Command, EntityKind, Resource};

/// In-memory store for registry entities
///
/// Three id-keyed arenas, one per entity kind. All storage access is
/// encapsulated here; cross-entity consistency (owner references, cluster
/// membership, permanent tags) is the responsibility of the operations in
/// this module's siblings, which are the only writers of those fields.
///
/// Persistence lives in `jobreg-store`, which hydrates a `Store` from
/// SQLite and persists mutations back inside a transaction.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Map of Application id to Application
    pub(crate) applications: HashMap<String, Application>,
    /// Map of Command id to Command
    pub(crate) commands: HashMap<String, Command>,
    /// Map of Cluster id to Cluster
    pub(crate) clusters: HashMap<String, Cluster>,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self {
            applications: HashMap::new(),
            commands: HashMap::new(),
            clusters: HashMap::new(),
        }
    }

    // ===== Applications =====

    /// Get an Application by id
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no application with this id exists.
    pub fn get_application(&self, id: &str) -> Result<&Application> {
        self.applications
            .get(id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Application, id))
    }

    /// Get a mutable reference to an Application by id
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no application with this id exists.
    pub fn get_application_mut(&mut self, id: &str) -> Result<&mut Application> {
        self.applications
            .get_mut(id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Application, id))
    }

    /// Insert an Application, replacing any existing row with the same id
    ///
    /// This is the raw save primitive used by CRUD operations, hydration
    /// and test seeding; it performs no validation.
    pub fn insert_application(&mut self, application: Application) {
        self.applications
            .insert(application.id.clone(), application);
    }

    /// Remove an Application row, returning it if present
    pub fn remove_application(&mut self, id: &str) -> Option<Application> {
        self.applications.remove(id)
    }

    /// List all Applications in unspecified order
    pub fn list_applications(&self) -> Vec<&Application> {
        self.applications.values().collect()
    }

    /// Check if an Application exists
    pub fn application_exists(&self, id: &str) -> bool {
        self.applications.contains_key(id)
    }

    // ===== Commands =====

    /// Get a Command by id
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no command with this id exists.
    pub fn get_command(&self, id: &str) -> Result<&Command> {
        self.commands
            .get(id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Command, id))
    }

    /// Get a mutable reference to a Command by id
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no command with this id exists.
    pub fn get_command_mut(&mut self, id: &str) -> Result<&mut Command> {
        self.commands
            .get_mut(id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Command, id))
    }

    /// Insert a Command, replacing any existing row with the same id
    pub fn insert_command(&mut self, command: Command) {
        self.commands.insert(command.id.clone(), command);
    }

    /// Remove a Command row, returning it if present
    pub fn remove_command(&mut self, id: &str) -> Option<Command> {
        self.commands.remove(id)
    }

    /// List all Commands in unspecified order
    pub fn list_commands(&self) -> Vec<&Command> {
        self.commands.values().collect()
    }

    /// Check if a Command exists
    pub fn command_exists(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    // ===== Clusters =====

    /// Get a Cluster by id
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no cluster with this id exists.
    pub fn get_cluster(&self, id: &str) -> Result<&Cluster> {
        self.clusters
            .get(id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Cluster, id))
    }

    /// Get a mutable reference to a Cluster by id
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no cluster with this id exists.
    pub fn get_cluster_mut(&mut self, id: &str) -> Result<&mut Cluster> {
        self.clusters
            .get_mut(id)
            .ok_or_else(|| RegistryError::not_found(EntityKind::Cluster, id))
    }

    /// Insert a Cluster, replacing any existing row with the same id
    pub fn insert_cluster(&mut self, cluster: Cluster) {
        self.clusters.insert(cluster.id.clone(), cluster);
    }

    /// Remove a Cluster row, returning it if present
    pub fn remove_cluster(&mut self, id: &str) -> Option<Cluster> {
        self.clusters.remove(id)
    }

    /// List all Clusters in unspecified order
    pub fn list_clusters(&self) -> Vec<&Cluster> {
        self.clusters.values().collect()
    }

    /// Check if a Cluster exists
    pub fn cluster_exists(&self, id: &str) -> bool {
        self.clusters.contains_key(id)
    }

    // ===== Kind-generic access =====

    /// Get any entity by kind and id as a [`Resource`]
    ///
    /// Used by the uniform attribute operations and the query engine.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no entity of this kind with this id
    /// exists.
    pub fn resource(&self, kind: EntityKind, id: &str) -> Result<&dyn Resource> {
        match kind {
            EntityKind::Application => Ok(self.get_application(id)?),
            EntityKind::Command => Ok(self.get_command(id)?),
            EntityKind::Cluster => Ok(self.get_cluster(id)?),
        }
    }

    /// Get any entity by kind and id as a mutable [`Resource`]
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no entity of this kind with this id
    /// exists.
    pub fn resource_mut(&mut self, kind: EntityKind, id: &str) -> Result<&mut dyn Resource> {
        match kind {
            EntityKind::Application => Ok(self.get_application_mut(id)?),
            EntityKind::Command => Ok(self.get_command_mut(id)?),
            EntityKind::Cluster => Ok(self.get_cluster_mut(id)?),
        }
    }

    /// Check whether any entity of the given kind exists with this id
    pub fn exists(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Application => self.application_exists(id),
            EntityKind::Command => self.command_exists(id),
            EntityKind::Cluster => self.cluster_exists(id),
        }
    }
}
