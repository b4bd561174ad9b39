use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attribute, EntityKind, Resource};

/// Lifecycle status of a Command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandStatus {
    Active,
    Inactive,
    Deprecated,
}

/// Command - an executable registered for use on Clusters
///
/// A Command names the executable a job runs (e.g. `pig`, `hive`), may own a
/// single [`super::Application`] providing its dependencies, and belongs to
/// any number of Clusters. The cluster membership is stored on both sides
/// (`cluster_ids` here, `command_ids` on the Cluster) and the relationship
/// operations keep the two in lockstep; nothing else may write either set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Unique identifier, immutable once assigned
    pub id: String,

    /// Human-readable name (also a permanent tag)
    pub name: String,

    /// User who registered this command
    pub user: String,

    /// Version string, free-form
    pub version: String,

    pub status: CommandStatus,

    /// Executable invoked on the cluster
    pub executable: String,

    /// Scheduler job type hint (e.g. "yarn"), if any
    pub job_type: Option<String>,

    /// Owning Application id, if one is set
    pub application_id: Option<String>,

    /// Ids of the Clusters this command is registered on
    pub cluster_ids: BTreeSet<String>,

    /// Descriptive tags; always contains at least `{id, name}` after any
    /// tag-mutating operation
    pub tags: BTreeSet<String>,

    /// Locations of configuration files
    pub configs: BTreeSet<String>,

    /// Locations of auxiliary binaries
    pub jars: BTreeSet<String>,

    /// Timestamp when this command was created
    pub created: DateTime<Utc>,

    /// Timestamp when this command was last updated
    pub updated: DateTime<Utc>,
}

impl Command {
    /// Create a new Command with no owner, no cluster memberships and empty
    /// attribute sets
    pub fn new(
        id: String,
        name: String,
        user: String,
        version: String,
        status: CommandStatus,
        executable: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            user,
            version,
            status,
            executable,
            job_type: None,
            application_id: None,
            cluster_ids: BTreeSet::new(),
            tags: BTreeSet::new(),
            configs: BTreeSet::new(),
            jars: BTreeSet::new(),
            created: now,
            updated: now,
        }
    }

    /// Check whether this command currently has an owning application
    pub fn has_application(&self) -> bool {
        self.application_id.is_some()
    }
}

impl Resource for Command {
    fn kind(&self) -> EntityKind {
        EntityKind::Command
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    fn attr_set(&self, attr: Attribute) -> &BTreeSet<String> {
        match attr {
            Attribute::Tags => &self.tags,
            Attribute::Configs => &self.configs,
            Attribute::Jars => &self.jars,
        }
    }

    fn attr_set_mut(&mut self, attr: Attribute) -> &mut BTreeSet<String> {
        match attr {
            Attribute::Tags => &mut self.tags,
            Attribute::Configs => &mut self.configs,
            Attribute::Jars => &mut self.jars,
        }
    }

    fn touch(&mut self) {
        self.updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_command() {
        let command = Command::new(
            "command1".to_string(),
            "pig_13_prod".to_string(),
            "tgianos".to_string(),
            "1.2.3".to_string(),
            CommandStatus::Active,
            "pig".to_string(),
        );

        assert_eq!(command.id, "command1");
        assert_eq!(command.executable, "pig");
        assert!(command.job_type.is_none());
        assert!(!command.has_application());
        assert!(command.cluster_ids.is_empty());
        assert!(command.jars.is_empty());
    }

    #[test]
    fn test_has_application() {
        let mut command = Command::new(
            "command1".to_string(),
            "pig_13_prod".to_string(),
            "tgianos".to_string(),
            "1.2.3".to_string(),
            CommandStatus::Active,
            "pig".to_string(),
        );
        command.application_id = Some("app1".to_string());
        assert!(command.has_application());
    }
}
