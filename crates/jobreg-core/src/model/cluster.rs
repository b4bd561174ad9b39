use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attribute, EntityKind, Resource};

/// Lifecycle status of a Cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterStatus {
    Up,
    OutOfService,
    Terminated,
}

/// Cluster - an execution target Commands can run on
///
/// The `command_ids` set is the mirror of each member Command's
/// `cluster_ids`; the relationship operations maintain both sides together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique identifier, immutable once assigned
    pub id: String,

    /// Human-readable name (also a permanent tag)
    pub name: String,

    /// User who registered this cluster
    pub user: String,

    /// Version string, free-form
    pub version: String,

    pub status: ClusterStatus,

    /// Ids of the Commands registered on this cluster
    pub command_ids: BTreeSet<String>,

    /// Descriptive tags; always contains at least `{id, name}` after any
    /// tag-mutating operation
    pub tags: BTreeSet<String>,

    /// Locations of configuration files
    pub configs: BTreeSet<String>,

    /// Locations of auxiliary binaries
    pub jars: BTreeSet<String>,

    /// Timestamp when this cluster was created
    pub created: DateTime<Utc>,

    /// Timestamp when this cluster was last updated
    pub updated: DateTime<Utc>,
}

impl Cluster {
    /// Create a new Cluster with no commands and empty attribute sets
    pub fn new(
        id: String,
        name: String,
        user: String,
        version: String,
        status: ClusterStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            user,
            version,
            status,
            command_ids: BTreeSet::new(),
            tags: BTreeSet::new(),
            configs: BTreeSet::new(),
            jars: BTreeSet::new(),
            created: now,
            updated: now,
        }
    }
}

impl Resource for Cluster {
    fn kind(&self) -> EntityKind {
        EntityKind::Cluster
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
