pub mod application;
pub mod cluster;
pub mod command;
pub mod payloads;

pub use application::{Application, ApplicationStatus};
pub use cluster::{Cluster, ClusterStatus};
pub use command::{Command, CommandStatus};
pub use payloads::{
    ApplicationPatch, ClusterPatch, CommandPatch, NewApplication, NewCluster, NewCommand,
};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three entity kinds the registry manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Application,
    Command,
    Cluster,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Application => "application",
            EntityKind::Command => "command",
            EntityKind::Cluster => "cluster",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set-valued attributes every entity carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Tags,
    Configs,
    Jars,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Tags => "tags",
            Attribute::Configs => "configs",
            Attribute::Jars => "jars",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Common surface shared by Application, Command and Cluster
///
/// The attribute-set operations and the query engine are written once
/// against this trait instead of three times against the concrete structs.
/// Mutation goes through `attr_set_mut` + `touch` so the audit timestamp
/// moves with every change.
pub trait Resource {
    fn kind(&self) -> EntityKind;
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn user(&self) -> &str;
    fn updated(&self) -> DateTime<Utc>;

    fn attr_set(&self, attr: Attribute) -> &BTreeSet<String>;
    fn attr_set_mut(&mut self, attr: Attribute) -> &mut BTreeSet<String>;

    /// Bump the `updated` audit timestamp
    fn touch(&mut self);
}
