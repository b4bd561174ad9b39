//! Create and partial-update payloads
//!
//! `New*` structs are what callers hand to `create_*`: the id is optional
//! (generated when absent), required fields are validated before any store
//! access, and initial attribute sets ride along.
//!
//! `*Patch` structs implement the partial-update contract: every field is
//! optional and `None` means "leave unchanged". A patch carrying an id that
//! differs from the target id is a conflict, never a rename.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ApplicationStatus, ClusterStatus, CommandStatus};

/// Payload for creating an Application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    /// Caller-supplied id; generated when absent
    pub id: Option<String>,
    pub name: String,
    pub user: String,
    pub version: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub configs: BTreeSet<String>,
    #[serde(default)]
    pub jars: BTreeSet<String>,
}

/// Payload for creating a Command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommand {
    /// Caller-supplied id; generated when absent
    pub id: Option<String>,
    pub name: String,
    pub user: String,
    pub version: String,
    pub status: CommandStatus,
    pub executable: String,
    pub job_type: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub configs: BTreeSet<String>,
    #[serde(default)]
    pub jars: BTreeSet<String>,
}

/// Payload for creating a Cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCluster {
    /// Caller-supplied id; generated when absent
    pub id: Option<String>,
    pub name: String,
    pub user: String,
    pub version: String,
    pub status: ClusterStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub configs: BTreeSet<String>,
    #[serde(default)]
    pub jars: BTreeSet<String>,
}

/// Partial update for an Application; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub version: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub tags: Option<BTreeSet<String>>,
    pub configs: Option<BTreeSet<String>>,
    pub jars: Option<BTreeSet<String>>,
}

/// Partial update for a Command; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub version: Option<String>,
    pub status: Option<CommandStatus>,
    pub executable: Option<String>,
    pub job_type: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub configs: Option<BTreeSet<String>>,
    pub jars: Option<BTreeSet<String>>,
}

/// Partial update for a Cluster; `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub version: Option<String>,
    pub status: Option<ClusterStatus>,
    pub tags: Option<BTreeSet<String>>,
    pub configs: Option<BTreeSet<String>>,
    pub jars: Option<BTreeSet<String>>,
}
