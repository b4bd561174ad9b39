use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Attribute, EntityKind, Resource};

/// Lifecycle status of an Application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Active,
    Inactive,
    Deprecated,
}

/// Application - a reusable software package Commands depend on
///
/// An Application bundles the binaries and configuration a Command needs at
/// job launch time (e.g. a pig or hive distribution). Commands reference at
/// most one Application as their owner; the inverse set is always computed,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier, immutable once assigned
    pub id: String,

    /// Human-readable name (also a permanent tag)
    pub name: String,

    /// User who registered this application
    pub user: String,

    /// Version string, free-form
    pub version: String,

    pub status: ApplicationStatus,

    /// Descriptive tags; always contains at least `{id, name}` after any
    /// tag-mutating operation
    pub tags: BTreeSet<String>,

    /// Locations of configuration files
    pub configs: BTreeSet<String>,

    /// Locations of auxiliary binaries
    pub jars: BTreeSet<String>,

    /// Timestamp when this application was created
    pub created: DateTime<Utc>,

    /// Timestamp when this application was last updated
    pub updated: DateTime<Utc>,
}

impl Application {
    /// Create a new Application with empty attribute sets and current
    /// timestamps
    pub fn new(
        id: String,
        name: String,
        user: String,
        version: String,
        status: ApplicationStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            user,
            version,
            status,
            tags: BTreeSet::new(),
            configs: BTreeSet::new(),
            jars: BTreeSet::new(),
            created: now,
            updated: now,
        }
    }
}

impl Resource for Application {
    fn kind(&self) -> EntityKind {
        EntityKind::Application
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
    fn test_new_application() {
        let app = Application::new(
            "app1".to_string(),
            "tez".to_string(),
            "tgianos".to_string(),
            "1.2.3".to_string(),
            ApplicationStatus::Inactive,
        );

        assert_eq!(app.id, "app1");
        assert_eq!(app.name, "tez");
        assert_eq!(app.user, "tgianos");
        assert_eq!(app.version, "1.2.3");
        assert_eq!(app.status, ApplicationStatus::Inactive);
        assert!(app.tags.is_empty());
        assert!(app.configs.is_empty());
        assert!(app.jars.is_empty());
        assert_eq!(app.created, app.updated);
    }

    #[test]
    fn test_touch_moves_updated_only() {
        let mut app = Application::new(
            "app1".to_string(),
            "tez".to_string(),
            "tgianos".to_string(),
            "1.2.3".to_string(),
            ApplicationStatus::Active,
        );
        let created = app.created;
        app.touch();
        assert_eq!(app.created, created);
        assert!(app.updated >= created);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ApplicationStatus::Deprecated).unwrap();
        assert_eq!(json, "\"DEPRECATED\"");
    }
}
