//! Argument validation
//!
//! All public operations validate their arguments here before touching the
//! store, so invalid input never causes a lookup, let alone a write.

use crate::errors::{RegistryError, Result};
use crate::model::{EntityKind, NewApplication, NewCluster, NewCommand};

/// Require a non-blank entity id
///
/// # Errors
///
/// Returns `MissingId` if the id is empty or whitespace-only.
pub fn require_id(kind: EntityKind, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(RegistryError::MissingId { kind });
    }
    Ok(())
}

fn require_field(kind: EntityKind, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::BlankField { kind, field });
    }
    Ok(())
}

/// Validate an Application create payload
///
/// # Errors
///
/// Returns `BlankField` if name, user or version is blank, or `MissingId`
/// if a supplied id is blank.
pub fn validate_new_application(payload: &NewApplication) -> Result<()> {
    let kind = EntityKind::Application;
    if let Some(id) = &payload.id {
        require_id(kind, id)?;
    }
    require_field(kind, "name", &payload.name)?;
    require_field(kind, "user", &payload.user)?;
    require_field(kind, "version", &payload.version)
}

/// Validate a Command create payload
///
/// # Errors
///
/// Returns `BlankField` if name, user, version or executable is blank, or
/// `MissingId` if a supplied id is blank.
pub fn validate_new_command(payload: &NewCommand) -> Result<()> {
    let kind = EntityKind::Command;
    if let Some(id) = &payload.id {
        require_id(kind, id)?;
    }
    require_field(kind, "name", &payload.name)?;
    require_field(kind, "user", &payload.user)?;
    require_field(kind, "version", &payload.version)?;
    require_field(kind, "executable", &payload.executable)
}

/// Validate a Cluster create payload
///
/// # Errors
///
/// Returns `BlankField` if name, user or version is blank, or `MissingId`
/// if a supplied id is blank.
pub fn validate_new_cluster(payload: &NewCluster) -> Result<()> {
    let kind = EntityKind::Cluster;
    if let Some(id) = &payload.id {
        require_id(kind, id)?;
    }
    require_field(kind, "name", &payload.name)?;
    require_field(kind, "user", &payload.user)?;
    require_field(kind, "version", &payload.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApplicationStatus;

    fn payload() -> NewApplication {
        NewApplication {
            id: None,
            name: "tez".to_string(),
            user: "tgianos".to_string(),
            version: "1.2.3".to_string(),
            status: ApplicationStatus::Active,
            tags: Default::default(),
            configs: Default::default(),
            jars: Default::default(),
        }
    }

    #[test]
    fn test_require_id_rejects_blank() {
        assert!(require_id(EntityKind::Application, "").is_err());
        assert!(require_id(EntityKind::Application, "   \t").is_err());
        assert!(require_id(EntityKind::Application, "app1").is_ok());
    }

    #[test]
    fn test_validate_new_application_rejects_blank_fields() {
        let mut p = payload();
        p.name = " ".to_string();
        assert!(matches!(
            validate_new_application(&p),
            Err(RegistryError::BlankField { field: "name", .. })
        ));

        let mut p = payload();
        p.user = String::new();
        assert!(matches!(
            validate_new_application(&p),
            Err(RegistryError::BlankField { field: "user", .. })
        ));
    }

    #[test]
    fn test_validate_new_application_rejects_blank_supplied_id() {
        let mut p = payload();
        p.id = Some("  ".to_string());
        assert!(matches!(
            validate_new_application(&p),
            Err(RegistryError::MissingId { .. })
        ));
    }

    #[test]
    fn test_validate_new_application_accepts_valid() {
        assert!(validate_new_application(&payload()).is_ok());
    }
}
