mod common;

use common::{new_store, seed_registry, string_set};
use jobreg_core::model::{CommandPatch, CommandStatus, NewCommand};
use jobreg_core::ops::command_ops;
use jobreg_core::{ErrorKind, RegistryError};

fn new_command_payload() -> NewCommand {
    NewCommand {
        id: Some("command9".to_string()),
        name: "presto_adhoc".to_string(),
        user: "tgianos".to_string(),
        version: "0.149".to_string(),
        status: CommandStatus::Active,
        executable: "presto".to_string(),
        job_type: Some("presto".to_string()),
        tags: string_set(&["adhoc"]),
        configs: Default::default(),
        jars: Default::default(),
    }
}

// ===== GET =====

#[test]
fn test_get_command_returns_fixture_row() {
    let mut store = new_store();
    seed_registry(&mut store);

    let command = command_ops::get_command(&store, "command1").unwrap();
    assert_eq!(command.id, "command1");
    assert_eq!(command.name, "pig_13_prod");
    assert_eq!(command.user, "tgianos");
    assert_eq!(command.version, "1.2.3");
    assert_eq!(command.status, CommandStatus::Active);
    assert_eq!(command.executable, "pig");
    assert_eq!(command.job_type.as_deref(), Some("yarn"));
    assert_eq!(command.application_id.as_deref(), Some("app1"));
    assert_eq!(command.tags.len(), 5);
    assert_eq!(command.configs.len(), 2);

    let command2 = command_ops::get_command(&store, "command2").unwrap();
    assert!(command2.application_id.is_none());
    assert_eq!(command2.tags.len(), 4);
    assert_eq!(command2.configs.len(), 1);
}

#[test]
fn test_get_command_blank_id_is_validation_error() {
    let store = new_store();
    let err = command_ops::get_command(&store, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_get_command_missing_is_not_found() {
    let store = new_store();
    let err = command_ops::get_command(&store, "no-such-command").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ===== CREATE =====

#[test]
fn test_create_command_with_id() {
    let mut store = new_store();

    let created = command_ops::create_command(&mut store, new_command_payload()).unwrap();
    assert_eq!(created.id, "command9");
    assert_eq!(created.executable, "presto");
    assert!(created.application_id.is_none());
    assert!(created.cluster_ids.is_empty());
    assert!(created.tags.contains("command9"));
    assert!(created.tags.contains("presto_adhoc"));

    assert!(command_ops::get_command(&store, "command9").is_ok());
}

#[test]
fn test_create_command_generates_id_when_absent() {
    let mut store = new_store();
    let mut payload = new_command_payload();
    payload.id = None;

    let created = command_ops::create_command(&mut store, payload).unwrap();
    assert!(!created.id.is_empty());
    assert!(command_ops::get_command(&store, &created.id).is_ok());
}

#[test]
fn test_create_command_duplicate_id_conflicts() {
    let mut store = new_store();
    command_ops::create_command(&mut store, new_command_payload()).unwrap();

    let err = command_ops::create_command(&mut store, new_command_payload()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_create_command_blank_executable_rejected() {
    let mut store = new_store();
    let mut payload = new_command_payload();
    payload.executable = String::new();

    let err = command_ops::create_command(&mut store, payload).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::BlankField {
            field: "executable",
            ..
        }
    ));
}

// ===== UPDATE =====

#[test]
fn test_update_command_patches_only_supplied_fields() {
    let mut store = new_store();
    seed_registry(&mut store);

    let patch = CommandPatch {
        status: Some(CommandStatus::Inactive),
        user: Some("amsharma".to_string()),
        tags: Some(string_set(&["prod", "tez", "yarn", "hadoop"])),
        ..Default::default()
    };
    command_ops::update_command(&mut store, "command1", patch).unwrap();

    let updated = command_ops::get_command(&store, "command1").unwrap();
    assert_eq!(updated.user, "amsharma");
    assert_eq!(updated.status, CommandStatus::Inactive);
    assert_eq!(updated.executable, "pig");
    // 4 supplied + id + name re-injected
    assert_eq!(updated.tags.len(), 6);
    assert!(updated.tags.contains("command1"));
    assert!(updated.tags.contains("pig_13_prod"));
    // owner reference survives a field patch
    assert_eq!(updated.application_id.as_deref(), Some("app1"));
}

#[test]
fn test_update_command_id_mismatch_conflicts() {
    let mut store = new_store();
    seed_registry(&mut store);

    let patch = CommandPatch {
        id: Some("some-other-id".to_string()),
        ..Default::default()
    };
    let err = command_ops::update_command(&mut store, "command1", patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_update_command_missing_is_not_found() {
    let mut store = new_store();
    let err = command_ops::update_command(&mut store, "ghost", CommandPatch::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ===== DELETE =====

#[test]
fn test_delete_command_returns_removed_row() {
    let mut store = new_store();
    seed_registry(&mut store);

    let removed = command_ops::delete_command(&mut store, "command1").unwrap();
    assert_eq!(removed.id, "command1");
    assert!(command_ops::get_command(&store, "command1").is_err());
}

#[test]
fn test_delete_command_blank_id_is_validation_error() {
    let mut store = new_store();
    let err = command_ops::delete_command(&mut store, "  ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_delete_command_missing_is_not_found() {
    let mut store = new_store();
    let err = command_ops::delete_command(&mut store, "ghost").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_delete_all_commands_returns_removed_rows() {
    let mut store = new_store();
    seed_registry(&mut store);

    let removed = command_ops::delete_all_commands(&mut store).unwrap();
    assert_eq!(removed.len(), 3);
    assert!(store.list_commands().is_empty());

    // clusters survive with empty membership
    let cluster = store.get_cluster("cluster1").unwrap();
    assert!(cluster.command_ids.is_empty());
}
