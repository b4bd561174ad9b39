mod common;

use common::{new_store, seed_registry, string_set};
use jobreg_core::model::{ClusterPatch, ClusterStatus, NewCluster};
use jobreg_core::ops::cluster_ops;
use jobreg_core::ErrorKind;

fn new_cluster_payload() -> NewCluster {
    NewCluster {
        id: Some("cluster9".to_string()),
        name: "h2dev".to_string(),
        user: "tgianos".to_string(),
        version: "2.4.0".to_string(),
        status: ClusterStatus::Up,
        tags: string_set(&["dev"]),
        configs: string_set(&["s3://conf/cluster9/core-site.xml"]),
        jars: Default::default(),
    }
}

#[test]
fn test_get_cluster_returns_fixture_row() {
    let mut store = new_store();
    seed_registry(&mut store);

    let cluster = cluster_ops::get_cluster(&store, "cluster1").unwrap();
    assert_eq!(cluster.id, "cluster1");
    assert_eq!(cluster.name, "h2prod");
    assert_eq!(cluster.status, ClusterStatus::Up);
    assert_eq!(cluster.command_ids.len(), 3);
}

#[test]
fn test_get_cluster_blank_id_is_validation_error() {
    let store = new_store();
    assert_eq!(
        cluster_ops::get_cluster(&store, "").unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_create_cluster_injects_permanent_tags() {
    let mut store = new_store();

    let created = cluster_ops::create_cluster(&mut store, new_cluster_payload()).unwrap();
    assert_eq!(created.id, "cluster9");
    assert!(created.tags.contains("cluster9"));
    assert!(created.tags.contains("h2dev"));
    assert!(created.tags.contains("dev"));
    assert!(created.command_ids.is_empty());
}

#[test]
fn test_create_cluster_duplicate_id_conflicts() {
    let mut store = new_store();
    cluster_ops::create_cluster(&mut store, new_cluster_payload()).unwrap();

    let err = cluster_ops::create_cluster(&mut store, new_cluster_payload()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_update_cluster_patches_status() {
    let mut store = new_store();
    seed_registry(&mut store);

    let patch = ClusterPatch {
        status: Some(ClusterStatus::Terminated),
        ..Default::default()
    };
    let updated = cluster_ops::update_cluster(&mut store, "cluster1", patch).unwrap();
    assert_eq!(updated.status, ClusterStatus::Terminated);
    assert_eq!(updated.name, "h2prod");
    // membership is not patchable and survives
    assert_eq!(updated.command_ids.len(), 3);
}

#[test]
fn test_update_cluster_id_mismatch_conflicts() {
    let mut store = new_store();
    seed_registry(&mut store);

    let patch = ClusterPatch {
        id: Some("other".to_string()),
        ..Default::default()
    };
    let err = cluster_ops::update_cluster(&mut store, "cluster1", patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_delete_cluster_returns_removed_row() {
    let mut store = new_store();
    seed_registry(&mut store);

    let removed = cluster_ops::delete_cluster(&mut store, "cluster2").unwrap();
    assert_eq!(removed.id, "cluster2");
    assert!(cluster_ops::get_cluster(&store, "cluster2").is_err());
}

#[test]
fn test_delete_all_clusters_returns_removed_rows() {
    let mut store = new_store();
    seed_registry(&mut store);

    let removed = cluster_ops::delete_all_clusters(&mut store).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(store.list_clusters().is_empty());

    // commands survive with no cluster membership
    let command = store.get_command("command1").unwrap();
    assert!(command.cluster_ids.is_empty());
}
