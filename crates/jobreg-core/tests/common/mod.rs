use std::collections::BTreeSet;

use chrono::Duration;
use jobreg_core::model::{
    Application, ApplicationStatus, Cluster, ClusterStatus, Command, CommandStatus,
};
use jobreg_core::Store;

/// Create a new empty Store for testing
#[allow(dead_code)]
pub fn new_store() -> Store {
    Store::new()
}

/// Build a string set from literals
#[allow(dead_code)]
pub fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Seed the three reference Applications
///
/// Rows are inserted directly (bypassing the CRUD operations), the analogue
/// of a database fixture: tag sets are exactly as listed and may not yet
/// contain the permanent members. `updated` timestamps are staggered so the
/// default ordering is app3, app2, app1.
#[allow(dead_code)]
pub fn seed_applications(store: &mut Store) {
    let mut app1 = Application::new(
        "app1".to_string(),
        "tez".to_string(),
        "tgianos".to_string(),
        "1.2.3".to_string(),
        ApplicationStatus::Inactive,
    );
    app1.tags = string_set(&["prod", "tez", "yarn", "hadoop"]);
    app1.configs = string_set(&["s3://conf/app1/tez-site.xml", "s3://conf/app1/log4j.props"]);
    app1.jars = string_set(&["s3://jars/app1/tez.tar.gz", "s3://jars/app1/extras.jar"]);
    app1.updated = app1.updated - Duration::seconds(20);

    let mut app2 = Application::new(
        "app2".to_string(),
        "spark".to_string(),
        "amsharma".to_string(),
        "4.5.6".to_string(),
        ApplicationStatus::Active,
    );
    app2.tags = string_set(&["prod", "yarn", "spark", "app2"]);
    app2.configs = string_set(&[
        "s3://conf/app2/spark-defaults.conf",
        "s3://conf/app2/log4j.props",
    ]);
    app2.jars = string_set(&["s3://jars/app2/spark.tar.gz"]);
    app2.updated = app2.updated - Duration::seconds(10);

    let mut app3 = Application::new(
        "app3".to_string(),
        "storm".to_string(),
        "tgianos".to_string(),
        "7.8.9".to_string(),
        ApplicationStatus::Deprecated,
    );
    app3.tags = string_set(&["prod", "storm", "app3"]);
    app3.configs = string_set(&["s3://conf/app3/storm.yaml"]);
    app3.jars = string_set(&["s3://jars/app3/storm.tar.gz", "s3://jars/app3/extras.jar"]);

    store.insert_application(app1);
    store.insert_application(app2);
    store.insert_application(app3);
}

/// Seed the three reference Commands and their cluster membership
///
/// command1 is owned by app1; all three are registered on cluster1.
/// `updated` timestamps give the default ordering command2, command3,
/// command1.
#[allow(dead_code)]
pub fn seed_commands(store: &mut Store) {
    let mut command1 = Command::new(
        "command1".to_string(),
        "pig_13_prod".to_string(),
        "tgianos".to_string(),
        "1.2.3".to_string(),
        CommandStatus::Active,
        "pig".to_string(),
    );
    command1.job_type = Some("yarn".to_string());
    command1.tags = string_set(&["prod", "pig", "tez", "command1", "pig_13_prod"]);
    command1.configs = string_set(&["s3://conf/command1/pig.properties", "s3://conf/command1/tez.xml"]);
    command1.application_id = Some("app1".to_string());
    command1.cluster_ids = string_set(&["cluster1"]);
    command1.updated = command1.updated - Duration::seconds(20);

    let mut command2 = Command::new(
        "command2".to_string(),
        "hive_11_prod".to_string(),
        "amsharma".to_string(),
        "4.5.6".to_string(),
        CommandStatus::Inactive,
        "hive".to_string(),
    );
    command2.job_type = Some("yarn".to_string());
    command2.tags = string_set(&["prod", "hive", "command2", "hive_11_prod"]);
    command2.configs = string_set(&["s3://conf/command2/hive-site.xml"]);
    command2.cluster_ids = string_set(&["cluster1"]);

    let mut command3 = Command::new(
        "command3".to_string(),
        "pig_11_prod".to_string(),
        "tgianos".to_string(),
        "7.8.9".to_string(),
        CommandStatus::Deprecated,
        "pig".to_string(),
    );
    command3.job_type = Some("yarn".to_string());
    command3.tags = string_set(&["prod", "pig", "hadoop", "command3", "pig_11_prod"]);
    command3.configs = string_set(&["s3://conf/command3/pig.properties"]);
    command3.cluster_ids = string_set(&["cluster1"]);
    command3.updated = command3.updated - Duration::seconds(10);

    store.insert_command(command1);
    store.insert_command(command2);
    store.insert_command(command3);
}

/// Seed the reference Clusters
///
/// cluster1 carries all three commands (the mirror of `seed_commands`);
/// cluster2 is empty.
#[allow(dead_code)]
pub fn seed_clusters(store: &mut Store) {
    let mut cluster1 = Cluster::new(
        "cluster1".to_string(),
        "h2prod".to_string(),
        "tgianos".to_string(),
        "2.4.0".to_string(),
        ClusterStatus::Up,
    );
    cluster1.tags = string_set(&["prod", "h2prod", "cluster1"]);
    cluster1.configs = string_set(&["s3://conf/cluster1/core-site.xml"]);
    cluster1.command_ids = string_set(&["command1", "command2", "command3"]);

    let mut cluster2 = Cluster::new(
        "cluster2".to_string(),
        "h2query".to_string(),
        "amsharma".to_string(),
        "2.4.0".to_string(),
        ClusterStatus::OutOfService,
    );
    cluster2.tags = string_set(&["adhoc", "h2query", "cluster2"]);
    cluster2.configs = string_set(&["s3://conf/cluster2/core-site.xml"]);
    cluster2.updated = cluster2.updated - Duration::seconds(10);

    store.insert_cluster(cluster1);
    store.insert_cluster(cluster2);
}

/// Seed the full reference registry: applications, commands and clusters
/// with all associations in place
#[allow(dead_code)]
pub fn seed_registry(store: &mut Store) {
    seed_applications(store);
    seed_commands(store);
    seed_clusters(store);
}
