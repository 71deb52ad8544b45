//! Scenario tests for environment configuration factories

mod helpers;

use devbench::environment::{
    CommandContext, ConfigurationFactory, FixedRootConfig, LocalTestConfig, MainArgs,
    RESET_COMMAND,
};
use devbench::snapshot::{SnapshotError, DATABASES_DIR, EMPTY_DATABASES_DIR};
use helpers::*;
use serde_json::json;

#[tokio::test]
async fn test_local_config_shape() {
    let root = root_with_template(&[("seed.txt", "seed")]);
    let args = MainArgs::new(root.path());

    let config = LocalTestConfig.configuration(&args).await.unwrap();

    assert_eq!(config.http_port, 2001);
    assert_eq!(config.data_dir, root.path().join("databases"));
    assert_eq!(config.cache_dir, root.path().join("devbench_system"));
    assert_eq!(config.command_names(), vec!["reset-db"]);
    assert!(config.events.on_load.is_some());
}

#[tokio::test]
async fn test_reset_db_clears_and_reports() {
    let root = root_with_template(&[("docs/data.json", "{}")]);
    seed_databases(root.path(), &[("junk.txt", "left over")]);

    let config = LocalTestConfig
        .configuration(&MainArgs::new(root.path()))
        .await
        .unwrap();
    let ctx = CommandContext::new(root.path());

    let status = config.command(RESET_COMMAND).unwrap().invoke(&ctx).unwrap();

    assert_eq!(status, json!({ "status": "database cleared" }));
    assert_dirs_identical(
        &root.path().join(EMPTY_DATABASES_DIR),
        &root.path().join(DATABASES_DIR),
    );
}

#[tokio::test]
async fn test_on_load_hook_restores_databases() {
    let root = root_with_template(&[("docs/data.json", "{}")]);
    seed_databases(root.path(), &[("docs/data.json", "stale")]);

    let config = LocalTestConfig
        .configuration(&MainArgs::new(root.path()))
        .await
        .unwrap();

    config.fire_on_load(&CommandContext::new(root.path())).unwrap();

    assert_dirs_identical(
        &root.path().join(EMPTY_DATABASES_DIR),
        &root.path().join(DATABASES_DIR),
    );
}

#[tokio::test]
async fn test_reset_db_surfaces_missing_template() {
    let root = tempfile::TempDir::new().unwrap();

    let config = LocalTestConfig
        .configuration(&MainArgs::new(root.path()))
        .await
        .unwrap();
    let ctx = CommandContext::new(root.path());

    let err = config.command(RESET_COMMAND).unwrap().invoke(&ctx).unwrap_err();

    // The filesystem failure propagates instead of being swallowed
    assert!(matches!(
        err.downcast_ref::<SnapshotError>(),
        Some(SnapshotError::MissingTemplate(_))
    ));
}

#[tokio::test]
async fn test_fixed_root_config_pins_every_path() {
    let fixed = root_with_template(&[("seed.txt", "seed")]);
    let elsewhere = tempfile::TempDir::new().unwrap();

    let config = FixedRootConfig::new(fixed.path())
        .configuration(&MainArgs::new(elsewhere.path()))
        .await
        .unwrap();

    assert_eq!(config.data_dir, fixed.path().join("databases"));
    assert_eq!(config.cache_dir, fixed.path().join("devbench_system"));
    assert_eq!(config.remotes_info, Some(fixed.path().join("remotes-info.json")));
    assert_eq!(config.users_info, Some(fixed.path().join("users-info.json")));
    assert_eq!(config.secrets_file, Some(fixed.path().join("secrets.json")));
    assert_eq!(
        config.default_publish_location.as_deref(),
        Some("private/default-drive")
    );

    // Commands restore under the pinned root, wherever the context points
    let ctx = CommandContext::new(elsewhere.path());
    config.command(RESET_COMMAND).unwrap().invoke(&ctx).unwrap();

    assert!(fixed.path().join(DATABASES_DIR).is_dir());
    assert!(!elsewhere.path().join(DATABASES_DIR).exists());
}

#[tokio::test]
async fn test_profile_and_parameters_are_inert() {
    let root = root_with_template(&[]);

    let plain = LocalTestConfig
        .configuration(&MainArgs::new(root.path()))
        .await
        .unwrap();
    let decorated = LocalTestConfig
        .configuration(
            &MainArgs::new(root.path())
                .with_profile("integration")
                .with_parameter("toggle", "on"),
        )
        .await
        .unwrap();

    assert_eq!(plain.summary(), decorated.summary());
}

#[tokio::test]
async fn test_end_to_end_reset_replaces_working_data() {
    // databases/ holds a.txt, the template holds b.txt; after a reset only
    // the template's file remains
    let root = root_with_template(&[("b.txt", "Y")]);
    seed_databases(root.path(), &[("a.txt", "X")]);

    let config = LocalTestConfig
        .configuration(&MainArgs::new(root.path()))
        .await
        .unwrap();
    let status = config
        .command(RESET_COMMAND)
        .unwrap()
        .invoke(&CommandContext::new(root.path()))
        .unwrap();

    assert_eq!(status, json!({ "status": "database cleared" }));
    assert_eq!(
        dir_listing(&root.path().join(DATABASES_DIR)),
        vec![("b.txt".to_string(), "Y".to_string())]
    );
}
