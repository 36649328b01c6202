//! End-to-end pipeline tests through the pre-flight path.
//!
//! `check` exercises every stage except the final process launch, so the
//! suite never needs the build tool installed.

use std::fs;
use std::path::Path;

use stagehand::config::AppConfig;
use stagehand::deploy;
use stagehand::error::ErrorCode;

const SECRETS_YAML: &str = "\
database:
  secrets:
    pg_dbname: /postgres_db
    pg_username: /postgres_user
    pg_password: /postgres_password
";

fn write_secret_files(dir: &Path) {
    fs::write(dir.join("postgres_db"), "db1\n").unwrap();
    fs::write(dir.join("postgres_user"), "user1\n").unwrap();
    fs::write(dir.join("postgres_password"), "pass1\n\n").unwrap();
}

/// Development layout: secrets in the project root, config under
/// `storage/api/`.
fn dev_config(root: &Path) -> AppConfig {
    let config_dir = root.join("storage").join("api");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("api.yml"), SECRETS_YAML).unwrap();
    write_secret_files(root);

    AppConfig::from_parts(
        "local".into(),
        root.display().to_string(),
        root.join("api").display().to_string(),
        "/etc/stagehand".into(),
        None,
    )
    .unwrap()
}

#[test]
fn development_check_assembles_fallback_command() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = dev_config(root);

    let output = deploy::check(&config).unwrap();

    let root_str = root.display().to_string();
    assert_eq!(output.mode, "development");
    assert_eq!(&output.command[..3], &["-C".to_string(), root_str.clone(), "build-test".into()]);
    assert_eq!(
        &output.command[3..],
        &[
            format!("POSTGRES_DB_SECRET_PATH={}/postgres_db", root_str),
            format!("POSTGRES_USER_SECRET_PATH={}/postgres_user", root_str),
            format!("POSTGRES_PASSWORD_SECRET_PATH={}/postgres_password", root_str),
            "ENV_DB_DATABASE_NAME=db1".to_string(),
            "ENV_DB_USER_NAME=user1".to_string(),
            "ENV_DB_USER_PASSWORD=pass1".to_string(),
        ]
    );
}

#[test]
fn development_ignores_configured_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = dev_config(dir.path());
    config.deploy_command = Some("deploy".into());

    let output = deploy::check(&config).unwrap();
    assert_eq!(output.command[2], "build-test");
}

#[test]
fn production_check_uses_raw_paths_and_configured_command() {
    let dir = tempfile::tempdir().unwrap();
    let secrets_dir = dir.path().join("run-secrets");
    let config_dir = dir.path().join("etc");
    fs::create_dir_all(&secrets_dir).unwrap();
    fs::create_dir_all(&config_dir).unwrap();
    write_secret_files(&secrets_dir);

    // Production config values are absolute mounted paths.
    let yaml = format!(
        "database:\n  secrets:\n    pg_dbname: {0}/postgres_db\n    pg_username: {0}/postgres_user\n    pg_password: {0}/postgres_password\n",
        secrets_dir.display()
    );
    fs::write(config_dir.join("api.yml"), yaml).unwrap();

    let config = AppConfig::from_parts(
        "production".into(),
        "/srv/app".into(),
        "/srv/api".into(),
        config_dir.display().to_string(),
        Some("deploy".into()),
    )
    .unwrap();

    let output = deploy::check(&config).unwrap();

    assert_eq!(output.mode, "production");
    assert_eq!(&output.command[..3], &["-C", "/srv/api", "deploy"]);
    assert_eq!(
        output.secret_files,
        vec![
            format!("{}/postgres_db", secrets_dir.display()),
            format!("{}/postgres_user", secrets_dir.display()),
            format!("{}/postgres_password", secrets_dir.display()),
        ]
    );
    // Trailing newlines stripped from every value.
    assert!(output.command.contains(&"ENV_DB_USER_PASSWORD=pass1".to_string()));
}

#[test]
fn secret_values_never_leak_into_the_file_list() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = dev_config(root);

    // Secret values are opaque; one that mimics the path-argument syntax
    // must not produce a phantom entry in the reported file list.
    fs::write(root.join("postgres_password"), "x_SECRET_PATH=/bogus\n").unwrap();

    let output = deploy::check(&config).unwrap();

    assert_eq!(
        output.secret_files,
        vec![
            format!("{}/postgres_db", root.display()),
            format!("{}/postgres_user", root.display()),
            format!("{}/postgres_password", root.display()),
        ]
    );
    assert!(output
        .command
        .contains(&"ENV_DB_USER_PASSWORD=x_SECRET_PATH=/bogus".to_string()));
}

#[test]
fn missing_username_file_aborts_with_single_failure() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = dev_config(root);
    fs::remove_file(root.join("postgres_user")).unwrap();

    let err = deploy::check(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::SecretFileNotFound);
    assert_eq!(err.details["key"], "database.secrets.pg_username");

    // Identical on retry: no partial state survives a failed run.
    let again = deploy::check(&config).unwrap_err();
    assert_eq!(again.code, ErrorCode::SecretFileNotFound);
    assert_eq!(again.details["key"], "database.secrets.pg_username");
}

#[test]
fn missing_secrets_config_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = dev_config(root);
    fs::remove_file(root.join("storage").join("api").join("api.yml")).unwrap();

    let err = deploy::check(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissingKey);
    assert_eq!(err.details["key"], "api.yml");
}

#[test]
fn invalid_environment_aborts_before_secrets_are_touched() {
    // Project root below the minimum length; no filesystem layout needed
    // because the pipeline must fail before any secret I/O.
    let err = AppConfig::from_parts(
        "local".into(),
        "/a".into(),
        "/work/app/api".into(),
        "/etc/stagehand".into(),
        None,
    )
    .map(|config| deploy::check(&config))
    .unwrap()
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    assert_eq!(err.details["key"], "PROJECT_ROOT");
}

#[test]
fn secret_directory_is_rejected_not_read_empty() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let config = dev_config(root);

    fs::remove_file(root.join("postgres_db")).unwrap();
    fs::create_dir(root.join("postgres_db")).unwrap();

    let err = deploy::check(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::SecretFileNotFound);
    assert_eq!(err.details["key"], "database.secrets.pg_dbname");
}
