//! Drives the command entry points end to end against a throwaway SQLite
//! file, the way the binary would run them.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use clientela_cli::commands;

fn write_properties(dir: &TempDir) -> PathBuf {
    let db_path = dir.path().join("clientela.db");
    let properties_path = dir.path().join("clientela.properties");
    fs::write(
        &properties_path,
        format!(
            "db.url=sqlite://{}\ndb.options=mode=rwc\nlog.level=error\n",
            db_path.display()
        ),
    )
    .expect("write properties file");
    properties_path
}

fn parse(output: &str) -> serde_json::Value {
    serde_json::from_str(output).expect("command output is JSON")
}

#[test]
fn full_crud_flow_through_the_command_layer() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_properties(&dir);

    let migrate = commands::migrate::run(&config);
    assert_eq!(migrate.exit_code, 0, "migrate failed: {}", migrate.output);

    let add = commands::add::run(
        &config,
        "Ana Gómez".to_string(),
        "ana@example.com".to_string(),
        Some("612345678".to_string()),
    );
    assert_eq!(add.exit_code, 0, "add failed: {}", add.output);
    let id = parse(&add.output)["data"]["id"].as_str().expect("assigned id").to_string();

    let get = commands::get::run(&config, id.clone());
    assert_eq!(get.exit_code, 0);
    let payload = parse(&get.output);
    assert_eq!(payload["data"]["customer"]["name"], "Ana Gómez");
    assert_eq!(payload["data"]["customer"]["phone"], "612345678");

    let list = commands::list::run(&config);
    assert_eq!(list.exit_code, 0);
    assert_eq!(parse(&list.output)["data"]["customers"].as_array().expect("array").len(), 1);

    let update = commands::update::run(
        &config,
        id.clone(),
        "Ana García".to_string(),
        "garcia@example.com".to_string(),
        None,
    );
    assert_eq!(update.exit_code, 0, "update failed: {}", update.output);

    let get_again = commands::get::run(&config, id.clone());
    assert_eq!(parse(&get_again.output)["data"]["customer"]["email"], "garcia@example.com");

    let delete = commands::delete::run(&config, id.clone());
    assert_eq!(delete.exit_code, 0);

    let get_after_delete = commands::get::run(&config, id);
    assert_eq!(get_after_delete.exit_code, 0);
    assert!(parse(&get_after_delete.output)["data"]["customer"].is_null());
}

#[test]
fn validation_failures_map_to_their_own_exit_code() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_properties(&dir);

    assert_eq!(commands::migrate::run(&config).exit_code, 0);

    let add = commands::add::run(
        &config,
        "Ana1".to_string(),
        "ana@example.com".to_string(),
        None,
    );
    assert_eq!(add.exit_code, 5);
    let payload = parse(&add.output);
    assert_eq!(payload["error_class"], "validation");
    assert!(payload["message"].as_str().expect("message").contains("nombre"));
}

#[test]
fn updating_a_missing_customer_reports_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_properties(&dir);

    assert_eq!(commands::migrate::run(&config).exit_code, 0);

    let update = commands::update::run(
        &config,
        "999".to_string(),
        "Ana".to_string(),
        "ana@example.com".to_string(),
        None,
    );
    assert_eq!(update.exit_code, 6);
    assert_eq!(parse(&update.output)["error_class"], "not_found");
}

#[test]
fn deleting_a_missing_customer_stays_silent() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_properties(&dir);

    assert_eq!(commands::migrate::run(&config).exit_code, 0);

    let delete = commands::delete::run(&config, "nonexistent-id".to_string());
    assert_eq!(delete.exit_code, 0, "delete should be a no-op: {}", delete.output);
}

#[test]
fn missing_properties_file_is_a_configuration_failure() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.properties");

    let list = commands::list::run(&missing);
    assert_eq!(list.exit_code, 2);
    assert_eq!(parse(&list.output)["error_class"], "config_validation");
}
