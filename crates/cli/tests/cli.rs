use assert_cmd::Command;

#[test]
fn config_prints_resolved_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("base.toml"), "[server]\nport = 9191\n").unwrap();

    let output = Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_CONFIG_DIR", dir.path())
        .env("SHELF_ENV", "test")
        .env("RUST_LOG", "off")
        .arg("config")
        .output()
        .unwrap();

    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9191);
    assert_eq!(settings["environment"], "test");
}

#[test]
fn nested_keys_are_overridden_with_double_underscore() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("base.toml"), "[server]\nport = 9191\n").unwrap();

    let output = Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_CONFIG_DIR", dir.path())
        .env("SHELF_ENV", "test")
        .env("SHELF_SERVER__PORT", "9292")
        .env("SHELF_DATABASE__MAX_CONNECTIONS", "3")
        .env("RUST_LOG", "off")
        .arg("config")
        .output()
        .unwrap();

    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9292);
    assert_eq!(settings["database"]["max_connections"], 3);
}

#[test]
fn rejects_unknown_environment() {
    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_ENV", "qa")
        .env("RUST_LOG", "off")
        .arg("config")
        .assert()
        .failure();
}
