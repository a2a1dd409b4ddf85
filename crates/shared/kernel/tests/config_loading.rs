use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;
use ts64_kernel::config::{ConfigError, load_config};
use ts64_kernel::domain::config::AppConfig;

fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn explicit_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "shell.toml",
        r#"
        [storage]
        data_dir = "/srv/ts64"

        [vault]
        capacity_mb = 120
        "#,
    );

    let cfg: AppConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.storage.data_dir, PathBuf::from("/srv/ts64"));
    assert_eq!(cfg.vault.capacity_mb, 120);
    assert_eq!(cfg.logging.level, "warn");
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config::<AppConfig>(Some(dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}

#[test]
#[serial]
fn default_file_is_optional() {
    let cfg: AppConfig = load_config(None::<&str>).unwrap();
    assert_eq!(cfg.vault.capacity_mb, 50);
}
