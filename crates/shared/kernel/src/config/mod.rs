use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`TS64__STORAGE__DATA_DIR`).
pub const ENV_PREFIX: &str = "TS64";
/// File stem looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_STEM: &str = "ts64";

/// Custom error type for config loading.
#[ts64_derive::ts64_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file layered with environment overrides.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, `ts64.{toml,yaml,json}`
///    in the working directory is used if present and skipped otherwise.
/// 2. **Environment Overrides**: variables prefixed with `TS64__`, nested with `__`
///    (`TS64__VAULT__CAPACITY_MB=100` maps to `vault.capacity_mb`).
///
/// # Errors
/// * An explicit file is missing or unreadable.
/// * The merged document does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use ts64_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct ShellConfig {
///     capacity_mb: u64,
/// }
///
/// let cfg: ShellConfig = load_config(None::<&str>).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// `env` replaces the process environment when set.
fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_STEM), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true)
                .source(env),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts64_domain::config::AppConfig;

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.toml");
        std::fs::write(&path, "[vault]\ncapacity_mb = 10\n[storage]\ndata_dir = \"a\"\n").unwrap();

        let env = config::Map::from([
            ("TS64__VAULT__CAPACITY_MB".to_owned(), "75".to_owned()),
            ("TS64__DOWNLOADS__DIR".to_owned(), "/tmp/out".to_owned()),
            ("OTHER__VAULT__CAPACITY_MB".to_owned(), "1".to_owned()),
        ]);
        let cfg: AppConfig = load_layered(Some(&path), Some(env)).unwrap();

        assert_eq!(cfg.vault.capacity_mb, 75);
        assert_eq!(cfg.downloads.dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.storage.data_dir, PathBuf::from("a"));
    }

    #[test]
    fn test_environment_parses_numbers_and_bools() {
        let env = config::Map::from([
            ("TS64__LOGGING__MAX_FILES".to_owned(), "3".to_owned()),
            ("TS64__LOGGING__JSON".to_owned(), "true".to_owned()),
            ("TS64__LOGGING__LEVEL".to_owned(), "debug".to_owned()),
        ]);
        let cfg: AppConfig = load_layered(None::<&str>, Some(env)).unwrap();

        assert_eq!(cfg.logging.max_files, 3);
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_bad_types_fail_deserialization() {
        let env = config::Map::from([("TS64__VAULT__CAPACITY_MB".to_owned(), "lots".to_owned())]);
        let result = load_layered::<AppConfig>(None::<&str>, Some(env));
        assert!(matches!(result, Err(ConfigError::Config { .. })));
    }
}
