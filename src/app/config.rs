//! Repository configuration loaded from `appindex.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::AppError;

/// Default configuration file name, looked up at the repository root.
pub const CONFIG_FILE: &str = "appindex.toml";

/// Contents of `appindex.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Directory holding configuration documents.
    #[serde(default = "default_configs_dir")]
    pub configs_dir: PathBuf,
    /// Install location of the generated manifest.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,
    /// Schema file replacing the embedded default.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Run the formal JSON Schema layer.
    #[serde(default = "default_true")]
    pub schema_validation: bool,
    /// Treat warnings as failures.
    #[serde(default)]
    pub strict: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            configs_dir: default_configs_dir(),
            index_path: default_index_path(),
            schema_path: None,
            schema_validation: default_true(),
            strict: false,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.configs_dir.as_os_str().is_empty() {
            return Err(AppError::config_error("configs_dir must not be empty"));
        }
        if self.index_path.file_name().is_none() {
            return Err(AppError::config_error(format!(
                "index_path must name a file: {}",
                self.index_path.display()
            )));
        }
        Ok(())
    }
}

fn default_configs_dir() -> PathBuf {
    PathBuf::from("configs")
}

fn default_index_path() -> PathBuf {
    PathBuf::from("index.json")
}

fn default_true() -> bool {
    true
}

pub fn parse_config_content(content: &str) -> Result<IndexConfig, AppError> {
    let config: IndexConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration for `root`.
///
/// An explicit path must exist; the default `appindex.toml` is optional.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<IndexConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            let path = resolve(root, path);
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => {
            let path = root.join(CONFIG_FILE);
            if !path.is_file() {
                tracing::debug!(root = %root.display(), "no config file; using defaults");
                return Ok(IndexConfig::default());
            }
            path
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)?;
    parse_config_content(&content)
}

/// How documents are checked against a JSON Schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// The schema compiled into the binary.
    Embedded,
    /// A schema file on disk.
    File(PathBuf),
    /// Formal schema layer off; semantic checks still run.
    Disabled,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub configs_dir: Option<PathBuf>,
    pub index_path: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
    pub no_schema: bool,
    pub strict: bool,
}

/// Fully resolved settings for one run. Paths are joined onto the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub configs_dir: PathBuf,
    pub index_path: PathBuf,
    pub schema: SchemaSource,
    pub strict: bool,
}

impl Settings {
    /// Defaults for a repository rooted at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self::resolve(root, IndexConfig::default(), Overrides::default())
    }

    pub fn resolve(root: impl Into<PathBuf>, config: IndexConfig, overrides: Overrides) -> Self {
        let root = root.into();
        let configs_dir = overrides.configs_dir.unwrap_or(config.configs_dir);
        let index_path = overrides.index_path.unwrap_or(config.index_path);

        let schema = if overrides.no_schema || !config.schema_validation {
            SchemaSource::Disabled
        } else {
            match overrides.schema_path.or(config.schema_path) {
                Some(path) => SchemaSource::File(resolve(&root, &path)),
                None => SchemaSource::Embedded,
            }
        };

        Self {
            configs_dir: resolve(&root, &configs_dir),
            index_path: resolve(&root, &index_path),
            schema,
            strict: overrides.strict || config.strict,
            root,
        }
    }

    pub fn without_schema(mut self) -> Self {
        self.schema = SchemaSource::Disabled;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { root.join(path) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config_content("").unwrap();
        assert_eq!(config, IndexConfig::default());
        assert!(config.schema_validation);
    }

    #[test]
    fn parses_all_keys() {
        let config = parse_config_content(
            r#"
configs_dir = "apps"
index_path = "public/index.json"
schema_path = "schemas/app-config.schema.json"
schema_validation = false
strict = true
"#,
        )
        .unwrap();
        assert_eq!(config.configs_dir, PathBuf::from("apps"));
        assert_eq!(config.index_path, PathBuf::from("public/index.json"));
        assert!(!config.schema_validation);
        assert!(config.strict);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_content("config_dir = \"apps\"").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }

    #[test]
    fn index_path_must_name_a_file() {
        let err = parse_config_content("index_path = \"..\"").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn missing_default_config_is_fine_but_explicit_is_not() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(dir.path(), None).unwrap(), IndexConfig::default());

        let err = load_config(dir.path(), Some(Path::new("custom.toml"))).unwrap_err();
        assert!(err.to_string().contains("custom.toml"));
    }

    #[test]
    fn loads_config_from_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "configs_dir = \"apps\"\n").unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.configs_dir, PathBuf::from("apps"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = IndexConfig {
            configs_dir: PathBuf::from("apps"),
            schema_path: Some(PathBuf::from("schema.json")),
            ..IndexConfig::default()
        };
        let overrides = Overrides {
            configs_dir: Some(PathBuf::from("other")),
            strict: true,
            ..Overrides::default()
        };

        let settings = Settings::resolve("/repo", config, overrides);
        assert_eq!(settings.configs_dir, PathBuf::from("/repo/other"));
        assert_eq!(settings.index_path, PathBuf::from("/repo/index.json"));
        assert_eq!(settings.schema, SchemaSource::File(PathBuf::from("/repo/schema.json")));
        assert!(settings.strict);
    }

    #[test]
    fn schema_can_be_disabled_from_either_side() {
        let from_flag = Settings::resolve(
            "/repo",
            IndexConfig::default(),
            Overrides { no_schema: true, ..Overrides::default() },
        );
        assert_eq!(from_flag.schema, SchemaSource::Disabled);

        let from_file = Settings::resolve(
            "/repo",
            IndexConfig { schema_validation: false, ..IndexConfig::default() },
            Overrides::default(),
        );
        assert_eq!(from_file.schema, SchemaSource::Disabled);
    }
}
