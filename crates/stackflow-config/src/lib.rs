pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding a direct path to the stack file
pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";

const CANDIDATES: [&str; 4] = [
    "stackflow.local.yaml",
    ".stackflow.local.yaml",
    "stackflow.yaml",
    ".stackflow.yaml",
];

/// Contents of `stackflow.yaml`
///
/// Every field is optional so command-line flags can fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackFile {
    pub name: Option<String>,
    pub region: Option<String>,
    pub stage: Option<String>,

    /// Template path, relative to the stack file
    pub template: Option<PathBuf>,

    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(default)]
    pub polling: PollingConfig,
}

/// Optional overrides for the status polling backoff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollingConfig {
    pub min_interval_ms: Option<u64>,
    pub max_interval_ms: Option<u64>,
    pub backoff_rate: Option<f64>,
    pub max_attempts: Option<u32>,
}

/// A parsed stack file together with where it was found
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStackFile {
    pub path: PathBuf,
    pub file: StackFile,
}

impl LoadedStackFile {
    /// Template path resolved against the stack file's directory
    pub fn template_path(&self) -> Option<PathBuf> {
        let template = self.file.template.as_ref()?;
        if template.is_absolute() {
            return Some(template.clone());
        }
        let base = self.path.parent().unwrap_or_else(|| Path::new("."));
        Some(base.join(template))
    }
}

/// Locate the stack file
///
/// Search order:
/// 1. `STACKFLOW_CONFIG_PATH` (direct path)
/// 2. current directory: stackflow.local.yaml, .stackflow.local.yaml, stackflow.yaml, .stackflow.yaml
/// 3. `./.stackflow/` with the same order
/// 4. `~/.config/stackflow/stackflow.yaml` (global)
pub fn find_stack_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("{} points to a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;

    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    let stack_dir = current_dir.join(".stackflow");
    if stack_dir.is_dir() {
        for filename in &CANDIDATES {
            let path = stack_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("stackflow").join("stackflow.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::StackFileNotFound)
}

/// Parse a stack file
pub fn load_stack_file(path: &Path) -> Result<StackFile> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find and parse the stack file; `None` when there is none
pub fn load() -> Result<Option<LoadedStackFile>> {
    let path = match find_stack_file() {
        Ok(path) => path,
        Err(ConfigError::StackFileNotFound) => return Ok(None),
        Err(e) => return Err(e),
    };
    tracing::debug!("Loading stack file {}", path.display());
    let file = load_stack_file(&path)?;
    Ok(Some(LoadedStackFile { path, file }))
}

/// Read a template body from disk
pub fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Template {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn in_dir<F: FnOnce()>(dir: &Path, f: F) {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        temp_env::with_var_unset(CONFIG_PATH_ENV, f);
        std::env::set_current_dir(original_dir).unwrap();
    }

    /// stackflow.yaml in the current directory is found
    #[test]
    #[serial]
    fn test_find_stack_file_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stackflow.yaml"), "name: api").unwrap();

        in_dir(temp_dir.path(), || {
            let path = find_stack_file().unwrap();
            assert!(path.ends_with("stackflow.yaml"));
        });
    }

    /// Local files win over the shared stack file
    #[test]
    #[serial]
    fn test_local_file_takes_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stackflow.yaml"), "name: shared").unwrap();
        fs::write(temp_dir.path().join(".stackflow.local.yaml"), "name: mine").unwrap();

        in_dir(temp_dir.path(), || {
            let path = find_stack_file().unwrap();
            assert!(path.ends_with(".stackflow.local.yaml"));
        });
    }

    /// ./.stackflow/ is searched after the current directory
    #[test]
    #[serial]
    fn test_find_stack_file_in_stack_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let stack_dir = temp_dir.path().join(".stackflow");
        fs::create_dir(&stack_dir).unwrap();
        fs::write(stack_dir.join("stackflow.yaml"), "name: api").unwrap();

        in_dir(temp_dir.path(), || {
            let path = find_stack_file().unwrap();
            assert!(path.ends_with(".stackflow/stackflow.yaml"));
        });
    }

    /// STACKFLOW_CONFIG_PATH points straight at a file
    #[test]
    #[serial]
    fn test_find_stack_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, "name: custom").unwrap();

        temp_env::with_var(CONFIG_PATH_ENV, Some(&config_path), || {
            assert_eq!(find_stack_file().unwrap(), config_path);
        });
    }

    /// No stack file anywhere loads as None
    #[test]
    #[serial]
    fn test_load_returns_none_without_stack_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();

        in_dir(temp_dir.path(), || {
            // Keep a real ~/.config/stackflow out of the way.
            temp_env::with_vars(
                [
                    ("HOME", Some(home.path())),
                    ("XDG_CONFIG_HOME", Some(home.path())),
                ],
                || {
                    assert!(matches!(
                        find_stack_file(),
                        Err(ConfigError::StackFileNotFound)
                    ));
                    assert!(load().unwrap().is_none());
                },
            );
        });
    }

    /// Every stack file field parses
    #[test]
    fn test_parse_full_stack_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stackflow.yaml");
        fs::write(
            &path,
            r#"
name: my-infradeploy-stack
region: us-east-1
stage: dev
template: infra/template.json
outputs:
  - URL
  - TableName
polling:
  min_interval_ms: 2000
  max_attempts: 50
"#,
        )
        .unwrap();

        let file = load_stack_file(&path).unwrap();
        assert_eq!(file.name.as_deref(), Some("my-infradeploy-stack"));
        assert_eq!(file.region.as_deref(), Some("us-east-1"));
        assert_eq!(file.stage.as_deref(), Some("dev"));
        assert_eq!(file.outputs, vec!["URL", "TableName"]);
        assert_eq!(file.polling.min_interval_ms, Some(2000));
        assert_eq!(file.polling.max_interval_ms, None);
        assert_eq!(file.polling.max_attempts, Some(50));

        let loaded = LoadedStackFile { path: path.clone(), file };
        assert_eq!(
            loaded.template_path().unwrap(),
            temp_dir.path().join("infra/template.json")
        );
    }

    /// Misspelled keys are rejected
    #[test]
    fn test_unknown_keys_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("stackflow.yaml");
        fs::write(&path, "name: api\nregoin: us-east-1\n").unwrap();

        let err = load_stack_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("stackflow.yaml"));
    }

    /// Template read errors name the file
    #[test]
    fn test_read_template_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing.json");

        let err = read_template(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));

        let present = temp_dir.path().join("template.json");
        fs::write(&present, r#"{"Resources":{}}"#).unwrap();
        assert_eq!(read_template(&present).unwrap(), r#"{"Resources":{}}"#);
    }
}
