use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Stack file not found. Looked in:\n\
        - current directory: stackflow.local.yaml, .stackflow.local.yaml, stackflow.yaml, .stackflow.yaml\n\
        - ./.stackflow/ directory\n\
        - ~/.config/stackflow/stackflow.yaml\n\
        Set STACKFLOW_CONFIG_PATH to point at a file directly"
    )]
    StackFileNotFound,

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
