use std::path::PathBuf;

use crate::runner::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("build directory {path} is not accessible")]
    PermissionDenied { path: PathBuf },

    #[error("failed to create build directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy settings file to {path}")]
    CopySettings {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] mdeploy_core::Error),

    #[error("build tool failed: {0}")]
    BuildTool(#[from] ProcessError),
}
