use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::settings::resolve_input_path;

/// Deployment infrastructure configuration, read from
/// `<target>.config.json`.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Absolute path the configuration was loaded from.
    pub source_path: PathBuf,
    /// Root directory under which all target output directories are created.
    pub build_path: PathBuf,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "buildPath")]
    build_path: Option<String>,
}

impl DeployConfig {
    /// Load configuration from a JSON file. `buildPath` is required; keys
    /// other than it are ignored.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let source_path = resolve_input_path(path)?;
        tracing::info!(path = %source_path.display(), "parsing deploy config");

        let content = std::fs::read_to_string(&source_path).map_err(|e| crate::Error::Read {
            path: source_path.clone(),
            source: e,
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| crate::Error::Parse {
            path: source_path.clone(),
            source: e,
        })?;

        let build_path = file.build_path.ok_or_else(|| crate::Error::MissingKey {
            path: source_path.clone(),
            key: "buildPath",
        })?;

        Ok(Self {
            source_path,
            build_path: PathBuf::from(build_path),
        })
    }

    /// Directory containing the config file. The external build tool is
    /// expected to run from here (the project root).
    pub fn source_dir(&self) -> &Path {
        // source_path is an absolute file path after load, so it always
        // has a parent.
        self.source_path.parent().unwrap_or_else(|| Path::new("/"))
    }
}
