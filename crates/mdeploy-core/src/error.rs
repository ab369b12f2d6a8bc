use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid path to input file: {0}")]
    InvalidPath(PathBuf),

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "settings file must include name, ROOT_URL, PORT, MONGO_URL; missing {}",
        missing.join(", ")
    )]
    MissingFields { missing: Vec<String> },

    #[error("{path} is missing \"{key}\" key")]
    MissingKey { path: PathBuf, key: &'static str },

    // ── Sibling package.json resolution ──
    #[error("invalid path to package.json: {0}")]
    ManifestMissing(PathBuf),

    #[error("version was not set in package.json at {0}")]
    MissingVersion(PathBuf),

    #[error("unexpected package version: {0}")]
    MalformedVersion(String),
}
