use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Runtime settings for one deployable application, read from
/// `<target>.json` (typically `production.json` or `staging.json`).
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Absolute path the settings were loaded from. Used later to locate
    /// the sibling `package.json` and to copy the file into the bundle.
    pub source_path: PathBuf,
    /// Application name, e.g. "Example App".
    pub name: String,
    /// Public base URL the app is served at, e.g. "http://app.example.com".
    pub root_url: String,
    /// Network port the app listens on, as text.
    pub port: String,
    /// MongoDB connection string.
    pub mongo_url: String,
}

/// Raw settings file schema. Required keys decode to empty strings when
/// absent so that validation can report every missing one together.
#[derive(Deserialize)]
struct SettingsFile {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "ROOT_URL")]
    root_url: String,
    #[serde(default, rename = "PORT", deserialize_with = "string_or_number")]
    port: String,
    #[serde(default, rename = "MONGO_URL")]
    mongo_url: String,
}

/// Settings files in the wild write `"PORT": 3000` as often as
/// `"PORT": "3000"`; accept both and carry the port as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value,
        StringOrNumber::Number(value) => value.to_string(),
    })
}

impl AppSettings {
    /// Load and validate settings from a JSON file. Keys other than the
    /// four required ones are ignored.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let source_path = resolve_input_path(path)?;
        tracing::info!(path = %source_path.display(), "parsing settings");

        let content = std::fs::read_to_string(&source_path).map_err(|e| crate::Error::Read {
            path: source_path.clone(),
            source: e,
        })?;
        let file: SettingsFile =
            serde_json::from_str(&content).map_err(|e| crate::Error::Parse {
                path: source_path.clone(),
                source: e,
            })?;

        let settings = Self {
            source_path,
            name: file.name,
            root_url: file.root_url,
            port: file.port,
            mongo_url: file.mongo_url,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Every required field must be non-empty. Reports all violations in
    /// one error, in declaration order.
    fn validate(&self) -> crate::Result<()> {
        let required = [
            ("name", &self.name),
            ("ROOT_URL", &self.root_url),
            ("PORT", &self.port),
            ("MONGO_URL", &self.mongo_url),
        ];
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(key, _)| (*key).to_owned())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::MissingFields { missing })
        }
    }
}

/// Resolve a user-supplied input file path: reject empty or nonexistent
/// paths, absolutize relative ones against the current directory.
pub fn resolve_input_path(path: &Path) -> crate::Result<PathBuf> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(crate::Error::InvalidPath(path.to_path_buf()));
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().map_err(|e| crate::Error::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(cwd.join(path))
    }
}
