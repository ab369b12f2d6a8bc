use std::path::Path;

use serde::Deserialize;

#[derive(Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Read the application version from the `package.json` sitting next to
/// the settings file.
///
/// The value must split into exactly three dot-separated components. This
/// is a shape check on the version string, not full semver validation.
pub fn sibling_package_version(settings_path: &Path) -> crate::Result<String> {
    let directory = settings_path.parent().unwrap_or_else(|| Path::new("."));
    let manifest_path = directory.join("package.json");
    if !manifest_path.exists() {
        return Err(crate::Error::ManifestMissing(manifest_path));
    }
    tracing::info!(path = %manifest_path.display(), "parsing package.json");

    let content = std::fs::read_to_string(&manifest_path).map_err(|e| crate::Error::Read {
        path: manifest_path.clone(),
        source: e,
    })?;
    let manifest: PackageManifest =
        serde_json::from_str(&content).map_err(|e| crate::Error::Parse {
            path: manifest_path.clone(),
            source: e,
        })?;

    let version = manifest
        .version
        .ok_or_else(|| crate::Error::MissingVersion(manifest_path))?;
    if version.split('.').count() != 3 {
        return Err(crate::Error::MalformedVersion(version));
    }
    Ok(version)
}
