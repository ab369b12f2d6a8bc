use mdeploy_core::{Error, manifest};
use tempfile::TempDir;

#[test]
fn resolves_version_next_to_settings_file() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("production.json");
    std::fs::write(tmp.path().join("package.json"), r#"{"version": "1.2.3"}"#).unwrap();

    let version = manifest::sibling_package_version(&settings_path).unwrap();

    assert_eq!(version, "1.2.3");
}

#[test]
fn missing_manifest_file() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("production.json");

    let result = manifest::sibling_package_version(&settings_path);

    match result {
        Err(Error::ManifestMissing(path)) => {
            assert_eq!(path, tmp.path().join("package.json"));
        }
        other => panic!("expected ManifestMissing, got {other:?}"),
    }
}

#[test]
fn missing_version_field() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("production.json");
    std::fs::write(tmp.path().join("package.json"), r#"{"name": "app"}"#).unwrap();

    let result = manifest::sibling_package_version(&settings_path);

    assert!(matches!(result, Err(Error::MissingVersion(_))));
}

#[test]
fn two_component_version_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("production.json");
    std::fs::write(tmp.path().join("package.json"), r#"{"version": "1.2"}"#).unwrap();

    let result = manifest::sibling_package_version(&settings_path);

    match result {
        Err(Error::MalformedVersion(version)) => assert_eq!(version, "1.2"),
        other => panic!("expected MalformedVersion, got {other:?}"),
    }
}

#[test]
fn four_component_version_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let settings_path = tmp.path().join("production.json");
    std::fs::write(tmp.path().join("package.json"), r#"{"version": "1.2.3.4"}"#).unwrap();

    assert!(matches!(
        manifest::sibling_package_version(&settings_path),
        Err(Error::MalformedVersion(_))
    ));
}
