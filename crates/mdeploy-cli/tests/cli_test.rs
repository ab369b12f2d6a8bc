use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn mdeploy() -> assert_cmd::Command {
    cargo_bin_cmd!("mdeploy")
}

// ── Help / Version ──

#[test]
fn shows_help() {
    mdeploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build and containerize"));
}

#[test]
fn shows_version() {
    mdeploy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mdeploy"));
}

#[test]
fn requires_a_target() {
    mdeploy()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ── Input validation ──

#[test]
fn fails_when_settings_file_is_missing() {
    let tmp = TempDir::new().unwrap();

    mdeploy()
        .current_dir(tmp.path())
        .arg("staging")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid path"));
}

#[test]
fn fails_when_settings_fields_are_missing() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("staging.json"),
        r#"{"name": "Example App"}"#,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("staging.config.json"),
        r#"{"buildPath": "/tmp/build"}"#,
    )
    .unwrap();

    mdeploy()
        .current_dir(tmp.path())
        .arg("staging")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROOT_URL, PORT, MONGO_URL"));
}

#[test]
fn relative_settings_path_is_absolutized_against_the_working_directory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("staging.json"),
        r#"{"name": "a", "ROOT_URL": "b", "PORT": "c", "MONGO_URL": "d"}"#,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("staging.config.json"),
        r#"{"buildPath": "build"}"#,
    )
    .unwrap();

    // There is no sibling package.json; the reported manifest path sits
    // next to the loaded settings file, so an absolute working-directory
    // path in the error proves the relative input was absolutized.
    let expected = tmp
        .path()
        .canonicalize()
        .unwrap()
        .join("package.json")
        .display()
        .to_string();

    mdeploy()
        .current_dir(tmp.path())
        .args(["staging", "tar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(expected));
}

#[test]
fn fails_when_config_lacks_build_path() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("staging.json"),
        r#"{"name": "a", "ROOT_URL": "b", "PORT": "c", "MONGO_URL": "d"}"#,
    )
    .unwrap();
    std::fs::write(tmp.path().join("staging.config.json"), "{}").unwrap();

    mdeploy()
        .current_dir(tmp.path())
        .arg("staging")
        .assert()
        .failure()
        .stderr(predicate::str::contains("buildPath"));
}

#[test]
fn source_option_selects_the_file_directory() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(&project).unwrap();
    // Settings exist under --source but are incomplete, so the failure
    // proves they were found there.
    std::fs::write(project.join("staging.json"), "{}").unwrap();
    std::fs::write(
        project.join("staging.config.json"),
        r#"{"buildPath": "/tmp/build"}"#,
    )
    .unwrap();

    mdeploy()
        .current_dir(tmp.path())
        .args(["staging", "--source"])
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must include"));
}

#[test]
fn rejects_unknown_action() {
    mdeploy()
        .args(["staging", "upload"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
