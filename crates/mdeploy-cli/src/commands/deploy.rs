use std::path::{Path, PathBuf};

use clap::ValueEnum;
use mdeploy_build::Deployer;
use mdeploy_core::{AppSettings, DeployConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Build the bundle, copy the settings json, and create the launcher
    /// manifest and Dockerfile inside it
    Build,
    /// Run `docker build` with the Dockerfile in the built bundle
    DockerBuild,
    /// Create a tarball of the bundle in the build directory
    Tar,
}

/// Resolve the target's file pair, construct the deployer, and run the
/// requested pipeline steps.
pub fn deploy(target: &str, actions: &[Action], source: Option<&Path>) -> anyhow::Result<()> {
    let settings_path = target_file(target, "json", source);
    let config_path = target_file(target, "config.json", source);

    let settings = AppSettings::load(&settings_path)?;
    let config = DeployConfig::load(&config_path)?;
    let deployer = Deployer::new(settings, config);

    if actions.is_empty() {
        // Full pipeline: build, containerize when docker is present, archive.
        deployer.build()?;
        if deployer.docker_is_installed() {
            deployer.docker_build(&deployer.package_version()?)?;
        }
        archive(&deployer)?;
    } else {
        if actions.contains(&Action::Build) {
            deployer.build()?;
        }
        if actions.contains(&Action::DockerBuild) && deployer.docker_is_installed() {
            deployer.docker_build(&deployer.package_version()?)?;
        }
        if actions.contains(&Action::Tar) {
            archive(&deployer)?;
        }
    }

    Ok(())
}

fn archive(deployer: &Deployer) -> anyhow::Result<()> {
    let version = deployer.package_version()?;
    let archive_path = deployer.tar_bundle(
        deployer.bundle_path(),
        &deployer.config().build_path,
        &version,
    )?;
    match archive_path {
        Some(path) => println!("Archive created at {}", path.display()),
        None => tracing::warn!("no archive was produced"),
    }
    Ok(())
}

fn target_file(target: &str, extension: &str, source: Option<&Path>) -> PathBuf {
    let name = format!("{target}.{extension}");
    match source {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
