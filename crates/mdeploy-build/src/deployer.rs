use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use mdeploy_core::{AppSettings, DeployConfig, manifest};

use crate::dockerfile::DockerfileGenerator;
use crate::error::DeployError;
use crate::launcher;
use crate::runner::{ProcessRunner, RealRunner};

/// Orchestrates the build pipeline for one (settings, config) pair.
///
/// Construction derives `app_name`, `bundle_path`, and `dockerfile_path`
/// once; no I/O happens until a pipeline step runs. The cached package
/// version makes this type `!Sync` — one `Deployer` per run, never shared
/// across threads.
pub struct Deployer<R: ProcessRunner = RealRunner> {
    settings: AppSettings,
    config: DeployConfig,
    app_name: String,
    bundle_path: PathBuf,
    dockerfile_path: PathBuf,
    package_version: OnceCell<String>,
    runner: R,
}

impl Deployer<RealRunner> {
    pub fn new(settings: AppSettings, config: DeployConfig) -> Self {
        Self::with_runner(settings, config, RealRunner)
    }
}

impl<R: ProcessRunner> Deployer<R> {
    pub fn with_runner(settings: AppSettings, config: DeployConfig, runner: R) -> Self {
        let app_name = sanitize_app_name(&settings.name);
        let bundle_path = config.build_path.join(&app_name).join("bundle");
        let dockerfile_path = bundle_path.join("Dockerfile");
        Self {
            settings,
            config,
            app_name,
            bundle_path,
            dockerfile_path,
            package_version: OnceCell::new(),
            runner,
        }
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    pub fn dockerfile_path(&self) -> &Path {
        &self.dockerfile_path
    }

    /// Application version from the `package.json` next to the settings
    /// file. Resolved on first call and cached for the Deployer's lifetime;
    /// later calls return the cached value even if the file changed.
    pub fn package_version(&self) -> Result<String, DeployError> {
        if let Some(version) = self.package_version.get() {
            return Ok(version.clone());
        }
        let version = manifest::sibling_package_version(&self.settings.source_path)?;
        let _ = self.package_version.set(version.clone());
        Ok(version)
    }

    /// Run the full bundle pipeline: build, copy settings, write the
    /// launcher manifest, write the Dockerfile. Fail-fast, no rollback.
    pub fn build(&self) -> Result<(), DeployError> {
        tracing::info!("building");
        self.create_build()?;
        self.copy_settings()?;
        let version = self.package_version()?;
        self.create_package_file(&version)?;
        self.create_dockerfile()?;
        tracing::info!("done building");
        Ok(())
    }

    /// Invoke the external build tool to produce the bundle under
    /// `<build_path>/<app_name>`.
    pub fn create_build(&self) -> Result<(), DeployError> {
        tracing::info!("creating bundle");
        if !self.config.build_path.exists() {
            std::fs::create_dir_all(&self.config.build_path).map_err(|e| {
                DeployError::CreateDir {
                    path: self.config.build_path.clone(),
                    source: e,
                }
            })?;
        }
        ensure_writable(&self.config.build_path)?;

        let destination = self.config.build_path.join(&self.app_name);
        let server = format!("{}:{}", self.settings.root_url, self.settings.port);
        let args = vec![
            "build".to_owned(),
            "--allow-superuser".to_owned(),
            "--architecture=os.linux.x86_64".to_owned(),
            "--server-only".to_owned(),
            "--directory".to_owned(),
            destination.to_string_lossy().into_owned(),
            "--server".to_owned(),
            server,
        ];
        // meteor must run from the project root, where the config file lives.
        self.runner
            .run_streaming("meteor", &args, dir_if_not_cwd(self.config.source_dir()))?;

        tracing::info!(destination = %destination.display(), "bundle created");
        Ok(())
    }

    /// Copy the settings file into the bundle root as `settings.json`,
    /// overwriting any previous copy.
    pub fn copy_settings(&self) -> Result<(), DeployError> {
        tracing::info!("copying settings file");
        ensure_writable(&self.config.build_path)?;

        let destination = self.bundle_path.join("settings.json");
        std::fs::copy(&self.settings.source_path, &destination).map_err(|e| {
            DeployError::CopySettings {
                path: destination.clone(),
                source: e,
            }
        })?;

        tracing::info!(
            from = %self.settings.source_path.display(),
            to = %destination.display(),
            "settings copied"
        );
        Ok(())
    }

    /// Write the launcher `package.json` at the root of the bundle.
    pub fn create_package_file(&self, version: &str) -> Result<(), DeployError> {
        tracing::info!("creating package.json");
        let destination = self.bundle_path.join("package.json");
        std::fs::write(&destination, launcher::render(version)).map_err(|e| {
            DeployError::Write {
                path: destination.clone(),
                source: e,
            }
        })?;

        tracing::info!(path = %destination.display(), "package.json created");
        Ok(())
    }

    /// Write the Dockerfile at the root of the bundle.
    pub fn create_dockerfile(&self) -> Result<(), DeployError> {
        tracing::info!("creating Dockerfile");
        let content = DockerfileGenerator::new(&self.settings).render();
        std::fs::write(&self.dockerfile_path, content).map_err(|e| DeployError::Write {
            path: self.dockerfile_path.clone(),
            source: e,
        })?;

        tracing::info!(path = %self.dockerfile_path.display(), "Dockerfile created");
        Ok(())
    }

    /// Probe for a docker executable on the PATH. Absence is an expected
    /// outcome, not an error.
    pub fn docker_is_installed(&self) -> bool {
        match self.runner.run_capture("which", &["docker".to_owned()]) {
            Ok(output) => !output.trim().is_empty(),
            Err(_) => false,
        }
    }

    /// Build a docker image from the bundle's Dockerfile, tagged
    /// `<app_name>:<tag>`.
    pub fn docker_build(&self, tag: &str) -> Result<(), DeployError> {
        tracing::info!("creating docker image");
        ensure_readable(&self.config.build_path)?;

        let image = format!("{}:{}", self.app_name, tag);
        let args = vec![
            "build".to_owned(),
            ".".to_owned(),
            "--tag".to_owned(),
            image.clone(),
        ];
        self.runner
            .run_streaming("docker", &args, dir_if_not_cwd(&self.bundle_path))?;

        tracing::info!(%image, "docker image created");
        Ok(())
    }

    /// Compress the bundle into `<build_path>/<app_name>/<app_name>_<version>.tar`.
    ///
    /// Returns the archive path if the file exists after the tar
    /// invocation. Archive-tool failure is soft: it produces `None`, not an
    /// error, unlike every other step in the pipeline.
    pub fn tar_bundle(
        &self,
        bundle_path: &Path,
        build_path: &Path,
        version: &str,
    ) -> Result<Option<PathBuf>, DeployError> {
        tracing::info!("creating tar");
        ensure_readable(bundle_path)?;
        ensure_readable(build_path)?;

        let filename = format!("{}_{}.tar", self.app_name, version);
        let destination = self.config.build_path.join(&self.app_name).join(filename);
        let args = vec![
            "-C".to_owned(),
            bundle_path.to_string_lossy().into_owned(),
            "-czf".to_owned(),
            destination.to_string_lossy().into_owned(),
            ".".to_owned(),
        ];
        if let Err(error) = self.runner.run_streaming("tar", &args, None) {
            tracing::warn!(%error, "archive tool failed");
        }

        if destination.exists() {
            Ok(Some(destination))
        } else {
            Ok(None)
        }
    }
}

/// Lowercase the application name and strip every character outside
/// `[a-z0-9-_]`. Deterministic and idempotent.
pub fn sanitize_app_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// The directory to run an external tool from, or `None` when the current
/// working directory already is that directory.
fn dir_if_not_cwd(dir: &Path) -> Option<PathBuf> {
    match std::env::current_dir() {
        Ok(cwd) if cwd == dir => None,
        _ => Some(dir.to_path_buf()),
    }
}

fn ensure_writable(path: &Path) -> Result<(), DeployError> {
    let metadata = std::fs::metadata(path).map_err(|_| DeployError::PermissionDenied {
        path: path.to_path_buf(),
    })?;
    if metadata.permissions().readonly() {
        return Err(DeployError::PermissionDenied {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn ensure_readable(path: &Path) -> Result<(), DeployError> {
    std::fs::read_dir(path)
        .map(|_| ())
        .map_err(|_| DeployError::PermissionDenied {
            path: path.to_path_buf(),
        })
}
