//! Bundle build pipeline for mdeploy.
//!
//! # Deploy pipeline
//!
//! ```text
//! mdeploy <target>
//!   1. Bundle        ── meteor build --server-only --directory <buildPath>/<appName>
//!   2. Settings      ── copy <target>.json → bundle/settings.json
//!   3. Manifest      ── launcher::render() → bundle/package.json
//!   4. Dockerfile    ── DockerfileGenerator::render() → bundle/Dockerfile
//!   5. Image (opt)   ── docker build . --tag <appName>:<version>
//!   6. Archive (opt) ── tar -C bundle -czf <appName>_<version>.tar .
//! ```
//!
//! Steps 1-4 are [`Deployer::build`]: a strict fail-fast sequence with no
//! rollback. Steps 5 and 6 are optional tail steps chosen by the caller.
//!
//! All external tools run synchronously through the [`ProcessRunner`] seam
//! with stdio inherited; the exit code is the only signal consumed.

pub mod deployer;
pub mod dockerfile;
pub mod error;
pub mod launcher;
pub mod runner;

pub use deployer::Deployer;
pub use dockerfile::DockerfileGenerator;
pub use error::DeployError;
pub use runner::{ProcessError, ProcessRunner, RealRunner};
