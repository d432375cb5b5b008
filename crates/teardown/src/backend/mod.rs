//! Backend abstraction for teardown operations.
//!
//! The collaborator traits ([`ClusterClient`], [`ContainerRuntime`],
//! [`FileProbe`]) wrap the external tools. [`Backend`] is the uniform
//! deletion interface the sequencer is written against; the selector picks
//! [`LocalRuntimeBackend`] or [`ClusterBackend`] once per request.

use std::path::Path;

use crate::error::Result;
use crate::types::ResourceRef;

#[cfg(feature = "process")]
pub mod docker;
#[cfg(feature = "process")]
pub mod kubectl;
pub mod mock;

/// Deletes named resources from a cluster.
pub trait ClusterClient: Send + Sync {
    /// Delete one resource. Returns the backend output.
    ///
    /// With `dry_run` the mutating call is elided and an empty output returned.
    fn delete(&self, namespace: &str, resource: &ResourceRef, dry_run: bool) -> Result<String>;

    /// Log the command that would delete everything `manifest` describes.
    ///
    /// Never runs anything and never reads the manifest.
    fn simulate_manifest_delete(&self, namespace: &str, manifest: &Path) {
        log::info!(
            "[Dry run] {} delete -f {} --namespace {namespace}",
            self.command_name(),
            manifest.display()
        );
    }

    /// Command name used in log lines.
    fn command_name(&self) -> &str {
        "kubectl"
    }
}

/// Controls single containers on the local runtime.
pub trait ContainerRuntime: Send + Sync {
    /// Stop a container by name.
    fn stop(&self, name: &str, dry_run: bool) -> Result<()>;

    /// Command name used in log lines.
    fn command_name(&self) -> &str {
        "docker"
    }
}

/// Checks whether a path exists.
pub trait FileProbe: Send + Sync {
    /// `Ok(false)` when absent, `Err` only when the check itself failed.
    fn exists(&self, path: &Path) -> std::io::Result<bool>;
}

/// Probe backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileProbe for LocalFs {
    fn exists(&self, path: &Path) -> std::io::Result<bool> {
        path.try_exists()
    }
}

/// Uniform deletion interface over both execution environments.
pub trait Backend {
    /// Delete one resource.
    fn delete(&self, resource: &ResourceRef, namespace: &str, dry_run: bool) -> Result<()>;

    /// Command name used in log lines.
    fn command_name(&self) -> &str;
}

/// Deletes by stopping containers on the local runtime.
///
/// Containers run with `--rm`, so stopping one removes it.
pub struct LocalRuntimeBackend<'a> {
    runtime: &'a dyn ContainerRuntime,
}

impl<'a> LocalRuntimeBackend<'a> {
    /// Wrap a container runtime.
    pub fn new(runtime: &'a dyn ContainerRuntime) -> Self {
        Self { runtime }
    }
}

impl Backend for LocalRuntimeBackend<'_> {
    fn delete(&self, resource: &ResourceRef, _namespace: &str, dry_run: bool) -> Result<()> {
        self.runtime.stop(&resource.name, dry_run)
    }

    fn command_name(&self) -> &str {
        self.runtime.command_name()
    }
}

/// Deletes named resources from the cluster.
pub struct ClusterBackend<'a> {
    client: &'a dyn ClusterClient,
}

impl<'a> ClusterBackend<'a> {
    /// Wrap a cluster client.
    pub fn new(client: &'a dyn ClusterClient) -> Self {
        Self { client }
    }
}

impl Backend for ClusterBackend<'_> {
    fn delete(&self, resource: &ResourceRef, namespace: &str, dry_run: bool) -> Result<()> {
        let output = self.client.delete(namespace, resource, dry_run)?;
        if !output.trim().is_empty() {
            log::debug!("{}", output.trim());
        }
        Ok(())
    }

    fn command_name(&self) -> &str {
        self.client.command_name()
    }
}
