//! # teardown
//!
//! Removes an application's runtime footprint from a local container
//! runtime or a Kubernetes-style cluster.
//!
//! Two paths exist:
//!
//! - **Manifest-driven**: the workload identity is read from a deployment
//!   manifest and deleted with a single call. Any failure is fatal.
//! - **Name-derived**: a base name implies a container (local runtime) or an
//!   ingress, service and deployment (cluster). Cluster companions are
//!   removed best-effort; failures are reported and the run still succeeds.
//!
//! Dry-run executes all decision and reporting logic and only elides the
//! mutating calls.
//!
//! ## Example
//!
//! ```no_run
//! use teardown::{BackendMode, Client, TeardownRequest};
//!
//! let client = Client::new();
//!
//! let request = TeardownRequest::base_name("nodejs-express")
//!     .with_mode(BackendMode::Cluster)
//!     .with_dry_run(true);
//!
//! let completion = client.execute(&request).expect("teardown failed");
//! println!("{completion:?}");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

/// Collaborator traits and their implementations.
pub mod backend;
/// Manifest-driven deletion.
pub mod deleter;
/// Error types for teardown operations.
pub mod error;
/// Deployment manifest reader.
pub mod manifest;
/// Status reporting.
pub mod report;
/// Companion resource derivation.
pub mod resources;
/// Backend selection.
pub mod selector;
/// Best-effort teardown sequencing.
pub mod sequencer;
/// Request and outcome types.
pub mod types;

pub use error::{DeletionErrorKind, Error, Result};
pub use resources::derive_resources;
pub use selector::{Backend, select};
pub use types::{
    BackendMode, DEFAULT_MANIFEST, DEFAULT_NAMESPACE, ResourceKind, ResourceOutcome, ResourceRef,
    TeardownOutcome, TeardownRequest, Target, WorkloadDescriptor,
};

use serde::Serialize;
use std::path::{Path, PathBuf};

use backend::{
    Backend as _, ClusterBackend, ClusterClient, ContainerRuntime, FileProbe, LocalFs,
    LocalRuntimeBackend,
};
use deleter::ManifestDeleter;
use manifest::{ManifestReader, YamlManifestReader};
use report::{LogReporter, Reporter};

/// External collaborators used by a [`Client`].
pub struct Collaborators {
    /// Cluster deletions
    pub cluster: Box<dyn ClusterClient>,
    /// Local container control
    pub runtime: Box<dyn ContainerRuntime>,
    /// Manifest existence checks
    pub probe: Box<dyn FileProbe>,
    /// Manifest parsing
    pub reader: Box<dyn ManifestReader>,
    /// Status lines
    pub reporter: Box<dyn Reporter>,
}

/// What a completed teardown did.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Completion {
    /// The workload described by this manifest was deleted
    Manifest {
        /// Manifest used
        manifest: PathBuf,
        /// Whether the run was simulated
        dry_run: bool,
    },
    /// The local container was stopped
    Local {
        /// Per-container result
        outcome: TeardownOutcome,
    },
    /// Cluster companions were removed best-effort
    Cluster {
        /// Per-resource results
        outcome: TeardownOutcome,
    },
}

impl Completion {
    /// Per-resource results, if the path produced any.
    pub fn outcome(&self) -> Option<&TeardownOutcome> {
        match self {
            Self::Manifest { .. } => None,
            Self::Local { outcome } | Self::Cluster { outcome } => Some(outcome),
        }
    }
}

/// High-level client for teardown operations.
pub struct Client {
    deps: Collaborators,
}

impl Client {
    /// Create a client using `kubectl` and `docker` from `PATH`.
    #[cfg(feature = "process")]
    pub fn new() -> Self {
        Self::with_programs("kubectl", "docker")
    }

    /// Create a client using specific `kubectl` and `docker` executables.
    #[cfg(feature = "process")]
    pub fn with_programs(kubectl: &str, docker: &str) -> Self {
        Self::with_collaborators(Collaborators {
            cluster: Box::new(backend::kubectl::Kubectl::with_program(kubectl)),
            runtime: Box::new(backend::docker::Docker::with_program(docker)),
            probe: Box::new(LocalFs),
            reader: Box::new(YamlManifestReader),
            reporter: Box::new(LogReporter),
        })
    }

    /// Create a client with custom collaborators (useful for testing).
    pub fn with_collaborators(deps: Collaborators) -> Self {
        Self { deps }
    }

    /// Run a teardown request.
    ///
    /// Manifest targets always go to the cluster. Base-name targets go to
    /// the backend chosen by [`select`] for the request's mode.
    pub fn execute(&self, request: &TeardownRequest) -> Result<Completion> {
        match &request.target {
            Target::Manifest(path) => {
                self.delete_deployment(path, &request.namespace, request.dry_run)?;
                Ok(Completion::Manifest {
                    manifest: path.clone(),
                    dry_run: request.dry_run,
                })
            }
            Target::BaseName(name) => self.stop(name, request),
        }
    }

    /// Delete the workload described by a deployment manifest.
    pub fn delete_deployment(&self, manifest: &Path, namespace: &str, dry_run: bool) -> Result<()> {
        ManifestDeleter::new(
            self.deps.cluster.as_ref(),
            self.deps.probe.as_ref(),
            self.deps.reader.as_ref(),
            self.deps.reporter.as_ref(),
        )
        .delete_by_manifest(manifest, namespace, dry_run)
    }

    /// Remove the cluster companions of `base_name`. Never fails.
    pub fn teardown_cluster(&self, base_name: &str, namespace: &str, dry_run: bool) -> TeardownOutcome {
        let backend = ClusterBackend::new(self.deps.cluster.as_ref());
        sequencer::teardown(
            &backend,
            self.deps.reporter.as_ref(),
            &derive_resources(base_name),
            namespace,
            dry_run,
        )
    }

    fn stop(&self, name: &str, request: &TeardownRequest) -> Result<Completion> {
        match select(Some(request.mode)) {
            Backend::LocalRuntime => {
                self.deps.reporter.info("Stopping development environment");
                let backend = LocalRuntimeBackend::new(self.deps.runtime.as_ref());
                let container = ResourceRef::container(name);
                backend.delete(&container, &request.namespace, request.dry_run)?;

                let mut outcome = TeardownOutcome {
                    dry_run: request.dry_run,
                    ..TeardownOutcome::default()
                };
                outcome.add_success(container);
                Ok(Completion::Local { outcome })
            }
            Backend::Cluster => Ok(Completion::Cluster {
                outcome: self.teardown_cluster(name, &request.namespace, request.dry_run),
            }),
        }
    }
}

#[cfg(feature = "process")]
impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
