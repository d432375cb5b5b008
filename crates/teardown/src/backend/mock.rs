//! In-memory collaborators for testing without docker or a cluster.
//!
//! Each mock records the calls it receives and can be configured to fail.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{ClusterClient, ContainerRuntime, FileProbe};
use crate::error::{Error, Result};
use crate::types::{ResourceKind, ResourceRef};

/// A recorded `ClusterClient::delete` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCall {
    /// Namespace passed
    pub namespace: String,
    /// Resource passed
    pub resource: ResourceRef,
    /// Dry-run flag passed
    pub dry_run: bool,
}

/// Cluster client that records deletions.
#[derive(Debug, Clone, Default)]
pub struct MockCluster {
    calls: Arc<Mutex<Vec<DeleteCall>>>,
    simulated: Arc<Mutex<Vec<(String, PathBuf)>>>,
    failures: Arc<Mutex<HashMap<ResourceKind, String>>>,
}

impl MockCluster {
    /// Create a cluster where every deletion succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deletions of `kind` fail with the given backend output.
    pub fn fail_on(&self, kind: ResourceKind, stderr: impl Into<String>) {
        let mut failures = self.failures.lock().unwrap();
        failures.insert(kind, stderr.into());
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<DeleteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(namespace, manifest)` for each simulated manifest deletion.
    pub fn simulated(&self) -> Vec<(String, PathBuf)> {
        self.simulated.lock().unwrap().clone()
    }
}

impl ClusterClient for MockCluster {
    fn delete(&self, namespace: &str, resource: &ResourceRef, dry_run: bool) -> Result<String> {
        self.calls.lock().unwrap().push(DeleteCall {
            namespace: namespace.to_string(),
            resource: resource.clone(),
            dry_run,
        });

        let failures = self.failures.lock().unwrap();
        match failures.get(&resource.kind) {
            Some(stderr) => Err(Error::deletion("kubectl", resource.to_string(), stderr)),
            None => Ok(format!("{} \"{}\" deleted", resource.kind, resource.name)),
        }
    }

    fn simulate_manifest_delete(&self, namespace: &str, manifest: &Path) {
        self.simulated
            .lock()
            .unwrap()
            .push((namespace.to_string(), manifest.to_path_buf()));
    }
}

/// Container runtime that records stops.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    stopped: Arc<Mutex<Vec<(String, bool)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockRuntime {
    /// Create a runtime where every stop succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every stop fail with the given backend output.
    pub fn fail_with(&self, stderr: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(stderr.into());
    }

    /// `(name, dry_run)` for each stop received.
    pub fn stopped(&self) -> Vec<(String, bool)> {
        self.stopped.lock().unwrap().clone()
    }
}

impl ContainerRuntime for MockRuntime {
    fn stop(&self, name: &str, dry_run: bool) -> Result<()> {
        self.stopped
            .lock()
            .unwrap()
            .push((name.to_string(), dry_run));

        match self.failure.lock().unwrap().as_deref() {
            Some(stderr) => Err(Error::deletion("docker", format!("container {name}"), stderr)),
            None => Ok(()),
        }
    }
}

/// File probe with a fixed answer.
#[derive(Debug, Clone)]
pub struct MockProbe {
    answer: std::result::Result<bool, io::ErrorKind>,
    probed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockProbe {
    /// Every path exists.
    pub fn present() -> Self {
        Self::answering(Ok(true))
    }

    /// No path exists.
    pub fn absent() -> Self {
        Self::answering(Ok(false))
    }

    /// Every check fails with an I/O error of `kind`.
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self::answering(Err(kind))
    }

    fn answering(answer: std::result::Result<bool, io::ErrorKind>) -> Self {
        Self {
            answer,
            probed: Arc::default(),
        }
    }

    /// Paths probed so far.
    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

impl FileProbe for MockProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        self.answer.map_err(|kind| io::Error::new(kind, "probe failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_cluster_failure() {
        let cluster = MockCluster::new();
        cluster.fail_on(ResourceKind::Service, "dial tcp: i/o timeout");

        let svc = ResourceRef::new(ResourceKind::Service, "x-service");
        let err = cluster.delete("default", &svc, false).unwrap_err();
        assert!(err.is_backend());

        let dep = ResourceRef::new(ResourceKind::Deployment, "x");
        assert!(cluster.delete("default", &dep, false).is_ok());
        assert_eq!(cluster.call_count(), 2);
    }

    #[test]
    fn test_mock_probe_records() {
        let probe = MockProbe::failing(io::ErrorKind::PermissionDenied);
        assert!(probe.exists(Path::new("a.yaml")).is_err());
        assert_eq!(probe.probed(), vec![PathBuf::from("a.yaml")]);
    }
}
