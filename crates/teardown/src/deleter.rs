//! Deletion of a single workload identified by its deployment manifest.
//!
//! Unlike the companion-resource sequence, every failure here is fatal: the
//! manifest is the only source of the workload's identity.

use std::path::Path;

use crate::backend::{ClusterClient, FileProbe};
use crate::error::{Error, Result};
use crate::manifest::ManifestReader;
use crate::report::Reporter;

/// Deletes the workload a manifest describes.
pub struct ManifestDeleter<'a> {
    cluster: &'a dyn ClusterClient,
    probe: &'a dyn FileProbe,
    reader: &'a dyn ManifestReader,
    reporter: &'a dyn Reporter,
}

impl<'a> ManifestDeleter<'a> {
    /// Create a deleter over the given collaborators.
    pub fn new(
        cluster: &'a dyn ClusterClient,
        probe: &'a dyn FileProbe,
        reader: &'a dyn ManifestReader,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            cluster,
            probe,
            reader,
            reporter,
        }
    }

    /// Delete the workload described by `manifest_path`.
    ///
    /// Outside dry-run the manifest must exist; the cluster is never
    /// contacted otherwise. In dry-run the existence check and the backend
    /// call are both skipped, so this works on projects that never
    /// generated a manifest. Backend errors are returned unchanged.
    pub fn delete_by_manifest(&self, manifest_path: &Path, namespace: &str, dry_run: bool) -> Result<()> {
        if !dry_run {
            let exists = self
                .probe
                .exists(manifest_path)
                .map_err(|source| Error::StatusCheck {
                    path: manifest_path.to_path_buf(),
                    source,
                })?;
            if !exists {
                return Err(Error::ManifestNotFound(manifest_path.to_path_buf()));
            }
        }

        self.reporter.info(&format!(
            "Deleting deployment using deployment manifest {}",
            manifest_path.display()
        ));

        if dry_run {
            self.cluster.simulate_manifest_delete(namespace, manifest_path);
        } else {
            let workload = self.reader.read(manifest_path)?;
            let namespace = match workload.namespace.as_deref() {
                Some(pinned) if pinned != namespace => {
                    self.reporter.warn(&format!(
                        "Manifest {} pins namespace {pinned}, ignoring --namespace {namespace}",
                        manifest_path.display()
                    ));
                    pinned
                }
                _ => namespace,
            };

            let output = self
                .cluster
                .delete(namespace, &workload.resource(), false)?;
            if !output.trim().is_empty() {
                log::debug!("{}", output.trim());
            }
        }

        self.reporter.info("Deployment deleted");
        Ok(())
    }
}
