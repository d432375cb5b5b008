//! Backend selection.

use crate::types::BackendMode;

/// The teardown path a request takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Stop the container on the local runtime
    LocalRuntime,
    /// Delete objects from the cluster
    Cluster,
}

/// Pick the backend for a configured mode. Unset means local.
pub fn select(mode: Option<BackendMode>) -> Backend {
    match mode.unwrap_or_default() {
        BackendMode::Local => Backend::LocalRuntime,
        BackendMode::Cluster => Backend::Cluster,
    }
}
