//! Error types for teardown operations.
//!
//! Backend failures are classified by [`DeletionErrorKind`] so callers can
//! report them precisely. The multi-resource teardown path treats every kind
//! the same way (logged, never escalated).

use std::path::PathBuf;
use std::process::Output;
use thiserror::Error;

/// Classification of a failed deletion, derived from backend output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionErrorKind {
    /// The object did not exist
    NotFound,
    /// The backend could not be reached (network, auth, daemon down)
    Unavailable,
    /// The backend refused the request (forbidden, invalid)
    Rejected,
    /// Anything else
    Other,
}

impl DeletionErrorKind {
    /// Classify stderr from `kubectl` or `docker`.
    pub fn from_output(stderr: &str) -> Self {
        let lower = stderr.to_lowercase();

        if lower.contains("notfound")
            || lower.contains("not found")
            || lower.contains("no such container")
        {
            Self::NotFound
        } else if lower.contains("connection refused")
            || lower.contains("was refused")
            || lower.contains("unable to connect")
            || lower.contains("i/o timeout")
            || lower.contains("no route to host")
            || lower.contains("cannot connect to the docker daemon")
            || lower.contains("unauthorized")
        {
            Self::Unavailable
        } else if lower.contains("forbidden") || lower.contains("invalid") {
            Self::Rejected
        } else {
            Self::Other
        }
    }

    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::Unavailable => "backend unavailable",
            Self::Rejected => "rejected",
            Self::Other => "failed",
        }
    }
}

/// Errors that can occur while tearing down a workload.
#[derive(Debug, Error)]
pub enum Error {
    /// Deployment manifest does not exist
    #[error("Cannot delete deployment. Deployment manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Probing the manifest path failed for a reason other than absence
    #[error("Error checking status of {}", .path.display())]
    StatusCheck {
        /// Path being probed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The cluster or container runtime failed to delete a resource
    #[error("{command} delete failed for {resource}: {message}")]
    BackendDeletion {
        /// Backend command (`kubectl`, `docker`)
        command: String,
        /// Resource being deleted, rendered as `kind name`
        resource: String,
        /// Classification of the failure
        kind: DeletionErrorKind,
        /// Backend output
        message: String,
    },

    /// Manifest could not be parsed as YAML
    #[error("invalid deployment manifest {}: {message}", .path.display())]
    ManifestParse {
        /// Manifest path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Manifest parsed but lacks a required field
    #[error("deployment manifest {} is missing `{field}`", .path.display())]
    ManifestInvalid {
        /// Manifest path
        path: PathBuf,
        /// Missing field
        field: &'static str,
    },

    /// Backend executable is not installed
    #[error("{0} not found in PATH")]
    CommandNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a backend deletion error, classifying the output.
    pub fn deletion(command: &str, resource: impl Into<String>, stderr: &str) -> Self {
        Self::BackendDeletion {
            command: command.to_string(),
            resource: resource.into(),
            kind: DeletionErrorKind::from_output(stderr),
            message: stderr.trim().to_string(),
        }
    }

    /// Create a backend deletion error from a command that exited non-zero.
    ///
    /// The message is stderr, else stdout, else the exit status.
    pub fn command_failed(command: &str, resource: impl Into<String>, output: &Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);

        let message = if !stderr.trim().is_empty() {
            stderr.into_owned()
        } else if !stdout.trim().is_empty() {
            stdout.into_owned()
        } else {
            format!("exited with {}", output.status)
        };
        Self::deletion(command, resource, &message)
    }

    /// Classification for backend failures, `None` for other errors.
    pub fn deletion_kind(&self) -> Option<DeletionErrorKind> {
        match self {
            Self::BackendDeletion { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if the error came from a backend call.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::BackendDeletion { .. } | Self::CommandNotFound(_))
    }

    /// Returns true if the resource was already gone.
    pub fn is_not_found(&self) -> bool {
        self.deletion_kind() == Some(DeletionErrorKind::NotFound)
    }
}

/// Result type for teardown operations
pub type Result<T> = std::result::Result<T, Error>;
