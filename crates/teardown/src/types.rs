use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Manifest file name used when none is given.
pub const DEFAULT_MANIFEST: &str = "app-deploy.yaml";

/// Which execution environment receives teardown calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Local container runtime (docker)
    #[default]
    Local,
    /// Kubernetes-style cluster (kubectl)
    Cluster,
}

impl BackendMode {
    /// Build a mode from a "run against the cluster" flag.
    pub fn from_cluster_flag(cluster: bool) -> Self {
        if cluster { Self::Cluster } else { Self::Local }
    }
}

/// What a teardown request points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A deployment manifest on disk
    Manifest(PathBuf),
    /// A base resource name; companion names are derived from it
    BaseName(String),
}

/// A single teardown invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownRequest {
    /// What to remove
    pub target: Target,
    /// Cluster namespace
    pub namespace: String,
    /// Log instead of mutating
    pub dry_run: bool,
    /// Configured backend
    pub mode: BackendMode,
}

impl TeardownRequest {
    /// Request against a deployment manifest, in the default namespace.
    pub fn manifest(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Manifest(path.into()),
            namespace: DEFAULT_NAMESPACE.to_string(),
            dry_run: false,
            mode: BackendMode::Cluster,
        }
    }

    /// Request against a base name, on the local backend.
    pub fn base_name(name: impl Into<String>) -> Self {
        Self {
            target: Target::BaseName(name.into()),
            namespace: DEFAULT_NAMESPACE.to_string(),
            dry_run: false,
            mode: BackendMode::Local,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set dry-run.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the backend mode.
    pub fn with_mode(mut self, mode: BackendMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Kind of object being deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Cluster ingress
    Ingress,
    /// Cluster service
    Service,
    /// Cluster deployment
    Deployment,
    /// Local container
    Container,
    /// Any other kind, as spelled in a manifest
    Other(String),
}

impl ResourceKind {
    /// Parse a manifest `kind` field.
    pub fn parse(kind: &str) -> Self {
        match kind.to_lowercase().as_str() {
            "ingress" => Self::Ingress,
            "service" => Self::Service,
            "deployment" => Self::Deployment,
            _ => Self::Other(kind.to_string()),
        }
    }

    /// Name passed to the backend CLI.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ingress => "ingress",
            Self::Service => "service",
            Self::Deployment => "deployment",
            Self::Container => "container",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One object to delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceRef {
    /// Object kind
    pub kind: ResourceKind,
    /// Object name
    pub name: String,
}

impl ResourceRef {
    /// Create a new reference.
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Reference to a local container.
    pub fn container(name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Container, name)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Workload identity read from a deployment manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadDescriptor {
    /// Resource kind, e.g. `Deployment` or a custom resource kind
    pub kind: String,
    /// `metadata.name`
    pub name: String,
    /// `metadata.namespace`, if the manifest pins one
    pub namespace: Option<String>,
}

impl WorkloadDescriptor {
    /// The object this descriptor identifies.
    pub fn resource(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::parse(&self.kind), &self.name)
    }
}

/// Result of one deletion attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceOutcome {
    /// Resource attempted
    pub resource: ResourceRef,
    /// Error message if the deletion failed
    pub error: Option<String>,
}

impl ResourceOutcome {
    /// Returns true if the deletion succeeded.
    pub fn is_deleted(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated result of a teardown sequence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeardownOutcome {
    /// Per-resource results, in attempt order
    pub results: Vec<ResourceOutcome>,
    /// Whether the run was simulated
    pub dry_run: bool,
}

impl TeardownOutcome {
    /// Record a successful deletion.
    pub fn add_success(&mut self, resource: ResourceRef) {
        self.results.push(ResourceOutcome {
            resource,
            error: None,
        });
    }

    /// Record a failed deletion.
    pub fn add_failure(&mut self, resource: ResourceRef, error: String) {
        self.results.push(ResourceOutcome {
            resource,
            error: Some(error),
        });
    }

    /// Number of resources attempted.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of successful deletions.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_deleted()).count()
    }

    /// Failed deletions.
    pub fn failures(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.results.iter().filter(|r| !r.is_deleted())
    }

    /// Returns true if every deletion succeeded.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Look up the outcome for a resource kind.
    pub fn get(&self, kind: &ResourceKind) -> Option<&ResourceOutcome> {
        self.results.iter().find(|r| &r.resource.kind == kind)
    }
}
