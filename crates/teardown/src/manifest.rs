//! Deployment manifest reader.
//!
//! A manifest may hold several YAML documents; the first one carrying both
//! `kind` and `metadata.name` identifies the workload.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::WorkloadDescriptor;

/// Resolves a manifest file to the workload it describes.
pub trait ManifestReader: Send + Sync {
    /// Read the workload identity from `path`.
    fn read(&self, path: &Path) -> Result<WorkloadDescriptor>;
}

#[derive(Debug, Deserialize)]
struct Document {
    kind: Option<String>,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    name: Option<String>,
    namespace: Option<String>,
}

/// Reads YAML manifests from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlManifestReader;

impl YamlManifestReader {
    /// Parse manifest contents. `path` is only used for error context.
    pub fn parse(path: &Path, contents: &str) -> Result<WorkloadDescriptor> {
        let mut saw_kind = false;

        for document in serde_yaml::Deserializer::from_str(contents) {
            let value = serde_yaml::Value::deserialize(document).map_err(|e| {
                Error::ManifestParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;

            // Empty documents between separators
            if value.is_null() {
                continue;
            }

            let doc: Document =
                serde_yaml::from_value(value).map_err(|e| Error::ManifestParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;

            let Some(kind) = doc.kind else { continue };
            saw_kind = true;

            if let Some(name) = doc.metadata.name {
                return Ok(WorkloadDescriptor {
                    kind,
                    name,
                    namespace: doc.metadata.namespace,
                });
            }
        }

        Err(Error::ManifestInvalid {
            path: path.to_path_buf(),
            field: if saw_kind { "metadata.name" } else { "kind" },
        })
    }
}

impl ManifestReader for YamlManifestReader {
    fn read(&self, path: &Path) -> Result<WorkloadDescriptor> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ManifestNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(path, &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const APP_DEPLOY: &str = r#"
apiVersion: appsody.dev/v1beta1
kind: AppsodyApplication
metadata:
  name: nodejs-express
  namespace: staging
spec:
  applicationImage: dev.local/nodejs-express
"#;

    #[test]
    fn test_parse_custom_resource() {
        let desc = YamlManifestReader::parse(Path::new("app-deploy.yaml"), APP_DEPLOY).unwrap();
        assert_eq!(desc.kind, "AppsodyApplication");
        assert_eq!(desc.name, "nodejs-express");
        assert_eq!(desc.namespace.as_deref(), Some("staging"));
    }

    #[test]
    fn test_parse_multi_document() {
        let contents = "---\n---\napiVersion: v1\nkind: Deployment\nmetadata:\n  name: web\n---\nkind: Service\nmetadata:\n  name: web-service\n";
        let desc = YamlManifestReader::parse(Path::new("m.yaml"), contents).unwrap();
        assert_eq!(desc.kind, "Deployment");
        assert_eq!(desc.name, "web");
        assert_eq!(desc.namespace, None);
    }

    #[test]
    fn test_missing_name() {
        let err = YamlManifestReader::parse(Path::new("m.yaml"), "kind: Deployment\n").unwrap_err();
        assert!(matches!(err, Error::ManifestInvalid { field: "metadata.name", .. }));
    }

    #[test]
    fn test_missing_kind() {
        let err =
            YamlManifestReader::parse(Path::new("m.yaml"), "metadata:\n  name: x\n").unwrap_err();
        assert!(matches!(err, Error::ManifestInvalid { field: "kind", .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = YamlManifestReader::parse(Path::new("m.yaml"), "kind: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("app-deploy.yaml");
        std::fs::write(&path, APP_DEPLOY).unwrap();

        let desc = YamlManifestReader.read(&path).unwrap();
        assert_eq!(desc.name, "nodejs-express");

        let missing = dir.path().join("missing.yaml");
        let err = YamlManifestReader.read(&missing).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound(p) if p == PathBuf::from(&missing)));
    }
}
