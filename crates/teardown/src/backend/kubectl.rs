//! kubectl backend implementation.
//!
//! Shells out to `kubectl delete <kind> <name> --namespace <ns>`.

use std::process::Command;

use crate::error::{Error, Result};
use crate::types::ResourceRef;

use super::ClusterClient;

/// Cluster client using the `kubectl` CLI.
pub struct Kubectl {
    program: String,
}

impl Kubectl {
    /// Use `kubectl` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("kubectl")
    }

    /// Use a specific kubectl executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for deleting one resource.
    pub fn delete_args(namespace: &str, resource: &ResourceRef) -> Vec<String> {
        vec![
            "delete".to_string(),
            resource.kind.as_str().to_string(),
            resource.name.clone(),
            "--namespace".to_string(),
            namespace.to_string(),
        ]
    }

    fn run_kubectl(&self, args: &[String], resource: &ResourceRef) -> Result<String> {
        log::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::CommandNotFound(self.program.clone())
            } else {
                Error::Io(e)
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(Error::command_failed(&self.program, resource.to_string(), &output))
        }
    }
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterClient for Kubectl {
    fn delete(&self, namespace: &str, resource: &ResourceRef, dry_run: bool) -> Result<String> {
        let args = Self::delete_args(namespace, resource);

        if dry_run {
            log::info!("[Dry run] {} {}", self.program, args.join(" "));
            return Ok(String::new());
        }

        self.run_kubectl(&args, resource)
    }

    fn command_name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceKind;

    #[test]
    fn test_delete_args() {
        let r = ResourceRef::new(ResourceKind::Ingress, "myapp-ingress");
        assert_eq!(
            Kubectl::delete_args("dev", &r),
            vec!["delete", "ingress", "myapp-ingress", "--namespace", "dev"]
        );
    }

    #[test]
    fn test_dry_run_does_not_execute() {
        // A program that cannot exist proves no process was spawned
        let kubectl = Kubectl::with_program("/nonexistent/kubectl");
        let r = ResourceRef::new(ResourceKind::Service, "myapp-service");
        assert_eq!(kubectl.delete("default", &r, true).unwrap(), "");
    }

    #[test]
    #[cfg(unix)]
    fn test_failed_exit_without_output() {
        let kubectl = Kubectl::with_program("false");
        let r = ResourceRef::new(ResourceKind::Deployment, "web");
        let err = kubectl.delete("default", &r, false).unwrap_err();

        assert!(matches!(&err, Error::BackendDeletion { command, .. } if command == "false"));
        assert!(err.to_string().contains("deployment web: exited with"));
    }

    #[test]
    fn test_command_name_is_program() {
        let kubectl = Kubectl::with_program("/opt/bin/kubectl");
        assert_eq!(kubectl.command_name(), "/opt/bin/kubectl");
    }

    #[test]
    fn test_missing_binary() {
        let kubectl = Kubectl::with_program("/nonexistent/kubectl");
        let r = ResourceRef::new(ResourceKind::Deployment, "myapp");
        let err = kubectl.delete("default", &r, false).unwrap_err();
        assert!(matches!(err, Error::CommandNotFound(_)));
    }
}
