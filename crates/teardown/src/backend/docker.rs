//! docker backend implementation.

use std::process::{Command, Stdio};

use crate::error::{Error, Result};

use super::ContainerRuntime;

/// Container runtime using the `docker` CLI.
pub struct Docker {
    program: String,
}

impl Docker {
    /// Use `docker` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("docker")
    }

    /// Use a specific docker-compatible executable (e.g. `podman`).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Docker {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for Docker {
    fn stop(&self, name: &str, dry_run: bool) -> Result<()> {
        let args = ["stop", name];

        if dry_run {
            log::info!("[Dry run] {} {}", self.program, args.join(" "));
            return Ok(());
        }

        log::debug!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::CommandNotFound(self.program.clone())
                } else {
                    Error::Io(e)
                }
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::command_failed(
                &self.program,
                format!("container {name}"),
                &output,
            ))
        }
    }

    fn command_name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_does_not_execute() {
        let docker = Docker::with_program("/nonexistent/docker");
        assert!(docker.stop("app-dev", true).is_ok());
    }

    #[test]
    fn test_missing_binary() {
        let docker = Docker::with_program("/nonexistent/docker");
        let err = docker.stop("app-dev", false).unwrap_err();
        assert!(matches!(err, Error::CommandNotFound(p) if p == "/nonexistent/docker"));
    }

    #[test]
    #[cfg(unix)]
    fn test_failed_exit_without_output() {
        let docker = Docker::with_program("false");
        let err = docker.stop("app-dev", false).unwrap_err();

        assert!(err.is_backend());
        assert!(err.to_string().starts_with("false delete failed for container app-dev: exited with"));
    }

    #[test]
    fn test_command_name_is_program() {
        assert_eq!(Docker::with_program("podman").command_name(), "podman");
    }
}
