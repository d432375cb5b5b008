//! Best-effort removal of independent resources.
//!
//! Every resource is attempted in order. A failure is reported with its
//! kind and name at the point it happens and recorded in the outcome; it
//! never stops the remaining deletions and never escalates to the caller.

use crate::backend::Backend;
use crate::error::Error;
use crate::report::Reporter;
use crate::types::{ResourceRef, TeardownOutcome};

/// Delete each resource in order, collecting one result per resource.
///
/// In dry-run mode the backend still receives every call with `dry_run`
/// set, so the sequence and its reporting are identical to a real run.
pub fn teardown(
    backend: &dyn Backend,
    reporter: &dyn Reporter,
    resources: &[ResourceRef],
    namespace: &str,
    dry_run: bool,
) -> TeardownOutcome {
    let initial = TeardownOutcome {
        results: Vec::with_capacity(resources.len()),
        dry_run,
    };

    resources.iter().fold(initial, |mut outcome, resource| {
        log::debug!("Deleting {resource} in namespace {namespace}");

        match backend.delete(resource, namespace, dry_run) {
            Ok(()) => outcome.add_success(resource.clone()),
            Err(err) => {
                let cause = failure_cause(&err);
                reporter.error(&format!(
                    "{} delete failed for {} {}, due to {}",
                    backend.command_name(),
                    resource.kind,
                    resource.name,
                    cause
                ));
                outcome.add_failure(resource.clone(), cause);
            }
        }
        outcome
    })
}

fn failure_cause(err: &Error) -> String {
    match err {
        Error::BackendDeletion { kind, message, .. } if message.is_empty() => {
            kind.label().to_string()
        }
        Error::BackendDeletion { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClusterBackend;
    use crate::backend::mock::MockCluster;
    use crate::report::{Level, RecordingReporter};
    use crate::resources::derive_resources;
    use crate::types::ResourceKind;

    #[test]
    fn test_all_succeed() {
        let cluster = MockCluster::new();
        let reporter = RecordingReporter::new();
        let resources = derive_resources("myapp");

        let outcome = teardown(
            &ClusterBackend::new(&cluster),
            &reporter,
            &resources,
            "default",
            false,
        );

        assert!(outcome.is_success());
        assert_eq!(outcome.len(), 3);
        assert!(reporter.messages(Level::Error).is_empty());
        let order: Vec<_> = cluster.calls().into_iter().map(|c| c.resource).collect();
        assert_eq!(order, resources);
    }

    #[test]
    fn test_first_failure_does_not_stop_sequence() {
        let cluster = MockCluster::new();
        cluster.fail_on(
            ResourceKind::Ingress,
            r#"Error from server (NotFound): ingresses.networking.k8s.io "myapp-ingress" not found"#,
        );
        let reporter = RecordingReporter::new();

        let outcome = teardown(
            &ClusterBackend::new(&cluster),
            &reporter,
            &derive_resources("myapp"),
            "default",
            false,
        );

        assert_eq!(cluster.call_count(), 3);
        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.succeeded(), 2);
        assert!(!outcome.get(&ResourceKind::Ingress).unwrap().is_deleted());

        let errors = reporter.messages(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("kubectl delete failed for ingress myapp-ingress, due to"));
    }

    #[test]
    fn test_every_failure_recorded() {
        let cluster = MockCluster::new();
        for kind in [
            ResourceKind::Ingress,
            ResourceKind::Service,
            ResourceKind::Deployment,
        ] {
            cluster.fail_on(kind, "Unable to connect to the server");
        }
        let reporter = RecordingReporter::new();

        let outcome = teardown(
            &ClusterBackend::new(&cluster),
            &reporter,
            &derive_resources("myapp"),
            "default",
            false,
        );

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.failures().count(), 3);
        assert_eq!(reporter.messages(Level::Error).len(), 3);
    }

    #[test]
    fn test_repeated_teardown_is_not_fatal() {
        let cluster = MockCluster::new();
        let reporter = RecordingReporter::new();
        let backend = ClusterBackend::new(&cluster);
        let resources = derive_resources("gone");

        let first = teardown(&backend, &reporter, &resources, "default", false);
        assert!(first.is_success());

        for kind in [
            ResourceKind::Ingress,
            ResourceKind::Service,
            ResourceKind::Deployment,
        ] {
            cluster.fail_on(kind, "Error from server (NotFound): not found");
        }
        let second = teardown(&backend, &reporter, &resources, "default", false);

        assert_eq!(second.len(), 3);
        assert_eq!(second.failures().count(), 3);
        assert_eq!(cluster.call_count(), 6);
    }

    #[test]
    fn test_dry_run_reaches_backend_with_flag() {
        let cluster = MockCluster::new();
        let reporter = RecordingReporter::new();

        let outcome = teardown(
            &ClusterBackend::new(&cluster),
            &reporter,
            &derive_resources("myapp"),
            "dev",
            true,
        );

        assert!(outcome.dry_run);
        assert!(cluster.calls().iter().all(|c| c.dry_run && c.namespace == "dev"));
        assert_eq!(cluster.call_count(), 3);
    }

    #[test]
    fn test_empty_sequence() {
        let cluster = MockCluster::new();
        let outcome = teardown(
            &ClusterBackend::new(&cluster),
            &RecordingReporter::new(),
            &[],
            "default",
            false,
        );
        assert!(outcome.is_empty());
        assert!(outcome.is_success());
    }
}
