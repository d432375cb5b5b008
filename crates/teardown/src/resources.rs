//! Companion resources implied by a base name.

use crate::types::{ResourceKind, ResourceRef};

/// Suffix of the service created for a base name.
pub const SERVICE_SUFFIX: &str = "-service";

/// Suffix of the ingress created for a base name.
pub const INGRESS_SUFFIX: &str = "-ingress";

/// Derive the cluster objects created implicitly for `base_name`.
///
/// Order is removal order: the ingress routes into the service, and the
/// deployment owns the workload, so it goes last. Names are not validated.
pub fn derive_resources(base_name: &str) -> Vec<ResourceRef> {
    vec![
        ResourceRef::new(ResourceKind::Ingress, format!("{base_name}{INGRESS_SUFFIX}")),
        ResourceRef::new(ResourceKind::Service, format!("{base_name}{SERVICE_SUFFIX}")),
        ResourceRef::new(ResourceKind::Deployment, base_name),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_resources_order_and_names() {
        let refs = derive_resources("myapp");
        let pairs: Vec<(&str, &str)> = refs
            .iter()
            .map(|r| (r.kind.as_str(), r.name.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("ingress", "myapp-ingress"),
                ("service", "myapp-service"),
                ("deployment", "myapp"),
            ]
        );
    }

    #[test]
    fn test_derive_resources_keeps_name_verbatim() {
        let refs = derive_resources("Not_A-Valid.Name");
        assert_eq!(refs[2].name, "Not_A-Valid.Name");
        assert_eq!(refs[0].name, "Not_A-Valid.Name-ingress");

        let refs = derive_resources("");
        assert_eq!(refs[1].name, "-service");
        assert_eq!(refs[2].name, "");
    }
}
