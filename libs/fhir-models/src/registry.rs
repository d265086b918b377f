//! The standard resource registry

use crate::datatypes::EXTENSION;
use crate::resources::{AUDIT_EVENT, CODE_SYSTEM, COMMUNICATION};
use once_cell::sync::Lazy;
use strata_codec::TypeRegistry;

static REGISTRY: Lazy<TypeRegistry> = Lazy::new(|| {
    TypeRegistry::new(&EXTENSION)
        .register(&AUDIT_EVENT)
        .register(&CODE_SYSTEM)
        .register(&COMMUNICATION)
});

/// Registry of every resource type this crate models, built on first use.
///
/// Build a custom [`TypeRegistry`] to restrict which inline resource types
/// are accepted.
pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_lists_all_resources() {
        assert_eq!(
            registry().resource_types(),
            vec!["AuditEvent", "CodeSystem", "Communication"]
        );
        assert_eq!(registry().extension().name, "Extension");
    }
}
