//! Resource type registry
//!
//! Maps `resourceType` discriminators to descriptor tables so inline
//! resources (`contained`) can be decoded without the codec knowing the
//! resource catalog.

use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// Discriminator → descriptor lookup used while decoding
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    extension: &'static TypeDescriptor,
    resources: HashMap<&'static str, &'static TypeDescriptor>,
}

impl TypeRegistry {
    /// Create a registry. The extension descriptor is needed to decode the
    /// extension lists of primitive elements.
    pub fn new(extension: &'static TypeDescriptor) -> Self {
        Self {
            extension,
            resources: HashMap::new(),
        }
    }

    /// Register a resource descriptor under its type name.
    pub fn register(mut self, descriptor: &'static TypeDescriptor) -> Self {
        debug!(resource_type = descriptor.name, "Registering resource type");
        self.resources.insert(descriptor.name, descriptor);
        self
    }

    pub fn extension(&self) -> &'static TypeDescriptor {
        self.extension
    }

    /// Look up a resource descriptor by discriminator
    pub fn resource(&self, resource_type: &str) -> Result<&'static TypeDescriptor> {
        self.resources
            .get(resource_type)
            .copied()
            .ok_or_else(|| Error::UnknownResourceType(resource_type.to_string()))
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.resources.contains_key(resource_type)
    }

    /// Registered discriminators, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.resources.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeKind;

    static EXTENSION: TypeDescriptor = TypeDescriptor {
        name: "Extension",
        kind: TypeKind::ComplexType,
        fields: &[],
    };

    static BASIC: TypeDescriptor = TypeDescriptor {
        name: "Basic",
        kind: TypeKind::Resource,
        fields: &[],
    };

    #[test]
    fn lookup_by_discriminator() {
        let registry = TypeRegistry::new(&EXTENSION).register(&BASIC);
        assert!(registry.contains("Basic"));
        assert_eq!(registry.resource("Basic").unwrap().name, "Basic");
        assert_eq!(registry.resource_types(), vec!["Basic"]);
        assert_eq!(registry.extension().name, "Extension");
    }

    #[test]
    fn unknown_discriminator_is_an_error() {
        let registry = TypeRegistry::new(&EXTENSION);
        let err = registry.resource("Patient").unwrap_err();
        assert!(matches!(err, Error::UnknownResourceType(ref name) if name == "Patient"));
    }
}
