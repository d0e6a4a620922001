use serde::Serialize;

use crate::resource::{
    CategoryResource, ContentResource, MediaResource, Resource, RoleResource, TagResource,
    UserResource,
};

/// Static description of a resource kind, collected at link time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub path: &'static str,
    pub label: &'static str,
    /// Admin route that lists this kind.
    pub route: &'static str,
}

impl ResourceDescriptor {
    pub const fn of<R: Resource>(route: &'static str) -> Self {
        Self {
            name: R::NAME,
            path: R::PATH,
            label: R::LABEL,
            route,
        }
    }
}

inventory::collect!(ResourceDescriptor);

inventory::submit! { ResourceDescriptor::of::<UserResource>("/admin/users") }
inventory::submit! { ResourceDescriptor::of::<RoleResource>("/admin/roles") }
inventory::submit! { ResourceDescriptor::of::<ContentResource>("/admin/content") }
inventory::submit! { ResourceDescriptor::of::<CategoryResource>("/admin/categories") }
inventory::submit! { ResourceDescriptor::of::<TagResource>("/admin/tags") }
inventory::submit! { ResourceDescriptor::of::<MediaResource>("/admin/media") }

/// Registry of the resource kinds known to the console.
pub struct ResourceRegistry {
    descriptors: Vec<&'static ResourceDescriptor>,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Collect every descriptor submitted with `inventory::submit!`.
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for descriptor in inventory::iter::<ResourceDescriptor> {
            registry.register(descriptor);
        }
        tracing::debug!(kinds = registry.len(), "resource registry populated");
        registry
    }

    /// Register a descriptor, replacing any previous entry with the same name
    pub fn register(&mut self, descriptor: &'static ResourceDescriptor) {
        self.descriptors.retain(|d| d.name != descriptor.name);
        self.descriptors.push(descriptor);
        self.descriptors.sort_by(|a, b| a.name.cmp(b.name));
    }

    /// Get a descriptor by name
    pub fn get(&self, name: &str) -> Option<&'static ResourceDescriptor> {
        self.descriptors.iter().copied().find(|d| d.name == name)
    }

    /// All descriptors, sorted by name
    pub fn descriptors(&self) -> &[&'static ResourceDescriptor] {
        &self.descriptors
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static EXTRA: ResourceDescriptor = ResourceDescriptor {
        name: "tags",
        path: "/labels",
        label: "Label",
        route: "/admin/labels",
    };

    #[test]
    fn test_registry_creation() {
        let registry = ResourceRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_discover_finds_all_six_kinds() {
        let registry = ResourceRegistry::discover();
        assert_eq!(
            registry.names(),
            vec!["categories", "content", "media", "roles", "tags", "users"]
        );
        assert_eq!(registry.get("content").unwrap().path, "/contents");
        assert!(registry.get("menus").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ResourceRegistry::discover();
        registry.register(&EXTRA);
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.get("tags").unwrap().path, "/labels");
    }
}
