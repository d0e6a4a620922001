//! Core contracts shared by every CMS console crate: layered settings,
//! the resource contract, and the entity models exchanged with the API.

pub mod models;
pub mod registry;
pub mod resource;
pub mod settings;

pub use models::Id;
pub use registry::{ResourceDescriptor, ResourceRegistry};
pub use resource::{
    CategoryResource, ContentResource, Identified, MediaResource, Pagination, Resource,
    RoleResource, TagResource, UserResource,
};
