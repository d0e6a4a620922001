use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    Category, CategoryPayload, CategoryUpdate, Content, ContentPayload, ContentUpdate, Id, Media,
    MediaPayload, MediaUpdate, Role, RolePayload, RoleUpdate, Tag, TagPayload, TagUpdate, User,
    UserPayload, UserUpdate,
};

/// Entities that carry a server-assigned identifier.
pub trait Identified {
    fn id(&self) -> Id;
}

/// Contract every REST resource kind implements.
///
/// One implementation per kind; the HTTP layer is generic over it so the
/// six collections share a single client.
pub trait Resource: Send + Sync + 'static {
    /// Registry name, also used in log fields.
    const NAME: &'static str;

    /// Collection path relative to the API base URL.
    const PATH: &'static str;

    /// Singular human-readable label.
    const LABEL: &'static str;

    type Entity: Identified + Serialize + DeserializeOwned + Clone + Debug + Send + Sync;
    type Create: Serialize + Debug + Send + Sync;
    type Update: Serialize + Debug + Send + Sync;

    /// Path of a single item.
    fn item_path(id: Id) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// `skip`/`limit` window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
}

impl Pagination {
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    pub const fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(100)
    }
}

macro_rules! identified {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Identified for $entity {
                fn id(&self) -> Id {
                    self.id
                }
            }
        )+
    };
}

identified!(User, Role, Content, Category, Tag, Media);

pub struct UserResource;

impl Resource for UserResource {
    const NAME: &'static str = "users";
    const PATH: &'static str = "/users";
    const LABEL: &'static str = "User";
    type Entity = User;
    type Create = UserPayload;
    type Update = UserUpdate;
}

pub struct RoleResource;

impl Resource for RoleResource {
    const NAME: &'static str = "roles";
    const PATH: &'static str = "/roles";
    const LABEL: &'static str = "Role";
    type Entity = Role;
    type Create = RolePayload;
    type Update = RoleUpdate;
}

pub struct ContentResource;

impl Resource for ContentResource {
    const NAME: &'static str = "content";
    const PATH: &'static str = "/contents";
    const LABEL: &'static str = "Content";
    type Entity = Content;
    type Create = ContentPayload;
    type Update = ContentUpdate;
}

pub struct CategoryResource;

impl Resource for CategoryResource {
    const NAME: &'static str = "categories";
    const PATH: &'static str = "/categories";
    const LABEL: &'static str = "Category";
    type Entity = Category;
    type Create = CategoryPayload;
    type Update = CategoryUpdate;
}

pub struct TagResource;

impl Resource for TagResource {
    const NAME: &'static str = "tags";
    const PATH: &'static str = "/tags";
    const LABEL: &'static str = "Tag";
    type Entity = Tag;
    type Create = TagPayload;
    type Update = TagUpdate;
}

pub struct MediaResource;

impl Resource for MediaResource {
    const NAME: &'static str = "media";
    const PATH: &'static str = "/media";
    const LABEL: &'static str = "Media";
    type Entity = Media;
    type Create = MediaPayload;
    type Update = MediaUpdate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_appends_id() {
        assert_eq!(ContentResource::item_path(42), "/contents/42");
        assert_eq!(UserResource::item_path(1), "/users/1");
    }

    #[test]
    fn default_pagination_matches_list_window() {
        assert_eq!(Pagination::default(), Pagination::new(0, 100));
    }
}
