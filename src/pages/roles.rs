use cms_kernel::models::{Role, RolePayload, RoleUpdate};
use cms_kernel::RoleResource;
use cms_overlay::Element;
use serde::{Deserialize, Serialize};

use super::{require_name, submit_buttons, FieldErrors, PageCopy, ResourceForm};
use crate::utils::non_blank;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
}

impl ResourceForm for RoleForm {
    type Kind = RoleResource;

    const COPY: PageCopy = PageCopy {
        create_title: "Create Role",
        edit_title: "Edit Role",
        created: "Role created",
        updated: "Role updated",
        deleted: "Role deleted",
        delete_prompt: "Delete role?",
        load_failed: "Failed to load roles",
        save_failed: "Failed to save role",
        delete_failed: "Failed to delete",
    };

    fn from_entity(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        require_name(&self.name)
    }

    fn to_create(&self) -> RolePayload {
        RolePayload {
            name: self.name.trim().to_string(),
            description: non_blank(&self.description),
        }
    }

    fn to_update(&self) -> RoleUpdate {
        RoleUpdate {
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.trim().to_string()),
        }
    }

    fn elements(&self) -> Vec<Element> {
        let mut elements = vec![Element::input("name"), Element::input("description")];
        elements.extend(submit_buttons());
        elements
    }
}
