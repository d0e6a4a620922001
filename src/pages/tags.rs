use cms_kernel::models::{Tag, TagPayload, TagUpdate};
use cms_kernel::TagResource;
use cms_overlay::Element;
use serde::{Deserialize, Serialize};

use super::{require_name, submit_buttons, FieldErrors, PageCopy, ResourceForm};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagForm {
    pub name: String,
}

impl ResourceForm for TagForm {
    type Kind = TagResource;

    const COPY: PageCopy = PageCopy {
        create_title: "Create Tag",
        edit_title: "Edit Tag",
        created: "Tag created",
        updated: "Tag updated",
        deleted: "Tag deleted",
        delete_prompt: "Delete tag?",
        load_failed: "Failed to load tags",
        save_failed: "Failed to save",
        delete_failed: "Failed to delete",
    };

    fn from_entity(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
        }
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        require_name(&self.name)
    }

    fn to_create(&self) -> TagPayload {
        TagPayload {
            name: self.name.trim().to_string(),
        }
    }

    fn to_update(&self) -> TagUpdate {
        TagUpdate {
            name: Some(self.name.trim().to_string()),
        }
    }

    fn elements(&self) -> Vec<Element> {
        let mut elements = vec![Element::input("name")];
        elements.extend(submit_buttons());
        elements
    }
}
