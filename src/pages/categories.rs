use cms_kernel::models::{Category, CategoryPayload, CategoryUpdate};
use cms_kernel::CategoryResource;
use cms_overlay::Element;
use serde::{Deserialize, Serialize};

use super::{require_name, submit_buttons, FieldErrors, PageCopy, ResourceForm};
use crate::utils::non_blank;

/// Editing keeps the existing description unless it is changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl ResourceForm for CategoryForm {
    type Kind = CategoryResource;

    const COPY: PageCopy = PageCopy {
        create_title: "Create Category",
        edit_title: "Edit Category",
        created: "Category created",
        updated: "Category updated",
        deleted: "Category deleted",
        delete_prompt: "Delete category?",
        load_failed: "Failed to load categories",
        save_failed: "Failed to save",
        delete_failed: "Failed to delete",
    };

    fn from_entity(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        require_name(&self.name)
    }

    fn to_create(&self) -> CategoryPayload {
        CategoryPayload {
            name: self.name.trim().to_string(),
            description: non_blank(&self.description),
        }
    }

    fn to_update(&self) -> CategoryUpdate {
        CategoryUpdate {
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
