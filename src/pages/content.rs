use std::sync::Arc;

use cms_authz::AdminRoute;
use cms_http::{CrudService, UploadFile};
use cms_kernel::models::{
    Category, Content, ContentPayload, ContentStatus, ContentType, ContentUpdate, Id, Tag,
};
use cms_kernel::{CategoryResource, ContentResource, TagResource};
use cms_overlay::{Element, ElementId, ElementKind, OverlayKind};
use serde::{Deserialize, Serialize};

use super::list::{ResourcePage, SubmitOutcome};
use super::media::MediaPicker;
use super::{submit_buttons, Confirm, FieldErrors, PageCopy, ResourceForm};
use crate::utils::non_blank;

const DEFAULT_AUTHOR: Id = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentForm {
    pub title: String,
    pub slug: String,
    /// Rich text HTML.
    pub body: String,
    pub excerpt: String,
    pub author_id: Id,
    pub status: ContentStatus,
    pub content_type: ContentType,
    pub featured_image_id: Option<Id>,
    pub category_ids: Vec<Id>,
    pub tag_ids: Vec<Id>,
}

impl Default for ContentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            body: String::new(),
            excerpt: String::new(),
            author_id: DEFAULT_AUTHOR,
            status: ContentStatus::Draft,
            content_type: ContentType::Post,
            featured_image_id: None,
            category_ids: Vec::new(),
            tag_ids: Vec::new(),
        }
    }
}

fn toggle(ids: &mut Vec<Id>, id: Id) {
    match ids.iter().position(|existing| *existing == id) {
        Some(index) => {
            ids.remove(index);
        }
        None => ids.push(id),
    }
}

impl ContentForm {
    pub fn toggle_category(&mut self, id: Id) {
        toggle(&mut self.category_ids, id);
    }

    pub fn toggle_tag(&mut self, id: Id) {
        toggle(&mut self.tag_ids, id);
    }
}

impl ResourceForm for ContentForm {
    type Kind = ContentResource;

    const COPY: PageCopy = PageCopy {
        create_title: "Create Content",
        edit_title: "Edit Content",
        created: "Content created",
        updated: "Content updated",
        deleted: "Content deleted",
        delete_prompt: "Delete content?",
        load_failed: "Failed to load content",
        save_failed: "Failed to save content",
        delete_failed: "Failed to delete",
    };

    const OVERLAY: OverlayKind = OverlayKind::SidePanel;

    fn from_entity(content: &Content) -> Self {
        Self {
            title: content.title.clone(),
            slug: content.slug.clone(),
            body: content.content.clone().unwrap_or_default(),
            excerpt: content.excerpt.clone().unwrap_or_default(),
            author_id: content.author_id,
            status: content.status.unwrap_or_default(),
            content_type: content.content_type.unwrap_or_default(),
            featured_image_id: content.featured_image_id,
            category_ids: content.category_ids(),
            tag_ids: content.tag_ids(),
        }
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required".to_string());
        }
        if self.slug.trim().is_empty() {
            errors.insert("slug", "Slug is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn to_create(&self) -> ContentPayload {
        ContentPayload {
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            content: (!self.body.is_empty()).then(|| self.body.clone()),
            excerpt: non_blank(&self.excerpt),
            author_id: self.author_id,
            status: Some(self.status),
            content_type: Some(self.content_type),
            featured_image_id: self.featured_image_id,
            category_ids: self.category_ids.clone(),
            tag_ids: self.tag_ids.clone(),
        }
    }

    fn to_update(&self) -> ContentUpdate {
        ContentUpdate {
            title: Some(self.title.trim().to_string()),
            slug: Some(self.slug.trim().to_string()),
            content: Some(self.body.clone()),
            excerpt: Some(self.excerpt.trim().to_string()),
            author_id: Some(self.author_id),
            status: Some(self.status),
            content_type: Some(self.content_type),
            featured_image_id: Some(self.featured_image_id),
            category_ids: Some(self.category_ids.clone()),
            tag_ids: Some(self.tag_ids.clone()),
        }
    }

    fn elements(&self) -> Vec<Element> {
        let mut elements = vec![
            Element::input("title"),
            Element::input("slug"),
            Element::new("body", ElementKind::TextArea),
            Element::new("excerpt", ElementKind::TextArea),
            Element::new("status", ElementKind::Select),
            Element::new("content_type", ElementKind::Select),
            Element::new("categories", ElementKind::Select),
            Element::new("tags", ElementKind::Select),
            Element::button("choose-image"),
        ];
        elements.extend(submit_buttons());
        elements
    }
}

/// Content list plus the side-panel editor with taxonomy and image pickers.
pub struct ContentPage {
    page: ResourcePage<ContentForm>,
    categories: Arc<dyn CrudService<CategoryResource>>,
    tags: Arc<dyn CrudService<TagResource>>,
    category_choices: Vec<Category>,
    tag_choices: Vec<Tag>,
    picker: MediaPicker,
}

impl ContentPage {
    pub fn new(
        page: ResourcePage<ContentForm>,
        categories: Arc<dyn CrudService<CategoryResource>>,
        tags: Arc<dyn CrudService<TagResource>>,
        picker: MediaPicker,
    ) -> Self {
        Self {
            page,
            categories,
            tags,
            category_choices: Vec::new(),
            tag_choices: Vec::new(),
            picker,
        }
    }

    pub fn page(&self) -> &ResourcePage<ContentForm> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ResourcePage<ContentForm> {
        &mut self.page
    }

    pub fn category_choices(&self) -> &[Category] {
        &self.category_choices
    }

    pub fn tag_choices(&self) -> &[Tag] {
        &self.tag_choices
    }

    pub fn picker(&self) -> &MediaPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut MediaPicker {
        &mut self.picker
    }

    pub async fn load(&mut self) {
        self.page.load().await;
    }

    /// Taxonomy choices are best effort; the editor still opens without them.
    pub async fn load_choices(&mut self) {
        let (categories, tags) = tokio::join!(self.categories.list(None), self.tags.list(None));
        match categories {
            Ok(categories) => self.category_choices = categories,
            Err(err) => tracing::debug!(error = %err, "category choices unavailable"),
        }
        match tags {
            Ok(tags) => self.tag_choices = tags,
            Err(err) => tracing::debug!(error = %err, "tag choices unavailable"),
        }
    }

    pub async fn open_create(&mut self, focus: Option<ElementId>) {
        self.load_choices().await;
        self.page.open_create(focus);
        self.picker.set_selected(None);
    }

    pub async fn open_edit(&mut self, id: Id, focus: Option<ElementId>) -> bool {
        self.load_choices().await;
        if !self.page.open_edit_by_id(id, focus).await {
            return false;
        }
        self.picker.set_selected(self.page.form().featured_image_id);
        self.picker.preview().await;
        true
    }

    /// Show the view for a content route.
    pub async fn enter(&mut self, route: AdminRoute) {
        match route {
            AdminRoute::ContentNew => self.open_create(None).await,
            AdminRoute::ContentEdit { id } => {
                self.open_edit(id, None).await;
            }
            _ => self.load().await,
        }
    }

    pub fn choose_image(&mut self, id: Id) -> bool {
        if !self.picker.select(id) {
            return false;
        }
        self.page.form_mut().featured_image_id = Some(id);
        true
    }

    pub fn clear_image(&mut self) {
        self.picker.clear();
        self.page.form_mut().featured_image_id = None;
    }

    /// Upload through the picker; the new item becomes the featured image.
    pub async fn upload_image(&mut self, file: UploadFile) -> Option<Id> {
        let media = self.picker.upload(file).await?;
        self.page.form_mut().featured_image_id = Some(media.id);
        Some(media.id)
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Content> {
        self.page.submit().await
    }

    pub async fn delete(&mut self, id: Id, confirm: &dyn Confirm) -> bool {
        self.page.delete(id, confirm).await
    }

    pub fn close(&mut self) -> Option<ElementId> {
        self.picker.close();
        self.page.close_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_content_defaults_to_draft_post_by_author_one() {
        let form = ContentForm::default();
        assert_eq!(form.author_id, 1);
        assert_eq!(form.status, ContentStatus::Draft);
        assert_eq!(form.content_type, ContentType::Post);
    }

    #[test]
    fn title_and_slug_are_required() {
        let errors = ContentForm::default().validate().unwrap_err();
        assert_eq!(errors["title"], "Title is required");
        assert_eq!(errors["slug"], "Slug is required");
    }

    #[test]
    fn toggling_taxonomy_adds_then_removes() {
        let mut form = ContentForm::default();
        form.toggle_category(4);
        form.toggle_tag(7);
        form.toggle_category(5);
        form.toggle_category(4);
        assert_eq!(form.category_ids, vec![5]);
        assert_eq!(form.tag_ids, vec![7]);
    }

    #[test]
    fn update_clears_featured_image_explicitly() {
        let update = ContentForm {
            title: "T".into(),
            slug: "t".into(),
            ..Default::default()
        }
        .to_update();
        assert_eq!(update.featured_image_id, Some(None));
    }
}
