use std::sync::Arc;

use cms_http::{CrudService, MediaService, UploadFile};
use cms_kernel::models::{Id, Media};
use cms_overlay::{Element, ElementId, Overlay};

use super::Confirm;
use crate::notify::Notices;

const UPLOAD_OK: &str = "Upload successful";
const UPLOAD_FAILED: &str = "Upload failed";

fn media_elements(items: &[Media]) -> Vec<Element> {
    let mut elements = vec![Element::input("upload")];
    elements.extend(
        items
            .iter()
            .map(|media| Element::button(format!("media-{}", media.id))),
    );
    elements.push(Element::button("clear-selection"));
    elements
}

/// Chooses a single media item, optionally uploading a new one.
pub struct MediaPicker {
    service: Arc<dyn MediaService>,
    notices: Notices,
    overlay: Overlay,
    items: Vec<Media>,
    selected: Option<Id>,
    loading: bool,
    error: Option<String>,
}

impl MediaPicker {
    pub fn new(service: Arc<dyn MediaService>, notices: Notices, overlay: Overlay) -> Self {
        Self {
            service,
            notices,
            overlay,
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[Media] {
        &self.items
    }

    pub fn selected(&self) -> Option<Id> {
        self.selected
    }

    pub fn selected_media(&self) -> Option<&Media> {
        let id = self.selected?;
        self.items.iter().find(|media| media.id == id)
    }

    pub fn set_selected(&mut self, id: Option<Id>) {
        self.selected = id;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    pub async fn open(&mut self, focus: Option<ElementId>) {
        self.overlay.open(focus);
        self.load().await;
    }

    pub fn close(&mut self) -> Option<ElementId> {
        self.overlay.close()
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.list(None).await {
            Ok(items) => self.items = items,
            Err(err) => {
                tracing::warn!(error = %err, "media list failed");
                self.error = Some("Failed to load media".to_string());
            }
        }
        self.overlay.set_content(media_elements(&self.items));
        self.loading = false;
    }

    /// Fetch the selected item so it can be previewed before the list loads.
    pub async fn preview(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        match self.service.get(id).await {
            Ok(media) => {
                self.items.retain(|item| item.id != id);
                self.items.insert(0, media);
            }
            Err(err) => tracing::debug!(id, error = %err, "media preview unavailable"),
        }
    }

    /// Select a listed item and close the picker.
    pub fn select(&mut self, id: Id) -> bool {
        if !self.items.iter().any(|media| media.id == id) {
            return false;
        }
        self.selected = Some(id);
        self.overlay.close();
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Upload a file and select it.
    pub async fn upload(&mut self, file: UploadFile) -> Option<Media> {
        match self.service.upload(file).await {
            Ok(media) => {
                self.items.insert(0, media.clone());
                self.selected = Some(media.id);
                self.overlay.set_content(media_elements(&self.items));
                self.notices.success(UPLOAD_OK);
                Some(media)
            }
            Err(err) => {
                tracing::warn!(error = %err, "media upload failed");
                self.error = Some(UPLOAD_FAILED.to_string());
                self.notices.error(UPLOAD_FAILED);
                None
            }
        }
    }
}

/// The media library page: grid, upload, delete, and a library modal.
pub struct MediaLibrary {
    service: Arc<dyn MediaService>,
    notices: Notices,
    library: MediaPicker,
    items: Vec<Media>,
    loading: bool,
    error: Option<String>,
}

impl MediaLibrary {
    pub fn new(service: Arc<dyn MediaService>, notices: Notices, library: MediaPicker) -> Self {
        Self {
            service,
            notices,
            library,
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[Media] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn library(&self) -> &MediaPicker {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut MediaPicker {
        &mut self.library
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.list(None).await {
            Ok(items) => self.items = items,
            Err(err) => {
                tracing::warn!(error = %err, "media list failed");
                self.error = Some("Failed to load media".to_string());
            }
        }
        self.loading = false;
    }

    pub async fn open_library(&mut self, focus: Option<ElementId>) {
        self.library.open(focus).await;
    }

    pub fn close_library(&mut self) -> Option<ElementId> {
        self.library.close()
    }

    pub async fn upload(&mut self, file: UploadFile) -> Option<Media> {
        match self.service.upload(file).await {
            Ok(media) => {
                self.notices.success(UPLOAD_OK);
                self.load().await;
                Some(media)
            }
            Err(err) => {
                tracing::warn!(error = %err, "media upload failed");
                self.notices.error(UPLOAD_FAILED);
                None
            }
        }
    }

    pub async fn delete(&mut self, id: Id, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm("Delete media?") {
            return false;
        }
        match self.service.delete(id).await {
            Ok(()) => {
                self.notices.success("Media deleted");
                self.load().await;
                true
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "media delete failed");
                self.notices.error("Failed to delete");
                false
            }
        }
    }

    /// URL of a listed item, for the clipboard.
    pub fn copy_url(&self, id: Id) -> Option<String> {
        let media = self.items.iter().find(|media| media.id == id)?;
        self.notices.info("URL copied");
        Some(media.url.clone())
    }
}
