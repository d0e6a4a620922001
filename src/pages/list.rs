use std::sync::Arc;

use cms_http::{error_message, CrudService};
use cms_kernel::models::Id;
use cms_kernel::{Identified, Resource};
use cms_overlay::{ElementId, Overlay, OverlayEvent, OverlayInput};

use super::{Confirm, FieldErrors, ResourceForm};
use crate::notify::Notices;

type Entity<F> = <<F as ResourceForm>::Kind as Resource>::Entity;

/// Result of [`ResourcePage::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Validation failed; nothing was sent.
    Invalid,
    Saved(T),
    /// The server rejected the form and the rejection became field errors.
    FieldRejected,
    /// The save failed; the page error says why.
    Failed,
}

/// List view plus create/edit form for one resource kind.
pub struct ResourcePage<F: ResourceForm> {
    service: Arc<dyn CrudService<F::Kind>>,
    notices: Notices,
    overlay: Overlay,
    items: Vec<Entity<F>>,
    loading: bool,
    error: Option<String>,
    form: F,
    field_errors: FieldErrors,
    editing: Option<Id>,
}

impl<F: ResourceForm> ResourcePage<F> {
    pub fn new(service: Arc<dyn CrudService<F::Kind>>, notices: Notices, overlay: Overlay) -> Self {
        Self {
            service,
            notices,
            overlay,
            items: Vec::new(),
            loading: false,
            error: None,
            form: F::default(),
            field_errors: FieldErrors::new(),
            editing: None,
        }
    }

    pub fn items(&self) -> &[Entity<F>] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Page-level alert.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Id of the entity being edited; `None` while creating.
    pub fn editing(&self) -> Option<Id> {
        self.editing
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    pub fn is_form_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn service(&self) -> &Arc<dyn CrudService<F::Kind>> {
        &self.service
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.list(None).await {
            Ok(items) => self.items = items,
            Err(err) => {
                tracing::warn!(resource = F::Kind::NAME, error = %err, "list failed");
                self.error = Some(F::COPY.load_failed.to_string());
            }
        }
        self.loading = false;
    }

    pub fn open_create(&mut self, focus: Option<ElementId>) {
        self.show_form(None, F::default(), F::COPY.create_title, focus);
    }

    pub fn open_edit(&mut self, entity: &Entity<F>, focus: Option<ElementId>) {
        self.show_form(
            Some(entity.id()),
            F::from_entity(entity),
            F::COPY.edit_title,
            focus,
        );
    }

    /// Fetch the entity, then open it for editing. Returns whether the form opened.
    pub async fn open_edit_by_id(&mut self, id: Id, focus: Option<ElementId>) -> bool {
        match self.service.get(id).await {
            Ok(entity) => {
                self.open_edit(&entity, focus);
                true
            }
            Err(err) => {
                self.error = Some(error_message(&err, F::COPY.load_failed));
                false
            }
        }
    }

    fn show_form(&mut self, editing: Option<Id>, form: F, title: &str, focus: Option<ElementId>) {
        self.editing = editing;
        self.form = form;
        self.field_errors.clear();
        self.overlay.set_title(title);
        self.overlay.set_content(self.form.elements());
        self.overlay.open(focus);
    }

    /// Close the form and reset it. Returns the element to refocus.
    pub fn close_form(&mut self) -> Option<ElementId> {
        let restore = self.overlay.close();
        self.reset_form();
        restore
    }

    /// Route keyboard and pointer input to the form overlay.
    pub fn handle_overlay(&mut self, input: OverlayInput) -> OverlayEvent {
        let event = self.overlay.handle(input);
        if matches!(event, OverlayEvent::Closed { .. }) {
            self.reset_form();
        }
        event
    }

    fn reset_form(&mut self) {
        self.form = F::default();
        self.field_errors.clear();
        self.editing = None;
    }

    pub async fn submit(&mut self) -> SubmitOutcome<Entity<F>> {
        if let Err(errors) = self.form.validate() {
            self.field_errors = errors;
            return SubmitOutcome::Invalid;
        }
        self.field_errors.clear();

        let result = match self.editing {
            Some(id) => self.service.update(id, &self.form.to_update()).await,
            None => self.service.create(&self.form.to_create()).await,
        };

        match result {
            Ok(saved) => {
                let copy = if self.editing.is_some() {
                    F::COPY.updated
                } else {
                    F::COPY.created
                };
                self.notices.success(copy);
                self.close_form();
                self.load().await;
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                if let Some(errors) = F::map_error(&err) {
                    self.field_errors = errors;
                    return SubmitOutcome::FieldRejected;
                }
                self.error = Some(error_message(&err, F::COPY.save_failed));
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete after confirmation. Declining sends nothing.
    pub async fn delete(&mut self, id: Id, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(F::COPY.delete_prompt) {
            return false;
        }
        match self.service.delete(id).await {
            Ok(()) => {
                self.notices.success(F::COPY.deleted);
                self.load().await;
                true
            }
            Err(err) => {
                tracing::warn!(resource = F::Kind::NAME, id, error = %err, "delete failed");
                self.error = Some(error_message(&err, F::COPY.delete_failed));
                false
            }
        }
    }
}
