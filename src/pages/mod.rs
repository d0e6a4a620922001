//! Page controllers.
//!
//! Each controller holds the state its view renders: the fetched list,
//! form fields, inline field errors, the page-level error, and the overlay
//! the form lives in. API failures never escape a controller; they become
//! one of those pieces of state.

pub mod categories;
pub mod content;
pub mod dashboard;
pub mod list;
pub mod login;
pub mod media;
pub mod roles;
pub mod settings;
pub mod tags;
pub mod users;

use std::collections::BTreeMap;
use std::fmt::Debug;

use cms_http::ApiError;
use cms_kernel::Resource;
use cms_overlay::{Element, OverlayKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use categories::CategoryForm;
pub use content::{ContentForm, ContentPage};
pub use dashboard::{Dashboard, DashboardStats};
pub use list::{ResourcePage, SubmitOutcome};
pub use login::LoginPage;
pub use media::{MediaLibrary, MediaPicker};
pub use roles::RoleForm;
pub use settings::{SettingsPage, SettingsView};
pub use tags::TagForm;
pub use users::UserForm;

/// Inline validation messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Asks the operator to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Titles, prompts, and notices a resource page shows.
#[derive(Debug, Clone, Copy)]
pub struct PageCopy {
    pub create_title: &'static str,
    pub edit_title: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub delete_prompt: &'static str,
    pub load_failed: &'static str,
    pub save_failed: &'static str,
    pub delete_failed: &'static str,
}

/// Form state for one resource kind. Forms (de)serialize so scripted
/// callers can fill them from JSON.
pub trait ResourceForm:
    Default + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Kind: Resource;

    const COPY: PageCopy;

    const OVERLAY: OverlayKind = OverlayKind::Modal;

    fn from_entity(entity: &<Self::Kind as Resource>::Entity) -> Self;

    /// Client-side checks run before any request is sent.
    fn validate(&self) -> Result<(), FieldErrors>;

    fn to_create(&self) -> <Self::Kind as Resource>::Create;

    fn to_update(&self) -> <Self::Kind as Resource>::Update;

    /// Turn a server rejection into field errors, when the form knows how.
    fn map_error(_err: &ApiError) -> Option<FieldErrors> {
        None
    }

    /// Focusable controls of the form, in document order.
    fn elements(&self) -> Vec<Element>;
}

/// Fields shared by the name-only forms (roles, categories, tags).
pub(crate) fn require_name(name: &str) -> Result<(), FieldErrors> {
    if name.trim().is_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required".to_string());
        return Err(errors);
    }
    Ok(())
}

pub(crate) fn submit_buttons() -> [Element; 2] {
    [Element::button("cancel"), Element::button("submit")]
}
