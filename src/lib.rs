//! Headless CMS admin console.
//!
//! [`Console`] wires the session gate, the REST client, and the overlay
//! scroll lock together and hands out page controllers that hold the same
//! state the admin views render.

pub mod console;
pub mod layout;
pub mod notify;
pub mod pages;
pub mod utils;

pub use console::Console;
pub use layout::{breadcrumbs, page_title, AdminLayout, Breadcrumb, NavItem, NAV_ITEMS};
pub use notify::{Notice, NoticeLevel, Notices};
pub use pages::{Confirm, FieldErrors, ResourceForm, ResourcePage, SubmitOutcome};
