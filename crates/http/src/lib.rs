//! REST client for the CMS API.
//!
//! A single [`CrudClient`] is instantiated per resource kind; the kind is a
//! type parameter carrying the collection path and payload types.

pub mod client;
pub mod crud;
pub mod error;
pub mod media;

pub use client::ApiClient;
pub use crud::{CrudClient, CrudService};
pub use error::{error_message, ApiError};
pub use media::{MediaService, UploadFile};
