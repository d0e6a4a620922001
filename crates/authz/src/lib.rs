//! Session gate for the admin console.
//!
//! [`Session`] owns the authenticated flag and the persisted token,
//! [`routes`] is the fixed navigation surface, and [`RouteGuard`] decides
//! per navigation whether a protected route may render.

pub mod authenticator;
pub mod guard;
pub mod history;
pub mod routes;
pub mod session;

pub use authenticator::{AuthError, Authenticator, Credentials, DemoAuthenticator, LoginRequest};
pub use guard::{Navigation, RouteGuard};
pub use history::{History, NavigationType, Navigator};
pub use routes::{AdminRoute, RouteResolution};
pub use session::Session;
