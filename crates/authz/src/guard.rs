use std::sync::Arc;

use crate::history::{NavigationType, Navigator};
use crate::routes::{AdminRoute, RouteResolution, LOGIN_PATH};
use crate::session::Session;

/// Where a navigation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The requested route renders.
    Allowed(AdminRoute),
    /// The request was replaced by another route (dashboard or login).
    Redirected(AdminRoute),
}

impl Navigation {
    pub fn route(&self) -> AdminRoute {
        match self {
            Navigation::Allowed(route) | Navigation::Redirected(route) => *route,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allowed(_))
    }
}

/// Gates protected routes behind the session.
pub struct RouteGuard {
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Whether `route` may render for `session`.
    pub fn permits(route: &AdminRoute, session: &Session) -> bool {
        !route.is_protected() || session.is_authenticated()
    }

    /// Navigate to `path`, applying table redirects and the session check.
    /// Redirects always replace the current history entry.
    pub fn enter(&self, path: &str, kind: NavigationType, session: &Session) -> Navigation {
        self.navigator.navigate(path, kind);

        let (route, redirected) = match AdminRoute::resolve(path) {
            RouteResolution::Render(route) => (route, false),
            RouteResolution::Redirect(target) => {
                self.navigator.navigate(&target, NavigationType::Replace);
                match AdminRoute::resolve(&target) {
                    RouteResolution::Render(route) => (route, true),
                    RouteResolution::Redirect(_) => (AdminRoute::Dashboard, true),
                }
            }
        };

        if !Self::permits(&route, session) {
            tracing::info!(requested = path, "unauthenticated; redirecting to login");
            self.navigator.navigate(LOGIN_PATH, NavigationType::Replace);
            return Navigation::Redirected(AdminRoute::Login);
        }

        if redirected {
            Navigation::Redirected(route)
        } else {
            Navigation::Allowed(route)
        }
    }
}
