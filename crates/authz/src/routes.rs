//! Fixed navigation surface of the console.
//!
//! - `/login` - sign-in view
//! - `/admin` - dashboard
//! - `/admin/{users,roles,content,categories,tags,media,settings}` - list views
//! - `/admin/content/new` and `/admin/content/{id}` - content editor
//!
//! `/` and anything unrecognised redirect to the dashboard.

use std::fmt;

use cms_kernel::Id;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Login,
    Dashboard,
    Users,
    Roles,
    ContentList,
    ContentNew,
    ContentEdit { id: Id },
    Categories,
    Tags,
    Media,
    Settings,
}

/// Outcome of matching a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResolution {
    Render(AdminRoute),
    /// Replace the current location with this path.
    Redirect(String),
}

impl AdminRoute {
    pub fn resolve(path: &str) -> RouteResolution {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            ["login"] => AdminRoute::Login,
            ["admin"] => AdminRoute::Dashboard,
            ["admin", "users"] => AdminRoute::Users,
            ["admin", "roles"] => AdminRoute::Roles,
            ["admin", "content"] => AdminRoute::ContentList,
            ["admin", "content", "new"] => AdminRoute::ContentNew,
            ["admin", "content", id] => match id.parse() {
                Ok(id) => AdminRoute::ContentEdit { id },
                Err(_) => return RouteResolution::Redirect(DASHBOARD_PATH.to_string()),
            },
            ["admin", "categories"] => AdminRoute::Categories,
            ["admin", "tags"] => AdminRoute::Tags,
            ["admin", "media"] => AdminRoute::Media,
            ["admin", "settings"] => AdminRoute::Settings,
            _ => return RouteResolution::Redirect(DASHBOARD_PATH.to_string()),
        };
        RouteResolution::Render(route)
    }

    pub fn path(&self) -> String {
        match self {
            AdminRoute::Login => LOGIN_PATH.to_string(),
            AdminRoute::Dashboard => DASHBOARD_PATH.to_string(),
            AdminRoute::Users => "/admin/users".to_string(),
            AdminRoute::Roles => "/admin/roles".to_string(),
            AdminRoute::ContentList => "/admin/content".to_string(),
            AdminRoute::ContentNew => "/admin/content/new".to_string(),
            AdminRoute::ContentEdit { id } => format!("/admin/content/{}", id),
            AdminRoute::Categories => "/admin/categories".to_string(),
            AdminRoute::Tags => "/admin/tags".to_string(),
            AdminRoute::Media => "/admin/media".to_string(),
            AdminRoute::Settings => "/admin/settings".to_string(),
        }
    }

    /// Everything except the login view requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, AdminRoute::Login)
    }
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
