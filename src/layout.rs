//! Admin chrome: sidebar navigation, breadcrumbs, page titles, and the
//! mobile navigation drawer.

use cms_authz::{AdminRoute, NavigationType, Navigator};
use cms_overlay::{Element, ElementId, Overlay, OverlayEvent, OverlayInput};
use serde::Serialize;

use crate::utils::capitalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 8] = [
    NavItem {
        label: "Dashboard",
        path: "/admin",
    },
    NavItem {
        label: "Users",
        path: "/admin/users",
    },
    NavItem {
        label: "Roles",
        path: "/admin/roles",
    },
    NavItem {
        label: "Content",
        path: "/admin/content",
    },
    NavItem {
        label: "Categories",
        path: "/admin/categories",
    },
    NavItem {
        label: "Tags",
        path: "/admin/tags",
    },
    NavItem {
        label: "Media",
        path: "/admin/media",
    },
    NavItem {
        label: "Settings",
        path: "/admin/settings",
    },
];

/// The sidebar entry for `path`. The dashboard only matches exactly.
pub fn active_nav(path: &str) -> Option<&'static NavItem> {
    let path = path.split('?').next().unwrap_or_default().trim_end_matches('/');
    NAV_ITEMS.iter().rev().find(|item| {
        path == item.path || (item.path != "/admin" && path.starts_with(&format!("{}/", item.path)))
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

fn crumb_label(segment: &str) -> String {
    match segment {
        "admin" => "Dashboard".to_string(),
        "users" => "Users".to_string(),
        "settings" => "Settings".to_string(),
        other => capitalize(other),
    }
}

/// One crumb per path segment, each linking to its prefix.
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let segments: Vec<&str> = path
        .split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    (0..segments.len())
        .map(|idx| Breadcrumb {
            label: crumb_label(segments[idx]),
            path: format!("/{}", segments[..=idx].join("/")),
        })
        .collect()
}

pub fn page_title(route: &AdminRoute) -> &'static str {
    match route {
        AdminRoute::Login => "Sign in",
        AdminRoute::Dashboard => "Dashboard",
        AdminRoute::Users => "Users",
        AdminRoute::Roles => "Roles",
        AdminRoute::ContentList => "Content",
        AdminRoute::ContentNew => "Create Content",
        AdminRoute::ContentEdit { .. } => "Edit Content",
        AdminRoute::Categories => "Categories",
        AdminRoute::Tags => "Tags",
        AdminRoute::Media => "Media Library",
        AdminRoute::Settings => "Settings",
    }
}

fn nav_link_id(item: &NavItem) -> ElementId {
    ElementId::new(format!("nav-{}", item.label.to_lowercase()))
}

/// Mobile navigation drawer.
pub struct AdminLayout {
    drawer: Overlay,
}

impl AdminLayout {
    /// `drawer` should be an [`cms_overlay::OverlayKind::Drawer`] overlay.
    pub fn new(drawer: Overlay) -> Self {
        let links = NAV_ITEMS
            .iter()
            .map(|item| Element::link(nav_link_id(item)))
            .collect();
        Self {
            drawer: drawer.with_content(links),
        }
    }

    pub fn drawer(&self) -> &Overlay {
        &self.drawer
    }

    pub fn is_menu_open(&self) -> bool {
        self.drawer.is_open()
    }

    pub fn open_menu(&mut self, focus: Option<ElementId>) {
        self.drawer.open(focus);
    }

    pub fn toggle_menu(&mut self, focus: Option<ElementId>) {
        if self.drawer.is_open() {
            self.drawer.close();
        } else {
            self.drawer.open(focus);
        }
    }

    pub fn close_menu(&mut self) -> Option<ElementId> {
        self.drawer.close()
    }

    pub fn handle(&mut self, input: OverlayInput) -> OverlayEvent {
        self.drawer.handle(input)
    }

    /// Follow a drawer link: navigate and close the drawer.
    pub fn follow(&mut self, item: &NavItem, navigator: &dyn Navigator) {
        navigator.navigate(item.path, NavigationType::Push);
        self.drawer.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_authz::History;
    use cms_overlay::{Key, OverlayKind, ScrollLock};

    #[test]
    fn breadcrumbs_follow_path_segments() {
        let crumbs = breadcrumbs("/admin/users");
        assert_eq!(
            crumbs,
            vec![
                Breadcrumb {
                    label: "Dashboard".into(),
                    path: "/admin".into()
                },
                Breadcrumb {
                    label: "Users".into(),
                    path: "/admin/users".into()
                },
            ]
        );

        let labels: Vec<String> = breadcrumbs("/admin/content/12")
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["Dashboard", "Content", "12"]);
    }

    #[test]
    fn active_nav_prefers_most_specific_entry() {
        assert_eq!(active_nav("/admin").unwrap().label, "Dashboard");
        assert_eq!(active_nav("/admin/content/new").unwrap().label, "Content");
        assert_eq!(active_nav("/admin/tags/").unwrap().label, "Tags");
        assert!(active_nav("/login").is_none());
    }

    #[test]
    fn following_a_drawer_link_closes_it() {
        let lock = ScrollLock::new();
        let history = History::new("/admin");
        let mut layout =
            AdminLayout::new(Overlay::new(OverlayKind::Drawer, "Menu", lock.clone()));

        layout.open_menu(Some(ElementId::new("menu-toggle")));
        assert!(lock.is_locked());

        layout.follow(&NAV_ITEMS[5], &history);
        assert!(!layout.is_menu_open());
        assert!(!lock.is_locked());
        assert_eq!(history.current(), "/admin/tags");
    }

    #[test]
    fn escape_closes_drawer_and_restores_toggle() {
        let mut layout = AdminLayout::new(Overlay::new(
            OverlayKind::Drawer,
            "Menu",
            ScrollLock::new(),
        ));
        layout.open_menu(Some(ElementId::new("menu-toggle")));

        let event = layout.handle(OverlayInput::Key(Key::Escape));
        assert_eq!(
            event,
            OverlayEvent::Closed {
                restore_focus: Some(ElementId::new("menu-toggle"))
            }
        );
    }
}
