use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cms_authz::{
    AdminRoute, AuthError, Authenticator, DemoAuthenticator, History, LoginRequest, Navigation,
    NavigationType, Navigator, RouteGuard, RouteResolution, Session,
};
use cms_http::{ApiClient, CrudClient, MediaService};
use cms_kernel::settings::Settings;
use cms_kernel::{
    CategoryResource, ContentResource, MediaResource, Resource, ResourceRegistry, TagResource,
    UserResource,
};
use cms_overlay::{Overlay, OverlayKind, ScrollLock};
use cms_store::{FileStore, KeyValueStore, ThemePreference, TokenStore};

use crate::layout::AdminLayout;
use crate::notify::Notices;
use crate::pages::{
    ContentForm, ContentPage, Dashboard, MediaLibrary, MediaPicker, ResourceForm, ResourcePage,
    SettingsPage,
};

/// The wired-up admin console.
///
/// Owns the session, the navigation history, the API client, and the
/// shared scroll lock and notice board that every page receives.
pub struct Console {
    settings: Settings,
    session: Session,
    history: Arc<History>,
    guard: RouteGuard,
    api: ApiClient,
    theme: ThemePreference,
    scroll_lock: ScrollLock,
    registry: ResourceRegistry,
    notices: Notices,
}

impl Console {
    /// Open the state file named by `storage.path` and restore the session.
    pub fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let store = FileStore::open(&settings.storage.path).with_context(|| {
            format!(
                "failed to open state file {}",
                settings.storage.path.display()
            )
        })?;
        Self::with_store(settings, Arc::new(store))
    }

    pub fn with_store(settings: Settings, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        Self::with_authenticator(settings, store, Arc::new(DemoAuthenticator))
    }

    pub fn with_authenticator(
        settings: Settings,
        store: Arc<dyn KeyValueStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> anyhow::Result<Self> {
        let history = Arc::new(History::default());
        let session = Session::restore(
            TokenStore::new(store.clone()),
            authenticator,
            history.clone(),
        )
        .context("failed to restore session")?;

        let api = ApiClient::new(&settings.api).context("failed to build API client")?;
        api.set_token(session.token().map(str::to_owned));

        let theme = ThemePreference::load(store, settings.ui.default_theme)
            .context("failed to load theme preference")?;
        let registry = ResourceRegistry::discover();
        let notices = Notices::new(Duration::from_millis(settings.ui.notice_ttl_ms));

        tracing::info!(
            env = ?settings.environment,
            api = %settings.api.base_url,
            authenticated = session.is_authenticated(),
            resources = registry.len(),
            "console ready"
        );

        Ok(Self {
            guard: RouteGuard::new(history.clone()),
            settings,
            session,
            history,
            api,
            theme,
            scroll_lock: ScrollLock::new(),
            registry,
            notices,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn history(&self) -> &Arc<History> {
        &self.history
    }

    pub fn current_path(&self) -> String {
        self.history.current()
    }

    pub fn current_route(&self) -> AdminRoute {
        match AdminRoute::resolve(&self.history.current()) {
            RouteResolution::Render(route) => route,
            RouteResolution::Redirect(_) => AdminRoute::Dashboard,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Sign in and start sending the new token.
    pub async fn login(&mut self, request: LoginRequest) -> Result<(), AuthError> {
        self.session.login(request).await?;
        self.api.set_token(self.session.token().map(str::to_owned));
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.session.logout()?;
        self.api.set_token(None);
        Ok(())
    }

    /// Navigate through the route guard.
    pub fn navigate(&self, path: &str) -> Navigation {
        self.guard.enter(path, NavigationType::Push, &self.session)
    }

    /// Step back one history entry and re-check the guard there.
    pub fn back(&self) -> Option<Navigation> {
        let path = self.history.back()?;
        Some(
            self.guard
                .enter(&path, NavigationType::Replace, &self.session),
        )
    }

    /// An overlay sharing the console's scroll lock and focus delay.
    pub fn overlay(&self, kind: OverlayKind, title: &str) -> Overlay {
        Overlay::new(kind, title, self.scroll_lock.clone())
            .with_focus_delay(Duration::from_millis(self.settings.ui.focus_delay_ms))
    }

    pub fn service<R: Resource>(&self) -> CrudClient<R> {
        CrudClient::new(self.api.clone())
    }

    pub fn media_service(&self) -> Arc<dyn MediaService> {
        Arc::new(self.service::<MediaResource>())
    }

    pub fn page<F: ResourceForm>(&self) -> ResourcePage<F> {
        ResourcePage::new(
            Arc::new(self.service::<F::Kind>()),
            self.notices.clone(),
            self.overlay(F::OVERLAY, F::COPY.create_title),
        )
    }

    pub fn media_picker(&self) -> MediaPicker {
        MediaPicker::new(
            self.media_service(),
            self.notices.clone(),
            self.overlay(OverlayKind::Modal, "Select Media"),
        )
    }

    pub fn content_page(&self) -> ContentPage {
        ContentPage::new(
            self.page::<ContentForm>(),
            Arc::new(self.service::<CategoryResource>()),
            Arc::new(self.service::<TagResource>()),
            self.media_picker(),
        )
    }

    pub fn media_library(&self) -> MediaLibrary {
        let mut library = self.media_picker();
        library.overlay_mut().set_title("Media Library");
        MediaLibrary::new(self.media_service(), self.notices.clone(), library)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            Arc::new(self.service::<UserResource>()),
            Arc::new(self.service::<ContentResource>()),
        )
    }

    pub fn settings_page(&mut self) -> SettingsPage<'_> {
        SettingsPage::new(&mut self.theme, &self.settings)
    }

    pub fn layout(&self) -> AdminLayout {
        AdminLayout::new(self.overlay(OverlayKind::Drawer, "Menu"))
    }
}
