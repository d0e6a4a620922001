use std::sync::Arc;

use cms_authz::{AdminRoute, LoginRequest, Navigation};
use cms_console::Console;
use cms_http::CrudService;
use cms_kernel::settings::{Settings, Theme};
use cms_kernel::RoleResource;
use cms_store::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY};
use cms_testkit::FakeCmsApi;

fn settings_for(api: &FakeCmsApi) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = api.base_url().to_string();
    settings
}

#[tokio::test]
async fn protected_route_redirects_until_login() {
    let api = FakeCmsApi::spawn().await.unwrap();
    let mut console =
        Console::with_store(settings_for(&api), Arc::new(MemoryStore::new())).unwrap();

    let nav = console.navigate("/admin/users");
    assert_eq!(nav, Navigation::Redirected(AdminRoute::Login));
    assert_eq!(console.current_path(), "/login");

    console.login(LoginRequest::email("a@b.com")).await.unwrap();
    assert!(console.is_authenticated());
    assert_eq!(console.current_path(), "/admin");
    assert_eq!(console.history().entries(), vec!["/", "/admin"]);

    let nav = console.navigate("/admin/users");
    assert_eq!(nav, Navigation::Allowed(AdminRoute::Users));
}

#[tokio::test]
async fn login_token_is_sent_as_bearer() {
    let api = FakeCmsApi::spawn().await.unwrap();
    let mut console =
        Console::with_store(settings_for(&api), Arc::new(MemoryStore::new())).unwrap();

    console.login(LoginRequest::email("a@b.com")).await.unwrap();
    console.service::<RoleResource>().list(None).await.unwrap();

    assert_eq!(
        api.last_request().unwrap().authorization.as_deref(),
        Some("Bearer demo-token-a@b.com")
    );

    console.logout().unwrap();
    console.service::<RoleResource>().list(None).await.unwrap();
    assert_eq!(api.last_request().unwrap().authorization, None);
}

#[tokio::test]
async fn logout_clears_token_and_reload_is_signed_out() {
    let api = FakeCmsApi::spawn().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(&api);
    settings.storage.path = dir.path().join("state.json");

    let mut console = Console::bootstrap(settings.clone()).unwrap();
    console.login(LoginRequest::email("a@b.com")).await.unwrap();

    let reloaded = Console::bootstrap(settings.clone()).unwrap();
    assert!(reloaded.is_authenticated());

    console.logout().unwrap();
    assert_eq!(console.current_path(), "/login");
    let store = FileStore::open(&settings.storage.path).unwrap();
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

    let reloaded = Console::bootstrap(settings).unwrap();
    assert!(!reloaded.is_authenticated());
    assert_eq!(
        reloaded.navigate("/admin/settings"),
        Navigation::Redirected(AdminRoute::Login)
    );
}

#[tokio::test]
async fn blank_email_login_fails_and_stays_signed_out() {
    let api = FakeCmsApi::spawn().await.unwrap();
    let mut console =
        Console::with_store(settings_for(&api), Arc::new(MemoryStore::new())).unwrap();

    let mut page = cms_console::pages::LoginPage::new();
    page.email = "   ".into();
    assert!(!page.submit(&mut console).await);
    assert_eq!(page.error(), Some("Login failed"));
    assert!(!console.is_authenticated());

    page.email = "ops@cms.test".into();
    page.password = "secret".into();
    assert!(page.submit(&mut console).await);
    assert_eq!(page.error(), None);
    assert_eq!(console.current_path(), "/admin");
}

#[tokio::test]
async fn theme_toggle_persists_across_reopen() {
    let api = FakeCmsApi::spawn().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_for(&api);
    settings.storage.path = dir.path().join("state.json");

    let mut console = Console::bootstrap(settings.clone()).unwrap();
    assert_eq!(console.theme().current(), Theme::Light);
    let mut page = console.settings_page();
    assert_eq!(page.toggle_theme().unwrap(), Theme::Dark);
    assert_eq!(page.view().api_base_url, api.base_url());

    let reopened = Console::bootstrap(settings).unwrap();
    assert_eq!(reopened.theme().current(), Theme::Dark);
}
