use anyhow::{anyhow, bail, Context};
use cms_authz::{AdminRoute, LoginRequest, Navigation};
use cms_console::pages::LoginPage;
use cms_console::{breadcrumbs, page_title, Console, ResourceForm, ResourcePage, SubmitOutcome};
use cms_http::{error_message, ApiError, CrudService, UploadFile};
use cms_kernel::settings::Theme;
use cms_kernel::{MediaResource, Pagination, Resource};
use serde_json::{json, Map, Value};

use crate::output::{ask, print_json, report_notice};
use crate::{MediaAction, ResourceAction, ThemeAction};

fn failure(err: &ApiError, fallback: &str) -> anyhow::Error {
    anyhow!("{}", error_message(err, fallback))
}

fn parse_object(data: &str) -> anyhow::Result<Map<String, Value>> {
    serde_json::from_str(data).context("--data must be a JSON object")
}

/// Enter the admin route listing `kind`. Fails when the guard sends us to login.
fn enter(console: &Console, kind: &str) -> anyhow::Result<()> {
    let route = console
        .registry()
        .get(kind)
        .map(|descriptor| descriptor.route)
        .ok_or_else(|| anyhow!("unknown resource kind '{}'", kind))?;

    match console.navigate(route) {
        Navigation::Redirected(AdminRoute::Login) => {
            bail!("not signed in; run `cms login --email <address>` first")
        }
        _ => Ok(()),
    }
}

pub fn status(console: &Console) -> anyhow::Result<()> {
    let settings = console.settings();
    print_json(&json!({
        "environment": settings.environment,
        "api": settings.api.base_url,
        "storage": settings.storage.path,
        "authenticated": console.is_authenticated(),
        "theme": console.theme().current(),
    }))
}

pub async fn login(console: &mut Console, email: String, password: String) -> anyhow::Result<()> {
    let mut page = LoginPage::new();
    page.email = email;
    page.password = password;

    if !page.submit(console).await {
        bail!("{}", page.error().unwrap_or("Login failed"));
    }
    print_json(&json!({
        "authenticated": true,
        "path": console.current_path(),
    }))
}

pub async fn login_with_token(console: &mut Console, token: String) -> anyhow::Result<()> {
    console
        .login(LoginRequest::Token(token))
        .await
        .context("failed to sign in")?;
    print_json(&json!({
        "authenticated": true,
        "path": console.current_path(),
    }))
}

pub fn logout(console: &mut Console) -> anyhow::Result<()> {
    console.logout().context("failed to sign out")?;
    print_json(&json!({
        "authenticated": false,
        "path": console.current_path(),
    }))
}

pub fn theme(console: &mut Console, action: Option<ThemeAction>) -> anyhow::Result<()> {
    let mut page = console.settings_page();
    match action {
        Some(ThemeAction::Toggle) => {
            page.toggle_theme().context("failed to save theme")?;
        }
        Some(ThemeAction::Light) => page.set_theme(Theme::Light).context("failed to save theme")?,
        Some(ThemeAction::Dark) => page.set_theme(Theme::Dark).context("failed to save theme")?,
        None => {}
    }
    print_json(&page.view())
}

pub fn open(console: &Console, path: &str) -> anyhow::Result<()> {
    let navigation = console.navigate(path);
    let current = console.current_path();
    print_json(&json!({
        "path": current,
        "redirected": !navigation.is_allowed(),
        "title": page_title(&navigation.route()),
        "breadcrumbs": breadcrumbs(&current),
    }))
}

pub fn resources(console: &Console) -> anyhow::Result<()> {
    print_json(console.registry().descriptors())
}

pub async fn resource<F: ResourceForm>(
    console: &Console,
    action: ResourceAction,
) -> anyhow::Result<()> {
    enter(console, <F::Kind as Resource>::NAME)?;
    let mut page = console.page::<F>();

    match action {
        ResourceAction::List { skip, limit } => {
            if skip.is_none() && limit.is_none() {
                page.load().await;
                if let Some(err) = page.error() {
                    bail!("{}", err);
                }
                return print_json(page.items());
            }
            let window = Pagination::new(
                skip.unwrap_or(0),
                limit.unwrap_or(console.settings().api.page_size),
            );
            let items = page
                .service()
                .list(Some(window))
                .await
                .map_err(|err| failure(&err, F::COPY.load_failed))?;
            print_json(&items)
        }
        ResourceAction::Get { id } => {
            let item = page
                .service()
                .get(id)
                .await
                .map_err(|err| failure(&err, F::COPY.load_failed))?;
            print_json(&item)
        }
        ResourceAction::Create { data } => {
            let form: F = serde_json::from_value(Value::Object(parse_object(&data)?))
                .context("invalid form fields")?;
            page.open_create(None);
            *page.form_mut() = form;
            save(console, &mut page).await
        }
        ResourceAction::Update { id, data } => {
            let patch = parse_object(&data)?;
            if !page.open_edit_by_id(id, None).await {
                bail!("{}", page.error().unwrap_or(F::COPY.load_failed));
            }
            let mut fields = serde_json::to_value(page.form()).context("failed to read form")?;
            if let Value::Object(fields) = &mut fields {
                fields.extend(patch);
            }
            *page.form_mut() = serde_json::from_value(fields).context("invalid form fields")?;
            save(console, &mut page).await
        }
        ResourceAction::Delete { id, yes } => {
            let confirm = |prompt: &str| yes || ask(prompt);
            if page.delete(id, &confirm).await {
                report_notice(console);
                return print_json(&json!({ "deleted": id }));
            }
            if let Some(err) = page.error() {
                bail!("{}", err);
            }
            eprintln!("Cancelled");
            Ok(())
        }
    }
}

async fn save<F: ResourceForm>(console: &Console, page: &mut ResourcePage<F>) -> anyhow::Result<()> {
    match page.submit().await {
        SubmitOutcome::Saved(item) => {
            report_notice(console);
            print_json(&item)
        }
        SubmitOutcome::Invalid | SubmitOutcome::FieldRejected => {
            for (field, message) in page.field_errors() {
                eprintln!("{}: {}", field, message);
            }
            bail!("{} was not saved", <F::Kind as Resource>::LABEL)
        }
        SubmitOutcome::Failed => bail!("{}", page.error().unwrap_or(F::COPY.save_failed)),
    }
}

pub async fn media(console: &Console, action: MediaAction) -> anyhow::Result<()> {
    enter(console, MediaResource::NAME)?;
    let mut library = console.media_library();

    match action {
        MediaAction::List => {
            library.load().await;
            if let Some(err) = library.error() {
                bail!("{}", err);
            }
            print_json(library.items())
        }
        MediaAction::Get { id } => {
            let media = console
                .media_service()
                .get(id)
                .await
                .map_err(|err| failure(&err, "Failed to load media"))?;
            print_json(&media)
        }
        MediaAction::Upload { path } => {
            let file = UploadFile::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let uploaded = library.upload(file).await;
            let failed = report_notice(console);
            match uploaded {
                Some(media) => print_json(&media),
                None => bail!("{}", failed.unwrap_or_else(|| "Upload failed".to_string())),
            }
        }
        MediaAction::Delete { id, yes } => {
            let confirm = |prompt: &str| yes || ask(prompt);
            if library.delete(id, &confirm).await {
                report_notice(console);
                return print_json(&json!({ "deleted": id }));
            }
            if let Some(err) = report_notice(console) {
                bail!("{}", err);
            }
            eprintln!("Cancelled");
            Ok(())
        }
    }
}
