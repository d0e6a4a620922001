mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cms_console::pages::{CategoryForm, ContentForm, RoleForm, TagForm, UserForm};
use cms_console::Console;
use cms_kernel::models::Id;
use cms_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "cms", version, about = "Admin console for a headless CMS API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the session, theme, and API target.
    Status,
    /// Sign in and persist the session token.
    Login {
        #[arg(long, required_unless_present = "token")]
        email: Option<String>,
        #[arg(long, requires = "email")]
        password: Option<String>,
        /// Use a token issued elsewhere instead of signing in.
        #[arg(long, conflicts_with = "email")]
        token: Option<String>,
    },
    /// Sign out and forget the stored token.
    Logout,
    /// Show or change the colour theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Navigate to an admin path through the route guard.
    Open { path: String },
    /// List the resource kinds the console manages.
    Resources,
    Users {
        #[command(subcommand)]
        action: ResourceAction,
    },
    Roles {
        #[command(subcommand)]
        action: ResourceAction,
    },
    Content {
        #[command(subcommand)]
        action: ResourceAction,
    },
    Categories {
        #[command(subcommand)]
        action: ResourceAction,
    },
    Tags {
        #[command(subcommand)]
        action: ResourceAction,
    },
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Theme { .. } => "theme",
            Command::Open { .. } => "open",
            Command::Resources => "resources",
            Command::Users { .. } => "users",
            Command::Roles { .. } => "roles",
            Command::Content { .. } => "content",
            Command::Categories { .. } => "categories",
            Command::Tags { .. } => "tags",
            Command::Media { .. } => "media",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

#[derive(Debug, Subcommand)]
enum ResourceAction {
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: Id,
    },
    /// Create from a JSON object of form fields.
    Create {
        #[arg(long)]
        data: String,
    },
    /// Merge a JSON object of form fields into the existing item.
    Update {
        id: Id,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: Id,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum MediaAction {
    List,
    Get { id: Id },
    Upload { path: PathBuf },
    Delete {
        id: Id,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load CMS settings")?;
    cms_telemetry::init(&settings.telemetry)?;

    let mut console = Console::bootstrap(settings)?;
    tracing::debug!(command = cli.command.name(), "dispatching");

    match cli.command {
        Command::Status => commands::status(&console),
        Command::Login {
            email,
            password,
            token,
        } => match token {
            Some(token) => commands::login_with_token(&mut console, token).await,
            None => {
                let email = email.unwrap_or_default();
                commands::login(&mut console, email, password.unwrap_or_default()).await
            }
        },
        Command::Logout => commands::logout(&mut console),
        Command::Theme { action } => commands::theme(&mut console, action),
        Command::Open { path } => commands::open(&console, &path),
        Command::Resources => commands::resources(&console),
        Command::Users { action } => commands::resource::<UserForm>(&console, action).await,
        Command::Roles { action } => commands::resource::<RoleForm>(&console, action).await,
        Command::Content { action } => commands::resource::<ContentForm>(&console, action).await,
        Command::Categories { action } => {
            commands::resource::<CategoryForm>(&console, action).await
        }
        Command::Tags { action } => commands::resource::<TagForm>(&console, action).await,
        Command::Media { action } => commands::media(&console, action).await,
    }
}
