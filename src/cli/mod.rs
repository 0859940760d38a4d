pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::services::{
    ChecklistService, PostService, ProgressService, ProjectService, UserService,
};
use crate::session::{FileStorage, Session};
use crate::stores::{EntityStore, PostsStore, ProjectsStore, UsersStore};

#[derive(Parser)]
#[command(name = "a11y")]
#[command(about = "Admin CLI for the accessibility guide backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "User administration")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },

    #[command(about = "Project administration")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectCommands,
    },

    #[command(about = "Role-scoped posts")]
    Posts {
        #[command(subcommand)]
        cmd: commands::posts::PostCommands,
    },

    #[command(about = "Project checklists per role")]
    Checklists {
        #[command(subcommand)]
        cmd: commands::checklists::ChecklistCommands,
    },

    #[command(about = "Progress tracking and statistics")]
    Progress {
        #[command(subcommand)]
        cmd: commands::progress::ProgressCommands,
    },

    #[command(about = "Resolve an application route against the current session")]
    Open {
        #[arg(help = "Route path, e.g. /dashboard/designer")]
        path: String,
    },
}

#[derive(Debug, Clone)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Shared wiring for every command: the restored session and the HTTP
/// client bound to it. Services and stores are built on demand.
pub struct CliContext {
    pub session: Arc<Session>,
    pub client: Arc<ApiClient>,
}

impl CliContext {
    pub fn from_config() -> anyhow::Result<Self> {
        let session = Arc::new(Session::new(Box::new(FileStorage::from_config())));
        session.initialize();
        let client = Arc::new(ApiClient::from_config(session.clone())?);
        Ok(Self { session, client })
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone())
    }

    pub fn projects(&self) -> ProjectService {
        ProjectService::new(self.client.clone())
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.client.clone())
    }

    pub fn checklists(&self) -> ChecklistService {
        ChecklistService::new(self.client.clone())
    }

    pub fn progress(&self) -> ProgressService {
        ProgressService::new(self.client.clone())
    }

    pub fn users_store(&self) -> UsersStore {
        EntityStore::new(self.users())
    }

    pub fn projects_store(&self) -> ProjectsStore {
        EntityStore::new(self.projects())
    }

    pub fn posts_store(&self) -> PostsStore {
        EntityStore::new(self.posts())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = CliContext::from_config()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::Users { cmd } => commands::users::handle(cmd, &ctx, output_format).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &ctx, output_format).await,
        Commands::Posts { cmd } => commands::posts::handle(cmd, &ctx, output_format).await,
        Commands::Checklists { cmd } => {
            commands::checklists::handle(cmd, &ctx, output_format).await
        }
        Commands::Progress { cmd } => commands::progress::handle(cmd, &ctx, output_format).await,
        Commands::Open { path } => commands::open::handle(&path, &ctx, output_format),
    }
}
