use clap::Subcommand;

use crate::cli::utils::{output_envelope, output_lines, report_redirect};
use crate::cli::{CliContext, OutputFormat};
use crate::models::User;
use crate::services::validation::UserInput;
use crate::services::ServiceResponse;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List users")]
    List {
        #[arg(long, help = "Only users with this role")]
        role: Option<String>,
        #[arg(long, help = "Free-text filter on username and role")]
        search: Option<String>,
        #[arg(long, help = "Only the ten most recently created")]
        recent: bool,
    },

    #[command(about = "Show one user")]
    Get {
        #[arg(help = "User id")]
        id: String,
    },

    #[command(about = "Create a user")]
    Create {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Role: admin, designer, developer or tester")]
        role: String,
        #[arg(long, help = "Password, at least 6 characters")]
        password: String,
    },

    #[command(about = "Update a user")]
    Update {
        #[arg(help = "User id")]
        id: String,
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Role")]
        role: String,
        #[arg(long, help = "New password, kept unchanged when omitted")]
        password: Option<String>,
    },

    #[command(about = "Delete a user")]
    Delete {
        #[arg(help = "User id")]
        id: String,
    },
}

fn user_line(user: &User) -> String {
    format!(
        "{:<20} {:<15} {}",
        user.username, user.role_display_name, user.created_at_formatted
    )
}

pub async fn handle(
    cmd: UserCommands,
    ctx: &CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut store = ctx.users_store();

    match cmd {
        UserCommands::List { role, search, recent } => {
            store.fetch().await;
            if let Some(message) = store.error() {
                let response: ServiceResponse<()> = ServiceResponse::fail(message);
                output_envelope(&output_format, &response)?;
                report_redirect(&output_format, &ctx.session);
                return Ok(());
            }

            let selected: Vec<&User> = if let Some(role) = &role {
                store.by_role(role)
            } else if let Some(term) = &search {
                store.search(term)
            } else if recent {
                store.recently_created()
            } else {
                store.items().iter().collect()
            };

            let rows: Vec<User> = selected.into_iter().cloned().collect();
            let response =
                ServiceResponse::ok(rows.clone(), format!("Hämtade {} användare", rows.len()));
            output_envelope(&output_format, &response)?;
            output_lines(&output_format, &rows.iter().map(user_line).collect::<Vec<_>>());
        }
        UserCommands::Get { id } => {
            let response = ctx.users().get(&id).await;
            if output_envelope(&output_format, &response)? {
                if let Some(user) = &response.data {
                    output_lines(&output_format, &[user_line(user)]);
                }
            }
            report_redirect(&output_format, &ctx.session);
        }
        UserCommands::Create { username, role, password } => {
            let input = UserInput { username, role, password: Some(password) };
            let response = store.create(&input).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
        UserCommands::Update { id, username, role, password } => {
            let input = UserInput { username, role, password };
            let response = store.update(&id, &input).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
        UserCommands::Delete { id } => {
            let response = store.delete(&id).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
    }

    Ok(())
}
