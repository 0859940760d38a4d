use clap::Subcommand;

use crate::cli::utils::{output_envelope, output_error, output_lines, output_success};
use crate::cli::{CliContext, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with username and password")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password")]
        password: String,
    },

    #[command(about = "Logout and clear the stored session")]
    Logout,

    #[command(about = "Show current session status")]
    Status,

    #[command(about = "Show the logged-in user")]
    Whoami,
}

pub async fn handle(
    cmd: AuthCommands,
    ctx: &CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let response = ctx.session.login(&ctx.users(), &username, &password).await;
            if output_envelope(&output_format, &response)? {
                if let Some(data) = &response.data {
                    output_lines(
                        &output_format,
                        &[format!(
                            "Inloggad som {} ({})",
                            data.user.username, data.user.role_display_name
                        )],
                    );
                }
            }
            Ok(())
        }
        AuthCommands::Logout => {
            ctx.session.logout();
            // Consume the redirect the logout queued; it has no target here
            ctx.session.take_redirect();
            output_success(&output_format, "Utloggad")
        }
        AuthCommands::Status => {
            if ctx.session.is_authenticated() {
                let who = ctx
                    .session
                    .user()
                    .map(|u| u.username)
                    .unwrap_or_else(|| "okänd".to_string());
                output_success(&output_format, &format!("Inloggad som {who}"))
            } else {
                output_error(&output_format, "Ej inloggad")
            }
        }
        AuthCommands::Whoami => match ctx.session.user() {
            Some(mut user) => {
                user.format_for_display();
                match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&user)?);
                    }
                    OutputFormat::Text => {
                        println!("{} ({})", user.username, user.role_display_name);
                    }
                }
                Ok(())
            }
            None => output_error(&output_format, "Ej inloggad"),
        },
    }
}
