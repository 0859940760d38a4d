use clap::Subcommand;

use crate::cli::utils::{output_envelope, output_lines, report_redirect};
use crate::cli::{CliContext, OutputFormat};
use crate::models::Post;
use crate::services::validation::PostInput;
use crate::services::ServiceResponse;

#[derive(Subcommand)]
pub enum PostCommands {
    #[command(about = "List posts")]
    List {
        #[arg(long, help = "Role view: admin sees every post")]
        role: Option<String>,
        #[arg(long, help = "Free-text filter on title, content and role")]
        search: Option<String>,
        #[arg(long, help = "Only the ten most recently updated")]
        recent: bool,
    },

    #[command(about = "Show one post")]
    Get {
        #[arg(help = "Post id")]
        id: String,
    },

    #[command(about = "Create a post")]
    Create {
        #[arg(help = "Title, 3-100 characters")]
        title: String,
        #[arg(help = "Target role: designer, developer or tester")]
        role: String,
        #[arg(long, help = "Content, at least 10 characters")]
        content: String,
    },

    #[command(about = "Update a post")]
    Update {
        #[arg(help = "Post id")]
        id: String,
        #[arg(help = "Title")]
        title: String,
        #[arg(help = "Target role")]
        role: String,
        #[arg(long, help = "Content")]
        content: String,
    },

    #[command(about = "Delete a post")]
    Delete {
        #[arg(help = "Post id")]
        id: String,
    },
}

fn post_line(post: &Post) -> String {
    format!(
        "{:<40} {:<15} {}",
        post.title, post.role_display_name, post.updated_at_formatted
    )
}

pub async fn handle(
    cmd: PostCommands,
    ctx: &CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut store = ctx.posts_store();

    match cmd {
        PostCommands::List { role, search, recent } => {
            store.fetch().await;
            if let Some(message) = store.error() {
                let response: ServiceResponse<()> = ServiceResponse::fail(message);
                output_envelope(&output_format, &response)?;
                report_redirect(&output_format, &ctx.session);
                return Ok(());
            }

            let selected: Vec<&Post> = if let Some(role) = &role {
                store.visible_to(role)
            } else if let Some(term) = &search {
                store.search(term)
            } else if recent {
                store.recently_updated()
            } else {
                store.items().iter().collect()
            };

            let rows: Vec<Post> = selected.into_iter().cloned().collect();
            let response =
                ServiceResponse::ok(rows.clone(), format!("Hämtade {} inlägg", rows.len()));
            output_envelope(&output_format, &response)?;
            output_lines(&output_format, &rows.iter().map(post_line).collect::<Vec<_>>());
        }
        PostCommands::Get { id } => {
            let response = ctx.posts().get(&id).await;
            if output_envelope(&output_format, &response)? {
                if let Some(post) = &response.data {
                    output_lines(&output_format, &[post_line(post), post.content.clone()]);
                }
            }
            report_redirect(&output_format, &ctx.session);
        }
        PostCommands::Create { title, role, content } => {
            let input = PostInput { title, content, role };
            let response = store.create(&input).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
        PostCommands::Update { id, title, role, content } => {
            let input = PostInput { title, content, role };
            let response = store.update(&id, &input).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
        PostCommands::Delete { id } => {
            let response = store.delete(&id).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
    }

    Ok(())
}
