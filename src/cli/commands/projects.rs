use clap::Subcommand;

use crate::cli::utils::{output_envelope, output_lines, report_redirect};
use crate::cli::{CliContext, OutputFormat};
use crate::models::Project;
use crate::services::validation::ProjectInput;
use crate::services::ServiceResponse;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List projects")]
    List {
        #[arg(long, help = "Free-text filter on name")]
        search: Option<String>,
        #[arg(long, help = "Only the ten most recently created")]
        recent: bool,
    },

    #[command(about = "Show one project")]
    Get {
        #[arg(help = "Project id")]
        id: String,
    },

    #[command(about = "Create a project")]
    Create {
        #[arg(help = "Project name, 3-100 characters")]
        name: String,
    },

    #[command(about = "Rename a project")]
    Update {
        #[arg(help = "Project id")]
        id: String,
        #[arg(help = "New name")]
        name: String,
    },

    #[command(about = "Delete a project")]
    Delete {
        #[arg(help = "Project id")]
        id: String,
    },
}

fn project_line(project: &Project) -> String {
    format!("{:<30} {}", project.name, project.created_at_formatted)
}

pub async fn handle(
    cmd: ProjectCommands,
    ctx: &CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut store = ctx.projects_store();

    match cmd {
        ProjectCommands::List { search, recent } => {
            store.fetch().await;
            if let Some(message) = store.error() {
                let response: ServiceResponse<()> = ServiceResponse::fail(message);
                output_envelope(&output_format, &response)?;
                report_redirect(&output_format, &ctx.session);
                return Ok(());
            }

            let selected: Vec<&Project> = if let Some(term) = &search {
                store.search(term)
            } else if recent {
                store.recently_created()
            } else {
                store.items().iter().collect()
            };

            let rows: Vec<Project> = selected.into_iter().cloned().collect();
            let response =
                ServiceResponse::ok(rows.clone(), format!("Hämtade {} projekt", rows.len()));
            output_envelope(&output_format, &response)?;
            output_lines(&output_format, &rows.iter().map(project_line).collect::<Vec<_>>());
        }
        ProjectCommands::Get { id } => {
            let response = ctx.projects().get(&id).await;
            if output_envelope(&output_format, &response)? {
                if let Some(project) = &response.data {
                    output_lines(&output_format, &[project_line(project)]);
                }
            }
            report_redirect(&output_format, &ctx.session);
        }
        ProjectCommands::Create { name } => {
            let input = ProjectInput { name };
            let response = store.create(&input).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
        ProjectCommands::Update { id, name } => {
            let input = ProjectInput { name };
            let response = store.update(&id, &input).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
        ProjectCommands::Delete { id } => {
            let response = store.delete(&id).await;
            output_envelope(&output_format, &response)?;
            report_redirect(&output_format, &ctx.session);
        }
    }

    Ok(())
}
