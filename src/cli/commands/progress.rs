use clap::Subcommand;

use crate::cli::utils::{output_envelope, output_lines, report_redirect};
use crate::cli::{CliContext, OutputFormat};
use crate::models::ProjectProgress;
use crate::services::{ProgressService, ServiceResponse};

#[derive(Subcommand)]
pub enum ProgressCommands {
    #[command(about = "Progress for all projects")]
    All,

    #[command(about = "Progress for one project")]
    Project {
        #[arg(help = "Project id")]
        project_id: String,
    },

    #[command(about = "Detailed progress for one role in one project")]
    Role {
        #[arg(help = "Project id")]
        project_id: String,
        #[arg(help = "Role")]
        role: String,
    },

    #[command(about = "Dashboard statistics over all projects")]
    Stats,
}

fn project_lines(progress: &ProjectProgress) -> Vec<String> {
    let name = progress
        .project_name
        .as_deref()
        .or(progress.project_id.as_deref())
        .unwrap_or("-");
    let mut lines = vec![format!(
        "{name}: {}% ({})",
        progress.total_progress_percentage, progress.last_updated_formatted
    )];
    for row in &progress.role_progress {
        lines.push(format!(
            "  {:<15} {}/{} ({}%)",
            row.role_display_name, row.completed, row.total, row.percentage
        ));
    }
    lines
}

pub async fn handle(
    cmd: ProgressCommands,
    ctx: &CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let service = ctx.progress();

    match cmd {
        ProgressCommands::All => {
            let response = service.all().await;
            if output_envelope(&output_format, &response)? {
                if let Some(list) = &response.data {
                    for progress in list {
                        output_lines(&output_format, &project_lines(progress));
                    }
                }
            }
        }
        ProgressCommands::Project { project_id } => {
            let response = service.project(&project_id).await;
            if output_envelope(&output_format, &response)? {
                if let Some(progress) = &response.data {
                    output_lines(&output_format, &project_lines(progress));
                }
            }
        }
        ProgressCommands::Role { project_id, role } => {
            let response = service.role(&project_id, &role).await;
            if output_envelope(&output_format, &response)? {
                if let Some(detail) = &response.data {
                    let mut lines = vec![format!(
                        "{}: {}/{} ({}%)",
                        detail.role_display_name,
                        detail.completed,
                        detail.total,
                        detail.progress_percentage
                    )];
                    for item in &detail.items {
                        let mark = if item.completed { "[x]" } else { "[ ]" };
                        lines.push(format!(
                            "{mark} {} ({})",
                            item.title, item.completed_at_formatted
                        ));
                    }
                    output_lines(&output_format, &lines);
                }
            }
        }
        ProgressCommands::Stats => {
            let response = service.all().await;
            if !response.success {
                output_envelope(&output_format, &response)?;
                report_redirect(&output_format, &ctx.session);
                return Ok(());
            }

            let list = response.data.unwrap_or_default();
            let stats = ProgressService::statistics(&list);
            let envelope = ServiceResponse::ok(stats.clone(), "Statistik beräknad");
            output_envelope(&output_format, &envelope)?;
            output_lines(
                &output_format,
                &[
                    format!("Projekt totalt:   {}", stats.total_projects),
                    format!("Slutförda:        {}", stats.completed_projects),
                    format!("Pågående:         {}", stats.in_progress_projects),
                    format!("Snittframsteg:    {}%", stats.average_progress),
                    format!("Slutförandegrad:  {}%", stats.completion_rate),
                ],
            );
        }
    }

    report_redirect(&output_format, &ctx.session);
    Ok(())
}
