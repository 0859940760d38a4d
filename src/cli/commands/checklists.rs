use clap::Subcommand;

use crate::cli::utils::{output_envelope, output_lines, report_redirect};
use crate::cli::{CliContext, OutputFormat};
use crate::models::Checklist;
use crate::services::validation::ChecklistItemInput;

#[derive(Subcommand)]
pub enum ChecklistCommands {
    #[command(about = "Show the checklist for one project and role")]
    Get {
        #[arg(help = "Project id")]
        project_id: String,
        #[arg(help = "Role")]
        role: String,
    },

    #[command(about = "List all checklists for one project")]
    List {
        #[arg(help = "Project id")]
        project_id: String,
    },

    #[command(about = "Add a checklist item")]
    AddItem {
        #[arg(help = "Project id")]
        project_id: String,
        #[arg(help = "Role")]
        role: String,
        #[arg(help = "Title, 3-100 characters")]
        title: String,
        #[arg(long, help = "Content, 10-1000 characters")]
        content: String,
    },

    #[command(about = "Update a checklist item")]
    UpdateItem {
        #[arg(help = "Project id")]
        project_id: String,
        #[arg(help = "Role")]
        role: String,
        #[arg(help = "Item id")]
        item_id: String,
        #[arg(help = "Title")]
        title: String,
        #[arg(long, help = "Content")]
        content: String,
    },

    #[command(about = "Remove a checklist item")]
    RemoveItem {
        #[arg(help = "Project id")]
        project_id: String,
        #[arg(help = "Role")]
        role: String,
        #[arg(help = "Item id")]
        item_id: String,
    },

    #[command(about = "Mark a checklist item as done or not done")]
    Toggle {
        #[arg(help = "Project id")]
        project_id: String,
        #[arg(help = "Role")]
        role: String,
        #[arg(help = "Item id")]
        item_id: String,
        #[arg(help = "New completion state: true or false")]
        completed: bool,
    },
}

fn checklist_lines(checklist: &Checklist) -> Vec<String> {
    let mut lines = vec![format!(
        "{} av {} punkter klara",
        checklist.completed_count(),
        checklist.items.len()
    )];
    for item in &checklist.items {
        let mark = if item.completed { "[x]" } else { "[ ]" };
        lines.push(format!("{mark} {}", item.title));
    }
    lines
}

pub async fn handle(
    cmd: ChecklistCommands,
    ctx: &CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let service = ctx.checklists();

    match cmd {
        ChecklistCommands::Get { project_id, role } => {
            let response = service.get(&project_id, &role).await;
            if output_envelope(&output_format, &response)? {
                if let Some(checklist) = &response.data {
                    output_lines(&output_format, &checklist_lines(checklist));
                }
            }
        }
        ChecklistCommands::List { project_id } => {
            let response = service.list(&project_id).await;
            if output_envelope(&output_format, &response)? {
                if let Some(checklists) = &response.data {
                    for checklist in checklists {
                        let role = checklist.role.as_deref().unwrap_or("-");
                        output_lines(&output_format, &[role.to_string()]);
                        output_lines(&output_format, &checklist_lines(checklist));
                    }
                }
            }
        }
        ChecklistCommands::AddItem { project_id, role, title, content } => {
            let input = ChecklistItemInput { title, content };
            let response = service.add_item(&project_id, &role, &input).await;
            output_envelope(&output_format, &response)?;
        }
        ChecklistCommands::UpdateItem { project_id, role, item_id, title, content } => {
            let input = ChecklistItemInput { title, content };
            let response = service.update_item(&project_id, &role, &item_id, &input).await;
            output_envelope(&output_format, &response)?;
        }
        ChecklistCommands::RemoveItem { project_id, role, item_id } => {
            let response = service.remove_item(&project_id, &role, &item_id).await;
            output_envelope(&output_format, &response)?;
        }
        ChecklistCommands::Toggle { project_id, role, item_id, completed } => {
            let response = service.toggle_item(&project_id, &role, &item_id, completed).await;
            output_envelope(&output_format, &response)?;
        }
    }

    report_redirect(&output_format, &ctx.session);
    Ok(())
}
