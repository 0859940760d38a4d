use serde_json::json;

use crate::cli::{CliContext, OutputFormat};
use crate::routing::{self, Navigation};

/// Resolve a route the way the navigation guard would.
pub fn handle(path: &str, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let navigation = routing::resolve(path, &ctx.session);

    match output_format {
        OutputFormat::Json => {
            let value = match &navigation {
                Navigation::Allow { path, title, announcement } => json!({
                    "allowed": true,
                    "path": path,
                    "title": title,
                    "announcement": announcement,
                }),
                Navigation::Redirect { to } => json!({ "allowed": false, "redirect": to }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => match &navigation {
            Navigation::Allow { title, .. } => println!("✓ {title}"),
            Navigation::Redirect { to } => println!("→ {to}"),
        },
    }

    Ok(())
}
