use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::services::ServiceResponse;
use crate::session::Session;

/// Print a service envelope and report whether it was a success.
///
/// JSON mode prints the whole envelope; text mode prints the message with
/// validation errors indented underneath.
pub fn output_envelope<T: Serialize>(
    output_format: &OutputFormat,
    response: &ServiceResponse<T>,
) -> anyhow::Result<bool> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Text => {
            if response.success {
                println!("✓ {}", response.message);
            } else {
                eprintln!("Error: {}", response.message);
                let mut fields: Vec<_> = response.errors.iter().collect();
                fields.sort();
                for (field, message) in fields {
                    eprintln!("  {field}: {message}");
                }
            }
        }
    }
    Ok(response.success)
}

/// Print lines under a successful envelope, text mode only.
pub fn output_lines(output_format: &OutputFormat, lines: &[String]) {
    if matches!(output_format, OutputFormat::Text) {
        for line in lines {
            println!("{line}");
        }
    }
}

pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "success": true, "message": message }))?
            );
        }
        OutputFormat::Text => println!("✓ {message}"),
    }
    Ok(())
}

pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "success": false, "message": message }))?
            );
        }
        OutputFormat::Text => eprintln!("Error: {message}"),
    }
    Ok(())
}

/// Surface a forced navigation (logout or expired session) after a command.
pub fn report_redirect(output_format: &OutputFormat, session: &Session) {
    if let Some(to) = session.take_redirect() {
        if matches!(output_format, OutputFormat::Text) {
            eprintln!("Sessionen avslutades, fortsätt via {to}");
        }
    }
}
