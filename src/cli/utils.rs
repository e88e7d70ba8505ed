use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

use crate::cli::OutputFormat;
use crate::client::{Confirm, Submitted};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a list: JSON array, or pre-rendered text lines
pub fn output_collection<T: Serialize>(
    output_format: &OutputFormat,
    items: &[T],
    lines: impl IntoIterator<Item = String>,
    empty_message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty_message);
            }
            for line in lines {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// What a mutating command reports before the refreshed list
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { message: String, data: Option<Value> },
    Failure { message: String, code: &'static str },
}

impl Outcome {
    pub fn submitted<T: Serialize>(item_type: &str, submitted: &Submitted<T>) -> anyhow::Result<Self> {
        Ok(match submitted {
            Submitted::Created(doc) => Outcome::Success {
                message: format!("{} created", item_type),
                data: Some(serde_json::to_value(doc)?),
            },
            Submitted::Updated(doc) => Outcome::Success {
                message: format!("{} updated", item_type),
                data: Some(serde_json::to_value(doc)?),
            },
            Submitted::Rejected(status) => Outcome::Failure {
                message: format!("{} not saved (server answered {})", item_type, status),
                code: "REJECTED",
            },
        })
    }
}

/// Single JSON envelope: the record under `data.record`, the list under `data.rows`
fn outcome_document<R: Serialize>(outcome: &Outcome, rows: &[R]) -> anyhow::Result<Value> {
    let rows = serde_json::to_value(rows)?;
    Ok(match outcome {
        Outcome::Success { message, data } => json!({
            "success": true,
            "message": message,
            "data": { "record": data, "rows": rows }
        }),
        Outcome::Failure { message, code } => json!({
            "success": false,
            "error": message,
            "error_code": code,
            "data": { "rows": rows }
        }),
    })
}

/// Report a mutation and the list it left behind. JSON mode prints exactly
/// one document.
pub fn output_outcome<R: Serialize>(
    output_format: &OutputFormat,
    outcome: Outcome,
    rows: &[R],
    lines: impl IntoIterator<Item = String>,
    empty_message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome_document(&outcome, rows)?)?);
        }
        OutputFormat::Text => {
            match &outcome {
                Outcome::Success { message, .. } => output_success(output_format, message, None)?,
                Outcome::Failure { message, code } => output_error(output_format, message, Some(*code))?,
            }
            output_collection(output_format, rows, lines, empty_message)?;
        }
    }
    Ok(())
}

/// Interactive y/N prompt on stdin
pub fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{}? [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Confirmation source for delete commands; `--yes` skips the prompt
pub fn confirmation(assume_yes: bool) -> impl Confirm {
    move |prompt: &str| assume_yes || confirm_on_stdin(prompt)
}
