use serde_json::{json, Map, Value};

use crate::cli::OutputFormat;
use crate::listing::{EmptyState, Notification, NotificationKind};
use crate::query::Page;
use crate::resources::{record_id, ResourceKind};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".to_string(), json!(true));
            response.insert("message".to_string(), json!(message));

            match data {
                Some(Value::Object(fields)) => response.extend(fields),
                Some(other) => {
                    response.insert("data".to_string(), other);
                }
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
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
    status: Option<u16>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(status) = status {
                response["status"] = json!(status);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Toast equivalent for a finished row action
pub fn output_notification(
    output_format: &OutputFormat,
    notification: &Notification,
) -> anyhow::Result<()> {
    match notification.kind {
        NotificationKind::Success => output_success(output_format, &notification.message, None),
        NotificationKind::Failure => Err(anyhow::anyhow!(notification.message.clone())),
    }
}

/// Output one record
pub fn output_record(output_format: &OutputFormat, record: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => match record.as_object() {
            Some(fields) => {
                for (key, value) in fields {
                    println!("{:<20} {}", key, display_value(value));
                }
            }
            None => println!("{}", display_value(record)),
        },
    }
    Ok(())
}

/// Output a page of records as a table, or the empty state that applies
pub fn output_page(
    output_format: &OutputFormat,
    kind: ResourceKind,
    page: &Page,
    empty_state: Option<EmptyState>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(page)?);
        }
        OutputFormat::Text => {
            match empty_state {
                Some(EmptyState::NoSearchResults) => {
                    println!("No {} records match this search", kind);
                    return Ok(());
                }
                Some(EmptyState::Onboarding) => {
                    println!("No {} records yet", kind);
                    println!("Create the first one with: console create {} --data '{{...}}'", kind);
                    return Ok(());
                }
                None => {}
            }

            println!("{:<26} {:<32} {:<12}", "ID", "NAME", "STATUS");
            println!("{}", "-".repeat(72));
            for record in &page.results {
                println!(
                    "{:<26} {:<32} {:<12}",
                    record_id(record).unwrap_or_else(|| "-".to_string()),
                    record_label(record),
                    record.get("status").map(display_value).unwrap_or_default(),
                );
            }
            println!();
            println!(
                "Page {} of {} ({} total)",
                page.current_page,
                page.total_pages.max(1),
                page.total_count
            );
        }
    }
    Ok(())
}

/// Best short name for a record, whatever resource it is
fn record_label(record: &Value) -> String {
    ["name", "title", "code", "email", "domain", "orderNumber"]
        .iter()
        .find_map(|field| record.get(field))
        .map(display_value)
        .unwrap_or_default()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
