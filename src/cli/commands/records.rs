use std::io::{self, BufRead, IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

use clap::Args;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::cli::commands::auth::confirm;
use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::http::RequestBody;
use crate::listing::{debounced, ConfirmModal, ListPage, LoadState, RowAction};
use crate::resources::ResourceKind;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
    pub page: u32,

    #[arg(long, help = "Rows per page")]
    pub limit: Option<u32>,

    #[arg(long, help = "Search text")]
    pub search: Option<String>,

    #[arg(long = "filter", value_name = "KEY=VALUE", help = "Filter selector, repeatable (e.g. status=active)")]
    pub filters: Vec<String>,

    #[arg(long, help = "Keep reading search text from stdin and re-list as it settles")]
    pub follow: bool,
}

#[derive(Args, Debug, Default)]
pub struct BodyArgs {
    #[arg(long, help = "JSON body (read from stdin when omitted)")]
    pub data: Option<String>,

    #[arg(long = "attach", value_name = "FIELD=PATH", help = "Upload a file as a multipart field, repeatable")]
    pub attachments: Vec<String>,
}

pub async fn list(
    resource: ResourceKind,
    args: ListArgs,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_session(&collection_location(resource))?;

    let filters = args
        .filters
        .iter()
        .map(|pair| split_pair(pair, "--filter"))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let keys: Vec<&str> = filters.iter().map(|(key, _)| key.as_str()).collect();

    let page_size = args.limit.unwrap_or(ctx.config.listing.default_page_size);
    let mut page = ListPage::new(ctx.api.resource(resource), page_size).with_filters(&keys);
    for (key, value) in &filters {
        page.set_filter(key, value);
    }
    if let Some(search) = &args.search {
        page.apply_search(search.trim());
    }
    page.set_page(args.page.max(1) - 1);

    page.refresh().await;
    render(&page, resource, &output_format)?;

    if args.follow {
        let quiet = Duration::from_millis(ctx.config.listing.search_debounce_ms);
        let (input, mut search) = debounced(quiet);
        tokio::task::spawn_blocking(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(text) => input.type_text(text),
                    Err(_) => break,
                }
            }
        });

        while page.follow_search(&mut search).await {
            if let Err(e) = render(&page, resource, &output_format) {
                // keep following after a failed load
                output_error(&output_format, &e.to_string(), None)?;
            }
        }
    }

    Ok(())
}

fn render(page: &ListPage, resource: ResourceKind, output_format: &OutputFormat) -> anyhow::Result<()> {
    match page.state() {
        LoadState::Loaded(loaded) => output_page(output_format, resource, loaded, page.empty_state()),
        LoadState::Errored(message) => Err(anyhow::anyhow!(message.clone())),
        LoadState::Idle | LoadState::Loading => Err(anyhow::anyhow!("List did not finish loading")),
    }
}

pub async fn get(
    resource: ResourceKind,
    id: &str,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_session(&item_location(resource, id))?;

    match ctx.api.resource(resource).get(id).await? {
        Some(record) => output_record(&output_format, &record),
        None => Err(anyhow::anyhow!("A record id is required")),
    }
}

pub async fn create(
    resource: ResourceKind,
    body: BodyArgs,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_session(&collection_location(resource))?;

    let request_body = read_body(body).await?;
    let created = ctx.api.resource(resource).create(request_body).await?;
    output_success(
        &output_format,
        &format!("{} created successfully", resource.label()),
        Some(created),
    )
}

pub async fn update(
    resource: ResourceKind,
    id: &str,
    body: BodyArgs,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_session(&item_location(resource, id))?;

    let request_body = read_body(body).await?;
    let updated = ctx.api.resource(resource).update(id, request_body).await?;
    output_success(
        &output_format,
        &format!("{} updated successfully", resource.label()),
        Some(updated),
    )
}

pub async fn delete(
    resource: ResourceKind,
    id: &str,
    yes: bool,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    row_action(resource, id, RowAction::Delete, yes, ctx, output_format).await
}

pub async fn status(
    resource: ResourceKind,
    id: &str,
    status: &str,
    yes: bool,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    if resource.spec().status.is_none() {
        return Err(anyhow::anyhow!("{} records have no status to update", resource));
    }
    let action = RowAction::UpdateStatus(status.trim().to_string());
    row_action(resource, id, action, yes, ctx, output_format).await
}

/// Load the row, hold it in the confirmation modal and run the action once confirmed
async fn row_action(
    resource: ResourceKind,
    id: &str,
    action: RowAction,
    yes: bool,
    ctx: &mut CliContext,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    ctx.require_session(&collection_location(resource))?;

    let handle = ctx.api.resource(resource);
    let record = handle
        .get(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("A record id is required"))?;

    let question = match &action {
        RowAction::Delete => format!("Delete {} '{}'?", resource, id),
        RowAction::UpdateStatus(status) => format!("Set {} '{}' status to '{}'?", resource, id, status),
    };

    let mut modal = ConfirmModal::default();
    modal.open(record, action);

    if !yes && !confirm(&question)? {
        modal.cancel();
        return output_success(&output_format, "Cancelled", None);
    }

    match modal.confirm(&handle).await {
        Some(notification) => output_notification(&output_format, &notification),
        None => Ok(()),
    }
}

async fn read_body(args: BodyArgs) -> anyhow::Result<RequestBody> {
    let json = match args.data {
        Some(data) => Some(data),
        None if args.attachments.is_empty() || !io::stdin().is_terminal() => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Some(input).filter(|input| !input.trim().is_empty())
        }
        None => None,
    };

    let fields: Option<Value> = match json {
        Some(text) => Some(serde_json::from_str(&text).map_err(|e| anyhow::anyhow!("Invalid JSON body: {}", e))?),
        None => None,
    };

    if args.attachments.is_empty() {
        return fields
            .map(RequestBody::Json)
            .ok_or_else(|| anyhow::anyhow!("No request body provided. Use --data or pipe JSON to stdin"));
    }

    let mut form = Form::new();
    if let Some(Value::Object(fields)) = fields {
        for (key, value) in fields {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            form = form.text(key, text);
        }
    }
    for attachment in &args.attachments {
        let (field, path) = split_pair(attachment, "--attach")?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path, e))?;
        let file_name = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| field.clone());
        form = form.part(field, Part::bytes(bytes).file_name(file_name));
    }
    Ok(RequestBody::Multipart(form))
}

fn split_pair(pair: &str, flag: &str) -> anyhow::Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(anyhow::anyhow!("{} expects KEY=VALUE, got '{}'", flag, pair)),
    }
}

/// Dashboard route a command stands in for
fn collection_location(resource: ResourceKind) -> String {
    format!("/{}s", resource)
}

fn item_location(resource: ResourceKind, id: &str) -> String {
    format!("/{}s/{}", resource, id.trim())
}
