pub mod commands;
pub mod context;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::resources::ResourceKind;

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Commerce Console - administration for multi-tenant storefronts")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign out and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Active tenant context")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::tenant::TenantCommands,
    },

    #[command(about = "List records with paging, search and filters")]
    List {
        #[arg(help = "Resource (tenant, staff, role, permission, order, payment, campaign, coupon, review)")]
        resource: ResourceKind,
        #[command(flatten)]
        args: commands::records::ListArgs,
    },

    #[command(about = "Show one record")]
    Get {
        #[arg(help = "Resource type")]
        resource: ResourceKind,
        #[arg(help = "Record ID")]
        id: String,
    },

    #[command(about = "Create a record from --data or stdin")]
    Create {
        #[arg(help = "Resource type")]
        resource: ResourceKind,
        #[command(flatten)]
        body: commands::records::BodyArgs,
    },

    #[command(about = "Update a record from --data or stdin")]
    Update {
        #[arg(help = "Resource type")]
        resource: ResourceKind,
        #[arg(help = "Record ID")]
        id: String,
        #[command(flatten)]
        body: commands::records::BodyArgs,
    },

    #[command(about = "Delete a record after confirmation")]
    Delete {
        #[arg(help = "Resource type")]
        resource: ResourceKind,
        #[arg(help = "Record ID")]
        id: String,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "Change the status of a tenant or order")]
    Status {
        #[arg(help = "Resource type")]
        resource: ResourceKind,
        #[arg(help = "Record ID")]
        id: String,
        #[arg(help = "New status")]
        status: String,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let mut ctx = context::CliContext::load()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &mut ctx, output_format).await,
        Commands::Tenant { cmd } => commands::tenant::handle(cmd, &mut ctx, output_format).await,
        Commands::List { resource, args } => {
            commands::records::list(resource, args, &mut ctx, output_format).await
        }
        Commands::Get { resource, id } => {
            commands::records::get(resource, &id, &mut ctx, output_format).await
        }
        Commands::Create { resource, body } => {
            commands::records::create(resource, body, &mut ctx, output_format).await
        }
        Commands::Update { resource, id, body } => {
            commands::records::update(resource, &id, body, &mut ctx, output_format).await
        }
        Commands::Delete { resource, id, yes } => {
            commands::records::delete(resource, &id, yes, &mut ctx, output_format).await
        }
        Commands::Status { resource, id, status, yes } => {
            commands::records::status(resource, &id, &status, yes, &mut ctx, output_format).await
        }
    }
}
