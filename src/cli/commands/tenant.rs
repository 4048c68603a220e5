use clap::Subcommand;
use serde_json::json;

use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::resources::tenant;

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "Show the active tenant")]
    Current,

    #[command(about = "Switch the active tenant")]
    Use {
        #[arg(help = "Tenant ID")]
        tenant: String,
    },

    #[command(about = "Leave the current tenant context")]
    Clear,

    #[command(about = "Check whether a storefront domain is available")]
    ValidateDomain {
        #[arg(help = "Domain to check")]
        domain: String,
    },
}

pub async fn handle(cmd: TenantCommands, ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TenantCommands::Current => {
            match ctx.credentials.tenant_id() {
                Some(tenant_id) => match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&json!({ "current_tenant": tenant_id }))?)
                    }
                    OutputFormat::Text => println!("Current tenant: {}", tenant_id),
                },
                None => match output_format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&json!({ "current_tenant": null }))?)
                    }
                    OutputFormat::Text => println!("No current tenant set"),
                },
            }
            Ok(())
        }
        TenantCommands::Use { tenant } => {
            let tenant = tenant.trim();
            if tenant.is_empty() {
                return Err(anyhow::anyhow!("Tenant ID cannot be empty"));
            }
            ctx.credentials.set_tenant_id(tenant)?;
            // Cached queries belong to the previous tenant
            ctx.api.cache().clear();
            output_success(
                &output_format,
                &format!("Switched to tenant '{}'", tenant),
                Some(json!({ "current_tenant": tenant })),
            )
        }
        TenantCommands::Clear => {
            ctx.credentials.clear_tenant_id()?;
            ctx.api.cache().clear();
            output_success(&output_format, "Tenant context cleared", Some(json!({ "current_tenant": null })))
        }
        TenantCommands::ValidateDomain { domain } => {
            let result = tenant::validate_domain(ctx.api.client(), &domain).await?;
            output_record(&output_format, &result)
        }
    }
}
