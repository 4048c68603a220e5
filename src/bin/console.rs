use clap::Parser;
use commerce_console::cli::{Cli, OutputFormat};
use commerce_console::cli::utils::output_error;
use commerce_console::{is_production, ApiError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let default_filter = if is_production!() { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = commerce_console::cli::run(cli).await {
        let status = e.downcast_ref::<ApiError>().and_then(|api| api.status);
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => output_error(&output_format, &e.to_string(), status)?,
        }
        std::process::exit(1);
    }

    Ok(())
}
