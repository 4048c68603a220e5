use std::io::{self, BufRead, Write};

use clap::Subcommand;
use serde_json::json;

use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::guard::GuardDecision;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in and store the access token")]
    Login {
        #[arg(help = "Account email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored access token")]
    Logout,

    #[command(about = "Show current session status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, ctx: &mut CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let login_path = ctx.config.session.login_path.clone();
            if let GuardDecision::Redirect(_) = ctx.guard.evaluate(&login_path) {
                return output_success(
                    &output_format,
                    "Already signed in. Use 'console auth logout' to switch accounts",
                    Some(json!({ "logged_in": true })),
                );
            }

            let password = match password {
                Some(password) => password,
                None => prompt("Password: ")?,
            };

            let status = ctx.auth().login(&email, &password).await?;
            output_success(
                &output_format,
                &format!("Signed in as {}", email),
                Some(serde_json::to_value(&status)?),
            )
        }
        AuthCommands::Logout => {
            ctx.auth().logout()?;
            output_success(&output_format, "Signed out", Some(json!({ "logged_in": false })))
        }
        AuthCommands::Status => {
            let status = ctx.auth().status();
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
                OutputFormat::Text => {
                    println!("Signed in: {}", if status.logged_in { "yes" } else { "no" });
                    println!("Tenant:    {}", status.tenant_id.as_deref().unwrap_or("(none)"));
                }
            }
            Ok(())
        }
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask a yes/no question on stdin; anything but y/yes is a no
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
