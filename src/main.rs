use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nestegg::api::{Cli, Command, RequestError, run_http_server, run_project_command};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = run_http_server(&args).await {
                error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Project(args) => match run_project_command(&args) {
            Ok(output) => println!("{output}"),
            Err(RequestError::Invalid(fields)) => {
                eprintln!("Please fix the following errors:");
                for field in &fields {
                    eprintln!("  --{}: {}", kebab_case(field.field), field.message);
                }
                std::process::exit(2);
            }
            Err(e) => {
                error!(error = %e, "projection failed");
                std::process::exit(1);
            }
        },
    }
}

/// `currentAge` -> `current-age`, matching the CLI flag names.
fn kebab_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
