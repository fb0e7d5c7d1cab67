use anyhow::Context;
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Command-line entrypoint for the bookstore service
#[derive(Debug, Parser)]
#[command(name = "bookstore-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Print the merged OpenAPI document
    Openapi {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective settings as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    match cli.command {
        Command::Serve => {
            bookstore_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "bookstore-cli serving");
            bookstore_app::serve(settings).await
        }
        Command::Openapi { pretty } => {
            let catalog = bookstore_app::initial_catalog(&settings).into_shared();
            let registry = bookstore_app::build_registry(&catalog, &settings)?;
            let spec = bookstore_http::router::collect_openapi(
                &registry,
                &settings.server.api_prefix,
            );
            print_json(&spec, pretty)
        }
        Command::Settings => print_json(&settings, true),
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
