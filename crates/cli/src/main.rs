use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::{Settings, StoreBackend};

#[derive(Debug, Parser)]
#[command(name = "shelf", about = "Book catalogue service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Print the resolved configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => shelf_app::serve(&settings).await,
        Command::Migrate => {
            if settings.database.backend != StoreBackend::Postgres {
                tracing::warn!("database.backend is not postgres; migrating {} anyway", settings.database.url);
            }
            let applied = shelf_app::migrate(&settings).await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}
