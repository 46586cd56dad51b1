//! Copy every log entry from one store into another.
//!
//! Usage:
//!   daybook-migrate --source sqlite:///root/storage/logs.db --destination postgres://...

use clap::Parser;
use daybook::{db, migrate::migrate, util::init_tracing};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "daybook-migrate")]
#[command(about = "Copy all log entries between storage backends", version)]
struct Args {
    /// Store to read from (SQLite URL or path, or PostgreSQL URL); must exist
    #[arg(long, env = "MIGRATE_SOURCE_URL")]
    source: String,

    /// Store to write into; its table is created if missing
    #[arg(long, env = "MIGRATE_DESTINATION_URL")]
    destination: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let source = db::connect_existing(&args.source).await?;
    let destination = db::connect(&args.destination).await?;
    info!(
        from = source.backend(),
        to = destination.backend(),
        "starting migration"
    );

    let count = migrate(source.as_ref(), destination.as_ref()).await?;
    info!(count, "migration finished");
    Ok(())
}
