use tracing::error;

#[tokio::main]
async fn main() {
  // Minimal CLI: support --version/-V
  let mut args = std::env::args().skip(1);
  if let Some(arg) = args.next() {
    if arg == "--version" || arg == "-V" {
      println!("daybook {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    if arg == "--help" || arg == "-h" {
      eprintln!("Usage: daybook [--version]");
      eprintln!("Configured through DATABASE_URL, TELEGRAM_SECRET, TELEGRAM_USERNAME,");
      eprintln!("PORT, OWNER_NAME, TIMEZONE and TELEGRAM_REQUIRE_SECRET.");
      return;
    }
  }

  daybook::util::init_tracing();
  if let Err(e) = daybook::app::run().await {
    error!("startup failed: {e}");
    std::process::exit(1);
  }
}
