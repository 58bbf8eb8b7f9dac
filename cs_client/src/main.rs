//! A terminal client for the car listing storefront.
//!
//! Browses the catalog, keeps a local garage, and manages favorites,
//! reviews and listings against the storefront REST backend.

use anyhow::{Context, Result};
use car_store::Storefront;
use car_store::storage::FileStore;
use cs_client::{
    actions, api_client::ApiClient, config::ClientConfig, logging, repl, tui_app::TuiApp,
};
use pico_args::Arguments;
use std::path::PathBuf;
use std::sync::Arc;

const HELP: &str = "\
Browse and manage a car listing storefront

USAGE:
  cs_client [OPTIONS]

OPTIONS:
  --api URL             Backend URL  [default: http://localhost:3000/api]
  --storage PATH        Local storage file  [default: .car_store/storage.json]
  --tui                 Use TUI (Terminal UI) mode [default: false]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  CS_API_URL, CS_STORAGE_PATH, CS_REQUEST_TIMEOUT_SECS,
  CS_FAVORITES_REFRESH_SECS, CS_LOG_FILE, RUST_LOG
";

struct Args {
    api_url: Option<String>,
    storage_path: Option<PathBuf>,
    use_tui: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        api_url: pargs.opt_value_from_str("--api").ok().flatten(),
        storage_path: pargs.opt_value_from_str("--storage").ok().flatten(),
        use_tui: pargs.contains("--tui"),
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env(args.api_url, args.storage_path)
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let log_file = args.use_tui.then_some(config.log_file.as_path());
    logging::init(log_file).context("Failed to initialize logging")?;
    tracing::info!(api_url = %config.api_url, "Starting storefront client");

    let store = FileStore::open(&config.storage_path).with_context(|| {
        format!(
            "Failed to open local storage at {}",
            config.storage_path.display()
        )
    })?;
    let api = ApiClient::new(&config.api_url, config.request_timeout)?;
    let storefront = Storefront::new(Arc::new(api), Arc::new(store));

    storefront.start().await;
    let refresh = actions::spawn_favorites_refresh(storefront.clone(), config.favorites_refresh);

    let result = if args.use_tui {
        let terminal = ratatui::init();
        let result = TuiApp::new(storefront).await.run(terminal).await;
        ratatui::restore();
        result
    } else {
        repl::run(storefront).await
    };

    refresh.abort();
    tracing::info!("Client stopped");
    result
}
