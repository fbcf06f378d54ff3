//! FinanceFlow main entry point

use clap::Parser;
use financeflow_config::Config;
use financeflow_core::HttpTransport;
use financeflow_web::start_server;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "financeflow")]
#[command(author = "FinanceFlow Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web front end for internal account transfers", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = Config::default_path())]
    config: PathBuf,

    /// Ledger backend base URL, overrides `backend.base_url`
    #[arg(short, long)]
    backend: Option<String>,

    /// Listen port, overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let loaded = Config::load_with_fallback(&args.config);
    let level = match &loaded {
        Ok((config, _)) => config.logging.level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (mut config, fallback) = loaded.map_err(|e| {
        e.report();
        e
    })?;
    match fallback {
        Some(e) => e.report(),
        None => log::info!("Config loaded from {}", args.config.display()),
    }

    if let Some(backend) = args.backend {
        config.backend.base_url = backend;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Err(e) = config.validate() {
        e.report();
        return Err(e.into());
    }

    let transport = HttpTransport::from_config(&config)?;
    start_server(config, Arc::new(transport)).await?;

    Ok(())
}
