use anyhow::Result;
use clap::{Parser, Subcommand};
use replyai_common::{logger, AppConfig};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }

    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "replyai")]
#[command(about = "ReplyAI - Korean AI reply generation service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Also write logs to this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let level = logger::parse_log_level(&config.log_level);
    match &config.log_dir {
        Some(dir) => logger::setup_logging(dir, level.as_str())?,
        None => logger::setup_console_logging(level.as_str())?,
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::load() reads .env from the working directory as well;
    // the project root copy is loaded first so it wins
    load_dotenv_from_project_root();

    let mut config = AppConfig::load()?;

    if let Some(Commands::Serve { host, port, log_dir }) = cli.command {
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        if log_dir.is_some() {
            config.log_dir = log_dir;
        }
    }

    config.validate()?;
    init_logging(&config)?;

    tracing::info!("ReplyAI starting...");
    tracing::info!("Configuration loaded: {:?}", config);

    if config.openai_api_key.is_empty() {
        tracing::warn!("openai.api.key is not set; generation requests will fail until it is");
    }

    println!("Server listening on http://{}", config.server_bind_address());

    replyai_server::start_server(config).await?;

    Ok(())
}
