// portfolio-server/src/main.rs

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use rocket::figment::providers::Serialized;
use rocket::{error, info};

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Parser)]
#[command(name = "portfolio-server")]
#[command(about = "Serves the portfolio site with SPA fallback")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides PORT and Portfolio.toml)
    #[arg(short, long)]
    port: Option<u16>,

    /// Document root to serve files from
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Show extended version information
    #[arg(long, action = clap::ArgAction::SetTrue)]
    version_info: bool,
}

#[rocket::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    // Handle --version-info flag
    if cli.version_info {
        println!("portfolio-server {}", built_info::PKG_VERSION);
        println!("Built: {}", built_info::BUILT_TIME_UTC);
        if let Some(commit) = built_info::GIT_COMMIT_HASH {
            println!("Git commit: {}", commit);
        }
        return ExitCode::SUCCESS;
    }

    let mut figment = portfolio_server::figment();
    if let Some(port) = cli.port {
        figment = figment.merge(Serialized::global("port", port));
    }
    if let Some(root) = cli.root {
        figment = figment.merge(Serialized::global("document_root", root));
    }

    match env::current_dir() {
        Ok(path) => info!("Current directory: {}", path.display()),
        Err(e) => error!("Error getting current directory: {}", e),
    };
    info!("Portfolio server v{} starting", built_info::PKG_VERSION);

    match portfolio_server::build_rocket(figment).launch().await {
        Ok(_) => {
            info!("HTTP server closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Portfolio server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
