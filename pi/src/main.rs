//! `pi`: create Kubernetes resources from the command line
use clap::Parser;
use pi::{cli::App, exec};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    let app = App::parse();

    if let Err(e) = exec::run(&app, std::io::stdout().lock()).await {
        eprintln!("{}", exec::error_message(&e));
        std::process::exit(exec::exit_code(&e));
    }
}
