use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_cli=warn,todo_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = todo_cli::Cli::parse();
    todo_cli::run(cli).await
}
