use anyhow::Result;
use axum::Router;
use clap::Parser;
use sift_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sift-server")]
#[command(about = "HTTP search front end over a directory of HTML pages")]
struct Args {
    /// Directory of HTML documents to index
    #[arg(long, default_value = "./input_pages")]
    corpus: PathBuf,
    /// Stopword file, one term per line
    #[arg(long, default_value = "./stopwords.txt")]
    stopwords: PathBuf,
    /// Append-only query log
    #[arg(long, default_value = "./output.txt")]
    query_log: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(ServerConfig {
        corpus_dir: args.corpus,
        stopwords: args.stopwords,
        query_log: args.query_log,
    })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
