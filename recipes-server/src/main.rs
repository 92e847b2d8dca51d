use std::net::SocketAddr;
use std::path::PathBuf;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use recipes_server::{app, Settings, State};

#[derive(Parser, Debug)]
#[command(name = "recipes-server", about = "Development backend for the recipe book")]
struct Args {
    #[arg(long, env = "RECIPES_PORT", default_value_t = 8000)]
    port: u16,
    #[arg(long, env = "RECIPES_DB_PATH", default_value = "recipes-db")]
    db_path: PathBuf,
    #[arg(long, env = "RECIPES_API_KEY", default_value = "dev-api-key")]
    api_key: String,
    #[arg(long, env = "RECIPES_TOKEN_LIFETIME_SECS", default_value_t = 3600)]
    token_lifetime_secs: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = Settings {
        api_key: args.api_key,
        token_lifetime: chrono::Duration::seconds(args.token_lifetime_secs),
    };
    let state = State::open(&args.db_path, settings)?;
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!(%addr, db = %args.db_path.display(), "listening");
    axum::Server::bind(&addr)
        .serve(app(state).into_make_service())
        .await?;
    Ok(())
}
