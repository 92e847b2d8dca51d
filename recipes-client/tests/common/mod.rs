use std::net::SocketAddr;
use recipes_client::{ClientConfig, LocalStorage, Store};
use recipes_server::{app, Settings, State};

pub const API_KEY: &str = "test-api-key";
pub const EMAIL: &str = "cook@example.com";
pub const PASSWORD: &str = "correct-horse";

/// Starts a dev server on an ephemeral port backed by a temporary database.
pub async fn spawn_server(token_lifetime: chrono::Duration) -> ClientConfig {
    let settings = Settings { api_key: API_KEY.to_string(), token_lifetime };
    let state = State::temporary(settings).expect("Failed to open temporary database");
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app(state).into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    ClientConfig::local(format!("http://{}", addr), API_KEY)
}

pub async fn default_server() -> ClientConfig {
    spawn_server(chrono::Duration::seconds(3600)).await
}

pub fn new_store(config: &ClientConfig) -> Store {
    Store::new(config.clone(), LocalStorage::temporary().expect("Failed to open local storage"))
}
