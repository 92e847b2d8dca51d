pub mod client;
pub mod effects;
pub mod error;
pub mod storage;
pub mod store;
pub mod timer;

pub use error::{Error, Result};
pub use storage::LocalStorage;
pub use store::Store;

/// Where the identity and recipe endpoints live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub auth_url: String,
    pub database_url: String,
    pub api_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::local("http://127.0.0.1:8000", "dev-api-key")
    }
}

impl ClientConfig {
    /// Both endpoints served from one base URL, as the dev server does.
    pub fn local(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            auth_url: base_url.clone(),
            database_url: base_url,
            api_key: api_key.into(),
        }
    }
    pub fn sign_up_url(&self) -> String {
        format!("{}/v1/accounts:signUp", self.auth_url.trim_end_matches('/'))
    }
    pub fn verify_password_url(&self) -> String {
        format!("{}/v3/relyingparty/verifyPassword", self.auth_url.trim_end_matches('/'))
    }
    pub fn recipes_url(&self) -> String {
        format!("{}/recipes.json", self.database_url.trim_end_matches('/'))
    }
}
