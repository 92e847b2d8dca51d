//! Development backend: the two identity endpoints and the recipe document.

pub mod users;

use std::path::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Duration;
use serde_json::json;
use sled::{Db, Tree};
use recipes_common::ApiErrorBody;
use crate::users::Users;

pub type Result<T> = std::result::Result<T, AppError>;

pub enum AppError {
    /// Identity error reported with the remote error code, e.g. `EMAIL_EXISTS`.
    Auth(&'static str),
    PermissionDenied,
    NotFound,
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(code) => (StatusCode::BAD_REQUEST, Json(ApiErrorBody::new(code))).into_response(),
            AppError::PermissionDenied => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Permission denied" }))).into_response()
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, Json(ApiErrorBody::new("NOT_FOUND"))).into_response(),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Something went wrong: {}", err)).into_response()
            }
        }
    }
}

// Lets handlers use `?` on anything that converts into `anyhow::Error`.
impl<E> From<E> for AppError
    where
        E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub api_key: String,
    pub token_lifetime: Duration,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::from("dev-api-key"),
            token_lifetime: Duration::seconds(3600),
        }
    }
}

#[derive(Clone)]
pub struct State {
    users: Users,
    documents: Tree,
    settings: Settings,
}
impl State {
    pub fn open(path: impl AsRef<Path>, settings: Settings) -> anyhow::Result<Self> {
        Self::from_db(sled::open(path)?, settings)
    }
    pub fn temporary(settings: Settings) -> anyhow::Result<Self> {
        Self::from_db(sled::Config::new().temporary(true).open()?, settings)
    }
    fn from_db(db: Db, settings: Settings) -> anyhow::Result<Self> {
        Ok(Self {
            users: Users::new(&db)?,
            documents: db.open_tree("documents")?,
            settings,
        })
    }
}

pub fn app(state: State) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/v1/:method", post(identity::post_v1_accounts))
        .route("/v3/relyingparty/verifyPassword", post(identity::post_verify_password))
        .route("/recipes.json", get(documents::get_recipes).put(documents::put_recipes))
        .layer(Extension(state))
}

async fn root() -> &'static str {
    "Recipe book dev server"
}

mod identity {
    use axum::extract::{Path, Query};
    use axum::{Extension, Json};
    use serde::Deserialize;
    use serde_json::Value;
    use recipes_common::AuthResponseData;
    use crate::users::UserRecord;
    use crate::{AppError, Result, State};

    #[derive(Deserialize)]
    pub struct KeyParams {
        key: Option<String>,
    }

    #[derive(Deserialize, Default)]
    struct Credentials {
        email: Option<String>,
        password: Option<String>,
    }

    fn credentials(state: &State, params: &KeyParams, payload: Value) -> Result<(String, String)> {
        if params.key.as_deref() != Some(state.settings.api_key.as_str()) {
            return Err(AppError::Auth("API_KEY_INVALID"));
        }
        let credentials: Credentials = serde_json::from_value(payload).unwrap_or_default();
        let email = credentials.email.filter(|e| !e.trim().is_empty()).ok_or(AppError::Auth("MISSING_EMAIL"))?;
        let password = credentials.password.filter(|p| !p.is_empty()).ok_or(AppError::Auth("MISSING_PASSWORD"))?;
        Ok((email.trim().to_lowercase(), password))
    }

    fn respond(state: &State, user: &UserRecord, kind: &str, registered: Option<bool>) -> Result<Json<AuthResponseData>> {
        let lifetime = state.settings.token_lifetime;
        let id_token = state.users.open_session(user, lifetime)?;
        Ok(Json(AuthResponseData {
            kind: kind.to_string(),
            id_token,
            email: user.email.clone(),
            refresh_token: uuid::Uuid::new_v4().simple().to_string(),
            expires_in: lifetime.num_seconds().to_string(),
            local_id: user.local_id.clone(),
            registered,
        }))
    }

    pub async fn post_v1_accounts(
        Extension(state): Extension<State>,
        Path(method): Path<String>,
        Query(params): Query<KeyParams>,
        Json(payload): Json<Value>,
    ) -> Result<Json<AuthResponseData>> {
        match method.as_str() {
            "accounts:signUp" => sign_up(&state, &params, payload),
            _ => Err(AppError::NotFound),
        }
    }

    pub async fn post_verify_password(
        Extension(state): Extension<State>,
        Query(params): Query<KeyParams>,
        Json(payload): Json<Value>,
    ) -> Result<Json<AuthResponseData>> {
        verify_password(&state, &params, payload)
    }

    fn sign_up(state: &State, params: &KeyParams, payload: Value) -> Result<Json<AuthResponseData>> {
        let (email, password) = credentials(state, params, payload)?;
        let user = UserRecord::new(email, &password);
        if !state.users.create(&user)? {
            return Err(AppError::Auth("EMAIL_EXISTS"));
        }
        tracing::info!(email = %user.email, "signed up");
        respond(state, &user, "identitytoolkit#SignupNewUserResponse", None)
    }

    fn verify_password(state: &State, params: &KeyParams, payload: Value) -> Result<Json<AuthResponseData>> {
        let (email, password) = credentials(state, params, payload)?;
        let user = state.users.get(&email)?.ok_or(AppError::Auth("EMAIL_NOT_FOUND"))?;
        if !user.verify(&password) {
            return Err(AppError::Auth("INVALID_PASSWORD"));
        }
        tracing::info!(email = %user.email, "logged in");
        respond(state, &user, "identitytoolkit#VerifyPasswordResponse", Some(true))
    }
}

mod documents {
    use axum::extract::Query;
    use axum::{Extension, Json};
    use serde::Deserialize;
    use recipes_common::Recipe;
    use crate::{AppError, Result, State};

    const RECIPES_KEY: &str = "recipes";

    #[derive(Deserialize)]
    pub struct AuthParams {
        auth: Option<String>,
    }

    fn authorize(state: &State, params: &AuthParams) -> Result<()> {
        let token = params.auth.as_deref().ok_or(AppError::PermissionDenied)?;
        match state.users.session(token)? {
            Some(_) => Ok(()),
            None => Err(AppError::PermissionDenied),
        }
    }

    pub async fn get_recipes(
        Extension(state): Extension<State>,
        Query(params): Query<AuthParams>,
    ) -> Result<Json<Option<Vec<Recipe>>>> {
        authorize(&state, &params)?;
        let recipes = match state.documents.get(RECIPES_KEY)? {
            Some(bytes) => Some(serde_json::from_slice(&bytes)?),
            None => None,
        };
        Ok(Json(recipes))
    }

    pub async fn put_recipes(
        Extension(state): Extension<State>,
        Query(params): Query<AuthParams>,
        Json(recipes): Json<Vec<Recipe>>,
    ) -> Result<Json<Vec<Recipe>>> {
        authorize(&state, &params)?;
        state.documents.insert(RECIPES_KEY, serde_json::to_vec(&recipes)?)?;
        state.documents.flush()?;
        tracing::info!(count = recipes.len(), "recipes replaced");
        Ok(Json(recipes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use recipes_common::{AuthRequest, AuthResponseData, Recipe};
    use serde_json::Value;

    async fn spawn() -> String {
        spawn_with(Settings::default()).await
    }

    async fn spawn_with(settings: Settings) -> String {
        let app = app(State::temporary(settings).unwrap());
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn sign_up_then_duplicate() {
        let base = spawn().await;
        let client = reqwest::Client::new();
        let url = format!("{base}/v1/accounts:signUp?key=dev-api-key");
        let ok: AuthResponseData = client.post(&url).json(&AuthRequest::new("cook@example.com", "pw123456"))
            .send().await.unwrap()
            .json().await.unwrap();
        assert_eq!(ok.email, "cook@example.com");
        assert_eq!(ok.expires_in, "3600");

        let dup = client.post(&url).json(&AuthRequest::new("cook@example.com", "pw123456"))
            .send().await.unwrap();
        assert_eq!(dup.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: ApiErrorBody = dup.json().await.unwrap();
        assert_eq!(body.error.message, "EMAIL_EXISTS");
    }

    #[tokio::test]
    async fn wrong_api_key_is_rejected() {
        let base = spawn().await;
        let res = reqwest::Client::new()
            .post(format!("{base}/v3/relyingparty/verifyPassword?key=nope"))
            .json(&AuthRequest::new("a@b.c", "pw"))
            .send().await.unwrap();
        let body: ApiErrorBody = res.json().await.unwrap();
        assert_eq!(body.error.message, "API_KEY_INVALID");
    }

    #[tokio::test]
    async fn recipes_require_token_and_start_null() {
        let base = spawn().await;
        let client = reqwest::Client::new();
        let denied = client.get(format!("{base}/recipes.json")).send().await.unwrap();
        assert_eq!(denied.status(), reqwest::StatusCode::UNAUTHORIZED);

        let auth: AuthResponseData = client
            .post(format!("{base}/v1/accounts:signUp?key=dev-api-key"))
            .json(&AuthRequest::new("cook@example.com", "pw123456"))
            .send().await.unwrap()
            .json().await.unwrap();
        let url = format!("{base}/recipes.json?auth={}", auth.id_token);
        let empty: Value = client.get(&url).send().await.unwrap().json().await.unwrap();
        assert!(empty.is_null());

        let recipes = vec![Recipe::new("Soup", "Hot", "soup.png", vec![])];
        client.put(&url).json(&recipes).send().await.unwrap().error_for_status().unwrap();
        let stored: Vec<Recipe> = client.get(&url).send().await.unwrap().json().await.unwrap();
        assert_eq!(stored, recipes);
    }

    async fn sign_up(client: &reqwest::Client, base: &str) -> AuthResponseData {
        client
            .post(format!("{base}/v1/accounts:signUp?key=dev-api-key"))
            .json(&AuthRequest::new("cook@example.com", "pw123456"))
            .send().await.unwrap()
            .json().await.unwrap()
    }

    async fn assert_denied(client: &reqwest::Client, url: &str) {
        let get = client.get(url).send().await.unwrap();
        assert_eq!(get.status(), reqwest::StatusCode::UNAUTHORIZED);
        let body: Value = get.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Permission denied" }));

        let put = client.put(url).json(&Vec::<Recipe>::new()).send().await.unwrap();
        assert_eq!(put.status(), reqwest::StatusCode::UNAUTHORIZED);
        let body: Value = put.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Permission denied" }));
    }

    #[tokio::test]
    async fn missing_credentials_are_reported() {
        let base = spawn().await;
        let client = reqwest::Client::new();
        let url = format!("{base}/v1/accounts:signUp?key=dev-api-key");
        let cases = [
            (json!({ "email": "", "password": "pw123456" }), "MISSING_EMAIL"),
            (json!({ "password": "pw123456" }), "MISSING_EMAIL"),
            (json!({ "email": "cook@example.com", "password": "" }), "MISSING_PASSWORD"),
            (json!({ "email": "cook@example.com" }), "MISSING_PASSWORD"),
        ];
        for (payload, code) in cases {
            let res = client.post(&url).json(&payload).send().await.unwrap();
            assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
            let body: ApiErrorBody = res.json().await.unwrap();
            assert_eq!(body.error.message, code);
        }

        let res = client
            .post(format!("{base}/v3/relyingparty/verifyPassword?key=dev-api-key"))
            .json(&json!({ "email": "cook@example.com" }))
            .send().await.unwrap();
        let body: ApiErrorBody = res.json().await.unwrap();
        assert_eq!(body.error.message, "MISSING_PASSWORD");
    }

    #[tokio::test]
    async fn unknown_token_is_denied() {
        let base = spawn().await;
        let client = reqwest::Client::new();
        sign_up(&client, &base).await;
        assert_denied(&client, &format!("{base}/recipes.json?auth=not-a-token")).await;
    }

    #[tokio::test]
    async fn expired_token_is_denied() {
        let base = spawn_with(Settings { token_lifetime: Duration::seconds(-1), ..Settings::default() }).await;
        let client = reqwest::Client::new();
        let auth = sign_up(&client, &base).await;
        assert_denied(&client, &format!("{base}/recipes.json?auth={}", auth.id_token)).await;
    }
}
