//! Side effects. After the reducer has run, each action is offered to
//! [`Effects::run`], which may talk to the network or local storage and
//! hands back follow-up work for the store.

use chrono::{Duration, Utc};
use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;
use recipes_common::{Action, AppState, AuthRequest, AuthResponseData, Recipe, Route, User};
use crate::timer::LogoutTimer;
use crate::{client, ClientConfig, Error, LocalStorage, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Dispatch(Action),
    Navigate(Route),
}

pub struct Effects {
    client: Client,
    config: ClientConfig,
    storage: LocalStorage,
    timer: LogoutTimer,
}

impl Effects {
    pub fn new(config: ClientConfig, storage: LocalStorage, scheduled: UnboundedSender<Action>) -> Self {
        Self {
            client: Client::new(),
            config,
            storage,
            timer: LogoutTimer::new(scheduled),
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn logout_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// `state` is the state after the reducer has seen `action`.
    pub async fn run(&mut self, action: &Action, state: &AppState) -> Vec<Effect> {
        match action {
            Action::SignupStart { email, password } => {
                let request = AuthRequest::new(email.as_str(), password.as_str());
                let response = client::sign_up(&self.client, &self.config, &request).await;
                vec![Effect::Dispatch(self.finish_authentication(response))]
            }
            Action::LoginStart { email, password } => {
                let request = AuthRequest::new(email.as_str(), password.as_str());
                let response = client::login(&self.client, &self.config, &request).await;
                vec![Effect::Dispatch(self.finish_authentication(response))]
            }
            Action::AuthenticateSuccess { redirect: true, .. } => vec![Effect::Navigate(Route::Recipes)],
            Action::AutoLogin => self.auto_login().into_iter().map(Effect::Dispatch).collect(),
            Action::Logout => {
                self.timer.clear();
                if let Err(err) = self.storage.clear_user() {
                    tracing::warn!(error = %err, "could not clear stored session");
                }
                vec![Effect::Navigate(Route::Auth)]
            }
            Action::FetchRecipes => match self.fetch_recipes(state).await {
                Ok(recipes) => vec![Effect::Dispatch(Action::SetRecipes(recipes))],
                Err(err) => {
                    tracing::warn!(error = %err, "fetching recipes failed");
                    Vec::new()
                }
            },
            Action::StoreRecipes => {
                if let Err(err) = self.store_recipes(state).await {
                    tracing::warn!(error = %err, "storing recipes failed");
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn finish_authentication(&mut self, response: Result<AuthResponseData>) -> Action {
        match response.and_then(|data| self.handle_authentication(&data)) {
            Ok(action) => action,
            Err(err) => {
                tracing::warn!(error = %err, "authentication failed");
                Action::AuthenticateFail(err.user_message().to_string())
            }
        }
    }

    fn handle_authentication(&mut self, data: &AuthResponseData) -> Result<Action> {
        let invalid = || Error::InvalidExpiry(data.expires_in.clone());
        let expires_in = data.expires_in_secs().filter(|secs| *secs > 0).ok_or_else(invalid)?;
        let expiration_date = expires_in
            .checked_mul(1000)
            .map(Duration::milliseconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(invalid)?;
        let user = User::new(data.email.as_str(), data.local_id.as_str(), data.id_token.as_str(), expiration_date);
        self.storage.save_user(&user)?;
        self.timer.set(std::time::Duration::from_secs(expires_in as u64));
        Ok(Action::AuthenticateSuccess {
            email: data.email.clone(),
            user_id: data.local_id.clone(),
            token: data.id_token.clone(),
            expiration_date,
            redirect: true,
        })
    }

    fn auto_login(&mut self) -> Option<Action> {
        let stored = match self.storage.load_user() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                tracing::debug!("no stored session");
                return None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable stored session");
                return None;
            }
        };
        let user = User::from(stored);
        let now = Utc::now();
        let token = user.token_at(now)?.to_string();
        let remaining = (user.token_expiration_date() - now).to_std().unwrap_or_default();
        self.timer.set(remaining);
        Some(Action::AuthenticateSuccess {
            email: user.email.clone(),
            user_id: user.id.clone(),
            token,
            expiration_date: user.token_expiration_date(),
            redirect: false,
        })
    }

    async fn fetch_recipes(&self, state: &AppState) -> Result<Vec<Recipe>> {
        let token = current_token(state)?;
        client::fetch_recipes(&self.client, &self.config, &token).await
    }

    async fn store_recipes(&self, state: &AppState) -> Result<()> {
        let token = current_token(state)?;
        client::store_recipes(&self.client, &self.config, &token, &state.recipes.recipes).await
    }
}

fn current_token(state: &AppState) -> Result<String> {
    state
        .auth
        .user
        .as_ref()
        .and_then(|user| user.token())
        .map(str::to_string)
        .ok_or(Error::NotAuthenticated)
}
