use reqwest::Client;
use recipes_common::{ApiErrorBody, AuthRequest, AuthResponseData, Recipe};
use crate::{ClientConfig, Error, Result};

pub async fn sign_up(client: &Client, config: &ClientConfig, request: &AuthRequest) -> Result<AuthResponseData> {
    authenticate(client, &config.sign_up_url(), &config.api_key, request).await
}

pub async fn login(client: &Client, config: &ClientConfig, request: &AuthRequest) -> Result<AuthResponseData> {
    authenticate(client, &config.verify_password_url(), &config.api_key, request).await
}

async fn authenticate(client: &Client, url: &str, api_key: &str, request: &AuthRequest) -> Result<AuthResponseData> {
    let response = client
        .post(url)
        .query(&[("key", api_key)])
        .json(request)
        .send()
        .await?;
    if response.status().is_success() {
        return Ok(response.json::<_>().await?);
    }
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => Err(Error::Auth(body.error.message)),
        Err(_) => Err(Error::Status(status)),
    }
}

/// Reads the whole recipe document. An empty document comes back as `null`.
pub async fn fetch_recipes(client: &Client, config: &ClientConfig, token: &str) -> Result<Vec<Recipe>> {
    let recipes = client
        .get(config.recipes_url())
        .query(&[("auth", token)])
        .send()
        .await?
        .error_for_status()?
        .json::<Option<Vec<Recipe>>>()
        .await?;
    Ok(recipes.unwrap_or_default())
}

/// Replaces the whole recipe document.
pub async fn store_recipes(client: &Client, config: &ClientConfig, token: &str, recipes: &[Recipe]) -> Result<()> {
    client
        .put(config.recipes_url())
        .query(&[("auth", token)])
        .json(recipes)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
