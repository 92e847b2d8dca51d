pub mod actions;
pub mod form;
pub mod non_api_structs;
pub mod reducer;
pub mod route;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use actions::Action;
pub use reducer::{AppState, AuthState, RecipesState, ShoppingListState};
pub use route::Route;

/// Key under which the session blob lives in local storage.
pub const USER_DATA_KEY: &str = "userData";

#[derive(Eq, PartialEq, Hash, Clone, Debug, Serialize, Deserialize, Default)]
pub struct Ingredient {
    pub name: String,
    pub amount: u32,
}
impl Ingredient {
    pub fn new(name: impl Into<String>, amount: u32) -> Self {
        Self { name: name.into(), amount }
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub image_path: String,
    #[serde(default, deserialize_with = "ingredients_or_empty")]
    pub ingredients: Vec<Ingredient>,
}

fn ingredients_or_empty<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Ingredient>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_path: impl Into<String>,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_path: image_path.into(),
            ingredients,
        }
    }
}

/// An authenticated user. The token is only handed out while it has not expired.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct User {
    pub email: String,
    pub id: String,
    token: String,
    token_expiration_date: DateTime<Utc>,
}
impl User {
    pub fn new(
        email: impl Into<String>,
        id: impl Into<String>,
        token: impl Into<String>,
        token_expiration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            id: id.into(),
            token: token.into(),
            token_expiration_date,
        }
    }
    pub fn token(&self) -> Option<&str> {
        self.token_at(Utc::now())
    }
    pub fn token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        if self.token.is_empty() || now >= self.token_expiration_date {
            return None;
        }
        Some(&self.token)
    }
    pub fn token_expiration_date(&self) -> DateTime<Utc> {
        self.token_expiration_date
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
    pub return_secure_token: bool,
}
impl AuthRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            return_secure_token: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub kind: String,
    pub id_token: String,
    pub email: String,
    pub refresh_token: String,
    /// Token lifetime in seconds, as a decimal string.
    pub expires_in: String,
    pub local_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
}
impl AuthResponseData {
    pub fn expires_in_secs(&self) -> Option<i64> {
        self.expires_in.trim().parse().ok()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct ApiErrorDetail {
    pub message: String,
}

/// Error body returned by the auth endpoints: `{"error": {"message": "CODE"}}`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}
impl ApiErrorBody {
    pub fn new(code: impl Into<String>) -> Self {
        Self { error: ApiErrorDetail { message: code.into() } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn recipe_without_ingredients_deserializes_empty() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"name":"Soup","description":"Hot","imagePath":"soup.png"}"#,
        )
        .unwrap();
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.image_path, "soup.png");

        let recipe: Recipe = serde_json::from_str(
            r#"{"name":"Soup","description":"Hot","imagePath":"soup.png","ingredients":null}"#,
        )
        .unwrap();
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn expired_user_has_no_token() {
        let now = Utc::now();
        let user = User::new("a@b.c", "id", "tok", now + Duration::seconds(10));
        assert_eq!(user.token_at(now), Some("tok"));
        assert_eq!(user.token_at(now + Duration::seconds(10)), None);
    }

    #[test]
    fn auth_request_uses_wire_names() {
        let json = serde_json::to_value(AuthRequest::new("a@b.c", "secret")).unwrap();
        assert_eq!(json["returnSecureToken"], true);
        assert_eq!(json["email"], "a@b.c");
    }

    #[test]
    fn auth_response_parses_expires_in() {
        let data: AuthResponseData = serde_json::from_str(
            r#"{"kind":"k","idToken":"t","email":"e","refreshToken":"r","expiresIn":"3600","localId":"l"}"#,
        )
        .unwrap();
        assert_eq!(data.expires_in_secs(), Some(3600));
        assert_eq!(data.registered, None);
    }
}
