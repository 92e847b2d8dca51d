use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::User;

/// The session blob kept in local storage under [`crate::USER_DATA_KEY`].
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct StoredUser {
    pub email: String,
    pub id: String,
    #[serde(rename = "_token")]
    pub token: String,
    #[serde(rename = "_tokenExpirationDate")]
    pub token_expiration_date: DateTime<Utc>,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id.clone(),
            token: user.token.clone(),
            token_expiration_date: user.token_expiration_date,
        }
    }
}
impl From<StoredUser> for User {
    fn from(value: StoredUser) -> Self {
        User::new(value.email, value.id, value.token, value.token_expiration_date)
    }
}
