//! Error types for recipes-client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred!";

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity endpoint answered with an error code such as `EMAIL_EXISTS`.
    #[error("auth error: {0}")]
    Auth(String),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("stored value is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid token lifetime: {0:?}")]
    InvalidExpiry(String),

    #[error("not authenticated")]
    NotAuthenticated,
}

impl Error {
    /// Text shown to the user for a failed sign-up or login.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Auth(code) => auth_error_message(code),
            _ => UNKNOWN_ERROR,
        }
    }
}

pub fn auth_error_message(code: &str) -> &'static str {
    match code {
        "EMAIL_EXISTS" => "This email exists already",
        "EMAIL_NOT_FOUND" => "This email does not exist.",
        "INVALID_PASSWORD" => "This password is not correct.",
        _ => UNKNOWN_ERROR,
    }
}
