//! Login, registration and token DTOs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Mainland mobile numbers, which double as usernames.
pub static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("mobile number pattern is valid"));

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// Mobile number used as the login name
    #[validate(regex(path = *MOBILE_NUMBER, message = "Username must be a valid mobile number"))]
    pub username: String,
    #[validate(length(min = 1, max = 20, message = "Password must be between 1 and 20 characters"))]
    pub password: String,
    /// Code shown by the verification image
    #[serde(default)]
    pub vel_code: String,
}

/// Payload carrying a freshly minted token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Payload returned by `refreshToken`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub token: String,
    pub username: String,
    pub nick_name: String,
}
