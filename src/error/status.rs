//! Business status tags carried by every response envelope.

use std::fmt;

use serde::{Serialize, Serializer};

/// Outcome tag of a request.
///
/// The numeric codes match the ones the reader front-end already switches on,
/// so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Ok,
    Error,
    NotLoggedIn,
    NoAuth,
    ParamError,
    NotFound,
    UsernameExist,
    UsernamePassError,
    TwoPasswordDiff,
    OldPasswordError,
    UserNoBalance,
    VelCodeError,
}

impl ResponseStatus {
    /// Stable string tag used in the `status` field.
    pub fn tag(&self) -> &'static str {
        match self {
            ResponseStatus::Ok => "OK",
            ResponseStatus::Error => "ERROR",
            ResponseStatus::NotLoggedIn => "NOT_LOGGED_IN",
            ResponseStatus::NoAuth => "NO_AUTH",
            ResponseStatus::ParamError => "PARAM_ERROR",
            ResponseStatus::NotFound => "NOT_FOUND",
            ResponseStatus::UsernameExist => "USERNAME_EXIST",
            ResponseStatus::UsernamePassError => "USERNAME_PASS_ERROR",
            ResponseStatus::TwoPasswordDiff => "TWO_PASSWORD_DIFF",
            ResponseStatus::OldPasswordError => "OLD_PASSWORD_ERROR",
            ResponseStatus::UserNoBalance => "USER_NO_BALANCE",
            ResponseStatus::VelCodeError => "VEL_CODE_ERROR",
        }
    }

    /// Numeric code used in the `code` field.
    pub fn code(&self) -> u32 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::Error => 500,
            ResponseStatus::NotLoggedIn => 1001,
            ResponseStatus::NoAuth => 1002,
            ResponseStatus::ParamError => 1003,
            ResponseStatus::NotFound => 1004,
            ResponseStatus::UsernameExist => 1010,
            ResponseStatus::UsernamePassError => 1011,
            ResponseStatus::TwoPasswordDiff => 1012,
            ResponseStatus::OldPasswordError => 1013,
            ResponseStatus::UserNoBalance => 1014,
            ResponseStatus::VelCodeError => 1020,
        }
    }

    /// Default human readable message.
    pub fn message(&self) -> &'static str {
        match self {
            ResponseStatus::Ok => "SUCCESS",
            ResponseStatus::Error => "An internal error occurred, please contact the site administrator",
            ResponseStatus::NotLoggedIn => "Not logged in or the session has expired, please log in again",
            ResponseStatus::NoAuth => "Permission denied",
            ResponseStatus::ParamError => "Invalid request parameters",
            ResponseStatus::NotFound => "The requested record does not exist",
            ResponseStatus::UsernameExist => "This mobile number is already registered",
            ResponseStatus::UsernamePassError => "Wrong mobile number or password",
            ResponseStatus::TwoPasswordDiff => "The two new passwords do not match",
            ResponseStatus::OldPasswordError => "The old password is incorrect",
            ResponseStatus::UserNoBalance => "Insufficient account balance",
            ResponseStatus::VelCodeError => "Wrong verification code",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseStatus::Ok)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for ResponseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_used_by_dispatcher() {
        assert_eq!(ResponseStatus::NotLoggedIn.tag(), "NOT_LOGGED_IN");
        assert_eq!(ResponseStatus::VelCodeError.tag(), "VEL_CODE_ERROR");
        assert_eq!(ResponseStatus::TwoPasswordDiff.tag(), "TWO_PASSWORD_DIFF");
    }

    #[test]
    fn test_codes_match_front_end() {
        assert_eq!(ResponseStatus::Ok.code(), 200);
        assert_eq!(ResponseStatus::NotLoggedIn.code(), 1001);
        assert_eq!(ResponseStatus::TwoPasswordDiff.code(), 1012);
        assert_eq!(ResponseStatus::VelCodeError.code(), 1020);
    }

    #[test]
    fn test_serializes_as_tag() {
        let json = serde_json::to_string(&ResponseStatus::UserNoBalance).unwrap();
        assert_eq!(json, "\"USER_NO_BALANCE\"");
    }

    #[test]
    fn test_only_ok_is_ok() {
        assert!(ResponseStatus::Ok.is_ok());
        assert!(!ResponseStatus::Error.is_ok());
        assert!(!ResponseStatus::NotLoggedIn.is_ok());
    }
}
