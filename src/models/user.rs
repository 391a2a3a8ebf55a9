use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};

/// User row as stored in the database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    /// Mobile number used as the login name
    pub username: String,
    /// argon2 PHC string
    pub password: String,
    pub nick_name: String,
    pub user_photo: Option<String>,
    pub user_sex: Option<i16>,
    pub account_balance: i64,
    pub status: i16,
    pub create_time: DateTime,
    pub update_time: DateTime,
}

impl User {
    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity {
            user_id: self.id,
            username: self.username.clone(),
            nick_name: self.nick_name.clone(),
        }
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub nick_name: String,
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub nick_name: Option<String>,
    pub user_photo: Option<String>,
    pub user_sex: Option<i16>,
}

/// Profile fields a user may change about themselves
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub nick_name: Option<String>,
    pub user_photo: Option<String>,
    pub user_sex: Option<i16>,
}

impl From<ProfileUpdate> for UpdateUser {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            nick_name: update.nick_name,
            user_photo: update.user_photo,
            user_sex: update.user_sex,
        }
    }
}

/// Who is making the request, as carried by the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: i64,
    pub username: String,
    pub nick_name: String,
}

/// Public view of the caller's own account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub nick_name: String,
    pub user_photo: Option<String>,
    pub user_sex: Option<i16>,
    pub account_balance: i64,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            nick_name: user.nick_name,
            user_photo: user.user_photo,
            user_sex: user.user_sex,
            account_balance: user.account_balance,
        }
    }
}
