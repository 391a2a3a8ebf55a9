//! Request forms for the signed-in reader endpoints.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::models::{BuyRecord, ProfileUpdate};

/// `?bookId=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookIdQuery {
    pub book_id: i64,
}

/// Shelf and reading-history writes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingForm {
    pub book_id: i64,
    /// Chapter the reader is on, absent before the first chapter is opened
    #[serde(default, deserialize_with = "blank_as_none")]
    pub pre_content_id: Option<i64>,
}

/// `preContentId=` is sent by the reader page before any chapter is open.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackForm {
    #[validate(length(min = 1, max = 512, message = "Feedback must be between 1 and 512 characters"))]
    pub content: String,
}

/// Profile update. Username and password are deliberately absent.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserForm {
    #[validate(length(min = 1, max = 50, message = "Nickname must be between 1 and 50 characters"))]
    pub nick_name: Option<String>,
    #[validate(length(max = 255, message = "Photo URL must be at most 255 characters"))]
    pub user_photo: Option<String>,
    #[validate(range(min = 0, max = 1, message = "Sex must be 0 or 1"))]
    pub user_sex: Option<i16>,
}

impl From<UpdateUserForm> for ProfileUpdate {
    fn from(form: UpdateUserForm) -> Self {
        Self {
            nick_name: form.nick_name,
            user_photo: form.user_photo,
            user_sex: form.user_sex,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordForm {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password1: String,
    #[serde(default)]
    pub new_password2: String,
}

impl UpdatePasswordForm {
    /// The new password is non-blank and typed the same way twice.
    pub fn confirmed(&self) -> bool {
        !self.new_password1.trim().is_empty() && self.new_password1 == self.new_password2
    }
}

/// Chapter purchase. Any client-sent amount is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyBookIndexForm {
    pub book_id: i64,
    pub book_name: String,
    pub book_index_id: i64,
    pub book_index_name: String,
}

impl BuyBookIndexForm {
    /// Stamps the server-side chapter price onto the purchase.
    pub fn priced(self, book_price: i32) -> BuyRecord {
        BuyRecord {
            book_id: self.book_id,
            book_name: self.book_name,
            book_index_id: self.book_index_id,
            book_index_name: self.book_index_name,
            buy_amount: book_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_form(new1: &str, new2: &str) -> UpdatePasswordForm {
        UpdatePasswordForm {
            old_password: "old".to_string(),
            new_password1: new1.to_string(),
            new_password2: new2.to_string(),
        }
    }

    fn reading_form(json: &str) -> Result<ReadingForm, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_reading_form_blank_position_is_absent() {
        let form = reading_form(r#"{"bookId": 2, "preContentId": ""}"#).unwrap();
        assert_eq!(form.book_id, 2);
        assert_eq!(form.pre_content_id, None);

        assert_eq!(reading_form(r#"{"bookId": 2}"#).unwrap().pre_content_id, None);
        assert_eq!(
            reading_form(r#"{"bookId": 2, "preContentId": "30"}"#)
                .unwrap()
                .pre_content_id,
            Some(30)
        );
        assert!(reading_form(r#"{"bookId": 2, "preContentId": "abc"}"#).is_err());
    }

    #[test]
    fn test_password_confirmation() {
        assert!(password_form("abc", "abc").confirmed());
        assert!(!password_form("abc", "abd").confirmed());
        assert!(!password_form("", "").confirmed());
        assert!(!password_form("   ", "   ").confirmed());
    }

    #[test]
    fn test_update_user_form_rules() {
        assert!(UpdateUserForm::default().validate().is_ok());

        let form = UpdateUserForm {
            nick_name: Some(String::new()),
            user_photo: Some("p".repeat(256)),
            user_sex: Some(2),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_priced_ignores_client_amount() {
        let form = BuyBookIndexForm {
            book_id: 1,
            book_name: "Book".to_string(),
            book_index_id: 9,
            book_index_name: "Chapter 9".to_string(),
        };
        let record = form.priced(35);
        assert_eq!(record.buy_amount, 35);
        assert_eq!(record.book_index_id, 9);
    }
}
