use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Serialize;

use super::format_time;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::user_feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserFeedback {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub create_time: DateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::user_feedbacks)]
pub struct NewUserFeedback {
    pub user_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub id: i64,
    pub content: String,
    pub create_time: String,
}

impl From<UserFeedback> for FeedbackView {
    fn from(feedback: UserFeedback) -> Self {
        Self {
            id: feedback.id,
            content: feedback.content,
            create_time: format_time(&feedback.create_time),
        }
    }
}
