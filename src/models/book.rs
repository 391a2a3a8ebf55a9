use diesel::prelude::*;
use jiff_diesel::DateTime;
use serde::Serialize;

use super::format_time;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    pub id: i64,
    pub cat_id: i32,
    pub cat_name: String,
    pub pic_url: String,
    pub book_name: String,
    pub author_name: String,
    pub last_index_id: Option<i64>,
    pub last_index_name: Option<String>,
    pub last_index_update_time: Option<DateTime>,
}

/// A chapter. `book_price` is charged per purchase.
#[derive(Debug, Queryable, Selectable, Clone, Serialize)]
#[diesel(table_name = crate::schema::book_indexes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct BookIndex {
    pub id: i64,
    pub book_id: i64,
    pub index_num: i32,
    pub index_name: String,
    pub word_count: i32,
    pub is_vip: i16,
    pub book_price: i32,
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::book_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookComment {
    pub id: i64,
    pub book_id: i64,
    pub comment_content: String,
    pub reply_count: i32,
    pub audit_status: i16,
    pub create_time: DateTime,
    pub create_user_id: i64,
}

/// Comment joined with its book and author for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub book_id: i64,
    pub book_name: String,
    pub comment_content: String,
    pub reply_count: i32,
    pub create_time: String,
    pub create_user_id: i64,
    pub create_user_name: String,
    pub create_user_photo: Option<String>,
}

impl CommentView {
    pub fn from_parts(
        comment: BookComment,
        book_name: String,
        user_name: String,
        user_photo: Option<String>,
    ) -> Self {
        Self {
            id: comment.id,
            book_id: comment.book_id,
            book_name,
            comment_content: comment.comment_content,
            reply_count: comment.reply_count,
            create_time: format_time(&comment.create_time),
            create_user_id: comment.create_user_id,
            create_user_name: user_name,
            create_user_photo: user_photo,
        }
    }
}
