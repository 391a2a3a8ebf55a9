use jiff_diesel::DateTime;
use serde::Serialize;

use super::{Book, format_time};

/// A book on the shelf or in the reading history, with its latest chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingEntryView {
    pub book_id: i64,
    /// Last chapter the user had open
    pub pre_content_id: Option<i64>,
    pub book_name: String,
    pub author_name: String,
    pub pic_url: String,
    pub cat_id: i32,
    pub cat_name: String,
    pub last_index_id: Option<i64>,
    pub last_index_name: Option<String>,
    pub last_index_update_time: Option<String>,
    pub update_time: String,
}

impl ReadingEntryView {
    pub fn from_parts(pre_content_id: Option<i64>, update_time: DateTime, book: Book) -> Self {
        Self {
            book_id: book.id,
            pre_content_id,
            book_name: book.book_name,
            author_name: book.author_name,
            pic_url: book.pic_url,
            cat_id: book.cat_id,
            cat_name: book.cat_name,
            last_index_id: book.last_index_id,
            last_index_name: book.last_index_name,
            last_index_update_time: book.last_index_update_time.as_ref().map(format_time),
            update_time: format_time(&update_time),
        }
    }
}
