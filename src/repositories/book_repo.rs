//! Book, chapter and comment queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{BookComment, BookIndex, CommentView, PageRequest};
use crate::schema::{book_comments, book_indexes, books, users};

/// Comments become public once audited.
const AUDIT_PASSED: i16 = 1;

#[derive(Clone)]
pub struct BookRepository {
    pool: AsyncDbPool,
}

impl BookRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn find_index(&self, index_id: i64) -> Result<Option<BookIndex>, AppError> {
        let mut conn = self.pool.get().await?;

        book_indexes::table
            .find(index_id)
            .select(BookIndex::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Comments filtered by author and/or book, newest first.
    ///
    /// An author sees all of their own comments. Everyone else only sees
    /// audited ones.
    pub async fn list_comments(
        &self,
        user_id: Option<i64>,
        book_id: Option<i64>,
        page: PageRequest,
    ) -> Result<(Vec<CommentView>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let mut count_query = book_comments::table.count().into_boxed();
        let mut list_query = book_comments::table
            .inner_join(books::table)
            .inner_join(users::table)
            .select((
                BookComment::as_select(),
                books::book_name,
                users::nick_name,
                users::user_photo,
            ))
            .into_boxed();

        match user_id {
            Some(uid) => {
                count_query = count_query.filter(book_comments::create_user_id.eq(uid));
                list_query = list_query.filter(book_comments::create_user_id.eq(uid));
            }
            None => {
                count_query = count_query.filter(book_comments::audit_status.eq(AUDIT_PASSED));
                list_query = list_query.filter(book_comments::audit_status.eq(AUDIT_PASSED));
            }
        }
        if let Some(bid) = book_id {
            count_query = count_query.filter(book_comments::book_id.eq(bid));
            list_query = list_query.filter(book_comments::book_id.eq(bid));
        }

        let total: i64 = count_query.get_result(&mut conn).await?;

        let rows: Vec<(BookComment, String, String, Option<String>)> = list_query
            .order((book_comments::create_time.desc(), book_comments::id.desc()))
            .limit(page.limit())
            .offset(page.offset())
            .load(&mut conn)
            .await?;

        let comments = rows
            .into_iter()
            .map(|(comment, book_name, user_name, user_photo)| {
                CommentView::from_parts(comment, book_name, user_name, user_photo)
            })
            .collect();
        Ok((comments, total))
    }
}
