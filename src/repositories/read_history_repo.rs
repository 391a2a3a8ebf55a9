//! Reading history repository.

use diesel::dsl::auto_type;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff_diesel::DateTime;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Book, PageRequest, ReadingEntryView};
use crate::schema::{books, user_bookshelves, user_read_histories};

/// Rows of `user_id` whose book still exists; listing and count share it.
#[auto_type]
fn history_entries(user_id: i64) -> _ {
    user_read_histories::table
        .inner_join(books::table)
        .filter(user_read_histories::user_id.eq(user_id))
}

#[derive(Clone)]
pub struct ReadHistoryRepository {
    pool: AsyncDbPool,
}

impl ReadHistoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Records the reader's position in a book.
    ///
    /// Upserts the (user, book) history row and moves the matching shelf
    /// row, if any, to the same chapter. Both writes share one transaction.
    pub async fn record(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                diesel::insert_into(user_read_histories::table)
                    .values((
                        user_read_histories::user_id.eq(user_id),
                        user_read_histories::book_id.eq(book_id),
                        user_read_histories::pre_content_id.eq(pre_content_id),
                    ))
                    .on_conflict((user_read_histories::user_id, user_read_histories::book_id))
                    .do_update()
                    .set((
                        user_read_histories::pre_content_id
                            .eq(excluded(user_read_histories::pre_content_id)),
                        user_read_histories::update_time.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;

                diesel::update(
                    user_bookshelves::table
                        .filter(user_bookshelves::user_id.eq(user_id))
                        .filter(user_bookshelves::book_id.eq(book_id)),
                )
                .set((
                    user_bookshelves::pre_content_id.eq(pre_content_id),
                    user_bookshelves::update_time.eq(diesel::dsl::now),
                ))
                .execute(conn)
                .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// History entries, most recent first, plus the total count.
    pub async fn list(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<(Vec<ReadingEntryView>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let total: i64 = history_entries(user_id)
            .count()
            .get_result(&mut conn)
            .await?;

        let rows: Vec<(Option<i64>, DateTime, Book)> = history_entries(user_id)
            .order((
                user_read_histories::update_time.desc(),
                user_read_histories::id.desc(),
            ))
            .select((
                user_read_histories::pre_content_id,
                user_read_histories::update_time,
                Book::as_select(),
            ))
            .limit(page.limit())
            .offset(page.offset())
            .load(&mut conn)
            .await?;

        let entries = rows
            .into_iter()
            .map(|(pre_content_id, updated, book)| {
                ReadingEntryView::from_parts(pre_content_id, updated, book)
            })
            .collect();
        Ok((entries, total))
    }
}
