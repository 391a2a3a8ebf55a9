//! Bookshelf repository.

use diesel::dsl::auto_type;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::DateTime;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Book, PageRequest, ReadingEntryView};
use crate::schema::{books, user_bookshelves};

/// Rows of `user_id` whose book still exists; listing and count share it.
#[auto_type]
fn shelf_entries(user_id: i64) -> _ {
    user_bookshelves::table
        .inner_join(books::table)
        .filter(user_bookshelves::user_id.eq(user_id))
}

#[derive(Clone)]
pub struct BookshelfRepository {
    pool: AsyncDbPool,
}

impl BookshelfRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn contains(&self, user_id: i64, book_id: i64) -> Result<bool, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(
            user_bookshelves::table
                .filter(user_bookshelves::user_id.eq(user_id))
                .filter(user_bookshelves::book_id.eq(book_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Inserts the shelf row unless the book is already on the shelf.
    ///
    /// Returns `true` when a row was added.
    pub async fn add_if_absent(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let mut conn = self.pool.get().await?;

        let inserted = diesel::insert_into(user_bookshelves::table)
            .values((
                user_bookshelves::user_id.eq(user_id),
                user_bookshelves::book_id.eq(book_id),
                user_bookshelves::pre_content_id.eq(pre_content_id),
            ))
            .on_conflict((user_bookshelves::user_id, user_bookshelves::book_id))
            .do_nothing()
            .execute(&mut conn)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn remove(&self, user_id: i64, book_id: i64) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            user_bookshelves::table
                .filter(user_bookshelves::user_id.eq(user_id))
                .filter(user_bookshelves::book_id.eq(book_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }

    /// Shelf entries, most recently touched first, plus the total count.
    pub async fn list(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<(Vec<ReadingEntryView>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let total: i64 = shelf_entries(user_id)
            .count()
            .get_result(&mut conn)
            .await?;

        let rows: Vec<(Option<i64>, DateTime, Book)> = shelf_entries(user_id)
            .order((
                user_bookshelves::update_time.desc(),
                user_bookshelves::id.desc(),
            ))
            .select((
                user_bookshelves::pre_content_id,
                user_bookshelves::update_time,
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

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;
    use diesel::pg::Pg;

    #[test]
    fn test_count_only_sees_listed_rows() {
        let count = debug_query::<Pg, _>(&shelf_entries(7).count()).to_string();
        let list = debug_query::<Pg, _>(&shelf_entries(7).select(user_bookshelves::id)).to_string();
        assert!(count.contains("INNER JOIN \"books\""), "{count}");
        assert!(list.contains("INNER JOIN \"books\""), "{list}");
        assert!(count.contains("binds: [7]"), "{count}");
    }
}
