//! Chapter purchase repository.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, ResponseStatus};
use crate::models::NewUserBuyRecord;
use crate::schema::{user_buy_records, users};

#[derive(Clone)]
pub struct BuyRecordRepository {
    pool: AsyncDbPool,
}

impl BuyRecordRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Charges the buyer and stores the purchase atomically.
    ///
    /// The buyer's row is locked for the duration so concurrent purchases
    /// cannot overdraw the balance. A second purchase of the same chapter
    /// violates `user_buy_records_user_id_book_index_id_key` and rolls back.
    pub async fn purchase(&self, record: NewUserBuyRecord) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let balance: i64 = users::table
                    .find(record.user_id)
                    .select(users::account_balance)
                    .for_update()
                    .first(conn)
                    .await?;

                let amount = i64::from(record.buy_amount);
                if balance < amount {
                    return Err(AppError::Status(ResponseStatus::UserNoBalance));
                }

                diesel::insert_into(user_buy_records::table)
                    .values(&record)
                    .execute(conn)
                    .await?;

                diesel::update(users::table.find(record.user_id))
                    .set((
                        users::account_balance.eq(users::account_balance - amount),
                        users::update_time.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
