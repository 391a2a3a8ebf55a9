//! User feedback repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUserFeedback, PageRequest, UserFeedback};
use crate::schema::user_feedbacks;

#[derive(Clone)]
pub struct FeedbackRepository {
    pool: AsyncDbPool,
}

impl FeedbackRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, feedback: NewUserFeedback) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(user_feedbacks::table)
            .values(&feedback)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn list_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<(Vec<UserFeedback>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let total: i64 = user_feedbacks::table
            .filter(user_feedbacks::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .await?;

        let items = user_feedbacks::table
            .filter(user_feedbacks::user_id.eq(user_id))
            .order((user_feedbacks::create_time.desc(), user_feedbacks::id.desc()))
            .select(UserFeedback::as_select())
            .limit(page.limit())
            .offset(page.offset())
            .load(&mut conn)
            .await?;

        Ok((items, total))
    }
}
