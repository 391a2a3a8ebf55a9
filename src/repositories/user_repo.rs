//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewUser, UpdateUser, User};

/// User repository holding an async connection pool.
///
/// `AsyncDbPool` is reference counted, so cloning the repository is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new account.
    ///
    /// A taken username surfaces as `AppError::Duplicate` from the
    /// `users_username_key` constraint.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_username(&self, name: &str) -> Result<Option<User>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(username.eq(name))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn username_exists(&self, name: &str) -> Result<bool, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(users.filter(username.eq(name))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Applies the non-`None` profile fields and bumps `update_time`.
    ///
    /// Returns the number of affected rows (0 or 1).
    pub async fn update_profile(
        &self,
        user_id: i64,
        update_data: UpdateUser,
    ) -> Result<usize, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set((&update_data, update_time.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_password(&self, user_id: i64, hash: &str) -> Result<usize, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set((password.eq(hash), update_time.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
