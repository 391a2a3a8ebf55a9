//! Reader account operations.
//!
//! `UserService` is the seam the HTTP layer talks to. `PgUserService`
//! implements it over the diesel repositories.

use async_trait::async_trait;

use crate::error::{AppError, AppResult, ResponseStatus};
use crate::models::{
    BuyRecord, CallerIdentity, FeedbackView, NewUser, NewUserBuyRecord, NewUserFeedback, Page,
    PageRequest, ProfileUpdate, ReadingEntryView, UserProfile,
};
use crate::repositories::{
    BookshelfRepository, BuyRecordRepository, FeedbackRepository, ReadHistoryRepository,
    UserRepository,
};
use crate::utils::{hash_password, verify_password};

/// Everything a signed-in reader can do with their account.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Checks credentials, failing with `USERNAME_PASS_ERROR`.
    async fn login(&self, username: &str, password: &str) -> AppResult<CallerIdentity>;

    /// Creates an account, failing with `USERNAME_EXIST` when the name is taken.
    async fn register(&self, username: &str, password: &str) -> AppResult<CallerIdentity>;

    async fn query_is_in_shelf(&self, user_id: i64, book_id: i64) -> AppResult<bool>;

    /// Adds a book to the shelf. Adding a book twice is a no-op.
    async fn add_to_book_shelf(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> AppResult<()>;

    async fn remove_from_book_shelf(&self, user_id: i64, book_id: i64) -> AppResult<()>;

    async fn list_book_shelf_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<ReadingEntryView>>;

    async fn list_read_history_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<ReadingEntryView>>;

    /// Records the reading position and moves the shelf bookmark with it.
    async fn add_read_history(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> AppResult<()>;

    async fn add_feedback(&self, user_id: i64, content: String) -> AppResult<()>;

    async fn list_user_feedback_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<FeedbackView>>;

    async fn user_info(&self, user_id: i64) -> AppResult<UserProfile>;

    async fn update_user_info(&self, user_id: i64, update: ProfileUpdate) -> AppResult<()>;

    /// Replaces the password, failing with `OLD_PASSWORD_ERROR` on a bad old one.
    async fn update_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()>;

    /// Buys one chapter, failing with `USER_NO_BALANCE` when funds are short.
    async fn buy_book_index(&self, user_id: i64, record: BuyRecord) -> AppResult<()>;
}

fn user_not_found(user_id: i64) -> AppError {
    AppError::NotFound {
        entity: "user".to_string(),
        field: "id".to_string(),
        value: user_id.to_string(),
    }
}

/// PostgreSQL-backed [`UserService`].
#[derive(Clone)]
pub struct PgUserService {
    users: UserRepository,
    bookshelves: BookshelfRepository,
    read_histories: ReadHistoryRepository,
    feedbacks: FeedbackRepository,
    buy_records: BuyRecordRepository,
}

impl PgUserService {
    pub fn new(
        users: UserRepository,
        bookshelves: BookshelfRepository,
        read_histories: ReadHistoryRepository,
        feedbacks: FeedbackRepository,
        buy_records: BuyRecordRepository,
    ) -> Self {
        Self {
            users,
            bookshelves,
            read_histories,
            feedbacks,
            buy_records,
        }
    }
}

#[async_trait]
impl UserService for PgUserService {
    async fn login(&self, username: &str, password: &str) -> AppResult<CallerIdentity> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|user| verify_password(password, &user.password))
            .ok_or(AppError::Status(ResponseStatus::UsernamePassError))?;

        tracing::debug!(user_id = user.id, "User logged in");
        Ok(user.identity())
    }

    async fn register(&self, username: &str, password: &str) -> AppResult<CallerIdentity> {
        if self.users.username_exists(username).await? {
            return Err(ResponseStatus::UsernameExist.into());
        }

        let new_user = NewUser {
            username: username.to_string(),
            password: hash_password(password)?,
            nick_name: username.to_string(),
        };
        let user = self.users.create(new_user).await.map_err(|e| match e {
            // lost a race with a concurrent registration
            AppError::Duplicate { .. } => AppError::Status(ResponseStatus::UsernameExist),
            other => other,
        })?;

        tracing::info!(user_id = user.id, "Registered new user");
        Ok(user.identity())
    }

    async fn query_is_in_shelf(&self, user_id: i64, book_id: i64) -> AppResult<bool> {
        self.bookshelves.contains(user_id, book_id).await
    }

    async fn add_to_book_shelf(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> AppResult<()> {
        let added = self
            .bookshelves
            .add_if_absent(user_id, book_id, pre_content_id)
            .await?;
        tracing::debug!(user_id, book_id, added, "Bookshelf add");
        Ok(())
    }

    async fn remove_from_book_shelf(&self, user_id: i64, book_id: i64) -> AppResult<()> {
        self.bookshelves.remove(user_id, book_id).await?;
        Ok(())
    }

    async fn list_book_shelf_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<ReadingEntryView>> {
        let (list, total) = self.bookshelves.list(user_id, page).await?;
        Ok(Page::new(list, page, total))
    }

    async fn list_read_history_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<ReadingEntryView>> {
        let (list, total) = self.read_histories.list(user_id, page).await?;
        Ok(Page::new(list, page, total))
    }

    async fn add_read_history(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> AppResult<()> {
        self.read_histories
            .record(user_id, book_id, pre_content_id)
            .await
    }

    async fn add_feedback(&self, user_id: i64, content: String) -> AppResult<()> {
        self.feedbacks
            .create(NewUserFeedback { user_id, content })
            .await
    }

    async fn list_user_feedback_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<FeedbackView>> {
        let (list, total) = self.feedbacks.list_by_user(user_id, page).await?;
        Ok(Page::new(list, page, total).map(FeedbackView::from))
    }

    async fn user_info(&self, user_id: i64) -> AppResult<UserProfile> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn update_user_info(&self, user_id: i64, update: ProfileUpdate) -> AppResult<()> {
        match self.users.update_profile(user_id, update.into()).await? {
            0 => Err(user_not_found(user_id)),
            _ => Ok(()),
        }
    }

    async fn update_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        if !verify_password(old_password, &user.password) {
            return Err(ResponseStatus::OldPasswordError.into());
        }

        let hash = hash_password(new_password)?;
        self.users.update_password(user_id, &hash).await?;
        tracing::info!(user_id, "Password changed");
        Ok(())
    }

    async fn buy_book_index(&self, user_id: i64, record: BuyRecord) -> AppResult<()> {
        let book_index_id = record.book_index_id;
        let amount = record.buy_amount;
        self.buy_records
            .purchase(NewUserBuyRecord::for_user(user_id, record))
            .await?;
        tracing::info!(user_id, book_index_id, amount, "Chapter purchased");
        Ok(())
    }
}
