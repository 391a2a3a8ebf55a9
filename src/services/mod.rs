//! Service layer for business logic operations.
//!
//! Handlers only see the `UserService` and `BookService` traits, so the
//! PostgreSQL implementations can be swapped for doubles in tests.

mod book_service;
mod user_service;

pub use book_service::{BookService, PgBookService};
pub use user_service::{PgUserService, UserService};

use std::sync::Arc;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every service sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub books: Arc<dyn BookService>,
}

impl Services {
    /// Creates the PostgreSQL-backed services from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: Arc::new(PgUserService::new(
                repos.users,
                repos.bookshelves,
                repos.read_histories,
                repos.feedbacks,
                repos.buy_records,
            )),
            books: Arc::new(PgBookService::new(repos.books)),
        }
    }

    /// Wraps arbitrary implementations, used by tests.
    pub fn from_parts(users: Arc<dyn UserService>, books: Arc<dyn BookService>) -> Self {
        Self { users, books }
    }
}
