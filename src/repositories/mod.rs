//! Repository layer for data access operations.

mod book_repo;
mod bookshelf_repo;
mod buy_record_repo;
mod feedback_repo;
mod read_history_repo;
mod user_repo;

pub use book_repo::BookRepository;
pub use bookshelf_repo::BookshelfRepository;
pub use buy_record_repo::BuyRecordRepository;
pub use feedback_repo::FeedbackRepository;
pub use read_history_repo::ReadHistoryRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories over one shared pool.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub books: BookRepository,
    pub bookshelves: BookshelfRepository,
    pub read_histories: ReadHistoryRepository,
    pub feedbacks: FeedbackRepository,
    pub buy_records: BuyRecordRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            books: BookRepository::new(pool.clone()),
            bookshelves: BookshelfRepository::new(pool.clone()),
            read_histories: ReadHistoryRepository::new(pool.clone()),
            feedbacks: FeedbackRepository::new(pool.clone()),
            buy_records: BuyRecordRepository::new(pool),
        }
    }
}
