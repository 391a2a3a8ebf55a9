use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{BookIndex, CommentView, Page, PageRequest};
use crate::repositories::BookRepository;

/// Read access to chapters and comments.
#[async_trait]
pub trait BookService: Send + Sync {
    /// Looks up a chapter, failing with `NotFound` when it does not exist.
    async fn query_book_index(&self, book_index_id: i64) -> AppResult<BookIndex>;

    /// Comments filtered by author and/or book, newest first.
    async fn list_comment_by_page(
        &self,
        user_id: Option<i64>,
        book_id: Option<i64>,
        page: PageRequest,
    ) -> AppResult<Page<CommentView>>;
}

#[derive(Clone)]
pub struct PgBookService {
    repo: BookRepository,
}

impl PgBookService {
    pub fn new(repo: BookRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl BookService for PgBookService {
    async fn query_book_index(&self, book_index_id: i64) -> AppResult<BookIndex> {
        self.repo
            .find_index(book_index_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "book_index".to_string(),
                field: "id".to_string(),
                value: book_index_id.to_string(),
            })
    }

    async fn list_comment_by_page(
        &self,
        user_id: Option<i64>,
        book_id: Option<i64>,
        page: PageRequest,
    ) -> AppResult<Page<CommentView>> {
        let (list, total) = self.repo.list_comments(user_id, book_id, page).await?;
        Ok(Page::new(list, page, total))
    }
}
