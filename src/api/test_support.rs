//! Recording service doubles and a router harness for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::routes::create_router;
use crate::cache::{MemoryCache, VerifyCodeStore};
use crate::config::JwtConfig;
use crate::config::settings::MemoryCacheConfig;
use crate::error::{AppError, AppResult, ResponseStatus};
use crate::models::{
    BookIndex, BuyRecord, CallerIdentity, CommentView, FeedbackView, Page, PageRequest,
    ProfileUpdate, ReadingEntryView, UserProfile,
};
use crate::services::{BookService, Services, UserService};
use crate::state::AppState;
use crate::utils::JwtTokenService;
use crate::utils::jwt::Claims;

pub(crate) const SECRET: &str = "router_test_secret_that_is_long_enough";
pub(crate) const CHAPTER_PRICE: i32 = 35;

#[derive(Default)]
pub(crate) struct RecordingUserService {
    calls: Mutex<Vec<String>>,
    pub(crate) purchases: Mutex<Vec<(i64, BuyRecord)>>,
}

impl RecordingUserService {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserService for RecordingUserService {
    async fn login(&self, username: &str, password: &str) -> AppResult<CallerIdentity> {
        self.record(format!("login:{username}"));
        if password != "secret" {
            return Err(ResponseStatus::UsernamePassError.into());
        }
        Ok(CallerIdentity {
            user_id: 7,
            username: username.to_string(),
            nick_name: "reader".to_string(),
        })
    }

    async fn register(&self, username: &str, _password: &str) -> AppResult<CallerIdentity> {
        self.record(format!("register:{username}"));
        Ok(CallerIdentity {
            user_id: 8,
            username: username.to_string(),
            nick_name: username.to_string(),
        })
    }

    async fn query_is_in_shelf(&self, user_id: i64, book_id: i64) -> AppResult<bool> {
        self.record(format!("query_is_in_shelf:{user_id}:{book_id}"));
        Ok(book_id == 1)
    }

    async fn add_to_book_shelf(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> AppResult<()> {
        self.record(format!("add_to_book_shelf:{user_id}:{book_id}:{pre_content_id:?}"));
        Ok(())
    }

    async fn remove_from_book_shelf(&self, user_id: i64, book_id: i64) -> AppResult<()> {
        self.record(format!("remove_from_book_shelf:{user_id}:{book_id}"));
        Ok(())
    }

    async fn list_book_shelf_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<ReadingEntryView>> {
        self.record(format!("list_book_shelf:{user_id}:{}:{}", page.page, page.page_size));
        Ok(Page::new(vec![], page, 0))
    }

    async fn list_read_history_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<ReadingEntryView>> {
        self.record(format!("list_read_history:{user_id}:{}:{}", page.page, page.page_size));
        Ok(Page::new(vec![], page, 0))
    }

    async fn add_read_history(
        &self,
        user_id: i64,
        book_id: i64,
        pre_content_id: Option<i64>,
    ) -> AppResult<()> {
        self.record(format!("add_read_history:{user_id}:{book_id}:{pre_content_id:?}"));
        Ok(())
    }

    async fn add_feedback(&self, user_id: i64, content: String) -> AppResult<()> {
        self.record(format!("add_feedback:{user_id}:{content}"));
        Ok(())
    }

    async fn list_user_feedback_by_page(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<FeedbackView>> {
        self.record(format!("list_feedback:{user_id}:{}:{}", page.page, page.page_size));
        Ok(Page::new(
            vec![FeedbackView {
                id: 1,
                content: "great".to_string(),
                create_time: "2025-01-01 08:00:00".to_string(),
            }],
            page,
            1,
        ))
    }

    async fn user_info(&self, user_id: i64) -> AppResult<UserProfile> {
        self.record(format!("user_info:{user_id}"));
        Ok(UserProfile {
            username: "13800138000".to_string(),
            nick_name: "reader".to_string(),
            user_photo: None,
            user_sex: Some(1),
            account_balance: 120,
        })
    }

    async fn update_user_info(&self, user_id: i64, update: ProfileUpdate) -> AppResult<()> {
        self.record(format!("update_user_info:{user_id}:{:?}", update.nick_name));
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        self.record(format!("update_password:{user_id}:{old_password}:{new_password}"));
        Ok(())
    }

    async fn buy_book_index(&self, user_id: i64, record: BuyRecord) -> AppResult<()> {
        self.record(format!("buy_book_index:{user_id}:{}", record.book_index_id));
        self.purchases.lock().unwrap().push((user_id, record));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingBookService {
    calls: Mutex<Vec<String>>,
}

impl RecordingBookService {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookService for RecordingBookService {
    async fn query_book_index(&self, book_index_id: i64) -> AppResult<BookIndex> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("query_book_index:{book_index_id}"));
        if book_index_id == 404 {
            return Err(AppError::NotFound {
                entity: "book_index".to_string(),
                field: "id".to_string(),
                value: book_index_id.to_string(),
            });
        }
        Ok(BookIndex {
            id: book_index_id,
            book_id: 1,
            index_num: 3,
            index_name: "Chapter 3".to_string(),
            word_count: 3000,
            is_vip: 1,
            book_price: CHAPTER_PRICE,
        })
    }

    async fn list_comment_by_page(
        &self,
        user_id: Option<i64>,
        book_id: Option<i64>,
        page: PageRequest,
    ) -> AppResult<Page<CommentView>> {
        self.calls.lock().unwrap().push(format!(
            "list_comment:{user_id:?}:{book_id:?}:{}:{}",
            page.page, page.page_size
        ));
        Ok(Page::new(vec![], page, 0))
    }
}

pub(crate) struct TestApp {
    router: Router,
    pub(crate) state: AppState,
    /// Backend behind `state.verify_codes`
    pub(crate) cache: Arc<MemoryCache>,
    pub(crate) users: Arc<RecordingUserService>,
    pub(crate) books: Arc<RecordingBookService>,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self::with_grace(0)
    }

    pub(crate) fn with_grace(refresh_grace: i64) -> Self {
        let users = Arc::new(RecordingUserService::default());
        let books = Arc::new(RecordingBookService::default());
        let tokens = JwtTokenService::new(&JwtConfig {
            secret: SECRET.to_string(),
            token_expiration: 1,
            refresh_grace,
        });
        let cache = Arc::new(MemoryCache::new(&MemoryCacheConfig::default()));
        let state = AppState::new(
            Services::from_parts(users.clone(), books.clone()),
            tokens,
            VerifyCodeStore::new(cache.clone()),
        );
        Self {
            router: create_router(state.clone()),
            state,
            cache,
            users,
            books,
        }
    }

    pub(crate) fn token(&self) -> String {
        self.state
            .tokens
            .issue(&CallerIdentity {
                user_id: 7,
                username: "13800138000".to_string(),
                nick_name: "reader".to_string(),
            })
            .unwrap()
    }

    pub(crate) async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub(crate) async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        into_json(self.send(builder.body(Body::empty()).unwrap()).await).await
    }

    pub(crate) async fn post_form(
        &self,
        uri: &str,
        body: &str,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        into_json(self.send(builder.body(Body::from(body.to_string())).unwrap()).await).await
    }
}

pub(crate) async fn into_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// A token signed with the harness secret that expired `hours_ago` hours ago
pub(crate) fn expired_token(hours_ago: i64) -> String {
    let now = jiff::Timestamp::now().as_second();
    let claims = Claims {
        sub: "7".to_string(),
        username: "13800138000".to_string(),
        nick_name: "reader".to_string(),
        iat: now - (hours_ago + 1) * 3600,
        exp: now - hours_ago * 3600,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}
