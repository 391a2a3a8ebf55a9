//! `/user/*` endpoints.
//!
//! Every handler maps one request onto one service call. The only checks
//! made here are the session token (in [`auth_middleware`]), the
//! registration code and the new-password confirmation.

use axum::{
    Extension, Router,
    extract::{
        Form, Path, Query, State,
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::HeaderMap,
    middleware,
    routing::{delete, get, post},
};

use crate::api::dto::{
    BookIdQuery, BuyBookIndexForm, Envelope, FeedbackForm, LoginForm, PaginationParams,
    ReadingForm, RefreshTokenResponse, RegisterForm, TokenResponse, UpdatePasswordForm,
    UpdateUserForm,
};
use crate::api::middleware::{auth_middleware, extract_token};
use crate::error::{AppError, AppResult, ResponseStatus};
use crate::models::{CallerIdentity, CommentView, FeedbackView, Page, ReadingEntryView, UserProfile};
use crate::state::AppState;
use crate::utils::ValidatedForm;

const SHELF_PAGE_SIZE: u32 = 10;
const HISTORY_PAGE_SIZE: u32 = 10;
const FEEDBACK_PAGE_SIZE: u32 = 5;
const COMMENT_PAGE_SIZE: u32 = 5;

/// Creates the user routes
///
/// # Routes
/// - `POST /login`, `POST /register`, `POST /refreshToken` - public
/// - everything else requires a session token
pub fn user_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refreshToken", post(refresh_token));

    let protected = Router::new()
        .route("/queryIsInShelf", get(query_is_in_shelf))
        .route("/addToBookShelf", post(add_to_book_shelf))
        .route("/removeFromBookShelf/{bookId}", delete(remove_from_book_shelf))
        .route("/listBookShelfByPage", get(list_book_shelf_by_page))
        .route("/listReadHistoryByPage", get(list_read_history_by_page))
        .route("/addReadHistory", post(add_read_history))
        .route("/addFeedBack", post(add_feedback))
        .route("/listUserFeedBackByPage", get(list_user_feedback_by_page))
        .route("/userInfo", get(user_info))
        .route("/updateUserInfo", post(update_user_info))
        .route("/updatePassword", post(update_password))
        .route("/listCommentByPage", get(list_comment_by_page))
        .route("/buyBookIndex", post(buy_book_index))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

fn issue_token(state: &AppState, identity: &CallerIdentity) -> AppResult<Envelope<TokenResponse>> {
    let token = state.tokens.issue(identity)?;
    Ok(Envelope::ok(TokenResponse { token }))
}

/// POST /user/login
async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Envelope<TokenResponse>> {
    let Form(form) = form?;
    let identity = state
        .services
        .users
        .login(&form.username, &form.password)
        .await?;
    issue_token(&state, &identity)
}

/// POST /user/register
///
/// The submitted `velCode` must equal the code currently cached for the
/// verification image.
async fn register(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<RegisterForm>,
) -> AppResult<Envelope<TokenResponse>> {
    if !state.verify_codes.matches(&form.vel_code).await? {
        return Err(ResponseStatus::VelCodeError.into());
    }

    let identity = state
        .services
        .users
        .register(&form.username, &form.password)
        .await?;
    issue_token(&state, &identity)
}

/// POST /user/refreshToken
///
/// Not behind the auth layer, since a token still inside its refresh
/// grace period no longer decodes as a session.
async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Envelope<RefreshTokenResponse>> {
    let token = extract_token(&headers).ok_or(AppError::Status(ResponseStatus::NotLoggedIn))?;
    let (token, identity) = state
        .tokens
        .refresh(&token)
        .map_err(|_| AppError::Status(ResponseStatus::NotLoggedIn))?;

    Ok(Envelope::ok(RefreshTokenResponse {
        token,
        username: identity.username,
        nick_name: identity.nick_name,
    }))
}

/// GET /user/queryIsInShelf?bookId=
async fn query_is_in_shelf(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    query: Result<Query<BookIdQuery>, QueryRejection>,
) -> AppResult<Envelope<bool>> {
    let Query(query) = query?;
    let in_shelf = state
        .services
        .users
        .query_is_in_shelf(caller.user_id, query.book_id)
        .await?;
    Ok(Envelope::ok(in_shelf))
}

/// POST /user/addToBookShelf
async fn add_to_book_shelf(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    form: Result<Form<ReadingForm>, FormRejection>,
) -> AppResult<Envelope<()>> {
    let Form(form) = form?;
    state
        .services
        .users
        .add_to_book_shelf(caller.user_id, form.book_id, form.pre_content_id)
        .await?;
    Ok(Envelope::empty())
}

/// DELETE /user/removeFromBookShelf/{bookId}
async fn remove_from_book_shelf(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    book_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Envelope<()>> {
    let Path(book_id) = book_id?;
    state
        .services
        .users
        .remove_from_book_shelf(caller.user_id, book_id)
        .await?;
    Ok(Envelope::empty())
}

/// GET /user/listBookShelfByPage?curr=&limit=
async fn list_book_shelf_by_page(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Envelope<Page<ReadingEntryView>>> {
    let Query(params) = params?;
    let page = state
        .services
        .users
        .list_book_shelf_by_page(caller.user_id, params.resolve(SHELF_PAGE_SIZE))
        .await?;
    Ok(Envelope::ok(page))
}

/// GET /user/listReadHistoryByPage?curr=&limit=
async fn list_read_history_by_page(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Envelope<Page<ReadingEntryView>>> {
    let Query(params) = params?;
    let page = state
        .services
        .users
        .list_read_history_by_page(caller.user_id, params.resolve(HISTORY_PAGE_SIZE))
        .await?;
    Ok(Envelope::ok(page))
}

/// POST /user/addReadHistory
async fn add_read_history(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    form: Result<Form<ReadingForm>, FormRejection>,
) -> AppResult<Envelope<()>> {
    let Form(form) = form?;
    state
        .services
        .users
        .add_read_history(caller.user_id, form.book_id, form.pre_content_id)
        .await?;
    Ok(Envelope::empty())
}

/// POST /user/addFeedBack
async fn add_feedback(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    ValidatedForm(form): ValidatedForm<FeedbackForm>,
) -> AppResult<Envelope<()>> {
    state
        .services
        .users
        .add_feedback(caller.user_id, form.content)
        .await?;
    Ok(Envelope::empty())
}

/// GET /user/listUserFeedBackByPage?curr=&limit=
async fn list_user_feedback_by_page(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Envelope<Page<FeedbackView>>> {
    let Query(params) = params?;
    let page = state
        .services
        .users
        .list_user_feedback_by_page(caller.user_id, params.resolve(FEEDBACK_PAGE_SIZE))
        .await?;
    Ok(Envelope::ok(page))
}

/// GET /user/userInfo
async fn user_info(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> AppResult<Envelope<UserProfile>> {
    let profile = state.services.users.user_info(caller.user_id).await?;
    Ok(Envelope::ok(profile))
}

/// POST /user/updateUserInfo
///
/// A new nickname is baked into the token, so one is re-issued when it
/// changes.
async fn update_user_info(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    ValidatedForm(form): ValidatedForm<UpdateUserForm>,
) -> AppResult<Envelope<TokenResponse>> {
    let nick_name = form.nick_name.clone();
    state
        .services
        .users
        .update_user_info(caller.user_id, form.into())
        .await?;

    match nick_name {
        Some(nick_name) => issue_token(&state, &CallerIdentity { nick_name, ..caller }),
        None => Ok(Envelope::empty()),
    }
}

/// POST /user/updatePassword
async fn update_password(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    form: Result<Form<UpdatePasswordForm>, FormRejection>,
) -> AppResult<Envelope<()>> {
    let Form(form) = form?;
    if !form.confirmed() {
        return Err(ResponseStatus::TwoPasswordDiff.into());
    }

    state
        .services
        .users
        .update_password(caller.user_id, &form.old_password, &form.new_password1)
        .await?;
    Ok(Envelope::empty())
}

/// GET /user/listCommentByPage?curr=&limit=
///
/// Comments written by the caller.
async fn list_comment_by_page(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Envelope<Page<CommentView>>> {
    let Query(params) = params?;
    let page = state
        .services
        .books
        .list_comment_by_page(Some(caller.user_id), None, params.resolve(COMMENT_PAGE_SIZE))
        .await?;
    Ok(Envelope::ok(page))
}

/// POST /user/buyBookIndex
///
/// The amount charged is always the chapter's current price.
async fn buy_book_index(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    form: Result<Form<BuyBookIndexForm>, FormRejection>,
) -> AppResult<Envelope<()>> {
    let Form(form) = form?;
    let book_index = state
        .services
        .books
        .query_book_index(form.book_index_id)
        .await?;

    state
        .services
        .users
        .buy_book_index(caller.user_id, form.priced(book_index.book_price))
        .await?;
    Ok(Envelope::empty())
}
