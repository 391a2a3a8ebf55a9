//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `auth` - login, registration and token payloads
//! - `user` - forms for the signed-in reader endpoints
//! - `envelope` - the uniform response wrapper
//! - `pagination` - `curr`/`limit` query parameters

mod auth;
mod envelope;
mod health;
mod pagination;
mod user;

pub use auth::{LoginForm, MOBILE_NUMBER, RefreshTokenResponse, RegisterForm, TokenResponse};
pub use envelope::Envelope;
pub use health::{HealthResponse, HealthStatus};
pub use pagination::{MAX_PAGE_SIZE, PaginationParams};
pub use user::{
    BookIdQuery, BuyBookIndexForm, FeedbackForm, ReadingForm, UpdatePasswordForm, UpdateUserForm,
};
