pub mod jwt;
pub mod password;
pub mod validate;

pub use jwt::JwtTokenService;
pub use password::{hash_password, verify_password};
pub use validate::ValidatedForm;
