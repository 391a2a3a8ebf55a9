use crate::error::{AppError, AppResult};
use axum::extract::{Form, FromRequest, Request, rejection::FormRejection};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Form extractor that runs `validator` rules before the handler sees the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedForm(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct SignupForm {
        #[validate(length(min = 11, max = 11, message = "Mobile number must be 11 digits"))]
        username: String,
        #[validate(length(min = 1, max = 20, message = "Password must be 1 to 20 characters"))]
        password: String,
        #[validate(range(min = 0, max = 1, message = "Sex must be 0 or 1"))]
        sex: i16,
    }

    fn form_request(body: &'static str, content_type: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract(body: &'static str) -> AppResult<ValidatedForm<SignupForm>> {
        ValidatedForm::<SignupForm>::from_request(
            form_request(body, "application/x-www-form-urlencoded"),
            &(),
        )
        .await
    }

    #[tokio::test]
    async fn test_valid_form() {
        let ValidatedForm(form) = extract("username=13800138000&password=secret&sex=1")
            .await
            .unwrap();
        assert_eq!(form.username, "13800138000");
        assert_eq!(form.password, "secret");
        assert_eq!(form.sex, 1);
    }

    #[tokio::test]
    async fn test_validation_error_short_username() {
        let error = extract("username=138&password=secret&sex=0").await.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "username");
                assert!(errors[0].message.contains("11 digits"));
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_validation_error_empty_password() {
        let error = extract("username=13800138000&password=&sex=0").await.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "password");
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_validation_error_multiple_fields() {
        let error = extract("username=1&password=&sex=7").await.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"username"));
                assert!(fields.contains(&"password"));
                assert!(fields.contains(&"sex"));
            }
            _ => panic!("Expected ValidationErrors error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_form_rejection_missing_field() {
        let error = extract("username=13800138000&password=secret").await.unwrap_err();
        match error {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            _ => panic!("Expected BadRequest error, got {:?}", error),
        }
    }

    #[tokio::test]
    async fn test_form_rejection_invalid_content_type() {
        let result = ValidatedForm::<SignupForm>::from_request(
            form_request("username=13800138000&password=secret&sex=1", "application/json"),
            &(),
        )
        .await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
