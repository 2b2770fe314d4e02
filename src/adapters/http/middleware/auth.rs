//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request -> auth_middleware -> AuthenticatedUser in extensions
//!                                      |
//!                 Handler -> RequireAuth / Caller read it back
//! ```
//!
//! The middleware only validates what it is given: a request without an
//! `Authorization` header passes through untouched and is rejected later by
//! the extractors. A header carrying a bad token is rejected here.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser, RequestContext};
use crate::ports::SessionValidator;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates `Authorization: Bearer <token>` and injects the caller.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            tracing::debug!(subject = %user.subject, "request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_failure(&e),
    }
}

fn auth_failure(error: &AuthError) -> Response {
    let (status, code) = match error {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
        AuthError::InvalidToken | AuthError::MissingEmail => {
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        }
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "auth service unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "AUTH_UNAVAILABLE")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "code": code,
            "message": error.to_string(),
        })),
    )
        .into_response()
}

/// Extractor that requires an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor building the handler-facing [`RequestContext`].
///
/// Requires authentication; the correlation id comes from the
/// `x-request-id` header when present.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        let mut ctx = RequestContext::from_user(&user);

        if let Some(id) = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            ctx = ctx.with_correlation_id(id);
        }

        Ok(Caller(ctx))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "code": "UNAUTHENTICATED",
                    "message": "Authentication required",
                })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::EmailAddress;
    use axum::body::Body;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            "user-1",
            EmailAddress::parse("email", "lead@x.com").unwrap(),
            Some("Lin".to_string()),
        )
    }

    fn app(validator: MockSessionValidator) -> Router {
        let validator: AuthState = Arc::new(validator);
        Router::new()
            .route(
                "/whoami",
                get(|Caller(ctx): Caller| async move {
                    format!("{} {}", ctx.caller, ctx.correlation_id())
                }),
            )
            .layer(axum::middleware::from_fn_with_state(validator, auth_middleware))
    }

    async fn call(app: Router, auth: Option<&str>, request_id: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(auth) = auth {
            builder = builder.header("Authorization", auth);
        }
        if let Some(id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_request_id() {
        let app = app(MockSessionValidator::new().with_user("good", user()));

        let response = call(app, Some("Bearer good"), Some("req-42")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "lead@x.com req-42");
    }

    #[tokio::test]
    async fn missing_header_is_rejected_by_extractor() {
        let response = call(app(MockSessionValidator::new()), None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("UNAUTHENTICATED"));
    }

    #[tokio::test]
    async fn bad_token_is_rejected_by_middleware() {
        let response = call(app(MockSessionValidator::new()), Some("Bearer nope"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_reports_expiry() {
        let validator = MockSessionValidator::new().with_error(AuthError::TokenExpired);
        let response = call(app(validator), Some("Bearer any"), None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("TOKEN_EXPIRED"));
    }

    #[tokio::test]
    async fn unavailable_validator_is_503() {
        let validator =
            MockSessionValidator::new().with_error(AuthError::service_unavailable("down"));
        let response = call(app(validator), Some("Bearer any"), None).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn require_auth_reads_extensions() {
        let mut request = axum::http::Request::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(user());
        let (mut parts, _) = request.into_parts();

        let RequireAuth(found) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(found, user());
    }

    #[test]
    fn non_bearer_scheme_is_ignored() {
        assert_eq!("Basic dXNlcjpwYXNz".strip_prefix("Bearer "), None);
    }
}
