//! # Bearer 認証ミドルウェア
//!
//! `Authorization: Bearer <token>` を要求し、受け取ったトークンを
//! [`AccessTokenStore`] に反映してから後続へ渡す。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/members", get(list_members))
//!     .route_layer(from_fn_with_state(token_store, authenticate))
//! ```

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::{ApiError, MISSING_BEARER_MESSAGE},
    session::AccessTokenStore,
};

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// スキーム名は大文字小文字を区別しない。トークンが空なら `None`。
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Bearer 認証ミドルウェア
///
/// トークンがなければ上流 API を呼ばずに 401 を返す。
/// あれば保持者に設定する（最後に書いたものが勝つ）。
pub async fn authenticate(
    State(token_store): State<AccessTokenStore>,
    request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("Bearer トークンがないため拒否します");
        return ApiError::unauthorized(MISSING_BEARER_MESSAGE).into_response();
    };

    token_store.set(token);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{HeaderValue, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;

    fn app(token_store: AccessTokenStore) -> Router {
        Router::new()
            .route("/protected", get(|| async { StatusCode::OK }))
            .route_layer(from_fn_with_state(token_store, authenticate))
    }

    fn request_with(authorization: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case::ヘッダーなし(None)]
    #[case::空のトークン(Some("Bearer "))]
    #[case::スキームなし(Some("abc123"))]
    #[case::basic認証(Some("Basic dXNlcjpwYXNz"))]
    #[tokio::test]
    async fn test_bearerトークンがなければ401を返す(#[case] authorization: Option<&str>) {
        let token_store = AccessTokenStore::default();

        let response = app(token_store.clone())
            .oneshot(request_with(authorization))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(token_store.get(), None);
    }

    #[tokio::test]
    async fn test_bearerトークンを保持者に設定して通過させる() {
        let token_store = AccessTokenStore::new(Some("stale".to_string()));

        let response = app(token_store.clone())
            .oneshot(request_with(Some("Bearer fresh-token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(token_store.get().as_deref(), Some("fresh-token"));
    }

    #[test]
    fn test_bearer_tokenはスキームの大文字小文字を区別しない() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc"));

        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
