//! # BFF エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! すべてのエラーは `teamdesk_shared::ErrorResponse` のエンベロープで返す。
//! 上流 API の 4xx はステータスとメッセージをそのまま、5xx は固定メッセージにする。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use teamdesk_shared::{ErrorResponse, error_response::INTERNAL_ERROR_MESSAGE};
use thiserror::Error;

use crate::client::UpstreamError;

/// Bearer トークンがないときのメッセージ
pub const MISSING_BEARER_MESSAGE: &str = "アクセストークンが必要です";

/// 2FA コードがないときのメッセージ
pub const MISSING_TWO_FACTOR_MESSAGE: &str = "2FA コードが必要です";

/// 上流 API に到達できないときのメッセージ
pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "上流 API に接続できません";

/// BFF 層で発生するエラー
///
/// `IntoResponse` を実装しているため、ハンドラは `Result<Response, ApiError>` を返せばよい。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力不備（400 Bad Request）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// Bearer トークンや 2FA コードがない（401 Unauthorized）
    #[error("認証エラー: {0}")]
    Unauthorized(String),

    /// 上流 API 呼び出しの失敗
    ///
    /// `context` はログ用の操作名（例: `"メンバー一覧取得"`）。
    #[error("{context}で上流 API エラー: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source:  UpstreamError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// 上流エラーに操作名を付ける
    ///
    /// `.map_err(ApiError::upstream("メンバー一覧取得"))` の形で使う。
    pub fn upstream(context: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| ApiError::Upstream { context, source }
    }

    /// 利用者に返すエンベロープ
    ///
    /// 上流の 5xx と予期しないエラーは固定メッセージにする。
    fn error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(message) => ErrorResponse::bad_request(message.as_str()),
            ApiError::Unauthorized(message) => ErrorResponse::unauthorized(message.as_str()),
            ApiError::Upstream { source, .. } => match source {
                UpstreamError::Api { status, .. } if status.is_server_error() => {
                    ErrorResponse::new(status.as_u16(), INTERNAL_ERROR_MESSAGE)
                }
                UpstreamError::Api { status, message } => {
                    ErrorResponse::new(status.as_u16(), message.as_str())
                }
                UpstreamError::AuthenticationFailed => {
                    ErrorResponse::unauthorized(source.to_string())
                }
                UpstreamError::Network(_) => {
                    ErrorResponse::service_unavailable(UPSTREAM_UNAVAILABLE_MESSAGE)
                }
                UpstreamError::Unexpected(_) => ErrorResponse::internal_error(),
            },
        }
    }
}

/// エンベロープを JSON レスポンスにする（ステータスは `body.status`）
pub fn envelope_response(body: ErrorResponse) -> Response {
    let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream { context, source } = &self {
            let status = source.status();
            if status.is_server_error() {
                tracing::error!(
                    error.category = "external_service",
                    error.kind = "upstream",
                    status = status.as_u16(),
                    "{}で上流 API エラー: {}",
                    context,
                    source
                );
            } else {
                tracing::warn!(
                    status = status.as_u16(),
                    "{}で上流 API がエラーを返しました: {}",
                    context,
                    source
                );
            }
        }

        envelope_response(self.error_response())
    }
}
