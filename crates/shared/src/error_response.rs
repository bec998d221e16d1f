//! # エラーレスポンスエンベロープ
//!
//! BFF が返すすべてのエラーは `{ "success": false, "status": u16, "message": String }`
//! の形をとる。フロントエンドは上流 API と同じ形でエラーを扱える。
//!
//! - axum の `IntoResponse` 変換は BFF 側の責務（shared に axum 依存を入れない）
//! - よく使う種別は便利コンストラクタで提供する

use serde::{Deserialize, Serialize};

/// 5xx で利用者に返す固定メッセージ
pub const INTERNAL_ERROR_MESSAGE: &str = "内部サーバーエラーが発生しました";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub status:  u16,
    pub message: String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(405, message)
    }

    /// 500 Internal Server Error
    ///
    /// メッセージは固定値（内部情報を漏らさない）。
    pub fn internal_error() -> Self {
        Self::new(500, INTERNAL_ERROR_MESSAGE)
    }

    /// 503 Service Unavailable
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(503, message)
    }
}
