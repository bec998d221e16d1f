//! 上流 API クライアントのエラー型

use reqwest::StatusCode;
use thiserror::Error;

/// 上流 API クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// 上流 API が 2xx 以外を返した
    ///
    /// `message` は上流ボディの `message`（なければ汎用メッセージ）。
    #[error("上流 API エラー（{status}）: {message}")]
    Api { status: StatusCode, message: String },

    /// 401 を受けてトークンリフレッシュを試みたが失敗した
    #[error("認証に失敗しました。再度ログインしてください")]
    AuthenticationFailed,

    /// レスポンスを受け取れなかった（接続失敗・タイムアウト等）
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            UpstreamError::Unexpected(err.to_string())
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Unexpected(err.to_string())
    }
}

impl UpstreamError {
    /// 利用者に返す HTTP ステータス
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamError::Api { status, .. } => *status,
            UpstreamError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            UpstreamError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            UpstreamError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
