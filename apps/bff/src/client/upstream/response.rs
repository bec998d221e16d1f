//! 上流 API レスポンスの共通ハンドリング

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use teamdesk_shared::ApiResponse;

use super::error::UpstreamError;

/// 上流ボディに `message` がないときのエラーメッセージ
pub(super) const DEFAULT_ERROR_MESSAGE: &str = "上流 API へのリクエストでエラーが発生しました";

/// 上流 API の成功レスポンス
///
/// ボディは解釈せずに保持し、ステータスとともにそのまま利用者へ返す。
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body:   Value,
}

/// ログイン・リフレッシュ成功時の `data`
#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

impl UpstreamResponse {
    /// `data.token` を取り出す（ログイン・リフレッシュのレスポンス用）
    pub fn token(&self) -> Option<String> {
        serde_json::from_value::<ApiResponse<TokenData>>(self.body.clone())
            .ok()
            .map(|response| response.data.token)
            .filter(|token| !token.is_empty())
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// 上流 API レスポンスを `UpstreamResponse` / `UpstreamError` に振り分ける
///
/// - 2xx: ボディをそのまま保持して返す
/// - それ以外: ステータスを保ったまま `UpstreamError::Api` にする
pub(super) async fn handle_response(
    response: reqwest::Response,
) -> Result<UpstreamResponse, UpstreamError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let body = parse_body(&bytes);

    if status.is_success() {
        return Ok(UpstreamResponse { status, body });
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| DEFAULT_ERROR_MESSAGE.to_string(), str::to_owned);

    Err(UpstreamError::Api { status, message })
}

/// JSON でなければ文字列、空なら `null` として扱う
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
