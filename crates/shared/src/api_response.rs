//! # 成功レスポンスエンベロープ
//!
//! 上流 API が返す `{ "success": true, "data": T }` 形式を表す。
//!
//! BFF は上流の成功レスポンスを基本的にそのまま返すため、この型を使うのは
//! ボディの一部（ログイン・リフレッシュ時の `data.token` 等）を読み取る場面に限られる。

use serde::Deserialize;

/// 成功レスポンスのエンベロープ
///
/// `success` が欠けているペイロードも受け入れる（`false` として扱う）。
///
/// ```
/// use teamdesk_shared::ApiResponse;
///
/// let response: ApiResponse<u32> =
///     serde_json::from_str(r#"{"success": true, "data": 42}"#).unwrap();
/// assert!(response.success);
/// assert_eq!(response.data, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data:    T,
}
