//! # ヘルスチェックレスポンス

use serde::{Deserialize, Serialize};

/// `/health` のレスポンス
///
/// ```
/// use teamdesk_shared::HealthResponse;
///
/// let response = HealthResponse::ok("0.1.0");
/// assert_eq!(response.status, "ok");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（稼働中は `"ok"`）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}

impl HealthResponse {
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            status:  "ok".to_string(),
            version: version.into(),
        }
    }
}
