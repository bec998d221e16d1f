//! # ヘルスチェックハンドラ
//!
//! BFF プロセスの稼働確認用。上流 API には問い合わせない。

use axum::Json;
use teamdesk_shared::HealthResponse;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}
