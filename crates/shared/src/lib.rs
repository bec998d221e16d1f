//! # TeamDesk 共有ユーティリティ
//!
//! BFF と将来のサービス間で共有するレスポンス型と Observability 基盤。
//!
//! ## 設計方針
//!
//! - axum に依存しない（`IntoResponse` 変換は各サービスの責務）
//! - 上流 API のペイロードは解釈しない。ここに置くのはエンベロープだけ

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
