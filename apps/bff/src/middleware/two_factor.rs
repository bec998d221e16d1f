//! # 2FA ガード
//!
//! 2FA 必須の操作で `2FA` ヘッダーを要求する。
//! コードの正否は上流 API が判定するため、ここでは有無だけを見る。

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::{ApiError, MISSING_TWO_FACTOR_MESSAGE},
    extract::two_factor_code,
};

/// `2FA` ヘッダーがなければ上流 API を呼ばずに 401 を返す
pub async fn require_two_factor(request: Request, next: Next) -> Response {
    if two_factor_code(request.headers()).is_none() {
        tracing::debug!("2FA コードがないため拒否します");
        return ApiError::unauthorized(MISSING_TWO_FACTOR_MESSAGE).into_response();
    }
    next.run(request).await
}
