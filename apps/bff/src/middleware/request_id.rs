//! # Request ID 伝播ミドルウェア
//!
//! 受信リクエストの Request ID を上流 API への呼び出しに引き継ぐ。
//!
//! 1. [`store_request_id`] が `SetRequestIdLayer` の設定した
//!    [`RequestId`](tower_http::request_id::RequestId) を task-local に保存する
//! 2. 上流クライアントが [`inject_request_id`] で reqwest の `RequestBuilder` に
//!    `x-request-id` ヘッダーとして付与する
//!
//! リフレッシュ後の再送を含め、1 つの受信リクエストから出る上流呼び出しは
//! すべて同じ Request ID を持つ。

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use teamdesk_shared::observability::REQUEST_ID_HEADER;
use tower_http::request_id::RequestId;

tokio::task_local! {
    static UPSTREAM_REQUEST_ID: HeaderValue;
}

/// 処理中の受信リクエストに割り当てられた Request ID
///
/// [`store_request_id`] のスコープ外では `None`。
pub fn current_request_id() -> Option<HeaderValue> {
    UPSTREAM_REQUEST_ID.try_with(Clone::clone).ok()
}

/// `SetRequestIdLayer` が付けた ID を後続の上流呼び出し用に保持する
///
/// ID が無いリクエストはスコープを張らずに通す。上流には何も付与されない。
pub async fn store_request_id(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<RequestId>() {
        Some(id) => {
            let value = id.header_value().clone();
            UPSTREAM_REQUEST_ID.scope(value, next.run(request)).await
        }
        None => next.run(request).await,
    }
}

/// 上流 API へのリクエストに `x-request-id` を載せる
pub fn inject_request_id(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    let Some(id) = current_request_id() else {
        return builder;
    };
    builder.header(REQUEST_ID_HEADER, id)
}
