//! # キャッシュ制御ミドルウェア
//!
//! アカウント情報や取引履歴がブラウザに残らないよう、
//! `Cache-Control: no-store` を全レスポンスに設定する。

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// レスポンスに `Cache-Control: no-store` を付与する
///
/// ハンドラが別の値を設定していても上書きする。
pub async fn no_cache(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
