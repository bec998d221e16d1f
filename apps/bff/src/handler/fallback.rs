//! # 未定義ルート・未対応メソッド

use axum::{
    http::{Method, Uri},
    response::Response,
};
use teamdesk_shared::ErrorResponse;

use crate::error::envelope_response;

/// どのルートにも一致しないリクエストに 404 エンベロープを返す
pub async fn route_not_found(uri: Uri) -> Response {
    envelope_response(ErrorResponse::not_found(format!(
        "ルートが見つかりません: {}",
        uri.path()
    )))
}

/// パスは一致したがメソッドが定義されていないリクエストに 405 エンベロープを返す
///
/// ルートごとの認証・2FA ガードより先に判定されるため、
/// ガードのエラーでメソッド違いが隠れることはない。
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    envelope_response(ErrorResponse::method_not_allowed(format!(
        "このルートは {method} に対応していません: {}",
        uri.path()
    )))
}
