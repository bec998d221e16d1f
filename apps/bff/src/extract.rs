//! # リクエスト抽出ヘルパー
//!
//! リクエストボディ（JSON またはフォーム）・クエリ文字列・`2FA` ヘッダーの取り出し。
//! 抽出に失敗したときも 400 エンベロープで返す。

use axum::{
    extract::{
        FromRequest,
        FromRequestParts,
        Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, header, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::{
    client::{TWO_FACTOR_HEADER, TwoFactorCode},
    error::ApiError,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// リクエストボディの抽出器
///
/// `application/x-www-form-urlencoded` ならフォームとして、それ以外は JSON として読む。
/// どちらも失敗時は axum 標準のプレーンテキストではなく 400 エンベロープを返す。
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            return match axum::Form::<T>::from_request(req, state).await {
                Ok(axum::Form(value)) => Ok(Payload(value)),
                Err(rejection) => {
                    tracing::debug!(
                        error = %rejection.body_text(),
                        "フォームデータを解釈できません"
                    );
                    Err(ApiError::validation("リクエストボディのフォームデータが不正です"))
                }
            };
        }

        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(json_rejection_to_error(&rejection)),
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn json_rejection_to_error(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "JSON ボディを解釈できません");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::validation(
            "Content-Type は application/json または application/x-www-form-urlencoded である必要があります",
        ),
        _ => ApiError::validation("リクエストボディの JSON が不正です"),
    }
}

/// 不正なクエリ文字列を 400 エンベロープで返す `Query` 抽出器
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(query_rejection_to_error(&rejection)),
        }
    }
}

fn query_rejection_to_error(rejection: &QueryRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "クエリ文字列を解釈できません");
    ApiError::validation("クエリパラメータが不正です")
}

/// `2FA` ヘッダーから 2FA コードを取り出す
///
/// ヘッダー名は大文字小文字を区別しない。空なら `None`。
pub fn two_factor_code(headers: &HeaderMap) -> Option<TwoFactorCode> {
    headers
        .get(TWO_FACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TwoFactorCode::new)
}
