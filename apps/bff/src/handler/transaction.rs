//! # 取引 API ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/team/transactions/recent` - 直近の取引
//! - `GET /api/team/transactions` - 条件付き取引一覧

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    client::{TransactionFilter, UpstreamTransactionClient},
    error::ApiError,
    extract::QueryParams,
    validation::{optional, parse_u32_param},
};

/// 取引 API の共有状態
pub struct TransactionState {
    pub upstream_client: Arc<dyn UpstreamTransactionClient>,
}

/// 取引一覧のクエリパラメータ
///
/// `page` / `limit` は文字列で受けて自前で解釈し、不正値を 400 エンベロープで返す。
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    pub member_id: Option<String>,
    pub from:      Option<String>,
    pub to:        Option<String>,
    pub page:      Option<String>,
    pub limit:     Option<String>,
}

impl TransactionQuery {
    fn into_filter(self) -> Result<TransactionFilter, ApiError> {
        Ok(TransactionFilter {
            page:      parse_u32_param("page", self.page.as_deref())?,
            limit:     parse_u32_param("limit", self.limit.as_deref())?,
            member_id: optional(self.member_id),
            from:      optional(self.from),
            to:        optional(self.to),
        })
    }
}

/// GET /api/team/transactions/recent
#[tracing::instrument(skip_all)]
pub async fn list_recent_transactions(
    State(state): State<Arc<TransactionState>>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .list_recent_transactions()
        .await
        .map_err(ApiError::upstream("直近の取引取得"))?;
    Ok(response.into_response())
}

/// GET /api/team/transactions
#[tracing::instrument(skip_all)]
pub async fn list_transactions(
    State(state): State<Arc<TransactionState>>,
    QueryParams(query): QueryParams<TransactionQuery>,
) -> Result<Response, ApiError> {
    let filter = query.into_filter()?;
    let response = state
        .upstream_client
        .list_transactions(&filter)
        .await
        .map_err(ApiError::upstream("取引一覧取得"))?;
    Ok(response.into_response())
}
