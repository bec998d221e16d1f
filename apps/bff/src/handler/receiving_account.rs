//! # 受取口座 API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/team/receiving-accounts` - 作成（要 2FA）
//! - `PUT /api/team/receiving-accounts` - 更新（要 2FA）
//! - `POST /api/team/receiving-accounts/reactivate/{id}` - 再有効化（要 2FA）
//! - `POST /api/team/receiving-accounts/extend/{id}` - 期限延長（要 2FA）
//! - `GET /api/team/receiving-accounts` - 一覧
//! - `GET /api/team/receiving-accounts/{id}` - 詳細

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    client::{NewReceivingAccount, ReceivingAccountUpdate, UpstreamReceivingAccountClient},
    error::ApiError,
    extract::{Payload, two_factor_code},
    validation::RequiredFields,
};

/// 受取口座 API の共有状態
pub struct ReceivingAccountState {
    pub upstream_client: Arc<dyn UpstreamReceivingAccountClient>,
}

/// 受取口座作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateReceivingAccountBody {
    pub member_id:           Option<Value>,
    pub payment_rail:        Option<Value>,
    pub destination_address: Option<Value>,
}

impl CreateReceivingAccountBody {
    fn validate(self) -> Result<NewReceivingAccount, ApiError> {
        let mut fields = RequiredFields::default();
        let member_id = fields.take("member_id", self.member_id);
        let payment_rail = fields.take("payment_rail", self.payment_rail);
        let destination_address = fields.take("destination_address", self.destination_address);
        fields.finish()?;

        Ok(NewReceivingAccount {
            member_id,
            payment_rail,
            destination_address,
        })
    }
}

/// 受取口座更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateReceivingAccountBody {
    pub receiving_account_id: Option<Value>,
    pub payment_rail:         Option<Value>,
    pub destination_address:  Option<Value>,
}

impl UpdateReceivingAccountBody {
    fn validate(self) -> Result<ReceivingAccountUpdate, ApiError> {
        let mut fields = RequiredFields::default();
        let receiving_account_id = fields.take("receiving_account_id", self.receiving_account_id);
        let payment_rail = fields.take("payment_rail", self.payment_rail);
        let destination_address = fields.take("destination_address", self.destination_address);
        fields.finish()?;

        Ok(ReceivingAccountUpdate {
            receiving_account_id,
            payment_rail,
            destination_address,
        })
    }
}

/// POST /api/team/receiving-accounts
#[tracing::instrument(skip_all)]
pub async fn create_receiving_account(
    State(state): State<Arc<ReceivingAccountState>>,
    headers: HeaderMap,
    Payload(body): Payload<CreateReceivingAccountBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .create_receiving_account(&req, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("受取口座作成"))?;
    Ok(response.into_response())
}

/// PUT /api/team/receiving-accounts
#[tracing::instrument(skip_all)]
pub async fn update_receiving_account(
    State(state): State<Arc<ReceivingAccountState>>,
    headers: HeaderMap,
    Payload(body): Payload<UpdateReceivingAccountBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .update_receiving_account(&req, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("受取口座更新"))?;
    Ok(response.into_response())
}

/// GET /api/team/receiving-accounts
#[tracing::instrument(skip_all)]
pub async fn list_receiving_accounts(
    State(state): State<Arc<ReceivingAccountState>>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .list_receiving_accounts()
        .await
        .map_err(ApiError::upstream("受取口座一覧取得"))?;
    Ok(response.into_response())
}

/// GET /api/team/receiving-accounts/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_receiving_account(
    State(state): State<Arc<ReceivingAccountState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .get_receiving_account(&id)
        .await
        .map_err(ApiError::upstream("受取口座取得"))?;
    Ok(response.into_response())
}

/// POST /api/team/receiving-accounts/reactivate/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn reactivate_receiving_account(
    State(state): State<Arc<ReceivingAccountState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .reactivate_receiving_account(&id, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("受取口座再有効化"))?;
    Ok(response.into_response())
}

/// POST /api/team/receiving-accounts/extend/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn extend_receiving_account(
    State(state): State<Arc<ReceivingAccountState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .extend_receiving_account(&id, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("受取口座期限延長"))?;
    Ok(response.into_response())
}
