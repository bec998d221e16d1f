//! # チームアカウント API ハンドラ
//!
//! すべて Bearer 認証が必要。`2FA` 列が「要」のものは 2FA ガードも通る。
//!
//! | ルート | 2FA |
//! |--------|-----|
//! | `POST /api/team/account/members/register` | 要 |
//! | `POST /api/team/account/members/add` | 要 |
//! | `DELETE /api/team/account/members/{member_id}` | 要 |
//! | `POST /api/team/account/2fa` | 要 |
//! | `POST /api/team/account/change-password` | 要 |
//! | `POST /api/team/account/members/verify/{token}` | - |
//! | `GET /api/team/account/members` | - |
//! | `GET /api/team/account/2fa` | - |
//! | `GET /api/team/account/credits` | - |
//! | `POST /api/team/account/credits` | - |

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use super::auth::EmailBody;
use crate::{
    client::{CreditPurchase, MemberRegistration, PasswordChangeRequest, UpstreamAccountClient},
    error::ApiError,
    extract::{Payload, two_factor_code},
    validation::{RequiredFields, ensure_passwords_match, optional_value, parse_amount},
};

/// チームアカウント API の共有状態
pub struct AccountState {
    pub upstream_client: Arc<dyn UpstreamAccountClient>,
}

// --- リクエスト型 ---

/// メンバー登録リクエスト
#[derive(Debug, Deserialize)]
pub struct RegisterMemberBody {
    pub first_name:  Option<Value>,
    pub last_name:   Option<Value>,
    pub middle_name: Option<Value>,
    pub email:       Option<Value>,
}

impl RegisterMemberBody {
    fn validate(self) -> Result<MemberRegistration, ApiError> {
        let mut fields = RequiredFields::default();
        let first_name = fields.take("first_name", self.first_name);
        let last_name = fields.take("last_name", self.last_name);
        let email = fields.take("email", self.email);
        fields.finish()?;

        Ok(MemberRegistration {
            first_name,
            last_name,
            middle_name: optional_value(self.middle_name),
            email,
        })
    }
}

/// パスワード変更リクエスト
#[derive(Debug, Deserialize)]
pub struct ChangePasswordBody {
    pub old_password:     Option<Value>,
    pub new_password:     Option<Value>,
    pub confirm_password: Option<Value>,
}

impl ChangePasswordBody {
    fn validate(self) -> Result<PasswordChangeRequest, ApiError> {
        let mut fields = RequiredFields::default();
        let old_password = fields.take("old_password", self.old_password);
        let new_password = fields.take("new_password", self.new_password);
        let confirm_password = fields.take("confirm_password", self.confirm_password);
        fields.finish()?;
        ensure_passwords_match(&new_password, &confirm_password)?;

        Ok(PasswordChangeRequest {
            old_password,
            new_password,
            confirm_password,
        })
    }
}

/// クレジット購入リクエスト
///
/// `amount` は数値でも数値文字列でもよい。
#[derive(Debug, Deserialize)]
pub struct BuyCreditsBody {
    pub amount: Option<Value>,
}

// --- ハンドラ ---

/// POST /api/team/account/members/register
#[tracing::instrument(skip_all)]
pub async fn register_member(
    State(state): State<Arc<AccountState>>,
    headers: HeaderMap,
    Payload(body): Payload<RegisterMemberBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .register_member(&req, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("メンバー登録"))?;
    Ok(response.into_response())
}

/// POST /api/team/account/members/add
#[tracing::instrument(skip_all)]
pub async fn add_member(
    State(state): State<Arc<AccountState>>,
    headers: HeaderMap,
    Payload(body): Payload<EmailBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .add_member(&req, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("メンバー追加"))?;
    Ok(response.into_response())
}

/// POST /api/team/account/members/verify/{token}
#[tracing::instrument(skip_all)]
pub async fn verify_member(
    State(state): State<Arc<AccountState>>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .verify_member(&token)
        .await
        .map_err(ApiError::upstream("メンバー確認"))?;
    Ok(response.into_response())
}

/// DELETE /api/team/account/members/{member_id}
#[tracing::instrument(skip_all, fields(%member_id))]
pub async fn remove_member(
    State(state): State<Arc<AccountState>>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .remove_member(&member_id, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("メンバー削除"))?;
    Ok(response.into_response())
}

/// GET /api/team/account/members
#[tracing::instrument(skip_all)]
pub async fn list_members(State(state): State<Arc<AccountState>>) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .list_members()
        .await
        .map_err(ApiError::upstream("メンバー一覧取得"))?;
    Ok(response.into_response())
}

/// GET /api/team/account/2fa
#[tracing::instrument(skip_all)]
pub async fn setup_two_factor(
    State(state): State<Arc<AccountState>>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .setup_two_factor()
        .await
        .map_err(ApiError::upstream("2FA セットアップ"))?;
    Ok(response.into_response())
}

/// POST /api/team/account/2fa
#[tracing::instrument(skip_all)]
pub async fn reset_two_factor(
    State(state): State<Arc<AccountState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .reset_two_factor(two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("2FA リセット"))?;
    Ok(response.into_response())
}

/// GET /api/team/account/credits
#[tracing::instrument(skip_all)]
pub async fn get_credits(State(state): State<Arc<AccountState>>) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .get_credits()
        .await
        .map_err(ApiError::upstream("クレジット取得"))?;
    Ok(response.into_response())
}

/// POST /api/team/account/credits
#[tracing::instrument(skip_all)]
pub async fn buy_credits(
    State(state): State<Arc<AccountState>>,
    Payload(body): Payload<BuyCreditsBody>,
) -> Result<Response, ApiError> {
    let amount = parse_amount(body.amount.as_ref())?;
    let response = state
        .upstream_client
        .buy_credits(&CreditPurchase { amount })
        .await
        .map_err(ApiError::upstream("クレジット購入"))?;
    Ok(response.into_response())
}

/// POST /api/team/account/change-password
#[tracing::instrument(skip_all)]
pub async fn change_password(
    State(state): State<Arc<AccountState>>,
    headers: HeaderMap,
    Payload(body): Payload<ChangePasswordBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .change_password(&req, two_factor_code(&headers).as_ref())
        .await
        .map_err(ApiError::upstream("パスワード変更"))?;
    Ok(response.into_response())
}
