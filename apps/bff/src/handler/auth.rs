//! # 認証 API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/team/auth/login` - ログイン（アクセストークンを保持）
//! - `POST /api/team/auth/register` - チームオーナーのサインアップ
//! - `GET /api/team/auth/verify-email/{token}` - メールアドレス確認
//! - `POST /api/team/auth/resend-verification` - 確認メール再送
//! - `POST /api/team/auth/forgot-password` - パスワード再設定メールの依頼
//! - `POST /api/team/auth/reset-password/{token}` - パスワード再設定
//! - `POST /api/team/auth/refresh-token` - トークンリフレッシュ（要 Bearer）
//! - `DELETE /api/team/auth/revoke-token` - ログアウト（要 Bearer）

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    client::{
        EmailRequest,
        LoginRequest,
        PasswordResetRequest,
        RegisterRequest,
        UpstreamAuthClient,
    },
    error::ApiError,
    extract::Payload,
    validation::{RequiredFields, ensure_passwords_match, optional_value},
};

/// 認証 API の共有状態
pub struct AuthState {
    pub upstream_client: Arc<dyn UpstreamAuthClient>,
}

// --- リクエスト型 ---

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email:    Option<Value>,
    pub password: Option<Value>,
}

impl LoginBody {
    fn validate(self) -> Result<LoginRequest, ApiError> {
        let mut fields = RequiredFields::default();
        let email = fields.take("email", self.email);
        let password = fields.take("password", self.password);
        fields.finish()?;

        Ok(LoginRequest { email, password })
    }
}

/// サインアップリクエスト
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub first_name:  Option<Value>,
    pub last_name:   Option<Value>,
    pub middle_name: Option<Value>,
    pub email:       Option<Value>,
    pub password:    Option<Value>,
}

impl RegisterBody {
    fn validate(self) -> Result<RegisterRequest, ApiError> {
        let mut fields = RequiredFields::default();
        let first_name = fields.take("first_name", self.first_name);
        let last_name = fields.take("last_name", self.last_name);
        let email = fields.take("email", self.email);
        let password = fields.take("password", self.password);
        fields.finish()?;

        Ok(RegisterRequest {
            first_name,
            last_name,
            middle_name: optional_value(self.middle_name),
            email,
            password,
        })
    }
}

/// メールアドレスだけのリクエスト
#[derive(Debug, Deserialize)]
pub struct EmailBody {
    pub email: Option<Value>,
}

impl EmailBody {
    pub(super) fn validate(self) -> Result<EmailRequest, ApiError> {
        let mut fields = RequiredFields::default();
        let email = fields.take("email", self.email);
        fields.finish()?;
        Ok(EmailRequest { email })
    }
}

/// パスワード再設定リクエスト
#[derive(Debug, Deserialize)]
pub struct ResetPasswordBody {
    pub new_password:     Option<Value>,
    pub confirm_password: Option<Value>,
}

impl ResetPasswordBody {
    fn validate(self) -> Result<PasswordResetRequest, ApiError> {
        let mut fields = RequiredFields::default();
        let new_password = fields.take("new_password", self.new_password);
        let confirm_password = fields.take("confirm_password", self.confirm_password);
        fields.finish()?;
        ensure_passwords_match(&new_password, &confirm_password)?;

        Ok(PasswordResetRequest {
            new_password,
            confirm_password,
        })
    }
}

// --- ハンドラ ---

/// POST /api/team/auth/login
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Payload(body): Payload<LoginBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .login(&req)
        .await
        .map_err(ApiError::upstream("ログイン"))?;
    Ok(response.into_response())
}

/// POST /api/team/auth/register
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AuthState>>,
    Payload(body): Payload<RegisterBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .register(&req)
        .await
        .map_err(ApiError::upstream("サインアップ"))?;
    Ok(response.into_response())
}

/// GET /api/team/auth/verify-email/{token}
#[tracing::instrument(skip_all)]
pub async fn verify_email(
    State(state): State<Arc<AuthState>>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .verify_email(&token)
        .await
        .map_err(ApiError::upstream("メールアドレス確認"))?;
    Ok(response.into_response())
}

/// POST /api/team/auth/resend-verification
#[tracing::instrument(skip_all)]
pub async fn resend_verification(
    State(state): State<Arc<AuthState>>,
    Payload(body): Payload<EmailBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .resend_verification(&req)
        .await
        .map_err(ApiError::upstream("確認メール再送"))?;
    Ok(response.into_response())
}

/// POST /api/team/auth/forgot-password
#[tracing::instrument(skip_all)]
pub async fn forgot_password(
    State(state): State<Arc<AuthState>>,
    Payload(body): Payload<EmailBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .forgot_password(&req)
        .await
        .map_err(ApiError::upstream("パスワード再設定依頼"))?;
    Ok(response.into_response())
}

/// POST /api/team/auth/reset-password/{token}
#[tracing::instrument(skip_all)]
pub async fn reset_password(
    State(state): State<Arc<AuthState>>,
    Path(token): Path<String>,
    Payload(body): Payload<ResetPasswordBody>,
) -> Result<Response, ApiError> {
    let req = body.validate()?;
    let response = state
        .upstream_client
        .reset_password(&token, &req)
        .await
        .map_err(ApiError::upstream("パスワード再設定"))?;
    Ok(response.into_response())
}

/// POST /api/team/auth/refresh-token
#[tracing::instrument(skip_all)]
pub async fn refresh_token(State(state): State<Arc<AuthState>>) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .refresh_token()
        .await
        .map_err(ApiError::upstream("トークンリフレッシュ"))?;
    Ok(response.into_response())
}

/// DELETE /api/team/auth/revoke-token
///
/// 上流の結果にかかわらず、保持中のトークンはクリアされる。
#[tracing::instrument(skip_all)]
pub async fn revoke_token(State(state): State<Arc<AuthState>>) -> Result<Response, ApiError> {
    let response = state
        .upstream_client
        .revoke_token()
        .await
        .map_err(ApiError::upstream("ログアウト"))?;
    tracing::info!("ログアウトしました");
    Ok(response.into_response())
}
