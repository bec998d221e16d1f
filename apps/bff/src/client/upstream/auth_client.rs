//! 認証関連の上流 API クライアント

use async_trait::async_trait;

use super::{
    client_impl::{REFRESH_TOKEN_PATH, UpstreamClientImpl, UpstreamRequest, encode_segment},
    error::UpstreamError,
    response::UpstreamResponse,
    types::{EmailRequest, LoginRequest, PasswordResetRequest, RegisterRequest},
};

/// 認証関連の上流 API クライアントトレイト
#[async_trait]
pub trait UpstreamAuthClient: Send + Sync {
    /// ログインする
    ///
    /// 上流 API の `POST /team/auth/login` を呼び出す。
    /// 成功時は `data.token` をアクセストークンとして保持する。
    async fn login(&self, req: &LoginRequest) -> Result<UpstreamResponse, UpstreamError>;

    /// チームオーナーとしてサインアップする
    ///
    /// 上流 API の `POST /team/auth/register` を呼び出す。
    async fn register(&self, req: &RegisterRequest) -> Result<UpstreamResponse, UpstreamError>;

    /// メールアドレスを確認する
    ///
    /// 上流 API の `GET /team/auth/verify-email/{token}` を呼び出す。
    async fn verify_email(&self, token: &str) -> Result<UpstreamResponse, UpstreamError>;

    /// 確認メールを再送する
    ///
    /// 上流 API の `POST /team/auth/resend-verification` を呼び出す。
    async fn resend_verification(
        &self,
        req: &EmailRequest,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// パスワード再設定メールを依頼する
    ///
    /// 上流 API の `POST /team/auth/forgot-password` を呼び出す。
    async fn forgot_password(&self, req: &EmailRequest) -> Result<UpstreamResponse, UpstreamError>;

    /// リセットトークンでパスワードを再設定する
    ///
    /// 上流 API の `POST /team/auth/reset-password/{token}` を呼び出す。
    async fn reset_password(
        &self,
        token: &str,
        req: &PasswordResetRequest,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// アクセストークンをリフレッシュする
    ///
    /// 上流 API の `POST /team/auth/refresh-token` を呼び出す。
    /// 401 でも再試行しない。成功時は `data.token` を保持する。
    async fn refresh_token(&self) -> Result<UpstreamResponse, UpstreamError>;

    /// トークンを無効化する（ログアウト）
    ///
    /// 上流 API の `DELETE /team/auth/revoke-token` を呼び出す。
    /// 上流の結果にかかわらず保持中のトークンをクリアする。
    async fn revoke_token(&self) -> Result<UpstreamResponse, UpstreamError>;
}

#[async_trait]
impl UpstreamAuthClient for UpstreamClientImpl {
    async fn login(&self, req: &LoginRequest) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/auth/login").json(req)?;
        let response = self.execute(request).await?;

        if let Some(token) = response.token() {
            self.token_store.set(token);
        }
        Ok(response)
    }

    async fn register(&self, req: &RegisterRequest) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/auth/register").json(req)?;
        self.execute(request).await
    }

    async fn verify_email(&self, token: &str) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/auth/verify-email/{}", encode_segment(token));
        self.execute(UpstreamRequest::get(path)).await
    }

    async fn resend_verification(
        &self,
        req: &EmailRequest,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/auth/resend-verification").json(req)?;
        self.execute(request).await
    }

    async fn forgot_password(&self, req: &EmailRequest) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/auth/forgot-password").json(req)?;
        self.execute(request).await
    }

    async fn reset_password(
        &self,
        token: &str,
        req: &PasswordResetRequest,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/auth/reset-password/{}", encode_segment(token));
        let request = UpstreamRequest::post(path).json(req)?;
        self.execute(request).await
    }

    async fn refresh_token(&self) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post(REFRESH_TOKEN_PATH).without_refresh();
        let response = self.execute(request).await?;

        if let Some(token) = response.token() {
            self.token_store.set(token);
        }
        Ok(response)
    }

    async fn revoke_token(&self) -> Result<UpstreamResponse, UpstreamError> {
        let result = self
            .execute(UpstreamRequest::delete("/team/auth/revoke-token"))
            .await;

        self.token_store.clear();
        result
    }
}
