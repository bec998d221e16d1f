//! チームアカウント関連の上流 API クライアント
//!
//! メンバー管理、2FA、クレジット、パスワード変更を扱う。

use async_trait::async_trait;

use super::{
    client_impl::{UpstreamClientImpl, UpstreamRequest, encode_segment},
    error::UpstreamError,
    response::UpstreamResponse,
    types::{
        CreditPurchase,
        EmailRequest,
        MemberRegistration,
        PasswordChangeRequest,
        TwoFactorCode,
    },
};

/// チームアカウント関連の上流 API クライアントトレイト
#[async_trait]
pub trait UpstreamAccountClient: Send + Sync {
    /// 新規ユーザーをメンバーとして登録する
    ///
    /// 上流 API の `POST /team/account/members/register` を呼び出す。
    async fn register_member(
        &self,
        req: &MemberRegistration,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// 既存ユーザーをメンバーに追加する
    ///
    /// 上流 API の `POST /team/account/members/add` を呼び出す。
    async fn add_member(
        &self,
        req: &EmailRequest,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// メンバー招待を確認する
    ///
    /// 上流 API の `POST /team/account/members/verify/{token}` を呼び出す。
    async fn verify_member(&self, token: &str) -> Result<UpstreamResponse, UpstreamError>;

    /// メンバーを削除する
    ///
    /// 上流 API の `DELETE /team/account/members/{member_id}` を呼び出す。
    async fn remove_member(
        &self,
        member_id: &str,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// メンバー一覧を取得する
    ///
    /// 上流 API の `GET /team/account/members` を呼び出す。
    async fn list_members(&self) -> Result<UpstreamResponse, UpstreamError>;

    /// 2FA のセットアップ情報を取得する
    ///
    /// 上流 API の `GET /team/account/2fa` を呼び出す。
    async fn setup_two_factor(&self) -> Result<UpstreamResponse, UpstreamError>;

    /// 2FA をリセットする
    ///
    /// 上流 API の `POST /team/account/2fa` を呼び出す。
    async fn reset_two_factor(
        &self,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// クレジット残高を取得する
    ///
    /// 上流 API の `GET /team/account/credits` を呼び出す。
    async fn get_credits(&self) -> Result<UpstreamResponse, UpstreamError>;

    /// クレジットを購入する
    ///
    /// 上流 API の `POST /team/account/credits` を呼び出す。
    async fn buy_credits(&self, req: &CreditPurchase) -> Result<UpstreamResponse, UpstreamError>;

    /// パスワードを変更する
    ///
    /// 上流 API の `POST /team/account/change-password` を呼び出す。
    async fn change_password(
        &self,
        req: &PasswordChangeRequest,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;
}

#[async_trait]
impl UpstreamAccountClient for UpstreamClientImpl {
    async fn register_member(
        &self,
        req: &MemberRegistration,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/account/members/register")
            .json(req)?
            .two_factor(code);
        self.execute(request).await
    }

    async fn add_member(
        &self,
        req: &EmailRequest,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/account/members/add")
            .json(req)?
            .two_factor(code);
        self.execute(request).await
    }

    async fn verify_member(&self, token: &str) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/account/members/verify/{}", encode_segment(token));
        self.execute(UpstreamRequest::post(path)).await
    }

    async fn remove_member(
        &self,
        member_id: &str,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/account/members/{}", encode_segment(member_id));
        self.execute(UpstreamRequest::delete(path).two_factor(code))
            .await
    }

    async fn list_members(&self) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(UpstreamRequest::get("/team/account/members"))
            .await
    }

    async fn setup_two_factor(&self) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(UpstreamRequest::get("/team/account/2fa")).await
    }

    async fn reset_two_factor(
        &self,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(UpstreamRequest::post("/team/account/2fa").two_factor(code))
            .await
    }

    async fn get_credits(&self) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(UpstreamRequest::get("/team/account/credits"))
            .await
    }

    async fn buy_credits(&self, req: &CreditPurchase) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/account/credits").json(req)?;
        self.execute(request).await
    }

    async fn change_password(
        &self,
        req: &PasswordChangeRequest,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/account/change-password")
            .json(req)?
            .two_factor(code);
        self.execute(request).await
    }
}
