//! 受取口座関連の上流 API クライアント

use async_trait::async_trait;

use super::{
    client_impl::{UpstreamClientImpl, UpstreamRequest, encode_segment},
    error::UpstreamError,
    response::UpstreamResponse,
    types::{NewReceivingAccount, ReceivingAccountUpdate, TwoFactorCode},
};

/// 受取口座関連の上流 API クライアントトレイト
#[async_trait]
pub trait UpstreamReceivingAccountClient: Send + Sync {
    /// 受取口座を作成する
    ///
    /// 上流 API の `POST /team/receiving-accounts` を呼び出す。
    async fn create_receiving_account(
        &self,
        req: &NewReceivingAccount,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// 受取口座を更新する
    ///
    /// 上流 API の `PUT /team/receiving-accounts` を呼び出す。
    async fn update_receiving_account(
        &self,
        req: &ReceivingAccountUpdate,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// 受取口座一覧を取得する
    ///
    /// 上流 API の `GET /team/receiving-accounts` を呼び出す。
    async fn list_receiving_accounts(&self) -> Result<UpstreamResponse, UpstreamError>;

    /// 受取口座を 1 件取得する
    ///
    /// 上流 API の `GET /team/receiving-accounts/{id}` を呼び出す。
    async fn get_receiving_account(&self, id: &str) -> Result<UpstreamResponse, UpstreamError>;

    /// 受取口座を再有効化する
    ///
    /// 上流 API の `POST /team/receiving-accounts/reactivate/{id}` を呼び出す。
    async fn reactivate_receiving_account(
        &self,
        id: &str,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;

    /// 受取口座の有効期限を延長する
    ///
    /// 上流 API の `POST /team/receiving-accounts/extend/{id}` を呼び出す。
    async fn extend_receiving_account(
        &self,
        id: &str,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError>;
}

#[async_trait]
impl UpstreamReceivingAccountClient for UpstreamClientImpl {
    async fn create_receiving_account(
        &self,
        req: &NewReceivingAccount,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::post("/team/receiving-accounts")
            .json(req)?
            .two_factor(code);
        self.execute(request).await
    }

    async fn update_receiving_account(
        &self,
        req: &ReceivingAccountUpdate,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::put("/team/receiving-accounts")
            .json(req)?
            .two_factor(code);
        self.execute(request).await
    }

    async fn list_receiving_accounts(&self) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(UpstreamRequest::get("/team/receiving-accounts"))
            .await
    }

    async fn get_receiving_account(&self, id: &str) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/receiving-accounts/{}", encode_segment(id));
        self.execute(UpstreamRequest::get(path)).await
    }

    async fn reactivate_receiving_account(
        &self,
        id: &str,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/receiving-accounts/reactivate/{}", encode_segment(id));
        self.execute(UpstreamRequest::post(path).two_factor(code))
            .await
    }

    async fn extend_receiving_account(
        &self,
        id: &str,
        code: Option<&TwoFactorCode>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let path = format!("/team/receiving-accounts/extend/{}", encode_segment(id));
        self.execute(UpstreamRequest::post(path).two_factor(code))
            .await
    }
}
