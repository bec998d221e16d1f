//! 取引関連の上流 API クライアント

use async_trait::async_trait;

use super::{
    client_impl::{UpstreamClientImpl, UpstreamRequest},
    error::UpstreamError,
    response::UpstreamResponse,
    types::TransactionFilter,
};

/// 取引関連の上流 API クライアントトレイト
#[async_trait]
pub trait UpstreamTransactionClient: Send + Sync {
    /// 直近の取引を取得する
    ///
    /// 上流 API の `GET /team/transactions/recent` を呼び出す。
    async fn list_recent_transactions(&self) -> Result<UpstreamResponse, UpstreamError>;

    /// 条件を指定して取引一覧を取得する
    ///
    /// 上流 API の `GET /team/transactions` を呼び出す。
    /// 指定された条件だけをクエリパラメータとして送る。
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<UpstreamResponse, UpstreamError>;
}

#[async_trait]
impl UpstreamTransactionClient for UpstreamClientImpl {
    async fn list_recent_transactions(&self) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(UpstreamRequest::get("/team/transactions/recent"))
            .await
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let request = UpstreamRequest::get("/team/transactions").query(filter.query_pairs());
        self.execute(request).await
    }
}
