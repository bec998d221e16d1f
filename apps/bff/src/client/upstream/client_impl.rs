//! UpstreamClient スーパートレイトとクライアント実装の構造体
//!
//! 上流 API へのリクエストはすべて [`UpstreamClientImpl::execute`] を通る。
//!
//! 1. 保持中のアクセストークンを `Authorization: Bearer` で付与する
//! 2. 401 を受けたら `POST /team/auth/refresh-token` を 1 回だけ呼ぶ
//! 3. リフレッシュに成功したら元のリクエストを 1 回だけ再送する
//!
//! 再送後の 401 はそのままエラーとして返し、再度のリフレッシュは行わない。

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::{
    account_client::UpstreamAccountClient,
    auth_client::UpstreamAuthClient,
    error::UpstreamError,
    receiving_account_client::UpstreamReceivingAccountClient,
    response::{UpstreamResponse, handle_response},
    transaction_client::UpstreamTransactionClient,
    types::TwoFactorCode,
};
use crate::{middleware::request_id::inject_request_id, session::AccessTokenStore};

/// 2FA コードを載せるヘッダー
pub const TWO_FACTOR_HEADER: &str = "2fa";

/// トークンリフレッシュのパス
pub(super) const REFRESH_TOKEN_PATH: &str = "/team/auth/refresh-token";

/// 上流 API クライアントトレイト（スーパートレイト）
///
/// Auth / Account / ReceivingAccount / Transaction の各サブトレイトを束ねる。
/// ハンドラは必要なサブトレイトだけに依存する。
pub trait UpstreamClient:
    UpstreamAuthClient
    + UpstreamAccountClient
    + UpstreamReceivingAccountClient
    + UpstreamTransactionClient
{
}

impl<T> UpstreamClient for T where
    T: UpstreamAuthClient
        + UpstreamAccountClient
        + UpstreamReceivingAccountClient
        + UpstreamTransactionClient
{
}

/// 上流 API クライアント実装
#[derive(Clone)]
pub struct UpstreamClientImpl {
    pub(super) base_url:    String,
    pub(super) client:      reqwest::Client,
    pub(super) token_store: AccessTokenStore,
}

impl UpstreamClientImpl {
    /// 新しい UpstreamClient を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: 上流 API のベース URL（例: `https://api.peionio.com/v0`）
    /// - `client`: タイムアウト等を設定済みの reqwest クライアント
    /// - `token_store`: ミドルウェアと共有するアクセストークン保持者
    pub fn new(base_url: &str, client: reqwest::Client, token_store: AccessTokenStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token_store,
        }
    }

    /// 上流 API にリクエストを送り、401 ならリフレッシュして 1 回だけ再送する
    pub(super) async fn execute(
        &self,
        request: UpstreamRequest,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let response = self.dispatch(&request).await?;
        if response.status() != StatusCode::UNAUTHORIZED || !request.refresh_on_unauthorized {
            return handle_response(response).await;
        }

        tracing::info!(
            method = %request.method,
            path = %request.path,
            "上流 API が 401 を返したため、トークンをリフレッシュして再送します"
        );
        self.refresh_access_token().await?;

        let retried = self.dispatch(&request).await?;
        handle_response(retried).await
    }

    /// アクセストークンをリフレッシュし、保持者に反映する
    ///
    /// 失敗時（エラー応答、またはボディに `data.token` がない）は
    /// 保持中のトークンをクリアして `AuthenticationFailed` を返す。
    async fn refresh_access_token(&self) -> Result<(), UpstreamError> {
        let request = UpstreamRequest::post(REFRESH_TOKEN_PATH).without_refresh();
        let outcome = match self.dispatch(&request).await {
            Ok(response) => handle_response(response).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => match response.token() {
                Some(token) => {
                    self.token_store.set(token);
                    Ok(())
                }
                None => {
                    tracing::warn!("リフレッシュ応答にトークンが含まれていません");
                    self.token_store.clear();
                    Err(UpstreamError::AuthenticationFailed)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "トークンのリフレッシュに失敗しました");
                self.token_store.clear();
                Err(UpstreamError::AuthenticationFailed)
            }
        }
    }

    /// リクエストを組み立てて 1 回送信する
    async fn dispatch(&self, request: &UpstreamRequest) -> Result<reqwest::Response, UpstreamError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.token_store.get() {
            builder = builder.bearer_auth(token);
        }
        if let Some(code) = &request.two_factor {
            builder = builder.header(TWO_FACTOR_HEADER, code.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = inject_request_id(builder).send().await?;
        Ok(response)
    }
}

/// 上流 API への 1 リクエスト分の組み立て情報
///
/// 再送に備えてボディは `Value` で保持する。
#[derive(Debug, Clone)]
pub(super) struct UpstreamRequest {
    method:                  Method,
    path:                    String,
    query:                   Vec<(&'static str, String)>,
    body:                    Option<Value>,
    two_factor:              Option<TwoFactorCode>,
    refresh_on_unauthorized: bool,
}

impl UpstreamRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            two_factor: None,
            refresh_on_unauthorized: true,
        }
    }

    pub(super) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(super) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(super) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(super) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(super) fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub(super) fn json<T: Serialize>(mut self, body: &T) -> Result<Self, UpstreamError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(super) fn two_factor(mut self, code: Option<&TwoFactorCode>) -> Self {
        self.two_factor = code.cloned();
        self
    }

    /// 401 を受けてもリフレッシュしない（リフレッシュ自身の呼び出し用）
    pub(super) fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }
}

/// パスに埋め込むユーザー入力をエンコードする
pub(super) fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
