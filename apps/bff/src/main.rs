//! # TeamDesk BFF サーバー
//!
//! チームアカウント管理のフロントエンド専用 API サーバー。
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │   Frontend   │────▶│     BFF      │────▶│  Upstream API    │
//! │              │     │  port: 3000  │     │  /v0/team/...    │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p teamdesk-bff
//!
//! # 本番環境（環境変数を直接指定）
//! BFF_PORT=3000 API_BASE_URL=https://api.peionio.com/v0 LOG_FORMAT=json \
//!     cargo run -p teamdesk-bff --release
//! ```
//!
//! 環境変数の一覧は [`config`] を参照。

mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use config::BffConfig;
use teamdesk_bff::{app_builder::build_app, client::UpstreamClientImpl, session::AccessTokenStore};
use teamdesk_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// BFF サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 上流クライアントとルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env(env!("CARGO_PKG_NAME"));
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = BffConfig::from_env().context("設定の読み込みに失敗しました")?;

    let http_client = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .context("HTTP クライアントの初期化に失敗しました")?;

    // クライアントとミドルウェアで同じトークン保持者を共有する
    let token_store = AccessTokenStore::new(config.access_token.clone());

    tracing::info!(
        upstream = %config.api_base_url,
        token_preloaded = token_store.is_held(),
        "BFF サーバーを起動します: {}:{}",
        config.host,
        config.port
    );
    let upstream_client = Arc::new(UpstreamClientImpl::new(
        &config.api_base_url,
        http_client,
        token_store.clone(),
    ));

    let app = build_app(upstream_client, token_store);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
    tracing::info!("BFF サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
