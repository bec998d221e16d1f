//! # Observability 基盤
//!
//! トレーシング初期化、リクエストスパン、Request ID 生成をまとめる。
//!
//! ログ出力形式は環境変数 `LOG_FORMAT`（`json` / `pretty`）で切り替える。
//! ログレベルは `RUST_LOG` で制御する。

/// Request ID を運ぶヘッダー名
///
/// 受信リクエストへの付与、レスポンスへのコピー、上流 API への伝播で共通に使う。
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,teamdesk=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（本番向け）
    Json,
    /// 人間向けの整形出力（開発向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する（大文字小文字・前後の空白は無視）
    ///
    /// 空文字は既定値。知らない値も [`Pretty`](LogFormat::Pretty) に倒し、
    /// subscriber 登録前なので stderr にだけ警告を出す。
    pub fn parse(s: &str) -> Self {
        let value = s.trim();
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else if value.is_empty() || value.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            eprintln!("WARNING: LOG_FORMAT={value:?} は未対応のため pretty で出力します");
            Self::Pretty
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（`app` スパンの `service` フィールド）
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// `LOG_FORMAT` から出力形式を決めて設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバルな tracing subscriber を登録する
///
/// プロセス起動時に一度だけ呼ぶこと。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// UUID v7 の Request ID を生成する `MakeRequestId` 実装
///
/// v7 は時刻順に並ぶため、ログを Request ID でソートすると受信順になる。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let value = http::HeaderValue::from_str(&uuid::Uuid::now_v7().to_string()).ok()?;
        Some(tower_http::request_id::RequestId::new(value))
    }
}

/// `TraceLayer::make_span_with` 用のリクエストスパンを作る
///
/// `SetRequestIdLayer` の内側で呼ばれる前提で、`x-request-id` ヘッダーを
/// `request_id` フィールドに載せる。スパン内のログには method / uri / request_id
/// が自動で付く。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
