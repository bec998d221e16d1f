//! # BFF 設定
//!
//! 環境変数から BFF サーバーの設定を読み込む。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `BFF_HOST` | `0.0.0.0` | バインドアドレス |
//! | `BFF_PORT` | `3000` | ポート番号 |
//! | `API_BASE_URL` | `https://api.peionio.com/v0` | 上流 API のベース URL |
//! | `ACCESS_TOKEN` | なし | 起動時に保持するアクセストークン |
//! | `UPSTREAM_TIMEOUT_SECS` | `30` | 上流 API 呼び出しのタイムアウト（秒） |

use std::{env, time::Duration};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_BASE_URL: &str = "https://api.peionio.com/v0";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// BFF サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BffConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// 上流 API のベース URL
    pub api_base_url:     String,
    /// 起動時のアクセストークン
    pub access_token:     Option<String>,
    pub upstream_timeout: Duration,
}

impl BffConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 未設定と空文字はどちらもデフォルト値を使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("BFF_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "BFF_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "UPSTREAM_TIMEOUT_SECS",
                    value,
                })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            host: get("BFF_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            access_token: get("ACCESS_TOKEN"),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
