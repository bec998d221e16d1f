//! # 上流 API クライアント
//!
//! BFF から上流のチームアカウント API への通信を担当する。
//!
//! ## エンドポイント
//!
//! - `/team/auth/*` - ログイン、サインアップ、トークンのリフレッシュと無効化
//! - `/team/account/*` - メンバー管理、2FA、クレジット、パスワード変更
//! - `/team/receiving-accounts/*` - 受取口座
//! - `/team/transactions/*` - 取引履歴
//!
//! すべての呼び出しは Bearer トークン付与と 401 時のリフレッシュ・再送を共有する
//! （[`client_impl`] を参照）。

mod account_client;
mod auth_client;
mod client_impl;
mod error;
mod receiving_account_client;
mod response;
mod transaction_client;
mod types;

pub use account_client::UpstreamAccountClient;
pub use auth_client::UpstreamAuthClient;
pub use client_impl::{TWO_FACTOR_HEADER, UpstreamClient, UpstreamClientImpl};
pub use error::UpstreamError;
pub use receiving_account_client::UpstreamReceivingAccountClient;
pub use response::UpstreamResponse;
pub use transaction_client::UpstreamTransactionClient;
pub use types::{
    CreditPurchase,
    EmailRequest,
    LoginRequest,
    MemberRegistration,
    NewReceivingAccount,
    PasswordChangeRequest,
    PasswordResetRequest,
    ReceivingAccountUpdate,
    RegisterRequest,
    TransactionFilter,
    TwoFactorCode,
};
