//! # 外部 API クライアント
//!
//! 上流のチームアカウント API との通信を担当する。

pub mod upstream;

pub use upstream::{
    CreditPurchase,
    EmailRequest,
    LoginRequest,
    MemberRegistration,
    NewReceivingAccount,
    PasswordChangeRequest,
    PasswordResetRequest,
    ReceivingAccountUpdate,
    RegisterRequest,
    TWO_FACTOR_HEADER,
    TransactionFilter,
    TwoFactorCode,
    UpstreamAccountClient,
    UpstreamAuthClient,
    UpstreamClient,
    UpstreamClientImpl,
    UpstreamError,
    UpstreamReceivingAccountClient,
    UpstreamResponse,
    UpstreamTransactionClient,
};
