//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは入力検証だけを行い、処理は上流 API に委譲する
//! - 成功時は上流のステータスとボディをそのまま返す

pub mod account;
pub mod auth;
pub mod fallback;
pub mod health;
pub mod receiving_account;
pub mod transaction;

pub use account::{
    AccountState,
    add_member,
    buy_credits,
    change_password,
    get_credits,
    list_members,
    register_member,
    remove_member,
    reset_two_factor,
    setup_two_factor,
    verify_member,
};
pub use auth::{
    AuthState,
    forgot_password,
    login,
    refresh_token,
    register,
    resend_verification,
    reset_password,
    revoke_token,
    verify_email,
};
pub use fallback::{method_not_allowed, route_not_found};
pub use health::health_check;
pub use receiving_account::{
    ReceivingAccountState,
    create_receiving_account,
    extend_receiving_account,
    get_receiving_account,
    list_receiving_accounts,
    reactivate_receiving_account,
    update_receiving_account,
};
pub use transaction::{TransactionState, list_recent_transactions, list_transactions};
