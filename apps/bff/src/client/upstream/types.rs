//! 上流 API へ送るリクエスト型
//!
//! ハンドラで必須項目を検証した後の値だけを持つ。
//! フィールド名は上流 API の JSON キーに合わせている。
//!
//! 値の型は上流 API が判断するため、受け取った JSON 値をそのまま運ぶ
//! （`member_id` が数値で来れば数値のまま送る）。

use serde::Serialize;
use serde_json::Value;

/// 2FA コード
///
/// 空文字は 2FA コードとして扱わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoFactorCode(String);

impl TwoFactorCode {
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ログインリクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email:    Value,
    pub password: Value,
}

/// チームオーナーのサインアップ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub first_name:  Value,
    pub last_name:   Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<Value>,
    pub email:       Value,
    pub password:    Value,
}

/// メールアドレスだけを送るリクエスト
///
/// 確認メール再送、パスワード再設定依頼、既存ユーザーのメンバー追加で使う。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    pub email: Value,
}

/// パスワード再設定（リセットトークン使用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordResetRequest {
    pub new_password:     Value,
    pub confirm_password: Value,
}

/// パスワード変更（ログイン中）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordChangeRequest {
    pub old_password:     Value,
    pub new_password:     Value,
    pub confirm_password: Value,
}

/// 新規メンバー登録
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRegistration {
    pub first_name:  Value,
    pub last_name:   Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<Value>,
    pub email:       Value,
}

/// クレジット購入
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditPurchase {
    pub amount: serde_json::Number,
}

/// 受取口座の作成
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReceivingAccount {
    pub member_id:           Value,
    pub payment_rail:        Value,
    pub destination_address: Value,
}

/// 受取口座の更新
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivingAccountUpdate {
    pub receiving_account_id: Value,
    pub payment_rail:         Value,
    pub destination_address:  Value,
}

/// 取引一覧の絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub member_id: Option<String>,
    pub from:      Option<String>,
    pub to:        Option<String>,
    pub page:      Option<u32>,
    pub limit:     Option<u32>,
}

impl TransactionFilter {
    /// 指定された条件だけをクエリパラメータにする
    ///
    /// `limit=0` は指定なしとみなして送らない。
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(member_id) = &self.member_id {
            pairs.push(("member_id", member_id.clone()));
        }
        if let Some(from) = &self.from {
            pairs.push(("from", from.clone()));
        }
        if let Some(to) = &self.to {
            pairs.push(("to", to.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
