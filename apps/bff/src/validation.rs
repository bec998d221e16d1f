//! # 入力検証ヘルパー
//!
//! 必須項目の不足はまとめて 1 つの 400 メッセージで返す。
//! 検証に失敗したリクエストは上流 API に送らない。

use serde_json::{Number, Value};

use crate::error::ApiError;

/// 必須項目の取り出しと不足項目の収集
///
/// 値の型は問わない。`null`・欠落・空白のみの文字列だけを不足とみなし、
/// それ以外は受け取った JSON 値のまま上流 API に送る。
///
/// ```rust,ignore
/// let mut fields = RequiredFields::default();
/// let email = fields.take("email", body.email);
/// let password = fields.take("password", body.password);
/// fields.finish()?;
/// ```
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// 値を取り出す。不足なら記録して `null` を返す
    pub fn take(&mut self, name: &'static str, value: Option<Value>) -> Value {
        match present(value) {
            Some(value) => value,
            None => {
                self.missing.push(name);
                Value::Null
            }
        }
    }

    /// 不足項目があれば `ApiError::Validation` を返す
    pub fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(missing_fields_message(&self.missing)))
        }
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// 不足項目のメッセージ
pub fn missing_fields_message(fields: &[&str]) -> String {
    format!("必須項目が不足しています: {}", fields.join(", "))
}

/// 任意のクエリ値を取り出す（空白のみは未指定とみなす）
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// ボディの任意項目を取り出す（`null` と空白のみは未指定）
pub fn optional_value(value: Option<Value>) -> Option<Value> {
    present(value)
}

/// 新しいパスワードと確認用パスワードの一致を確認する
pub fn ensure_passwords_match(
    new_password: &Value,
    confirm_password: &Value,
) -> Result<(), ApiError> {
    if new_password == confirm_password {
        Ok(())
    } else {
        Err(ApiError::validation(
            "新しいパスワードと確認用パスワードが一致しません",
        ))
    }
}

/// クレジット購入額を検証する
///
/// 数値または数値文字列で、0 より大きいこと。
/// 数値はそのまま、文字列は整数なら整数、小数なら浮動小数点数に変換する。
pub fn parse_amount(value: Option<&Value>) -> Result<Number, ApiError> {
    let invalid = || ApiError::validation("amount は 0 より大きい数値である必要があります");

    match value {
        None | Some(Value::Null) => Err(ApiError::validation(missing_fields_message(&["amount"]))),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ApiError::validation(missing_fields_message(&["amount"])))
        }
        Some(Value::Number(n)) => {
            if n.as_f64().is_some_and(|amount| amount > 0.0) {
                Ok(n.clone())
            } else {
                Err(invalid())
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if let Ok(amount) = s.parse::<u64>() {
                return if amount > 0 { Ok(Number::from(amount)) } else { Err(invalid()) };
            }
            s.parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite() && *amount > 0.0)
                .and_then(Number::from_f64)
                .ok_or_else(invalid)
        }
        Some(_) => Err(invalid()),
    }
}

/// クエリの数値パラメータ（page / limit）を解釈する
///
/// 未指定・空文字は `None`。数値でなければ 400。
pub fn parse_u32_param(name: &str, value: Option<&str>) -> Result<Option<u32>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse::<u32>().map(Some).map_err(|_| {
            ApiError::validation(format!("{name} は 0 以上の整数である必要があります"))
        }),
    }
}
