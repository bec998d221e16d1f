//! # 上流 API のアクセストークン保持
//!
//! プロセスで共有する唯一の可変状態。
//!
//! - ログイン・トークンリフレッシュ成功時に設定
//! - Bearer 認証ミドルウェアが受信ヘッダーの値で上書き
//! - 上流 API へのすべてのリクエストで参照
//! - ログアウト時とリフレッシュ失敗時にクリア
//!
//! 書き込みは調停しない（最後に書いたものが勝つ）。

use std::sync::{Arc, PoisonError, RwLock};

/// アクセストークンの保持者
///
/// `Clone` はハンドルの複製で、同じトークンを共有する。
#[derive(Debug, Clone, Default)]
pub struct AccessTokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl AccessTokenStore {
    /// 初期トークン付きで作成する（`ACCESS_TOKEN` 環境変数など）
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.filter(|token| !token.is_empty()))),
        }
    }

    /// 現在のトークンを返す
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_held(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
