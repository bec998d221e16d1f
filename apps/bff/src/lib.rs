//! # TeamDesk BFF ライブラリ
//!
//! チームアカウント管理 API を上流 API に中継する BFF のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター構築
//! - `client`: 上流 API クライアント（Bearer 付与、401 時のリフレッシュと再送）
//! - `handler`: HTTP ハンドラ（入力検証と上流呼び出し）
//! - `middleware`: Bearer 認証、2FA ガード、Request ID、キャッシュ制御
//! - `session`: アクセストークンの保持

pub mod app_builder;
pub mod client;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod session;
pub mod validation;
