//! # ミドルウェア
//!
//! BFF 用のミドルウェアを提供する。

mod auth;
mod cache_control;
pub mod request_id;
mod security_headers;
mod two_factor;

pub use auth::{authenticate, bearer_token};
pub use cache_control::no_cache;
pub use request_id::store_request_id;
pub use security_headers::{security_headers, with_security_headers};
pub use two_factor::require_two_factor;
