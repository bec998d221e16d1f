//! # BFF アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。
//!
//! ## 認証の掛け方
//!
//! - Bearer 認証: `/auth/refresh-token`、`/auth/revoke-token`、account / receiving-accounts /
//!   transactions の全ルート
//! - 2FA ガード: 2FA 必須ルートだけをまとめたサブルーターに `route_layer` で掛け、
//!   Bearer 認証の内側で評価する
//! - 定義のないメソッドはガードを通さず 405 エンベロープを返す

use std::sync::Arc;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
};
use teamdesk_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    client::UpstreamClient,
    handler::{
        AccountState,
        AuthState,
        ReceivingAccountState,
        TransactionState,
        add_member,
        buy_credits,
        change_password,
        create_receiving_account,
        extend_receiving_account,
        forgot_password,
        get_credits,
        get_receiving_account,
        health_check,
        list_members,
        list_receiving_accounts,
        list_recent_transactions,
        list_transactions,
        login,
        method_not_allowed,
        reactivate_receiving_account,
        refresh_token,
        register,
        register_member,
        remove_member,
        resend_verification,
        reset_password,
        reset_two_factor,
        revoke_token,
        route_not_found,
        setup_two_factor,
        update_receiving_account,
        verify_email,
        verify_member,
    },
    middleware::{
        authenticate,
        no_cache,
        require_two_factor,
        store_request_id,
        with_security_headers,
    },
    session::AccessTokenStore,
};

/// State の組み立てとルーター定義を行う
///
/// クライアントは具象型で受け取り、各 State 注入時に必要なサブトレイトへ coerce する。
/// `token_store` はクライアントと同じハンドルを渡すこと。
pub fn build_app<C>(upstream_client: Arc<C>, token_store: AccessTokenStore) -> Router
where
    C: UpstreamClient + 'static,
{
    let auth_state = Arc::new(AuthState {
        upstream_client: upstream_client.clone(),
    });
    let account_state = Arc::new(AccountState {
        upstream_client: upstream_client.clone(),
    });
    let receiving_account_state = Arc::new(ReceivingAccountState {
        upstream_client: upstream_client.clone(),
    });
    let transaction_state = Arc::new(TransactionState { upstream_client });

    // 認証 API（refresh-token / revoke-token のみ Bearer 必須）
    let auth_routes = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/verify-email/{token}", get(verify_email))
        .route("/resend-verification", post(resend_verification))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/{token}", post(reset_password))
        .merge(
            Router::new()
                .route("/refresh-token", post(refresh_token))
                .route("/revoke-token", delete(revoke_token))
                .route_layer(from_fn_with_state(token_store.clone(), authenticate)),
        )
        .with_state(auth_state);

    // チームアカウント API
    let account_routes = Router::new()
        .route("/members", get(list_members))
        .route("/members/verify/{token}", post(verify_member))
        .route("/2fa", get(setup_two_factor))
        .route("/credits", get(get_credits).post(buy_credits))
        .merge(
            Router::new()
                .route("/members/register", post(register_member))
                .route("/members/add", post(add_member))
                .route("/members/{member_id}", delete(remove_member))
                .route("/2fa", post(reset_two_factor))
                .route("/change-password", post(change_password))
                .route_layer(from_fn(require_two_factor)),
        )
        .route_layer(from_fn_with_state(token_store.clone(), authenticate))
        .with_state(account_state);

    // 受取口座 API
    let receiving_account_routes = Router::new()
        .route("/", get(list_receiving_accounts))
        .route("/{id}", get(get_receiving_account))
        .merge(
            Router::new()
                .route(
                    "/",
                    post(create_receiving_account).put(update_receiving_account),
                )
                .route("/reactivate/{id}", post(reactivate_receiving_account))
                .route("/extend/{id}", post(extend_receiving_account))
                .route_layer(from_fn(require_two_factor)),
        )
        .route_layer(from_fn_with_state(token_store.clone(), authenticate))
        .with_state(receiving_account_state);

    // 取引 API
    let transaction_routes = Router::new()
        .route("/", get(list_transactions))
        .route("/recent", get(list_recent_transactions))
        .route_layer(from_fn_with_state(token_store, authenticate))
        .with_state(transaction_state);

    // メソッド違いの 405 は各ルートのガードより前に返す。
    // ネスト後に呼び、ネストしたルートにも効かせること
    let routes = Router::new()
        .route("/health", get(health_check))
        .nest("/api/team/auth", auth_routes)
        .nest("/api/team/account", account_routes)
        .nest("/api/team/receiving-accounts", receiving_account_routes)
        .nest("/api/team/transactions", transaction_routes)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed);

    // レイヤー順序: 下に書いたものが外側
    // 1. CorsLayer（最外）
    // 2. SetRequestIdLayer: UUID v7 を生成（またはクライアント提供値を使用）
    // 3. TraceLayer: request_id 付きのスパンを作る
    // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    // 5. store_request_id: task-local に保存し、上流 API への伝播に使う
    // 6. no_cache
    // 7. セキュリティヘッダー
    with_security_headers(routes)
        .layer(from_fn(no_cache))
        .layer(from_fn(store_request_id))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CorsLayer::permissive())
}
