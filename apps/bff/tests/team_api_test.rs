//! # チームアカウント API の統合テスト
//!
//! 実際のルーター（`build_app`）と上流クライアントを組み立て、
//! 上流 API を wiremock で置き換えて一連の振る舞いを検証する。
//!
//! ## テストケース
//!
//! - 上流の成功レスポンスがステータス・ボディともにそのまま返る
//! - 必須項目の不足・Bearer なし・2FA なしは上流を呼ばずに拒否する
//! - 401 でリフレッシュ 1 回、再送 1 回。再送後の 401 は再試行しない
//! - リフレッシュ失敗時はトークンをクリアして 401
//! - ログアウト後は Authorization ヘッダーなしで上流を呼ぶ
//! - 数値の ID やフォーム送信も値を変えずに転送する
//! - 上流の 5xx / 接続失敗のエラーエンベロープ
//! - 未定義ルートの 404、未対応メソッドの 405、不正なクエリの 400
//! - ヘルスチェック、Cache-Control とセキュリティヘッダー

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use teamdesk_bff::{
    app_builder::build_app,
    client::UpstreamClientImpl,
    middleware::security_headers,
    session::AccessTokenStore,
};
use tower::ServiceExt;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{body_json, header as header_eq, method, path, query_param, query_param_is_missing},
};

/// テスト対象の BFF と上流モック
struct TestContext {
    upstream:    MockServer,
    token_store: AccessTokenStore,
    app:         Router,
}

impl TestContext {
    async fn new() -> Self {
        let upstream = MockServer::start().await;
        let token_store = AccessTokenStore::default();
        let app = build_router(&format!("{}/v0", upstream.uri()), token_store.clone());
        Self {
            upstream,
            token_store,
            app,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

fn build_router(base_url: &str, token_store: AccessTokenStore) -> Router {
    let client = Arc::new(UpstreamClientImpl::new(
        base_url,
        reqwest::Client::new(),
        token_store.clone(),
    ));
    build_app(client, token_store)
}

fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_of(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// --- 透過性 ---

#[tokio::test]
async fn test_上流の成功レスポンスをステータスとボディともにそのまま返す() {
    let ctx = TestContext::new().await;
    let upstream_body = json!({
        "success": true,
        "data": { "members": [{ "id": "m_1", "email": "jane@example.com" }], "total": 1 }
    });
    Mock::given(method("GET"))
        .and(path("/v0/team/account/members"))
        .and(header_eq("authorization", "Bearer valid-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/account/members", "valid-token"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_of(response).await, upstream_body);
}

#[tokio::test]
async fn test_上流の201をそのまま返し2faコードとボディを転送する() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/account/members/add"))
        .and(header_eq("2fa", "123456"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "success": true, "data": { "id": "m_2" } })),
        )
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/team/account/members/add")
        .header(header::AUTHORIZATION, "Bearer valid-token")
        .header("2FA", "123456")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": "new@example.com" }).to_string()))
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_of(response).await,
        json!({ "success": true, "data": { "id": "m_2" } })
    );
}

#[tokio::test]
async fn test_ログイン成功時にトークンを保持する() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/login"))
        .and(body_json(json!({ "email": "owner@example.com", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "token": "login-token" } })),
        )
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(post_json(
            "/api/team/auth/login",
            json!({ "email": "owner@example.com", "password": "secret" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.token_store.get().as_deref(), Some("login-token"));
}

#[tokio::test]
async fn test_取引一覧は指定された条件だけをクエリで送る() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/transactions"))
        .and(query_param("member_id", "m_1"))
        .and(query_param("page", "2"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("from"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer(
            "/api/team/transactions?member_id=m_1&page=2",
            "valid-token",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_数値のmember_idは数値のまま上流に転送する() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/receiving-accounts"))
        .and(body_json(json!({
            "member_id": 42,
            "payment_rail": "ach",
            "destination_address": "x"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true, "data": { "id": "ra_9" } })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/team/receiving-accounts")
        .header(header::AUTHORIZATION, "Bearer valid-token")
        .header("2fa", "123456")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "member_id": 42, "payment_rail": "ach", "destination_address": "x" }).to_string(),
        ))
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_フォーム送信のログインもjsonで上流に転送する() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/login"))
        .and(body_json(json!({ "email": "owner@example.com", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "token": "form-token" } })),
        )
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/team/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=owner%40example.com&password=secret"))
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.token_store.get().as_deref(), Some("form-token"));
}

// --- 上流を呼ばずに拒否する ---

#[tokio::test]
async fn test_必須項目が不足していれば上流を呼ばずに400を返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(post_json(
            "/api/team/auth/register",
            json!({ "first_name": "Jane", "email": "jane@example.com" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_of(response).await,
        json!({
            "success": false,
            "status": 400,
            "message": "必須項目が不足しています: last_name, password"
        })
    );
}

#[tokio::test]
async fn test_bearerトークンがなければ上流を呼ばずに401を返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/account/credits"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(
            Request::builder()
                .uri("/api/team/account/credits")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_of(response).await["success"], json!(false));
}

#[tokio::test]
async fn test_2faヘッダーがなければ上流を呼ばずに401を返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/receiving-accounts/extend/ra_1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.upstream)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/team/receiving-accounts/extend/ra_1")
        .header(header::AUTHORIZATION, "Bearer valid-token")
        .body(Body::empty())
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_2fa不要のget_2faは2faヘッダーなしで通る() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/account/2fa"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": { "qr": "otpauth://..." } })),
        )
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/account/2fa", "valid-token"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

// --- リフレッシュと再送 ---

#[tokio::test]
async fn test_401を受けたらリフレッシュして1回だけ再送する() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/account/members"))
        .and(header_eq("authorization", "Bearer expired-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Token expired" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "token": "renewed-token" } })),
        )
        .expect(1)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/team/account/members"))
        .and(header_eq("authorization", "Bearer renewed-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/account/members", "expired-token"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_of(response).await, json!({ "success": true, "data": [] }));
    assert_eq!(ctx.token_store.get().as_deref(), Some("renewed-token"));
}

#[tokio::test]
async fn test_再送後の401は再試行せずそのまま返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/account/credits"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Token revoked" })))
        .expect(2)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "token": "renewed-token" } })),
        )
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/account/credits", "expired-token"))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_of(response).await,
        json!({ "success": false, "status": 401, "message": "Token revoked" })
    );
}

#[tokio::test]
async fn test_リフレッシュに失敗したらトークンをクリアして401を返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/transactions/recent"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Refresh token expired" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/transactions/recent", "expired-token"))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_of(response).await,
        json!({
            "success": false,
            "status": 401,
            "message": "認証に失敗しました。再度ログインしてください"
        })
    );
    assert_eq!(ctx.token_store.get(), None);
}

#[tokio::test]
async fn test_リフレッシュエンドポイント自身の401はリフレッシュしない() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "Refresh token expired" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/team/auth/refresh-token")
        .header(header::AUTHORIZATION, "Bearer expired-token")
        .body(Body::empty())
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_of(response).await["message"], json!("Refresh token expired"));
}

// --- ログアウト ---

#[tokio::test]
async fn test_ログアウト後は認証ヘッダーなしで上流を呼ぶ() {
    let ctx = TestContext::new().await;
    Mock::given(method("DELETE"))
        .and(path("/v0/team/auth/revoke-token"))
        .and(header_eq("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/team/auth/forgot-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let logout = Request::builder()
        .method("DELETE")
        .uri("/api/team/auth/revoke-token")
        .header(header::AUTHORIZATION, "Bearer session-token")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(logout).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.token_store.get(), None);

    let response = ctx
        .send(post_json(
            "/api/team/auth/forgot-password",
            json!({ "email": "owner@example.com" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = ctx.upstream.received_requests().await.unwrap();
    let forgot = requests
        .iter()
        .find(|r| r.url.path() == "/v0/team/auth/forgot-password")
        .unwrap();
    assert!(forgot.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_ログアウトが上流で失敗してもトークンはクリアされる() {
    let ctx = TestContext::new().await;
    Mock::given(method("DELETE"))
        .and(path("/v0/team/auth/revoke-token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "success": false, "message": "Token already revoked" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let logout = Request::builder()
        .method("DELETE")
        .uri("/api/team/auth/revoke-token")
        .header(header::AUTHORIZATION, "Bearer session-token")
        .body(Body::empty())
        .unwrap();
    let response = ctx.send(logout).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.token_store.get(), None);
}

// --- エラーエンベロープ ---

#[tokio::test]
async fn test_上流の5xxは固定メッセージで返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/receiving-accounts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": false, "message": "db connection lost" })))
        .expect(1)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/receiving-accounts", "valid-token"))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_of(response).await,
        json!({ "success": false, "status": 500, "message": "内部サーバーエラーが発生しました" })
    );
}

#[tokio::test]
async fn test_上流に接続できなければ503を返す() {
    let app = build_router("http://127.0.0.1:9/v0", AccessTokenStore::default());

    let response = app
        .oneshot(get_with_bearer("/api/team/account/credits", "valid-token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_of(response).await["status"], json!(503));
}

// --- その他 ---

#[tokio::test]
async fn test_未定義ルートは404エンベロープを返す() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(Request::builder().uri("/api/team/unknown").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_of(response).await,
        json!({
            "success": false,
            "status": 404,
            "message": "ルートが見つかりません: /api/team/unknown"
        })
    );
}

#[tokio::test]
async fn test_未対応のメソッドは上流を呼ばずに405エンベロープを返す() {
    let ctx = TestContext::new().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.upstream)
        .await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/team/receiving-accounts")
        .header(header::AUTHORIZATION, "Bearer valid-token")
        .header("2fa", "123456")
        .body(Body::empty())
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body_of(response).await,
        json!({
            "success": false,
            "status": 405,
            "message": "このルートは PATCH に対応していません: /api/team/receiving-accounts"
        })
    );
}

#[tokio::test]
async fn test_2fa必須ルートへのメソッド違いは2faエラーではなく405を返す() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(get_with_bearer("/api/team/account/change-password", "valid-token"))
        .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_of(response).await["status"], json!(405));
}

#[tokio::test]
async fn test_重複したクエリパラメータは400エンベロープを返す() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/v0/team/transactions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.upstream)
        .await;

    let response = ctx
        .send(get_with_bearer("/api/team/transactions?page=1&page=2", "valid-token"))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_of(response).await,
        json!({ "success": false, "status": 400, "message": "クエリパラメータが不正です" })
    );
}

#[tokio::test]
async fn test_ヘルスチェックはcache_controlとセキュリティヘッダー付きで返る() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    for (name, value) in security_headers() {
        assert_eq!(response.headers().get(&name), Some(&value), "{name}");
    }
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "SAMEORIGIN");
    assert_eq!(response.headers()[header::REFERRER_POLICY], "no-referrer");
    assert_eq!(body_of(response).await["status"], json!("ok"));
}
