use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::{AiLlmError, ProviderError};
use api::{AppState, REQUEST_ID_HEADER, app};
use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chat_router::{
    Category, CategoryRouter, ChatConfig, ChatError, ChatPipeline, Completer, CompletionRequest,
    ContextStore, Embedder,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use vector_store::{ContextRow, StoreError};

struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ChatError> {
        Ok(vec![0.1, 0.2, 0.3])
    }
}

struct Reply(&'static str);

#[async_trait]
impl Completer for Reply {
    async fn complete(&self, _req: CompletionRequest<'_>) -> Result<String, ChatError> {
        Ok(self.0.to_string())
    }
}

struct FailingAnswer;

#[async_trait]
impl Completer for FailingAnswer {
    async fn complete(&self, _req: CompletionRequest<'_>) -> Result<String, ChatError> {
        Err(AiLlmError::from(ProviderError::EmptyChoices).into())
    }
}

#[derive(Default)]
struct FakeStore {
    rows: Vec<&'static str>,
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl ContextStore for FakeStore {
    async fn lookup(
        &self,
        category: Category,
        _vector: &[f32],
    ) -> Result<Vec<ContextRow>, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Rpc {
                function: category.rpc_function().to_string(),
                status: 500,
                message: "connection refused by database".into(),
            }
            .into());
        }
        Ok(self.rows.iter().map(|t| ContextRow::from_text(*t)).collect())
    }
}

fn state(router: CategoryRouter, store: Arc<FakeStore>) -> Arc<AppState> {
    let pipeline = ChatPipeline::new(
        Arc::new(FixedEmbedder),
        router,
        Arc::new(Reply("Widget A costs $10 and Widget B costs $15.")),
        store,
        &ChatConfig::default(),
    );
    Arc::new(AppState::new(pipeline))
}

fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn product_question_is_answered_from_products() {
    let store = Arc::new(FakeStore {
        rows: vec!["Widget A $10", "Widget B $15", "Widget C $25"],
        ..FakeStore::default()
    });
    let app = app(state(CategoryRouter::Keyword, store.clone()));

    let res = app
        .oneshot(post_chat(
            r#"{"message":"What products do you have under $20?"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["content"], "Widget A costs $10 and Widget B costs $15.");
    assert_eq!(body["table"], "products");
    assert_eq!(body["contextLength"], 3);
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unrelated_question_gets_apology_without_lookup() {
    let store = Arc::new(FakeStore::default());
    let router = CategoryRouter::Classification {
        classifier: Arc::new(Reply("NONE")),
    };
    let app = app(state(router, store.clone()));

    let res = app
        .oneshot(post_chat(r#"{"message":"What's the weather today?"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(
        body,
        json!({ "content": chat_router::prompt::NO_CATEGORY_MESSAGE })
    );
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_context_returns_fixed_reply() {
    let store = Arc::new(FakeStore::default());
    let app = app(state(CategoryRouter::Keyword, store));

    let res = app
        .oneshot(post_chat(r#"{"message":"Show me invoice 42"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["content"], chat_router::prompt::NO_CONTEXT_MESSAGE);
    assert_eq!(body["table"], "invoices");
    assert_eq!(body["contextLength"], 0);
}

#[tokio::test]
async fn store_failure_maps_to_500_with_message() {
    let store = Arc::new(FakeStore {
        fail: true,
        ..FakeStore::default()
    });
    let app = app(state(CategoryRouter::Keyword, store));

    let res = app
        .oneshot(post_chat(r#"{"message":"Which products are in stock?"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("connection refused by database"), "got: {msg}");
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn answer_model_failure_maps_to_500() {
    let store = Arc::new(FakeStore {
        rows: vec!["Widget A $10"],
        ..FakeStore::default()
    });
    let pipeline = ChatPipeline::new(
        Arc::new(FixedEmbedder),
        CategoryRouter::Keyword,
        Arc::new(FailingAnswer),
        store.clone(),
        &ChatConfig::default(),
    );
    let app = app(Arc::new(AppState::new(pipeline)));

    let res = app
        .oneshot(post_chat(r#"{"message":"Which products are cheap?"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(
        body["error"],
        AiLlmError::from(ProviderError::EmptyChoices).to_string()
    );
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let store = Arc::new(FakeStore::default());
    let app = app(state(CategoryRouter::Keyword, store.clone()));

    let res = app
        .oneshot(post_chat(r#"{"message":"   "}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "EMPTY_MESSAGE");
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app(state(CategoryRouter::Keyword, Arc::new(FakeStore::default())));

    let res = app.oneshot(post_chat(r#"{"msg":1}"#)).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn request_id_is_echoed_or_minted() {
    let app = app(state(CategoryRouter::Keyword, Arc::new(FakeStore::default())));

    let mut req = post_chat(r#"{"message":"Who are our customers?"}"#);
    req.headers_mut()
        .insert(REQUEST_ID_HEADER, "abc-123".parse().unwrap());
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers()[REQUEST_ID_HEADER], "abc-123");

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let minted = res.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(minted.starts_with("req-"));
}

#[tokio::test]
async fn health_reports_strategy() {
    let router = CategoryRouter::Classification {
        classifier: Arc::new(Reply("PRODUCT")),
    };
    let app = app(state(router, Arc::new(FakeStore::default())));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        json!({ "status": "ok", "strategy": "classification" })
    );
}
