//! Shared test harness: a stub HTTP API for exercising the real gateway
//! client, and a recorded in-memory gateway for driving screen controllers.
#![allow(dead_code)] // each test binary uses its own slice of this

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use leximon_admin::api::{ApiError, ApiGateway, ApiResult, FormPayload, Page, Reply};

// ---- JWT fabrication ----

pub fn staff_token(email: &str) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "email": email,
            "role": "Admin",
        }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

// ---- Stub HTTP API (drives the real ApiClient over a socket) ----

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<(String, String), (u16, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct StubApi {
    addr: SocketAddr,
    state: Arc<StubState>,
}

async fn stub_handler(State(state): State<Arc<StubState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: parts.uri.query().unwrap_or("").to_string(),
        content_type: header("content-type"),
        authorization: header("authorization"),
        body: bytes.to_vec(),
    });

    let canned = state.routes.lock().unwrap().get(&(method, path)).cloned();
    match canned {
        Some((status, value)) => {
            (StatusCode::from_u16(status).unwrap(), Json(value)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "no stub" }))).into_response(),
    }
}

impl StubApi {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = axum::Router::new()
            .fallback(stub_handler)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Register the canned response for `(method, path)`.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

// ---- Recorded fake gateway (drives controllers without any I/O) ----

#[derive(Debug, Clone)]
pub struct GatewayCall {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub form: Option<FormPayload>,
}

/// What the fake should answer next. Replies are consumed in FIFO order, one
/// per gateway call.
#[derive(Debug, Clone)]
pub enum Canned {
    Ok {
        message: Option<String>,
        data: Option<Value>,
        confirmed: bool,
    },
    Page {
        items: Vec<Value>,
        total_pages: u32,
        total_count: i64,
    },
    Fail {
        status: u16,
        message: String,
    },
}

pub fn ok_with(data: Value) -> Canned {
    Canned::Ok {
        message: None,
        data: Some(data),
        confirmed: true,
    }
}

pub fn ok_confirmed() -> Canned {
    Canned::Ok {
        message: None,
        data: None,
        confirmed: true,
    }
}

/// A 2xx body without the `succeeded` flag: the ambiguous-delete shape.
pub fn ok_ambiguous() -> Canned {
    Canned::Ok {
        message: None,
        data: None,
        confirmed: false,
    }
}

pub fn page_of(items: Vec<Value>, total_pages: u32, total_count: i64) -> Canned {
    Canned::Page {
        items,
        total_pages,
        total_count,
    }
}

pub fn fail(status: u16, message: &str) -> Canned {
    Canned::Fail {
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
pub struct FakeGateway {
    replies: Mutex<VecDeque<Canned>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, canned: Canned) {
        self.replies.lock().unwrap().push_back(canned);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, path: &str) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        form: Option<FormPayload>,
    ) {
        self.calls.lock().unwrap().push(GatewayCall {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body,
            form,
        });
    }

    fn next(&self) -> Canned {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeGateway: no canned reply queued for this call")
    }

    fn next_reply<T: DeserializeOwned>(&self) -> ApiResult<Reply<T>> {
        match self.next() {
            Canned::Ok {
                message,
                data,
                confirmed,
            } => Ok(Reply {
                status: 200,
                message,
                data: data.map(|v| serde_json::from_value(v).expect("canned data shape")),
                confirmed,
            }),
            Canned::Fail { status, message } => Err(ApiError::rejected(status, message)),
            Canned::Page { .. } => panic!("FakeGateway: queued a page for a non-page call"),
        }
    }

    fn next_page<T: DeserializeOwned>(&self, requested: &[(&str, String)]) -> ApiResult<Page<T>> {
        let page_number = requested
            .iter()
            .find(|(k, _)| *k == "Page")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(1);

        match self.next() {
            Canned::Page {
                items,
                total_pages,
                total_count,
            } => Ok(Page {
                page_size: items.len() as u32,
                items: items
                    .into_iter()
                    .map(|v| serde_json::from_value(v).expect("canned item shape"))
                    .collect(),
                page_number,
                total_pages,
                total_count,
                has_previous_page: page_number > 1,
                has_next_page: page_number < total_pages,
            }),
            Canned::Fail { status, message } => Err(ApiError::rejected(status, message)),
            Canned::Ok { .. } => panic!("FakeGateway: queued a reply for a page call"),
        }
    }
}

#[async_trait]
impl ApiGateway for FakeGateway {
    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Reply<T>> {
        self.record("GET", path, query, None, None);
        self.next_reply()
    }

    async fn fetch_page<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Page<T>> {
        self.record("GET", path, query, None, None);
        self.next_page(query)
    }

    async fn create<B: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Reply<T>> {
        let body = serde_json::to_value(body).expect("serializable body");
        self.record("POST", path, &[], Some(body), None);
        self.next_reply()
    }

    async fn replace<B: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Reply<T>> {
        let body = serde_json::to_value(body).expect("serializable body");
        self.record("PUT", path, &[], Some(body), None);
        self.next_reply()
    }

    async fn remove(&self, path: &str) -> ApiResult<Reply<Value>> {
        self.record("DELETE", path, &[], None, None);
        self.next_reply()
    }

    async fn create_form(&self, path: &str, form: FormPayload) -> ApiResult<Reply<Value>> {
        self.record("POST", path, &[], None, Some(form));
        self.next_reply()
    }

    async fn replace_form(&self, path: &str, form: FormPayload) -> ApiResult<Reply<Value>> {
        self.record("PUT", path, &[], None, Some(form));
        self.next_reply()
    }
}

// ---- Canned entity JSON ----

pub fn course_json(id: &str, title: &str) -> Value {
    json!({
        "courseId": id,
        "title": title,
        "description": "Mô tả đủ dài cho khóa học",
        "imageUrl": "",
        "price": 0.0,
        "coin": 0.0,
        "isActive": true,
        "courseLanguageId": "lang-en",
    })
}

pub fn lesson_json(id: &str, title: &str, course_id: &str) -> Value {
    json!({
        "lessonId": id,
        "title": title,
        "description": "Mô tả bài học đủ dài",
        "courseId": course_id,
        "isActive": true,
    })
}

pub fn question_json(id: &str, content: &str, lesson_id: &str) -> Value {
    json!({
        "questionId": id,
        "content": content,
        "lessonId": lesson_id,
        "isActive": true,
        "answers": [
            { "answerId": format!("{id}-a1"), "content": "A", "isCorrect": true },
            { "answerId": format!("{id}-a2"), "content": "B", "isCorrect": false },
        ],
    })
}

pub fn category_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "isActive": true })
}
