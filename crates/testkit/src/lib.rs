//! In-process fake of the CMS REST API.
//!
//! Serves `/{collection}` and `/{collection}/{id}` for the six collections
//! from memory, bound to an ephemeral port on 127.0.0.1. Every request is
//! recorded so tests can assert on headers and query strings.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

pub const COLLECTIONS: [&str; 6] = ["users", "roles", "contents", "categories", "tags", "media"];

pub const DUPLICATE_EMAIL_DETAIL: &str = "Email already registered";

/// One request as the fake server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failures: HashMap<String, (StatusCode, Value)>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.collections.get("users").is_some_and(|users| {
            users.iter().any(|(id, user)| {
                Some(*id) != except && user.get("email").and_then(Value::as_str) == Some(email)
            })
        })
    }

    fn insert(&mut self, collection: &str, mut fields: serde_json::Map<String, Value>) -> Value {
        self.next_id += 1;
        let id = self.next_id;
        fields.insert("id".to_string(), json!(id));
        let record = Value::Object(fields);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, record.clone());
        record
    }
}

#[derive(Default)]
struct FakeState {
    inner: Mutex<Inner>,
}

impl FakeState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Running fake API. The server stops when this is dropped.
pub struct FakeCmsApi {
    base_url: String,
    state: Arc<FakeState>,
    server: JoinHandle<()>,
}

impl FakeCmsApi {
    pub async fn spawn() -> std::io::Result<Self> {
        let state = Arc::new(FakeState::default());
        let app = router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let server = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "fake CMS API stopped");
            }
        });

        Ok(Self {
            base_url,
            state,
            server,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Insert a record directly, bypassing HTTP. Returns its id.
    pub fn seed(&self, collection: &str, record: Value) -> i64 {
        let fields = match record {
            Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        let stored = self.state.lock().insert(collection, fields);
        stored["id"].as_i64().unwrap_or_default()
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .collections
            .get(collection)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Answer the next request to `collection` with `status` and `body`.
    pub fn fail_next(&self, collection: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state
            .lock()
            .failures
            .insert(collection.to_string(), (status, body));
    }
}

impl Drop for FakeCmsApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn router(state: Arc<FakeState>) -> Router {
    Router::new()
        .route("/{collection}", get(list).post(create))
        .route("/{collection}/{id}", get(fetch).put(update).delete(remove))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Not found")
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn record(State(api): State<Arc<FakeState>>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let collection = path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let failure = {
        let mut inner = api.lock();
        inner.requests.push(RecordedRequest {
            method: request.method().to_string(),
            path,
            query: request.uri().query().map(str::to_owned),
            authorization: header(&request, "authorization"),
            request_id: header(&request, "x-request-id"),
        });
        inner.failures.remove(&collection)
    };

    match failure {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => next.run(request).await,
    }
}

#[derive(Debug, Deserialize)]
struct Window {
    skip: Option<usize>,
    limit: Option<usize>,
}

async fn list(
    State(api): State<Arc<FakeState>>,
    Path(collection): Path<String>,
    Query(window): Query<Window>,
) -> Response {
    if !COLLECTIONS.contains(&collection.as_str()) {
        return not_found();
    }
    let inner = api.lock();
    let items: Vec<Value> = inner
        .collections
        .get(&collection)
        .map(|items| {
            items
                .values()
                .skip(window.skip.unwrap_or(0))
                .take(window.limit.unwrap_or(usize::MAX))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(items).into_response()
}

async fn create(
    State(api): State<Arc<FakeState>>,
    Path(collection): Path<String>,
    request: Request,
) -> Response {
    if !COLLECTIONS.contains(&collection.as_str()) {
        return not_found();
    }

    let is_multipart = header(&request, CONTENT_TYPE.as_str())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let body = if is_multipart {
        let mut multipart = match Multipart::from_request(request, &()).await {
            Ok(multipart) => multipart,
            Err(rejection) => return rejection.into_response(),
        };
        match read_upload(&mut multipart).await {
            Ok(body) => body,
            Err(response) => return response,
        }
    } else {
        match Json::<Value>::from_request(request, &()).await {
            Ok(Json(body)) => body,
            Err(rejection) => return rejection.into_response(),
        }
    };

    let Value::Object(mut fields) = body else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "expected a JSON object");
    };

    let mut inner = api.lock();
    if collection == "users" {
        fields.remove("password");
        let email = fields.get("email").and_then(Value::as_str).unwrap_or_default();
        if inner.email_taken(email, None) {
            return detail(StatusCode::BAD_REQUEST, DUPLICATE_EMAIL_DETAIL);
        }
    }
    let created = inner.insert(&collection, fields);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn read_upload(multipart: &mut Multipart) -> Result<Value, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| err.into_response())?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(|err| err.into_response())?;
        return Ok(json!({
            "filename": filename,
            "url": format!("/uploads/{}", filename),
            "mime_type": mime_type,
            "size": bytes.len(),
        }));
    }
    Err(detail(StatusCode::BAD_REQUEST, "file field is required"))
}

async fn fetch(
    State(api): State<Arc<FakeState>>,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    let inner = api.lock();
    match inner.collections.get(&collection).and_then(|items| items.get(&id)) {
        Some(item) => Json(item.clone()).into_response(),
        None => not_found(),
    }
}

async fn update(
    State(api): State<Arc<FakeState>>,
    Path((collection, id)): Path<(String, i64)>,
    Json(changes): Json<Value>,
) -> Response {
    let Value::Object(changes) = changes else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "expected a JSON object");
    };

    let mut inner = api.lock();
    if collection == "users" {
        if let Some(email) = changes.get("email").and_then(Value::as_str) {
            if inner.email_taken(email, Some(id)) {
                return detail(StatusCode::BAD_REQUEST, DUPLICATE_EMAIL_DETAIL);
            }
        }
    }

    let Some(Value::Object(existing)) = inner
        .collections
        .get_mut(&collection)
        .and_then(|items| items.get_mut(&id))
    else {
        return not_found();
    };
    for (key, value) in changes {
        if key != "id" && key != "password" {
            existing.insert(key, value);
        }
    }
    Json(Value::Object(existing.clone())).into_response()
}

async fn remove(
    State(api): State<Arc<FakeState>>,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    let mut inner = api.lock();
    match inner
        .collections
        .get_mut(&collection)
        .and_then(|items| items.remove(&id))
    {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
