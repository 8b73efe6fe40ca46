#![allow(dead_code)]
//! Shared helpers: CLI launcher, temp paths and an in-process mock backend.

use assert_cmd::{Command, cargo_bin_cmd};
use axum::extract::{Path as AxumPath, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";
pub const PASSWORD: &str = "secret";
pub const TAKEN_EMAIL: &str = "taken@uni.edu";

pub fn cli() -> Command {
    cargo_bin_cmd!("campusctl")
}

/// CLI pointed at `url` with a fresh config and session file.
pub fn cli_for(url: &str, name: &str) -> Command {
    cli_with(url, &temp_path(name, "conf"), &temp_path(name, "session.json"))
}

/// CLI pointed at `url` reusing existing config and session paths, so a
/// login survives across invocations.
pub fn cli_with(url: &str, conf: &str, session: &str) -> Command {
    let mut cmd = cli();
    cmd.env("CAMPUSCTL_CONFIG", conf)
        .env_remove("RUST_LOG")
        .args(["--api-url", url, "--session", session]);
    cmd
}

/// Unique path inside the temp dir; any previous file is removed.
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("campusctl_{name}.{ext}"));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

// ---------------------------
// Mock backend
// ---------------------------

#[derive(Default)]
pub struct MockState {
    pub events: Vec<Value>,
    pub next_id: u64,
    /// Bodies received by createevent / updateevent, in order.
    pub writes: Vec<Value>,
    /// Object names received by the storage endpoint, in order.
    pub uploads: Vec<String>,
    pub staff: Vec<Value>,
    pub unauthorized_hits: usize,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub url: String,
    pub state: Shared,
}

impl MockBackend {
    pub fn event_count(&self) -> usize {
        self.state.lock().unwrap().events.len()
    }

    pub fn writes(&self) -> Vec<Value> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.state.lock().unwrap().uploads.clone()
    }
}

fn seed() -> MockState {
    MockState {
        events: vec![
            json!({
                "id": 1,
                "title": "Feria de ciencias",
                "objective": "Mostrar proyectos de investigación",
                "startDate": "15/03/2030 14:00:00",
                "endDate": "15/03/2030 18:00:00",
                "location": "Coliseo",
                "forStudents": true,
                "capacity": 200,
                "requiresRegistration": true,
                "isPublic": true,
                "tags": ["ciencia"],
                "status": "Programado",
                "registrations": [{"id": 1}, {"id": 2}]
            }),
            json!({
                "id": "2",
                "title": "Taller de Rust",
                "objective": "Programación de sistemas",
                "startDate": "2020-05-01T09:00:00-05:00",
                "endDate": "2020-05-01T12:00:00-05:00",
                "isVirtual": true,
                "meetingUrl": "https://meet.example/rust",
                "forTeachers": true,
                "tags": ["programación"]
            }),
        ],
        next_id: 100,
        ..Default::default()
    }
}

fn ok(data: Value) -> Response {
    Json(json!({"isSuccess": true, "message": "ok", "data": data})).into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"message": message}))).into_response()
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    let good = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !good {
        state.lock().unwrap().unauthorized_hits += 1;
    }
    good
}

macro_rules! guard {
    ($state:expr, $headers:expr) => {
        if !authorized(&$state, &$headers) {
            return fail(StatusCode::UNAUTHORIZED, "unauthorized");
        }
    };
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        ok(json!({
            "name": "Ana Admin",
            "role": "admin",
            "profilePicture": null,
            "accessToken": TOKEN,
            "refreshToken": "refresh-token"
        }))
    } else {
        Json(json!({"isSuccess": false, "message": "invalid credentials", "data": null}))
            .into_response()
    }
}

async fn all_events(State(st): State<Shared>, headers: HeaderMap) -> Response {
    guard!(st, headers);
    let events = st.lock().unwrap().events.clone();
    ok(Value::Array(events))
}

fn same_id(event: &Value, id: &Value) -> bool {
    let norm = |v: &Value| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    norm(&event["id"]) == norm(id)
}

async fn event_by_id(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(st, headers);
    let found = st
        .lock()
        .unwrap()
        .events
        .iter()
        .find(|e| same_id(e, &body["id"]))
        .cloned();
    match found {
        Some(e) => ok(e),
        None => fail(StatusCode::NOT_FOUND, "event not found"),
    }
}

async fn create_event(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(st, headers);
    let mut s = st.lock().unwrap();
    s.next_id += 1;
    let id = s.next_id.to_string();
    let mut stored = body.clone();
    stored["id"] = json!(id);
    s.events.push(stored);
    s.writes.push(body);
    ok(json!({ "id": id }))
}

async fn update_event(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(st, headers);
    let mut s = st.lock().unwrap();
    s.writes.push(body.clone());
    match s.events.iter_mut().find(|e| same_id(e, &body["id"])) {
        Some(e) => {
            *e = body;
            ok(Value::Null)
        }
        None => fail(StatusCode::NOT_FOUND, "event not found"),
    }
}

async fn delete_event(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(st, headers);
    let mut s = st.lock().unwrap();
    let before = s.events.len();
    s.events.retain(|e| !same_id(e, &body["id"]));
    if s.events.len() == before {
        fail(StatusCode::NOT_FOUND, "event not found")
    } else {
        ok(Value::Null)
    }
}

async fn attendance(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(st, headers);
    if body["eventId"] == "1" {
        ok(json!([
            {
                "firstName": "Laura",
                "lastName": "Gómez",
                "idNumber": "1020304050",
                "checkIn": "15/03/2030 14:05:00"
            },
            {
                "firstName": "Pedro",
                "lastName": "Núñez",
                "identification": 987654,
                "checkInTime": "2030-03-15T09:20:00-05:00",
                "checkOut": "2030-03-15T11:00:00-05:00"
            }
        ]))
    } else {
        ok(json!([]))
    }
}

async fn register_staff(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    guard!(st, headers);
    if body["email"] == TAKEN_EMAIL {
        return fail(StatusCode::CONFLICT, "email already registered");
    }
    st.lock().unwrap().staff.push(body);
    ok(Value::Null)
}

async fn faculties(State(st): State<Shared>, headers: HeaderMap) -> Response {
    guard!(st, headers);
    ok(json!([
        {"id": 10, "name": "Ingeniería", "description": "Facultad de ingeniería"},
        {"id": 20, "name": "Derecho"}
    ]))
}

async fn careers(State(st): State<Shared>, headers: HeaderMap) -> Response {
    guard!(st, headers);
    // Bare array, no envelope.
    Json(json!([
        {"id": 1, "name": "Sistemas", "facultyId": 10},
        {"id": 2, "name": "Leyes", "facultyId": 20},
        {"id": 3, "name": "Electrónica", "facultyId": "10"}
    ]))
    .into_response()
}

async fn simple_catalog(State(st): State<Shared>, headers: HeaderMap) -> Response {
    guard!(st, headers);
    ok(json!([{"id": 1, "name": "Principal"}]))
}

async fn metrics_summary(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(_filter): Json<Value>,
) -> Response {
    guard!(st, headers);
    ok(json!({
        "totalEvents": 12,
        "totalAttendances": 340,
        "averageAttendance": 28.3,
        "byFaculty": [{"name": "Ingeniería", "count": 7}],
        "byCategory": [{"name": "Académico", "count": 5}]
    }))
}

async fn metrics_by_event(
    State(st): State<Shared>,
    headers: HeaderMap,
    Json(filter): Json<Value>,
) -> Response {
    guard!(st, headers);
    let title = match filter.get("facultyId").and_then(Value::as_str) {
        Some(f) => format!("Feria ({f})"),
        None => "Feria".to_string(),
    };
    ok(json!([{"eventId": 1, "title": title, "registered": 40, "attended": 30}]))
}

async fn upload(
    State(st): State<Shared>,
    AxumPath((_bucket, name)): AxumPath<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if headers.get("apikey").is_none() {
        return fail(StatusCode::UNAUTHORIZED, "missing apikey");
    }
    st.lock().unwrap().uploads.push(name.clone());
    Json(json!({"Key": name})).into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    ok(Value::Null)
}

async fn text() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "pong",
    )
        .into_response()
}

async fn boom() -> Response {
    fail(StatusCode::INTERNAL_SERVER_ERROR, "kaput")
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/user/loginapp", post(login))
        .route("/user/registerstaffmember", post(register_staff))
        .route("/event/getallevents", get(all_events))
        .route("/event/geteventbyid", post(event_by_id))
        .route("/event/createevent", post(create_event))
        .route("/event/updateevent", post(update_event))
        .route("/event/deleteevent", delete(delete_event))
        .route("/attendance/attendancelist", post(attendance))
        .route("/faculty/getallfaculties", get(faculties))
        .route("/career/getallcareers", get(careers))
        .route("/campus/getallcampus", get(simple_catalog))
        .route("/space/getallspaces", get(simple_catalog))
        .route("/eventcategory/getallcategories", get(simple_catalog))
        .route("/eventtype/getalltypes", get(simple_catalog))
        .route("/metrics/summary", post(metrics_summary))
        .route("/metrics/attendancebyevent", post(metrics_by_event))
        .route("/storage/v1/object/:bucket/*name", post(upload))
        .route("/slow", get(slow))
        .route("/text", get(text))
        .route("/boom", get(boom))
        .with_state(state)
}

/// Runs the mock on the current tokio runtime.
pub async fn serve_backend() -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(seed()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockBackend {
        url: format!("http://{addr}"),
        state,
    }
}

/// Runs the mock on its own thread, for synchronous CLI tests.
pub fn spawn_backend() -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(seed()));
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    let app = router(state.clone());

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    let addr = rx.recv().unwrap();
    MockBackend {
        url: format!("http://{addr}"),
        state,
    }
}

/// Address nothing listens on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
