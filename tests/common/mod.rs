//! In-process mock of a deferred-inference provider.
//!
//! Serves `POST /predict` and `GET /status/{job_id}` on an ephemeral port and
//! records how often each endpoint was hit.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fold_relay::ClientConfig;
use serde_json::Value;
use tokio::net::TcpListener;

/// How the provider answers a submission
#[derive(Clone)]
pub enum Submit {
    /// `200` with the given body
    Immediate(Value),
    /// `202` with a fresh job id in `nvcf-reqid`
    Defer,
    /// `202` without a job id
    DeferWithoutId,
    /// A raw status code and body
    Fail(u16, String),
    /// Sleep before answering `200`
    Slow(Duration, Value),
}

/// Final answer of the status endpoint once the pending polls are used up
#[derive(Clone)]
pub struct Completion {
    pub status: u16,
    pub body: String,
}

impl Completion {
    pub fn ok(body: &Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

pub struct MockProvider {
    submit: Submit,
    /// Non-terminal answers before the completion, per job
    pending_polls: usize,
    /// Status code used for non-terminal answers
    pending_status: u16,
    completion: Completion,
    submits: AtomicUsize,
    polls: AtomicUsize,
    next_job: AtomicUsize,
    polls_per_job: Mutex<HashMap<String, usize>>,
    last_submit_headers: Mutex<Option<HeaderMap>>,
    last_payload: Mutex<Option<Value>>,
}

impl MockProvider {
    pub fn new(submit: Submit) -> Self {
        Self {
            submit,
            pending_polls: 0,
            pending_status: 202,
            completion: Completion::status(500, "no completion configured"),
            submits: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
            next_job: AtomicUsize::new(1),
            polls_per_job: Mutex::new(HashMap::new()),
            last_submit_headers: Mutex::new(None),
            last_payload: Mutex::new(None),
        }
    }

    pub fn with_pending(mut self, polls: usize, status: u16) -> Self {
        self.pending_polls = polls;
        self.pending_status = status;
        self
    }

    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn polls_for(&self, job_id: &str) -> usize {
        self.polls_per_job
            .lock()
            .unwrap()
            .get(job_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn last_submit_header(&self, name: &str) -> Option<String> {
        self.last_submit_headers
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|h| h.get(name))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn last_payload(&self) -> Option<Value> {
        self.last_payload.lock().unwrap().clone()
    }
}

fn raw_response(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap();
    (status, [("content-type", "application/json")], body).into_response()
}

async fn submit_handler(
    State(mock): State<Arc<MockProvider>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    mock.submits.fetch_add(1, Ordering::SeqCst);
    *mock.last_submit_headers.lock().unwrap() = Some(headers);
    *mock.last_payload.lock().unwrap() = Some(payload);

    match mock.submit.clone() {
        Submit::Immediate(body) => Json(body).into_response(),
        Submit::Defer => {
            let job = format!("job-{}", mock.next_job.fetch_add(1, Ordering::SeqCst));
            (StatusCode::ACCEPTED, [("nvcf-reqid", job)]).into_response()
        }
        Submit::DeferWithoutId => StatusCode::ACCEPTED.into_response(),
        Submit::Fail(status, body) => raw_response(status, body),
        Submit::Slow(delay, body) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
    }
}

async fn status_handler(
    State(mock): State<Arc<MockProvider>>,
    Path(job_id): Path<String>,
) -> Response {
    mock.polls.fetch_add(1, Ordering::SeqCst);
    let seen = {
        let mut per_job = mock.polls_per_job.lock().unwrap();
        let count = per_job.entry(job_id).or_insert(0);
        *count += 1;
        *count
    };

    if seen <= mock.pending_polls {
        return raw_response(mock.pending_status, r#"{"status":"pending"}"#.to_string());
    }

    raw_response(mock.completion.status, mock.completion.body.clone())
}

/// Start the mock provider and return its base URL
pub async fn spawn_provider(mock: Arc<MockProvider>) -> String {
    let app = Router::new()
        .route("/predict", post(submit_handler))
        .route("/status/{job_id}", get(status_handler))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Client configuration pointing every endpoint at the mock, with fast polling
pub fn test_config(base: &str) -> ClientConfig {
    ClientConfig::new("test-key")
        .with_esmfold_url(format!("{base}/predict"))
        .with_boltz2_url(format!("{base}/predict"))
        .with_status_url(format!("{base}/status"))
        .with_request_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(10))
}

/// A one-residue-per-line PDB with the given fractional scores
pub fn pdb_with_scores(scores: &[f64]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(i, b)| {
            format!(
                "ATOM  {serial:>5}  CA  ALA A{residue:>4}       1.000   2.000   3.000  1.00{b:>6.2}           C\n",
                serial = i + 1,
                residue = i + 1,
            )
        })
        .collect()
}
