#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use traffic_forecast::db::{FullRepository, LocalRepository};
use traffic_forecast::http::{create_router, AppState};
use traffic_forecast::inference::{Classifier, InferenceContext, InferenceError};
use traffic_forecast::services::{FeatureVectorBuilder, LocationResolver, PredictionService};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Classifier that always answers the same class and keeps the last row it saw.
pub struct FixedClassifier {
    class: usize,
    last_row: Arc<Mutex<Option<Vec<f64>>>>,
}

impl FixedClassifier {
    pub fn new(class: usize) -> Self {
        Self {
            class,
            last_row: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_row(&self) -> Arc<Mutex<Option<Vec<f64>>>> {
        Arc::clone(&self.last_row)
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, features: &[f64]) -> Result<usize, InferenceError> {
        *self.last_row.lock().unwrap() = Some(features.to_vec());
        Ok(self.class)
    }

    fn n_features(&self) -> usize {
        9
    }

    fn model_type(&self) -> &str {
        "FixedClassifier"
    }
}

/// Classifier whose every call fails.
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _features: &[f64]) -> Result<usize, InferenceError> {
        Err(InferenceError::EmptyModel)
    }

    fn n_features(&self) -> usize {
        9
    }

    fn model_type(&self) -> &str {
        "FailingClassifier"
    }
}

/// Router over an offline resolver and a fresh in-memory repository.
pub fn test_app(classifier: Option<Box<dyn Classifier>>) -> Router {
    let inference = classifier.map(|c| Arc::new(InferenceContext::new(c).unwrap()));
    let prediction =
        PredictionService::new(FeatureVectorBuilder::new(LocationResolver::offline()), inference);
    let repository = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
    create_router(AppState::new(prediction, repository))
}

/// Send one request and decode the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
