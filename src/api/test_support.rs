use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::{ApiReply, MonitoringApi};
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(ApiReply),
    Unreachable,
}

/// In-memory stand-in for the API: canned replies per route, every call recorded.
#[derive(Debug, Default)]
pub(crate) struct ScriptedApi {
    routes: HashMap<(Method, String), Scripted>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_get(self, path: &str, status: u16, body: &Value) -> Self {
        self.on(Method::GET, path, status, body)
    }

    pub(crate) fn on_post(self, path: &str, status: u16, body: &Value) -> Self {
        self.on(Method::POST, path, status, body)
    }

    pub(crate) fn on_get_raw(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (Method::GET, path.to_owned()),
            Scripted::Reply(ApiReply::new(to_status(status), body)),
        );
        self
    }

    /// Makes GET `path` fail before any response is received.
    pub(crate) fn unreachable_get(mut self, path: &str) -> Self {
        self.routes
            .insert((Method::GET, path.to_owned()), Scripted::Unreachable);
        self
    }

    fn on(mut self, method: Method, path: &str, status: u16, body: &Value) -> Self {
        self.routes.insert(
            (method, path.to_owned()),
            Scripted::Reply(ApiReply::new(to_status(status), body.to_string())),
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    pub(crate) fn count(&self, method: &Method, path: &str) -> usize {
        self.lock_calls()
            .iter()
            .filter(|call| call.method == *method && call.path == path)
            .count()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn respond(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiReply, ApiError> {
        self.lock_calls().push(RecordedCall {
            method: method.clone(),
            path: path.to_owned(),
            body: body.cloned(),
        });
        match self.routes.get(&(method, path.to_owned())) {
            Some(Scripted::Reply(reply)) => Ok(reply.clone()),
            Some(Scripted::Unreachable) => Err(ApiError::JoinUrlFailed {
                base: "http://unreachable.invalid".to_owned(),
                path: path.to_owned(),
                source: url::ParseError::EmptyHost,
            }),
            None => Ok(ApiReply::new(StatusCode::NOT_FOUND, "not scripted")),
        }
    }
}

fn to_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[async_trait]
impl MonitoringApi for ScriptedApi {
    async fn get(&self, path: &str) -> Result<ApiReply, ApiError> {
        self.respond(Method::GET, path, None)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiReply, ApiError> {
        self.respond(Method::POST, path, Some(body))
    }
}
