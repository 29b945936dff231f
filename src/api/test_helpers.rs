//! Scripted in-memory transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use super::{Reply, Transport};
use crate::error::ClientError;

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    result: Result<Reply, ClientError>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Each route holds a queue of scripted replies. Replies are consumed in
/// order; the last one is sticky and answers every later call.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<(&'static str, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, method: &'static str, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, method: &'static str, path: &str, status: u16, body: &str) {
        self.script(method, path, Duration::ZERO, Ok(reply(path, status, body)));
    }

    pub(crate) fn respond_after(&self, method: &'static str, path: &str, delay: Duration, status: u16, body: Value) {
        self.script(method, path, delay, Ok(reply(path, status, &body.to_string())));
    }

    pub(crate) fn fail(&self, method: &'static str, path: &str, error: &str) {
        self.script(method, path, Duration::ZERO, Err(ClientError::Transport(error.to_owned())));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: &str, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn script(&self, method: &'static str, path: &str, delay: Duration, result: Result<Reply, ClientError>) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(Scripted { delay, result });
    }

    async fn answer(&self, method: &'static str, path: &str, body: Option<&Value>) -> Result<Reply, ClientError> {
        self.calls.lock().unwrap().push(Call { method, path: path.to_owned(), body: body.cloned() });

        let next = {
            let mut routes = self.routes.lock().unwrap();
            routes.get_mut(&(method, path.to_owned())).and_then(|queue| {
                if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
            })
        };

        let Some(scripted) = next else {
            return Err(ClientError::Transport(format!("no route for {method} {path}")));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<Reply, ClientError> {
        self.answer("GET", path, None).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Reply, ClientError> {
        self.answer("POST", path, body).await
    }
}

fn reply(path: &str, status: u16, body: &str) -> Reply {
    Reply { status, body: body.to_owned(), url: format!("http://scarepi.test{path}") }
}
