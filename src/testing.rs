use crate::api_client::{ApiRequest, Method, RawResponse, Transport, TransportError};
use crate::notify::{Message, Notifier};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    replies: HashMap<(Method, String), (u16, String)>,
    offline: bool,
    requests: Vec<ApiRequest>,
}

/// Answers requests from a fixed table and records every request it sees.
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.set_reply(method, path, status, body);
        self
    }

    pub fn set_reply(&self, method: Method, path: &str, status: u16, body: &str) {
        self.script
            .lock()
            .unwrap()
            .replies
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    pub fn offline(self) -> Self {
        self.script.lock().unwrap().offline = true;
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| format!("{:?} {}", request.method, request.path))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.script.lock().unwrap().requests.clear();
    }

    fn respond(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        let key = (request.method, request.path.clone());
        script.requests.push(request);
        if script.offline {
            return Err(TransportError("connection refused".into()));
        }
        let (status, body) = script
            .replies
            .get(&key)
            .cloned()
            .unwrap_or((404, r#"{"error": "no scripted reply"}"#.to_string()));
        Ok(RawResponse { status, body })
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let result = self.respond(request);
        async move { result }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Message>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: Message) {
        self.messages.lock().unwrap().push(message);
    }
}
