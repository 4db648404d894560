//! Background task control.

use log::debug;

use crate::client::parse_data;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::TriggerAck;

/// Starts a product verification run on the backend.
pub const TRIGGER_PATH: &str = "/TTS/monitor/task/trigger";

pub fn build_trigger_check() -> HttpRequest {
    debug!("built verification trigger request");
    HttpRequest::new(HttpMethod::Post, TRIGGER_PATH.to_string())
}

/// The backend acknowledges immediately; the run itself is asynchronous.
pub fn parse_trigger_check(response: &HttpResponse) -> Result<TriggerAck, ApiError> {
    parse_data(response)
}

/// Task endpoints bound to a borrowed transport.
#[derive(Debug)]
pub struct TaskApi<'a, T> {
    transport: &'a T,
}

impl<'a, T> Clone for TaskApi<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for TaskApi<'a, T> {}

impl<'a, T: Transport> TaskApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub fn trigger_check(&self) -> T::Output {
        self.transport.send(build_trigger_check())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_trigger_check_produces_correct_request() {
        let req = build_trigger_check();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/TTS/monitor/task/trigger");
        assert!(req.query.is_empty());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn trigger_check_hands_request_to_transport() {
        let transport = |req: HttpRequest| req;
        let sent = TaskApi::new(&transport).trigger_check();
        assert_eq!(sent, build_trigger_check());
    }

    #[test]
    fn parse_trigger_check_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"code":200,"message":"submitted","data":{"status":"started","message":"check running"}}"#
                .to_string(),
        };
        let ack = parse_trigger_check(&response).unwrap();
        assert_eq!(ack.status, "started");
    }

    #[test]
    fn parse_trigger_check_server_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "boom".to_string(),
        };
        let err = parse_trigger_check(&response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }
}
