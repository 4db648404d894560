//! Entry point tying the two API namespaces to one transport.
//!
//! # Design
//! `MonitorClient` owns a transport and carries no other state. The
//! `products()` and `tasks()` views borrow it, so one transport serves both
//! namespaces without cloning.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::products::ProductApi;
use crate::tasks::TaskApi;
use crate::transport::Transport;
use crate::types::ApiResult;

/// Envelope code the backend uses for success.
pub const SUCCESS_CODE: i32 = 200;

/// Stateless client for the product-monitoring backend.
#[derive(Debug, Clone)]
pub struct MonitorClient<T> {
    transport: T,
}

impl<T: Transport> MonitorClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn products(&self) -> ProductApi<'_, T> {
        ProductApi::new(&self.transport)
    }

    pub fn tasks(&self) -> TaskApi<'_, T> {
        TaskApi::new(&self.transport)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status, decode the envelope and reject non-200 codes.
fn open_envelope<D: DeserializeOwned>(response: &HttpResponse) -> Result<Option<D>, ApiError> {
    check_status(response)?;
    let envelope: ApiResult<D> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if envelope.code != SUCCESS_CODE {
        return Err(ApiError::Backend {
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(envelope.data)
}

/// Unwrap an envelope whose `data` must be present.
pub(crate) fn parse_data<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    open_envelope(response)?.ok_or(ApiError::MissingData)
}

/// Unwrap an envelope whose `data` is ignored.
pub(crate) fn parse_ack(response: &HttpResponse) -> Result<(), ApiError> {
    open_envelope::<serde_json::Value>(response).map(|_| ())
}
