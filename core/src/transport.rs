//! The seam between request building and network I/O.
//!
//! # Design
//! `Transport::Output` is left to the implementor. A blocking transport
//! yields `Result<HttpResponse, E>`, an async one yields a future, a test
//! double yields whatever it recorded. The API methods return that output
//! untouched, so success and failure both pass through unchanged.

use crate::http::HttpRequest;

/// Something that can execute an [`HttpRequest`].
pub trait Transport {
    type Output;

    fn send(&self, request: HttpRequest) -> Self::Output;
}

impl<F, O> Transport for F
where
    F: Fn(HttpRequest) -> O,
{
    type Output = O;

    fn send(&self, request: HttpRequest) -> O {
        self(request)
    }
}

#[cfg(feature = "blocking")]
pub use self::blocking::{TransportConfig, UreqTransport};

#[cfg(feature = "blocking")]
mod blocking {
    use std::time::Duration;

    use log::{info, warn};

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Connection settings for [`UreqTransport`].
    #[derive(Debug, Clone)]
    pub struct TransportConfig {
        /// Scheme and authority, e.g. `http://127.0.0.1:8080`.
        pub base_url: String,
        /// Upper bound for a whole round-trip. `None` waits forever.
        pub timeout: Option<Duration>,
    }

    impl TransportConfig {
        pub fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: None,
            }
        }

        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }
    }

    /// Blocking transport backed by a `ureq::Agent`.
    ///
    /// Non-2xx statuses come back as `Ok(HttpResponse)` so that the
    /// `parse_*` functions decide what they mean.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        base_url: String,
    }

    impl UreqTransport {
        pub fn new(config: TransportConfig) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(config.timeout)
                .build()
                .new_agent();
            Self {
                agent,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }
        }

        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let url = format!("{}{}", self.base_url, request.url());
            info!("{} {}", request.method, url);

            let result = match (request.method, request.body) {
                (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &request.headers).call(),
                (HttpMethod::Delete, _) => {
                    with_headers(self.agent.delete(&url), &request.headers).call()
                }
                (HttpMethod::Post, Some(body)) => {
                    with_headers(self.agent.post(&url), &request.headers).send(body.as_bytes())
                }
                (HttpMethod::Post, None) => {
                    with_headers(self.agent.post(&url), &request.headers).send_empty()
                }
            };

            let mut response = result.map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|source| TransportError::Body { url: url.clone(), source })?;

            if !(200..300).contains(&status) {
                warn!("{url} answered with HTTP {status}");
            }

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    impl Transport for UreqTransport {
        type Output = Result<HttpResponse, TransportError>;

        fn send(&self, request: HttpRequest) -> Self::Output {
            self.execute(request)
        }
    }

    fn with_headers<B>(
        mut builder: ureq::RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> ureq::RequestBuilder<B> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn config_strips_trailing_slash() {
            let config = TransportConfig::new("http://localhost:3000/");
            assert_eq!(config.base_url, "http://localhost:3000");
            assert!(config.timeout.is_none());
        }

        #[test]
        fn config_with_timeout() {
            let config = TransportConfig::new("http://localhost:3000").with_timeout(Duration::from_secs(5));
            assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        }

        #[test]
        fn unreachable_host_is_a_transport_error() {
            // Nothing listens on the discard port.
            let transport = UreqTransport::new(
                TransportConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2)),
            );
            let request = HttpRequest::new(HttpMethod::Get, "/TTS/monitor/products/count".into());
            let err = transport.send(request).unwrap_err();
            assert!(matches!(err, TransportError::Request { .. }));
        }
    }
}
