//! Request-building client for the product-monitoring backend.
//!
//! # Overview
//! Builds `HttpRequest` values for the product and task endpoints and hands
//! them to a caller-supplied [`Transport`]. Whatever the transport returns
//! is handed back untouched. Optional `parse_*` functions decode the
//! backend's `{code, message, data}` envelope.
//!
//! # Design
//! - `MonitorClient` is stateless apart from the transport it owns.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - The `blocking` feature adds `UreqTransport`.
//!
//! ```
//! use monitor_core::{HttpRequest, MonitorClient, ProductQuery};
//!
//! let client = MonitorClient::new(|req: HttpRequest| req.url());
//! let url = client.products().get_list(&ProductQuery {
//!     page: Some(1),
//!     size: Some(20),
//!     ..Default::default()
//! });
//! assert_eq!(url, "/TTS/monitor/products?page=1&size=20");
//! ```

pub mod client;
pub mod encoding;
pub mod error;
pub mod http;
pub mod products;
pub mod tasks;
pub mod transport;
pub mod types;

pub use client::MonitorClient;
pub use error::ApiError;
#[cfg(feature = "blocking")]
pub use error::TransportError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use products::ProductApi;
pub use tasks::TaskApi;
pub use transport::Transport;
#[cfg(feature = "blocking")]
pub use transport::{TransportConfig, UreqTransport};
pub use types::{ApiResult, ConfirmStatus, MonitoredProduct, PageResult, ProductQuery, TriggerAck, Validity};
