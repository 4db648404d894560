//! Product monitoring endpoints under `/TTS/monitor/products`.
//!
//! Each endpoint has a pure `build_*` function producing the request, a
//! `parse_*` function consuming the response, and a [`ProductApi`] method
//! that builds the request and hands it to the transport.

use log::debug;

use crate::client::{parse_ack, parse_data};
use crate::encoding;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{MonitoredProduct, PageResult, ProductQuery};

/// Collection path for monitored products.
pub const BASE_PATH: &str = "/TTS/monitor/products";

fn item_path(product_id: &str) -> String {
    format!("{BASE_PATH}/{}", encoding::path_segment(product_id))
}

pub fn build_get_list(query: &ProductQuery) -> HttpRequest {
    let req = HttpRequest::new(HttpMethod::Get, BASE_PATH.to_string()).with_query(query.to_params());
    debug!("built product list request: {}", req.url());
    req
}

pub fn build_add_products(product_ids: &[String]) -> HttpRequest {
    let body = serde_json::json!({ "productIds": product_ids });
    debug!("built add request for {} product ids", product_ids.len());
    HttpRequest::new(HttpMethod::Post, format!("{BASE_PATH}/add")).with_json_body(body.to_string())
}

pub fn build_delete_product(product_id: &str) -> HttpRequest {
    debug!("built delete request for {product_id}");
    HttpRequest::new(HttpMethod::Delete, item_path(product_id))
}

pub fn build_confirm_invalid(product_id: &str) -> HttpRequest {
    debug!("built confirm request for {product_id}");
    HttpRequest::new(HttpMethod::Post, format!("{}/confirm", item_path(product_id)))
}

pub fn build_get_count() -> HttpRequest {
    debug!("built product count request");
    HttpRequest::new(HttpMethod::Get, format!("{BASE_PATH}/count"))
}

pub fn parse_get_list(response: &HttpResponse) -> Result<PageResult<MonitoredProduct>, ApiError> {
    parse_data(response)
}

/// Number of products the backend actually started monitoring.
pub fn parse_add_products(response: &HttpResponse) -> Result<u32, ApiError> {
    parse_data(response)
}

pub fn parse_delete_product(response: &HttpResponse) -> Result<(), ApiError> {
    parse_ack(response)
}

pub fn parse_confirm_invalid(response: &HttpResponse) -> Result<(), ApiError> {
    parse_ack(response)
}

pub fn parse_get_count(response: &HttpResponse) -> Result<u64, ApiError> {
    parse_data(response)
}

/// Product endpoints bound to a borrowed transport.
///
/// Every method returns the transport's output as-is.
#[derive(Debug)]
pub struct ProductApi<'a, T> {
    transport: &'a T,
}

impl<'a, T> Clone for ProductApi<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ProductApi<'a, T> {}

impl<'a, T: Transport> ProductApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub fn get_list(&self, query: &ProductQuery) -> T::Output {
        self.transport.send(build_get_list(query))
    }

    pub fn add_products(&self, product_ids: &[String]) -> T::Output {
        self.transport.send(build_add_products(product_ids))
    }

    pub fn delete_product(&self, product_id: &str) -> T::Output {
        self.transport.send(build_delete_product(product_id))
    }

    pub fn confirm_invalid(&self, product_id: &str) -> T::Output {
        self.transport.send(build_confirm_invalid(product_id))
    }

    pub fn get_count(&self) -> T::Output {
        self.transport.send(build_get_count())
    }
}
