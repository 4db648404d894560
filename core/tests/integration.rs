//! Full monitoring lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP through `UreqTransport`. Validates that request
//! building, the transport and response parsing agree with the server.

use std::time::Duration;

use monitor_core::products::{
    parse_add_products, parse_confirm_invalid, parse_delete_product, parse_get_count,
    parse_get_list,
};
use monitor_core::tasks::parse_trigger_check;
use monitor_core::{
    ApiError, ConfirmStatus, MonitorClient, ProductQuery, TransportConfig, UreqTransport, Validity,
};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str) -> MonitorClient<UreqTransport> {
    let config = TransportConfig::new(base_url).with_timeout(Duration::from_secs(10));
    MonitorClient::new(UreqTransport::new(config))
}

#[test]
fn monitoring_lifecycle() {
    let client = client(&start_server());
    let products = client.products();
    let tasks = client.tasks();

    // Step 1: nothing monitored yet.
    let count = parse_get_count(&products.get_count().unwrap()).unwrap();
    assert_eq!(count, 0);

    // Step 2: add products, with a duplicate.
    let ids = vec!["1729".to_string(), "dead-42".to_string(), "1729".to_string()];
    let added = parse_add_products(&products.add_products(&ids).unwrap()).unwrap();
    assert_eq!(added, 2);

    // Step 3: an empty list is passed through and rejected by the backend.
    let err = parse_add_products(&products.add_products(&[]).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::Backend { code: 500, .. }));

    // Step 4: run verification.
    let ack = parse_trigger_check(&tasks.trigger_check().unwrap()).unwrap();
    assert_eq!(ack.status, "started");

    // Step 5: list invalid, unconfirmed products.
    let query = ProductQuery {
        page: Some(1),
        size: Some(20),
        is_valid: Some(Validity::Invalid),
        confirm_status: Some(ConfirmStatus::Pending),
        ..Default::default()
    };
    let page = parse_get_list(&products.get_list(&query).unwrap()).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].product_id, "dead-42");
    assert_eq!(page.records[0].is_valid, Some(Validity::Invalid));

    // Step 6: unconfirmed invalid products cannot be deleted.
    let err = parse_delete_product(&products.delete_product("dead-42").unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::Backend { .. }));

    // Step 7: confirm, then delete.
    parse_confirm_invalid(&products.confirm_invalid("dead-42").unwrap()).unwrap();
    parse_delete_product(&products.delete_product("dead-42").unwrap()).unwrap();

    // Step 8: deleting again reports the missing product.
    let err = parse_delete_product(&products.delete_product("dead-42").unwrap()).unwrap_err();
    match err {
        ApiError::Backend { message, .. } => assert_eq!(message, "product not found"),
        other => panic!("unexpected error: {other:?}"),
    }

    // Step 9: keyword search finds the survivor.
    let query = ProductQuery {
        keyword: Some("72".to_string()),
        ..Default::default()
    };
    let page = parse_get_list(&products.get_list(&query).unwrap()).unwrap();
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].product_id, "1729");

    // Step 10: one product left.
    let count = parse_get_count(&products.get_count().unwrap()).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn identifiers_with_reserved_characters_round_trip() {
    let client = client(&start_server());
    let products = client.products();

    let ids = vec!["shop/1 2?x".to_string()];
    assert_eq!(parse_add_products(&products.add_products(&ids).unwrap()).unwrap(), 1);

    let query = ProductQuery {
        keyword: Some("1 2?".to_string()),
        ..Default::default()
    };
    let page = parse_get_list(&products.get_list(&query).unwrap()).unwrap();
    assert_eq!(page.total, 1);

    parse_delete_product(&products.delete_product("shop/1 2?x").unwrap()).unwrap();
    assert_eq!(parse_get_count(&products.get_count().unwrap()).unwrap(), 0);
}

#[test]
fn unknown_route_is_not_found() {
    let base = start_server();
    let transport = UreqTransport::new(TransportConfig::new(&base));
    let client = MonitorClient::new(move |mut req: monitor_core::HttpRequest| {
        req.path = format!("/nope{}", req.path);
        monitor_core::Transport::send(&transport, req)
    });

    let err = parse_get_count(&client.products().get_count().unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}
