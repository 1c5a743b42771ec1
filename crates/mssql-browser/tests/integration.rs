//! Integration tests for mssql-browser.
//!
//! These tests run the full query path against a mock Browser service on
//! localhost, so they are fast and deterministic and need no SQL Server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use mssql_browser::{
    BrowserClient, BrowserConfig, BrowserRequest, Error, InstanceRecord, QueryExchange, QueryState,
};
use mssql_browser_testing::{MockBrowserServer, encode_reply};

fn record(pairs: &[(&str, &str)]) -> InstanceRecord {
    let mut record = InstanceRecord::new();
    for (key, value) in pairs {
        record.insert(*key, *value);
    }
    record
}

fn client_for(server: &MockBrowserServer) -> BrowserClient {
    let config = BrowserConfig::new("127.0.0.1")
        .port(server.addr().port())
        .timeout(Duration::from_secs(2));
    BrowserClient::new(config)
}

fn sqlexpress() -> InstanceRecord {
    record(&[
        ("ServerName", "HOST1"),
        ("InstanceName", "SQLEXPRESS"),
        ("IsClustered", "No"),
        ("Version", "15.0.2000.5"),
        ("tcp", "1433"),
    ])
}

fn payroll() -> InstanceRecord {
    record(&[
        ("ServerName", "HOST1"),
        ("InstanceName", "PAYROLL"),
        ("IsClustered", "No"),
        ("Version", "15.0.2000.5"),
        ("tcp", "50123"),
        ("np", r"\\HOST1\pipe\MSSQL$PAYROLL\sql\query"),
    ])
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[tokio::test]
async fn test_query_all_round_trip() {
    let server = MockBrowserServer::builder()
        .with_all_instances_reply(&[sqlexpress(), payroll()])
        .build()
        .await
        .unwrap();

    let records = client_for(&server).query_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].instance_name(), Some("SQLEXPRESS"));
    assert_eq!(records[1].instance_name(), Some("PAYROLL"));
    assert_eq!(records[1].tcp_port(), Some(50123));

    // attribute order within a record follows the server's emission order
    let keys: Vec<&str> = records[0].iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        ["ServerName", "InstanceName", "IsClustered", "Version", "tcp"]
    );
}

#[tokio::test]
async fn test_all_instances_request_is_single_byte() {
    let server = MockBrowserServer::builder()
        .with_all_instances_reply(&[sqlexpress()])
        .build()
        .await
        .unwrap();

    client_for(&server).query_all().await.unwrap();

    let request = server.last_request().await.unwrap();
    assert_eq!(request.as_ref(), &[0x03]);
}

#[tokio::test]
async fn test_instance_request_bytes() {
    let server = MockBrowserServer::builder()
        .with_instance_reply("SQLEXPRESS", &[sqlexpress()])
        .build()
        .await
        .unwrap();

    let records = client_for(&server).query_instance("SQLEXPRESS").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].server_name(), Some("HOST1"));

    let request = server.last_request().await.unwrap();
    assert_eq!(request.as_ref(), b"\x04SQLEXPRESS\x00");
}

#[tokio::test]
async fn test_empty_reply_body_is_zero_records() {
    let server = MockBrowserServer::builder()
        .with_raw_reply(encode_reply(&[]))
        .build()
        .await
        .unwrap();

    let records = client_for(&server).query_all().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_reply_truncated_at_buffer_size() {
    let server = MockBrowserServer::builder()
        .with_all_instances_reply(&[record(&[("ServerName", "HOST1")]), payroll()])
        .build()
        .await
        .unwrap();

    // header + first segment with its ";;" terminator; the second instance
    // falls past the buffer and is silently dropped
    let config = BrowserConfig::new("127.0.0.1")
        .port(server.addr().port())
        .buffer_size(3 + "ServerName;HOST1;;".len())
        .timeout(Duration::from_secs(2));

    let records = BrowserClient::new(config).query_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].server_name(), Some("HOST1"));
}

// =============================================================================
// Failure Path Tests
// =============================================================================

#[tokio::test]
async fn test_silent_server_times_out() {
    let server = MockBrowserServer::builder().silent().build().await.unwrap();

    let config = BrowserConfig::new("127.0.0.1")
        .port(server.addr().port())
        .timeout(Duration::from_millis(50));

    let err = BrowserClient::new(config).query_all().await.unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unknown_instance_times_out() {
    let server = MockBrowserServer::builder()
        .with_instance_reply("SQLEXPRESS", &[sqlexpress()])
        .build()
        .await
        .unwrap();

    let config = BrowserConfig::new("127.0.0.1")
        .port(server.addr().port())
        .timeout(Duration::from_millis(50));

    let err = BrowserClient::new(config)
        .query_instance("MISSING")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
}

#[tokio::test]
async fn test_sockets_released_after_timeouts() {
    let silent = MockBrowserServer::builder().silent().build().await.unwrap();

    let config = BrowserConfig::new("127.0.0.1")
        .port(silent.addr().port())
        .timeout(Duration::from_millis(20));
    let client = BrowserClient::new(config);

    // each failed exchange must release its socket; dozens of binds in a row
    // would otherwise exhaust descriptors or ephemeral ports
    for _ in 0..32 {
        let err = client.query_all().await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }

    // and a fresh exchange still works afterwards
    let responsive = MockBrowserServer::builder()
        .with_all_instances_reply(&[sqlexpress()])
        .build()
        .await
        .unwrap();
    let records = client_for(&responsive).query_all().await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_reply_shorter_than_header_is_protocol_error() {
    let server = MockBrowserServer::builder()
        .with_raw_reply(vec![0x05u8, 0x00])
        .build()
        .await
        .unwrap();

    let err = client_for(&server).query_all().await.unwrap_err();
    assert!(err.is_protocol_error());
}

#[tokio::test]
async fn test_undecodable_reply_is_protocol_error() {
    let server = MockBrowserServer::builder()
        .with_raw_reply(vec![0x05u8, 0x02, 0x00, 0xFF, 0xFE])
        .build()
        .await
        .unwrap();

    let err = client_for(&server).query_all().await.unwrap_err();
    assert!(err.is_protocol_error());
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_invalid_instance_name_fails_before_sending() {
    let server = MockBrowserServer::builder().build().await.unwrap();

    let err = client_for(&server)
        .query_instance("caf\u{e9}")
        .await
        .unwrap_err();
    assert!(err.is_protocol_error());
    assert_eq!(server.last_request().await, None);
}

// =============================================================================
// Exchange State Machine Tests
// =============================================================================

#[tokio::test]
async fn test_exchange_states_on_success() {
    let server = MockBrowserServer::builder()
        .with_all_instances_reply(&[sqlexpress()])
        .build()
        .await
        .unwrap();

    let mut exchange = QueryExchange::bind(server.addr(), 4096).await.unwrap();
    assert_eq!(exchange.state(), QueryState::Idle);

    exchange.send(&BrowserRequest::AllInstances).await.unwrap();
    assert!(exchange.state().is_awaiting_reply());

    let records = exchange.receive(Duration::from_secs(2)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(exchange.state(), QueryState::Done);
}

#[tokio::test]
async fn test_exchange_fails_on_timeout() {
    let server = MockBrowserServer::builder().silent().build().await.unwrap();

    let mut exchange = QueryExchange::bind(server.addr(), 4096).await.unwrap();
    exchange.send(&BrowserRequest::AllInstances).await.unwrap();

    let err = exchange.receive(Duration::from_millis(20)).await.unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
    assert_eq!(exchange.state(), QueryState::Failed);
}
