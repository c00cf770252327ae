//! # Server Tests
//!
//! Smoke tests for the routes that do not touch the knowledge base.

mod common;

use anyhow::Result;
use common::TestApp;
use hrqa_test_utils::{FixedTokenizer, InMemoryDocumentStore};
use reqwest::Method;

#[tokio::test]
async fn test_root_reports_running() -> Result<()> {
    let app = TestApp::spawn(InMemoryDocumentStore::default(), FixedTokenizer::new()).await?;

    let response = app.client.get(&app.address).send().await?;

    assert!(response.status().is_success());
    assert_eq!(response.text().await?, "hrqa server is running.");
    Ok(())
}

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let app = TestApp::spawn(InMemoryDocumentStore::default(), FixedTokenizer::new()).await?;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await?;

    assert!(response.status().is_success());
    assert_eq!(response.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() -> Result<()> {
    // Arrange
    let app = TestApp::spawn(InMemoryDocumentStore::default(), FixedTokenizer::new()).await?;

    // Act
    let response = app
        .client
        .request(Method::OPTIONS, format!("{}/api/ask", app.address))
        .header("origin", "https://intranet.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await?;

    // Assert
    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(headers.contains_key("access-control-allow-methods"));
    Ok(())
}

#[tokio::test]
async fn test_cors_header_on_simple_request() -> Result<()> {
    let app = TestApp::spawn(InMemoryDocumentStore::default(), FixedTokenizer::new()).await?;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("origin", "https://intranet.example")
        .send()
        .await?;

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    Ok(())
}
