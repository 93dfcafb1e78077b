mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// Authorization runs before any resource access, so every case here must be
// answered without a database or identity provider behind the server.

#[tokio::test]
async fn detail_without_header_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/drinks-detail", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
    assert_eq!(body["message"], "authorization header is expected");
    Ok(())
}

#[tokio::test]
async fn wrong_scheme_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/drinks-detail", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "authorization header must be a bearer token");
    Ok(())
}

#[tokio::test]
async fn undecodable_token_is_401() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    // Fails at token-header parsing, before any key-set fetch
    let res = client
        .get(format!("{}/drinks-detail", server.base_url))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
    Ok(())
}

#[tokio::test]
async fn every_mutation_route_requires_auth() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let post = client
        .post(format!("{}/drinks", server.base_url))
        .json(&json!({"title": "Latte", "recipe": []}))
        .send()
        .await?;
    assert_eq!(post.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(post.json::<Value>().await?["success"], false);

    let patch = client
        .patch(format!("{}/drinks/1", server.base_url))
        .json(&json!({"title": "Mocha"}))
        .send()
        .await?;
    assert_eq!(patch.status(), StatusCode::UNAUTHORIZED);

    let delete = client
        .delete(format!("{}/drinks/1", server.base_url))
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn public_listing_needs_no_auth() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    // No database behind the test server, so the read route reports the
    // documented generic not-found rather than an auth failure or a 500
    let res = client
        .get(format!("{}/drinks", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "resource not found");
    Ok(())
}
