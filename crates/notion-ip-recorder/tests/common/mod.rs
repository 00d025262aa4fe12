//! Shared helpers for Notion recorder tests

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use notion_ip_core::{Ipv4Address, NotionConfig};
use notion_ip_recorder::NotionClient;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const PAGE_ID: &str = "0f1e2d3c-page";
pub const TOKEN: &str = "secret_test_token";

pub fn client_for(server: &MockServer) -> NotionClient {
    let config = NotionConfig::new(TOKEN, PAGE_ID).with_api_url(format!("{}/v1", server.uri()));
    NotionClient::new(&config).expect("client builds")
}

pub fn fixed_clock() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-03-01T12:30:00+01:00").expect("valid timestamp")
}

pub fn ip(s: &str) -> Ipv4Address {
    Ipv4Address::parse(s).expect("test address is IPv4-shaped")
}

pub fn children_path() -> String {
    format!("/v1/blocks/{PAGE_ID}/children")
}

pub fn page_path() -> String {
    format!("/v1/pages/{PAGE_ID}")
}

pub fn paragraph(text: &str) -> Value {
    json!({
        "object": "block",
        "id": format!("block-{}", text.len()),
        "type": "paragraph",
        "paragraph": {
            "rich_text": [{ "type": "text", "text": { "content": text }, "plain_text": text }]
        }
    })
}

pub fn block_list(blocks: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": blocks,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor,
    })
}

pub fn append_body(content: &str) -> Value {
    json!({
        "children": [{
            "object": "block",
            "type": "paragraph",
            "paragraph": { "rich_text": [{ "type": "text", "text": { "content": content } }] }
        }]
    })
}

pub fn notion_error(status: u16, code: &str, message: &str) -> Value {
    json!({ "object": "error", "status": status, "code": code, "message": message })
}
