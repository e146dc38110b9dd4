//! Shared fixtures for integration tests
//!
//! `FakeTransport` answers requests from a route table keyed by method and URL
//! and records every request it sees, so tests can count network calls.

#![allow(dead_code)]

use reqwest::Method;
use rynab::api::{ApiClient, HttpRequest, HttpResponse, Transport};
use rynab::{ClientConfig, ResourceResolver};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use tempfile::TempDir;

pub const BASE_URL: &str = "https://api.test/v1";
pub const BUDGET_ID: &str = "11111111-1111-1111-1111-111111111111";

#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<(Method, String), HttpResponse>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn get(self, path: &str, body: Value) -> Self {
        self.respond(Method::GET, path, 200, body)
    }

    pub fn post(self, path: &str, status: u16, body: Value) -> Self {
        self.respond(Method::POST, path, status, body)
    }

    pub fn respond(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(
            (method, format!("{}{}", BASE_URL, path)),
            HttpResponse {
                status,
                rate_limit: Some("1/200".to_string()),
                body: body.to_string(),
            },
        );
        self
    }

    /// Every request seen so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Number of requests whose URL ends with `path`
    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.url.ends_with(path))
            .count()
    }

    /// Parsed body of the most recent POST
    pub fn last_post_body(&self) -> Option<Value> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|request| request.method == Method::POST)
            .and_then(|request| request.body.as_deref())
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let key = (request.method.clone(), request.url.clone());
        let response = self.routes.get(&key).cloned().unwrap_or(HttpResponse {
            status: 404,
            rate_limit: None,
            body: json!({"error": {"id": "404.2", "name": "resource_not_found"}}).to_string(),
        });
        self.requests.borrow_mut().push(request);
        Ok(response)
    }
}

/// Builds a resolver over `transport` with a private cache directory
pub fn new_resolver(transport: FakeTransport) -> (ResourceResolver<FakeTransport>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = ClientConfig::default()
        .with_base_url(BASE_URL)
        .with_cache_dir(temp_dir.path().join("cache"));
    let client = ApiClient::with_transport("test-token", config, transport);
    (ResourceResolver::with_client(client), temp_dir)
}

pub fn budgets_body() -> Value {
    json!({"data": {"budgets": [
        {"id": BUDGET_ID, "name": "Personal"},
        {"id": "22222222-2222-2222-2222-222222222222", "name": "Other"},
        {"id": "33333333-3333-3333-3333-333333333333", "name": "personal"}
    ]}})
}

pub fn accounts_body() -> Value {
    json!({"data": {"accounts": [
        {"id": "acct-checking", "name": "Checking", "closed": false, "balance": 125000},
        {"id": "acct-savings", "name": "Savings", "closed": false, "balance": 900000}
    ]}})
}

pub fn categories_body() -> Value {
    json!({"data": {"category_groups": [
        {"id": "g-bills", "name": "Bills", "categories": [
            {"id": "c-rent", "name": "Rent"},
            {"id": "c-misc-bills", "name": "Misc"}
        ]},
        {"id": "g-fun", "name": "Fun Money", "categories": [
            {"id": "c-dining", "name": "Dining Out"},
            {"id": "c-misc-fun", "name": "Misc"}
        ]}
    ]}})
}

pub fn payees_body() -> Value {
    json!({"data": {"payees": [
        {"id": "p-landlord", "name": "Landlord"},
        {"id": "p-cafe", "name": "Corner Cafe"},
        {"id": "p-cafe-dup", "name": "corner cafe"}
    ]}})
}

pub fn path(suffix: &str) -> String {
    format!("/budgets/{}{}", BUDGET_ID, suffix)
}
