//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use serde_json::Value;
use todo_core::{ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient, UpdateTodo};

const BASE_URL: &str = "http://localhost:4000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// `expected_error` is either `NotFound` or `Http:<status>:<message>`.
fn check_error(name: &str, err: ApiError, expected: &str) {
    match expected.split_once(':') {
        None if expected == "NotFound" => {
            assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound, got {err:?}")
        }
        Some(("Http", rest)) => {
            let (status, message) = rest.split_once(':').unwrap();
            match err {
                ApiError::Http {
                    status: got_status,
                    message: got_message,
                } => {
                    assert_eq!(got_status.to_string(), status, "{name}: status");
                    assert_eq!(got_message, message, "{name}: message");
                }
                other => panic!("{name}: expected Http error, got {other:?}"),
            }
        }
        _ => panic!("{name}: unknown expected_error: {expected}"),
    }
}

fn expected_todo(case: &Value) -> Todo {
    serde_json::from_value(case["expected_result"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_todo(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let todo = c.parse_create_todo(simulated(&case)).unwrap();
        assert_eq!(todo, expected_todo(&case), "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        check_request(name, &c.build_list_todos(), &case["expected_request"]);

        let todos = c.parse_list_todos(simulated(&case)).unwrap();
        let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(todos, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        check_request(name, &c.build_get_todo(id), &case["expected_request"]);

        let result = c.parse_get_todo(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_eq!(result.unwrap(), expected_todo(&case), "{name}: parsed result"),
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_todo(id, &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_todo(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_eq!(result.unwrap(), expected_todo(&case), "{name}: parsed result"),
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        check_request(name, &c.build_delete_todo(id), &case["expected_request"]);

        let result = c.parse_delete_todo(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
