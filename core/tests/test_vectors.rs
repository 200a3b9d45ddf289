//! Check URL decomposition, header parsing and error classification against
//! the JSON vectors in `test-vectors/`.
//!
//! The vectors are shared with bindings in other languages, so they describe
//! inputs and expected outputs only.

use http_client_core::{decompose, parse_headers, TransportErrorKind};

fn load(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

#[test]
fn url_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/url.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = decompose(case["input"].as_str().unwrap());
        assert_eq!(url.host, case["host"].as_str().unwrap(), "{name}: host");
        assert_eq!(url.path, case["path"].as_str().unwrap(), "{name}: path");
        assert!(url.path.starts_with('/'), "{name}: path must start with /");
    }
}

#[test]
fn header_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/headers.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let parsed: Vec<(String, String)> = parse_headers(case["input"].as_str().unwrap()).into_vec();

        let expected: Vec<(String, String)> = case["expected"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(parsed, expected, "{name}");
    }
}

#[test]
fn error_code_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/errors.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let code = case["code"].as_i64().unwrap() as i32;
        let kind = TransportErrorKind::from_code(code);
        assert_eq!(kind.message(), case["message"].as_str().unwrap(), "code {code}");
    }
}
