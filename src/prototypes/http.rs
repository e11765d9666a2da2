/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     http.rs
 * Purpose:  Blocking HTTP GET/POST behind `fetching` and `posting`.
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the PROSE programming language project.
 *
 * PROSE is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use tracing::debug;

use crate::error::{RuntimeError, RuntimeResult};
use crate::prototypes::json;
use crate::value::Value;

const USER_AGENT: &str = "Mozilla/5.0";

/// `the result of fetching url U`
///
/// # Behavior
/// A body that parses as JSON comes back as the matching value; anything
/// else comes back as text. Non-2xx statuses are errors.
///
/// # Errors
/// - `URL must be text.`
/// - `Network error fetching URL. ...`
pub fn get(url: &Value) -> RuntimeResult<Value> {
    let url = url_text(url)?;
    debug!(url, "http get");

    let body = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| e.to_string())
        .and_then(|response| response.into_string().map_err(|e| e.to_string()))
        .map_err(|e| RuntimeError::new(format!("Network error fetching URL. {}", e)))?;

    Ok(decode_body(body))
}

/// `the result of posting payload P to url U`. The payload is sent as a
/// JSON document.
pub fn post(url: &Value, payload: &Value) -> RuntimeResult<Value> {
    let url = url_text(url)?;
    let document = json::to_json(payload).map_err(|e| {
        RuntimeError::new(format!("Could not convert payload to JSON. {}", e))
    })?;
    debug!(url, "http post");

    let body = ureq::post(url)
        .set("User-Agent", USER_AGENT)
        .set("Content-Type", "application/json")
        .send_string(&document.to_string())
        .map_err(|e| e.to_string())
        .and_then(|response| response.into_string().map_err(|e| e.to_string()))
        .map_err(|e| RuntimeError::new(format!("Network error posting to URL. {}", e)))?;

    Ok(decode_body(body))
}

fn url_text(url: &Value) -> RuntimeResult<&str> {
    match url {
        Value::Text(url) => Ok(url),
        _ => Err(RuntimeError::new("URL must be text.")),
    }
}

fn decode_body(body: String) -> Value {
    match serde_json::from_str(&body) {
        Ok(document) => json::from_json(document),
        Err(_) => Value::Text(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_must_be_text() {
        assert_eq!(
            get(&Value::Number(1.0)).unwrap_err().message,
            "URL must be text."
        );
    }

    #[test]
    fn unreachable_hosts_are_network_errors() {
        let err = get(&Value::text("http://127.0.0.1:9/nothing-here")).unwrap_err();
        assert!(err.message.starts_with("Network error fetching URL."));
    }

    #[test]
    fn bodies_decode_as_json_when_they_can() {
        assert_eq!(decode_body("[1, 2]".to_string()).to_string(), "[1, 2]");
        assert_eq!(decode_body("plain words".to_string()), Value::text("plain words"));
    }
}
