/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     json.rs
 * Purpose:  Conversion between JSON text and runtime values.
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

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Number, Value as JsonValue};

use crate::error::{RuntimeError, RuntimeResult};
use crate::sync::read;
use crate::value::{Dict, Value};

/// `the json parsed from text T`
pub fn parse(text: &Value) -> RuntimeResult<Value> {
    let Value::Text(text) = text else {
        return Err(RuntimeError::new("JSON parsing requires text."));
    };
    let json: JsonValue = serde_json::from_str(text)
        .map_err(|e| RuntimeError::new(format!("Invalid JSON text format. {}", e)))?;
    Ok(from_json(json))
}

/// `the json for V`, written on one line with a space after every `,`
/// and `:`.
pub fn stringify(value: &Value) -> RuntimeResult<String> {
    let json = to_json(value)
        .map_err(|e| RuntimeError::new(format!("Could not convert to JSON. {}", e)))?;

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    json.serialize(&mut serializer)
        .map_err(|e| RuntimeError::new(format!("Could not convert to JSON. {}", e)))?;
    String::from_utf8(out)
        .map_err(|e| RuntimeError::new(format!("Could not convert to JSON. {}", e)))
}

/// Objects become dictionaries in document order.
pub fn from_json(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Nothing,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Nothing),
        JsonValue::String(s) => Value::Text(s),
        JsonValue::Array(items) => Value::list(items.into_iter().map(from_json).collect()),
        JsonValue::Object(fields) => Value::dict(
            fields
                .into_iter()
                .map(|(k, v)| (Value::Text(k), from_json(v)))
                .collect::<Dict>(),
        ),
    }
}

/// Whole numbers are written without a fractional part.
pub fn to_json(value: &Value) -> Result<JsonValue, String> {
    Ok(match value {
        Value::Nothing => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => number(*n),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(items) => JsonValue::Array(
            read(items)
                .iter()
                .map(to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Dict(dict) => {
            let mut map = Map::new();
            for (key, value) in read(dict).iter() {
                map.insert(key_text(key), to_json(value)?);
            }
            JsonValue::Object(map)
        }
        other => return Err(format!("A {} is not JSON serializable.", other.type_name())),
    })
}

fn number(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return JsonValue::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

fn key_text(key: &Value) -> String {
    match key {
        Value::Nothing => "null".to_string(),
        other => other.to_string(),
    }
}

/// Compact output with `, ` and `: ` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_key_order() {
        let value = parse(&Value::text(r#"{"b": 1, "a": [true, null, "x"]}"#)).unwrap();
        assert_eq!(value.to_string(), "{b: 1, a: [true, nothing, x]}");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse(&Value::Number(1.0)).unwrap_err().message,
            "JSON parsing requires text."
        );
        assert!(parse(&Value::text("{oops"))
            .unwrap_err()
            .message
            .starts_with("Invalid JSON text format."));
    }

    #[test]
    fn stringify_uses_spaced_separators() {
        let mut dict = Dict::new();
        dict.insert(Value::text("name"), Value::text("Ada"));
        dict.insert(
            Value::text("scores"),
            Value::list(vec![Value::Number(3.0), Value::Number(4.5)]),
        );
        assert_eq!(
            stringify(&Value::dict(dict)).unwrap(),
            r#"{"name": "Ada", "scores": [3, 4.5]}"#
        );
    }

    #[test]
    fn modules_are_not_json() {
        let err = stringify(&Value::Namespace(crate::Scope::new_global())).unwrap_err();
        assert_eq!(
            err.message,
            "Could not convert to JSON. A module is not JSON serializable."
        );
    }
}
