/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     string.rs
 * Purpose:  Text builtins and the importable `string` module.
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

use std::collections::HashMap;

use crate::error::{RuntimeError, RuntimeResult};
use crate::prototypes::{install, number_arg, text_arg};
use crate::sync::read;
use crate::value::Value;

/// Exports of `Import "string".`
///
/// # Installed Functions
/// - `string_startsWith(text, prefix)`
/// - `string_endsWith(text, suffix)`
/// - `string_substring(text, start, end)`: 0-based, end exclusive
pub fn create_string_module() -> HashMap<String, Value> {
    let mut string = HashMap::new();

    install(&mut string, "string_startsWith", |args| {
        let text = text_arg(&args, 0, "string_startsWith")?;
        let prefix = text_arg(&args, 1, "string_startsWith")?;
        Ok(Value::Bool(text.starts_with(&prefix)))
    });
    install(&mut string, "string_endsWith", |args| {
        let text = text_arg(&args, 0, "string_endsWith")?;
        let suffix = text_arg(&args, 1, "string_endsWith")?;
        Ok(Value::Bool(text.ends_with(&suffix)))
    });
    install(&mut string, "string_substring", |args| {
        let text = text_arg(&args, 0, "string_substring")?;
        let start = number_arg(&args, 1, "string_substring")? as i64;
        let end = number_arg(&args, 2, "string_substring")? as i64;
        Ok(Value::Text(slice_chars(&text, start, end)))
    });

    string
}

/// Characters `start..end` with negative indices counted from the end and
/// out-of-range bounds clamped.
fn slice_chars(text: &str, start: i64, end: i64) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;
    let clamp = |i: i64| if i < 0 { (len + i).max(0) } else { i.min(len) };
    let (start, end) = (clamp(start), clamp(end));
    if start >= end {
        return String::new();
    }
    chars[start as usize..end as usize].iter().collect()
}

/* --------------------------------------------------------------------------
 * Builtins
 * -------------------------------------------------------------------------- */

/// `substring of T from A to B`: 1-based and inclusive of both ends.
pub fn substring(text: &str, from: i64, to: i64) -> String {
    slice_chars(text, (from - 1).max(0), to.max(0))
}

/// `character N of T` (1-based).
pub fn character_at(text: &str, index: i64) -> RuntimeResult<String> {
    let len = text.chars().count();
    if index < 1 || index as usize > len {
        return Err(RuntimeError::new(format!(
            "Character index {} out of bounds for text of length {}.",
            index, len
        )));
    }
    Ok(text
        .chars()
        .nth(index as usize - 1)
        .map(String::from)
        .unwrap_or_default())
}

/// `index of X in H`: 1-based position, or 0 when absent.
///
/// In text the position counts characters; in a list it is the first
/// element equal to `item`.
pub fn index_of(item: &Value, haystack: &Value) -> RuntimeResult<f64> {
    match haystack {
        Value::Text(text) => {
            let needle = item.to_string();
            Ok(text
                .find(&needle)
                .map(|byte| text[..byte].chars().count() as f64 + 1.0)
                .unwrap_or(0.0))
        }
        Value::List(items) => Ok(read(items)
            .iter()
            .position(|v| v == item)
            .map(|i| i as f64 + 1.0)
            .unwrap_or(0.0)),
        _ => Err(RuntimeError::new("'index of' needs a list or text.")),
    }
}

/// `split T by D`. An empty delimiter splits on runs of whitespace.
pub fn split(text: &str, delimiter: &str) -> Vec<Value> {
    if delimiter.is_empty() {
        return text.split_whitespace().map(Value::text).collect();
    }
    text.split(delimiter).map(Value::text).collect()
}

/// `join L with S`
pub fn join(list: &Value, separator: &str) -> RuntimeResult<String> {
    match list {
        Value::List(items) => Ok(read(items)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(separator)),
        _ => Err(RuntimeError::new("'join' needs a list.")),
    }
}

/// `repeat T N times`; zero or negative counts give empty text.
pub fn repeat(text: &str, times: i64) -> String {
    text.repeat(times.max(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_is_one_based_and_inclusive() {
        assert_eq!(substring("Hello World", 1, 5), "Hello");
        assert_eq!(substring("Hello", 4, 99), "lo");
        assert_eq!(substring("Hello", 4, 2), "");
    }

    #[test]
    fn character_at_checks_bounds() {
        assert_eq!(character_at("héllo", 2).unwrap(), "é");
        assert_eq!(
            character_at("abc", 4).unwrap_err().message,
            "Character index 4 out of bounds for text of length 3."
        );
    }

    #[test]
    fn index_of_text_and_lists() {
        assert_eq!(index_of(&Value::text("lo"), &Value::text("hello")), Ok(4.0));
        assert_eq!(index_of(&Value::text("z"), &Value::text("hello")), Ok(0.0));
        let list = Value::list(vec![Value::Number(5.0), Value::Number(7.0)]);
        assert_eq!(index_of(&Value::Number(7.0), &list), Ok(2.0));
        assert!(index_of(&Value::Number(1.0), &Value::Number(2.0)).is_err());
    }

    #[test]
    fn split_and_join() {
        assert_eq!(
            split("a,b,c", ","),
            vec![Value::text("a"), Value::text("b"), Value::text("c")]
        );
        assert_eq!(split("  a  b ", ""), vec![Value::text("a"), Value::text("b")]);
        let list = Value::list(vec![Value::Number(1.0), Value::text("x")]);
        assert_eq!(join(&list, "-").unwrap(), "1-x");
    }

    #[test]
    fn module_substring_is_zero_based() {
        let module = create_string_module();
        let Some(Value::Native(sub)) = module.get("string_substring") else {
            panic!("string_substring missing");
        };
        let result = sub.call(vec![Value::text("prose"), Value::Number(1.0), Value::Number(3.0)]);
        assert_eq!(result, Ok(Value::text("ro")));
    }
}
