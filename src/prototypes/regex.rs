/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     regex.rs
 * Purpose:  `the result of matching pattern P in T`.
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

use regex::Regex;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// Compiles `pattern`, reporting a bad one the way programs see it.
pub fn compile(pattern: &str) -> RuntimeResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| RuntimeError::new(format!("Invalid regex pattern. ({})", e)))
}

/// First match of `pattern` in `text`.
///
/// # Returns
/// - the capture groups as a list when the pattern has any (a group that
///   did not take part is `nothing`)
/// - otherwise the whole match as text
/// - `nothing` when there is no match
pub fn first_match(pattern: &str, text: &str) -> RuntimeResult<Value> {
    let regex = compile(pattern)?;
    let Some(captures) = regex.captures(text) else {
        return Ok(Value::Nothing);
    };

    if captures.len() > 1 {
        let groups = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| Value::text(m.as_str())).unwrap_or(Value::Nothing))
            .collect();
        return Ok(Value::list(groups));
    }

    Ok(captures
        .get(0)
        .map(|m| Value::text(m.as_str()))
        .unwrap_or(Value::Nothing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_whole_match_or_nothing() {
        assert_eq!(
            first_match(r"(\w+)@(\w+)", "mail ada@example now").unwrap().to_string(),
            "[ada, example]"
        );
        assert_eq!(first_match(r"\d+", "order 42 of 50"), Ok(Value::text("42")));
        assert_eq!(first_match(r"\d+", "none"), Ok(Value::Nothing));
    }

    #[test]
    fn invalid_patterns() {
        assert!(first_match("(", "x")
            .unwrap_err()
            .message
            .starts_with("Invalid regex pattern. ("));
    }
}
