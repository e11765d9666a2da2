/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     mod.rs
 * Purpose:  Native services behind the builtins and importable modules.
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

//! Everything here works on plain [`Value`]s and reports failures as
//! [`RuntimeError`]s without a line; the interpreter adds the line of the
//! sentence that asked for the service.

use std::collections::HashMap;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{NativeFunction, Value};

pub mod array;
pub mod fs;
pub mod http;
pub mod json;
pub mod math;
pub mod regex;
pub mod string;
pub mod time;

/// Exports of the modules every interpreter can `Import` without a host
/// registration. Names are prefixed with the module name.
pub fn builtin_module(name: &str) -> Option<HashMap<String, Value>> {
    match name {
        "time" => Some(time::create_time_module()),
        "math" => Some(math::create_math_module()),
        "string" => Some(string::create_string_module()),
        "collections" => Some(array::create_collections_module()),
        _ => None,
    }
}

/// Inserts `func` under `name` as a native callable.
pub(crate) fn install<F>(exports: &mut HashMap<String, Value>, name: &str, func: F)
where
    F: Fn(Vec<Value>) -> RuntimeResult<Value> + Send + Sync + 'static,
{
    exports.insert(name.to_string(), Value::Native(NativeFunction::new(name, func)));
}

/// Argument `index` as a number.
pub(crate) fn number_arg(args: &[Value], index: usize, function: &str) -> RuntimeResult<f64> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(RuntimeError::new(format!(
            "'{}' expects a number, but got '{}'.",
            function, other
        ))),
        None => Err(RuntimeError::new(format!(
            "'{}' expects at least {} argument(s).",
            function,
            index + 1
        ))),
    }
}

/// Argument `index` rendered as text.
pub(crate) fn text_arg(args: &[Value], index: usize, function: &str) -> RuntimeResult<String> {
    match args.get(index) {
        Some(value) => Ok(value.to_string()),
        None => Err(RuntimeError::new(format!(
            "'{}' expects at least {} argument(s).",
            function,
            index + 1
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_modules_prefix_their_exports() {
        let math = builtin_module("math").unwrap();
        assert!(math.contains_key("math_sin"));
        assert!(math.contains_key("math_pi"));
        assert!(builtin_module("gui").is_none());
    }

    #[test]
    fn argument_helpers_report_missing_and_wrong_kinds() {
        let args = vec![Value::text("x")];
        assert_eq!(
            number_arg(&args, 0, "math_sin").unwrap_err().message,
            "'math_sin' expects a number, but got 'x'."
        );
        assert_eq!(
            text_arg(&args, 1, "string_endsWith").unwrap_err().message,
            "'string_endsWith' expects at least 2 argument(s)."
        );
    }
}
