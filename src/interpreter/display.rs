/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     display.rs
 * Purpose:  How values look when a program prints them.
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

use std::fmt;

use crate::sync::read;
use crate::value::{Dict, Value};

/// Nesting deeper than this prints as `...`; a list that contains itself
/// would otherwise never finish rendering.
const MAX_DEPTH: usize = 32;

/// ============================================================================
/// value_to_string
/// ============================================================================
/// Converts a runtime `Value` into the text `Say`, `Display`, templates and
/// `as text` produce.
///
/// Examples:
///   - Number(3.0)            → "3"
///   - Number(2.5)            → "2.5"
///   - Bool(true)             → "true"
///   - Nothing                → "nothing"
///   - List([1, "a"])         → "[1, a]"
///   - Dict({"k": 1})         → "{k: 1}"
///   - Instance of Dog        → "<Object Dog {name: Rex}>"
///   - Function               → "<function>"
/// ============================================================================
pub fn value_to_string(value: &Value) -> String {
    let mut out = String::new();
    render(value, 0, &mut out);
    out
}

/// Whole numbers print without a decimal point.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        // Also folds -0 into 0.
        return "0".to_string();
    }
    n.to_string()
}

fn render(value: &Value, depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        out.push_str("...");
        return;
    }

    match value {
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::Text(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Nothing => out.push_str("nothing"),

        Value::List(items) => {
            out.push('[');
            for (i, item) in read(items).iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render(item, depth + 1, out);
            }
            out.push(']');
        }

        Value::Dict(dict) => render_dict(&read(dict), depth, out),

        Value::Instance(instance) => {
            out.push_str("<Object ");
            out.push_str(&instance.class_name);
            out.push(' ');
            render_dict(&instance.snapshot(), depth, out);
            out.push('>');
        }

        Value::Function(_) | Value::Native(_) => out.push_str("<function>"),
        Value::Namespace(_) => out.push_str("<module>"),
        Value::Task(task) => {
            out.push_str("<task ");
            out.push_str(task.label());
            out.push('>');
        }
    }
}

fn render_dict(dict: &Dict, depth: usize, out: &mut String) {
    out.push('{');
    for (i, (key, value)) in dict.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render(key, depth + 1, out);
        out.push_str(": ");
        render(value, depth + 1, out);
    }
    out.push('}');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::value::Instance;

    #[test]
    fn whole_numbers_have_no_decimal_point() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "nan");
    }

    #[test]
    fn scalars() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Nothing.to_string(), "nothing");
        assert_eq!(Value::text("hi").to_string(), "hi");
    }

    #[test]
    fn nested_collections() {
        let mut dict = Dict::new();
        dict.insert(Value::text("tags"), Value::list(vec![Value::text("a"), Value::Number(2.0)]));
        dict.insert(Value::text("ok"), Value::Bool(true));
        assert_eq!(Value::dict(dict).to_string(), "{tags: [a, 2], ok: true}");
    }

    #[test]
    fn objects_show_class_and_properties() {
        let mut props = Dict::new();
        props.insert(Value::text("name"), Value::text("Rex"));
        let dog = Value::Instance(Arc::new(Instance::new("Dog", props)));
        assert_eq!(dog.to_string(), "<Object Dog {name: Rex}>");
    }
}
