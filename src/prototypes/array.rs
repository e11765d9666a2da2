/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     array.rs
 * Purpose:  List ordering and the importable `collections` module.
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

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{RuntimeError, RuntimeResult};
use crate::prototypes::install;
use crate::sync::read;
use crate::value::Value;

/// Exports of `Import "collections".` Each returns a new list and leaves
/// its argument alone.
///
/// # Installed Functions
/// - `collections_sort(list)`
/// - `collections_reverse(list)`
/// - `collections_unique(list)`: first occurrence wins
pub fn create_collections_module() -> HashMap<String, Value> {
    let mut collections = HashMap::new();

    install(&mut collections, "collections_sort", |args| {
        let mut items = list_arg(&args, "collections_sort")?;
        sort_values(&mut items);
        Ok(Value::list(items))
    });
    install(&mut collections, "collections_reverse", |args| {
        let mut items = list_arg(&args, "collections_reverse")?;
        items.reverse();
        Ok(Value::list(items))
    });
    install(&mut collections, "collections_unique", |args| {
        let items = list_arg(&args, "collections_unique")?;
        Ok(Value::list(unique(items)))
    });

    collections
}

fn list_arg(args: &[Value], function: &str) -> RuntimeResult<Vec<Value>> {
    match args.first() {
        Some(Value::List(items)) => Ok(read(items).clone()),
        _ => Err(RuntimeError::new(format!("'{}' expects a list.", function))),
    }
}

fn unique(items: Vec<Value>) -> Vec<Value> {
    let mut seen: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Orders booleans, then numbers, then text, each by value. A list holding
/// anything else is ordered by rendered text instead.
pub fn sort_values(items: &mut [Value]) {
    fn rank(value: &Value) -> Option<u8> {
        match value {
            Value::Bool(_) => Some(0),
            Value::Number(_) => Some(1),
            Value::Text(_) => Some(2),
            _ => None,
        }
    }

    if items.iter().all(|v| rank(v).is_some()) {
        items.sort_by(|a, b| {
            rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
                (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
                (Value::Text(x), Value::Text(y)) => x.cmp(y),
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                _ => Ordering::Equal,
            })
        });
    } else {
        items.sort_by_cached_key(|v| v.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_groups_by_kind_then_value() {
        let mut items = vec![
            Value::text("b"),
            Value::Number(3.0),
            Value::text("a"),
            Value::Number(1.0),
            Value::Bool(true),
        ];
        sort_values(&mut items);
        assert_eq!(
            items,
            vec![
                Value::Bool(true),
                Value::Number(1.0),
                Value::Number(3.0),
                Value::text("a"),
                Value::text("b"),
            ]
        );
    }

    #[test]
    fn sort_falls_back_to_text_for_collections() {
        let mut items = vec![
            Value::list(vec![Value::Number(2.0)]),
            Value::Number(10.0),
            Value::list(vec![Value::Number(1.0)]),
        ];
        sort_values(&mut items);
        assert_eq!(items[0], Value::Number(10.0));
        assert_eq!(items[1], Value::list(vec![Value::Number(1.0)]));
    }

    #[test]
    fn module_functions_copy_their_input() {
        let module = create_collections_module();
        let original = Value::list(vec![
            Value::Number(2.0),
            Value::Number(1.0),
            Value::Number(2.0),
        ]);

        let Some(Value::Native(unique)) = module.get("collections_unique") else {
            panic!("collections_unique missing");
        };
        assert_eq!(
            unique.call(vec![original.clone()]).unwrap().to_string(),
            "[2, 1]"
        );

        let Some(Value::Native(reverse)) = module.get("collections_reverse") else {
            panic!("collections_reverse missing");
        };
        assert_eq!(
            reverse.call(vec![original.clone()]).unwrap().to_string(),
            "[2, 1, 2]"
        );
        assert_eq!(original.to_string(), "[2, 1, 2]");
    }
}
