/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     conditions.rs
 * Purpose:  Condition evaluation and loose equality.
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

use std::mem::discriminant;

use crate::ast::{Comparison, Condition, Connective, TypeName};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::environment::ScopeRef;
use crate::interpreter::Interpreter;
use crate::prototypes::regex::compile as compile_pattern;
use crate::sync::read;
use crate::value::Value;

impl Interpreter {
    /// Evaluates an `If`/`While`/`where` condition.
    ///
    /// # Behavior
    /// - `and` / `or` short-circuit.
    /// - `is` / `is not` use [`loose_eq`].
    /// - Ordering comparisons coerce both sides to numbers.
    pub fn eval_condition(&self, condition: &Condition, env: &ScopeRef) -> RuntimeResult<bool> {
        match condition {
            Condition::Compound {
                left,
                connective,
                right,
            } => {
                let left = self.eval_condition(left, env)?;
                match connective {
                    Connective::And if !left => Ok(false),
                    Connective::Or if left => Ok(true),
                    _ => self.eval_condition(right, env),
                }
            }

            Condition::FileExists { path, .. } => {
                let path = self.eval_expr(path, env)?.to_string();
                Ok(self.options.resolve_path(&path).exists())
            }

            Condition::TypeCheck { expr, kind, .. } => {
                let value = self.eval_expr(expr, env)?;
                Ok(match kind {
                    TypeName::Number => matches!(value, Value::Number(_)),
                    TypeName::Text => matches!(value, Value::Text(_)),
                    TypeName::List => matches!(value, Value::List(_)),
                    TypeName::Boolean => matches!(value, Value::Bool(_)),
                })
            }

            Condition::Truthy { expr, .. } => Ok(self.eval_expr(expr, env)?.is_truthy()),

            Condition::Compare {
                left,
                op,
                right,
                line,
            } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                compare(&left, *op, &right, *line)
            }
        }
    }
}

fn compare(left: &Value, op: Comparison, right: &Value, line: usize) -> RuntimeResult<bool> {
    match op {
        Comparison::Equal => Ok(loose_eq(left, right)),
        Comparison::NotEqual => Ok(!loose_eq(left, right)),

        Comparison::HasKey => match left {
            Value::Dict(dict) => Ok(read(dict).contains_key(right)),
            _ => Err(RuntimeError::at(
                line,
                "'has the key' can only be used on a dictionary.",
            )),
        },

        Comparison::Matches => {
            let pattern = compile_pattern(&right.to_string())
                .map_err(|e| RuntimeError::at(line, e.message))?;
            Ok(pattern.is_match(&left.to_string()))
        }

        Comparison::Greater
        | Comparison::GreaterEqual
        | Comparison::Less
        | Comparison::LessEqual => {
            let a = ordered(left, line)?;
            let b = ordered(right, line)?;
            Ok(match op {
                Comparison::Greater => a > b,
                Comparison::GreaterEqual => a >= b,
                Comparison::Less => a < b,
                _ => a <= b,
            })
        }
    }
}

fn ordered(value: &Value, line: usize) -> RuntimeResult<f64> {
    value.coerce_number().ok_or_else(|| {
        RuntimeError::at(
            line,
            format!(
                "'{}' is not a number, but I need one for this comparison.",
                value
            ),
        )
    })
}

/// Equality as `is` sees it.
///
/// Values of the same kind compare directly. Mixed kinds compare as
/// numbers when both sides have a numeric reading (`"5" is 5`), and
/// otherwise by their lowercased text (`"TRUE" is true`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    if discriminant(a) == discriminant(b) {
        return a == b;
    }
    if let (Some(x), Some(y)) = (a.coerce_number(), b.coerce_number()) {
        return x == y;
    }
    a.to_string().to_lowercase() == b.to_string().to_lowercase()
}
