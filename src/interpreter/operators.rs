/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     operators.rs
 * Purpose:  plus, minus, times, divided by and modulo.
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

use crate::ast::BinaryOp;
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::Interpreter;
use crate::sync::read;
use crate::value::Value;

impl Interpreter {
    /// Applies a binary arithmetic operator.
    ///
    /// # Behavior
    /// - `plus` on two lists concatenates them.
    /// - `plus` with text on either side renders both operands and joins
    ///   them with one space: `"Hello" plus "Ada"` is `Hello Ada`.
    /// - Everything else needs two numbers. Booleans are not numbers here.
    ///
    /// # Errors
    /// Non-numeric operands, division or remainder by zero.
    pub(crate) fn apply_op(
        &self,
        op: BinaryOp,
        left: Value,
        right: Value,
        line: usize,
    ) -> RuntimeResult<Value> {
        if op == BinaryOp::Plus {
            match (&left, &right) {
                (Value::List(a), Value::List(b)) => {
                    let mut joined = read(a).clone();
                    joined.extend(read(b).iter().cloned());
                    return Ok(Value::list(joined));
                }
                (Value::Text(_), _) | (_, Value::Text(_)) => {
                    return Ok(Value::Text(format!("{} {}", left, right)));
                }
                _ => {}
            }
        }

        let a = assert_num(&left, op.as_str(), line)?;
        let b = assert_num(&right, op.as_str(), line)?;

        let result = match op {
            BinaryOp::Plus => a + b,
            BinaryOp::Minus => a - b,
            BinaryOp::Times => a * b,
            BinaryOp::Divide => {
                if b == 0.0 {
                    return Err(RuntimeError::at(line, "I cannot divide by zero."));
                }
                a / b
            }
            BinaryOp::Modulo => {
                if b == 0.0 {
                    return Err(RuntimeError::at(
                        line,
                        "I cannot take the remainder of dividing by zero.",
                    ));
                }
                floored_mod(a, b)
            }
        };

        Ok(Value::Number(result))
    }
}

/// The number inside `value`, or the "not a number" error naming `op`.
pub(crate) fn assert_num(value: &Value, op: &str, line: usize) -> RuntimeResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RuntimeError::at(
            line,
            format!("'{}' is not a number, so I cannot use '{}'.", other, op),
        )),
    }
}

/// Remainder with the sign of the divisor: `-7 modulo 3` is `2`.
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOp, a: Value, b: Value) -> RuntimeResult<Value> {
        Interpreter::new().apply_op(op, a, b, 1)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(apply(BinaryOp::Plus, 3.0.into(), 4.0.into()), Ok(Value::Number(7.0)));
        assert_eq!(apply(BinaryOp::Divide, 6.0.into(), 2.0.into()), Ok(Value::Number(3.0)));
        assert_eq!(apply(BinaryOp::Modulo, (-7.0).into(), 3.0.into()), Ok(Value::Number(2.0)));
    }

    #[test]
    fn division_by_zero() {
        let err = apply(BinaryOp::Divide, 5.0.into(), 0.0.into()).unwrap_err();
        assert_eq!(err.to_string(), "Line 1: I cannot divide by zero.");
        let err = apply(BinaryOp::Modulo, 5.0.into(), 0.0.into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 1: I cannot take the remainder of dividing by zero."
        );
    }

    #[test]
    fn plus_with_text_joins_with_a_space() {
        assert_eq!(
            apply(BinaryOp::Plus, "Total:".into(), 5.0.into()),
            Ok(Value::text("Total: 5"))
        );
    }

    #[test]
    fn plus_concatenates_lists() {
        let joined = apply(
            BinaryOp::Plus,
            Value::list(vec![1.0.into()]),
            Value::list(vec![2.0.into()]),
        )
        .unwrap();
        assert_eq!(joined.to_string(), "[1, 2]");
    }

    #[test]
    fn booleans_are_not_numbers() {
        let err = apply(BinaryOp::Times, true.into(), 2.0.into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 1: 'true' is not a number, so I cannot use 'times'."
        );
    }
}
