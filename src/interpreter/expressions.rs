/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  Expression evaluation.
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

use std::sync::Arc;

use crate::ast::{Condition, Conversion, Expr, TemplatePart};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::environment::{Scope, ScopeRef};
use crate::interpreter::{Callable, Interpreter};
use crate::sync::read;
use crate::value::{Closure, Dict, Value};

impl Interpreter {
    /// Evaluates an expression node to a runtime value.
    ///
    /// # Behavior
    /// - Single words resolve to a variable, then a global function, then
    ///   their own spelling as text.
    /// - Calls made while evaluating (map callbacks, async waits) run to
    ///   completion before this returns.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised by an operand or operator.
    pub fn eval_expr(&self, expr: &Expr, env: &ScopeRef) -> RuntimeResult<Value> {
        match expr {
            /* ----------------------------------------------------------
             * Literals and names
             * ---------------------------------------------------------- */
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Text(s) => Ok(Value::Text(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Nothing => Ok(Value::Nothing),

            Expr::Identifier { name, .. } => Ok(self.resolve_name(name, env)),

            Expr::Phrase { words, .. } => {
                if let [enum_name, member] = words.as_slice() {
                    if let Some(value) = self.enum_member(enum_name, member) {
                        return Ok(value);
                    }
                }
                Ok(Value::Text(words.join(" ")))
            }

            Expr::Template { parts, .. } => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        TemplatePart::Literal(text) => out.push_str(text),
                        TemplatePart::Expr(expr) => {
                            out.push_str(&self.eval_expr(expr, env)?.to_string())
                        }
                    }
                }
                Ok(Value::Text(out))
            }

            /* ----------------------------------------------------------
             * Operators
             * ---------------------------------------------------------- */
            Expr::Negate { operand, line } => {
                let value = self.eval_expr(operand, env)?;
                match value {
                    Value::Number(n) => Ok(Value::Number(-n)),
                    other => Err(RuntimeError::at(*line, format!("Cannot negate '{}'.", other))),
                }
            }

            Expr::Binary {
                left,
                op,
                right,
                line,
            } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.apply_op(*op, left, right, *line)
            }

            Expr::Contains {
                haystack,
                needle,
                line,
            } => {
                let haystack = self.eval_expr(haystack, env)?;
                let needle = self.eval_expr(needle, env)?;
                match &haystack {
                    Value::Text(text) => Ok(Value::Bool(text.contains(&needle.to_string()))),
                    Value::List(items) => Ok(Value::Bool(read(items).contains(&needle))),
                    _ => Err(RuntimeError::at(*line, "'contains' needs a list or text.")),
                }
            }

            Expr::Convert { expr, target, line } => {
                let value = self.eval_expr(expr, env)?;
                match target {
                    Conversion::Number => as_number(value, *line),
                    Conversion::Text => Ok(Value::Text(value.to_string())),
                }
            }

            /* ----------------------------------------------------------
             * Collections
             * ---------------------------------------------------------- */
            Expr::List { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expr(element, env)?);
                }
                Ok(Value::list(items))
            }

            Expr::Dict { pairs, line } => {
                let mut dict = Dict::new();
                for (key, value) in pairs {
                    let key = self.eval_expr(key, env)?;
                    let value = self.eval_expr(value, env)?;
                    if !key.is_hashable() {
                        return Err(RuntimeError::at(
                            *line,
                            "A list or dictionary cannot be used as a key.",
                        ));
                    }
                    dict.insert(key, value);
                }
                Ok(Value::dict(dict))
            }

            Expr::ListItem { list, index, line } => {
                let list = self.eval_expr(list, env)?;
                let index = self.eval_expr(index, env)?;
                let position = self.whole_number(&index, *line)?;
                let Value::List(items) = list else {
                    return Err(RuntimeError::at(*line, "Can only index into a list."));
                };
                let items = read(&items);
                if position < 1 || position as usize > items.len() {
                    return Err(RuntimeError::at(
                        *line,
                        format!(
                            "Index {} out of range (list has {} items).",
                            position,
                            items.len()
                        ),
                    ));
                }
                Ok(items[position as usize - 1].clone())
            }

            Expr::DictValue { dict, key, line } => {
                let Value::Dict(entries) = self.eval_expr(dict, env)? else {
                    return Err(RuntimeError::at(*line, "Can only get a value from a dictionary."));
                };
                let key = self.eval_expr(key, env)?;
                let found = read(&entries).get(&key).cloned();
                found.ok_or_else(|| {
                    RuntimeError::at(
                        *line,
                        format!("The dictionary does not have the key '{}'.", key),
                    )
                })
            }

            /* ----------------------------------------------------------
             * Builtins, objects and functions
             * ---------------------------------------------------------- */
            Expr::Builtin { func, args, line } => self.eval_builtin(*func, args, env, *line),

            Expr::NewInstance {
                class,
                fields,
                line,
            } => self.new_instance(class, fields, env, *line),

            Expr::Property { object, name, line } => self.get_property(object, name, env, *line),

            Expr::Lambda(decl) => Ok(Value::Function(Closure::new(
                Arc::clone(decl),
                Arc::clone(env),
            ))),

            Expr::Map {
                function,
                list,
                line,
            } => {
                let function = self.eval_expr(function, env)?;
                let Value::List(items) = self.eval_expr(list, env)? else {
                    return Err(RuntimeError::at(*line, "'mapping' requires a list."));
                };
                let items = read(&items).clone();
                let mut mapped = Vec::with_capacity(items.len());
                for item in items {
                    mapped.push(self.apply_callable(&function, vec![item], *line)?);
                }
                Ok(Value::list(mapped))
            }

            Expr::Filter {
                list,
                var,
                condition,
                line,
            } => self.filter_list(list, var, condition, env, *line),

            Expr::Wait { task, line } => match self.eval_expr(task, env)? {
                Value::Task(handle) => handle.wait(),
                _ => Err(RuntimeError::at(
                    *line,
                    "Cannot 'waiting for' something that is not an active background task.",
                )),
            },
        }
    }

    /// Variable, then global function, then the word itself.
    pub(crate) fn resolve_name(&self, name: &str, env: &ScopeRef) -> Value {
        if let Some(value) = env.get(name) {
            return value;
        }

        let function = self.definitions().functions.get(name).cloned();
        match function {
            Some(Callable::Declared(decl)) => {
                Value::Function(Closure::new(decl, self.global_scope()))
            }
            Some(Callable::Native(native)) => Value::Native(native),
            None => Value::Text(name.to_string()),
        }
    }

    /// `Color Red` style constant lookup.
    pub(crate) fn enum_member(&self, enum_name: &str, member: &str) -> Option<Value> {
        let defs = self.definitions();
        let values = defs.enums.get(enum_name)?;
        values
            .iter()
            .find(|v| v.as_str() == member)
            .map(|v| Value::Text(v.clone()))
    }

    fn filter_list(
        &self,
        list: &Expr,
        var: &str,
        condition: &Condition,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        let Value::List(items) = self.eval_expr(list, env)? else {
            return Err(RuntimeError::at(line, "'filtering' requires a list."));
        };

        let items = read(&items).clone();
        let mut kept = Vec::new();
        for item in items {
            let item_env = Scope::child(env);
            item_env.define(var, item.clone());
            if self.eval_condition(condition, &item_env)? {
                kept.push(item);
            }
        }
        Ok(Value::list(kept))
    }
}

/// `X as a number`: numbers pass through, text is parsed.
pub(crate) fn as_number(value: Value, line: usize) -> RuntimeResult<Value> {
    match value {
        Value::Number(_) => Ok(value),
        Value::Text(ref s) => match s.trim().parse::<f64>() {
            Ok(n) => Ok(Value::Number(n)),
            Err(_) => Err(cannot_convert(&value, line)),
        },
        Value::Bool(b) => Ok(Value::Number(if b { 1.0 } else { 0.0 })),
        other => Err(cannot_convert(&other, line)),
    }
}

fn cannot_convert(value: &Value, line: usize) -> RuntimeError {
    RuntimeError::at(
        line,
        format!(
            "I could not convert '{}' to a number. Please make sure it looks like a number.",
            value
        ),
    )
}
