/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     statements.rs
 * Purpose:  Statement execution and loop / return signalling.
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

use tracing::{trace, warn};

use crate::ast::{Condition, Expr, Stmt};
use crate::error::{ExecError, RuntimeError, RuntimeResult};
use crate::interpreter::conditions::loose_eq;
use crate::interpreter::environment::{Scope, ScopeRef};
use crate::interpreter::Interpreter;
use crate::prototypes::{array, fs};
use crate::sync::{read, write};
use crate::value::{ListRef, Value};

/// Non-local exits unwinding through statement execution.
///
/// `Error` is the only one `Try` and `Attempt` catch. `Stop` and `Skip`
/// end at the nearest loop and `Return` at the nearest call.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecSignal {
    Error(RuntimeError),
    Stop,
    Skip,
    Return(Value),
}

impl From<RuntimeError> for ExecSignal {
    fn from(err: RuntimeError) -> Self {
        ExecSignal::Error(err)
    }
}

/// Outcome of running a statement or block.
pub type Flow<T> = Result<T, ExecSignal>;

/// What a loop does after one iteration of its body.
enum LoopStep {
    Continue,
    Break,
}

impl Interpreter {
    /// Runs `statements` in order in `env`.
    ///
    /// A top-level `Give back` simply ends the run. Stop/Skip signals that
    /// escaped every loop come back as [`ExecError::Stop`] /
    /// [`ExecError::Skip`].
    pub fn execute(&self, statements: &[Stmt], env: &ScopeRef) -> Result<(), ExecError> {
        match self.execute_block(statements, env) {
            Ok(()) | Err(ExecSignal::Return(_)) => Ok(()),
            Err(ExecSignal::Error(err)) => Err(ExecError::Runtime(err)),
            Err(ExecSignal::Stop) => {
                warn!("'Stop loop.' used outside of a loop");
                Err(ExecError::Stop)
            }
            Err(ExecSignal::Skip) => {
                warn!("'Skip to next.' used outside of a loop");
                Err(ExecError::Skip)
            }
        }
    }

    pub(crate) fn execute_block(&self, statements: &[Stmt], env: &ScopeRef) -> Flow<()> {
        for stmt in statements {
            self.exec_stmt(stmt, env)?;
        }
        Ok(())
    }

    fn exec_stmt(&self, stmt: &Stmt, env: &ScopeRef) -> Flow<()> {
        trace!(kind = stmt.kind(), "executing statement");

        match stmt {
            /* ----------------------------------------------------------
             * Variables and output
             * ---------------------------------------------------------- */
            Stmt::Let { name, value, .. } => {
                let value = self.eval_expr(value, env)?;
                env.assign(name, value);
            }

            Stmt::LetResult { name, call, line } => {
                let value = self.call_chain(call, env, *line)?;
                env.assign(name, value);
            }

            Stmt::Display { expr, .. } => {
                let value = self.eval_expr(expr, env)?;
                self.console.println(&value.to_string());
            }

            Stmt::Say { parts, .. } => self.exec_say(parts, env)?,

            Stmt::Ask { name, .. } => {
                self.console
                    .print(&format!("Please enter a value for {}: ", name));
                let raw = self.console.read_line().unwrap_or_default();
                env.assign(name, Value::from_input(&raw));
            }

            /* ----------------------------------------------------------
             * Control flow
             * ---------------------------------------------------------- */
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.eval_condition(condition, env)? {
                    self.execute_block(then_branch, &Scope::child(env))?;
                } else if !else_branch.is_empty() {
                    self.execute_block(else_branch, &Scope::child(env))?;
                }
            }

            Stmt::Repeat { count, body, line } => self.exec_repeat(count, body, env, *line)?,

            Stmt::While {
                condition,
                body,
                line,
            } => self.exec_while(condition, body, env, *line)?,

            Stmt::ForEach {
                var,
                iterable,
                body,
                line,
            } => self.exec_for_each(var, iterable, body, env, *line)?,

            Stmt::ForRange {
                var,
                start,
                end,
                step,
                body,
                line,
            } => self.exec_for_range(var, start, end, step.as_ref(), body, env, *line)?,

            Stmt::GiveBack { value, .. } => {
                let value = self.eval_expr(value, env)?;
                return Err(ExecSignal::Return(value));
            }

            Stmt::Stop { .. } => return Err(ExecSignal::Stop),
            Stmt::Skip { .. } => return Err(ExecSignal::Skip),

            Stmt::Check {
                subject,
                cases,
                otherwise,
                ..
            } => {
                let subject = self.eval_expr(subject, env)?;
                for (case, body) in cases {
                    let case = self.eval_expr(case, env)?;
                    if loose_eq(&subject, &case) {
                        return self.execute_block(body, env);
                    }
                }
                self.execute_block(otherwise, env)?;
            }

            /* ----------------------------------------------------------
             * Definitions
             * ---------------------------------------------------------- */
            Stmt::Function(decl) => self.define_function(decl),
            Stmt::Class(decl) => self.define_class(decl),
            Stmt::Method { class, decl } => self.define_method(class, decl),

            Stmt::Enum { name, values, .. } => {
                self.definitions_mut()
                    .enums
                    .insert(name.clone(), values.clone());
            }

            Stmt::Call { call, line } => {
                self.call_chain(call, env, *line)?;
            }

            /* ----------------------------------------------------------
             * Lists, dictionaries and objects
             * ---------------------------------------------------------- */
            Stmt::AddToList { value, list, line } => {
                let items = self.named_list(list, env, *line)?;
                let value = self.eval_expr(value, env)?;
                write(&items).push(value);
            }

            Stmt::RemoveFromList { index, list, line } => {
                let items = self.named_list(list, env, *line)?;
                let index = self.eval_expr(index, env)?;
                let position = self.whole_number(&index, *line)?;
                let mut items = write(&items);
                if position < 1 || position as usize > items.len() {
                    return Err(RuntimeError::at(
                        *line,
                        format!(
                            "Item {} is out of range (list has {} items).",
                            position,
                            items.len()
                        ),
                    )
                    .into());
                }
                items.remove(position as usize - 1);
            }

            Stmt::Sort { list, line } => {
                let items = self.named_list(list, env, *line)?;
                array::sort_values(&mut write(&items));
            }

            Stmt::SetDictValue {
                dict,
                key,
                value,
                line,
            } => {
                let target = self.eval_expr(dict, env)?;
                let Value::Dict(entries) = target else {
                    return Err(
                        RuntimeError::at(*line, "Can only set a value in a dictionary.").into(),
                    );
                };
                let key = self.eval_expr(key, env)?;
                let value = self.eval_expr(value, env)?;
                if !key.is_hashable() {
                    return Err(RuntimeError::at(
                        *line,
                        "A list or dictionary cannot be used as a key.",
                    )
                    .into());
                }
                write(&entries).insert(key, value);
            }

            Stmt::RemoveDictValue { dict, key, line } => {
                let target = self.eval_expr(dict, env)?;
                let Value::Dict(entries) = target else {
                    return Err(RuntimeError::at(
                        *line,
                        "Can only remove a value from a dictionary.",
                    )
                    .into());
                };
                let key = self.eval_expr(key, env)?;
                write(&entries).remove(&key);
            }

            Stmt::SetProperty {
                object,
                name,
                value,
                line,
            } => self.set_property(object, name, value, env, *line)?,

            /* ----------------------------------------------------------
             * Files and modules
             * ---------------------------------------------------------- */
            Stmt::WriteFile {
                content,
                path,
                append,
                line,
            } => self.exec_write_file(content, path, *append, env, *line)?,

            Stmt::Import {
                source,
                alias,
                names,
                line,
            } => self.exec_import(source, alias.as_deref(), names.as_deref(), env, *line)?,

            /* ----------------------------------------------------------
             * Errors
             * ---------------------------------------------------------- */
            Stmt::Throw { message, line } => {
                let message = self.eval_expr(message, env)?;
                return Err(RuntimeError::at(*line, message.to_string()).into());
            }

            Stmt::Try {
                body,
                error_var,
                handler,
                ..
            } => match self.execute_block(body, &Scope::child(env)) {
                Err(ExecSignal::Error(err)) => {
                    let handler_env = Scope::child(env);
                    handler_env.define(error_var, Value::Text(err.message));
                    self.execute_block(handler, &handler_env)?;
                }
                other => other?,
            },

            Stmt::Attempt {
                body,
                error_var,
                handler,
                ..
            } => match self.execute_block(body, &Scope::child(env)) {
                Err(ExecSignal::Error(err)) => {
                    let handler_env = Scope::child(env);
                    handler_env.define(error_var, Value::Text(err.traceback().trim().to_string()));
                    self.execute_block(handler, &handler_env)?;
                }
                other => other?,
            },

            /* ----------------------------------------------------------
             * Tests
             * ---------------------------------------------------------- */
            Stmt::Test(decl) => self.definitions_mut().tests.push(decl.clone()),

            Stmt::Assert { condition, line } => {
                if !self.eval_condition(condition, env)? {
                    return Err(RuntimeError::at(*line, "Assertion failed.").into());
                }
            }

            Stmt::RunTests { .. } => {
                self.run_all_tests();
            }

            /* ----------------------------------------------------------
             * GUI
             * ---------------------------------------------------------- */
            Stmt::CreateWindow {
                name,
                title,
                width,
                height,
                line,
            } => self.exec_create_window(name, title, width, height, env, *line)?,

            Stmt::AddWidget(widget) => self.exec_add_widget(widget, env)?,

            Stmt::RunWindow { window, line } => self.exec_run_window(window, env, *line)?,

            Stmt::When {
                event,
                widget,
                body,
                line,
            } => self.exec_when(event, widget.as_deref(), body, env, *line)?,
        }

        Ok(())
    }

    /* ------------------------------------------------------------------
     * Output
     * ------------------------------------------------------------------ */

    /// Renders each part and joins them with single spaces. A lone word
    /// that is not a variable prints as itself.
    fn exec_say(&self, parts: &[Expr], env: &ScopeRef) -> RuntimeResult<()> {
        let mut rendered = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Expr::Identifier { name, .. } => match self.eval_expr(part, env) {
                    Ok(value) => rendered.push(value.to_string()),
                    Err(_) => rendered.push(name.clone()),
                },
                _ => rendered.push(self.eval_expr(part, env)?.to_string()),
            }
        }
        self.console.println(&rendered.join(" "));
        Ok(())
    }

    /* ------------------------------------------------------------------
     * Loops
     * ------------------------------------------------------------------ */

    /// Runs one iteration and translates loop signals.
    fn loop_body(&self, body: &[Stmt], env: &ScopeRef) -> Flow<LoopStep> {
        match self.execute_block(body, env) {
            Ok(()) | Err(ExecSignal::Skip) => Ok(LoopStep::Continue),
            Err(ExecSignal::Stop) => Ok(LoopStep::Break),
            Err(other) => Err(other),
        }
    }

    fn exec_repeat(&self, count: &Expr, body: &[Stmt], env: &ScopeRef, line: usize) -> Flow<()> {
        let count = match self.eval_expr(count, env)? {
            Value::Number(n) => n,
            other => {
                return Err(RuntimeError::at(
                    line,
                    format!("Repeat needs a number, got '{}'.", other),
                )
                .into())
            }
        };

        let times = count.trunc().max(0.0) as u64;
        for _ in 0..times {
            if let LoopStep::Break = self.loop_body(body, &Scope::child(env))? {
                break;
            }
        }
        Ok(())
    }

    fn exec_while(
        &self,
        condition: &Condition,
        body: &[Stmt],
        env: &ScopeRef,
        line: usize,
    ) -> Flow<()> {
        let cap = self.options.max_while_iterations;
        let mut iterations: u64 = 0;

        while self.eval_condition(condition, env)? {
            iterations += 1;
            if iterations > cap {
                warn!(line, cap, "while loop hit the iteration cap");
                return Err(RuntimeError::at(
                    line,
                    "I have been repeating this loop for far too long. Please check your While condition.",
                )
                .into());
            }
            if let LoopStep::Break = self.loop_body(body, &Scope::child(env))? {
                break;
            }
        }
        Ok(())
    }

    /// Iterates a snapshot of a list, or the characters of a text.
    fn exec_for_each(
        &self,
        var: &str,
        iterable: &Expr,
        body: &[Stmt],
        env: &ScopeRef,
        line: usize,
    ) -> Flow<()> {
        let items: Vec<Value> = match self.eval_expr(iterable, env)? {
            Value::Text(text) => text.chars().map(|c| Value::Text(c.to_string())).collect(),
            Value::List(items) => read(&items).clone(),
            _ => {
                return Err(RuntimeError::at(
                    line,
                    "I can only use 'For each' on a list or text.",
                )
                .into())
            }
        };

        let loop_env = Scope::child(env);
        for item in items {
            loop_env.assign(var, item);
            if let LoopStep::Break = self.loop_body(body, &Scope::child(&loop_env))? {
                break;
            }
        }
        Ok(())
    }

    /// Inclusive numeric range in either direction.
    #[allow(clippy::too_many_arguments)]
    fn exec_for_range(
        &self,
        var: &str,
        start: &Expr,
        end: &Expr,
        step: Option<&Expr>,
        body: &[Stmt],
        env: &ScopeRef,
        line: usize,
    ) -> Flow<()> {
        let start = self.eval_expr(start, env)?;
        let start = self.whole_number(&start, line)?;
        let end = self.eval_expr(end, env)?;
        let end = self.whole_number(&end, line)?;
        let step = match step {
            Some(expr) => {
                let step = self.eval_expr(expr, env)?;
                self.whole_number(&step, line)?
            }
            None => 1,
        };

        if step == 0 {
            return Err(
                RuntimeError::at(line, "Error in range loop: the step cannot be zero.").into(),
            );
        }

        let mut i = start;
        while (step > 0 && i <= end) || (step < 0 && i >= end) {
            let iteration_env = Scope::child(env);
            iteration_env.define(var, Value::Number(i as f64));
            if let LoopStep::Break = self.loop_body(body, &iteration_env)? {
                break;
            }
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(())
    }

    /* ------------------------------------------------------------------
     * Helpers
     * ------------------------------------------------------------------ */

    /// Looks up a variable that must hold a list.
    fn named_list(&self, name: &str, env: &ScopeRef, line: usize) -> RuntimeResult<ListRef> {
        match env.lookup(name, line)? {
            Value::List(items) => Ok(items),
            _ => Err(RuntimeError::at(line, format!("'{}' is not a list.", name))),
        }
    }

    /// Truncates a numeric value (or numeric text) to an integer.
    pub(crate) fn whole_number(&self, value: &Value, line: usize) -> RuntimeResult<i64> {
        match value {
            Value::Number(n) if n.is_finite() => Ok(n.trunc() as i64),
            Value::Text(_) | Value::Bool(_) => match value.coerce_number() {
                Some(n) if n.is_finite() => Ok(n.trunc() as i64),
                _ => Err(not_a_whole_number(value, line)),
            },
            _ => Err(not_a_whole_number(value, line)),
        }
    }

    fn exec_write_file(
        &self,
        content: &Expr,
        path: &Expr,
        append: bool,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<()> {
        let content = self.eval_expr(content, env)?.to_string();
        let path = self.eval_expr(path, env)?.to_string();
        let resolved = self.options.resolve_path(&path);

        let result = fs::write_text(&resolved, &content, append);

        result.map_err(|e| {
            let verb = if append { "append to" } else { "write to" };
            RuntimeError::at(line, format!("Could not {} file '{}'. ({})", verb, path, e))
        })
    }
}

fn not_a_whole_number(value: &Value, line: usize) -> RuntimeError {
    RuntimeError::at(line, format!("I expected a whole number but got '{}'.", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_wrap_runtime_errors() {
        let signal: ExecSignal = RuntimeError::new("boom").into();
        assert!(matches!(signal, ExecSignal::Error(e) if e.message == "boom"));
    }

    #[test]
    fn whole_numbers_truncate_toward_zero() {
        let interp = Interpreter::new();
        assert_eq!(interp.whole_number(&Value::Number(2.7), 1).unwrap(), 2);
        assert_eq!(interp.whole_number(&Value::Number(-2.7), 1).unwrap(), -2);
        assert_eq!(interp.whole_number(&Value::text("4.5"), 1).unwrap(), 4);
        assert_eq!(
            interp.whole_number(&Value::Nothing, 3).unwrap_err().message,
            "Line 3: I expected a whole number but got 'nothing'."
        );
    }

    #[test]
    fn range_loops_stop_at_the_largest_integer() {
        let interp = Interpreter::new().with_captured_output();
        interp
            .run_source(
                "For each i from 9223372036854775807 to 9223372036854775807 do the following.\n\
                 Say done.\n\
                 End for.",
            )
            .unwrap();
        assert_eq!(interp.captured_output(), "done\n");
    }
}
