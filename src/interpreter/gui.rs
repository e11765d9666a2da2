/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     gui.rs
 * Purpose:  GUI statements, forwarded to the host's `gui` module.
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

//! The interpreter draws nothing itself. Every GUI statement becomes one
//! call on the `gui` namespace:
//!
//! | Statement                     | Call                                                          |
//! |-------------------------------|---------------------------------------------------------------|
//! | `Create a window called W...` | `create_window(title, width, height)`, result bound to `W`    |
//! | `Add a button ...`            | `add_widget(window, kind, label, row, column, span, callback)` |
//! | `Run W.`                      | `run_window(window)`                                          |
//! | `When ... End when.`          | `bind_event(event, widget, callback)`                         |
//!
//! Missing optional parts are passed as `nothing`. Callbacks are Prose
//! functions the host runs with [`Interpreter::call_value`].

use std::sync::Arc;

use tracing::debug;

use crate::ast::{Expr, FunctionBody, FunctionDecl, Stmt, WidgetDecl, WindowEvent};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::environment::ScopeRef;
use crate::interpreter::{namespace_from, Interpreter};
use crate::value::{Closure, Value};

impl Interpreter {
    pub(crate) fn exec_create_window(
        &self,
        name: &str,
        title: &Expr,
        width: &Expr,
        height: &Expr,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<()> {
        let title = self.eval_expr(title, env)?;
        let width = self.whole_number(&self.eval_expr(width, env)?, line)?;
        let height = self.whole_number(&self.eval_expr(height, env)?, line)?;

        let window = self.call_gui(
            "create_window",
            vec![title, Value::Number(width as f64), Value::Number(height as f64)],
            env,
            line,
        )?;
        env.assign(name, window);
        Ok(())
    }

    pub(crate) fn exec_add_widget(&self, widget: &WidgetDecl, env: &ScopeRef) -> RuntimeResult<()> {
        let line = widget.line;
        let window = env.lookup(&widget.window, line)?;

        let label = self.eval_optional(widget.label.as_ref(), env)?;
        let row = self.eval_optional(widget.row.as_ref(), env)?;
        let column = self.eval_optional(widget.column.as_ref(), env)?;
        let span = self.eval_optional(widget.span.as_ref(), env)?;
        let callback = match &widget.callback {
            Some(decl) => Value::Function(Closure::new(Arc::clone(decl), Arc::clone(env))),
            None => Value::Nothing,
        };

        let handle = self.call_gui(
            "add_widget",
            vec![
                window,
                Value::text(widget.kind.as_str()),
                label,
                row,
                column,
                span,
                callback,
            ],
            env,
            line,
        )?;

        if let Some(name) = &widget.name {
            env.assign(name, handle);
        }
        Ok(())
    }

    pub(crate) fn exec_run_window(&self, window: &Expr, env: &ScopeRef, line: usize) -> RuntimeResult<()> {
        let window = self.eval_expr(window, env)?;
        self.call_gui("run_window", vec![window], env, line)?;
        Ok(())
    }

    pub(crate) fn exec_when(
        &self,
        event: &WindowEvent,
        widget: Option<&str>,
        body: &[Stmt],
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<()> {
        let target = match widget {
            Some(name) => env.lookup(name, line)?,
            None => Value::Nothing,
        };

        let handler = FunctionDecl {
            name: None,
            params: Vec::new(),
            body: FunctionBody::Block(body.to_vec()),
            is_async: false,
            line,
        };
        let callback = Value::Function(Closure::new(Arc::new(handler), Arc::clone(env)));

        self.call_gui(
            "bind_event",
            vec![Value::Text(event.name()), target, callback],
            env,
            line,
        )?;
        Ok(())
    }

    fn eval_optional(&self, expr: Option<&Expr>, env: &ScopeRef) -> RuntimeResult<Value> {
        match expr {
            Some(expr) => self.eval_expr(expr, env),
            None => Ok(Value::Nothing),
        }
    }

    fn call_gui(
        &self,
        function: &str,
        args: Vec<Value>,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        let gui = self.gui_namespace(env, line)?;
        debug!(function, "gui call");
        self.call_method(&Value::Namespace(gui), function, args, line)
    }

    /// A `gui` namespace in scope, or one built from the host's `gui`
    /// module and kept in the globals for later statements.
    fn gui_namespace(&self, env: &ScopeRef, line: usize) -> RuntimeResult<ScopeRef> {
        if let Some(Value::Namespace(gui)) = env.get("gui") {
            return Ok(gui);
        }

        match self.host_module("gui") {
            Some(builder) => {
                let gui = namespace_from(builder());
                self.global_scope()
                    .define("gui", Value::Namespace(Arc::clone(&gui)));
                Ok(gui)
            }
            None => Err(RuntimeError::at(
                line,
                "GUI statements need a 'gui' module registered by the host.",
            )),
        }
    }
}
