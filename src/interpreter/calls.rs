/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     calls.rs
 * Purpose:  Function calls, call chains, parameters and async dispatch.
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

use tracing::debug;

use crate::ast::{CallChain, Expr, FunctionBody, FunctionDecl};
use crate::error::{ExecError, RuntimeError, RuntimeResult};
use crate::interpreter::environment::{Scope, ScopeRef};
use crate::interpreter::statements::ExecSignal;
use crate::interpreter::tasks::TaskHandle;
use crate::interpreter::{Callable, Interpreter};
use crate::value::{Closure, Value};

impl Interpreter {
    /// Runs `Call F [on OBJ] [with ARGS] then call M ...` and returns the
    /// value of the last call.
    ///
    /// # Errors
    /// - the first call fails
    /// - a `then call` is applied to `nothing`
    pub(crate) fn call_chain(
        &self,
        call: &CallChain,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        let mut current = match &call.receiver {
            Some(receiver) => {
                let target = self.eval_expr(receiver, env)?;
                let args = self.eval_args(&call.args, env)?;
                self.call_method(&target, &call.name, args, line)?
            }
            None => self.call_function(&call.name, &call.args, env, line)?,
        };

        for next in &call.then {
            if let Value::Nothing = current {
                return Err(RuntimeError::at(
                    next.line,
                    format!(
                        "Cannot call method '{}' on nothing (previous call returned nothing).",
                        next.name
                    ),
                ));
            }
            let args = self.eval_args(&next.args, env)?;
            current = self.call_method(&current, &next.name, args, next.line)?;
        }

        Ok(current)
    }

    pub(crate) fn eval_args(&self, args: &[Expr], env: &ScopeRef) -> RuntimeResult<Vec<Value>> {
        args.iter().map(|arg| self.eval_expr(arg, env)).collect()
    }

    /// Calls a function by name.
    ///
    /// # Behavior
    /// A variable holding a callable wins over a global function of the
    /// same name. Arguments are evaluated only after the callee is found.
    pub(crate) fn call_function(
        &self,
        name: &str,
        args: &[Expr],
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        let callee = match env.get(name) {
            Some(value) if value.is_callable() => value,
            _ => self.global_function(name).ok_or_else(|| {
                RuntimeError::at(line, format!("I could not find a function called '{}'.", name))
            })?,
        };

        let args = self.eval_args(args, env)?;
        debug!(function = name, args = args.len(), line, "calling function");
        self.invoke(&callee, name, args, line)
    }

    /// The global function table entry for `name` as a callable value.
    pub(crate) fn global_function(&self, name: &str) -> Option<Value> {
        let entry = self.definitions().functions.get(name).cloned()?;
        Some(match entry {
            Callable::Declared(decl) => Value::Function(Closure::new(decl, self.global_scope())),
            Callable::Native(native) => Value::Native(native),
        })
    }

    fn invoke(&self, callee: &Value, name: &str, args: Vec<Value>, line: usize) -> RuntimeResult<Value> {
        match callee {
            Value::Native(native) => native.call(args).map_err(|e| {
                RuntimeError::at(line, format!("Native function '{}' failed: {}", name, e.message))
            }),
            Value::Function(closure) => self.call_closure(closure, name, args, line),
            other => Err(RuntimeError::at(
                line,
                format!("'{}' is not a function (it is {}).", name, other),
            )),
        }
    }

    /// Calls a closure with already-evaluated arguments.
    ///
    /// # Parameters
    /// - `name`: what the caller called it, used when the closure is an
    ///   unnamed lambda
    ///
    /// # Behavior
    /// - Parameters bind in a fresh scope under the closure's own scope.
    /// - Missing trailing arguments take their defaults, evaluated in the
    ///   defining scope.
    /// - Async functions start a background task and return its handle.
    ///
    /// # Errors
    /// Arity mismatches and any error raised by the body, with this call
    /// added to its traceback.
    pub(crate) fn call_closure(
        &self,
        closure: &Closure,
        name: &str,
        args: Vec<Value>,
        line: usize,
    ) -> RuntimeResult<Value> {
        let decl = &closure.decl;
        if !decl.accepts(args.len()) {
            return Err(RuntimeError::at(
                line,
                format!(
                    "'{}' needs {} argument(s), but I was given {}.",
                    name,
                    decl.arity_label(),
                    args.len()
                ),
            ));
        }

        let call_env = Scope::child(&closure.scope);
        self.bind_params(decl, args, &call_env, &closure.scope)?;

        let label = decl.name.clone().unwrap_or_else(|| name.to_string());

        if decl.is_async {
            let worker = self.worker();
            let decl = Arc::clone(decl);
            let handle = TaskHandle::spawn(label, move || worker.run_body(&decl, &call_env, line))?;
            return Ok(Value::Task(handle));
        }

        self.run_body(decl, &call_env, line)
            .map_err(|e| e.with_frame(format!("function '{}' at line {}", label, line)))
    }

    /// Binds parameters positionally, filling gaps from defaults.
    pub(crate) fn bind_params(
        &self,
        decl: &FunctionDecl,
        args: Vec<Value>,
        call_env: &ScopeRef,
        defaults_env: &ScopeRef,
    ) -> RuntimeResult<()> {
        let mut args = args.into_iter();
        for param in &decl.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_expr(default, defaults_env)?,
                (None, None) => Value::Nothing,
            };
            call_env.define(&param.name, value);
        }
        Ok(())
    }

    /// Runs a function body to its result: the value of an expression
    /// body, the `Give back` value, or `nothing`.
    pub(crate) fn run_body(
        &self,
        decl: &FunctionDecl,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        match &decl.body {
            FunctionBody::Expression(expr) => self.eval_expr(expr, env),
            FunctionBody::Block(statements) => match self.execute_block(statements, env) {
                Ok(()) => Ok(Value::Nothing),
                Err(ExecSignal::Return(value)) => Ok(value),
                Err(ExecSignal::Error(err)) => Err(err),
                Err(ExecSignal::Stop) => Err(RuntimeError::at(line, ExecError::Stop.to_string())),
                Err(ExecSignal::Skip) => Err(RuntimeError::at(line, ExecError::Skip.to_string())),
            },
        }
    }

    /// Applies a callback such as the function given to `mapping`.
    ///
    /// Text names a global function, which lets `mapping double over xs`
    /// work before `double` is ever bound to a variable.
    pub(crate) fn apply_callable(
        &self,
        callee: &Value,
        args: Vec<Value>,
        line: usize,
    ) -> RuntimeResult<Value> {
        match callee {
            Value::Function(closure) => {
                let name = closure.decl.name.clone().unwrap_or_else(|| "function".to_string());
                self.call_closure(closure, &name, args, line)
            }
            Value::Native(native) => self.invoke(callee, native.name(), args, line),
            Value::Text(name) => match self.global_function(name) {
                Some(function) => self.invoke(&function, name, args, line),
                None => Err(RuntimeError::at(line, format!("Function '{}' not found.", name))),
            },
            _ => Err(RuntimeError::at(
                line,
                "Expected a function or lambda for mapping/filtering.",
            )),
        }
    }

    /// Calls a Prose callable from host code, for example a GUI callback
    /// handed to a native.
    ///
    /// ```
    /// use prose::{Interpreter, Value};
    ///
    /// let interp = Interpreter::new();
    /// interp
    ///     .run_source(
    ///         "Define a function called double that takes n and does the following.\n\
    ///          Give back n times 2.\n\
    ///          End function.",
    ///     )
    ///     .unwrap();
    ///
    /// let result = interp
    ///     .call_value(&Value::text("double"), vec![Value::Number(21.0)])
    ///     .unwrap();
    /// assert_eq!(result, Value::Number(42.0));
    /// ```
    pub fn call_value(&self, callee: &Value, args: Vec<Value>) -> RuntimeResult<Value> {
        self.apply_callable(callee, args, 0)
    }
}
