/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     classes.rs
 * Purpose:  Definitions, objects, properties and method dispatch.
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

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::ast::{ClassDecl, Expr, FunctionDecl};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::environment::{Scope, ScopeRef};
use crate::interpreter::tasks::TaskHandle;
use crate::interpreter::{Callable, Interpreter};
use crate::sync::{read, write};
use crate::value::{Dict, Instance, Value};

impl Interpreter {
    /* ------------------------------------------------------------------
     * Definitions
     * ------------------------------------------------------------------ */

    pub(crate) fn define_function(&self, decl: &Arc<FunctionDecl>) {
        if let Some(name) = &decl.name {
            self.definitions_mut()
                .functions
                .insert(name.clone(), Callable::Declared(Arc::clone(decl)));
        }
    }

    pub(crate) fn define_class(&self, decl: &Arc<ClassDecl>) {
        let mut defs = self.definitions_mut();
        defs.classes.insert(decl.name.clone(), Arc::clone(decl));
        defs.methods.entry(decl.name.clone()).or_default();
    }

    pub(crate) fn define_method(&self, class: &str, decl: &Arc<FunctionDecl>) {
        if let Some(name) = &decl.name {
            self.definitions_mut()
                .methods
                .entry(class.to_string())
                .or_default()
                .insert(name.clone(), Arc::clone(decl));
        }
    }

    /* ------------------------------------------------------------------
     * Objects
     * ------------------------------------------------------------------ */

    /// `a new C with k: v, ...`
    ///
    /// # Behavior
    /// Property names are merged from the root ancestor down to `C`, all
    /// start as `nothing`, then the given fields overwrite them. A bare
    /// word before `:` is the property name itself.
    ///
    /// # Errors
    /// - `Class 'C' not found.`
    /// - `Parent class 'P' not found.`
    pub(crate) fn new_instance(
        &self,
        class: &str,
        fields: &[(Expr, Expr)],
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        let property_names = self.merged_properties(class, line)?;

        let mut properties = Dict::new();
        for name in property_names {
            properties.insert(Value::Text(name), Value::Nothing);
        }

        for (key, value) in fields {
            let key = match key {
                Expr::Identifier { name, .. } => name.clone(),
                other => self.eval_expr(other, env)?.to_string(),
            };
            let value = self.eval_expr(value, env)?;
            properties.insert(Value::Text(key), value);
        }

        Ok(Value::Instance(Arc::new(Instance::new(class, properties))))
    }

    /// Own and inherited property names, root ancestor first.
    fn merged_properties(&self, class: &str, line: usize) -> RuntimeResult<Vec<String>> {
        let defs = self.definitions();
        let mut current = defs
            .classes
            .get(class)
            .ok_or_else(|| RuntimeError::at(line, format!("Class '{}' not found.", class)))?;

        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        loop {
            if !seen.insert(current.name.clone()) {
                return Err(RuntimeError::at(
                    line,
                    format!("Class '{}' inherits from itself.", current.name),
                ));
            }
            chain.push(Arc::clone(current));
            match &current.parent {
                Some(parent) => {
                    current = defs.classes.get(parent).ok_or_else(|| {
                        RuntimeError::at(line, format!("Parent class '{}' not found.", parent))
                    })?;
                }
                None => break,
            }
        }

        let mut names: Vec<String> = Vec::new();
        for decl in chain.iter().rev() {
            for name in &decl.properties {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        Ok(names)
    }

    /// `the P of OBJ`
    ///
    /// `the Red of Color` also resolves enum constants when `Color` is not
    /// a variable.
    pub(crate) fn get_property(
        &self,
        object: &Expr,
        name: &str,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        if let Expr::Identifier { name: owner, .. } = object {
            if env.get(owner).is_none() {
                if let Some(member) = self.enum_member(owner, name) {
                    return Ok(member);
                }
            }
        }

        match self.eval_expr(object, env)? {
            Value::Instance(instance) => instance.get(name).ok_or_else(|| {
                RuntimeError::at(
                    line,
                    format!(
                        "Property '{}' not found on object of class '{}'.",
                        name, instance.class_name
                    ),
                )
            }),
            Value::Dict(dict) => {
                let found = read(&dict).get_str(name).cloned();
                found.ok_or_else(|| {
                    RuntimeError::at(line, format!("Key '{}' not found in dictionary.", name))
                })
            }
            Value::Namespace(scope) => scope.get(name).ok_or_else(|| {
                RuntimeError::at(line, format!("Export '{}' not found in namespace.", name))
            }),
            other => Err(RuntimeError::at(
                line,
                format!(
                    "Can only access properties on objects, modules or dictionaries (got {}).",
                    other.type_name()
                ),
            )),
        }
    }

    /// `Set the P of OBJ to V.`
    pub(crate) fn set_property(
        &self,
        object: &Expr,
        name: &str,
        value: &Expr,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<()> {
        let target = self.eval_expr(object, env)?;
        let value = self.eval_expr(value, env)?;
        match target {
            Value::Instance(instance) => instance.set(name, value),
            Value::Dict(dict) => write(&dict).insert(Value::text(name), value),
            _ => {
                return Err(RuntimeError::at(
                    line,
                    "Can only set properties on objects or dictionaries.",
                ))
            }
        }
        Ok(())
    }

    /* ------------------------------------------------------------------
     * Method dispatch
     * ------------------------------------------------------------------ */

    /// Calls `method` on an object or namespace.
    ///
    /// # Behavior
    /// - Namespace exports are called directly.
    /// - A native stored as an object property is called directly.
    /// - Otherwise the class chain is searched, most derived first.
    pub(crate) fn call_method(
        &self,
        target: &Value,
        method: &str,
        args: Vec<Value>,
        line: usize,
    ) -> RuntimeResult<Value> {
        match target {
            Value::Namespace(scope) => {
                let export = scope.get(method).ok_or_else(|| {
                    RuntimeError::at(line, format!("Function '{}' not found in namespace.", method))
                })?;
                match export {
                    Value::Native(native) => native.call(args).map_err(|e| {
                        RuntimeError::at(line, format!("Error calling '{}': {}", method, e.message))
                    }),
                    Value::Function(closure) => self.call_closure(&closure, method, args, line),
                    _ => Err(RuntimeError::at(
                        line,
                        format!("Export '{}' is not callable.", method),
                    )),
                }
            }
            Value::Instance(instance) => self.call_instance_method(instance, method, args, line),
            other => Err(RuntimeError::at(
                line,
                format!(
                    "Can only call methods on objects or modules (got {}).",
                    other.type_name()
                ),
            )),
        }
    }

    fn call_instance_method(
        &self,
        instance: &Arc<Instance>,
        method: &str,
        args: Vec<Value>,
        line: usize,
    ) -> RuntimeResult<Value> {
        if let Some(Value::Native(native)) = instance.get(method) {
            return native.call(args).map_err(|e| {
                RuntimeError::at(
                    line,
                    format!("Error calling method '{}': {}", method, e.message),
                )
            });
        }

        let class_name = instance.class_name.clone();
        let decl = self.find_method(&class_name, method).ok_or_else(|| {
            RuntimeError::at(
                line,
                format!("Method '{}' not found for class '{}'.", method, class_name),
            )
        })?;

        if !decl.accepts(args.len()) {
            return Err(RuntimeError::at(
                line,
                format!(
                    "Method '{}' expects {} parameters but got {}.",
                    method,
                    decl.arity_label(),
                    args.len()
                ),
            ));
        }

        debug!(class = %class_name, method, "calling method");

        // Properties are copied in; only `Set the P of self` writes back.
        let globals = self.global_scope();
        let method_env = Scope::child(&globals);
        method_env.define("self", Value::Instance(Arc::clone(instance)));
        for (key, value) in instance.snapshot().iter() {
            method_env.define(&key.to_string(), value.clone());
        }
        self.bind_params(&decl, args, &method_env, &globals)?;

        let frame = format!("method '{}' on class '{}' at line {}", method, class_name, line);

        if decl.is_async {
            let worker = self.worker();
            let handle = TaskHandle::spawn(format!("{}.{}", class_name, method), move || {
                worker
                    .run_body(&decl, &method_env, line)
                    .map_err(|e| e.with_frame(frame))
            })?;
            return Ok(Value::Task(handle));
        }

        self.run_body(&decl, &method_env, line)
            .map_err(|e| e.with_frame(frame))
    }

    /// Walks the class chain for `method`. A chain that loops back on
    /// itself ends the search.
    fn find_method(&self, class: &str, method: &str) -> Option<Arc<FunctionDecl>> {
        let defs = self.definitions();
        let mut seen = HashSet::new();
        let mut current = Some(class.to_string());

        while let Some(name) = current {
            if !seen.insert(name.clone()) {
                return None;
            }
            if let Some(found) = defs.methods.get(&name).and_then(|m| m.get(method)) {
                return Some(Arc::clone(found));
            }
            current = defs.classes.get(&name).and_then(|c| c.parent.clone());
        }
        None
    }
}
