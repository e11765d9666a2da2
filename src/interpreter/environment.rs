/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     environment.rs
 * Purpose:  Lexical scopes: name → value tables linked to a parent.
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

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::{RuntimeError, RuntimeResult};
use crate::sync::{read, write};
use crate::value::Value;

/// Shared handle to a scope. Closures, namespaces and child scopes all hold
/// one.
pub type ScopeRef = Arc<Scope>;

/// One level of the scope chain.
///
/// A scope is created for every block that runs: the program itself, each
/// `If` branch, each loop iteration, each call. Lookups and assignments walk
/// towards the global scope through `parent`.
pub struct Scope {
    values: RwLock<HashMap<String, Value>>,
    parent: Option<ScopeRef>,
}

impl Scope {
    /// A root scope with no parent.
    pub fn new_global() -> ScopeRef {
        Arc::new(Self {
            values: RwLock::new(HashMap::new()),
            parent: None,
        })
    }

    /// A fresh, empty scope whose lookups fall back to `parent`.
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Arc::new(Self {
            values: RwLock::new(HashMap::new()),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Finds `name` in this scope or the nearest ancestor that has it.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = read(&self.values).get(name) {
            return Some(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.get(name),
            None => None,
        }
    }

    /// [`Scope::get`], failing with the language's "not declared" message.
    pub fn lookup(&self, name: &str, line: usize) -> RuntimeResult<Value> {
        self.get(name).ok_or_else(|| {
            RuntimeError::at(
                line,
                format!(
                    "I could not find a variable called '{}'. Please make sure you have declared it before using it.",
                    name
                ),
            )
        })
    }

    /// Rebinds `name` wherever it already lives in the chain.
    ///
    /// A name no scope owns yet is created here, in the innermost scope.
    pub fn assign(&self, name: &str, value: Value) {
        if let Some(value) = self.assign_existing(name, value) {
            self.define(name, value);
        }
    }

    /// Hands the value back when no scope in the chain owns `name`.
    fn assign_existing(&self, name: &str, value: Value) -> Option<Value> {
        {
            let mut values = write(&self.values);
            if let Some(slot) = values.get_mut(name) {
                *slot = value;
                return None;
            }
        }

        match &self.parent {
            Some(parent) => parent.assign_existing(name, value),
            None => Some(value),
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn define(&self, name: &str, value: Value) {
        write(&self.values).insert(name.to_string(), value);
    }

    pub fn has_local(&self, name: &str) -> bool {
        read(&self.values).contains_key(name)
    }

    /// Names bound directly in this scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = read(&self.values).keys().cloned().collect();
        names.sort();
        names
    }

    /// Drops every local binding.
    ///
    /// Closures stored in the global scope point back at it; clearing breaks
    /// those cycles when an interpreter is discarded.
    pub fn clear(&self) {
        let drained: Vec<Value> = write(&self.values).drain().map(|(_, v)| v).collect();
        drop(drained);
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("names", &self.local_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_reads_outer_binding() {
        let global = Scope::new_global();
        global.define("x", Value::Number(1.0));
        let inner = Scope::child(&global);
        assert_eq!(inner.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn assign_rewrites_the_owning_scope() {
        let global = Scope::new_global();
        global.define("count", Value::Number(0.0));
        let inner = Scope::child(&Scope::child(&global));

        inner.assign("count", Value::Number(5.0));

        assert_eq!(global.get("count"), Some(Value::Number(5.0)));
        assert!(!inner.has_local("count"));
    }

    #[test]
    fn unseen_name_lands_in_the_innermost_scope() {
        let global = Scope::new_global();
        let inner = Scope::child(&global);

        inner.assign("fresh", Value::Bool(true));

        assert!(inner.has_local("fresh"));
        assert_eq!(global.get("fresh"), None);
    }

    #[test]
    fn define_shadows_without_touching_outer() {
        let global = Scope::new_global();
        global.define("x", Value::Number(1.0));
        let inner = Scope::child(&global);

        inner.define("x", Value::Number(2.0));

        assert_eq!(inner.get("x"), Some(Value::Number(2.0)));
        assert_eq!(global.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn lookup_reports_missing_variable() {
        let global = Scope::new_global();
        let err = global.lookup("ghost", 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 3: I could not find a variable called 'ghost'. Please make sure you have declared it before using it."
        );
    }

    #[test]
    fn clear_empties_the_scope() {
        let global = Scope::new_global();
        global.define("a", Value::Nothing);
        global.clear();
        assert!(global.local_names().is_empty());
    }
}
