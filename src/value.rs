/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     value.rs
 * Purpose:  Runtime values shared by the interpreter and native services.
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
use std::sync::{Arc, RwLock};

use crate::ast::FunctionDecl;
use crate::error::RuntimeResult;
use crate::interpreter::environment::ScopeRef;
use crate::interpreter::tasks::TaskHandle;
use crate::sync::read;

/// Shared, mutable list storage. Copies of a list value alias the same
/// elements.
pub type ListRef = Arc<RwLock<Vec<Value>>>;

/// Shared, mutable dictionary storage.
pub type DictRef = Arc<RwLock<Dict>>;

/// Signature of a host-provided callable.
pub type NativeFn = dyn Fn(Vec<Value>) -> RuntimeResult<Value> + Send + Sync;

/// Prose runtime value representation.
///
/// This is the core type that flows through the interpreter. Every
/// expression ultimately evaluates to one of these, and native services
/// receive and return them.
#[derive(Clone)]
pub enum Value {
    // Primitive scalars. Whole numbers are still `f64`; they only look
    // like integers when rendered.
    Number(f64),
    Text(String),
    Bool(bool),
    Nothing,

    // Collections, shared by reference
    List(ListRef),
    Dict(DictRef),

    // Callables
    Function(Closure),
    Native(NativeFunction),

    // Objects
    Instance(Arc<Instance>),

    /// A module-like scope produced by `Import ... as X` or registered by
    /// the host.
    Namespace(ScopeRef),

    /// Handle returned by an async call, consumed by `waiting for`.
    Task(TaskHandle),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(RwLock::new(items)))
    }

    pub fn dict(dict: Dict) -> Self {
        Value::Dict(Arc::new(RwLock::new(dict)))
    }

    /// English name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Nothing => "nothing",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Instance(_) => "object",
            Value::Namespace(_) => "module",
            Value::Task(_) => "task",
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Native(_))
    }

    /// Numeric view used by comparisons and loose equality.
    ///
    /// Booleans count as `1`/`0` and text is parsed after trimming. Lists,
    /// dictionaries and objects have no numeric value.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Truthiness for values used directly as conditions.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Nothing => false,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::List(items) => !read(items).is_empty(),
            Value::Dict(dict) => !read(dict).is_empty(),
            _ => true,
        }
    }

    /// Lists and dictionaries are mutable and cannot be dictionary keys.
    pub fn is_hashable(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Dict(_))
    }

    /// Parses user input the way `Ask` stores it: numbers when the text
    /// looks like one, otherwise the raw text.
    pub fn from_input(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if !raw.trim().is_empty() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Structural equality for scalars, lists and dictionaries; identity for
/// objects, callables, namespaces and tasks.
///
/// This is the equality used for dictionary keys, list membership and
/// `index of`. The language-level `is` / `equals` comparison is looser and
/// lives in the interpreter.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nothing, Value::Nothing) => true,
            (Value::List(a), Value::List(b)) => {
                Arc::ptr_eq(a, b) || *read(a) == *read(b)
            }
            (Value::Dict(a), Value::Dict(b)) => Arc::ptr_eq(a, b) || *read(a) == *read(b),
            (Value::Function(a), Value::Function(b)) => {
                Arc::ptr_eq(&a.decl, &b.decl) && Arc::ptr_eq(&a.scope, &b.scope)
            }
            (Value::Native(a), Value::Native(b)) => Arc::ptr_eq(&a.func, &b.func),
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            (Value::Namespace(a), Value::Namespace(b)) => Arc::ptr_eq(a, b),
            (Value::Task(a), Value::Task(b)) => a.same_task(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::Text(s) => write!(f, "Text({:?})", s),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Nothing => write!(f, "Nothing"),
            Value::List(items) => write!(f, "List({:?})", *read(items)),
            Value::Dict(dict) => write!(f, "Dict({:?})", *read(dict)),
            Value::Function(closure) => match &closure.decl.name {
                Some(name) => write!(f, "[Function {}]", name),
                None => write!(f, "[Function]"),
            },
            Value::Native(native) => write!(f, "[Native {}]", native.name),
            Value::Instance(instance) => write!(f, "[Instance {}]", instance.class_name),
            Value::Namespace(_) => write!(f, "[Namespace]"),
            Value::Task(_) => write!(f, "[Task]"),
        }
    }
}

/* --------------------------------------------------------------------------
 * Dictionaries
 * -------------------------------------------------------------------------- */

/// Insertion-ordered mapping with unique keys.
///
/// Prose dictionaries are small and keyed by arbitrary scalar values, so a
/// linear scan over a vector keeps both the order and the key equality
/// simple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    entries: Vec<(Value, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Text-keyed lookup, used for object-like dictionaries.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| matches!(k, Value::Text(s) if s == key))
            .map(|(_, v)| v)
    }

    /// Replaces the value of an existing key in place, keeping its
    /// position; new keys go to the end.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(Value, Value)> for Dict {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

/* --------------------------------------------------------------------------
 * Callables
 * -------------------------------------------------------------------------- */

/// A function or lambda paired with the scope it was created in.
///
/// The scope is held by reference, so a closure observes later changes to
/// the variables it captured.
#[derive(Clone)]
pub struct Closure {
    pub decl: Arc<FunctionDecl>,
    pub scope: ScopeRef,
}

impl Closure {
    pub fn new(decl: Arc<FunctionDecl>, scope: ScopeRef) -> Self {
        Self { decl, scope }
    }
}

/// A host function exposed to Prose programs.
///
/// Natives receive already-evaluated arguments and report failures as
/// [`crate::RuntimeError`]; the interpreter wraps those messages with the
/// call site.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    func: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: Vec<Value>) -> RuntimeResult<Value> {
        (self.func)(args)
    }
}

impl From<NativeFunction> for Value {
    fn from(native: NativeFunction) -> Self {
        Value::Native(native)
    }
}

/* --------------------------------------------------------------------------
 * Objects
 * -------------------------------------------------------------------------- */

/// A live object: its class name plus a flat property bag.
///
/// Instances do not point at their class definition. Methods are found by
/// name at call time, so redefining a class never touches existing objects.
pub struct Instance {
    pub class_name: String,
    properties: RwLock<Dict>,
}

impl Instance {
    pub fn new(class_name: impl Into<String>, properties: Dict) -> Self {
        Self {
            class_name: class_name.into(),
            properties: RwLock::new(properties),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        read(&self.properties).get_str(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        crate::sync::write(&self.properties).insert(Value::text(name), value);
    }

    /// Copy of the current property bag.
    pub fn snapshot(&self) -> Dict {
        read(&self.properties).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dict_keeps_insertion_order_and_replaces_in_place() {
        let mut dict = Dict::new();
        dict.insert(Value::text("b"), Value::Number(1.0));
        dict.insert(Value::text("a"), Value::Number(2.0));
        dict.insert(Value::text("b"), Value::Number(3.0));

        assert_eq!(dict.keys(), vec![Value::text("b"), Value::text("a")]);
        assert_eq!(dict.get(&Value::text("b")), Some(&Value::Number(3.0)));
    }

    #[test]
    fn dict_remove() {
        let mut dict: Dict = vec![(Value::text("x"), Value::Bool(true))]
            .into_iter()
            .collect();
        assert_eq!(dict.remove(&Value::text("x")), Some(Value::Bool(true)));
        assert!(dict.is_empty());
        assert_eq!(dict.remove(&Value::text("x")), None);
    }

    #[test]
    fn lists_compare_by_contents() {
        let a = Value::list(vec![Value::Number(1.0), Value::text("x")]);
        let b = Value::list(vec![Value::Number(1.0), Value::text("x")]);
        assert_eq!(a, b);
        assert_ne!(a, Value::list(Vec::new()));
    }

    #[test]
    fn instances_compare_by_identity() {
        let a = Value::Instance(Arc::new(Instance::new("Dog", Dict::new())));
        let b = Value::Instance(Arc::new(Instance::new("Dog", Dict::new())));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn number_coercion() {
        assert_eq!(Value::text(" 4.5 ").coerce_number(), Some(4.5));
        assert_eq!(Value::Bool(true).coerce_number(), Some(1.0));
        assert_eq!(Value::text("four").coerce_number(), None);
        assert_eq!(Value::Nothing.coerce_number(), None);
    }

    #[test]
    fn input_parsing() {
        assert_eq!(Value::from_input("42"), Value::Number(42.0));
        assert_eq!(Value::from_input("Ada"), Value::text("Ada"));
        assert_eq!(Value::from_input(""), Value::text(""));
    }

    #[test]
    fn instance_properties() {
        let dog = Instance::new("Dog", Dict::new());
        dog.set("name", Value::text("Rex"));
        assert_eq!(dog.get("name"), Some(Value::text("Rex")));
        assert_eq!(dog.get("age"), None);
    }
}
