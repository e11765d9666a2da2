/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     mod.rs
 * Purpose:  The tree-walking interpreter and its definition tables.
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

pub mod builtins;
pub mod calls;
pub mod classes;
pub mod conditions;
pub mod console;
pub mod display;
pub mod environment;
pub mod expressions;
pub mod gui;
pub mod modules;
pub mod operators;
pub mod options;
pub mod statements;
pub mod tasks;
pub mod testing;

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::ast::{ClassDecl, FunctionDecl, TestDecl};
use crate::error::ProseError;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::sync::{read, write};
use crate::value::{NativeFunction, Value};

use console::Console;
use environment::{Scope, ScopeRef};
use options::InterpreterOptions;

pub use statements::{ExecSignal, Flow};

/// Produces the exports of a host module each time it is imported.
pub type ModuleBuilder = Arc<dyn Fn() -> HashMap<String, Value> + Send + Sync>;

/// An entry in the global function table.
#[derive(Clone)]
pub enum Callable {
    /// `Define a function called ...`. Runs with the global scope as parent.
    Declared(Arc<FunctionDecl>),
    /// Registered by the host or a built-in module.
    Native(NativeFunction),
}

/// Named definitions collected while a program runs.
///
/// Functions, classes, methods and enums are looked up by name at use time,
/// so a later definition replaces an earlier one for every caller.
#[derive(Default)]
pub struct Definitions {
    pub functions: HashMap<String, Callable>,
    pub classes: HashMap<String, Arc<ClassDecl>>,
    /// Class name → method name → method.
    pub methods: HashMap<String, HashMap<String, Arc<FunctionDecl>>>,
    pub enums: HashMap<String, Vec<String>>,
    /// `Test` blocks in definition order, run by `Run all tests.`
    pub tests: Vec<Arc<TestDecl>>,
}

/// State shared by an interpreter and the workers it spawns.
struct Runtime {
    globals: ScopeRef,
    definitions: RwLock<Definitions>,
    modules: RwLock<HashMap<String, ModuleBuilder>>,
}

impl Runtime {
    fn new() -> Self {
        Self {
            globals: Scope::new_global(),
            definitions: RwLock::new(Definitions::default()),
            modules: RwLock::new(HashMap::new()),
        }
    }
}

/// Executes parsed Prose programs.
///
/// One interpreter keeps one global scope and one set of definition tables
/// for its whole life, so a REPL can feed it statement lists one at a time
/// and later entries see earlier definitions.
///
/// ```
/// let interp = prose::Interpreter::new().with_captured_output();
/// interp.run_source("Let x be 3 plus 4.\nSay x.").unwrap();
/// assert_eq!(interp.captured_output(), "7\n");
/// ```
pub struct Interpreter {
    runtime: Arc<Runtime>,
    console: Console,
    options: Arc<InterpreterOptions>,
    /// Module sandboxes leave their globals alone when dropped; the
    /// importing program may still hold them as a namespace.
    owns_globals: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            runtime: Arc::new(Runtime::new()),
            console: Console::stdio(),
            options: Arc::new(options),
            owns_globals: true,
        }
    }

    /// Sends program output to an in-memory buffer instead of stdout.
    pub fn with_captured_output(mut self) -> Self {
        self.console = Console::capturing();
        self
    }

    /// Answers `Ask` statements from `lines` instead of stdin.
    pub fn with_input_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let console = std::mem::replace(&mut self.console, Console::stdio());
        self.console = console.with_input_lines(lines);
        self
    }

    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Text printed so far by a capturing interpreter; empty for stdout.
    pub fn captured_output(&self) -> String {
        self.console.captured().unwrap_or_default()
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// The scope top-level statements run in.
    pub fn global_scope(&self) -> ScopeRef {
        Arc::clone(&self.runtime.globals)
    }

    /// Tokenizes, parses and executes `source` in the global scope.
    ///
    /// # Errors
    /// The first lexer, parser or runtime error. Nothing runs when the
    /// source does not parse.
    pub fn run_source(&self, source: &str) -> Result<(), ProseError> {
        let tokens = tokenize(source)?;
        let program = parse(tokens)?;
        let globals = self.global_scope();
        self.execute(&program, &globals)?;
        Ok(())
    }

    /* ------------------------------------------------------------------
     * Host registration
     * ------------------------------------------------------------------ */

    /// Binds `name` in the global scope to a namespace holding `exports`.
    ///
    /// Programs reach the exports with `Call f on name` and
    /// `the f of name`.
    pub fn register_namespace(&self, name: &str, exports: HashMap<String, Value>) {
        self.runtime
            .globals
            .define(name, Value::Namespace(namespace_from(exports)));
    }

    /// Makes `Import "name"` produce the namespace `builder` returns.
    pub fn register_module<F>(&self, name: &str, builder: F)
    where
        F: Fn() -> HashMap<String, Value> + Send + Sync + 'static,
    {
        write(&self.runtime.modules).insert(name.to_string(), Arc::new(builder));
    }

    /// Adds a native to the global function table, callable with
    /// `Call name with ...`.
    pub fn register_function(&self, name: &str, native: NativeFunction) {
        self.definitions_mut()
            .functions
            .insert(name.to_string(), Callable::Native(native));
    }

    /* ------------------------------------------------------------------
     * Internal plumbing
     * ------------------------------------------------------------------ */

    fn definitions(&self) -> RwLockReadGuard<'_, Definitions> {
        read(&self.runtime.definitions)
    }

    fn definitions_mut(&self) -> RwLockWriteGuard<'_, Definitions> {
        write(&self.runtime.definitions)
    }

    fn host_module(&self, name: &str) -> Option<ModuleBuilder> {
        read(&self.runtime.modules).get(name).cloned()
    }

    /// A second handle on the same runtime, for background tasks.
    fn worker(&self) -> Interpreter {
        Interpreter {
            runtime: Arc::clone(&self.runtime),
            console: self.console.clone(),
            options: Arc::clone(&self.options),
            owns_globals: self.owns_globals,
        }
    }

    /// A fresh runtime sharing only console, options and host modules.
    /// Imported files run in one of these.
    fn sandbox(&self) -> Interpreter {
        let runtime = Runtime::new();
        *write(&runtime.modules) = read(&self.runtime.modules).clone();

        debug!("created module sandbox");
        Interpreter {
            runtime: Arc::new(runtime),
            console: self.console.clone(),
            options: Arc::clone(&self.options),
            owns_globals: false,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        // Global closures point back at the global scope. The last handle
        // out empties it so those cycles are freed.
        if self.owns_globals && Arc::strong_count(&self.runtime) == 1 {
            self.runtime.globals.clear();
        }
    }
}

/// A detached scope holding `exports`.
pub(crate) fn namespace_from(exports: HashMap<String, Value>) -> ScopeRef {
    let scope = Scope::new_global();
    for (name, value) in exports {
        scope.define(&name, value);
    }
    scope
}
