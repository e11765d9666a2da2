/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     modules.rs
 * Purpose:  `Import` of host modules, built-in modules and source files.
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

use crate::ast::Expr;
use crate::error::{ExecError, RuntimeError, RuntimeResult};
use crate::interpreter::environment::ScopeRef;
use crate::interpreter::{namespace_from, Callable, Interpreter};
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::prototypes::{builtin_module, fs};
use crate::value::{Closure, Value};

/// Modules that only exist when a host registers them.
const HOST_ONLY_MODULES: [&str; 2] = ["gui", "database"];

impl Interpreter {
    /// `Import [{a, b} from] SOURCE [as ALIAS].`
    ///
    /// # Behavior
    /// `SOURCE` is looked up in this order:
    /// 1. a module registered by the host, bound as a namespace under its
    ///    own name unless an alias or name list says otherwise
    /// 2. a built-in module (`time`, `math`, `string`, `collections`),
    ///    whose functions join the global function table
    /// 3. a source file, resolved against the module search directory
    ///
    /// A file imported with an alias or a name list runs in its own
    /// sandbox; one imported bare runs straight into the global scope.
    pub(crate) fn exec_import(
        &self,
        source: &Expr,
        alias: Option<&str>,
        names: Option<&[String]>,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<()> {
        let target = self.eval_expr(source, env)?.to_string();
        debug!(module = %target, ?alias, ?names, "import");

        if let Some(builder) = self.host_module(&target) {
            let exports = namespace_from(builder());
            if alias.is_none() && names.is_none() {
                env.assign(&target, Value::Namespace(exports));
                return Ok(());
            }
            return bind_exports(exports, &target, alias, names, env, line);
        }

        if let Some(exports) = builtin_module(&target) {
            if alias.is_none() && names.is_none() {
                let mut defs = self.definitions_mut();
                for (name, value) in exports {
                    if let Value::Native(native) = value {
                        defs.functions.insert(name, Callable::Native(native));
                    }
                }
                return Ok(());
            }
            return bind_exports(namespace_from(exports), &target, alias, names, env, line);
        }

        if HOST_ONLY_MODULES.contains(&target.as_str()) {
            return Err(RuntimeError::at(
                line,
                format!(
                    "The '{}' module is not available. The host program has to register it first.",
                    target
                ),
            ));
        }

        self.import_file(&target, alias, names, env, line)
    }

    fn import_file(
        &self,
        path: &str,
        alias: Option<&str>,
        names: Option<&[String]>,
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<()> {
        let text = fs::read_text(&self.options.resolve_path(path)).map_err(|e| {
            RuntimeError::at(
                line,
                format!("Could not read file '{}' for import. ({})", path, e),
            )
        })?;

        let statements = tokenize(&text)
            .map_err(|e| e.to_string())
            .and_then(|tokens| parse(tokens).map_err(|e| e.to_string()))
            .map_err(|e| {
                RuntimeError::at(line, format!("Failed to understand '{}': {}", path, e))
            })?;

        if alias.is_none() && names.is_none() {
            let globals = self.global_scope();
            return module_outcome(self.execute(&statements, &globals));
        }

        let sandbox = self.sandbox();
        let module_globals = sandbox.global_scope();
        module_outcome(sandbox.execute(&statements, &module_globals))?;
        self.adopt_definitions(&sandbox, &module_globals);

        bind_exports(module_globals, path, alias, names, env, line)
    }

    /// Exposes a sandbox's functions and classes through its globals and
    /// copies its class, method and enum tables into this interpreter.
    ///
    /// Functions become closures over the module's globals so they keep
    /// seeing the module's own variables. Classes are exported by name.
    fn adopt_definitions(&self, sandbox: &Interpreter, module_globals: &ScopeRef) {
        let theirs = sandbox.definitions();

        for (name, callable) in &theirs.functions {
            let value = match callable {
                Callable::Declared(decl) => {
                    Value::Function(Closure::new(Arc::clone(decl), Arc::clone(module_globals)))
                }
                Callable::Native(native) => Value::Native(native.clone()),
            };
            module_globals.define(name, value);
        }

        let mut ours = self.definitions_mut();
        for (name, class) in &theirs.classes {
            module_globals.define(name, Value::text(name.as_str()));
            ours.classes.insert(name.clone(), Arc::clone(class));
        }
        for (class, methods) in &theirs.methods {
            let table = ours.methods.entry(class.clone()).or_default();
            for (name, method) in methods {
                table.insert(name.clone(), Arc::clone(method));
            }
        }
        for (name, values) in &theirs.enums {
            ours.enums.insert(name.clone(), values.clone());
        }
    }
}

/// `Stop loop.` at the top of a module just ends its initialisation.
fn module_outcome(result: Result<(), ExecError>) -> RuntimeResult<()> {
    match result {
        Ok(()) | Err(ExecError::Stop) | Err(ExecError::Skip) => Ok(()),
        Err(ExecError::Runtime(err)) => Err(err),
    }
}

fn bind_exports(
    exports: ScopeRef,
    source: &str,
    alias: Option<&str>,
    names: Option<&[String]>,
    env: &ScopeRef,
    line: usize,
) -> RuntimeResult<()> {
    if let Some(alias) = alias {
        env.assign(alias, Value::Namespace(exports));
        return Ok(());
    }

    for name in names.unwrap_or_default() {
        let value = exports.get(name).ok_or_else(|| {
            RuntimeError::at(
                line,
                format!(
                    "Cannot import '{}' because it was not found in '{}'.",
                    name, source
                ),
            )
        })?;
        env.assign(name, value);
    }
    Ok(())
}
