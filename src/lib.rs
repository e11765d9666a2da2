/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:      lib.rs
 * Purpose:   Crate root. Wires the lexer, parser and interpreter together
 *            and re-exports the public embedding surface.
 *
 * Author:    Sam Wilcox
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

//! Prose is a small programming language whose statements read like English
//! sentences:
//!
//! ```text
//! Let x be 3 plus 4.
//! Say x.
//! ```
//!
//! The pipeline is strictly one-way:
//!
//! ```text
//! Source → tokenize → Tokens → parse → AST → Interpreter::execute
//! ```
//!
//! Hosts that want a one-shot run can call [`Interpreter::run_source`].

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod prototypes;
pub mod value;

mod sync;

pub use error::{ExecError, LexError, ParseError, ProseError, RuntimeError};
pub use interpreter::console::Console;
pub use interpreter::environment::{Scope, ScopeRef};
pub use interpreter::options::InterpreterOptions;
pub use interpreter::Interpreter;
pub use lexer::tokenize;
pub use parser::parse;
pub use value::{NativeFunction, Value};
