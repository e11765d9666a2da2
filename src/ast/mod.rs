/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     ast/mod.rs
 * Purpose:  Root module for the Prose abstract syntax tree.
 *
 * Nodes are built once by the parser and never mutated afterwards. Function,
 * class and test declarations are reference counted so the interpreter and
 * its async workers can share them without copying bodies.
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the PROSE programming language project.
 *
 * PROSE is dual-licensed under the terms of:
 *   - The MIT license
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

pub mod expr;
pub mod param;
pub mod stmt;

pub use expr::{
    BinaryOp, Builtin, Comparison, Condition, Connective, Conversion, Expr, TemplatePart,
    TypeName,
};
pub use param::{ClassDecl, FunctionBody, FunctionDecl, Param, TestDecl};
pub use stmt::{CallChain, ChainedCall, Stmt, WidgetDecl, WidgetKind, WindowEvent};
