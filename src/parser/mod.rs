/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Root module for the Prose recursive-descent parser.
 *
 * This module wires together all parser sub-modules, including:
 *   - Core parser control logic
 *   - Statement, definition and GUI sentence parsing
 *   - Arithmetic, builtin and condition expressions
 *   - String interpolation
 *   - Shared helper utilities
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(tokens)` entry point
pub mod parser;

/// Sentence-level parsing:
/// - Let / Say / Display / Ask
/// - If / Repeat / While / For each / Check
/// - list, dictionary, file, import and error statements
pub mod statements;

/// `Define a ...` sentences, parameter lists and inline functions.
pub mod definitions;

/// Window, widget and event sentences.
pub mod gui;

/// Arithmetic layering and greedy word collection:
/// - expr → term → factor
pub mod expressions;

/// Keyword-introduced builtins (`the length of`, `round`, `split` ...).
pub mod builtins;

/// Comparisons, type checks and `and` / `or` chains.
pub mod conditions;

/// `{expr}` spans inside quoted strings.
pub mod interpolation;

/// Words that end a greedily collected phrase.
pub mod keywords;

/// Shared parser helpers:
/// - word matching
/// - lookahead checks
/// - cursor save / restore for speculative parses
pub mod helpers;

/// Re-export the public parse entry point so callers can use:
/// `crate::parser::parse(...)`
pub use parser::{parse, Parser};
