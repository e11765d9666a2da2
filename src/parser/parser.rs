/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * Core Recursive-Descent Parser Entry Point
 *
 * This file defines the primary `Parser` structure and the public `parse()`
 * driver function used to transform a token stream into the statement list
 * of a Prose program.
 *
 * The grammar itself is split across multiple modules:
 * - `statements.rs`   → One sentence shape per leading keyword
 * - `definitions.rs`  → Functions, classes, methods, enums, lambdas
 * - `expressions.rs`  → Arithmetic and word collection
 * - `builtins.rs`     → Keyword-prefixed builtin expressions
 * - `conditions.rs`   → Comparisons and compound conditions
 * - `helpers.rs`      → Token matching, consumption, and navigation utilities
 *
 * This file serves as the **root coordinator** of the parsing process.
 *
 * --------------------------------------------------------------------------
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

use tracing::debug;

use crate::ast::Stmt;
use crate::error::ParseResult;
use crate::lexer::token::{Token, TokenKind};

/// The core Prose recursive-descent parser.
///
/// This structure maintains:
/// - The full token stream produced by the lexer
/// - The current cursor position into that stream
///
/// The cursor never moves past the final `Eof` token, so lookahead at the
/// end of input keeps returning `Eof` instead of running off the stream.
pub struct Parser {
    /// Complete list of tokens to be parsed, ending in `Eof`.
    pub tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    pub current: usize,
}

/// Public entry point for the Prose parsing phase.
///
/// # Parameters
/// - `tokens`: The full token stream produced by the lexer
///
/// # Returns
/// Every top-level statement, in source order.
///
/// # Errors
/// The first grammar violation. No partial program is returned.
///
/// # Prose Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → AST → Interpreter
/// ```
pub fn parse(tokens: Vec<Token>) -> ParseResult<Vec<Stmt>> {
    let mut parser = Parser::new(tokens);
    let program = parser.parse()?;
    debug!(statements = program.len(), "parsed program");
    Ok(program)
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }

        Self { tokens, current: 0 }
    }

    /// Parses the entire token stream into a list of top-level statements.
    pub fn parse(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            stmts.push(self.statement()?);
        }

        Ok(stmts)
    }

    /// Parses statements until one of `terminators` (or end of input) is
    /// the current word. The terminator itself is left for the caller.
    pub fn block(&mut self, terminators: &[&str]) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();

        while !self.is_at_end() && !self.check_any(terminators) {
            stmts.push(self.statement()?);
        }

        Ok(stmts)
    }
}
