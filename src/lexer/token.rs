/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Defines the lexical token types produced by the Prose lexer
 *            and consumed by the parser.
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

use std::fmt;

/// Represents the **category of a lexical token** in Prose.
///
/// Prose has no reserved words at the lexical level: `Let`, `if` and
/// `result` all arrive as [`TokenKind::Word`]. The parser decides what a
/// word means from its position in the sentence.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letters, digits and underscores, starting with a letter or `_`.
    Word,

    /// Digits with at most one embedded decimal point: `42`, `3.14`.
    Number,

    /// `,`
    Comma,

    /// `.` ends every statement.
    Period,

    /// `:` separates dictionary keys from values.
    Colon,

    /// `{`
    LeftBrace,

    /// `}`
    RightBrace,

    /// A double-quoted string with escapes already decoded.
    Text,

    /// A double-quoted string holding at least one `{expr}` span.
    ///
    /// The lexeme keeps `\{` and `\\` escaped so the parser can tell a
    /// literal brace from the start of an interpolation.
    Template,

    /// `+`
    Plus,

    /// `-`
    Minus,

    /// `*`
    Star,

    /// `/`
    Slash,

    /// `%`
    Percent,

    /// `=`
    Equal,

    /// `!=`
    NotEqual,

    /// `<`
    Less,

    /// `<=`
    LessEqual,

    /// `>`
    Greater,

    /// `>=`
    GreaterEqual,

    /// End-of-input marker. Always the final token.
    Eof,
}

/// A single classified unit of source text.
///
/// Tokens are produced once by the lexer and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,

    /// The literal text. Strings hold their decoded contents, `Eof` is empty.
    pub lexeme: String,

    /// 1-based source line the token starts on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// Case-insensitive keyword test. Only `Word` tokens can match.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.lexeme.eq_ignore_ascii_case(word)
    }

    /// Lowercased lexeme, used for keyword dispatch.
    pub fn keyword(&self) -> String {
        self.lexeme.to_lowercase()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
