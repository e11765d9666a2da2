/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     expr.rs
 * Purpose:  Expression and condition nodes.
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

use crate::ast::FunctionDecl;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /* ------------------------------------------------------------------
     * Literals
     * ------------------------------------------------------------------ */
    Number(f64),
    Text(String),
    Bool(bool),

    /// `nothing` / `empty`
    Nothing,

    /* ------------------------------------------------------------------
     * Names
     * ------------------------------------------------------------------ */
    /// A single word. Resolves to a variable, then a defined function, and
    /// finally to its own spelling as text.
    Identifier { name: String, line: usize },

    /// Several bare words collected greedily: `hello there world`.
    ///
    /// Evaluates to the words joined by single spaces, except that a two
    /// word phrase `Enum Value` naming a defined enum constant yields the
    /// constant.
    Phrase { words: Vec<String>, line: usize },

    /// `"Hello, {name}!"`
    Template { parts: Vec<TemplatePart>, line: usize },

    /* ------------------------------------------------------------------
     * Operators
     * ------------------------------------------------------------------ */
    Negate { operand: Box<Expr>, line: usize },

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        line: usize,
    },

    /// `X contains Y` on a list or text.
    Contains {
        haystack: Box<Expr>,
        needle: Box<Expr>,
        line: usize,
    },

    /// `X as a number`, `X as text`, or the prefix forms.
    Convert {
        expr: Box<Expr>,
        target: Conversion,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Collections
     * ------------------------------------------------------------------ */
    List { elements: Vec<Expr>, line: usize },

    Dict { pairs: Vec<(Expr, Expr)>, line: usize },

    /// `item N of LIST` (1-based).
    ListItem {
        list: Box<Expr>,
        index: Box<Expr>,
        line: usize,
    },

    /// `the value for K in D`
    DictValue {
        dict: Box<Expr>,
        key: Box<Expr>,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Built-in operations
     * ------------------------------------------------------------------ */
    Builtin {
        func: Builtin,
        args: Vec<Expr>,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Objects and functions
     * ------------------------------------------------------------------ */
    /// `a new C with name: "Rex", age: 3`
    NewInstance {
        class: String,
        fields: Vec<(Expr, Expr)>,
        line: usize,
    },

    /// `the P of OBJ`
    Property {
        object: Box<Expr>,
        name: String,
        line: usize,
    },

    /// Inline function; captures the scope it is evaluated in.
    Lambda(Arc<FunctionDecl>),

    /// `the result of mapping F over L`
    Map {
        function: Box<Expr>,
        list: Box<Expr>,
        line: usize,
    },

    /// `the result of filtering L where COND` (variable `item`) and
    /// `all X in L where COND`.
    Filter {
        list: Box<Expr>,
        var: String,
        condition: Box<Condition>,
        line: usize,
    },

    /// `waiting for TASK`
    Wait { task: Box<Expr>, line: usize },
}

impl Expr {
    /// Source line, or 0 for bare literals that do not record one.
    pub fn line(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Text(_) | Expr::Bool(_) | Expr::Nothing => 0,
            Expr::Lambda(decl) => decl.line,
            Expr::Identifier { line, .. }
            | Expr::Phrase { line, .. }
            | Expr::Template { line, .. }
            | Expr::Negate { line, .. }
            | Expr::Binary { line, .. }
            | Expr::Contains { line, .. }
            | Expr::Convert { line, .. }
            | Expr::List { line, .. }
            | Expr::Dict { line, .. }
            | Expr::ListItem { line, .. }
            | Expr::DictValue { line, .. }
            | Expr::Builtin { line, .. }
            | Expr::NewInstance { line, .. }
            | Expr::Property { line, .. }
            | Expr::Map { line, .. }
            | Expr::Filter { line, .. }
            | Expr::Wait { line, .. } => *line,
        }
    }

    /// True for expressions that already produce a boolean and may stand
    /// alone as a condition.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Expr::Contains { .. } | Expr::Bool(_))
    }

    pub fn identifier(name: impl Into<String>, line: usize) -> Self {
        Expr::Identifier {
            name: name.into(),
            line,
        }
    }
}

/// A piece of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
}

impl BinaryOp {
    /// The spelled-out operator, as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "plus",
            BinaryOp::Minus => "minus",
            BinaryOp::Times => "times",
            BinaryOp::Divide => "divided_by",
            BinaryOp::Modulo => "modulo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Number,
    Text,
}

/// Keyword-introduced operations evaluated by the interpreter's builtin
/// table. Argument order follows the order the operands appear in the
/// sentence unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /* ---- text ---- */
    Uppercase,
    Lowercase,
    Trim,
    /// `split TEXT by DELIM`
    Split,
    /// `join LIST with SEP`
    Join,
    /// `replace FIND in TEXT with REPL`, args `[text, find, repl]`
    Replace,
    /// `repeat TEXT N times`
    RepeatText,
    /// `index of X in LIST`, args `[item, haystack]`
    IndexOf,
    /// `substring of TEXT from A to B` (1-based, inclusive)
    Substring,
    /// `character N of TEXT`, args `[text, index]`
    CharacterAt,
    Length,
    Keys,

    /* ---- math ---- */
    /// `round X [to N places]`, one or two args
    Round,
    Absolute,
    SquareRoot,
    Floor,
    Ceiling,
    Random,
    Minimum,
    Maximum,
    Power,

    /* ---- services ---- */
    JsonParse,
    JsonStringify,
    HttpGet,
    /// `the result of posting payload P to url U`, args `[url, payload]`
    HttpPost,
    /// `the result of matching pattern P in T`, args `[pattern, text]`
    RegexMatch,
    FileContents,
    EnvironmentVariable,
    CommandLineArguments,
    CurrentDateTime,
    CurrentYear,
    CurrentTimestamp,
}

impl Builtin {
    /// Name used when an operand has the wrong kind.
    pub fn label(&self) -> &'static str {
        match self {
            Builtin::Uppercase => "uppercase",
            Builtin::Lowercase => "lowercase",
            Builtin::Trim => "trim",
            Builtin::Split => "split",
            Builtin::Join => "join",
            Builtin::Replace => "replace",
            Builtin::RepeatText => "repeat",
            Builtin::IndexOf => "index of",
            Builtin::Substring => "substring",
            Builtin::CharacterAt => "character",
            Builtin::Length => "length",
            Builtin::Keys => "keys",
            Builtin::Round => "round",
            Builtin::Absolute => "absolute value",
            Builtin::SquareRoot => "square root",
            Builtin::Floor => "floor",
            Builtin::Ceiling => "ceiling",
            Builtin::Random => "random",
            Builtin::Minimum => "minimum",
            Builtin::Maximum => "maximum",
            Builtin::Power => "power",
            Builtin::JsonParse => "json",
            Builtin::JsonStringify => "json",
            Builtin::HttpGet => "fetching",
            Builtin::HttpPost => "posting",
            Builtin::RegexMatch => "matching",
            Builtin::FileContents => "contents",
            Builtin::EnvironmentVariable => "environment variable",
            Builtin::CommandLineArguments => "command line arguments",
            Builtin::CurrentDateTime => "current date and time",
            Builtin::CurrentYear => "current year",
            Builtin::CurrentTimestamp => "current timestamp",
        }
    }
}

/* ======================================================================
 * Conditions
 * ====================================================================== */

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `A and B or C` folds left: `((A and B) or C)`.
    Compound {
        left: Box<Condition>,
        connective: Connective,
        right: Box<Condition>,
    },

    /// `file F exists`
    FileExists { path: Expr, line: usize },

    Compare {
        left: Expr,
        op: Comparison,
        right: Expr,
        line: usize,
    },

    /// `X is a number`
    TypeCheck {
        expr: Expr,
        kind: TypeName,
        line: usize,
    },

    /// A boolean-valued expression with no comparison: `names contains "Bo"`.
    Truthy { expr: Expr, line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Equal,
    NotEqual,
    /// `D has the key K`
    HasKey,
    /// `T has the pattern P`
    Matches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Number,
    Text,
    List,
    Boolean,
}

impl TypeName {
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "number" => Some(TypeName::Number),
            "text" => Some(TypeName::Text),
            "list" => Some(TypeName::List),
            "boolean" => Some(TypeName::Boolean),
            _ => None,
        }
    }
}
