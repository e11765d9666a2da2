/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     stmt.rs
 * Purpose:  Statement nodes. Every Prose sentence parses to exactly one of
 *           these.
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

use crate::ast::{ClassDecl, Condition, Expr, FunctionDecl, TestDecl};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /* ------------------------------------------------------------------
     * Variables and output
     * ------------------------------------------------------------------ */
    /// `Let X be EXPR.`
    Let { name: String, value: Expr, line: usize },

    /// `Let X be the result of calling F ...`
    LetResult {
        name: String,
        call: CallChain,
        line: usize,
    },

    /// `Display EXPR.`
    Display { expr: Expr, line: usize },

    /// `Say PART, PART.` Parts are joined with single spaces.
    Say { parts: Vec<Expr>, line: usize },

    /// `Ask the user for X.`
    Ask { name: String, line: usize },

    /* ------------------------------------------------------------------
     * Control flow
     * ------------------------------------------------------------------ */
    If {
        condition: Condition,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
        line: usize,
    },

    Repeat {
        count: Expr,
        body: Vec<Stmt>,
        line: usize,
    },

    While {
        condition: Condition,
        body: Vec<Stmt>,
        line: usize,
    },

    /// `For each X in EXPR do the following.`
    ForEach {
        var: String,
        iterable: Expr,
        body: Vec<Stmt>,
        line: usize,
    },

    /// `For each X from A to B [step S] do the following.` Inclusive.
    ForRange {
        var: String,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
        line: usize,
    },

    GiveBack { value: Expr, line: usize },
    Stop { line: usize },
    Skip { line: usize },

    /// `Check EXPR. When V, ... Otherwise, ... End check.`
    Check {
        subject: Expr,
        cases: Vec<(Expr, Vec<Stmt>)>,
        otherwise: Vec<Stmt>,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Definitions
     * ------------------------------------------------------------------ */
    Function(Arc<FunctionDecl>),
    Class(Arc<ClassDecl>),

    /// `Define a method called M for C that ...`
    Method {
        class: String,
        decl: Arc<FunctionDecl>,
    },

    Enum {
        name: String,
        values: Vec<String>,
        line: usize,
    },

    /// `Call F ...`
    Call { call: CallChain, line: usize },

    /* ------------------------------------------------------------------
     * Lists, dictionaries and objects
     * ------------------------------------------------------------------ */
    AddToList {
        value: Expr,
        list: String,
        line: usize,
    },

    /// `Remove item N from LIST.` (1-based)
    RemoveFromList {
        index: Expr,
        list: String,
        line: usize,
    },

    Sort { list: String, line: usize },

    SetDictValue {
        dict: Expr,
        key: Expr,
        value: Expr,
        line: usize,
    },

    RemoveDictValue { dict: Expr, key: Expr, line: usize },

    /// `Set the P of OBJ to V.`
    SetProperty {
        object: Expr,
        name: String,
        value: Expr,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Files and modules
     * ------------------------------------------------------------------ */
    /// `Write X to file F.` / `Append X to file F.`
    WriteFile {
        content: Expr,
        path: Expr,
        append: bool,
        line: usize,
    },

    /// `Import [{a, b} from | functions from] SOURCE [as ALIAS].`
    Import {
        source: Expr,
        alias: Option<String>,
        names: Option<Vec<String>>,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Errors
     * ------------------------------------------------------------------ */
    Throw { message: Expr, line: usize },

    /// `Try the following. ... Handle error [and save it as V]. ... End try.`
    Try {
        body: Vec<Stmt>,
        error_var: String,
        handler: Vec<Stmt>,
        line: usize,
    },

    /// Like `Try`, but the handler also sees the call-stack trace.
    Attempt {
        body: Vec<Stmt>,
        error_var: String,
        handler: Vec<Stmt>,
        line: usize,
    },

    /* ------------------------------------------------------------------
     * Tests
     * ------------------------------------------------------------------ */
    Test(Arc<TestDecl>),
    Assert { condition: Condition, line: usize },
    RunTests { line: usize },

    /* ------------------------------------------------------------------
     * GUI
     * ------------------------------------------------------------------ */
    /// `Create a window called W with title T and size X by Y.`
    CreateWindow {
        name: String,
        title: Expr,
        width: Expr,
        height: Expr,
        line: usize,
    },

    AddWidget(Box<WidgetDecl>),

    /// `Run W.`
    RunWindow { window: Expr, line: usize },

    /// `When ... do the following. ... End when.`
    When {
        event: WindowEvent,
        widget: Option<String>,
        body: Vec<Stmt>,
        line: usize,
    },
}

impl Stmt {
    /// Short label used in trace output.
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Let { .. } => "let",
            Stmt::LetResult { .. } => "let-result",
            Stmt::Display { .. } => "display",
            Stmt::Say { .. } => "say",
            Stmt::Ask { .. } => "ask",
            Stmt::If { .. } => "if",
            Stmt::Repeat { .. } => "repeat",
            Stmt::While { .. } => "while",
            Stmt::ForEach { .. } => "for-each",
            Stmt::ForRange { .. } => "for-range",
            Stmt::GiveBack { .. } => "give-back",
            Stmt::Stop { .. } => "stop",
            Stmt::Skip { .. } => "skip",
            Stmt::Check { .. } => "check",
            Stmt::Function(_) => "function",
            Stmt::Class(_) => "class",
            Stmt::Method { .. } => "method",
            Stmt::Enum { .. } => "enum",
            Stmt::Call { .. } => "call",
            Stmt::AddToList { .. } => "add",
            Stmt::RemoveFromList { .. } => "remove",
            Stmt::Sort { .. } => "sort",
            Stmt::SetDictValue { .. } => "set-value",
            Stmt::RemoveDictValue { .. } => "remove-value",
            Stmt::SetProperty { .. } => "set-property",
            Stmt::WriteFile { .. } => "write",
            Stmt::Import { .. } => "import",
            Stmt::Throw { .. } => "throw",
            Stmt::Try { .. } => "try",
            Stmt::Attempt { .. } => "attempt",
            Stmt::Test(_) => "test",
            Stmt::Assert { .. } => "assert",
            Stmt::RunTests { .. } => "run-tests",
            Stmt::CreateWindow { .. } => "create-window",
            Stmt::AddWidget(_) => "add-widget",
            Stmt::RunWindow { .. } => "run-window",
            Stmt::When { .. } => "when",
        }
    }
}

/// A call plus any `then call` continuations applied to its result.
#[derive(Debug, Clone, PartialEq)]
pub struct CallChain {
    pub name: String,

    /// `on OBJ`: makes the first call a method call.
    pub receiver: Option<Expr>,

    pub args: Vec<Expr>,
    pub then: Vec<ChainedCall>,
}

/// `then call M [with ARGS]`
#[derive(Debug, Clone, PartialEq)]
pub struct ChainedCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Button,
    Label,
    Input,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Button => "button",
            WidgetKind::Label => "label",
            WidgetKind::Input => "input",
        }
    }
}

/// `Add a button "7" called seven to calc at row 1 column 0 that does ...`
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDecl {
    pub kind: WidgetKind,
    pub window: String,

    /// Button or label text. Inputs have none.
    pub label: Option<Expr>,

    /// Variable the widget is bound to.
    pub name: Option<String>,

    pub row: Option<Expr>,
    pub column: Option<Expr>,
    pub span: Option<Expr>,

    /// Inline `that does the following` body for buttons.
    pub callback: Option<Arc<FunctionDecl>>,

    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// `When user presses KEY`. Holds the lowercased key name.
    KeyPress(String),

    /// `When window closes`
    Close,

    /// `When V changes`
    Change,
}

impl WindowEvent {
    /// Event name handed to the host GUI module: `enter`, `escape`,
    /// `key:x`, `close` or `change`.
    pub fn name(&self) -> String {
        match self {
            WindowEvent::KeyPress(key) if key == "enter" || key == "escape" => key.clone(),
            WindowEvent::KeyPress(key) => format!("key:{}", key),
            WindowEvent::Close => "close".to_string(),
            WindowEvent::Change => "change".to_string(),
        }
    }
}
