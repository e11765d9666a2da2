/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     gui.rs
 * Purpose:  Window, widget and event sentences.
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

use crate::ast::{Expr, FunctionBody, FunctionDecl, Stmt, WidgetDecl, WidgetKind, WindowEvent};
use crate::error::ParseResult;
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// `Create a window called W with title T and size X by Y.`
    pub fn create_window_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_phrase(&["a", "window", "called"])?;
        let name = self.expect_name(line, "Expected a window name after 'called'.")?;
        self.expect_phrase(&["with", "title"])?;
        let title = self.factor()?;
        self.expect_phrase(&["and", "size"])?;
        let width = self.factor()?;
        self.expect_word("by")?;
        let height = self.factor()?;
        self.expect_period()?;

        Ok(Stmt::CreateWindow {
            name,
            title,
            width,
            height,
            line,
        })
    }

    /// The rest of `Add a button|label|input ...`; `Add a` is consumed.
    ///
    /// ```text
    /// Add a button "7" called seven to calc at row 1 column 0 that does the following.
    ///     ...
    /// End button.
    /// Add a label "Result" to calc.
    /// Add an input called display to calc at row 0 column 0 spanning 4 columns.
    /// ```
    pub fn add_widget_statement(&mut self, line: usize) -> ParseResult<Stmt> {
        let kind = match self.advance().keyword().as_str() {
            "button" => WidgetKind::Button,
            "label" => WidgetKind::Label,
            _ => WidgetKind::Input,
        };

        let mut label = None;
        let mut name = None;

        if kind != WidgetKind::Input {
            label = Some(self.factor()?);
        }
        if self.match_word("called") {
            name = Some(self.expect_name(line, "Expected a widget name after 'called'.")?);
        }

        self.expect_word("to")?;
        let window = self.expect_name(line, "Expected a window name after 'to'.")?;

        let (mut row, mut column, mut span) = (None, None, None);
        if self.match_word("at") {
            self.expect_word("row")?;
            row = Some(self.grid_operand());
            self.expect_word("column")?;
            column = Some(self.grid_operand());
            if self.match_word("spanning") {
                span = Some(self.grid_operand());
                self.match_any(&["columns", "column"]);
            }
        }

        let mut callback = None;
        if kind == WidgetKind::Button && self.match_word("that") {
            self.expect_word("does")?;
            self.expect_block_opener_after_does()?;
            let body = self.block(&["end"])?;
            self.expect_block_end("button")?;
            callback = Some(Arc::new(FunctionDecl {
                name: None,
                params: Vec::new(),
                body: FunctionBody::Block(body),
                is_async: false,
                line,
            }));
        } else {
            self.expect_period()?;
        }

        Ok(Stmt::AddWidget(Box::new(WidgetDecl {
            kind,
            window,
            label,
            name,
            row,
            column,
            span,
            callback,
            line,
        })))
    }

    /// `When user presses KEY [on W]`, `When window closes`, `When W changes`.
    pub fn when_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let mut widget = None;

        let event = if self.match_word("user") {
            self.expect_word("presses")?;
            let key = self.advance().keyword();
            if self.match_word("on") {
                widget = Some(self.advance().lexeme);
            }
            WindowEvent::KeyPress(key)
        } else if self.match_word("window") {
            self.expect_word("closes")?;
            WindowEvent::Close
        } else {
            widget = Some(self.advance().lexeme);
            self.expect_word("changes")?;
            WindowEvent::Change
        };

        self.expect_block_opener()?;
        let body = self.block(&["end"])?;
        self.expect_block_end("when")?;

        Ok(Stmt::When {
            event,
            widget,
            body,
            line,
        })
    }

    /// Grid positions are a single number or variable; a full expression
    /// would swallow the `column` keyword.
    fn grid_operand(&mut self) -> Expr {
        let token = self.advance();
        if token.kind == TokenKind::Number {
            if let Ok(n) = token.lexeme.parse::<f64>() {
                return Expr::Number(n);
            }
        }
        Expr::identifier(token.lexeme, token.line)
    }

    fn expect_block_opener_after_does(&mut self) -> ParseResult<()> {
        self.expect_phrase(&["the", "following"])?;
        self.expect_period()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Stmt, WidgetKind, WindowEvent};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn program(source: &str) -> Vec<Stmt> {
        parse(tokenize(source).unwrap()).unwrap()
    }

    #[test]
    fn create_window() {
        let stmts = program("Create a window called calc with title \"Calc\" and size 300 by 400.");
        assert!(matches!(&stmts[0], Stmt::CreateWindow { name, .. } if name == "calc"));
    }

    #[test]
    fn button_with_position_and_callback() {
        let stmts = program(
            "Add a button \"7\" called seven to calc at row 1 column 0 spanning 2 columns that does the following.\n\
             Say pressed.\n\
             End button.",
        );
        match &stmts[0] {
            Stmt::AddWidget(widget) => {
                assert_eq!(widget.kind, WidgetKind::Button);
                assert_eq!(widget.window, "calc");
                assert_eq!(widget.name.as_deref(), Some("seven"));
                assert!(widget.row.is_some() && widget.column.is_some() && widget.span.is_some());
                assert!(widget.callback.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn input_without_label() {
        let stmts = program("Add an input called entry to calc.");
        match &stmts[0] {
            Stmt::AddWidget(widget) => {
                assert_eq!(widget.kind, WidgetKind::Input);
                assert!(widget.label.is_none());
                assert_eq!(widget.name.as_deref(), Some("entry"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn add_a_list_is_still_a_list_add() {
        let stmts = program("Add a list containing 1 to lists.");
        assert!(matches!(&stmts[0], Stmt::AddToList { list, .. } if list == "lists"));
    }

    #[test]
    fn when_events() {
        let stmts = program(
            "When user presses Enter on entry do the following.\nSay hi.\nEnd when.\n\
             When window closes do the following.\nSay bye.\nEnd when.\n\
             When entry changes do the following.\nSay typed.\nEnd when.",
        );
        assert!(matches!(&stmts[0], Stmt::When { event: WindowEvent::KeyPress(k), widget: Some(_), .. } if k == "enter"));
        assert!(matches!(&stmts[1], Stmt::When { event: WindowEvent::Close, widget: None, .. }));
        assert!(matches!(&stmts[2], Stmt::When { event: WindowEvent::Change, .. }));
    }
}
