/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
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

use std::sync::Arc;

use crate::ast::{CallChain, ChainedCall, Expr, Stmt, TestDecl};
use crate::error::{ParseError, ParseResult};
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses a single sentence.
    ///
    /// This is the **main dispatcher** for all statement forms. Each leading
    /// keyword maps to exactly one sentence shape; a couple of keywords
    /// (`Add`, `Remove`, `Run`) peek one word further to choose between two.
    pub fn statement(&mut self) -> ParseResult<Stmt> {
        let token = self.peek().clone();

        if token.kind != TokenKind::Word {
            return Err(ParseError::new(
                token.line,
                format!(
                    "I expected a keyword to start a statement but found '{}'.",
                    token.lexeme
                ),
            ));
        }

        match token.keyword().as_str() {
            "let" => self.let_statement(),
            "display" => self.display_statement(),
            "say" => self.say_statement(),
            "ask" => self.ask_statement(),
            "if" => self.if_statement(),
            "repeat" => self.repeat_statement(),
            "while" => self.while_statement(),
            "for" => self.for_statement(),
            "define" => self.define_statement(),
            "call" => self.call_statement(),
            "give" => self.give_back_statement(),
            "add" => self.add_statement(),
            "remove" => {
                if self.peek_word_is(1, "the") {
                    self.remove_value_statement()
                } else {
                    self.remove_item_statement()
                }
            }
            "set" => self.set_statement(),
            "sort" => self.sort_statement(),
            "write" => self.write_file_statement(false),
            "append" => self.write_file_statement(true),
            "import" => self.import_statement(),
            "throw" => self.throw_statement(),
            "try" => self.try_statement(),
            "attempt" => self.attempt_statement(),
            "stop" => {
                self.advance();
                self.expect_word("loop")?;
                self.expect_period()?;
                Ok(Stmt::Stop { line: token.line })
            }
            "skip" => {
                self.advance();
                self.expect_phrase(&["to", "next"])?;
                self.expect_period()?;
                Ok(Stmt::Skip { line: token.line })
            }
            "check" => self.check_statement(),
            "test" => self.test_statement(),
            "assert" => self.assert_statement(),
            "run" => self.run_statement(),
            "create" => self.create_window_statement(),
            "when" => self.when_statement(),
            _ => Err(ParseError::new(
                token.line,
                format!(
                    "I do not understand the keyword '{}'. \u{1F4A1} Common keywords: Let, Say, \
                     If, While, Repeat, For, Define, Call, Add, Set, Remove, Write, Append, \
                     Import, Create, Run, When, Stop, Skip.",
                    token.lexeme
                ),
            )),
        }
    }

    /* ------------------------------------------------------------------
     * Variables and output
     * ------------------------------------------------------------------ */

    /// `Let X be EXPR.` or `Let X be the result of calling F ...`
    ///
    /// `the` is tried as the start of `the result of calling`; any other
    /// continuation is rolled back and parsed as an ordinary expression
    /// (`the length of ...`, `the age of rex`, a bare phrase).
    fn let_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let name = self.expect_name(line, "After 'Let' I expected a variable name.")?;
        self.expect_word("be")?;

        let saved = self.checkpoint();
        if self.match_word("the")
            && self.match_word("result")
            && self.match_word("of")
            && self.match_word("calling")
        {
            let call = self.call_chain(line, "Expected function name after 'calling'.")?;
            self.expect_period()?;
            return Ok(Stmt::LetResult { name, call, line });
        }
        self.rewind(saved);

        let value = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::Let { name, value, line })
    }

    fn display_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let expr = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::Display { expr, line })
    }

    fn say_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let mut parts = vec![self.say_part()?];

        while self.match_kind(TokenKind::Comma) {
            parts.push(self.say_part()?);
        }

        self.expect_period()?;
        Ok(Stmt::Say { parts, line })
    }

    /// One comma-delimited part of a `Say` sentence.
    ///
    /// Only unambiguous expression starters are parsed as expressions.
    /// Anything else is collected word by word up to the next comma or
    /// period, so `Say 3 plus 5 equals, total.` prints the label literally.
    fn say_part(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        let number_ends_part = |kind: TokenKind| {
            matches!(kind, TokenKind::Comma | TokenKind::Period | TokenKind::Eof)
        };
        if token.kind == TokenKind::Number && number_ends_part(self.peek_at(1).kind) {
            return self.expr();
        }
        if token.kind == TokenKind::Minus
            && self.peek_at(1).kind == TokenKind::Number
            && number_ends_part(self.peek_at(2).kind)
        {
            return self.expr();
        }

        if matches!(token.kind, TokenKind::Text | TokenKind::Template) {
            return self.expr();
        }

        if token.kind == TokenKind::Word {
            let word = token.keyword();
            let next = self.peek_at(1);

            let starts_expr = match word.as_str() {
                "uppercase" | "lowercase" | "item" | "an" | "length" => true,
                "a" => next.is_word("list") || next.is_word("empty"),
                "the" => {
                    let named = [
                        "length", "json", "result", "keys", "value", "contents", "current",
                    ];
                    (next.kind == TokenKind::Word && named.iter().any(|w| next.is_word(w)))
                        || self.peek_word_is(2, "of")
                }
                _ => false,
            };
            if starts_expr {
                return self.expr();
            }
        }

        let mut words = Vec::new();
        while matches!(self.peek().kind, TokenKind::Word | TokenKind::Number) {
            words.push(self.advance().lexeme);
        }

        match words.len() {
            0 => Err(ParseError::new(self.line(), "Nothing to say here.")),
            1 => Ok(single_word(words.remove(0), token.line)),
            _ => Ok(Expr::Phrase {
                words,
                line: token.line,
            }),
        }
    }

    fn ask_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_phrase(&["the", "user", "for"])?;
        let name = self.expect_name(line, "Expected a variable name after 'Ask the user for'.")?;
        self.expect_period()?;
        Ok(Stmt::Ask { name, line })
    }

    /* ------------------------------------------------------------------
     * Control flow
     * ------------------------------------------------------------------ */

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let condition = self.condition()?;
        self.expect_word("then")?;
        self.expect_block_opener()?;

        let then_branch = self.block(&["otherwise", "end"])?;
        let mut else_branch = Vec::new();

        if self.match_word("otherwise") {
            self.expect_block_opener()?;
            else_branch = self.block(&["end"])?;
        }

        self.expect_block_end("if")?;
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            line,
        })
    }

    fn repeat_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let count = self.factor()?;
        self.expect_word("times")?;
        self.expect_block_opener()?;
        let body = self.block(&["end"])?;
        self.expect_block_end("repeat")?;
        Ok(Stmt::Repeat { count, body, line })
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let condition = self.condition()?;
        self.expect_block_opener()?;
        let body = self.block(&["end"])?;
        self.expect_block_end("while")?;
        Ok(Stmt::While {
            condition,
            body,
            line,
        })
    }

    /// `For each X in EXPR ...` or the range form `For each X from A to B`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_word("each")?;
        let var = self.expect_name(line, "Expected a variable name after 'For each'.")?;

        if self.match_word("from") {
            let start = self.expr()?;
            self.expect_word("to")?;
            let end = self.expr()?;
            let step = if self.match_word("step") {
                Some(self.expr()?)
            } else {
                None
            };

            self.expect_block_opener()?;
            let body = self.block(&["end"])?;
            self.expect_block_end("for")?;

            return Ok(Stmt::ForRange {
                var,
                start,
                end,
                step,
                body,
                line,
            });
        }

        self.expect_word("in")?;
        let iterable = self.expr()?;
        self.expect_block_opener()?;
        let body = self.block(&["end"])?;
        self.expect_block_end("for")?;

        Ok(Stmt::ForEach {
            var,
            iterable,
            body,
            line,
        })
    }

    fn give_back_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_word("back")?;
        let value = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::GiveBack { value, line })
    }

    /// `Check EXPR. When V, ... When W, ... Otherwise, ... End check.`
    fn check_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let subject = self.expr()?;
        self.expect_period()?;

        let mut cases = Vec::new();
        let mut otherwise = Vec::new();

        while !self.is_at_end() && !self.check_word("end") {
            if self.match_word("when") {
                let value = self.factor()?;
                self.expect_comma()?;
                let body = self.block(&["when", "otherwise", "end"])?;
                cases.push((value, body));
            } else if self.match_word("otherwise") {
                self.match_kind(TokenKind::Comma);
                otherwise = self.block(&["end"])?;
            } else {
                return Err(ParseError::new(
                    self.line(),
                    "Expected 'When', 'Otherwise', or 'End' inside Check block.",
                ));
            }
        }

        self.expect_block_end("check")?;
        Ok(Stmt::Check {
            subject,
            cases,
            otherwise,
            line,
        })
    }

    /* ------------------------------------------------------------------
     * Calls
     * ------------------------------------------------------------------ */

    fn call_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let call = self.call_chain(line, "Expected a function name after 'Call'.")?;
        self.expect_period()?;
        Ok(Stmt::Call { call, line })
    }

    /// `F [on OBJ] [with ARGS] {then call M [with ARGS]}`
    fn call_chain(&mut self, line: usize, missing_name: &str) -> ParseResult<CallChain> {
        let name = self.expect_name(line, missing_name)?;

        let receiver = if self.match_word("on") {
            Some(self.expr()?)
        } else {
            None
        };

        let args = self.call_arguments()?;

        let mut then = Vec::new();
        while self.match_word("then") {
            self.expect_word("call")?;
            let token = self.advance();
            if token.kind != TokenKind::Word {
                return Err(ParseError::new(
                    self.line(),
                    "Expected a method name after 'then call'.",
                ));
            }
            let args = self.call_arguments()?;
            then.push(ChainedCall {
                name: token.lexeme,
                args,
                line: token.line,
            });
        }

        Ok(CallChain {
            name,
            receiver,
            args,
            then,
        })
    }

    /// `with A, B` / `with no parameters` / nothing.
    fn call_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        if !self.match_word("with") {
            return Ok(Vec::new());
        }

        if self.check_word("no") && self.peek_word_is(1, "parameters") {
            self.advance();
            self.advance();
            return Ok(Vec::new());
        }

        self.argument_list()
    }

    /// Comma-separated expressions.
    pub fn argument_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = vec![self.expr()?];
        while self.match_kind(TokenKind::Comma) {
            args.push(self.expr()?);
        }
        Ok(args)
    }

    /// `key: value, key: value`
    pub fn pair_list(&mut self) -> ParseResult<Vec<(Expr, Expr)>> {
        let mut pairs = Vec::new();

        loop {
            let key = self.expr()?;
            if !self.match_kind(TokenKind::Colon) {
                return Err(ParseError::new(
                    self.line(),
                    "Expected a colon ':' after dictionary key.",
                ));
            }
            let value = self.expr()?;
            pairs.push((key, value));

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(pairs)
    }

    /* ------------------------------------------------------------------
     * Lists, dictionaries and objects
     * ------------------------------------------------------------------ */

    /// `Add X to LIST.` or a GUI `Add a button ...`.
    fn add_statement(&mut self) -> ParseResult<Stmt> {
        if self.peek_word_is(1, "a") || self.peek_word_is(1, "an") {
            let saved = self.checkpoint();
            let line = self.advance().line;
            self.advance();
            if self.check_any(&["button", "label", "input"]) {
                return self.add_widget_statement(line);
            }
            self.rewind(saved);
        }

        let line = self.advance().line;
        let value = self.expr()?;
        self.expect_word("to")?;
        let list = self.expect_name(line, "Expected a list variable name after 'to'.")?;
        self.expect_period()?;
        Ok(Stmt::AddToList { value, list, line })
    }

    fn remove_item_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_word("item")?;
        let index = self.expr()?;
        self.expect_word("from")?;
        let list = self.expect_name(line, "Expected a list variable name after 'from'.")?;
        self.expect_period()?;
        Ok(Stmt::RemoveFromList { index, list, line })
    }

    fn remove_value_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_phrase(&["the", "value", "for"])?;
        let key = self.expr()?;
        self.expect_word("in")?;
        let dict = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::RemoveDictValue { dict, key, line })
    }

    /// `Set the value for K in D to V.` or `Set the P of OBJ to V.`
    fn set_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_word("the")?;

        if self.check_word("value") && self.peek_word_is(1, "for") {
            self.advance();
            self.advance();
            let key = self.expr()?;
            self.expect_word("in")?;
            let dict = self.expr()?;
            self.expect_word("to")?;
            let value = self.expr()?;
            self.expect_period()?;
            return Ok(Stmt::SetDictValue {
                dict,
                key,
                value,
                line,
            });
        }

        let name = self.expect_name(line, "Expected a property name after 'the'.")?;
        self.expect_word("of")?;
        let object = self.expr()?;
        self.expect_word("to")?;
        let value = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::SetProperty {
            object,
            name,
            value,
            line,
        })
    }

    fn sort_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let list = self.expect_name(line, "Expected a list variable name after 'Sort'.")?;
        self.expect_period()?;
        Ok(Stmt::Sort { list, line })
    }

    /* ------------------------------------------------------------------
     * Files and modules
     * ------------------------------------------------------------------ */

    fn write_file_statement(&mut self, append: bool) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let content = self.expr()?;
        self.expect_phrase(&["to", "file"])?;
        let path = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::WriteFile {
            content,
            path,
            append,
            line,
        })
    }

    /// `Import [{a, b} from | functions from] SOURCE [as ALIAS].`
    fn import_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let mut names = None;

        if self.match_kind(TokenKind::LeftBrace) {
            let mut list = Vec::new();
            while !self.is_at_end() && !self.check_kind(TokenKind::RightBrace) {
                list.push(self.expect_name(line, "Expected an identifier to import.")?);
                self.match_kind(TokenKind::Comma);
            }

            let close = self.advance();
            if close.kind != TokenKind::RightBrace {
                return Err(ParseError::new(
                    close.line,
                    format!("I expected a closing '}}' but found '{}'.", close.lexeme),
                ));
            }
            self.expect_word("from")?;
            names = Some(list);
        } else if self.match_word("functions") {
            self.expect_word("from")?;
        }

        let source = self.expr()?;

        let alias = if self.match_word("as") {
            Some(self.expect_name(line, "Expected an alias name after 'as'.")?)
        } else {
            None
        };

        self.expect_period()?;
        Ok(Stmt::Import {
            source,
            alias,
            names,
            line,
        })
    }

    /* ------------------------------------------------------------------
     * Errors
     * ------------------------------------------------------------------ */

    fn throw_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_word("error")?;
        let message = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::Throw { message, line })
    }

    /// `Try the following. ... Handle error [and save it as V]. ... End try.`
    fn try_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_phrase(&["the", "following"])?;
        self.expect_period()?;

        let body = self.block(&["handle"])?;
        self.expect_phrase(&["Handle", "error"])?;

        let mut error_var = String::from("error");
        if self.match_word("and") {
            self.expect_phrase(&["save", "it", "as"])?;
            error_var = self.expect_name(line, "Expected a variable name after 'as'.")?;
        }
        self.expect_period()?;

        let handler = self.block(&["end"])?;
        self.expect_block_end("try")?;

        Ok(Stmt::Try {
            body,
            error_var,
            handler,
            line,
        })
    }

    /// `Attempt to do the following. ... Rescue error as V. ... End attempt.`
    fn attempt_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.expect_word("to")?;
        self.expect_block_opener()?;

        let body = self.block(&["rescue"])?;
        self.expect_phrase(&["Rescue", "error", "as"])?;
        let error_var = self.expect_name(line, "Expected a variable name after 'as'.")?;
        self.expect_period()?;

        let handler = self.block(&["end"])?;
        self.expect_block_end("attempt")?;

        Ok(Stmt::Attempt {
            body,
            error_var,
            handler,
            line,
        })
    }

    /* ------------------------------------------------------------------
     * Tests
     * ------------------------------------------------------------------ */

    fn test_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;

        let token = self.advance();
        if !matches!(token.kind, TokenKind::Text | TokenKind::Template) {
            return Err(ParseError::new(
                line,
                "Expected a quoted test name after 'Test'.",
            ));
        }
        self.expect_period()?;

        let body = self.block(&["end"])?;
        self.expect_block_end("test")?;

        Ok(Stmt::Test(Arc::new(TestDecl {
            name: token.lexeme,
            body,
            line,
        })))
    }

    fn assert_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let condition = self.condition()?;
        self.expect_period()?;
        Ok(Stmt::Assert { condition, line })
    }

    /// `Run all tests.` or `Run WINDOW.`
    fn run_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;

        if self.match_word("all") {
            self.expect_word("tests")?;
            self.expect_period()?;
            return Ok(Stmt::RunTests { line });
        }

        let window = self.expr()?;
        self.expect_period()?;
        Ok(Stmt::RunWindow { window, line })
    }
}

/// A lone collected word: `true`/`false`, a number, or a variable name.
fn single_word(word: String, line: usize) -> Expr {
    if word.eq_ignore_ascii_case("true") {
        return Expr::Bool(true);
    }
    if word.eq_ignore_ascii_case("false") {
        return Expr::Bool(false);
    }
    if let Ok(n) = word.parse::<f64>() {
        return Expr::Number(n);
    }
    Expr::Identifier { name: word, line }
}
