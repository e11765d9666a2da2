/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     definitions.rs
 * Purpose:  `Define a ...` sentences and inline function expressions.
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

use crate::ast::{ClassDecl, Expr, FunctionBody, FunctionDecl, Param, Stmt};
use crate::error::{ParseError, ParseResult};
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// `Define a|an [async] function|class|method|enum ...`
    pub fn define_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;

        if !self.match_any(&["a", "an"]) {
            return Err(ParseError::new(line, "Expected 'a' or 'an' after 'Define'."));
        }

        let is_async = self.match_word("async");

        match self.peek().keyword().as_str() {
            "function" => {
                let decl = self.function_definition(line, is_async)?;
                Ok(Stmt::Function(Arc::new(decl)))
            }
            "class" => self.class_definition(line),
            "method" => self.method_definition(line, is_async),
            "enum" => self.enum_definition(line),
            _ => Err(ParseError::new(
                line,
                "Expected 'function', 'class', 'method', or 'enum' after 'Define a/an'.",
            )),
        }
    }

    /// `function called F that takes ... and does the following. ... End function.`
    fn function_definition(&mut self, line: usize, is_async: bool) -> ParseResult<FunctionDecl> {
        self.advance();
        self.expect_word("called")?;
        let name = self.expect_name(line, "Expected a function name after 'called'.")?;

        self.expect_word("that")?;
        let params = self.signature()?;
        self.expect_phrase(&["and", "does"])?;
        self.expect_phrase(&["the", "following"])?;
        self.expect_period()?;

        let body = self.block(&["end"])?;
        self.expect_block_end("function")?;

        Ok(FunctionDecl {
            name: Some(name),
            params,
            body: FunctionBody::Block(body),
            is_async,
            line,
        })
    }

    /// `class called C [that extends P] [with properties a, b and c].`
    fn class_definition(&mut self, line: usize) -> ParseResult<Stmt> {
        self.advance();
        self.expect_word("called")?;
        let name = self.expect_name(line, "Expected a class name.")?;

        let parent = if self.match_word("that") {
            self.expect_word("extends")?;
            Some(self.expect_name(line, "Expected a parent class name after 'extends'.")?)
        } else {
            None
        };

        let properties = if self.match_word("with") {
            self.expect_word("properties")?;
            self.param_list()?.into_iter().map(|p| p.name).collect()
        } else {
            Vec::new()
        };

        self.expect_period()?;
        Ok(Stmt::Class(Arc::new(ClassDecl {
            name,
            properties,
            parent,
            line,
        })))
    }

    /// `method called M for C that takes ... End method.`
    fn method_definition(&mut self, line: usize, is_async: bool) -> ParseResult<Stmt> {
        self.advance();
        self.expect_word("called")?;
        let name = self.expect_name(line, "Expected a method name.")?;
        self.expect_word("for")?;
        let class = self.expect_name(line, "Expected a class name for the method.")?;

        self.expect_word("that")?;
        let params = self.signature()?;
        self.expect_phrase(&["and", "does"])?;
        self.expect_phrase(&["the", "following"])?;
        self.expect_period()?;

        let body = self.block(&["end"])?;
        self.expect_block_end("method")?;

        Ok(Stmt::Method {
            class,
            decl: Arc::new(FunctionDecl {
                name: Some(name),
                params,
                body: FunctionBody::Block(body),
                is_async,
                line,
            }),
        })
    }

    /// `enum called E with values A, B and C.`
    fn enum_definition(&mut self, line: usize) -> ParseResult<Stmt> {
        self.advance();
        self.expect_word("called")?;
        let name = self.expect_name(line, "Expected an enum name.")?;
        self.expect_phrase(&["with", "values"])?;
        let values = self.param_list()?.into_iter().map(|p| p.name).collect();
        self.expect_period()?;
        Ok(Stmt::Enum { name, values, line })
    }

    /// `takes P, Q and R` / `takes no parameters` / `with no parameters`.
    fn signature(&mut self) -> ParseResult<Vec<Param>> {
        if self.match_word("takes") {
            if self.match_word("no") {
                self.expect_word("parameters")?;
                return Ok(Vec::new());
            }
            return self.param_list();
        }

        if self.match_word("with") {
            self.expect_phrase(&["no", "parameters"])?;
        }

        Ok(Vec::new())
    }

    /// Names separated by commas, with the last one introduced by `and`.
    ///
    /// An `and` followed by `does`, `following`, `with` or `gives` belongs
    /// to the enclosing sentence and ends the list without being consumed.
    /// Any name may carry `defaulting to EXPR`.
    pub fn param_list(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();

        loop {
            if self.check_word("and") {
                let saved = self.checkpoint();
                self.advance();
                if self.check_any(&["does", "following", "with", "gives"]) {
                    self.rewind(saved);
                    break;
                }

                let token = self.advance();
                if token.kind != TokenKind::Word {
                    return Err(ParseError::new(self.line(), "Expected a parameter name."));
                }
                let param = self.param_default(token.lexeme)?;
                params.push(param);
                break;
            } else if self.match_kind(TokenKind::Comma) {
                continue;
            } else if self.check_kind(TokenKind::Word)
                && !self.check_any(&["and", "does", "following", "that", "with"])
            {
                let name = self.advance().lexeme;
                let param = self.param_default(name)?;
                params.push(param);
            } else {
                break;
            }
        }

        Ok(params)
    }

    fn param_default(&mut self, name: String) -> ParseResult<Param> {
        if self.match_word("defaulting") {
            self.expect_word("to")?;
            let default = self.expr()?;
            return Ok(Param::with_default(name, default));
        }
        Ok(Param::new(name))
    }

    /// `a function that takes X and gives back EXPR`
    /// `a function that takes X and does the following. ... End function`
    ///
    /// The leading `a function` has already been consumed. The block form
    /// stops after `End function`; the period belongs to the enclosing
    /// sentence.
    pub fn lambda(&mut self, line: usize) -> ParseResult<Expr> {
        self.expect_word("that")?;

        let mut params = Vec::new();
        if self.match_word("takes") {
            if self.match_word("no") {
                self.expect_word("parameters")?;
            } else {
                params = self.param_list()?;
            }
        }
        self.expect_word("and")?;

        let body = if self.match_word("gives") {
            self.expect_word("back")?;
            FunctionBody::Expression(self.expr()?)
        } else if self.match_word("does") {
            self.expect_phrase(&["the", "following"])?;
            self.expect_period()?;
            let body = self.block(&["end"])?;
            self.expect_phrase(&["End", "function"])?;
            FunctionBody::Block(body)
        } else {
            return Err(ParseError::new(
                line,
                "Expected 'gives back' or 'does the following' after function parameters.",
            ));
        };

        Ok(Expr::Lambda(Arc::new(FunctionDecl {
            name: None,
            params,
            body,
            is_async: false,
            line,
        })))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, FunctionBody, Stmt};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn program(source: &str) -> Vec<Stmt> {
        parse(tokenize(source).unwrap()).unwrap()
    }

    #[test]
    fn function_with_default_parameter() {
        let stmts = program(
            "Define a function called greet that takes name and greeting defaulting to \"Hello\" and does the following.\n\
             Say greeting, name.\n\
             End function.",
        );
        match &stmts[0] {
            Stmt::Function(decl) => {
                assert_eq!(decl.name.as_deref(), Some("greet"));
                assert_eq!(decl.params.len(), 2);
                assert!(decl.params[0].default.is_none());
                assert!(decl.params[1].default.is_some());
                assert!(!decl.is_async);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn async_function_without_parameters() {
        let stmts = program(
            "Define an async function called work with no parameters and does the following.\n\
             Give back 1.\n\
             End function.",
        );
        assert!(matches!(&stmts[0], Stmt::Function(decl) if decl.is_async && decl.params.is_empty()));
    }

    #[test]
    fn class_with_parent_and_properties() {
        let stmts = program("Define a class called Dog that extends Animal with properties name, age and breed.");
        match &stmts[0] {
            Stmt::Class(decl) => {
                assert_eq!(decl.parent.as_deref(), Some("Animal"));
                assert_eq!(decl.properties, vec!["name", "age", "breed"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn method_records_its_class() {
        let stmts = program(
            "Define a method called speak for Dog that takes no parameters and does the following.\n\
             Say Woof.\n\
             End method.",
        );
        assert!(matches!(&stmts[0], Stmt::Method { class, .. } if class == "Dog"));
    }

    #[test]
    fn enum_values() {
        let stmts = program("Define an enum called Color with values Red, Green and Blue.");
        match &stmts[0] {
            Stmt::Enum { name, values, .. } => {
                assert_eq!(name, "Color");
                assert_eq!(values, &vec!["Red", "Green", "Blue"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn expression_lambda() {
        let stmts = program("Let double be a function that takes x and gives back x times 2.");
        match &stmts[0] {
            Stmt::Let { value: Expr::Lambda(decl), .. } => {
                assert_eq!(decl.params.len(), 1);
                assert!(matches!(decl.body, FunctionBody::Expression(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn block_lambda_leaves_period_to_sentence() {
        let stmts = program(
            "Let shout be a function that takes x and does the following.\n\
             Give back uppercase of x.\n\
             End function.",
        );
        assert!(matches!(
            &stmts[0],
            Stmt::Let { value: Expr::Lambda(decl), .. } if matches!(decl.body, FunctionBody::Block(_))
        ));
    }
}
