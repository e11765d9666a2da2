/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  Implements the Prose expression grammar using recursive descent
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
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * Parsing order follows the usual arithmetic precedence:
 *
 *   expr   → term { (plus | minus | + | -) term } { contains expr | as a number }
 *   term   → factor { (times | divided by | modulo | * | / | %) factor }
 *   factor → literal | collection | builtin | word phrase
 *
 * A factor that starts with an ordinary word collects following words
 * until a stop word, so `hello there plus name` is the phrase
 * `hello there` plus the variable `name`.
 *
 * ==========================================================================
 */

use crate::ast::{BinaryOp, Conversion, Expr};
use crate::error::{ParseError, ParseResult};
use crate::lexer::token::TokenKind;
use crate::parser::keywords::is_stop_word;
use crate::parser::parser::Parser;

impl Parser {
    /// expr → term { additive term } with postfix `contains` and `as`.
    pub fn expr(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let mut left = self.term()?;

        loop {
            if self.check_any(&["plus", "minus"])
                || self.check_kind(TokenKind::Plus)
                || self.check_kind(TokenKind::Minus)
            {
                let token = self.advance();
                let op = if token.kind == TokenKind::Plus || token.is_word("plus") {
                    BinaryOp::Plus
                } else {
                    BinaryOp::Minus
                };
                let right = self.term()?;
                left = Expr::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                    line,
                };
            } else if self.match_word("contains") {
                let needle = self.expr()?;
                left = Expr::Contains {
                    haystack: Box::new(left),
                    needle: Box::new(needle),
                    line,
                };
            } else if self.check_word("as") {
                let saved = self.checkpoint();
                self.advance();
                self.match_word("a");

                let target = if self.match_any(&["number", "numbers"]) {
                    Conversion::Number
                } else if self.match_word("text") {
                    Conversion::Text
                } else {
                    self.rewind(saved);
                    break;
                };

                left = Expr::Convert {
                    expr: Box::new(left),
                    target,
                    line,
                };
            } else {
                break;
            }
        }

        Ok(left)
    }

    /// term → factor { multiplicative factor }
    fn term(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let mut left = self.factor()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Times,
                TokenKind::Slash => BinaryOp::Divide,
                TokenKind::Percent => BinaryOp::Modulo,
                TokenKind::Word => match self.peek().keyword().as_str() {
                    "times" => BinaryOp::Times,
                    "divided" => BinaryOp::Divide,
                    "modulo" => BinaryOp::Modulo,
                    _ => break,
                },
                _ => break,
            };

            if self.advance().is_word("divided") {
                self.expect_word("by")?;
            }

            let right = self.factor()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                line,
            };
        }

        Ok(left)
    }

    /// A single operand.
    pub fn factor(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        let line = token.line;

        match token.kind {
            TokenKind::Minus => {
                self.advance();
                let operand = self.factor()?;
                return Ok(Expr::Negate {
                    operand: Box::new(operand),
                    line,
                });
            }
            TokenKind::Number => {
                self.advance();
                let n = token.lexeme.parse::<f64>().map_err(|_| {
                    ParseError::new(line, format!("'{}' is not a valid number.", token.lexeme))
                })?;
                return Ok(Expr::Number(n));
            }
            TokenKind::Text => {
                self.advance();
                return Ok(Expr::Text(token.lexeme));
            }
            TokenKind::Template => {
                self.advance();
                return self.template(&token.lexeme, line);
            }
            TokenKind::Word => {}
            _ => {
                return Err(ParseError::new(
                    line,
                    format!(
                        "I expected a value (number, word, true, false, a list, etc.) but found '{}'.",
                        token.lexeme
                    ),
                ))
            }
        }

        let word = token.keyword();
        match word.as_str() {
            "true" => {
                self.advance();
                return Ok(Expr::Bool(true));
            }
            "false" => {
                self.advance();
                return Ok(Expr::Bool(false));
            }
            "nothing" | "empty" => {
                self.advance();
                return Ok(Expr::Nothing);
            }
            "a" | "an" => {
                let next = self.peek_at(1);
                if next.kind == TokenKind::Word
                    && ["list", "empty", "dictionary", "new", "function"]
                        .iter()
                        .any(|w| next.is_word(w))
                {
                    self.advance();
                    return self.article_expression(line);
                }
            }
            "waiting" => {
                self.advance();
                self.expect_word("for")?;
                let task = self.expr()?;
                return Ok(Expr::Wait {
                    task: Box::new(task),
                    line,
                });
            }
            "all" => return self.all_where(line),
            "the" if self.peek_at(1).kind == TokenKind::Word => {
                if let Some(expr) = self.the_phrase(line)? {
                    return Ok(expr);
                }
            }
            _ => {
                if let Some(expr) = self.prefix_builtin(&word, line)? {
                    return Ok(expr);
                }
            }
        }

        Ok(self.word_phrase(line))
    }

    /// Collection literals, instances and inline functions after `a`/`an`.
    fn article_expression(&mut self, line: usize) -> ParseResult<Expr> {
        match self.advance().keyword().as_str() {
            "list" => {
                let elements = if self.match_word("containing") {
                    self.argument_list()?
                } else {
                    Vec::new()
                };
                Ok(Expr::List { elements, line })
            }
            "dictionary" => {
                let pairs = if self.match_word("containing") {
                    self.pair_list()?
                } else {
                    Vec::new()
                };
                Ok(Expr::Dict { pairs, line })
            }
            "new" => {
                let class = self.expect_name(line, "Expected a class name after 'new'.")?;
                let fields = if self.match_word("with") {
                    self.pair_list()?
                } else {
                    Vec::new()
                };
                Ok(Expr::NewInstance {
                    class,
                    fields,
                    line,
                })
            }
            "function" => self.lambda(line),
            _ => {
                if self.match_word("list") {
                    Ok(Expr::List {
                        elements: Vec::new(),
                        line,
                    })
                } else if self.match_word("dictionary") {
                    Ok(Expr::Dict {
                        pairs: Vec::new(),
                        line,
                    })
                } else {
                    Err(ParseError::new(
                        line,
                        "Expected 'list' or 'dictionary' after 'an empty'.",
                    ))
                }
            }
        }
    }

    /// `all X in LIST where CONDITION`
    fn all_where(&mut self, line: usize) -> ParseResult<Expr> {
        self.advance();
        let var = self.advance().lexeme;
        self.expect_word("in")?;
        let list = self.factor()?;
        self.expect_word("where")?;
        let condition = self.condition()?;

        Ok(Expr::Filter {
            list: Box::new(list),
            var,
            condition: Box::new(condition),
            line,
        })
    }

    /// Greedy word collection up to the next stop word.
    ///
    /// The first word is always taken, even if it is a stop word; this is
    /// what lets `item`, `value` or `the` name ordinary variables.
    fn word_phrase(&mut self, line: usize) -> Expr {
        let mut words = vec![self.advance().lexeme];

        while self.check_kind(TokenKind::Word) && !is_stop_word(&self.peek().lexeme) {
            words.push(self.advance().lexeme);
        }

        if words.len() == 1 {
            return Expr::identifier(words.remove(0), line);
        }
        Expr::Phrase { words, line }
    }
}
