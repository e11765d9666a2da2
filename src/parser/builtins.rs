/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     builtins.rs
 * Purpose:  Keyword-introduced builtin expressions.
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

use crate::ast::{Builtin, Conversion, Expr};
use crate::error::{ParseError, ParseResult};
use crate::lexer::token::TokenKind;
use crate::parser::keywords::is_operator_word;
use crate::parser::parser::Parser;

/// Shorthand for a builtin node.
fn builtin(func: Builtin, args: Vec<Expr>, line: usize) -> Expr {
    Expr::Builtin { func, args, line }
}

impl Parser {
    /// Phrases opening with `the`.
    ///
    /// # Returns
    /// - `Some(expr)` when the words after `the` form a known phrase.
    /// - `None` with the cursor back on `the` otherwise; the caller then
    ///   collects the words as a plain phrase.
    pub fn the_phrase(&mut self, line: usize) -> ParseResult<Option<Expr>> {
        let start = self.checkpoint();
        self.advance();

        let next = self.peek().keyword();
        let expr = match next.as_str() {
            "length" => {
                self.advance();
                self.expect_word("of")?;
                let target = self.factor()?;
                builtin(Builtin::Length, vec![target], line)
            }
            "value" => {
                self.advance();
                self.expect_word("for")?;
                let key = self.factor()?;
                self.expect_word("in")?;
                let dict = self.factor()?;
                Expr::DictValue {
                    dict: Box::new(dict),
                    key: Box::new(key),
                    line,
                }
            }
            "keys" => {
                self.advance();
                self.expect_word("of")?;
                let dict = self.factor()?;
                builtin(Builtin::Keys, vec![dict], line)
            }
            "contents" => {
                self.advance();
                self.expect_phrase(&["of", "file"])?;
                let path = self.factor()?;
                builtin(Builtin::FileContents, vec![path], line)
            }
            "current" => {
                self.advance();
                if self.match_word("date") {
                    self.expect_phrase(&["and", "time"])?;
                    builtin(Builtin::CurrentDateTime, Vec::new(), line)
                } else if self.match_word("year") {
                    builtin(Builtin::CurrentYear, Vec::new(), line)
                } else if self.match_word("timestamp") {
                    builtin(Builtin::CurrentTimestamp, Vec::new(), line)
                } else {
                    return Err(ParseError::new(
                        line,
                        "Expected 'date and time', 'year', or 'timestamp' after 'the current'.",
                    ));
                }
            }
            "command" => {
                self.advance();
                self.expect_phrase(&["line", "arguments"])?;
                builtin(Builtin::CommandLineArguments, Vec::new(), line)
            }
            "environment" => {
                self.advance();
                self.expect_word("variable")?;
                let name = self.factor()?;
                builtin(Builtin::EnvironmentVariable, vec![name], line)
            }
            "json" => match self.json_phrase(line)? {
                Some(expr) => expr,
                None => return self.property_or_rewind(start, line),
            },
            "result" => match self.result_phrase(line)? {
                Some(expr) => expr,
                None => return self.property_or_rewind(start, line),
            },
            _ => return self.property_or_rewind(start, line),
        };

        Ok(Some(expr))
    }

    /// `the json parsed from text T` / `the json for D`
    fn json_phrase(&mut self, line: usize) -> ParseResult<Option<Expr>> {
        self.advance();

        if self.match_word("parsed") {
            self.expect_phrase(&["from", "text"])?;
            let text = self.factor()?;
            return Ok(Some(builtin(Builtin::JsonParse, vec![text], line)));
        }
        if self.match_word("for") {
            let value = self.factor()?;
            return Ok(Some(builtin(Builtin::JsonStringify, vec![value], line)));
        }

        Ok(None)
    }

    /// `the result of fetching|posting|mapping|filtering|matching ...`
    fn result_phrase(&mut self, line: usize) -> ParseResult<Option<Expr>> {
        self.advance();
        if !self.match_word("of") {
            return Ok(None);
        }

        let expr = match self.peek().keyword().as_str() {
            "fetching" => {
                self.advance();
                self.expect_word("url")?;
                let url = self.factor()?;
                builtin(Builtin::HttpGet, vec![url], line)
            }
            "posting" => {
                self.advance();
                self.expect_word("payload")?;
                let payload = self.factor()?;
                self.expect_phrase(&["to", "url"])?;
                let url = self.factor()?;
                builtin(Builtin::HttpPost, vec![url, payload], line)
            }
            "mapping" => {
                self.advance();
                let function = self.factor()?;
                self.expect_word("over")?;
                let list = self.factor()?;
                Expr::Map {
                    function: Box::new(function),
                    list: Box::new(list),
                    line,
                }
            }
            "filtering" => {
                self.advance();
                let list = self.factor()?;
                self.expect_word("where")?;
                let condition = self.condition()?;
                Expr::Filter {
                    list: Box::new(list),
                    var: String::from("item"),
                    condition: Box::new(condition),
                    line,
                }
            }
            "matching" => {
                self.advance();
                self.expect_word("pattern")?;
                let pattern = self.factor()?;
                self.expect_word("in")?;
                let text = self.factor()?;
                builtin(Builtin::RegexMatch, vec![pattern, text], line)
            }
            _ => return Ok(None),
        };

        Ok(Some(expr))
    }

    /// `the P of OBJ`, or a rewind to `the`.
    fn property_or_rewind(&mut self, start: usize, line: usize) -> ParseResult<Option<Expr>> {
        self.rewind(start);
        self.advance();

        let property = self.advance();
        if property.kind == TokenKind::Word && self.match_word("of") {
            let object = self.factor()?;
            return Ok(Some(Expr::Property {
                object: Box::new(object),
                name: property.lexeme,
                line,
            }));
        }

        self.rewind(start);
        Ok(None)
    }

    /// Builtins introduced by a leading keyword: `uppercase of X`,
    /// `split X by Y`, `random number between A and B` ...
    ///
    /// `word` is the lowercased current token. Returns `None` without
    /// consuming anything when `word` does not start a builtin.
    pub fn prefix_builtin(&mut self, word: &str, line: usize) -> ParseResult<Option<Expr>> {
        let expr = match word {
            "keys" => {
                self.advance();
                self.expect_word("of")?;
                let dict = self.factor()?;
                builtin(Builtin::Keys, vec![dict], line)
            }
            "substring" => {
                let saved = self.checkpoint();
                self.advance();
                if !self.match_word("of") {
                    self.rewind(saved);
                    return Ok(None);
                }
                let text = self.factor()?;
                self.expect_word("from")?;
                let start = self.factor()?;
                self.expect_word("to")?;
                let end = self.factor()?;
                builtin(Builtin::Substring, vec![text, start, end], line)
            }
            "character" => return self.indexed_access(line, true),
            "item" => return self.indexed_access(line, false),
            "uppercase" | "lowercase" => {
                self.advance();
                self.expect_word("of")?;
                let target = self.factor()?;
                let func = if word == "uppercase" {
                    Builtin::Uppercase
                } else {
                    Builtin::Lowercase
                };
                builtin(func, vec![target], line)
            }
            "trim" => {
                self.advance();
                let target = self.factor()?;
                builtin(Builtin::Trim, vec![target], line)
            }
            "split" => {
                self.advance();
                let source = self.factor()?;
                self.expect_word("by")?;
                let delimiter = self.factor()?;
                builtin(Builtin::Split, vec![source, delimiter], line)
            }
            "join" => {
                self.advance();
                let list = self.factor()?;
                self.expect_word("with")?;
                let separator = self.factor()?;
                builtin(Builtin::Join, vec![list, separator], line)
            }
            "replace" => {
                self.advance();
                let find = self.factor()?;
                self.expect_word("in")?;
                let text = self.factor()?;
                self.expect_word("with")?;
                let replacement = self.factor()?;
                builtin(Builtin::Replace, vec![text, find, replacement], line)
            }
            "round" => {
                self.advance();
                let value = self.factor()?;
                let mut args = vec![value];
                if self.match_word("to") {
                    args.push(self.factor()?);
                    self.match_any(&["places", "place"]);
                }
                builtin(Builtin::Round, args, line)
            }
            "absolute" => {
                self.advance();
                self.expect_phrase(&["value", "of"])?;
                let value = self.factor()?;
                builtin(Builtin::Absolute, vec![value], line)
            }
            "square" => {
                self.advance();
                self.expect_phrase(&["root", "of"])?;
                let value = self.factor()?;
                builtin(Builtin::SquareRoot, vec![value], line)
            }
            "floor" | "ceiling" => {
                self.advance();
                self.expect_word("of")?;
                let value = self.factor()?;
                let func = if word == "floor" {
                    Builtin::Floor
                } else {
                    Builtin::Ceiling
                };
                builtin(func, vec![value], line)
            }
            "random" => {
                self.advance();
                self.expect_phrase(&["number", "between"])?;
                let low = self.factor()?;
                self.expect_word("and")?;
                let high = self.factor()?;
                builtin(Builtin::Random, vec![low, high], line)
            }
            "minimum" | "maximum" => {
                self.advance();
                self.expect_word("of")?;
                let a = self.factor()?;
                self.expect_word("and")?;
                let b = self.factor()?;
                let func = if word == "minimum" {
                    Builtin::Minimum
                } else {
                    Builtin::Maximum
                };
                builtin(func, vec![a, b], line)
            }
            "power" => {
                self.advance();
                self.expect_word("of")?;
                let base = self.factor()?;
                self.expect_word("to")?;
                let exponent = self.factor()?;
                builtin(Builtin::Power, vec![base, exponent], line)
            }
            "index" => {
                self.advance();
                self.expect_word("of")?;
                let item = self.factor()?;
                self.expect_word("in")?;
                let haystack = self.factor()?;
                builtin(Builtin::IndexOf, vec![item, haystack], line)
            }
            "repeat" => {
                self.advance();
                let text = self.factor()?;
                let count = self.factor()?;
                self.match_word("times");
                builtin(Builtin::RepeatText, vec![text, count], line)
            }
            "as" => {
                self.advance();
                self.match_word("a");
                let target = self.advance();
                let value = self.factor()?;
                let target = match target.keyword().as_str() {
                    "number" | "numbers" => Conversion::Number,
                    "text" => Conversion::Text,
                    _ => {
                        return Err(ParseError::new(
                            line,
                            "After 'as' expected 'a number' or 'text'.",
                        ))
                    }
                };
                Expr::Convert {
                    expr: Box::new(value),
                    target,
                    line,
                }
            }
            _ => return Ok(None),
        };

        Ok(Some(expr))
    }

    /// `item N of LIST` and `character N of TEXT`.
    ///
    /// Without a following `of` the leading word is an ordinary variable
    /// name, so `If item is greater than 3` still reads `item`.
    fn indexed_access(&mut self, line: usize, character: bool) -> ParseResult<Option<Expr>> {
        let saved = self.checkpoint();
        let word = self.advance();

        let operand_follows = matches!(self.peek().kind, TokenKind::Number | TokenKind::Word)
            && !is_operator_word(&self.peek().lexeme);

        if operand_follows {
            let index = self.factor()?;
            if self.match_word("of") {
                let target = if character {
                    self.factor()?
                } else {
                    let list = self.advance();
                    if list.kind != TokenKind::Word {
                        return Err(ParseError::new(line, "Expected list name after 'of'."));
                    }
                    Expr::identifier(list.lexeme, line)
                };

                let expr = if character {
                    builtin(Builtin::CharacterAt, vec![target, index], line)
                } else {
                    Expr::ListItem {
                        list: Box::new(target),
                        index: Box::new(index),
                        line,
                    }
                };
                return Ok(Some(expr));
            }
        }

        self.rewind(saved);
        self.advance();
        Ok(Some(Expr::identifier(word.lexeme, line)))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Builtin, Conversion, Expr};
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn expr(source: &str) -> Expr {
        Parser::new(tokenize(source).unwrap()).expr().unwrap()
    }

    fn func_of(expr: &Expr) -> Option<Builtin> {
        match expr {
            Expr::Builtin { func, .. } => Some(*func),
            _ => None,
        }
    }

    #[test]
    fn the_length_of() {
        assert_eq!(func_of(&expr("the length of names")), Some(Builtin::Length));
    }

    #[test]
    fn the_value_for_key() {
        assert!(matches!(expr("the value for \"a\" in scores"), Expr::DictValue { .. }));
    }

    #[test]
    fn current_time_phrases() {
        assert_eq!(func_of(&expr("the current year")), Some(Builtin::CurrentYear));
        assert_eq!(
            func_of(&expr("the current date and time")),
            Some(Builtin::CurrentDateTime)
        );
    }

    #[test]
    fn the_current_needs_a_unit() {
        let err = Parser::new(tokenize("the current mood").unwrap())
            .expr()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 1: Expected 'date and time', 'year', or 'timestamp' after 'the current'."
        );
    }

    #[test]
    fn result_of_services() {
        assert_eq!(
            func_of(&expr("the result of fetching url \"http://x\"")),
            Some(Builtin::HttpGet)
        );
        assert_eq!(
            func_of(&expr("the result of posting payload body to url target")),
            Some(Builtin::HttpPost)
        );
        assert_eq!(
            func_of(&expr("the result of matching pattern \"a+\" in text")),
            Some(Builtin::RegexMatch)
        );
        assert!(matches!(expr("the result of mapping double over numbers"), Expr::Map { .. }));
        assert!(matches!(
            expr("the result of filtering numbers where item is greater than 2"),
            Expr::Filter { ref var, .. } if var == "item"
        ));
    }

    #[test]
    fn property_access() {
        match expr("the age of rex") {
            Expr::Property { name, object, .. } => {
                assert_eq!(name, "age");
                assert!(matches!(*object, Expr::Identifier { ref name, .. } if name == "rex"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn the_without_of_is_a_phrase() {
        assert!(matches!(expr("the end"), Expr::Identifier { ref name, .. } if name == "the"));
        assert!(matches!(expr("the big dog"), Expr::Phrase { ref words, .. } if words.len() == 3));
    }

    #[test]
    fn item_of_list_and_bare_item() {
        assert!(matches!(expr("item 2 of names"), Expr::ListItem { .. }));
        assert!(matches!(expr("item"), Expr::Identifier { ref name, .. } if name == "item"));
    }

    #[test]
    fn item_before_operator_stays_a_variable() {
        let mut parser = Parser::new(tokenize("item is 3").unwrap());
        assert!(matches!(parser.expr().unwrap(), Expr::Identifier { .. }));
        assert!(parser.check_word("is"));
    }

    #[test]
    fn character_of_text() {
        match expr("character 1 of word") {
            Expr::Builtin { func: Builtin::CharacterAt, args, .. } => {
                assert!(matches!(args[1], Expr::Number(n) if n == 1.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn text_builtins() {
        assert_eq!(func_of(&expr("uppercase of name")), Some(Builtin::Uppercase));
        assert_eq!(func_of(&expr("split line by \",\"")), Some(Builtin::Split));
        assert_eq!(func_of(&expr("join parts with \"-\"")), Some(Builtin::Join));
        assert_eq!(func_of(&expr("repeat \"ab\" 3 times")), Some(Builtin::RepeatText));
        match expr("replace \"a\" in word with \"b\"") {
            Expr::Builtin { func: Builtin::Replace, args, .. } => {
                assert!(matches!(&args[0], Expr::Identifier { name, .. } if name == "word"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn math_builtins() {
        match expr("round price to 2 places") {
            Expr::Builtin { func: Builtin::Round, args, .. } => assert_eq!(args.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(func_of(&expr("square root of 16")), Some(Builtin::SquareRoot));
        assert_eq!(func_of(&expr("random number between 1 and 6")), Some(Builtin::Random));
        assert_eq!(func_of(&expr("maximum of a and b")), Some(Builtin::Maximum));
        assert_eq!(func_of(&expr("power of 2 to 10")), Some(Builtin::Power));
    }

    #[test]
    fn prefix_conversion() {
        assert!(matches!(
            expr("as a number answer"),
            Expr::Convert { target: Conversion::Number, .. }
        ));
    }

    #[test]
    fn substring_without_of_is_a_variable() {
        assert!(matches!(expr("substring"), Expr::Identifier { ref name, .. } if name == "substring"));
    }
}
