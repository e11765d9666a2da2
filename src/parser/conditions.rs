/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     conditions.rs
 * Purpose:  Comparisons, type checks and `and` / `or` chains.
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

use crate::ast::{Comparison, Condition, Connective, TypeName};
use crate::error::{ParseError, ParseResult};
use crate::lexer::token::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// condition → single { (and | or) single }
    ///
    /// There is no precedence between `and` and `or`; chains fold left.
    pub fn condition(&mut self) -> ParseResult<Condition> {
        let mut left = self.single_condition()?;

        loop {
            let connective = if self.match_word("and") {
                Connective::And
            } else if self.match_word("or") {
                Connective::Or
            } else {
                break;
            };

            let right = self.single_condition()?;
            left = Condition::Compound {
                left: Box::new(left),
                connective,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn single_condition(&mut self) -> ParseResult<Condition> {
        let line = self.line();

        if self.match_word("file") {
            let path = self.expr()?;
            self.expect_word("exists")?;
            return Ok(Condition::FileExists { path, line });
        }

        let left = self.expr()?;
        if left.is_boolean() {
            return Ok(Condition::Truthy { expr: left, line });
        }

        let token = self.peek().clone();
        let symbol = match token.kind {
            TokenKind::Greater => Some(Comparison::Greater),
            TokenKind::GreaterEqual => Some(Comparison::GreaterEqual),
            TokenKind::Less => Some(Comparison::Less),
            TokenKind::LessEqual => Some(Comparison::LessEqual),
            TokenKind::Equal => Some(Comparison::Equal),
            TokenKind::NotEqual => Some(Comparison::NotEqual),
            _ => None,
        };

        let op = if let Some(op) = symbol {
            self.advance();
            op
        } else if self.match_word("equals") {
            Comparison::Equal
        } else if self.match_word("is") {
            if self.match_word("greater") {
                self.expect_word("than")?;
                self.or_equal_to(Comparison::Greater, Comparison::GreaterEqual)?
            } else if self.match_word("less") {
                self.expect_word("than")?;
                self.or_equal_to(Comparison::Less, Comparison::LessEqual)?
            } else if self.match_word("equal") {
                self.expect_word("to")?;
                Comparison::Equal
            } else if self.match_word("not") {
                if self.match_word("equal") {
                    self.expect_word("to")?;
                }
                Comparison::NotEqual
            } else if self.match_word("a") {
                let kind_token = self.advance();
                let kind = TypeName::from_word(&kind_token.lexeme).ok_or_else(|| {
                    ParseError::new(
                        line,
                        format!(
                            "After 'is a' I expected 'number', 'text', 'list', or 'boolean' but found '{}'.",
                            kind_token.lexeme
                        ),
                    )
                })?;
                return Ok(Condition::TypeCheck {
                    expr: left,
                    kind,
                    line,
                });
            } else if let Some(kind) = self.peek_type_name() {
                self.advance();
                return Ok(Condition::TypeCheck {
                    expr: left,
                    kind,
                    line,
                });
            } else {
                Comparison::Equal
            }
        } else if self.match_word("has") {
            self.expect_word("the")?;
            let kind = self.expect_one_of(&["key", "pattern"])?;
            if kind.is_word("key") {
                Comparison::HasKey
            } else {
                Comparison::Matches
            }
        } else {
            return Err(ParseError::new(
                line,
                format!(
                    "I expected a comparison operator (like 'is greater than', '>', '=', etc.) but found '{}'.",
                    token.lexeme
                ),
            ));
        };

        let right = self.expr()?;
        Ok(Condition::Compare {
            left,
            op,
            right,
            line,
        })
    }

    fn peek_type_name(&self) -> Option<TypeName> {
        if !self.check_kind(TokenKind::Word) {
            return None;
        }
        TypeName::from_word(&self.peek().lexeme)
    }

    /// Optional `or equal to` after `greater than` / `less than`.
    ///
    /// An `or` that is not followed by `equal` starts the next condition
    /// of a chain and is left alone.
    fn or_equal_to(&mut self, strict: Comparison, inclusive: Comparison) -> ParseResult<Comparison> {
        if self.check_word("or") && self.peek_word_is(1, "equal") {
            self.advance();
            self.advance();
            self.expect_word("to")?;
            return Ok(inclusive);
        }
        Ok(strict)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Comparison, Condition, Connective, TypeName};
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn condition(source: &str) -> Condition {
        Parser::new(tokenize(source).unwrap()).condition().unwrap()
    }

    fn op_of(cond: &Condition) -> Option<Comparison> {
        match cond {
            Condition::Compare { op, .. } => Some(*op),
            _ => None,
        }
    }

    #[test]
    fn english_comparisons() {
        assert_eq!(op_of(&condition("x is greater than 3")), Some(Comparison::Greater));
        assert_eq!(
            op_of(&condition("x is less than or equal to 3")),
            Some(Comparison::LessEqual)
        );
        assert_eq!(op_of(&condition("x is equal to 3")), Some(Comparison::Equal));
        assert_eq!(op_of(&condition("x is not equal to 3")), Some(Comparison::NotEqual));
        assert_eq!(op_of(&condition("x is not 3")), Some(Comparison::NotEqual));
        assert_eq!(op_of(&condition("x equals 3")), Some(Comparison::Equal));
        assert_eq!(op_of(&condition("name is Bob")), Some(Comparison::Equal));
    }

    #[test]
    fn symbol_comparisons() {
        assert_eq!(op_of(&condition("x >= 3")), Some(Comparison::GreaterEqual));
        assert_eq!(op_of(&condition("x != 3")), Some(Comparison::NotEqual));
    }

    #[test]
    fn type_checks_with_and_without_article() {
        assert!(matches!(
            condition("x is a number"),
            Condition::TypeCheck { kind: TypeName::Number, .. }
        ));
        assert!(matches!(
            condition("x is list"),
            Condition::TypeCheck { kind: TypeName::List, .. }
        ));
    }

    #[test]
    fn bad_type_name() {
        let err = Parser::new(tokenize("x is a dog").unwrap())
            .condition()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 1: After 'is a' I expected 'number', 'text', 'list', or 'boolean' but found 'dog'."
        );
    }

    #[test]
    fn key_and_pattern_tests() {
        assert_eq!(op_of(&condition("d has the key \"a\"")), Some(Comparison::HasKey));
        assert_eq!(
            op_of(&condition("email has the pattern \"@\"")),
            Some(Comparison::Matches)
        );
    }

    #[test]
    fn chains_fold_left() {
        match condition("a is 1 and b is 2 or c is 3") {
            Condition::Compound {
                left, connective, ..
            } => {
                assert_eq!(connective, Connective::Or);
                assert!(matches!(
                    *left,
                    Condition::Compound { connective: Connective::And, .. }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn greater_than_then_or_chain() {
        assert!(matches!(
            condition("x is greater than 3 or x is 0"),
            Condition::Compound { connective: Connective::Or, .. }
        ));
    }

    #[test]
    fn contains_stands_alone() {
        assert!(matches!(condition("names contains \"Bo\""), Condition::Truthy { .. }));
    }

    #[test]
    fn file_exists() {
        assert!(matches!(condition("file \"a.txt\" exists"), Condition::FileExists { .. }));
    }

    #[test]
    fn missing_operator() {
        let err = Parser::new(tokenize("x then").unwrap())
            .condition()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 1: I expected a comparison operator (like 'is greater than', '>', '=', etc.) but found 'then'."
        );
    }
}
