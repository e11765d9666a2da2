/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     interpolation.rs
 * Purpose:  Splits `"Hello, {name}!"` into literal and expression parts.
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

use crate::ast::{Expr, TemplatePart};
use crate::error::{ParseError, ParseResult};
use crate::lexer::tokenize;
use crate::parser::parser::Parser;

impl Parser {
    /// Builds an [`Expr::Template`] from a template lexeme.
    ///
    /// # Parameters
    /// - `raw`: the string contents with `\{` and `\\` still escaped
    /// - `line`: line of the string literal
    ///
    /// # Behavior
    /// Each `{...}` span (braces may nest) is tokenized and parsed as a
    /// single expression. Anything after the expression inside the span
    /// is ignored.
    ///
    /// # Errors
    /// - `Unclosed '{' in interpolated string.`
    /// - `Empty interpolation {} in string.`
    pub fn template(&mut self, raw: &str, line: usize) -> ParseResult<Expr> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => literal.push(escaped),
                    None => literal.push('\\'),
                },
                '{' => {
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }

                    let mut depth = 1;
                    let mut inner = String::new();
                    for c in chars.by_ref() {
                        match c {
                            '{' => depth += 1,
                            '}' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        inner.push(c);
                    }

                    if depth != 0 {
                        return Err(ParseError::new(
                            line,
                            "Unclosed '{' in interpolated string.",
                        ));
                    }

                    let inner = inner.trim();
                    if inner.is_empty() {
                        return Err(ParseError::new(line, "Empty interpolation {} in string."));
                    }
                    parts.push(TemplatePart::Expr(interpolated_expr(inner, line)?));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Ok(Expr::Template { parts, line })
    }
}

/// Parses one `{...}` span, reporting positions on the string's line.
fn interpolated_expr(source: &str, line: usize) -> ParseResult<Expr> {
    let mut tokens = tokenize(&format!("{}.", source)).map_err(|_| {
        ParseError::new(
            line,
            format!("I could not read the interpolation {{{}}}.", source),
        )
    })?;

    for token in &mut tokens {
        token.line += line - 1;
    }

    Parser::new(tokens).expr()
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, TemplatePart};
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn template(source: &str) -> Vec<TemplatePart> {
        let tokens = tokenize(source).unwrap();
        match Parser::new(tokens).expr().unwrap() {
            Expr::Template { parts, .. } => parts,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn literal_and_expression_parts() {
        let parts = template(r#""Hello, {name}!""#);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], TemplatePart::Literal("Hello, ".into()));
        assert!(matches!(&parts[1], TemplatePart::Expr(Expr::Identifier { name, .. }) if name == "name"));
        assert_eq!(parts[2], TemplatePart::Literal("!".into()));
    }

    #[test]
    fn expression_parts_are_full_expressions() {
        let parts = template(r#""{x plus 1}""#);
        assert!(matches!(&parts[0], TemplatePart::Expr(Expr::Binary { .. })));
    }

    #[test]
    fn escaped_brace_stays_literal() {
        let parts = template(r#""a {x} \{b}""#);
        assert_eq!(parts.last(), Some(&TemplatePart::Literal(" {b}".into())));
    }

    #[test]
    fn empty_interpolation_is_rejected() {
        let tokens = tokenize(r#""a {} b""#).unwrap();
        let err = Parser::new(tokens).expr().unwrap_err();
        assert_eq!(err.to_string(), "Line 1: Empty interpolation {} in string.");
    }

    #[test]
    fn unclosed_brace_is_rejected() {
        let tokens = tokenize(r#""a {b""#).unwrap();
        let err = Parser::new(tokens).expr().unwrap_err();
        assert_eq!(err.to_string(), "Line 1: Unclosed '{' in interpolated string.");
    }

    #[test]
    fn inner_positions_use_the_string_line() {
        let tokens = tokenize("\n\n\"{x}\"").unwrap();
        let expr = Parser::new(tokens).expr().unwrap();
        match expr {
            Expr::Template { parts, .. } => {
                assert!(matches!(&parts[0], TemplatePart::Expr(e) if e.line() == 3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
