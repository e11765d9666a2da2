/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:      lexer.rs
 * Purpose:   Converts raw source text into a flat stream of tokens.
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

use tracing::debug;

use crate::error::{LexError, LexResult};
use crate::lexer::token::{Token, TokenKind};

/// Tokenizes a complete Prose program.
///
/// Comment lines are blanked first, then the remaining text is scanned.
///
/// # Returns
/// The token stream, always terminated by a single `Eof` token.
///
/// # Errors
/// A [`LexError`] naming the first unreadable character, or the line of an
/// unterminated string.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(&strip_comments(source));
    lexer.scan_tokens()?;
    debug!(tokens = lexer.tokens.len(), "tokenized source");
    Ok(lexer.tokens)
}

/// Blanks every line whose first non-whitespace text is `Note:`
/// (case-insensitive).
///
/// The line itself is kept as an empty line so later line numbers stay
/// accurate for diagnostics.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_note = trimmed
            .get(..5)
            .map(|head| head.eq_ignore_ascii_case("note:"))
            .unwrap_or(false);

        if is_note {
            if line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
        }
    }

    out
}

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    pub tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a lexer positioned at the start of `source`, on line 1.
    ///
    /// `source` is scanned as given; use [`tokenize`] to strip comment
    /// lines first.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Scans the whole input and appends the final `Eof` marker.
    ///
    /// # Behavior
    /// - Skips whitespace, `...` and both inline comment styles
    /// - Tracks line numbers through strings and blank comment lines
    pub fn scan_tokens(&mut self) -> LexResult<()> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", self.line));
        Ok(())
    }

    fn scan_token(&mut self) -> LexResult<()> {
        let ch = self.advance();

        match ch {
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '.' => {
                if self.peek() == '.' && self.peek_next() == '.' {
                    // Ellipsis reads as a pause, not punctuation.
                    self.current += 2;
                } else {
                    self.add(TokenKind::Period, ".");
                }
            }

            ',' => self.add(TokenKind::Comma, ","),
            ':' => self.add(TokenKind::Colon, ":"),
            '{' => self.add(TokenKind::LeftBrace, "{"),
            '}' => self.add(TokenKind::RightBrace, "}"),
            '"' => self.string()?,

            '+' => self.add(TokenKind::Plus, "+"),
            '*' => self.add(TokenKind::Star, "*"),
            '%' => self.add(TokenKind::Percent, "%"),
            '=' => self.add(TokenKind::Equal, "="),

            '-' => {
                if self.peek() == '-' && self.peek_next() == '-' {
                    self.skip_line();
                } else {
                    self.add(TokenKind::Minus, "-");
                }
            }

            '/' => {
                if self.peek() == '/' {
                    self.skip_line();
                } else {
                    self.add(TokenKind::Slash, "/");
                }
            }

            '!' => {
                if self.match_char('=') {
                    self.add(TokenKind::NotEqual, "!=");
                } else {
                    return Err(self.unknown_character(ch));
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.add(TokenKind::LessEqual, "<=");
                } else {
                    self.add(TokenKind::Less, "<");
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.add(TokenKind::GreaterEqual, ">=");
                } else {
                    self.add(TokenKind::Greater, ">");
                }
            }

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.word(),

            other => return Err(self.unknown_character(other)),
        }

        Ok(())
    }

    /// Reads a double-quoted string. The opening quote is already consumed.
    ///
    /// Two renderings are built side by side: a fully decoded one for plain
    /// strings, and one that keeps `\{` and `\\` escaped for templates. An
    /// unescaped `{` anywhere in the string makes it a template.
    fn string(&mut self) -> LexResult<()> {
        let start_line = self.line;
        let mut plain = String::new();
        let mut template = String::new();
        let mut interpolated = false;

        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();

            if c == '\\' && !self.is_at_end() {
                let escaped = match self.peek() {
                    'n' => Some('\n'),
                    't' => Some('\t'),
                    '"' => Some('"'),
                    '{' => Some('{'),
                    '\\' => Some('\\'),
                    _ => None,
                };

                if let Some(decoded) = escaped {
                    let raw = self.advance();
                    plain.push(decoded);
                    if raw == '{' || raw == '\\' {
                        template.push('\\');
                        template.push(raw);
                    } else {
                        template.push(decoded);
                    }
                    continue;
                }
            }

            if c == '{' {
                interpolated = true;
            }
            if c == '\n' {
                self.line += 1;
            }
            plain.push(c);
            template.push(c);
        }

        if self.is_at_end() {
            return Err(LexError::new(
                start_line,
                format!("Line {}: Unclosed string.", start_line),
            ));
        }

        // closing quote
        self.advance();

        let token = if interpolated {
            Token::new(TokenKind::Template, template, start_line)
        } else {
            Token::new(TokenKind::Text, plain, start_line)
        };
        self.tokens.push(token);
        Ok(())
    }

    /// Digits with at most one decimal point. A `.` only belongs to the
    /// number when a digit follows it; otherwise it ends the sentence.
    fn number(&mut self) {
        let start = self.current - 1;
        let mut seen_point = false;

        loop {
            let c = self.peek();
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !seen_point && self.peek_next().is_ascii_digit() {
                seen_point = true;
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.chars[start..self.current].iter().collect();
        self.add(TokenKind::Number, text);
    }

    fn word(&mut self) {
        let start = self.current - 1;

        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();
        self.add(TokenKind::Word, text);
    }

    fn skip_line(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn unknown_character(&self, ch: char) -> LexError {
        LexError::new(
            self.line,
            format!(
                "I am sorry, but I do not understand the character '{}' on line {}. \
                 Prose allows letters, digits, spaces, quotes, commas, periods, colons, \
                 and math symbols (+ - * / % = < > !).",
                ch, self.line
            ),
        )
    }

    /* ---------------------------------------------------------------------
     * Cursor helpers
     * ------------------------------------------------------------------- */

    fn add(&mut self, kind: TokenKind, lexeme: impl Into<String>) {
        self.tokens.push(Token::new(kind, lexeme, self.line));
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn sentence_tokens() {
        let tokens = tokenize("Let x be 3 plus 4.").unwrap();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["Let", "x", "be", "3", "plus", "4", ".", ""]);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn trailing_period_is_not_part_of_number() {
        let tokens = tokenize("Say 3.5.").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].lexeme, "3.5");
        assert_eq!(tokens[2].kind, TokenKind::Period);
    }

    #[test]
    fn number_takes_at_most_one_decimal_point() {
        let tokens = tokenize("1.2.3").unwrap();
        assert_eq!(tokens[0].lexeme, "1.2");
        assert_eq!(tokens[1].kind, TokenKind::Period);
        assert_eq!(tokens[2].lexeme, "3");
    }

    #[test]
    fn note_lines_are_blanked_but_counted() {
        let tokens = tokenize("Note: ignore me.\n  note: me too\nSay hi.").unwrap();
        assert_eq!(tokens[0].lexeme, "Say");
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn inline_comments_and_ellipsis_are_skipped() {
        assert_eq!(
            kinds("Say hi. --- trailing\nSay ... yo. // more"),
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Period,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Period,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn comparison_symbols() {
        assert_eq!(
            kinds("< <= > >= = != + - * / %"),
            vec![
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn string_escapes_are_decoded() {
        let tokens = tokenize(r#""a\tb\n\"c\" \{x}""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].lexeme, "a\tb\n\"c\" {x}");
    }

    #[test]
    fn braces_make_a_template_and_keep_escapes() {
        let tokens = tokenize(r#""total {x} \{raw}""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Template);
        assert_eq!(tokens[0].lexeme, r"total {x} \{raw}");
    }

    #[test]
    fn multiline_string_advances_line_counter() {
        let tokens = tokenize("Say \"one\ntwo\".\nSay x.").unwrap();
        assert_eq!(tokens[1].line, 1);
        assert_eq!(tokens[3].lexeme, "Say");
        assert_eq!(tokens[3].line, 3);
    }

    #[test]
    fn unclosed_string_reports_its_start_line() {
        let err = tokenize("Say hi.\nSay \"oops.").unwrap_err();
        assert_eq!(err.message, "Line 2: Unclosed string.");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn unknown_character_is_fatal() {
        let err = tokenize("Let x be 1.\nSay x#.").unwrap_err();
        assert!(err.message.contains("character '#' on line 2"));
    }

    #[test]
    fn lone_bang_is_rejected() {
        assert!(tokenize("If x ! 3").is_err());
    }
}
