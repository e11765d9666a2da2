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

use crate::error::{ParseError, ParseResult};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// The token under the cursor.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Looks `offset` tokens ahead, clamped to the final `Eof`.
    pub fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Consumes and returns the current token. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        token
    }

    /// Returns true if the parser is at EOF.
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Line of the current token.
    pub fn line(&self) -> usize {
        self.peek().line
    }

    /* ------------------------------------------------------------------
     * Speculative parsing
     * ------------------------------------------------------------------ */

    /// Saves the cursor so an ambiguous phrase can be retried as plain words.
    pub fn checkpoint(&self) -> usize {
        self.current
    }

    pub fn rewind(&mut self, checkpoint: usize) {
        self.current = checkpoint;
    }

    /* ------------------------------------------------------------------
     * Word matching
     * ------------------------------------------------------------------ */

    /// Checks for a word (case-insensitive) without consuming it.
    pub fn check_word(&self, word: &str) -> bool {
        self.peek().is_word(word)
    }

    pub fn check_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.check_word(w))
    }

    /// True when the token `offset` ahead is the given word.
    pub fn peek_word_is(&self, offset: usize, word: &str) -> bool {
        self.peek_at(offset).is_word(word)
    }

    /// Matches a word and consumes it if present.
    pub fn match_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn match_any(&mut self, words: &[&str]) -> bool {
        if self.check_any(words) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a required word.
    ///
    /// # Errors
    /// `Line N: I expected 'word' but found 'x'.`
    pub fn expect_word(&mut self, word: &str) -> ParseResult<Token> {
        self.expect_one_of(&[word])
    }

    /// Consumes one of several accepted words.
    pub fn expect_one_of(&mut self, words: &[&str]) -> ParseResult<Token> {
        if self.check_any(words) {
            return Ok(self.advance());
        }

        let token = self.advance();
        let expected = words
            .iter()
            .map(|w| format!("'{}'", w))
            .collect::<Vec<_>>()
            .join(" or ");

        Err(ParseError::new(
            token.line,
            format!("I expected {} but found '{}'.", expected, token.lexeme),
        ))
    }

    /// Consumes a fixed run of words: `do the following`.
    pub fn expect_phrase(&mut self, words: &[&str]) -> ParseResult<()> {
        for word in words {
            self.expect_word(word)?;
        }
        Ok(())
    }

    /// `do the following.` opening every block.
    pub fn expect_block_opener(&mut self) -> ParseResult<()> {
        self.expect_phrase(&["do", "the", "following"])?;
        self.expect_period()
    }

    /// `End <what>.` closing a block.
    pub fn expect_block_end(&mut self, what: &str) -> ParseResult<()> {
        self.expect_phrase(&["End", what])?;
        self.expect_period()
    }

    /* ------------------------------------------------------------------
     * Token kinds
     * ------------------------------------------------------------------ */

    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check_kind(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Every statement ends with a period.
    pub fn expect_period(&mut self) -> ParseResult<()> {
        let token = self.advance();
        if token.kind != TokenKind::Period {
            return Err(ParseError::new(
                token.line,
                format!(
                    "I expected a period to end the statement but found '{}'.",
                    token.lexeme
                ),
            ));
        }
        Ok(())
    }

    pub fn expect_comma(&mut self) -> ParseResult<()> {
        let token = self.advance();
        if token.kind != TokenKind::Comma {
            return Err(ParseError::new(
                token.line,
                format!("I expected a comma but found '{}'.", token.lexeme),
            ));
        }
        Ok(())
    }

    /// Consumes a single word used as a name.
    ///
    /// # Parameters
    /// - `line`: line reported when the name is missing
    /// - `message`: the complaint, e.g. `After 'Let' I expected a variable name.`
    pub fn expect_name(&mut self, line: usize, message: &str) -> ParseResult<String> {
        let token = self.advance();
        if token.kind != TokenKind::Word {
            return Err(ParseError::new(line, message));
        }
        Ok(token.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tokenize;
    use crate::parser::Parser;

    fn parser(source: &str) -> Parser {
        Parser::new(tokenize(source).unwrap())
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut p = parser("Say");
        p.advance();
        p.advance();
        p.advance();
        assert!(p.is_at_end());
    }

    #[test]
    fn words_match_case_insensitively() {
        let mut p = parser("END if");
        assert!(p.match_word("end"));
        assert!(p.check_word("IF"));
    }

    #[test]
    fn expect_word_reports_what_it_found() {
        let mut p = parser("Let x equal 5.");
        p.advance();
        p.advance();
        let err = p.expect_word("be").unwrap_err();
        assert_eq!(err.to_string(), "Line 1: I expected 'be' but found 'equal'.");
    }

    #[test]
    fn rewind_restores_cursor() {
        let mut p = parser("the age of rex");
        let saved = p.checkpoint();
        p.advance();
        p.advance();
        p.rewind(saved);
        assert!(p.check_word("the"));
    }
}
