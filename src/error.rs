/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:      error.rs
 * Purpose:   Error taxonomy shared by every stage of the pipeline.
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

use thiserror::Error;

/// An unreadable character or an unterminated string literal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct LexError {
    /// Fully rendered, user-facing message.
    pub message: String,

    /// Line on which the lexer gave up.
    pub line: usize,
}

impl LexError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// A grammar violation: unexpected token or missing keyword.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Rendered message, always prefixed with `Line N:`.
    pub message: String,

    /// Line of the offending token.
    pub line: usize,
}

impl ParseError {
    pub fn new(line: usize, message: impl AsRef<str>) -> Self {
        Self {
            message: format!("Line {}: {}", line, message.as_ref()),
            line,
        }
    }
}

/// Any failure raised while executing a program.
///
/// Runtime errors collect one frame per function or method call they unwind
/// through, innermost first. [`RuntimeError::traceback`] renders them the
/// way `Attempt ... Rescue error as e.` exposes them to programs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    /// Rendered message, prefixed with `Line N:` when a line is known.
    pub message: String,

    /// Source line the error was raised on, if any.
    pub line: Option<usize>,

    frames: Vec<String>,
}

impl RuntimeError {
    /// An error with no source position.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            frames: Vec::new(),
        }
    }

    /// An error raised on a specific source line.
    pub fn at(line: usize, message: impl AsRef<str>) -> Self {
        Self {
            message: format!("Line {}: {}", line, message.as_ref()),
            line: Some(line),
            frames: Vec::new(),
        }
    }

    /// Records the call site this error is unwinding through.
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Call frames, innermost first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Message plus a rendered call stack, outermost call first.
    pub fn traceback(&self) -> String {
        if self.frames.is_empty() {
            return self.message.clone();
        }

        let mut out = format!("{}\nTraceback (most recent call last):", self.message);
        for frame in self.frames.iter().rev() {
            out.push_str("\n  in ");
            out.push_str(frame);
        }
        out
    }
}

/// Result of running a statement list at the top level.
///
/// `Stop` and `Skip` are loop-control signals that escaped every loop.
/// They are usage mistakes, not program failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("'Stop loop.' can only be used inside a loop.")]
    Stop,

    #[error("'Skip to next.' can only be used inside a loop.")]
    Skip,
}

/// Any error produced by [`crate::Interpreter::run_source`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

pub type LexResult<T> = Result<T, LexError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_prefixes_line() {
        let err = RuntimeError::at(4, "I cannot divide by zero.");
        assert_eq!(err.to_string(), "Line 4: I cannot divide by zero.");
        assert_eq!(err.line, Some(4));
    }

    #[test]
    fn traceback_lists_outermost_call_first() {
        let err = RuntimeError::at(2, "boom")
            .with_frame("function 'inner' at line 5")
            .with_frame("function 'outer' at line 9");

        assert_eq!(
            err.traceback(),
            "Line 2: boom\nTraceback (most recent call last):\n  in function 'outer' at line 9\n  in function 'inner' at line 5"
        );
    }

    #[test]
    fn traceback_without_frames_is_the_message() {
        let err = RuntimeError::new("plain");
        assert_eq!(err.traceback(), "plain");
    }

    #[test]
    fn loop_signals_render_as_usage_warnings() {
        assert_eq!(
            ExecError::Stop.to_string(),
            "'Stop loop.' can only be used inside a loop."
        );
        assert_eq!(
            ExecError::Skip.to_string(),
            "'Skip to next.' can only be used inside a loop."
        );
    }
}
