/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     console.rs
 * Purpose:  Where `Say`, `Display` and `Ask` read and write.
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

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use crate::sync::lock;

/// Program I/O handle.
///
/// Cloning a console shares the same sinks, so async workers and imported
/// modules print into the same place as the program that started them.
#[derive(Clone)]
pub struct Console {
    output: Output,
    input: Arc<Mutex<Input>>,
}

#[derive(Clone)]
enum Output {
    Stdout,
    Captured(Arc<Mutex<String>>),
}

enum Input {
    Stdin,
    Scripted(VecDeque<String>),
}

impl Console {
    /// Prints to stdout, reads from stdin.
    pub fn stdio() -> Self {
        Self {
            output: Output::Stdout,
            input: Arc::new(Mutex::new(Input::Stdin)),
        }
    }

    /// Collects everything printed into a buffer, see [`Console::captured`].
    pub fn capturing() -> Self {
        Self {
            output: Output::Captured(Arc::new(Mutex::new(String::new()))),
            input: Arc::new(Mutex::new(Input::Stdin)),
        }
    }

    /// Replaces the input source with a fixed list of lines. Reads past
    /// the end behave like end-of-file.
    pub fn with_input_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *lock(&self.input) = Input::Scripted(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Writes `text` followed by a newline.
    pub fn println(&self, text: &str) {
        match &self.output {
            Output::Stdout => println!("{}", text),
            Output::Captured(buf) => {
                let mut buf = lock(buf);
                buf.push_str(text);
                buf.push('\n');
            }
        }
    }

    /// Writes `text` with no newline, flushing stdout so prompts appear.
    pub fn print(&self, text: &str) {
        match &self.output {
            Output::Stdout => {
                let mut out = io::stdout();
                // A closed stdout only loses the prompt.
                let _ = out.write_all(text.as_bytes());
                let _ = out.flush();
            }
            Output::Captured(buf) => lock(buf).push_str(text),
        }
    }

    /// One line of input without its trailing newline, or `None` at end of
    /// input.
    pub fn read_line(&self) -> Option<String> {
        let mut input = lock(&self.input);
        match &mut *input {
            Input::Scripted(lines) => lines.pop_front(),
            Input::Stdin => {
                let mut line = String::new();
                match io::stdin().lock().read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
                }
            }
        }
    }

    /// Everything printed so far when capturing, `None` for stdout.
    pub fn captured(&self) -> Option<String> {
        match &self.output {
            Output::Stdout => None,
            Output::Captured(buf) => Some(lock(buf).clone()),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_lines() {
        let console = Console::capturing();
        console.println("a");
        console.print("b");
        console.println("c");
        assert_eq!(console.captured().as_deref(), Some("a\nbc\n"));
    }

    #[test]
    fn clones_share_the_buffer() {
        let console = Console::capturing();
        console.clone().println("from a clone");
        assert_eq!(console.captured().as_deref(), Some("from a clone\n"));
    }

    #[test]
    fn scripted_input_runs_out() {
        let console = Console::capturing().with_input_lines(["first"]);
        assert_eq!(console.read_line().as_deref(), Some("first"));
        assert_eq!(console.read_line(), None);
    }

    #[test]
    fn stdout_has_no_capture() {
        assert_eq!(Console::stdio().captured(), None);
    }
}
