/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     builtins.rs
 * Purpose:  Evaluation of keyword builtins (`the length of`, `round`, ...).
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

use std::env;

use crate::ast::{Builtin, Expr};
use crate::error::{RuntimeError, RuntimeResult};
use crate::interpreter::environment::ScopeRef;
use crate::interpreter::operators::assert_num;
use crate::interpreter::Interpreter;
use crate::prototypes::{fs, http, json, math, regex, string, time};
use crate::sync::read;
use crate::value::Value;

impl Interpreter {
    /// Evaluates a builtin's operands, then the builtin itself.
    ///
    /// Operand order is the order the parser stored them in; see
    /// [`Builtin`] for the ones that differ from reading order.
    pub(crate) fn eval_builtin(
        &self,
        func: Builtin,
        args: &[Expr],
        env: &ScopeRef,
        line: usize,
    ) -> RuntimeResult<Value> {
        let args = self.eval_args(args, env)?;
        self.apply_builtin(func, args, line)
    }

    fn apply_builtin(&self, func: Builtin, args: Vec<Value>, line: usize) -> RuntimeResult<Value> {
        let arg = |i: usize| args.get(i).cloned().unwrap_or(Value::Nothing);
        let num = |i: usize| assert_num(&arg(i), func.label(), line);
        let located = |e: RuntimeError| RuntimeError::at(line, e.message);

        let value = match func {
            /* ----------------------------------------------------------
             * Text and collections
             * ---------------------------------------------------------- */
            Builtin::Length => match arg(0) {
                Value::Text(s) => Value::Number(s.chars().count() as f64),
                Value::List(items) => Value::Number(read(&items).len() as f64),
                _ => {
                    return Err(RuntimeError::at(
                        line,
                        "Can only get length of a list or text.",
                    ))
                }
            },

            Builtin::Keys => match arg(0) {
                Value::Dict(dict) => Value::list(read(&dict).keys()),
                _ => return Err(RuntimeError::at(line, "Can only get keys from a dictionary.")),
            },

            Builtin::Uppercase => Value::Text(arg(0).to_string().to_uppercase()),
            Builtin::Lowercase => Value::Text(arg(0).to_string().to_lowercase()),
            Builtin::Trim => Value::Text(arg(0).to_string().trim().to_string()),

            Builtin::Split => Value::list(string::split(&arg(0).to_string(), &arg(1).to_string())),

            Builtin::Join => Value::Text(string::join(&arg(0), &arg(1).to_string()).map_err(located)?),

            Builtin::Replace => Value::Text(
                arg(0)
                    .to_string()
                    .replace(&arg(1).to_string(), &arg(2).to_string()),
            ),

            Builtin::RepeatText => {
                let times = self.whole_number(&arg(1), line)?;
                Value::Text(string::repeat(&arg(0).to_string(), times))
            }

            Builtin::IndexOf => Value::Number(string::index_of(&arg(0), &arg(1)).map_err(located)?),

            Builtin::Substring => {
                let from = self.whole_number(&arg(1), line)?;
                let to = self.whole_number(&arg(2), line)?;
                Value::Text(string::substring(&arg(0).to_string(), from, to))
            }

            Builtin::CharacterAt => {
                let index = self.whole_number(&arg(1), line)?;
                Value::Text(string::character_at(&arg(0).to_string(), index).map_err(located)?)
            }

            /* ----------------------------------------------------------
             * Math
             * ---------------------------------------------------------- */
            Builtin::Round => {
                let x = num(0)?;
                let places = match args.get(1) {
                    Some(places) => Some(self.whole_number(places, line)?),
                    None => None,
                };
                Value::Number(math::round(x, places))
            }
            Builtin::Absolute => Value::Number(num(0)?.abs()),
            Builtin::SquareRoot => Value::Number(math::square_root(num(0)?).map_err(located)?),
            Builtin::Floor => Value::Number(num(0)?.floor()),
            Builtin::Ceiling => Value::Number(num(0)?.ceil()),
            Builtin::Random => Value::Number(math::random_between(num(0)?, num(1)?)),
            Builtin::Minimum => Value::Number(num(0)?.min(num(1)?)),
            Builtin::Maximum => Value::Number(num(0)?.max(num(1)?)),
            Builtin::Power => Value::Number(num(0)?.powf(num(1)?)),

            /* ----------------------------------------------------------
             * Services
             * ---------------------------------------------------------- */
            Builtin::JsonParse => json::parse(&arg(0)).map_err(located)?,
            Builtin::JsonStringify => Value::Text(json::stringify(&arg(0)).map_err(located)?),
            Builtin::HttpGet => http::get(&arg(0)).map_err(located)?,
            Builtin::HttpPost => http::post(&arg(0), &arg(1)).map_err(located)?,
            Builtin::RegexMatch => {
                regex::first_match(&arg(0).to_string(), &arg(1).to_string()).map_err(located)?
            }

            Builtin::FileContents => {
                let path = arg(0).to_string();
                let text = fs::read_text(&self.options.resolve_path(&path)).map_err(|e| {
                    RuntimeError::at(line, format!("Could not read file '{}'. ({})", path, e))
                })?;
                Value::Text(text)
            }

            Builtin::EnvironmentVariable => env::var(arg(0).to_string())
                .map(Value::Text)
                .unwrap_or(Value::Nothing),

            Builtin::CommandLineArguments => Value::list(
                self.options
                    .program_args
                    .iter()
                    .map(|a| Value::text(a.as_str()))
                    .collect(),
            ),

            Builtin::CurrentDateTime => Value::Text(time::current_date_time()),
            Builtin::CurrentYear => Value::Number(time::current_year()),
            Builtin::CurrentTimestamp => Value::Number(time::current_timestamp()),
        };

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::options::InterpreterOptions;

    fn apply(func: Builtin, args: Vec<Value>) -> RuntimeResult<Value> {
        Interpreter::new().apply_builtin(func, args, 7)
    }

    #[test]
    fn text_builtins() {
        assert_eq!(apply(Builtin::Uppercase, vec!["hi".into()]), Ok(Value::text("HI")));
        assert_eq!(apply(Builtin::Length, vec!["héllo".into()]), Ok(Value::Number(5.0)));
        assert_eq!(
            apply(Builtin::Replace, vec!["a-b-c".into(), "-".into(), "+".into()]),
            Ok(Value::text("a+b+c"))
        );
        assert_eq!(
            apply(Builtin::RepeatText, vec!["ab".into(), 3.0.into()]),
            Ok(Value::text("ababab"))
        );
    }

    #[test]
    fn errors_carry_the_line() {
        assert_eq!(
            apply(Builtin::Length, vec![3.0.into()]).unwrap_err().to_string(),
            "Line 7: Can only get length of a list or text."
        );
        assert_eq!(
            apply(Builtin::SquareRoot, vec![(-4.0).into()]).unwrap_err().to_string(),
            "Line 7: I cannot take the square root of a negative number."
        );
        assert_eq!(
            apply(Builtin::Floor, vec!["x".into()]).unwrap_err().to_string(),
            "Line 7: 'x' is not a number, so I cannot use 'floor'."
        );
    }

    #[test]
    fn math_builtins() {
        assert_eq!(apply(Builtin::Round, vec![2.5.into()]), Ok(Value::Number(2.0)));
        assert_eq!(
            apply(Builtin::Round, vec![2.675.into(), 1.0.into()]),
            Ok(Value::Number(2.7))
        );
        assert_eq!(apply(Builtin::Power, vec![2.0.into(), 10.0.into()]), Ok(Value::Number(1024.0)));
        assert_eq!(apply(Builtin::Minimum, vec![4.0.into(), (-1.0).into()]), Ok(Value::Number(-1.0)));
    }

    #[test]
    fn command_line_arguments_come_from_options() {
        let interp = Interpreter::with_options(InterpreterOptions {
            program_args: vec!["--fast".to_string()],
            ..InterpreterOptions::default()
        });
        let args = interp
            .apply_builtin(Builtin::CommandLineArguments, Vec::new(), 1)
            .unwrap();
        assert_eq!(args.to_string(), "[--fast]");
    }

    #[test]
    fn missing_files_name_the_path() {
        let err = apply(Builtin::FileContents, vec!["/no/such/prose-file.txt".into()]).unwrap_err();
        assert!(err
            .message
            .starts_with("Line 7: Could not read file '/no/such/prose-file.txt'."));
    }
}
