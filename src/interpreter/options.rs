/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     options.rs
 * Purpose:  Host-tunable interpreter settings.
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

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings a host passes to [`crate::Interpreter::with_options`].
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change:
///
/// ```
/// let opts = prose::InterpreterOptions::from_json(r#"{ "max_while_iterations": 100 }"#).unwrap();
/// assert_eq!(opts.max_while_iterations, 100);
/// assert!(opts.program_args.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterpreterOptions {
    /// A `While` loop that runs more iterations than this is aborted with a
    /// runtime error.
    pub max_while_iterations: u64,

    /// Returned by `the command line arguments`.
    pub program_args: Vec<String>,

    /// Directory relative import paths are resolved against. `None` means
    /// the process working directory.
    pub module_search_dir: Option<PathBuf>,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_while_iterations: 10_000_000,
            program_args: Vec::new(),
            module_search_dir: None,
        }
    }
}

impl InterpreterOptions {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Resolves an import or file path against `module_search_dir`.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        match &self.module_search_dir {
            Some(dir) if candidate.is_relative() => dir.join(candidate),
            _ => candidate.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = InterpreterOptions::default();
        assert_eq!(opts.max_while_iterations, 10_000_000);
        assert!(opts.module_search_dir.is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts = InterpreterOptions::from_json(r#"{ "program_args": ["a", "b"] }"#).unwrap();
        assert_eq!(opts.program_args, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(opts.max_while_iterations, 10_000_000);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(InterpreterOptions::from_json("{ nope").is_err());
    }

    #[test]
    fn relative_paths_use_the_search_dir() {
        let opts = InterpreterOptions {
            module_search_dir: Some(PathBuf::from("/srv/prose")),
            ..Default::default()
        };
        assert_eq!(opts.resolve_path("lib.prose"), PathBuf::from("/srv/prose/lib.prose"));
        assert_eq!(opts.resolve_path("/abs.prose"), PathBuf::from("/abs.prose"));
    }
}
