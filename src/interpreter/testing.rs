/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     testing.rs
 * Purpose:  The in-language test runner behind `Run all tests.`
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

use tracing::debug;

use crate::error::ExecError;
use crate::interpreter::environment::Scope;
use crate::interpreter::statements::ExecSignal;
use crate::interpreter::Interpreter;

const RULE_WIDTH: usize = 50;

/// Outcome of one `Run all tests.`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
}

impl TestSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

impl Interpreter {
    /// Runs every registered `Test` block in definition order and prints a
    /// report to the console.
    ///
    /// # Behavior
    /// - Each test gets a fresh scope under the globals.
    /// - A test fails on the first error it raises, including a failed
    ///   `Assert`; the remaining tests still run.
    /// - `Give back` ends a test early and counts as a pass.
    pub fn run_all_tests(&self) -> TestSummary {
        let tests = self.definitions().tests.clone();
        let rule = "=".repeat(RULE_WIDTH);
        let mut summary = TestSummary::default();

        self.console.println(&format!("\n{}", rule));
        self.console
            .println(&format!("  Running {} test(s)...", tests.len()));
        self.console.println(&format!("{}\n", rule));

        let globals = self.global_scope();
        for test in &tests {
            let failure = match self.execute_block(&test.body, &Scope::child(&globals)) {
                Ok(()) | Err(ExecSignal::Return(_)) => None,
                Err(ExecSignal::Error(err)) => Some(err.message),
                Err(ExecSignal::Stop) => Some(ExecError::Stop.to_string()),
                Err(ExecSignal::Skip) => Some(ExecError::Skip.to_string()),
            };

            match failure {
                None => {
                    summary.passed += 1;
                    self.console.println(&format!("  ✓ {}", test.name));
                }
                Some(message) => {
                    summary.failed += 1;
                    self.console.println(&format!("  ✗ {}", test.name));
                    self.console.println(&format!("    → {}", message));
                }
            }
        }

        self.console.println(&format!("\n{}", rule));
        self.console.println(&format!(
            "  Results: {} passed, {} failed, {} total",
            summary.passed,
            summary.failed,
            summary.total()
        ));
        self.console.println(&format!("{}\n", rule));

        debug!(passed = summary.passed, failed = summary.failed, "tests finished");
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_prints_a_zero_report() {
        let interp = Interpreter::new().with_captured_output();
        let summary = interp.run_all_tests();
        assert_eq!(summary.total(), 0);

        let out = interp.captured_output();
        assert!(out.contains("  Running 0 test(s)..."));
        assert!(out.contains("  Results: 0 passed, 0 failed, 0 total"));
    }
}
