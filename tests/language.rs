/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     language.rs
 * Purpose:  End-to-end checks of core sentences: variables, loops,
 *           functions, errors and the test runner.
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

use prose::{Interpreter, InterpreterOptions};

fn run(src: &str) -> String {
    let interp = Interpreter::new().with_captured_output();
    if let Err(e) = interp.run_source(src) {
        panic!("program failed:\n{}\nError: {}", src, e);
    }
    interp.captured_output()
}

fn run_err(src: &str) -> String {
    let interp = Interpreter::new().with_captured_output();
    match interp.run_source(src) {
        Ok(()) => panic!("expected failure but program ran:\n{}", src),
        Err(e) => e.to_string(),
    }
}

#[test]
fn arithmetic_and_output() {
    let out = run("Let x be 3 plus 4.\nSay x.\nLet half be 6 divided by 2.\nSay half.");
    assert_eq!(out, "7\n3\n");
}

#[test]
fn lists_grow_and_print() {
    let out = run(
        "Let items be a list containing 1, 2, 3.\n\
         Add 4 to items.\n\
         Say items.\n\
         Let n be the length of items.\n\
         Say n.",
    );
    assert_eq!(out, "[1, 2, 3, 4]\n4\n");
}

#[test]
fn division_by_zero_reports_the_line() {
    assert_eq!(
        run_err("Let x be 1.\nLet y be x divided by 0."),
        "Line 2: I cannot divide by zero."
    );
}

#[test]
fn range_loops_include_the_end() {
    let out = run("For each i from 1 to 10 step 3 do the following.\nSay i.\nEnd for.");
    assert_eq!(out, "1\n4\n7\n10\n");
}

#[test]
fn range_step_cannot_be_zero() {
    let err = run_err("For each i from 1 to 3 step 0 do the following.\nSay i.\nEnd for.");
    assert!(err.contains("the step cannot be zero"), "{}", err);
}

#[test]
fn stop_and_skip_steer_loops() {
    let out = run(
        "For each i from 1 to 5 do the following.\n\
         If i is 2 then do the following.\n\
         Skip to next.\n\
         End if.\n\
         If i is 4 then do the following.\n\
         Stop loop.\n\
         End if.\n\
         Say i.\n\
         End for.",
    );
    assert_eq!(out, "1\n3\n");
}

#[test]
fn repeat_skips_one_pass_and_stops_early() {
    let out = run(
        "Let n be 0.\n\
         Repeat 5 times do the following.\n\
         Let n be n plus 1.\n\
         If n is 3 then do the following.\n\
         Skip to next.\n\
         End if.\n\
         Say n.\n\
         End repeat.\n\
         Let m be 0.\n\
         Repeat 5 times do the following.\n\
         Let m be m plus 1.\n\
         If m is greater than 2 then do the following.\n\
         Stop loop.\n\
         End if.\n\
         Say m.\n\
         End repeat.",
    );
    assert_eq!(out, "1\n2\n4\n5\n1\n2\n");
}

#[test]
fn block_locals_do_not_leak() {
    let out = run(
        "If true then do the following.\n\
         Let inner be 1.\n\
         End if.\n\
         Say inner.",
    );
    assert_eq!(out, "inner\n");
}

#[test]
fn stop_outside_a_loop_is_an_error() {
    assert_eq!(
        run_err("Stop loop."),
        "'Stop loop.' can only be used inside a loop."
    );
}

#[test]
fn while_loops_are_capped() {
    let options = InterpreterOptions {
        max_while_iterations: 5,
        ..InterpreterOptions::default()
    };
    let interp = Interpreter::with_options(options).with_captured_output();

    interp
        .run_source(
            "Let n be 0.\n\
             While n is less than 3 do the following.\n\
             Let n be n plus 1.\n\
             End while.\n\
             Say n.",
        )
        .unwrap();
    assert_eq!(interp.captured_output(), "3\n");

    let err = interp
        .run_source(
            "While n is less than 100 do the following.\n\
             Let n be n plus 1.\n\
             End while.",
        )
        .unwrap_err()
        .to_string();
    assert!(err.contains("far too long"), "{}", err);
}

#[test]
fn functions_take_defaults_and_give_back() {
    let out = run(
        "Define a function called greet that takes name and greeting defaulting to \"Hello\" and does the following.\n\
         Say greeting, name.\n\
         End function.\n\
         Call greet with \"Ada\".\n\
         Call greet with \"Bo\", \"Hi\".\n\
         Define a function called add that takes x and y and does the following.\n\
         Give back x plus y.\n\
         End function.\n\
         Let total be the result of calling add with 2, 3.\n\
         Say total.",
    );
    assert_eq!(out, "Hello Ada\nHi Bo\n5\n");
}

#[test]
fn functions_update_outer_variables() {
    let out = run(
        "Let count be 0.\n\
         Define a function called bump that takes no parameters and does the following.\n\
         Let count be count plus 1.\n\
         End function.\n\
         Call bump.\n\
         Call bump.\n\
         Say count.",
    );
    assert_eq!(out, "2\n");
}

#[test]
fn lambdas_capture_and_map() {
    let out = run(
        "Let base be 10.\n\
         Let addbase be a function that takes x and gives back x plus base.\n\
         Let r be the result of calling addbase with 5.\n\
         Say r.\n\
         Let numbers be a list containing 1, 2, 3.\n\
         Let double be a function that takes x and gives back x times 2.\n\
         Let doubled be the result of mapping double over numbers.\n\
         Say doubled.\n\
         Let big be all n in numbers where n is greater than 1.\n\
         Say big.",
    );
    assert_eq!(out, "15\n[2, 4, 6]\n[2, 3]\n");
}

#[test]
fn closures_see_the_latest_value() {
    let out = run(
        "Let x be 1.\n\
         Let first be a function that takes no parameters and gives back x.\n\
         Let second be a function that takes no parameters and gives back x.\n\
         Let x be 2.\n\
         Let p be the result of calling first.\n\
         Let q be the result of calling second.\n\
         Say p, q.",
    );
    assert_eq!(out, "2 2\n");
}

#[test]
fn try_hands_the_message_to_the_handler() {
    let out = run(
        "Try the following.\n\
         Throw error \"disk full\".\n\
         Handle error and save it as problem.\n\
         Say problem.\n\
         End try.",
    );
    assert_eq!(out, "Line 2: disk full\n");
}

#[test]
fn attempt_rescues_runtime_errors() {
    let out = run(
        "Attempt to do the following.\n\
         Let x be 1 divided by 0.\n\
         Rescue error as oops.\n\
         Say oops.\n\
         End attempt.",
    );
    assert_eq!(out, "Line 2: I cannot divide by zero.\n");
}

#[test]
fn attempt_body_locals_stay_inside() {
    let out = run(
        "Attempt to do the following.\n\
         Let leaked be 9.\n\
         Rescue error as e.\n\
         Say e.\n\
         End attempt.\n\
         Say leaked.",
    );
    assert_eq!(out, "leaked\n");
}

#[test]
fn check_compares_loosely() {
    let out = run(
        "Let day be \"2\".\n\
         Check day.\n\
         When 1, Say Monday.\n\
         When 2, Say Tuesday.\n\
         Otherwise, Say Someday.\n\
         End check.",
    );
    assert_eq!(out, "Tuesday\n");
}

#[test]
fn ask_reads_the_next_input_line() {
    let interp = Interpreter::new()
        .with_captured_output()
        .with_input_lines(["Ada"]);
    interp
        .run_source("Ask the user for name.\nSay Hello, name.")
        .unwrap();
    assert_eq!(
        interp.captured_output(),
        "Please enter a value for name: Hello Ada\n"
    );
}

#[test]
fn async_functions_are_awaited() {
    let out = run(
        "Define an async function called work that takes n and does the following.\n\
         Give back n times 2.\n\
         End function.\n\
         Let job be the result of calling work with 21.\n\
         Let answer be waiting for job.\n\
         Say answer.",
    );
    assert_eq!(out, "42\n");
}

#[test]
fn async_errors_surface_when_waited() {
    let out = run(
        "Define an async function called work that takes no parameters and does the following.\n\
         Throw error \"kaboom\".\n\
         End function.\n\
         Let job be the result of calling work.\n\
         Try the following.\n\
         Let answer be waiting for job.\n\
         Say answer.\n\
         Handle error and save it as problem.\n\
         Say problem.\n\
         End try.",
    );
    assert_eq!(out, "Line 2: kaboom\n");
}

#[test]
fn json_text_and_back() {
    let out = run(
        "Let d be a dictionary containing \"a\": 1, \"b\": \"x\".\n\
         Let s be the json for d.\n\
         Say s.\n\
         Let back be the json parsed from text s.\n\
         Say the value for \"b\" in back.",
    );
    assert_eq!(out, "{\"a\": 1, \"b\": \"x\"}\nx\n");
}

#[test]
fn enum_members_resolve_by_name() {
    let out = run(
        "Define an enum called Color with values Red, Green and Blue.\n\
         Let c be the Green of Color.\n\
         Say c.\n\
         Let other be Color Purple.\n\
         Say other.",
    );
    assert_eq!(out, "Green\nColor Purple\n");
}

#[test]
fn test_runner_counts_passes_and_failures() {
    let out = run(
        "Test \"addition\".\n\
         Assert 1 plus 1 is 2.\n\
         End test.\n\
         Test \"broken\".\n\
         Assert 1 is 2.\n\
         End test.\n\
         Run all tests.",
    );
    assert!(out.contains("  Running 2 test(s)..."), "{}", out);
    assert!(out.contains("  ✓ addition\n"), "{}", out);
    assert!(out.contains("  ✗ broken\n    → Line 5: Assertion failed.\n"), "{}", out);
    assert!(out.contains("  Results: 1 passed, 1 failed, 2 total"), "{}", out);
}

#[test]
fn parse_errors_stop_before_anything_runs() {
    let interp = Interpreter::new().with_captured_output();
    let err = interp.run_source("Say first.\nLet x be 5\nSay x.").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Line 3: I expected a period to end the statement but found 'Say'."
    );
    assert_eq!(interp.captured_output(), "");
}
