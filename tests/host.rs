/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     host.rs
 * Purpose:  End-to-end checks of imports, host registration and the GUI
 *           bridge.
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

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use prose::{Interpreter, InterpreterOptions, NativeFunction, RuntimeError, Value};

const SHAPES: &str = "Let scale be 2.\n\
Define a function called area that takes w and h and does the following.\n\
Give back w times h times scale.\n\
End function.\n";

/// A per-test directory holding `shapes.prose`.
fn module_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("prose-{}-{}", tag, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("shapes.prose"), SHAPES).unwrap();
    dir
}

fn interpreter_in(dir: PathBuf) -> Interpreter {
    let options = InterpreterOptions {
        module_search_dir: Some(dir),
        ..InterpreterOptions::default()
    };
    Interpreter::with_options(options).with_captured_output()
}

fn run(interp: &Interpreter, src: &str) -> String {
    if let Err(e) = interp.run_source(src) {
        panic!("program failed:\n{}\nError: {}", src, e);
    }
    interp.captured_output()
}

fn run_err(interp: &Interpreter, src: &str) -> String {
    match interp.run_source(src) {
        Ok(()) => panic!("expected failure but program ran:\n{}", src),
        Err(e) => e.to_string(),
    }
}

/* --------------------------------------------------------------------------
 * Imports
 * -------------------------------------------------------------------------- */

#[test]
fn named_imports_keep_module_variables_private() {
    let interp = interpreter_in(module_dir("named"));
    let out = run(
        &interp,
        "Import {area} from \"shapes.prose\".\n\
         Let size be the result of calling area with 3, 4.\n\
         Say size.\n\
         Say scale.",
    );
    assert_eq!(out, "24\nscale\n");
}

#[test]
fn aliased_imports_are_namespaces() {
    let interp = interpreter_in(module_dir("alias"));
    let out = run(
        &interp,
        "Import \"shapes.prose\" as shapes.\n\
         Let size be the result of calling area on shapes with 1, 1.\n\
         Say size.\n\
         Say the scale of shapes.",
    );
    assert_eq!(out, "2\n2\n");
}

#[test]
fn bare_file_imports_run_in_the_globals() {
    let interp = interpreter_in(module_dir("bare"));
    let out = run(
        &interp,
        "Import \"shapes.prose\".\n\
         Say scale.\n\
         Let size be the result of calling area with 2, 5.\n\
         Say size.",
    );
    assert_eq!(out, "2\n20\n");
}

#[test]
fn missing_exports_and_files_are_reported() {
    let interp = interpreter_in(module_dir("missing"));
    assert_eq!(
        run_err(&interp, "Import {volume} from \"shapes.prose\"."),
        "Line 1: Cannot import 'volume' because it was not found in 'shapes.prose'."
    );

    let err = run_err(&interp, "Import \"nowhere.prose\".");
    assert!(err.contains("Could not read file 'nowhere.prose' for import."), "{}", err);
}

#[test]
fn builtin_modules_join_globals_or_namespaces() {
    let interp = Interpreter::new().with_captured_output();
    let out = run(
        &interp,
        "Import \"collections\".\n\
         Let numbers be a list containing 3, 1, 2.\n\
         Let sorted be the result of calling collections_sort with numbers.\n\
         Say sorted.\n\
         Say numbers.\n\
         Import \"string\" as s.\n\
         Let ok be the result of calling string_startsWith on s with \"prose\", \"pro\".\n\
         Say ok.",
    );
    assert_eq!(out, "[1, 2, 3]\n[3, 1, 2]\ntrue\n");
}

#[test]
fn host_only_modules_need_registration() {
    let interp = Interpreter::new().with_captured_output();
    let err = run_err(&interp, "Import \"gui\".");
    assert!(err.contains("The 'gui' module is not available."), "{}", err);
}

/* --------------------------------------------------------------------------
 * Host registration
 * -------------------------------------------------------------------------- */

fn greeter() -> HashMap<String, Value> {
    let hello = NativeFunction::new("hello", |args: Vec<Value>| {
        Ok(Value::text(format!("Hello, {}", args[0])))
    });
    HashMap::from([("hello".to_string(), Value::from(hello))])
}

#[test]
fn registered_functions_and_namespaces_are_callable() {
    let interp = Interpreter::new().with_captured_output();
    interp.register_function(
        "shout",
        NativeFunction::new("shout", |args: Vec<Value>| {
            Ok(Value::text(args[0].to_string().to_uppercase()))
        }),
    );
    interp.register_namespace("greeter", greeter());

    let out = run(
        &interp,
        "Let loud be the result of calling shout with \"hey\".\n\
         Say loud.\n\
         Let msg be the result of calling hello on greeter with \"Ada\".\n\
         Say msg.",
    );
    assert_eq!(out, "HEY\nHello, Ada\n");
}

#[test]
fn registered_modules_import_under_their_name() {
    let interp = Interpreter::new().with_captured_output();
    interp.register_module("greetings", greeter);

    let out = run(
        &interp,
        "Import \"greetings\".\n\
         Let msg be the result of calling hello on greetings with \"Bo\".\n\
         Say msg.",
    );
    assert_eq!(out, "Hello, Bo\n");
}

#[test]
fn native_failures_carry_the_call_site() {
    let interp = Interpreter::new().with_captured_output();
    interp.register_function(
        "fail",
        NativeFunction::new("fail", |_| Err(RuntimeError::new("boom"))),
    );
    assert_eq!(
        run_err(&interp, "Let x be 1.\nCall fail."),
        "Line 2: Native function 'fail' failed: boom"
    );
}

/* --------------------------------------------------------------------------
 * GUI bridge
 * -------------------------------------------------------------------------- */

type Log = Arc<Mutex<Vec<String>>>;
type Callbacks = Arc<Mutex<Vec<Value>>>;

/// A `gui` module that records every call instead of drawing.
fn fake_gui(log: Log, callbacks: Callbacks) -> HashMap<String, Value> {
    let mut module = HashMap::new();

    let calls = Arc::clone(&log);
    module.insert(
        "create_window".to_string(),
        Value::from(NativeFunction::new("create_window", move |args: Vec<Value>| {
            calls.lock().unwrap().push(format!(
                "create_window {} {} {}",
                args[0], args[1], args[2]
            ));
            Ok(Value::text("win1"))
        })),
    );

    let calls = Arc::clone(&log);
    let handlers = Arc::clone(&callbacks);
    module.insert(
        "add_widget".to_string(),
        Value::from(NativeFunction::new("add_widget", move |args: Vec<Value>| {
            calls.lock().unwrap().push(format!(
                "add_widget {} {} {} {} {} {}",
                args[0], args[1], args[2], args[3], args[4], args[5]
            ));
            if args[6].is_callable() {
                handlers.lock().unwrap().push(args[6].clone());
            }
            Ok(Value::text(format!("w-{}", args[1])))
        })),
    );

    let calls = Arc::clone(&log);
    let handlers = Arc::clone(&callbacks);
    module.insert(
        "bind_event".to_string(),
        Value::from(NativeFunction::new("bind_event", move |args: Vec<Value>| {
            calls
                .lock()
                .unwrap()
                .push(format!("bind_event {} {}", args[0], args[1]));
            handlers.lock().unwrap().push(args[2].clone());
            Ok(Value::Nothing)
        })),
    );

    let calls = Arc::clone(&log);
    module.insert(
        "run_window".to_string(),
        Value::from(NativeFunction::new("run_window", move |args: Vec<Value>| {
            calls.lock().unwrap().push(format!("run_window {}", args[0]));
            Ok(Value::Nothing)
        })),
    );

    module
}

#[test]
fn gui_statements_drive_the_host_module() {
    let log: Log = Arc::default();
    let callbacks: Callbacks = Arc::default();

    let interp = Interpreter::new().with_captured_output();
    {
        let log = Arc::clone(&log);
        let callbacks = Arc::clone(&callbacks);
        interp.register_module("gui", move || {
            fake_gui(Arc::clone(&log), Arc::clone(&callbacks))
        });
    }

    run(
        &interp,
        "Create a window called calc with title \"Calc\" and size 300 by 400.\n\
         Add a button \"7\" called seven to calc at row 1 column 0 that does the following.\n\
         Say pressed seven.\n\
         End button.\n\
         Add an input called entry to calc.\n\
         When user presses Enter on entry do the following.\n\
         Say submitted.\n\
         End when.\n\
         Run calc.",
    );

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "create_window Calc 300 400",
            "add_widget win1 button 7 1 0 nothing",
            "add_widget win1 input nothing nothing nothing nothing",
            "bind_event enter w-input",
            "run_window win1",
        ]
    );

    let handlers = callbacks.lock().unwrap().clone();
    assert_eq!(handlers.len(), 2);
    for handler in &handlers {
        interp.call_value(handler, Vec::new()).unwrap();
    }
    assert_eq!(interp.captured_output(), "pressed seven\nsubmitted\n");
}

#[test]
fn gui_statements_without_a_host_fail() {
    let interp = Interpreter::new().with_captured_output();
    let err = run_err(
        &interp,
        "Create a window called w with title \"T\" and size 10 by 10.",
    );
    assert_eq!(
        err,
        "Line 1: GUI statements need a 'gui' module registered by the host."
    );
}
