/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     tasks.rs
 * Purpose:  Background tasks started by async functions and methods.
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

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::error::{RuntimeError, RuntimeResult};
use crate::sync::lock;
use crate::value::Value;

/// Handle to one async call running on its own thread.
///
/// The first `wait` joins the thread and keeps its outcome; later waits
/// return the same outcome again.
#[derive(Clone)]
pub struct TaskHandle {
    label: Arc<str>,
    state: Arc<Mutex<TaskState>>,
}

enum TaskState {
    Running(JoinHandle<RuntimeResult<Value>>),
    Finished(RuntimeResult<Value>),
}

impl TaskHandle {
    /// Starts `work` on a new OS thread.
    ///
    /// # Errors
    /// Fails only when the operating system refuses to create the thread.
    pub fn spawn<F>(label: impl Into<String>, work: F) -> RuntimeResult<Self>
    where
        F: FnOnce() -> RuntimeResult<Value> + Send + 'static,
    {
        let label: String = label.into();
        let handle = thread::Builder::new()
            .name(format!("prose-{}", label))
            .spawn(work)
            .map_err(|e| {
                RuntimeError::new(format!("Could not start background task '{}'. ({})", label, e))
            })?;

        debug!(task = %label, "spawned background task");

        Ok(Self {
            label: label.into(),
            state: Arc::new(Mutex::new(TaskState::Running(handle))),
        })
    }

    /// Blocks until the task is done and returns its result or error.
    pub fn wait(&self) -> RuntimeResult<Value> {
        let mut state = lock(&self.state);

        if let TaskState::Running(_) = &*state {
            let placeholder = TaskState::Finished(Ok(Value::Nothing));
            if let TaskState::Running(handle) = std::mem::replace(&mut *state, placeholder) {
                let outcome = handle.join().unwrap_or_else(|_| {
                    Err(RuntimeError::new(format!(
                        "Background task '{}' crashed.",
                        self.label
                    )))
                });
                debug!(task = %self.label, ok = outcome.is_ok(), "joined background task");
                *state = TaskState::Finished(outcome);
            }
        }

        match &*state {
            TaskState::Finished(outcome) => outcome.clone(),
            TaskState::Running(_) => Ok(Value::Nothing),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn same_task(&self, other: &TaskHandle) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_returns_the_result() {
        let task = TaskHandle::spawn("double", || Ok(Value::Number(42.0))).unwrap();
        assert_eq!(task.wait(), Ok(Value::Number(42.0)));
    }

    #[test]
    fn waiting_twice_gives_the_same_outcome() {
        let task = TaskHandle::spawn("fail", || Err(RuntimeError::new("nope"))).unwrap();
        assert_eq!(task.wait().unwrap_err().message, "nope");
        assert_eq!(task.wait().unwrap_err().message, "nope");
    }

    #[test]
    fn clones_are_the_same_task() {
        let task = TaskHandle::spawn("noop", || Ok(Value::Nothing)).unwrap();
        assert!(task.same_task(&task.clone()));
        task.wait().unwrap();
    }
}
