/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     time.rs
 * Purpose:  Clock builtins and the importable `time` module.
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

use chrono::{Datelike, Local, Utc};

use crate::prototypes::install;
use crate::value::Value;

/// Exports of `Import "time".`
///
/// # Installed Functions
/// - `time_now()`: seconds since the Unix epoch, with a fractional part
pub fn create_time_module() -> HashMap<String, Value> {
    let mut time = HashMap::new();
    install(&mut time, "time_now", |_| Ok(Value::Number(epoch_seconds())));
    time
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// `the current date and time`, local ISO 8601 with microseconds.
pub fn current_date_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// `the current year`
pub fn current_year() -> f64 {
    Local::now().year() as f64
}

/// `the current timestamp`, whole seconds since the Unix epoch.
pub fn current_timestamp() -> f64 {
    Utc::now().timestamp() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_is_iso_formatted() {
        let now = current_date_time();
        assert_eq!(now.len(), 26);
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], "T");
    }

    #[test]
    fn timestamps_agree() {
        let whole = current_timestamp();
        assert_eq!(whole.fract(), 0.0);
        assert!(epoch_seconds() >= whole);
        assert!(current_year() >= 2024.0);
    }
}
