/*
 * ==========================================================================
 * PROSE - Programs in Plain English
 * ==========================================================================
 *
 * File:     fs.rs
 * Purpose:  Whole-file reads and writes.
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

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Reads a UTF-8 file into a string.
pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Writes `content` to `path`, creating the file when missing.
///
/// `append` keeps existing content; otherwise the file is replaced.
pub fn write_text(path: &Path, content: &str, append: bool) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    file.write_all(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_append_and_read_back() {
        let path = std::env::temp_dir().join(format!("prose-fs-{}.txt", std::process::id()));

        write_text(&path, "first", false).unwrap();
        write_text(&path, " second", true).unwrap();
        assert_eq!(read_text(&path).unwrap(), "first second");

        write_text(&path, "replaced", false).unwrap();
        assert_eq!(read_text(&path).unwrap(), "replaced");

        fs::remove_file(&path).unwrap();
        assert!(read_text(&path).is_err());
    }
}
