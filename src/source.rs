// SPDX-License-Identifier: PMPL-1.0-or-later

//! Source acquisition for the CLI and sweep drivers
//!
//! The analysis core never touches the filesystem; everything that does
//! goes through here.

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Read a source file as text, accepting UTF-8 with a Windows-1252
/// fallback for legacy files.
pub fn read_source(path: &Path) -> Result<String> {
    let raw_bytes = fs::read(path)?;

    match String::from_utf8(raw_bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let (cow, _, had_errors) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                anyhow::bail!(
                    "not a text file (neither UTF-8 nor Latin-1): {}",
                    path.display()
                );
            }
            Ok(cow.into_owned())
        }
    }
}
