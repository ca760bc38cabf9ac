//! Resolve a `--province` / `--city` argument against a listing.
//!
//! An argument that parses as an integer matches the remote code; anything
//! else matches the name, ignoring case and surrounding whitespace.

use anyhow::bail;
use regio_core::entities::{City, Province};

pub trait Named {
    fn name(&self) -> &str;
    fn code(&self) -> i64;
}

impl Named for Province {
    fn name(&self) -> &str {
        &self.name
    }

    fn code(&self) -> i64 {
        self.code
    }
}

impl Named for City {
    fn name(&self) -> &str {
        &self.name
    }

    fn code(&self) -> i64 {
        self.code
    }
}

/// Find the row `needle` refers to.
///
/// # Errors
///
/// Fails when nothing in `rows` matches.
pub fn find<'a, T: Named>(rows: &'a [T], needle: &str, kind: &str) -> anyhow::Result<&'a T> {
    let needle = needle.trim();
    let hit = match needle.parse::<i64>() {
        Ok(code) => rows.iter().find(|row| row.code() == code),
        Err(_) => rows
            .iter()
            .find(|row| row.name().to_lowercase() == needle.to_lowercase()),
    };
    match hit {
        Some(row) => Ok(row),
        None => bail!("no {kind} matches '{needle}'"),
    }
}
