//! Bans panicking shortcuts and silent error discards from production code.
//!
//! Every check walks `src/` (the `_test.rs` siblings are exempt) and counts
//! occurrences of a banned construct. All budgets are zero: errors in this
//! crate are either propagated, coerced to a documented default, or logged —
//! never unwrapped away. Raising a budget requires a defense in review.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Production `.rs` files under `src/`, with their contents.
fn production_sources() -> Vec<(PathBuf, String)> {
    let mut pending = vec![PathBuf::from("src")];
    let mut sources = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_production_rs(&path) {
                if let Ok(text) = fs::read_to_string(&path) {
                    sources.push((path, text));
                }
            }
        }
    }
    sources
}

fn is_production_rs(path: &Path) -> bool {
    if path.extension().is_none_or(|ext| ext != "rs") {
        return false;
    }
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| !name.ends_with("_test.rs"))
}

fn assert_budget(pattern: &str, budget: usize) {
    let mut found = 0;
    let mut offenders = Vec::new();
    for (path, text) in production_sources() {
        let hits = text.lines().filter(|line| line.contains(pattern)).count();
        if hits > 0 {
            found += hits;
            offenders.push(format!("  {} ({hits})", path.display()));
        }
    }
    assert!(
        found <= budget,
        "`{pattern}` appears {found} times in src/, budget is {budget}:\n{}",
        offenders.join("\n")
    );
}

#[test]
fn no_unwrap() {
    assert_budget(".unwrap()", 0);
}

#[test]
fn no_expect() {
    assert_budget(".expect(", 0);
}

#[test]
fn no_panic() {
    assert_budget("panic!(", 0);
}

#[test]
fn no_unreachable() {
    assert_budget("unreachable!(", 0);
}

#[test]
fn no_todo() {
    assert_budget("todo!(", 0);
}

#[test]
fn no_unimplemented() {
    assert_budget("unimplemented!(", 0);
}

#[test]
fn no_discarded_results() {
    assert_budget("let _ =", 0);
}

#[test]
fn no_ok_swallowing() {
    assert_budget(".ok()", 0);
}

#[test]
fn no_dead_code_waivers() {
    assert_budget("#[allow(dead_code)]", 0);
}
