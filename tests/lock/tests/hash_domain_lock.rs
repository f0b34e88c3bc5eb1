//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique (prevents domain collision)
//! 3. All domains are null-terminated (wire format invariant)
//! 4. All domains follow the `BFSTEP::*::V1\0` naming convention
//! 5. No raw `BFSTEP::` domain literals in production source outside `hash_domain.rs`
//! 6. No `deny_unknown_fields` in production source (configs and states stay extensible)
//!
//! Scans 5 and 6 read every `.rs` file under the production crates' `src/`
//! up to its trailing `#[cfg(test)] mod tests` block.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bfstep_kernel::proof::hash::HashDomain;

const PRODUCTION_DIRS: [&str; 3] = [
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
];

// ---------------------------------------------------------------------------
// 1. Canonical set count
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        6,
        "expected 6 domain variants; if you added a new domain, update this count"
    );
}

// ---------------------------------------------------------------------------
// 2. All unique bytes
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

// ---------------------------------------------------------------------------
// 3. All null-terminated
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_null_terminated() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(bytes.ends_with(&[0]), "{domain} is not null-terminated");
        assert_eq!(
            bytes.iter().filter(|&&b| b == 0).count(),
            1,
            "{domain} has an interior null"
        );
    }
}

// ---------------------------------------------------------------------------
// 4. Naming convention
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"BFSTEP::"),
            "{domain} does not start with BFSTEP::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

// ---------------------------------------------------------------------------
// 5. No raw BFSTEP:: domain literals in production source
// ---------------------------------------------------------------------------

/// The only file allowed to spell out domain bytes is `hash_domain.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let violations: Vec<String> = production_lines()
        .filter(|line| !line.path.ends_with("hash_domain.rs"))
        .filter(|line| line.text.contains("b\"BFSTEP::"))
        .map(|line| line.to_string())
        .collect();

    assert!(
        violations.is_empty(),
        "raw BFSTEP:: domain literals found outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

// ---------------------------------------------------------------------------
// 6. No deny_unknown_fields in production source
// ---------------------------------------------------------------------------

#[test]
fn no_deny_unknown_fields_in_production_code() {
    let violations: Vec<String> = production_lines()
        .filter(|line| line.text.contains("deny_unknown_fields"))
        .map(|line| line.to_string())
        .collect();

    assert!(
        violations.is_empty(),
        "deny_unknown_fields found in production code:\n{}",
        violations.join("\n")
    );
}

// ---------------------------------------------------------------------------
// Source scanning
// ---------------------------------------------------------------------------

/// Marker that opens a file's unit-test module. Everything after it is test
/// code and is left out of the production scan.
const TEST_MODULE_MARKER: [&str; 2] = ["#[cfg(test)]", "mod tests {"];

/// One non-comment line of production source.
struct SourceLine {
    path: PathBuf,
    number: usize,
    text: String,
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}:{}: {}", self.path.display(), self.number, self.text)
    }
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

fn production_sources() -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in PRODUCTION_DIRS {
        rust_sources(Path::new(dir), &mut files);
    }
    files.sort();
    files
}

/// Trimmed lines of every production file, stopping at the test module and
/// dropping `//` comment lines.
fn production_lines() -> impl Iterator<Item = SourceLine> {
    production_sources().into_iter().flat_map(|path| {
        let content = fs::read_to_string(&path).unwrap_or_default();
        let lines: Vec<&str> = content.lines().map(str::trim).collect();
        let cut = lines
            .windows(2)
            .position(|pair| pair == TEST_MODULE_MARKER)
            .unwrap_or(lines.len());
        lines[..cut]
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.starts_with("//"))
            .map(|(i, text)| SourceLine {
                path: path.clone(),
                number: i + 1,
                text: (*text).to_string(),
            })
            .collect::<Vec<_>>()
    })
}

/// Test modules must be the single trailing `mod tests` block, otherwise
/// cutting at the marker would hide production code from the scans above.
#[test]
fn test_modules_trail_their_files() {
    for path in production_sources() {
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let cfg_test = lines
            .iter()
            .filter(|line| line.trim() == TEST_MODULE_MARKER[0])
            .count();
        if cfg_test == 0 {
            continue;
        }
        assert_eq!(cfg_test, 1, "{}: more than one #[cfg(test)]", path.display());
        let open = lines
            .windows(2)
            .position(|pair| pair == TEST_MODULE_MARKER)
            .unwrap_or_else(|| panic!("{}: #[cfg(test)] not on `mod tests`", path.display()));
        let body = &lines[open + 1..];
        let closing = body.iter().rposition(|line| !line.trim().is_empty()).unwrap();
        assert_eq!(body[closing], "}", "{}: code after the test module", path.display());
        let top_level_closes = body[..closing].iter().filter(|line| **line == "}").count();
        assert_eq!(top_level_closes, 0, "{}: code after the test module", path.display());
    }
}

#[test]
fn production_scan_sees_the_authority_file() {
    let authority: Vec<SourceLine> = production_lines()
        .filter(|line| line.path.ends_with("hash_domain.rs"))
        .filter(|line| line.text.contains("b\"BFSTEP::"))
        .collect();
    assert_eq!(authority.len(), HashDomain::ALL.len());
}

#[test]
fn production_dirs_exist() {
    for dir in &PRODUCTION_DIRS {
        assert!(Path::new(dir).is_dir(), "missing {dir}");
    }
}
