//! Fixture source generation.
//!
//! Each specification file yields one `<stem>.g.rs` fixture declaring a
//! `#[test]` per scenario; the test delegates to
//! `plainspec::fixture::run_scenario` so failures surface as ordinary test
//! panics. Output is only rewritten when the generated content changes, so
//! repeated runs leave build timestamps alone.

use std::fs;
use std::io;

use camino::Utf8Path;
use plainspec::SpecificationDocument;

/// Render the fixture source for one parsed specification file.
///
/// `spec_path` is embedded verbatim in the generated calls, so it should be
/// the path test runs will resolve, typically relative to the crate root.
/// A feature `ignore` header becomes an `#[ignore = "…"]` attribute on every
/// generated test.
#[must_use]
pub fn fixture_source(
    document: &SpecificationDocument,
    spec_path: &Utf8Path,
    module: Option<&str>,
) -> String {
    let ignore = document
        .feature
        .as_ref()
        .and_then(|feature| feature.header("ignore"));
    let indent = if module.is_some() { "    " } else { "" };

    let mut source = String::new();
    source.push_str(&format!(
        "// Generated from {} by plainspec. Do not edit.\n",
        spec_path.file_name().unwrap_or_else(|| spec_path.as_str()),
    ));
    if let Some(name) = module {
        source.push_str(&format!("\nmod {name} {{\n"));
    }

    let mut used: Vec<String> = Vec::new();
    for scenario in &document.scenarios {
        let test_name = unique_identifier(&scenario.name, &mut used);
        source.push('\n');
        source.push_str(&format!("{indent}#[test]\n"));
        if let Some(reason) = ignore {
            source.push_str(&format!("{indent}#[ignore = {reason:?}]\n"));
        }
        source.push_str(&format!("{indent}fn {test_name}() {{\n"));
        source.push_str(&format!(
            "{indent}    plainspec::fixture::run_scenario({:?}, {:?});\n",
            spec_path.as_str(),
            scenario.name,
        ));
        source.push_str(&format!("{indent}}}\n"));
    }

    if module.is_some() {
        source.push_str("}\n");
    }
    source
}

/// Write `content` to `path` only when it differs from what is already there.
///
/// Returns whether the file was written.
///
/// # Errors
///
/// Returns the underlying I/O error when the existing file cannot be read
/// (other than not existing) or the new content cannot be written.
pub fn write_if_changed(path: &Utf8Path, content: &str) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == content => return Ok(false),
        Ok(_) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    fs::write(path, content)?;
    Ok(true)
}

/// Reduce a scenario name to a safe test identifier.
///
/// Letters and digits are kept and lowercased, runs of whitespace become a
/// single underscore, other punctuation is dropped, and a leading digit is
/// prefixed with an underscore. Names with nothing usable left become
/// `scenario`.
#[must_use]
pub fn safe_identifier(name: &str) -> String {
    let mut out = String::new();
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() && !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        return "scenario".to_string();
    }
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// A safe identifier for `name` that is distinct from every name in `used`.
///
/// Colliding names gain a numeric suffix in encounter order.
fn unique_identifier(name: &str, used: &mut Vec<String>) -> String {
    let base = safe_identifier(name);
    if !used.iter().any(|existing| *existing == base) {
        used.push(base.clone());
        return base;
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !used.iter().any(|existing| *existing == candidate) {
            used.push(candidate.clone());
            return candidate;
        }
        suffix += 1;
    }
}
