//! Command dispatch and formatting for the `plainspec` binary.

use std::fs;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, bail};
use serde::Serialize;

use crate::generate::{fixture_source, write_if_changed};

/// Command line interface for plain-text behaviour specifications.
#[derive(Parser)]
#[command(name = "plainspec", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate test fixtures from specification files.
    Generate(GenerateArgs),
    /// List the scenarios in a specification file.
    Scenarios(ScenariosArgs),
    /// Parse specification files and report structural errors.
    Check(CheckArgs),
}

/// Arguments for the `generate` command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Specification files to generate fixtures for.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,
    /// Wrap the generated tests in a module with this name.
    #[arg(long)]
    pub module: Option<String>,
}

/// Arguments for the `scenarios` command.
#[derive(Args)]
pub struct ScenariosArgs {
    /// Specification file to list.
    pub file: Utf8PathBuf,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Args)]
pub struct CheckArgs {
    /// Specification files to check.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,
}

#[derive(Serialize)]
struct ScenarioListing<'a> {
    name: &'a str,
    steps: usize,
}

/// Parse the command line and run the selected command.
///
/// # Errors
///
/// Returns an error when an input cannot be read or parsed, a fixture
/// cannot be written, or any checked file fails to parse.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut stdout = io::stdout();
    dispatch(&cli.command, &mut stdout)?;
    stdout.flush().wrap_err("failed to flush output")
}

fn dispatch(command: &Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Generate(args) => handle_generate(args, out),
        Commands::Scenarios(args) => handle_scenarios(args, out),
        Commands::Check(args) => handle_check(args, out),
    }
}

fn handle_generate(args: &GenerateArgs, out: &mut impl Write) -> Result<()> {
    for file in &args.files {
        let document = load_document(file)?;
        let source = fixture_source(&document, file, args.module.as_deref());
        let target = file.with_extension("g.rs");
        let changed = write_if_changed(&target, &source)
            .wrap_err_with(|| format!("failed to write {target}"))?;
        let status = if changed { "written" } else { "unchanged" };
        writeln!(out, "{target}: {status}")?;
    }
    Ok(())
}

fn handle_scenarios(args: &ScenariosArgs, out: &mut impl Write) -> Result<()> {
    let document = load_document(&args.file)?;
    if args.json {
        let listings: Vec<ScenarioListing<'_>> = document
            .scenarios
            .iter()
            .map(|scenario| ScenarioListing {
                name: &scenario.name,
                steps: scenario.steps.len(),
            })
            .collect();
        serde_json::to_writer(&mut *out, &listings)
            .wrap_err("failed to serialise scenario listing")?;
        writeln!(out)?;
        return Ok(());
    }
    for scenario in &document.scenarios {
        writeln!(out, "{}", scenario.name)?;
    }
    Ok(())
}

fn handle_check(args: &CheckArgs, out: &mut impl Write) -> Result<()> {
    let mut failures = 0usize;
    for file in &args.files {
        let text =
            fs::read_to_string(file).wrap_err_with(|| format!("failed to read {file}"))?;
        match plainspec::parse(&text) {
            Ok(document) => {
                writeln!(out, "{file}: ok, {} scenario(s)", document.scenarios.len())?;
            }
            Err(error) => {
                failures += 1;
                writeln!(out, "{file}: {error}")?;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} file(s) failed to parse", args.files.len());
    }
    Ok(())
}

fn load_document(file: &Utf8PathBuf) -> Result<plainspec::SpecificationDocument> {
    let text = fs::read_to_string(file).wrap_err_with(|| format!("failed to read {file}"))?;
    plainspec::parse(&text).wrap_err_with(|| format!("failed to parse {file}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn spec_file(content: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(err) => panic!("temp dir should be created: {err}"),
        };
        let path = Utf8PathBuf::from_path_buf(dir.path().join("spec.txt"))
            .unwrap_or_else(|path| panic!("temp path should be UTF-8: {}", path.display()));
        let mut file = match fs::File::create(&path) {
            Ok(file) => file,
            Err(err) => panic!("spec file should be created: {err}"),
        };
        if let Err(err) = file.write_all(content.as_bytes()) {
            panic!("spec file should be writable: {err}");
        }
        (dir, path)
    }

    fn rendered(buffer: &[u8]) -> String {
        String::from_utf8_lossy(buffer).into_owned()
    }

    #[test]
    fn scenarios_lists_names_in_document_order() {
        let (_dir, path) = spec_file(
            "Scenario: First\nGiven a\n\nScenario: Second\nGiven b\n",
        );
        let mut out = Vec::new();
        let args = ScenariosArgs { file: path, json: false };
        if let Err(err) = handle_scenarios(&args, &mut out) {
            panic!("scenarios should succeed: {err}");
        }
        assert_eq!(rendered(&out), "First\nSecond\n");
    }

    #[test]
    fn scenarios_json_includes_step_counts() {
        let (_dir, path) = spec_file("Scenario: Only\nGiven a\nWhen b\n");
        let mut out = Vec::new();
        let args = ScenariosArgs { file: path, json: true };
        if let Err(err) = handle_scenarios(&args, &mut out) {
            panic!("scenarios should succeed: {err}");
        }
        let parsed: serde_json::Value = match serde_json::from_slice(&out) {
            Ok(parsed) => parsed,
            Err(err) => panic!("output should be JSON: {err}"),
        };
        let entry = parsed.as_array().and_then(|array| array.first());
        assert_eq!(
            entry.and_then(|e| e.get("name")),
            Some(&serde_json::Value::String("Only".into()))
        );
        assert_eq!(
            entry.and_then(|e| e.get("steps")),
            Some(&serde_json::Value::from(2_u64))
        );
    }

    #[test]
    fn check_fails_when_any_file_fails_to_parse() {
        let (_dir, path) = spec_file("Given a step before any scenario\n");
        let mut out = Vec::new();
        let args = CheckArgs { files: vec![path] };
        assert!(handle_check(&args, &mut out).is_err());
        assert!(rendered(&out).contains("line 1"));
    }
}
