//! Saga Test Generator Binary
//!
//! Run with: `saga-testgen [OPTIONS] [FILES...]`

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use saga_testgen::output::{module_stem, test_path_for};
use saga_testgen::{generate, Config, GenerateError, Generated};

#[derive(Parser)]
#[command(name = "saga-testgen")]
#[command(about = "Generate Jest tests for every path through exported sagas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Saga modules (reads from stdin if none provided)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print generated tests instead of writing test files
    #[arg(long)]
    stdout: bool,

    /// Check that existing test files are up to date without writing (needs FILEs)
    #[arg(long)]
    check: bool,

    /// Print the analysis as JSON instead of generating tests: one array of
    /// `{ file, analysis }` entries for FILEs, a single analysis for stdin
    #[arg(long)]
    json: bool,

    /// Module name used for stdin input
    #[arg(long, value_name = "STEM", default_value = "module")]
    name: String,

    /// Placeholder prefix for free variables
    #[arg(long)]
    prefix: Option<String>,

    /// Marker prepended to test titles for alternate branches
    #[arg(long)]
    marker: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration
    Config,
}

/// What happened to one input module.
#[derive(Default)]
struct Outcome {
    /// Syntax errors or declarations that could not be analyzed.
    failed: bool,
    /// `--check` found the test file out of date.
    stale: bool,
    /// `--json` entry for this module.
    report: Option<serde_json::Value>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Config) = &cli.command {
        println!("{}", serde_json::to_string_pretty(&Config::default())?);
        return Ok(());
    }

    let config = build_config(&cli)?;

    if cli.files.is_empty() {
        if cli.check {
            bail!("--check needs at least one FILE; stdin has no test file to compare against");
        }
        let outcome = process_stdin(&config, &cli)?;
        if let Some(report) = &outcome.report {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        if outcome.failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut had_errors = false;
    let mut files_stale = 0;
    let mut reports = Vec::new();

    for path in &cli.files {
        match process_file(path, &config, &cli) {
            Ok(outcome) => {
                had_errors |= outcome.failed;
                if outcome.stale {
                    files_stale += 1;
                }
                reports.extend(outcome.report);
            }
            Err(e) => {
                error!("Error processing {}: {:#}", path.display(), e);
                had_errors = true;
            }
        }
    }

    // One JSON document for the whole run
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if cli.check {
        info!(
            "Checked {} files, {} out of date",
            cli.files.len(),
            files_stale
        );
        if files_stale > 0 {
            std::process::exit(1);
        }
    }

    if had_errors {
        std::process::exit(1);
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Override with CLI options
    if let Some(prefix) = &cli.prefix {
        config.placeholder_prefix = prefix.clone();
    }
    if let Some(marker) = &cli.marker {
        config.variation_marker = marker.clone();
    }

    Ok(config)
}

fn use_color(cli: &Cli) -> bool {
    !cli.no_color && io::stderr().is_terminal()
}

/// Generate for one module and report its diagnostics. `None` when the
/// module does not parse.
fn run(file: &str, source: &str, stem: &str, config: &Config, cli: &Cli) -> Option<Generated> {
    let color = use_color(cli);
    let generated = match generate(source, stem, config) {
        Ok(generated) => generated,
        Err(GenerateError::Malformed(diagnostics)) => {
            for diagnostic in &diagnostics {
                eprint!("{}", diagnostic.render(file, source, color));
            }
            error!("{file}: {} syntax error(s), nothing generated", diagnostics.len());
            return None;
        }
    };

    for failure in &generated.analysis.failures {
        eprint!("{}", failure.to_diagnostic().render(file, source, color));
        warn!("{file}: skipped `{}`", failure.declaration);
    }
    Some(generated)
}

fn process_stdin(config: &Config, cli: &Cli) -> Result<Outcome> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read from stdin")?;

    let Some(generated) = run("<stdin>", &source, &cli.name, config, cli) else {
        return Ok(Outcome {
            failed: true,
            ..Outcome::default()
        });
    };

    let failed = !generated.analysis.is_clean();
    if cli.json {
        return Ok(Outcome {
            failed,
            report: Some(serde_json::to_value(&generated.analysis)?),
            ..Outcome::default()
        });
    }

    print!("{}", generated.text);
    Ok(Outcome {
        failed,
        ..Outcome::default()
    })
}

fn process_file(path: &Path, config: &Config, cli: &Cli) -> Result<Outcome> {
    debug!("Processing: {}", path.display());

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let file = path.display().to_string();
    let Some(generated) = run(&file, &source, &module_stem(path), config, cli) else {
        return Ok(Outcome {
            failed: true,
            ..Outcome::default()
        });
    };
    let mut outcome = Outcome {
        failed: !generated.analysis.is_clean(),
        ..Outcome::default()
    };

    if cli.json {
        outcome.report = Some(serde_json::json!({
            "file": file,
            "analysis": generated.analysis,
        }));
        return Ok(outcome);
    }

    let target = test_path_for(path, &config.test_suffix);

    if cli.check {
        let existing = fs::read_to_string(&target).ok();
        if existing.as_deref() != Some(generated.text.as_str()) {
            println!("{}", target.display());
            outcome.stale = true;
        }
        return Ok(outcome);
    }

    if cli.stdout {
        print!("{}", generated.text);
        return Ok(outcome);
    }

    fs::write(&target, &generated.text)
        .with_context(|| format!("Failed to write file: {}", target.display()))?;
    info!(
        "Wrote {} ({} tests)",
        target.display(),
        generated.test_count()
    );

    Ok(outcome)
}
