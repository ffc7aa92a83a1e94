use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use iris::analysis::{analyze_file, collect_source_files, FileAnalysis};
use iris::config::{IrisConfig, Severity};

const TOTAL_WIDTH: usize = 80;

/// Iris - Cognitive Complexity Analysis
#[derive(Parser)]
#[command(name = "iris")]
#[command(about = "Cognitive complexity analysis for brace-structured source code")]
#[command(version)]
struct Cli {
  /// Files or directories to analyze
  #[arg(value_name = "PATH", default_value = ".")]
  paths: Vec<PathBuf>,

  /// Violation threshold; files scoring above it fail the run
  #[arg(short, long)]
  threshold: Option<u32>,

  /// Show the per-token contributions under each file
  #[arg(short, long)]
  details: bool,

  /// Emit results as JSON instead of the table
  #[arg(long)]
  json: bool,

  /// Only show files that exceed the threshold
  #[arg(short, long)]
  quiet: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "iris=debug" } else { "iris=warn" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let config = IrisConfig::load()?;
  let threshold = cli.threshold.unwrap_or(config.thresholds.high);

  let mut reports = Vec::new();
  let mut read_errors = 0;

  for root in &cli.paths {
    if !root.exists() {
      eprintln!("Error: {} is not a file or directory", root.display());
      read_errors += 1;
      continue;
    }

    for file in collect_source_files(root, &config) {
      match analyze_file(&file) {
        Ok(report) => reports.push(report),
        Err(e) => {
          eprintln!("Error analyzing {}: {}", file.display(), e);
          read_errors += 1;
        }
      }
    }
  }

  let violations =
    reports.iter().filter(|report| report.analysis.total_complexity > threshold).count();

  if cli.json {
    println!("{}", serde_json::to_string_pretty(&reports)?);
  } else {
    print_report(&reports, &cli, &config, threshold, violations, read_errors);
  }

  if violations > 0 || read_errors > 0 {
    process::exit(1);
  }
  Ok(())
}

fn print_report(
  reports: &[FileAnalysis],
  cli: &Cli,
  config: &IrisConfig,
  threshold: u32,
  violations: usize,
  read_errors: usize,
) {
  println!("{}", "🧠 Iris - Cognitive Complexity Analysis".purple().bold());
  println!();
  println!("{:>7}  {}", "SCORE", "FILE");
  println!("{}", "=".repeat(TOTAL_WIDTH));

  for report in reports {
    if cli.quiet && report.analysis.total_complexity <= threshold {
      continue;
    }
    print_file_row(report, config, cli.details);
  }

  println!("{}", "=".repeat(TOTAL_WIDTH));
  print_summary(reports.len(), violations, read_errors, threshold);
}

fn print_file_row(report: &FileAnalysis, config: &IrisConfig, details: bool) {
  let score = report.analysis.total_complexity;
  let severity = config.thresholds.severity(score);
  let score_text = format!("{:>7}", score);
  println!("{}  {}", colorize_score(&score_text, severity), report.path.display());

  if details {
    for contribution in &report.analysis.contributions {
      let location = format!("{}:{}", contribution.line, contribution.column);
      println!(
        "{:>9}  {:<8} {}",
        format!("+{}", contribution.contribution),
        location,
        contribution.description.dimmed()
      );
    }
  }
}

fn print_summary(analyzed: usize, violations: usize, read_errors: usize, threshold: u32) {
  let mut summary =
    format!("{} files analyzed, {} above threshold {}", analyzed, violations, threshold);
  if read_errors > 0 {
    summary.push_str(&format!(", {} unreadable", read_errors));
  }

  if violations > 0 || read_errors > 0 {
    println!("{}", summary.red());
  } else {
    println!("{}", summary.green());
  }
}

/// Map a severity band to its presentation color.
fn colorize_score(text: &str, severity: Severity) -> ColoredString {
  match severity {
    Severity::Low => text.green(),
    Severity::Moderate => text.yellow(),
    Severity::High => text.red(),
    Severity::Severe => text.red().bold(),
  }
}
