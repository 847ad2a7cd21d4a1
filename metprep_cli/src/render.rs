//! Text and JSON rendering for command results.

use serde::Serialize;

use metprep_core::errors::{CalcError, CalcResult};
use metprep_core::worksheet::WorksheetReport;
use metprep_core::{OutputFormat, ResultLine};

const RULE: &str = "═══════════════════════════════════════";

fn banner(title: &str) {
    println!("{RULE}");
    println!("  {}", title.to_uppercase());
    println!("{RULE}");
}

fn print_lines(lines: &[ResultLine]) {
    let width = lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    for line in lines {
        let pad = width - line.label.chars().count();
        println!("  {}:{} {}", line.label, " ".repeat(pad), line.value);
    }
}

/// Print one result as a titled block, or as pretty JSON
pub fn emit<T: Serialize>(format: OutputFormat, title: &str, value: &T, lines: &[ResultLine]) -> CalcResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            banner(title);
            print_lines(lines);
            println!("{RULE}");
        }
    }
    Ok(())
}

pub fn emit_report(format: OutputFormat, report: &WorksheetReport) -> CalcResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let title = if report.title.is_empty() { "Worksheet" } else { report.title.as_str() };
            banner(title);
            for entry in &report.entries {
                println!();
                let status = if entry.is_ok() { "[OK]" } else { "[FAIL]" };
                if entry.label.is_empty() {
                    println!("{} {}", entry.calc_type, status);
                } else {
                    println!("{} - {} {}", entry.calc_type, entry.label, status);
                }
                print_lines(&entry.lines());
            }
            println!();
            println!("{RULE}");
            println!(
                "  {} item(s), {} failed",
                report.entries.len(),
                report.failed()
            );
            println!("{RULE}");
        }
    }
    Ok(())
}

/// Report an error on stderr; JSON mode adds the structured form
pub fn emit_error(format: OutputFormat, error: &CalcError) {
    eprintln!("Error: {}", error.user_message());
    if let CalcError::NotFound { .. } = error {
        eprintln!("  {error}");
    }
    if format == OutputFormat::Json {
        if let Ok(json) = serde_json::to_string_pretty(error) {
            eprintln!("{json}");
        }
    }
}
