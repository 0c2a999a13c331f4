//! Lint sheet files: integer and unique ids, unique sibling names, array element types,
//! complete containers, row widths.
//!
//! Usage:
//!   lint_sheet [OPTIONS] FILE ...
//!
//! Options:
//!   --human, -H  Human-readable output
//!
//! Exit code 1 if any file fails to compile or has error-level findings.

use std::path::Path;
use tabconf::lint::{lint_sheet, LintMessage, Severity};
use tabconf::logging::init_logging;
use tabconf::source::load_sheet;
use tabconf::ExportOptions;

fn location(m: &LintMessage) -> String {
    // 1-based, like a spreadsheet
    let row = m.row.map(|r| (r + 1).to_string()).unwrap_or_else(|| "-".to_string());
    let column = m.column.map(|c| (c + 1).to_string()).unwrap_or_else(|| "-".to_string());
    format!("{}:{}", row, column)
}

fn print_message(path: &str, m: &LintMessage, style: OutputStyle) {
    let severity_str = match m.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match style {
        OutputStyle::Compact => {
            println!(
                "{}:{}: {}: {} [{}]",
                path,
                location(m),
                severity_str,
                m.message,
                m.rule.id()
            );
        }
        OutputStyle::Human => {
            println!("  {} {}: {}", path, location(m), m.message);
            println!("    rule: {} ({})", m.rule.id(), severity_str);
        }
    }
}

#[derive(Clone, Copy)]
enum OutputStyle {
    Compact,
    Human,
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let style = if let Some(pos) = args.iter().position(|a| a == "--human" || a == "-H") {
        args.remove(pos);
        OutputStyle::Human
    } else {
        OutputStyle::Compact
    };
    init_logging(false);
    if args.is_empty() {
        anyhow::bail!("usage: lint_sheet [--human] FILE ...");
    }

    let options = ExportOptions::default();
    let mut has_error = false;
    let mut total_warnings = 0usize;
    let mut total_errors = 0usize;

    for path in &args {
        let path = Path::new(path);
        let display_path = path.display().to_string();
        let compiled = match load_sheet(path).map_err(anyhow::Error::from).and_then(|s| Ok(s.compile()?)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {}", display_path, e);
                total_errors += 1;
                has_error = true;
                continue;
            }
        };
        let messages = lint_sheet(&compiled, &options);
        for m in &messages {
            match m.severity {
                Severity::Error => total_errors += 1,
                Severity::Warning => total_warnings += 1,
            }
            print_message(&display_path, m, style);
        }
        if messages.iter().any(|m| m.severity == Severity::Error) {
            has_error = true;
        }
    }

    if total_errors > 0 || total_warnings > 0 {
        eprintln!("lint: {} error(s), {} warning(s)", total_errors, total_warnings);
    }
    if has_error {
        std::process::exit(1);
    }
    Ok(())
}
